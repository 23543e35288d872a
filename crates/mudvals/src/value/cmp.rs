//! Total ordering over tagged values
//!
//! The comparator defined here is the key ordering for dictionary-mode
//! arrays, so it must be a pure total order: no side effects, and the same
//! answer for the same operands every time, for as long as a key sits in a
//! tree.

use std::cmp::Ordering;

use super::Value;
use crate::array::ArrayRef;

/// Case sensitivity mode for string comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    /// Compare string bytes exactly
    Sensitive,
    /// Fold ASCII case before comparing
    Insensitive,
}

impl Value {
    /// Three-way comparison establishing a total order over values.
    ///
    /// Values of the same tag compare by payload: numbers numerically
    /// (floats with a relative-epsilon equality tolerance), strings by
    /// bytes under the given case mode, arrays structurally in key order,
    /// locks by their rendered text, addresses by owning program then
    /// offset. Across tags, `Integer` and `Float` compare numerically;
    /// every other mixed pair orders by a fixed tag rank.
    pub fn compare(&self, other: &Value, case: Case) -> Ordering {
        compare(self, other, case)
    }
}

pub(crate) fn compare(a: &Value, b: &Value, case: Case) -> Ordering {
    if a.tag() != b.tag() {
        return match (a, b) {
            (Value::Integer(i), Value::Float(f)) => numeric_compare(*i as f64, *f),
            (Value::Float(f), Value::Integer(i)) => numeric_compare(*f, *i as f64),
            _ => a.tag().rank().cmp(&b.tag().rank()),
        };
    }
    match (a, b) {
        (Value::Integer(x), Value::Integer(y)) => x.cmp(y),
        (Value::Float(x), Value::Float(y)) => {
            if x == y {
                Ordering::Equal
            } else {
                numeric_compare(*x, *y)
            }
        }
        (Value::Object(x), Value::Object(y)) => x.0.cmp(&y.0),
        (Value::Variable(x), Value::Variable(y)) => x.cmp(y),
        (Value::LocalVariable(x), Value::LocalVariable(y)) => x.cmp(y),
        (Value::ScopedVariable(x), Value::ScopedVariable(y)) => x.cmp(y),
        (Value::String(x), Value::String(y)) => match case {
            Case::Sensitive => x.as_bytes().cmp(y.as_bytes()),
            Case::Insensitive => casefold_compare(x, y),
        },
        (Value::Lock(x), Value::Lock(y)) => x.unparse().as_bytes().cmp(y.unparse().as_bytes()),
        (Value::Address(x), Value::Address(y)) => x
            .program
            .cmp(&y.program)
            .then(x.offset.cmp(&y.offset)),
        (Value::Array(x), Value::Array(y)) => compare_arrays(x, y, case),
        (Value::Mark, Value::Mark) => Ordering::Equal,
        _ => unreachable!("same-tag pair not covered by comparator"),
    }
}

/// Numeric comparison with a relative-epsilon equality tolerance.
fn numeric_compare(a: f64, b: f64) -> Ordering {
    if relative_eq(a, b) {
        Ordering::Equal
    } else if a > b {
        Ordering::Greater
    } else {
        Ordering::Less
    }
}

// The denominator is the left operand; an exactly-zero left operand falls
// back to an absolute test instead of dividing by zero.
fn relative_eq(a: f64, b: f64) -> bool {
    if a == 0.0 {
        (a - b).abs() < f64::EPSILON
    } else {
        ((a - b) / a).abs() < f64::EPSILON
    }
}

fn casefold_compare(a: &str, b: &str) -> Ordering {
    let x = a.bytes().map(|c| c.to_ascii_lowercase());
    let y = b.bytes().map(|c| c.to_ascii_lowercase());
    x.cmp(y)
}

/// Structural array comparison: same handle is equal; otherwise walk both
/// containers in key order, comparing each key then each value, and let the
/// first difference win. The array that runs out of entries first is the
/// smaller one.
fn compare_arrays(a: &ArrayRef, b: &ArrayRef, case: Case) -> Ordering {
    if ArrayRef::ptr_eq(a, b) {
        return Ordering::Equal;
    }
    let lhs = a.entries();
    let rhs = b.entries();
    for ((ka, va), (kb, vb)) in lhs.iter().zip(rhs.iter()) {
        let res = compare(ka, kb, case);
        if res != Ordering::Equal {
            return res;
        }
        let res = compare(va, vb, case);
        if res != Ordering::Equal {
            return res;
        }
    }
    lhs.len().cmp(&rhs.len())
}
