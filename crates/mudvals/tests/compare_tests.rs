//! Integration tests for value comparison and ordering

use std::cmp::Ordering;
use std::rc::Rc;

use mudvals::*;
use pretty_assertions::assert_eq;

fn int(n: i64) -> Value {
    Value::Integer(n)
}

fn flt(x: f64) -> Value {
    Value::Float(x)
}

fn s(text: &str) -> Value {
    Value::string(text)
}

struct TextLock(String);

impl LockExpr for TextLock {
    fn unparse(&self) -> String {
        self.0.clone()
    }
}

fn lock(text: &str) -> Value {
    Value::lock(Rc::new(TextLock(text.to_string())))
}

#[test]
fn test_integer_against_float_tolerance() {
    // 3 vs 3.0 is equal; 3 vs 3.0000001 is not (the difference is far
    // outside relative epsilon); 3 vs 4.0 orders numerically
    assert_eq!(int(3).compare(&flt(3.0), Case::Sensitive), Ordering::Equal);
    assert_eq!(
        int(3).compare(&flt(3.000_000_1), Case::Sensitive),
        Ordering::Less
    );
    assert_eq!(int(3).compare(&flt(4.0), Case::Sensitive), Ordering::Less);
    assert_eq!(flt(4.0).compare(&int(3), Case::Sensitive), Ordering::Greater);
}

#[test]
fn test_zero_left_operand() {
    assert_eq!(int(0).compare(&flt(0.0), Case::Sensitive), Ordering::Equal);
    assert_eq!(flt(0.0).compare(&int(0), Case::Sensitive), Ordering::Equal);
    // A zero left operand falls back to an absolute tolerance, so values
    // within epsilon of zero compare equal to it
    assert_eq!(
        flt(0.0).compare(&flt(1e-300), Case::Sensitive),
        Ordering::Equal
    );
    assert_eq!(flt(0.0).compare(&flt(1.0), Case::Sensitive), Ordering::Less);
}

#[test]
fn test_string_case_modes() {
    assert_eq!(
        s("Hello").compare(&s("hello"), Case::Insensitive),
        Ordering::Equal
    );
    assert_ne!(
        s("Hello").compare(&s("hello"), Case::Sensitive),
        Ordering::Equal
    );
    assert_eq!(
        s("abc").compare(&s("abd"), Case::Sensitive),
        Ordering::Less
    );
}

#[test]
fn test_locks_compare_by_rendered_text() {
    assert_eq!(
        lock("me&!guest").compare(&lock("me&!guest"), Case::Sensitive),
        Ordering::Equal
    );
    // Logically equivalent but textually distinct locks stay distinct
    assert_ne!(
        lock("a&b").compare(&lock("b&a"), Case::Sensitive),
        Ordering::Equal
    );
}

#[test]
fn test_array_values_compare_structurally() {
    let a = ArrayRef::from_values(vec![int(1), s("x")]).into_value();
    let b = ArrayRef::from_values(vec![int(1), s("x")]).into_value();
    let c = ArrayRef::from_values(vec![int(1), s("y")]).into_value();
    assert_eq!(a.compare(&b, Case::Sensitive), Ordering::Equal);
    assert_eq!(a.compare(&c, Case::Sensitive), Ordering::Less);

    // A shorter prefix orders before its extension
    let short = ArrayRef::from_values(vec![int(1)]).into_value();
    assert_eq!(short.compare(&a, Case::Sensitive), Ordering::Less);
}

#[test]
fn test_dictionaries_compare_in_key_order() {
    let mut a = ArrayRef::new_dictionary();
    a.set_str_key("x", 1).unwrap();
    a.set_str_key("y", 2).unwrap();
    let mut b = ArrayRef::new_dictionary();
    // Insertion order does not matter; key order does
    b.set_str_key("y", 2).unwrap();
    b.set_str_key("x", 1).unwrap();
    assert_eq!(
        a.into_value().compare(&b.into_value(), Case::Sensitive),
        Ordering::Equal
    );
}

#[test]
fn test_mixed_tags_order_consistently() {
    // Integers sort before strings, strings before arrays, regardless of
    // payload magnitude
    let arr = ArrayRef::new_packed(0).into_value();
    assert_eq!(
        int(1_000_000).compare(&s(""), Case::Sensitive),
        Ordering::Less
    );
    assert_eq!(s("zzz").compare(&arr, Case::Sensitive), Ordering::Less);
    assert_eq!(
        Value::Object(ObjRef(1)).compare(&s("a"), Case::Sensitive),
        Ordering::Less
    );
}

#[test]
fn test_heterogeneous_dictionary_key_order() {
    // One dictionary holding every key shape a script can produce
    let mut arr = ArrayRef::new_dictionary();
    arr.set_item(&s("name"), int(1)).unwrap();
    arr.set_item(&int(5), int(2)).unwrap();
    arr.set_item(&Value::Float(2.5), int(3)).unwrap();
    arr.set_item(&Value::Object(ObjRef(100)), int(4)).unwrap();
    let keys: Vec<Value> = arr.entries().into_iter().map(|(k, _)| k).collect();
    // Numeric keys interleave by magnitude; other tags follow by rank
    assert_eq!(
        keys,
        vec![
            Value::Float(2.5),
            int(5),
            Value::Object(ObjRef(100)),
            s("name"),
        ]
    );
}

#[test]
fn test_sort_uses_comparator() {
    // The VM's SORT primitive sorts packed values with this comparator
    let mut values = vec![s("b"), int(10), flt(2.5), s("A"), int(-3)];
    values.sort_by(|a, b| a.compare(b, Case::Insensitive));
    assert_eq!(values, vec![int(-3), flt(2.5), int(10), s("A"), s("b")]);
}
