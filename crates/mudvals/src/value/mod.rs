//! Tagged runtime values for the scripting VM

pub(crate) mod cmp;
mod display;

pub use cmp::Case;

use std::rc::Rc;
use std::sync::Arc;

use crate::array::ArrayRef;

/// Handle into the external object database.
///
/// Validity and permission checks on the referenced object live in the host
/// server; this crate only stores and orders the raw reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjRef(pub i64);

/// Resolved subroutine address: the program that owns the code plus the
/// instruction offset within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgAddr {
    /// Program object that owns the code
    pub program: ObjRef,
    /// Instruction offset within the program
    pub offset: usize,
}

/// Boolean permission expression owned by the host server.
///
/// The engine never evaluates locks; it only needs their canonical textual
/// rendering to order lock-typed keys and values.
pub trait LockExpr {
    /// Render the expression to its canonical textual form.
    fn unparse(&self) -> String;
}

/// Runtime value flowing through the VM stack and array containers.
///
/// Values are either owned inline (integers, floats, references, variable
/// slots) or share a reference-counted payload (`String`, `Lock`, `Array`).
/// Cloning a value bumps the payload's reference count; dropping the last
/// clone frees it. There is no manual acquire/release API.
#[derive(Clone)]
pub enum Value {
    /// 64-bit signed integer
    Integer(i64),

    /// 64-bit float
    Float(f64),

    /// Object database reference
    Object(ObjRef),

    /// Global variable slot
    Variable(usize),

    /// Program-local variable slot
    LocalVariable(usize),

    /// Procedure-scoped variable slot
    ScopedVariable(usize),

    /// Shared immutable string buffer
    String(Arc<str>),

    /// Boolean permission expression, ordered by its rendered text
    Lock(Rc<dyn LockExpr>),

    /// Resolved subroutine address
    Address(ProgAddr),

    /// Shared hybrid array container
    Array(ArrayRef),

    /// Stack marker delimiting an in-progress array literal
    Mark,
}

/// Payload-free type tag of a [`Value`].
///
/// Tags carry a fixed, arbitrary rank (their declaration order) used to
/// order values of differing types; only the `Integer`/`Float` pair is
/// compared numerically across tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// Signed integer
    Integer,
    /// Float
    Float,
    /// Object reference
    Object,
    /// Global variable slot
    Variable,
    /// Program-local variable slot
    LocalVariable,
    /// Procedure-scoped variable slot
    ScopedVariable,
    /// String
    String,
    /// Permission lock expression
    Lock,
    /// Subroutine address
    Address,
    /// Array container
    Array,
    /// Stack marker
    Mark,
}

impl TypeTag {
    pub(crate) fn rank(self) -> u8 {
        match self {
            TypeTag::Integer => 0,
            TypeTag::Float => 1,
            TypeTag::Object => 2,
            TypeTag::Variable => 3,
            TypeTag::LocalVariable => 4,
            TypeTag::ScopedVariable => 5,
            TypeTag::String => 6,
            TypeTag::Lock => 7,
            TypeTag::Address => 8,
            TypeTag::Array => 9,
            TypeTag::Mark => 10,
        }
    }
}

impl Value {
    /// The type tag of this value.
    pub fn tag(&self) -> TypeTag {
        match self {
            Value::Integer(_) => TypeTag::Integer,
            Value::Float(_) => TypeTag::Float,
            Value::Object(_) => TypeTag::Object,
            Value::Variable(_) => TypeTag::Variable,
            Value::LocalVariable(_) => TypeTag::LocalVariable,
            Value::ScopedVariable(_) => TypeTag::ScopedVariable,
            Value::String(_) => TypeTag::String,
            Value::Lock(_) => TypeTag::Lock,
            Value::Address(_) => TypeTag::Address,
            Value::Array(_) => TypeTag::Array,
            Value::Mark => TypeTag::Mark,
        }
    }

    /// Create a string value sharing the given buffer.
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Value::String(s.into())
    }

    /// Create a lock value sharing the given expression.
    pub fn lock(expr: Rc<dyn LockExpr>) -> Self {
        Value::Lock(expr)
    }

    /// Check if the value is an integer.
    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    /// Check if the value is a float.
    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    /// Check if the value is numeric (integer or float).
    pub fn is_numeric(&self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// Check if the value is a string.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Check if the value is an array container.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Extract the integer payload.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract the float payload.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Extract the string payload as a slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    /// Extract the object reference payload.
    pub fn as_object(&self) -> Option<ObjRef> {
        match self {
            Value::Object(r) => Some(*r),
            _ => None,
        }
    }

    /// Extract the array handle.
    pub fn as_array(&self) -> Option<&ArrayRef> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Variable(a), Value::Variable(b)) => a == b,
            (Value::LocalVariable(a), Value::LocalVariable(b)) => a == b,
            (Value::ScopedVariable(a), Value::ScopedVariable(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,

            // Locks are equal when they render identically; structurally
            // different but logically equivalent locks stay unequal.
            (Value::Lock(a), Value::Lock(b)) => a.unparse() == b.unparse(),

            (Value::Address(a), Value::Address(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Mark, Value::Mark) => true,

            // Different tags are never equal; the ordering comparator
            // handles numeric cross-tag equivalence instead.
            _ => false,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n as i64)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Arc<str>> for Value {
    fn from(s: Arc<str>) -> Self {
        Value::String(s)
    }
}

impl From<ObjRef> for Value {
    fn from(r: ObjRef) -> Self {
        Value::Object(r)
    }
}

impl From<ArrayRef> for Value {
    fn from(a: ArrayRef) -> Self {
        Value::Array(a)
    }
}
