//! Debug and Display implementations for Value

use std::fmt;

use super::Value;

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::Object(r) => write!(f, "#{}", r.0),
            Value::Variable(n) => write!(f, "<var {}>", n),
            Value::LocalVariable(n) => write!(f, "<lvar {}>", n),
            Value::ScopedVariable(n) => write!(f, "<svar {}>", n),
            Value::String(s) => write!(f, "{:?}", s.as_ref()),
            Value::Lock(l) => write!(f, "<lock {}>", l.unparse()),
            Value::Address(a) => write!(f, "<addr #{}+{}>", a.program.0, a.offset),
            Value::Array(a) => write!(f, "{:?}", a),
            Value::Mark => write!(f, "<mark>"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display is user-facing: strings print without quotes
        match self {
            Value::String(s) => write!(f, "{}", s.as_ref()),
            _ => fmt::Debug::fmt(self, f),
        }
    }
}

impl fmt::Display for super::ObjRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for super::TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            super::TypeTag::Integer => "integer",
            super::TypeTag::Float => "float",
            super::TypeTag::Object => "object",
            super::TypeTag::Variable => "variable",
            super::TypeTag::LocalVariable => "local variable",
            super::TypeTag::ScopedVariable => "scoped variable",
            super::TypeTag::String => "string",
            super::TypeTag::Lock => "lock",
            super::TypeTag::Address => "address",
            super::TypeTag::Array => "array",
            super::TypeTag::Mark => "mark",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::super::{ObjRef, ProgAddr, TypeTag, Value};
    use crate::array::ArrayRef;

    #[test]
    fn test_debug_scalars() {
        assert_eq!(format!("{:?}", Value::Integer(42)), "42");
        assert_eq!(format!("{:?}", Value::Object(ObjRef(7))), "#7");
        assert_eq!(format!("{:?}", Value::string("hi")), "\"hi\"");
        assert_eq!(format!("{:?}", Value::Mark), "<mark>");
        let addr = Value::Address(ProgAddr {
            program: ObjRef(3),
            offset: 12,
        });
        assert_eq!(format!("{:?}", addr), "<addr #3+12>");
    }

    #[test]
    fn test_display_strings_unquoted() {
        assert_eq!(format!("{}", Value::string("hi")), "hi");
        assert_eq!(format!("{}", Value::Integer(5)), "5");
    }

    #[test]
    fn test_debug_arrays() {
        let arr = ArrayRef::from_values(vec![Value::Integer(1), Value::string("a")]);
        assert_eq!(format!("{:?}", Value::Array(arr)), "[1, \"a\"]");
    }

    #[test]
    fn test_type_tag_display() {
        assert_eq!(TypeTag::Integer.to_string(), "integer");
        assert_eq!(TypeTag::Array.to_string(), "array");
    }
}
