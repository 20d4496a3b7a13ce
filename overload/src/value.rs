//! Runtime values that can be dispatched on.

use std::fmt;

use indexmap::IndexMap;

use crate::hierarchy::TypeTag;

/// A value whose runtime type can be inspected at call time.
///
/// The registry only ever asks a value for its tag; everything else about
/// the value is opaque to dispatch.
pub trait Typed {
    /// The runtime type of this value.
    fn type_tag(&self) -> TypeTag;
}

impl<T: Typed + ?Sized> Typed for &T {
    fn type_tag(&self) -> TypeTag {
        (**self).type_tag()
    }
}

/// An instance of a user-declared type.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    /// The declared type of this instance.
    pub tag: TypeTag,
    /// Named fields, in insertion order.
    pub fields: IndexMap<String, Value>,
}

impl Object {
    /// Creates an instance with no fields.
    pub fn new(tag: TypeTag) -> Self {
        Self {
            tag,
            fields: IndexMap::new(),
        }
    }

    /// Adds a field, replacing any previous value under the same name.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Returns a field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// A dynamically typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Tuple(Vec<Value>),
    Object(Object),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer view of the value; `bool` counts as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    /// Numeric view of the value, widening integers.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            other => other.as_int().map(|i| i as f64),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[Value]> {
        match self {
            Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }
}

impl Typed for Value {
    fn type_tag(&self) -> TypeTag {
        match self {
            Value::None => TypeTag::NONE,
            Value::Bool(_) => TypeTag::BOOL,
            Value::Int(_) => TypeTag::INT,
            Value::Float(_) => TypeTag::FLOAT,
            Value::Str(_) => TypeTag::STR,
            Value::Tuple(_) => TypeTag::TUPLE,
            Value::Object(obj) => obj.tag,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Str(s) => write!(f, "{}", s),
            Value::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            Value::Object(obj) => {
                write!(f, "<{}", obj.tag)?;
                for (name, value) in &obj.fields {
                    write!(f, " {}={}", name, value)?;
                }
                write!(f, ">")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Tuple(items)
    }
}

impl From<Object> for Value {
    fn from(obj: Object) -> Self {
        Value::Object(obj)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tags() {
        assert_eq!(Value::None.type_tag(), TypeTag::NONE);
        assert_eq!(Value::from(true).type_tag(), TypeTag::BOOL);
        assert_eq!(Value::from(1).type_tag(), TypeTag::INT);
        assert_eq!(Value::from(1.5).type_tag(), TypeTag::FLOAT);
        assert_eq!(Value::from("x").type_tag(), TypeTag::STR);
        assert_eq!(Value::from(vec![Value::from(1)]).type_tag(), TypeTag::TUPLE);
    }

    #[test]
    fn test_object_carries_declared_tag() {
        let mut types = crate::TypeHierarchy::new();
        let dog = types.declare("Dog", &[]).unwrap();
        let rex = Value::from(Object::new(dog).with_field("name", "Rex"));

        assert_eq!(rex.type_tag(), dog);
        assert_eq!(
            rex.as_object().and_then(|o| o.field("name")),
            Some(&Value::from("Rex"))
        );
    }

    #[test]
    fn test_numeric_views() {
        assert_eq!(Value::from(true).as_int(), Some(1));
        assert_eq!(Value::from(3).as_float(), Some(3.0));
        assert_eq!(Value::from("3").as_int(), None);
    }

    #[test]
    fn test_display() {
        let tuple = Value::from(vec![Value::from(1), Value::from("a"), Value::None]);
        assert_eq!(tuple.to_string(), "(1, a, None)");
        assert_eq!(Value::from(vec![Value::from(1)]).to_string(), "(1,)");
        assert_eq!(Value::from(2.0).to_string(), "2.0");
        assert_eq!(Value::from(false).to_string(), "False");
    }
}
