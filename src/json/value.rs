//! The document tree
//!
//! A [`Value`] owns all of its children outright: arrays own their elements, objects own
//! their member values, and nothing is shared or reference counted. A parsed tree is
//! handed to the caller as a single root value.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::json::error::ParseError;

/// A parsed JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `null`
    Null,
    /// `true` or `false`
    Boolean(bool),
    /// Any number literal; always finite.
    Number(f64),
    /// String contents with every escape sequence decoded.
    String(String),
    /// Elements in source order.
    Array(Vec<Value>),
    /// Members ordered by key. A key that occurs twice keeps the value written last.
    Object(BTreeMap<String, Value>),
}

/// The variant of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        };
        f.write_str(name)
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(elements) => Some(elements),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Object(members) => Some(members),
            _ => None,
        }
    }

    /// Look up a member of an object. Returns `None` for missing keys and non-objects.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|members| members.get(key))
    }
}

impl FromStr for Value {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::json::parse(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(elements: Vec<Value>) -> Self {
        Value::Array(elements)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(members: BTreeMap<String, Value>) -> Self {
        Value::Object(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_match_variant() {
        let value = Value::from(vec![Value::Null, Value::from(1.5), Value::from("x")]);

        assert_eq!(value.kind(), ValueKind::Array);
        let elements = value.as_array().unwrap();
        assert!(elements[0].is_null());
        assert_eq!(elements[1].as_f64(), Some(1.5));
        assert_eq!(elements[2].as_str(), Some("x"));
        assert_eq!(elements[2].as_bool(), None);
    }

    #[test]
    fn test_get_member() {
        let mut members = BTreeMap::new();
        members.insert("a".to_string(), Value::from(true));
        let value = Value::from(members);

        assert_eq!(value.get("a"), Some(&Value::Boolean(true)));
        assert_eq!(value.get("b"), None);
        assert_eq!(Value::Null.get("a"), None);
    }

    #[test]
    fn test_from_str_parses() {
        let value: Value = "[true, false]".parse().unwrap();
        assert_eq!(
            value,
            Value::Array(vec![Value::Boolean(true), Value::Boolean(false)])
        );
        assert!("[true,".parse::<Value>().is_err());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ValueKind::Object.to_string(), "object");
        assert_eq!(Value::Number(0.0).kind().to_string(), "number");
    }
}
