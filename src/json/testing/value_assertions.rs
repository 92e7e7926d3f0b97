//! Fluent assertion API for value trees

use crate::json::value::{Value, ValueKind};

// ============================================================================
// Entry Point
// ============================================================================

/// Create an assertion builder for the root of a tree
pub fn assert_value(value: &Value) -> ValueAssertion<'_> {
    ValueAssertion {
        value,
        path: "$".to_string(),
    }
}

// ============================================================================
// Value Assertions
// ============================================================================

pub struct ValueAssertion<'a> {
    value: &'a Value,
    path: String,
}

impl<'a> ValueAssertion<'a> {
    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// Assert the variant of the value
    pub fn kind(self, expected: ValueKind) -> Self {
        assert_eq!(
            self.value.kind(),
            expected,
            "{}: expected {}, found {}",
            self.path,
            expected,
            summarize(self.value)
        );
        self
    }

    pub fn is_null(self) -> Self {
        self.kind(ValueKind::Null)
    }

    pub fn boolean(self, expected: bool) -> Self {
        let this = self.kind(ValueKind::Boolean);
        assert_eq!(
            this.value.as_bool(),
            Some(expected),
            "{}: wrong boolean",
            this.path
        );
        this
    }

    /// Assert a number, compared exactly
    pub fn number(self, expected: f64) -> Self {
        let this = self.kind(ValueKind::Number);
        assert_eq!(
            this.value.as_f64(),
            Some(expected),
            "{}: wrong number",
            this.path
        );
        this
    }

    pub fn string(self, expected: &str) -> Self {
        let this = self.kind(ValueKind::String);
        assert_eq!(
            this.value.as_str(),
            Some(expected),
            "{}: wrong string",
            this.path
        );
        this
    }

    /// Assert the value is an array with `expected` elements
    pub fn array_len(self, expected: usize) -> Self {
        let this = self.kind(ValueKind::Array);
        let actual = this.value.as_array().map_or(0, |elements| elements.len());
        assert_eq!(
            actual, expected,
            "{}: expected {} elements, found {}: {}",
            this.path, expected, actual, this.value
        );
        this
    }

    /// Assert on a specific element of an array
    pub fn element<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(ValueAssertion<'a>),
    {
        let this = self.kind(ValueKind::Array);
        let elements = this.value.as_array().unwrap_or_default();
        assert!(
            index < elements.len(),
            "{}: element index {} out of bounds (array has {} elements)",
            this.path,
            index,
            elements.len()
        );
        assertion(ValueAssertion {
            value: &elements[index],
            path: format!("{}[{}]", this.path, index),
        });
        this
    }

    /// Assert the value is an object with `expected` members
    pub fn object_len(self, expected: usize) -> Self {
        let this = self.kind(ValueKind::Object);
        let actual = this.value.as_object().map_or(0, |members| members.len());
        assert_eq!(
            actual, expected,
            "{}: expected {} members, found {}: {}",
            this.path, expected, actual, this.value
        );
        this
    }

    /// Assert on the member stored under `key`
    pub fn member<F>(self, key: &str, assertion: F) -> Self
    where
        F: FnOnce(ValueAssertion<'a>),
    {
        let this = self.kind(ValueKind::Object);
        let member = this.value.get(key).unwrap_or_else(|| {
            panic!(
                "{}: no member {:?} in {}",
                this.path, key, this.value
            )
        });
        assertion(ValueAssertion {
            value: member,
            path: format!("{}.{}", this.path, key),
        });
        this
    }

    pub fn no_member(self, key: &str) -> Self {
        let this = self.kind(ValueKind::Object);
        assert!(
            this.value.get(key).is_none(),
            "{}: unexpected member {:?}",
            this.path,
            key
        );
        this
    }

    /// Assert the keys of an object, in order
    pub fn keys(self, expected: &[&str]) -> Self {
        let this = self.kind(ValueKind::Object);
        let actual: Vec<&str> = this
            .value
            .as_object()
            .map(|members| members.keys().map(String::as_str).collect())
            .unwrap_or_default();
        assert_eq!(actual, expected, "{}: wrong keys", this.path);
        this
    }

    /// Assert the nesting depth of arrays and objects, counting this value as 1 if it is
    /// a container
    pub fn depth(self, expected: usize) -> Self {
        let actual = depth_of(self.value);
        assert_eq!(
            actual, expected,
            "{}: expected depth {}, found {}",
            self.path, expected, actual
        );
        self
    }
}

fn depth_of(value: &Value) -> usize {
    match value {
        Value::Array(elements) => 1 + elements.iter().map(depth_of).max().unwrap_or(0),
        Value::Object(members) => 1 + members.values().map(depth_of).max().unwrap_or(0),
        _ => 0,
    }
}

/// Short description of a value for failure messages
fn summarize(value: &Value) -> String {
    let text = value.to_string();
    if text.chars().count() > 40 {
        let head: String = text.chars().take(40).collect();
        format!("{} {}...", value.kind(), head)
    } else {
        format!("{} {}", value.kind(), text)
    }
}
