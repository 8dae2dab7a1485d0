//! The JSON document model.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

/// JSON object: unique string keys, iterated (and serialized) in key order.
pub type Object = BTreeMap<String, Value>;

/// JSON array.
pub type Array = Vec<Value>;

static NULL: Value = Value::Null;

/// A JSON document. Exactly one variant is active per instance.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Object(Object),
    Array(Array),
}

/// Discriminant of a [`Value`], used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Object,
    Array,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Object => "object",
            ValueKind::Array => "array",
        };
        f.write_str(name)
    }
}

/// A typed accessor was used on the wrong variant.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("JSON value is not {expected_article} {expected} (found {found})", expected_article = article(.expected))]
pub struct TypeMismatch {
    pub expected: ValueKind,
    pub found: ValueKind,
}

fn article(kind: &ValueKind) -> &'static str {
    match kind {
        ValueKind::Object | ValueKind::Array => "an",
        _ => "a",
    }
}

impl Value {
    /// Build an object from key/value pairs. Later duplicates are ignored.
    pub fn object<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut map = Object::new();
        for (key, value) in entries {
            map.entry(key.into()).or_insert(value);
        }
        Value::Object(map)
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Object(_) => ValueKind::Object,
            Value::Array(_) => ValueKind::Array,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn as_bool(&self) -> Result<bool, TypeMismatch> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(other.mismatch(ValueKind::Bool)),
        }
    }

    pub fn as_number(&self) -> Result<f64, TypeMismatch> {
        match self {
            Value::Number(n) => Ok(*n),
            other => Err(other.mismatch(ValueKind::Number)),
        }
    }

    pub fn as_str(&self) -> Result<&str, TypeMismatch> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(other.mismatch(ValueKind::String)),
        }
    }

    pub fn as_object(&self) -> Result<&Object, TypeMismatch> {
        match self {
            Value::Object(map) => Ok(map),
            other => Err(other.mismatch(ValueKind::Object)),
        }
    }

    pub fn as_object_mut(&mut self) -> Result<&mut Object, TypeMismatch> {
        match self {
            Value::Object(map) => Ok(map),
            other => Err(other.mismatch(ValueKind::Object)),
        }
    }

    pub fn as_array(&self) -> Result<&Array, TypeMismatch> {
        match self {
            Value::Array(items) => Ok(items),
            other => Err(other.mismatch(ValueKind::Array)),
        }
    }

    pub fn as_array_mut(&mut self) -> Result<&mut Array, TypeMismatch> {
        match self {
            Value::Array(items) => Ok(items),
            other => Err(other.mismatch(ValueKind::Array)),
        }
    }

    /// Member lookup. `None` for missing keys and for non-objects.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Take ownership of the value, leaving `Null` behind.
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }

    fn mismatch(&self, expected: ValueKind) -> TypeMismatch {
        TypeMismatch {
            expected,
            found: self.kind(),
        }
    }
}

impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.get(key).unwrap_or(&NULL)
    }
}

impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        match self {
            Value::Array(items) => items.get(index).unwrap_or(&NULL),
            _ => &NULL,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

from_integer!(i32, i64, u32, u64, usize);

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

impl From<Object> for Value {
    fn from(map: Object) -> Self {
        Value::Object(map)
    }
}

impl From<Array> for Value {
    fn from(items: Array) -> Self {
        Value::Array(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        matches!(self, Value::String(s) if s == other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        matches!(self, Value::Bool(b) if b == other)
    }
}

macro_rules! eq_number {
    ($($ty:ty),*) => {
        $(
            impl PartialEq<$ty> for Value {
                fn eq(&self, other: &$ty) -> bool {
                    matches!(self, Value::Number(n) if *n == *other as f64)
                }
            }
        )*
    };
}

eq_number!(i32, i64, u32, u64, f64);

/// Build a [`Value::Object`] from `key => value` pairs.
///
/// ```
/// use sandtimer::object;
///
/// let doc = object! { "cmd" => "reset", "label" => "tea" };
/// assert_eq!(doc["cmd"], "reset");
/// ```
#[macro_export]
macro_rules! object {
    () => {
        $crate::json::Value::Object($crate::json::Object::new())
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::json::Value::object([
            $((::std::string::String::from($key), $crate::json::Value::from($value))),+
        ])
    };
}

/// Build a [`Value::Array`] from values.
#[macro_export]
macro_rules! array {
    () => {
        $crate::json::Value::Array(::std::vec::Vec::new())
    };
    ($($value:expr),+ $(,)?) => {
        $crate::json::Value::Array(::std::vec![$($crate::json::Value::from($value)),+])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_match_variant() {
        let doc = object! {
            "flag" => true,
            "count" => 3,
            "name" => "tea",
            "items" => array![1, 2],
        };

        assert_eq!(doc["flag"].as_bool(), Ok(true));
        assert_eq!(doc["count"].as_number(), Ok(3.0));
        assert_eq!(doc["name"].as_str(), Ok("tea"));
        assert_eq!(doc["items"].as_array().map(Vec::len), Ok(2));
        assert_eq!(doc.as_object().map(|m| m.len()), Ok(4));
    }

    #[test]
    fn test_wrong_variant_is_type_mismatch() {
        let value = Value::from("text");
        let err = value.as_number().unwrap_err();
        assert_eq!(err.expected, ValueKind::Number);
        assert_eq!(err.found, ValueKind::String);
        assert_eq!(err.to_string(), "JSON value is not a number (found string)");

        let err = Value::Null.as_object().unwrap_err();
        assert_eq!(err.to_string(), "JSON value is not an object (found null)");
    }

    #[test]
    fn test_index_missing_is_null() {
        let doc = object! { "a" => 1 };
        assert!(doc["missing"].is_null());
        assert!(doc["a"]["nested"].is_null());
        assert!(Value::from(5)[0].is_null());
        assert_eq!(array!["x", "y"][1], "y");
    }

    #[test]
    fn test_object_keeps_first_duplicate() {
        let doc = Value::object([("k", Value::from(1)), ("k", Value::from(2))]);
        assert_eq!(doc["k"], 1);
    }

    #[test]
    fn test_option_conversion() {
        assert!(Value::from(None::<String>).is_null());
        assert_eq!(Value::from(Some("x")), "x");
    }

    #[test]
    fn test_take_leaves_null() {
        let mut doc = object! { "a" => array![true] };
        let taken = doc.take();
        assert!(doc.is_null());
        assert_eq!(taken["a"][0], true);
    }
}
