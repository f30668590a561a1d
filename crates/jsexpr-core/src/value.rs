//! Literal value tree.
//!
//! Mirrors JavaScript literal types, keeps `null` and `undefined` apart, and
//! separates integers from floats so nothing is rounded on the way through.
//! Objects are `Vec<(String, Value)>` to keep insertion order without pulling
//! in a map type; keys stay unique through [`Value::insert`].

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;

/// A numeric literal.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    /// Arithmetic negation. `-0` becomes the float `-0.0`, and negating
    /// `i64::MIN` falls back to a float.
    pub fn negate(self) -> Number {
        match self {
            Number::Integer(0) => Number::Float(-0.0),
            Number::Integer(n) => n
                .checked_neg()
                .map(Number::Integer)
                .unwrap_or(Number::Float(-(n as f64))),
            Number::Float(f) => Number::Float(-f),
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Number::Integer(n) => n as f64,
            Number::Float(f) => f,
        }
    }
}

/// Integers and floats never compare equal to each other, even when they
/// denote the same mathematical value.
impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a == b,
            (Number::Float(a), Number::Float(b)) => a == b,
            _ => false,
        }
    }
}

/// Literal source form: floats always carry a `.` or an exponent so they
/// re-lex as floats.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Integer(n) => write!(f, "{n}"),
            Number::Float(x) if x.is_nan() => f.write_str("undefined"),
            Number::Float(x) if x.is_infinite() => {
                f.write_str(if x > 0.0 { "1e999" } else { "-1e999" })
            }
            Number::Float(x) => write!(f, "{x:?}"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Undefined,
    Boolean(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    /// Key-value pairs in insertion order.
    Object(Vec<(String, Value)>),
}

impl Value {
    /// Insert into an object, last write wins. A repeated key keeps the slot
    /// of its first insertion. No-op on non-objects.
    pub fn insert(&mut self, key: String, value: Value) {
        if let Value::Object(entries) = self {
            insert_entry(entries, key, value);
        }
    }

    /// Look up an object property.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Index into an array.
    pub fn at(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Array(items) => items.get(index),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Maximum container nesting: 0 for primitives, 1 for `[]`.
    pub fn depth(&self) -> usize {
        match self {
            Value::Array(items) => 1 + items.iter().map(Value::depth).max().unwrap_or(0),
            Value::Object(entries) => {
                1 + entries.iter().map(|(_, v)| v.depth()).max().unwrap_or(0)
            }
            _ => 0,
        }
    }

    /// Convert to JSON. `undefined` and non-finite floats become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null | Value::Undefined => serde_json::Value::Null,
            Value::Boolean(b) => serde_json::Value::Bool(*b),
            Value::Number(Number::Integer(n)) => serde_json::Value::Number((*n).into()),
            Value::Number(Number::Float(f)) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Object(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

pub(crate) fn insert_entry(entries: &mut Vec<(String, Value)>, key: String, value: Value) {
    match entries.iter_mut().find(|(k, _)| *k == key) {
        Some(slot) => slot.1 = value,
        None => entries.push((key, value)),
    }
}

/// Structural equality. Arrays compare in order; objects compare as key sets,
/// so insertion order does not matter.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) | (Value::Undefined, Value::Undefined) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(key, value)| {
                        b.iter()
                            .find(|(k, _)| k == key)
                            .is_some_and(|(_, v)| v == value)
                    })
            }
            _ => false,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null | Value::Undefined => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Number(Number::Integer(n)) => serializer.serialize_i64(*n),
            Value::Number(Number::Float(f)) if f.is_finite() => serializer.serialize_f64(*f),
            Value::Number(Number::Float(_)) => serializer.serialize_unit(),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Number::Integer(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Number(Number::Float(f))
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_last_write_wins_in_first_slot() {
        let mut obj = Value::Object(Vec::new());
        obj.insert("a".into(), 1i64.into());
        obj.insert("b".into(), 2i64.into());
        obj.insert("a".into(), 3i64.into());
        match &obj {
            Value::Object(entries) => {
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[0], ("a".to_string(), Value::from(3i64)));
            }
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn object_equality_ignores_order() {
        let a = Value::Object(vec![("x".into(), 1i64.into()), ("y".into(), 2i64.into())]);
        let b = Value::Object(vec![("y".into(), 2i64.into()), ("x".into(), 1i64.into())]);
        assert_eq!(a, b);
    }

    #[test]
    fn integer_and_float_are_distinct() {
        assert_ne!(Value::from(1i64), Value::from(1.0));
        assert_ne!(Value::Null, Value::Undefined);
    }

    #[test]
    fn negation() {
        assert_eq!(Number::Integer(5).negate(), Number::Integer(-5));
        assert!(matches!(Number::Integer(0).negate(), Number::Float(f) if f.is_sign_negative()));
        assert_eq!(Number::Float(2.5).negate(), Number::Float(-2.5));
    }

    #[test]
    fn number_display_keeps_float_marker() {
        assert_eq!(Number::Float(3.0).to_string(), "3.0");
        assert_eq!(Number::Float(-0.0).to_string(), "-0.0");
        assert_eq!(Number::Float(f64::INFINITY).to_string(), "1e999");
        assert_eq!(Number::Integer(-7).to_string(), "-7");
    }

    #[test]
    fn json_conversion() {
        let value = Value::Array(vec![
            Value::Undefined,
            Value::Object(vec![("k".into(), 3.5.into())]),
        ]);
        assert_eq!(value.to_json(), serde_json::json!([null, {"k": 3.5}]));
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"[null,{"k":3.5}]"#
        );
    }

    #[test]
    fn depth() {
        let value = Value::Array(vec![Value::Array(vec![Value::Object(Vec::new())])]);
        assert_eq!(value.depth(), 3);
        assert_eq!(Value::Null.depth(), 0);
    }
}
