//! Argument values for template placeholders.
//!
//! [`Value`] is the closed set of shapes a placeholder can receive. Most Rust
//! scalars and collections convert into it via `From`, so argument lists are
//! usually written with the [`args!`](crate::args) macro:
//!
//! ```ignore
//! use sqltpl::{args, build_query, skip};
//!
//! let sql = build_query(
//!     "SELECT ?# FROM users WHERE user_id = ?d{ AND block = ?d}",
//!     &args![vec!["name", "email"], 2, skip()],
//! )?;
//! ```

use std::collections::BTreeMap;

/// A positional argument consumed by a placeholder.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// SQL `NULL`.
    #[default]
    Null,
    /// Rendered as `0` / `1`.
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Rendered as an escaped string literal (or identifier for `?#`).
    Text(String),
    /// Ordered list, used by `?a` (literals) and `?#` (identifiers).
    Sequence(Vec<Value>),
    /// Ordered `key = value` pairs, used by `?a`.
    Mapping(Vec<(String, Value)>),
    /// Sentinel requesting omission of the conditional block it governs.
    Skip,
}

impl Value {
    /// Build a [`Value::Mapping`] from ordered key/value pairs.
    pub fn mapping<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Mapping(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a [`Value::Sequence`] from any iterator of convertible items.
    pub fn sequence<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// Check if this is the skip sentinel.
    pub fn is_skip(&self) -> bool {
        matches!(self, Value::Skip)
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
            Value::Skip => "skip sentinel",
        }
    }
}

/// Return the skip sentinel.
///
/// Pass it as the argument of a conditional block's marker to drop the whole
/// block from the rendered SQL.
pub fn skip() -> Value {
    Value::Skip
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::sequence(v)
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(v: [T; N]) -> Self {
        Value::sequence(v)
    }
}

impl<K: Into<String>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(v: BTreeMap<K, V>) -> Self {
        Value::mapping(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                // u64 above i64::MAX and non-integral numbers
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => Value::sequence(items),
            serde_json::Value::Object(map) => Value::mapping(map),
        }
    }
}

/// Build a `Vec<Value>` argument list, converting each element with
/// [`Value::from`].
///
/// ```ignore
/// let args = sqltpl::args!["Jack", 42, None::<i64>, sqltpl::skip()];
/// assert_eq!(args.len(), 4);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($value)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn option_maps_none_to_null() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some(3)), Value::Int(3));
    }

    #[test]
    fn json_object_keeps_key_order() {
        let v = Value::from(json!({"name": "Jack", "email": null, "age": 30}));
        assert_eq!(
            v,
            Value::Mapping(vec![
                ("name".to_string(), Value::Text("Jack".to_string())),
                ("email".to_string(), Value::Null),
                ("age".to_string(), Value::Int(30)),
            ])
        );
    }

    #[test]
    fn json_numbers_pick_int_or_float() {
        assert_eq!(Value::from(json!(2)), Value::Int(2));
        assert_eq!(Value::from(json!(2.5)), Value::Float(2.5));
        assert_eq!(
            Value::from(json!(u64::MAX)),
            Value::Float(u64::MAX as f64)
        );
    }

    #[test]
    fn args_macro_converts_each_element() {
        let args = crate::args!["Jack", 2, true, skip(), vec![1, 2]];
        assert_eq!(
            args,
            vec![
                Value::Text("Jack".to_string()),
                Value::Int(2),
                Value::Bool(true),
                Value::Skip,
                Value::Sequence(vec![Value::Int(1), Value::Int(2)]),
            ]
        );
        assert!(crate::args![].is_empty());
    }

    #[test]
    fn skip_is_a_plain_value() {
        let v = skip();
        assert!(v.is_skip());
        assert_eq!(v.kind(), "skip sentinel");
    }
}
