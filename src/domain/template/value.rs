// Values bound to template variables

use std::collections::HashMap;

use crate::error::{ClientError, Result};

/// A variable binding: a scalar, an ordered list or a key-ordered map
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(String),
    List(Vec<String>),
    Map(Vec<(String, String)>),
}

impl Value {
    /// Empty lists and maps count as undefined during expansion
    pub fn is_empty_composite(&self) -> bool {
        match self {
            Value::Scalar(_) => false,
            Value::List(items) => items.is_empty(),
            Value::Map(entries) => entries.is_empty(),
        }
    }

    /// Build a map value, keeping the given key order
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Value::Map(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Convert a decoded JSON value, rejecting null and nested composites
    pub fn from_json(name: &str, value: &serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| json_scalar(name, item))
                .collect::<Result<Vec<_>>>()
                .map(Value::List),
            serde_json::Value::Object(entries) => entries
                .iter()
                .map(|(key, item)| Ok((key.clone(), json_scalar(name, item)?)))
                .collect::<Result<Vec<_>>>()
                .map(Value::Map),
            scalar => json_scalar(name, scalar).map(Value::Scalar),
        }
    }
}

fn json_scalar(name: &str, value: &serde_json::Value) -> Result<String> {
    match value {
        serde_json::Value::String(s) => Ok(s.clone()),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        _ => Err(ClientError::InvalidValueType(format!(
            "{} should have a primitive type, a list or a map as its value",
            name
        ))),
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = ClientError;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        Value::from_json("value", &value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Scalar(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Scalar(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Scalar(value.clone())
    }
}

macro_rules! scalar_from_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Scalar(value.to_string())
                }
            }
        )*
    };
}

scalar_from_display!(i32, i64, u32, u64, usize, f64, bool);

impl<T: Into<String>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

/// Name → value bindings for one template expansion.
///
/// A name is bound at most once: later writes to a bound name are ignored.
#[derive(Debug, Clone, Default)]
pub struct ValueStore {
    values: HashMap<String, Value>,
}

impl ValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` unless it is already bound. Returns whether the value was stored.
    pub fn set(&mut self, name: &str, value: Value) -> bool {
        if self.values.contains_key(name) {
            return false;
        }
        self.values.insert(name.to_string(), value);
        true
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_write_wins() {
        let mut store = ValueStore::new();
        assert!(store.set("tag", "culture".into()));
        assert!(!store.set("tag", "rock".into()));
        assert_eq!(store.get("tag"), Some(&Value::Scalar("culture".to_string())));
    }

    #[test]
    fn test_from_typed_values() {
        assert_eq!(Value::from(10), Value::Scalar("10".to_string()));
        assert_eq!(Value::from(vec!["a", "b"]), Value::List(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(
            Value::map([("semi", ";")]),
            Value::Map(vec![("semi".to_string(), ";".to_string())])
        );
    }

    #[test]
    fn test_from_json_shapes() {
        assert_eq!(Value::from_json("x", &json!("hi")).unwrap(), Value::Scalar("hi".to_string()));
        assert_eq!(Value::from_json("x", &json!(0)).unwrap(), Value::Scalar("0".to_string()));
        assert_eq!(
            Value::from_json("x", &json!(["Museum", "Garden"])).unwrap(),
            Value::List(vec!["Museum".to_string(), "Garden".to_string()])
        );
        assert_eq!(
            Value::from_json("x", &json!({"semi": ";", "dot": "."})).unwrap(),
            Value::Map(vec![
                ("semi".to_string(), ";".to_string()),
                ("dot".to_string(), ".".to_string())
            ])
        );
    }

    #[test]
    fn test_from_json_rejects_unsupported_shapes() {
        for bad in [json!(null), json!([["nested"]]), json!({"k": {"deep": 1}}), json!([null])] {
            let err = Value::from_json("limit", &bad).unwrap_err();
            assert!(matches!(err, ClientError::InvalidValueType(ref msg) if msg.starts_with("limit")));
        }
    }
}
