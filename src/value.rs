//! Typed values held in a configuration store

use crate::config::SettingKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A coerced setting value.
///
/// Every value written through the typed setter is one of these four kinds,
/// so readers match on the variant instead of guessing at runtime.
///
/// Serialized untagged, so a store round-trips through JSON as plain
/// `"kvm"`, `12`, `true` or `["a", "b"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    String(String),
    Slice(Vec<String>),
}

impl SettingValue {
    /// Kind of this value
    #[must_use]
    pub fn kind(&self) -> SettingKind {
        match self {
            SettingValue::String(_) => SettingKind::String,
            SettingValue::Int(_) => SettingKind::Int,
            SettingValue::Bool(_) => SettingKind::Bool,
            SettingValue::Slice(_) => SettingKind::Slice,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            SettingValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_slice(&self) -> Option<&[String]> {
        match self {
            SettingValue::Slice(items) => Some(items),
            _ => None,
        }
    }

    /// Convert a JSON value into a setting value.
    ///
    /// Returns `None` for nulls, objects, floats, integers outside `i64`, and
    /// arrays that contain anything other than strings.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(SettingValue::Bool(*b)),
            Value::Number(n) => n.as_i64().map(SettingValue::Int),
            Value::String(s) => Some(SettingValue::String(s.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(String::from))
                .collect::<Option<Vec<_>>>()
                .map(SettingValue::Slice),
            Value::Null | Value::Object(_) => None,
        }
    }
}

/// Renders the value the way it would be typed on a command line, so the
/// output fed back into the matching setter yields the same value.
impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::String(s) => f.write_str(s),
            SettingValue::Int(n) => write!(f, "{n}"),
            SettingValue::Bool(b) => write!(f, "{b}"),
            SettingValue::Slice(items) => f.write_str(&items.join(",")),
        }
    }
}

impl From<SettingValue> for Value {
    fn from(value: SettingValue) -> Self {
        match value {
            SettingValue::String(s) => Value::String(s),
            SettingValue::Int(n) => Value::from(n),
            SettingValue::Bool(b) => Value::Bool(b),
            SettingValue::Slice(items) => {
                Value::Array(items.into_iter().map(Value::String).collect())
            }
        }
    }
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        SettingValue::String(s.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(s: String) -> Self {
        SettingValue::String(s)
    }
}

impl From<i64> for SettingValue {
    fn from(n: i64) -> Self {
        SettingValue::Int(n)
    }
}

impl From<bool> for SettingValue {
    fn from(b: bool) -> Self {
        SettingValue::Bool(b)
    }
}

impl From<Vec<String>> for SettingValue {
    fn from(items: Vec<String>) -> Self {
        SettingValue::Slice(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accessors_match_variant() {
        let value = SettingValue::Int(12);
        assert_eq!(value.as_int(), Some(12));
        assert_eq!(value.as_str(), None);
        assert_eq!(value.as_bool(), None);
        assert_eq!(value.kind(), SettingKind::Int);

        let value = SettingValue::from(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(value.as_slice(), Some(&["a".to_string(), "b".to_string()][..]));
        assert_eq!(value.kind(), SettingKind::Slice);
    }

    #[test]
    fn test_display_is_command_line_form() {
        assert_eq!(SettingValue::from("kvm").to_string(), "kvm");
        assert_eq!(SettingValue::Int(-4).to_string(), "-4");
        assert_eq!(SettingValue::Bool(true).to_string(), "true");
        assert_eq!(
            SettingValue::Slice(vec!["172.0.0.1/16".into(), "registry:5000".into()]).to_string(),
            "172.0.0.1/16,registry:5000"
        );
    }

    #[test]
    fn test_from_json() {
        assert_eq!(
            SettingValue::from_json(&json!("kvm")),
            Some(SettingValue::from("kvm"))
        );
        assert_eq!(SettingValue::from_json(&json!(12)), Some(SettingValue::Int(12)));
        assert_eq!(SettingValue::from_json(&json!(false)), Some(SettingValue::Bool(false)));
        assert_eq!(
            SettingValue::from_json(&json!(["a", "b"])),
            Some(SettingValue::Slice(vec!["a".into(), "b".into()]))
        );

        assert_eq!(SettingValue::from_json(&json!(1.5)), None);
        assert_eq!(SettingValue::from_json(&json!(null)), None);
        assert_eq!(SettingValue::from_json(&json!(["a", 1])), None);
        assert_eq!(SettingValue::from_json(&json!({"a": 1})), None);
    }

    #[test]
    fn test_serialization_is_untagged() {
        let json = serde_json::to_value(SettingValue::Int(22)).unwrap();
        assert_eq!(json, json!(22));

        let back: SettingValue = serde_json::from_value(json!(["x", "y"])).unwrap();
        assert_eq!(back, SettingValue::Slice(vec!["x".into(), "y".into()]));

        let back: SettingValue = serde_json::from_value(json!(true)).unwrap();
        assert_eq!(back, SettingValue::Bool(true));
    }
}
