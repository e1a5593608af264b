use derive_more::From;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value as JsonValue};
use std::collections::BTreeMap;

///
/// Value
///
/// An input value supplied through a filter: operator operands and
/// computed column arguments. Bound as query parameters, never inlined.
///
/// Null → explicitly supplied null; distinct from an absent key.
/// Numeric → a number neither `i64` nor `f64` holds exactly, kept as the
/// text it was supplied in.
///

#[derive(Clone, Debug, From, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    #[from(skip)]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    #[from(skip)]
    Numeric(String),
    Text(String),
    List(Vec<Self>),
    Object(BTreeMap<String, Self>),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        JsonValue::deserialize(deserializer).map(Self::from)
    }
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(b) => Self::Bool(b),
            JsonValue::Number(n) => Self::from(n),
            JsonValue::String(text) => Self::Text(text),
            JsonValue::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            JsonValue::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        if let Some(int) = n.as_i64() {
            return Self::Int(int);
        }

        let text = n.to_string();
        match n.as_f64() {
            Some(float) if float.is_finite() && float.to_string() == text => Self::Float(float),
            _ => Self::Numeric(text),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

///
/// FilterValue
///
/// The input object supplied for one filter field: operator keys at the
/// top level plus an optional `args` object carrying the extra arguments
/// of a computed column.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct FilterValue {
    #[serde(rename = "args", default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<BTreeMap<String, Value>>,

    #[serde(flatten)]
    pub operators: BTreeMap<String, Value>,
}

impl FilterValue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_operator(mut self, operator: impl Into<String>, value: impl Into<Value>) -> Self {
        self.operators.insert(operator.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_argument(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Look up a supplied argument; `None` means the key is absent.
    #[must_use]
    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments.as_ref().and_then(|args| args.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_args_from_operators() {
        let value: FilterValue =
            serde_json::from_str(r#"{"args": {"b": 2, "a": "x"}, "equalTo": 5, "isNull": false}"#)
                .unwrap();

        assert_eq!(value.argument("a"), Some(&Value::Text("x".to_string())));
        assert_eq!(value.argument("b"), Some(&Value::Int(2)));
        assert_eq!(value.operators.len(), 2);
        assert_eq!(value.operators["equalTo"], Value::Int(5));
        assert_eq!(value.operators["isNull"], Value::Bool(false));
    }

    #[test]
    fn explicit_null_argument_is_present() {
        let value: FilterValue =
            serde_json::from_str(r#"{"args": {"a": null}, "equalTo": 1}"#).unwrap();

        assert_eq!(value.argument("a"), Some(&Value::Null));
        assert_eq!(value.argument("b"), None);
    }

    #[test]
    fn no_args_object_means_no_arguments() {
        let value: FilterValue = serde_json::from_str(r#"{"in": [1, 2.5, "z"]}"#).unwrap();

        assert!(value.arguments.is_none());
        assert_eq!(
            value.operators["in"],
            Value::List(vec![
                Value::Int(1),
                Value::Float(2.5),
                Value::Text("z".to_string())
            ])
        );
    }

    #[test]
    fn numbers_beyond_i64_and_f64_keep_their_text() {
        let value: FilterValue = serde_json::from_str(
            r#"{"equalTo": 18446744073709551615, "in": [0.1000000000000000000001, -7, 1.25]}"#,
        )
        .unwrap();

        assert_eq!(
            value.operators["equalTo"],
            Value::Numeric("18446744073709551615".to_string())
        );
        assert_eq!(
            value.operators["in"],
            Value::List(vec![
                Value::Numeric("0.1000000000000000000001".to_string()),
                Value::Int(-7),
                Value::Float(1.25),
            ])
        );
    }

    #[test]
    fn numeric_arguments_survive_the_args_object() {
        let value: FilterValue =
            serde_json::from_str(r#"{"args": {"limit": 123456789012345678901234567890}}"#)
                .unwrap();

        assert_eq!(
            value.argument("limit"),
            Some(&Value::Numeric("123456789012345678901234567890".to_string()))
        );
    }
}
