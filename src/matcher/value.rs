//! Typed capture values.

use crate::error::{GrokError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type of a capture, from the third part of `%{SYNTAX:ID:TYPE}`.
///
/// Unrecognized tokens are kept as [`TypeHint::Unsupported`] and only fail
/// when a typed extraction reaches a capture that carries them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeHint {
    /// `string`
    Text,
    /// `int` or `long`
    Int,
    /// `double` or `float`
    Float,
    /// `bool` or `boolean`
    Bool,
    Unsupported(String),
}

impl TypeHint {
    /// Map a type token to a hint. Tokens are case-sensitive.
    ///
    /// ```rust
    /// use grok_engine::TypeHint;
    ///
    /// assert_eq!(TypeHint::parse("long"), TypeHint::Int);
    /// assert_eq!(TypeHint::parse("boolean"), TypeHint::Bool);
    /// assert_eq!(TypeHint::parse("INT"), TypeHint::Unsupported("INT".to_string()));
    /// ```
    pub fn parse(token: &str) -> Self {
        match token {
            "string" => TypeHint::Text,
            "int" | "long" => TypeHint::Int,
            "double" | "float" => TypeHint::Float,
            "bool" | "boolean" => TypeHint::Bool,
            other => TypeHint::Unsupported(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TypeHint::Text => "string",
            TypeHint::Int => "int",
            TypeHint::Float => "float",
            TypeHint::Bool => "bool",
            TypeHint::Unsupported(token) => token.as_str(),
        }
    }

    /// Convert the raw text of `field` according to this hint.
    pub fn convert(&self, field: &str, raw: &str) -> Result<FieldValue> {
        let conversion = |reason: String| GrokError::Conversion {
            field: field.to_string(),
            hint: self.as_str().to_string(),
            value: raw.to_string(),
            reason,
        };

        match self {
            TypeHint::Text => Ok(FieldValue::Text(raw.to_string())),
            TypeHint::Int => raw
                .parse::<i64>()
                .map(FieldValue::Int)
                .map_err(|e| conversion(e.to_string())),
            TypeHint::Float => raw
                .parse::<f64>()
                .map(FieldValue::Float)
                .map_err(|e| conversion(e.to_string())),
            TypeHint::Bool => raw
                .parse::<bool>()
                .map(FieldValue::Bool)
                .map_err(|e| conversion(e.to_string())),
            TypeHint::Unsupported(token) => Err(GrokError::TypeNotProvided {
                field: field.to_string(),
                hint: token.clone(),
            }),
        }
    }
}

impl fmt::Display for TypeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A captured value after typed conversion.
///
/// Serializes to the bare JSON value (`42`, `1.5`, `true`, `"text"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Float value; integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(*f),
            FieldValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Bool(_) => "bool",
            FieldValue::Int(_) => "int",
            FieldValue::Float(_) => "float",
            FieldValue::Text(_) => "string",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Int(i) => write!(f, "{i}"),
            FieldValue::Float(x) => write!(f, "{x}"),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_tokens() {
        assert_eq!(TypeHint::parse("string"), TypeHint::Text);
        assert_eq!(TypeHint::parse("int"), TypeHint::Int);
        assert_eq!(TypeHint::parse("long"), TypeHint::Int);
        assert_eq!(TypeHint::parse("double"), TypeHint::Float);
        assert_eq!(TypeHint::parse("float"), TypeHint::Float);
        assert_eq!(TypeHint::parse("bool"), TypeHint::Bool);
        assert_eq!(TypeHint::parse("boolean"), TypeHint::Bool);
        assert_eq!(
            TypeHint::parse("Integer"),
            TypeHint::Unsupported("Integer".to_string())
        );
    }

    #[test]
    fn test_convert_int() {
        assert_eq!(TypeHint::Int.convert("n", "42").unwrap(), FieldValue::Int(42));
        assert_eq!(TypeHint::Int.convert("n", "-7").unwrap(), FieldValue::Int(-7));

        let err = TypeHint::Int.convert("n", "4.2").unwrap_err();
        match err {
            GrokError::Conversion { field, hint, value, .. } => {
                assert_eq!(field, "n");
                assert_eq!(hint, "int");
                assert_eq!(value, "4.2");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_convert_float() {
        assert_eq!(
            TypeHint::Float.convert("ratio", "0.25").unwrap(),
            FieldValue::Float(0.25)
        );
        assert!(TypeHint::Float.convert("ratio", "quarter").is_err());
    }

    #[test]
    fn test_convert_bool_is_canonical() {
        assert_eq!(TypeHint::Bool.convert("b", "true").unwrap(), FieldValue::Bool(true));
        assert_eq!(TypeHint::Bool.convert("b", "false").unwrap(), FieldValue::Bool(false));
        assert!(TypeHint::Bool.convert("b", "yes").is_err());
        assert!(TypeHint::Bool.convert("b", "TRUE").is_err());
    }

    #[test]
    fn test_convert_unsupported() {
        let err = TypeHint::parse("date").convert("ts", "2024").unwrap_err();
        assert_eq!(
            err,
            GrokError::TypeNotProvided {
                field: "ts".to_string(),
                hint: "date".to_string(),
            }
        );
    }

    #[test]
    fn test_field_value_accessors() {
        assert_eq!(FieldValue::from("x").as_str(), Some("x"));
        assert_eq!(FieldValue::from(3i64).as_i64(), Some(3));
        assert_eq!(FieldValue::from(3i64).as_f64(), Some(3.0));
        assert_eq!(FieldValue::from(true).as_bool(), Some(true));
        assert_eq!(FieldValue::from(1.5).as_str(), None);
        assert_eq!(FieldValue::Int(1).type_name(), "int");
    }

    #[test]
    fn test_field_value_serializes_untagged() {
        let values = vec![
            FieldValue::Int(1234),
            FieldValue::Bool(true),
            FieldValue::Text("GET".to_string()),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[1234,true,"GET"]"#);

        let back: Vec<FieldValue> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, values);
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldValue::Float(2.5).to_string(), "2.5");
        assert_eq!(FieldValue::Text("a b".to_string()).to_string(), "a b");
        assert_eq!(TypeHint::Unsupported("date".to_string()).to_string(), "date");
    }
}
