//! ParamKind - the type tag used for signature identity and matching.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::value::Value;

/// Represents the type of a contract method parameter or return value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum ParamKind {
    /// Accepts a value of any kind
    #[default]
    Any,

    /// Boolean value
    Boolean,

    /// 64-bit signed integer
    Integer,

    /// 64-bit float
    Float,

    /// UTF-8 string
    String,

    /// Raw byte array
    ByteArray,

    /// Heterogeneous array of values
    Array,

    /// Host object of the named type
    Object(String),

    /// Only valid as a return kind: the method has no return value
    Void,
}

impl ParamKind {
    /// Creates an object kind for the given type name.
    pub fn object<S: Into<String>>(type_name: S) -> Self {
        ParamKind::Object(type_name.into())
    }

    /// Returns the canonical name of this kind. Object kinds are all
    /// `"Object"`; their type name is in the variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::Any => "Any",
            ParamKind::Boolean => "Boolean",
            ParamKind::Integer => "Integer",
            ParamKind::Float => "Float",
            ParamKind::String => "String",
            ParamKind::ByteArray => "ByteArray",
            ParamKind::Array => "Array",
            ParamKind::Object(_) => "Object",
            ParamKind::Void => "Void",
        }
    }

    /// Whether a runtime value may be passed where this kind is declared.
    ///
    /// `Any` accepts everything and object kinds accept `Null`; every other
    /// kind requires the value's own kind to be identical.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (ParamKind::Any, _) => true,
            (ParamKind::Object(_), Value::Null) => true,
            (kind, value) => *kind == value.kind(),
        }
    }

    /// Parse from string (case-insensitive for the built-in kinds).
    ///
    /// `Object(Name)` is an object kind for `Name`, even when `Name` spells a
    /// built-in kind. Any other name that is not a built-in kind is taken as
    /// an object type name too.
    pub fn from_string(s: &str) -> Result<Self, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("empty parameter kind".to_string());
        }
        if let Some(inner) = trimmed
            .strip_prefix("Object(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let name = inner.trim();
            if name.is_empty() {
                return Err("empty object type name".to_string());
            }
            return Ok(ParamKind::Object(name.to_string()));
        }
        Ok(match trimmed.to_lowercase().as_str() {
            "any" => ParamKind::Any,
            "boolean" | "bool" => ParamKind::Boolean,
            "integer" | "int" => ParamKind::Integer,
            "float" | "double" => ParamKind::Float,
            "string" | "str" => ParamKind::String,
            "bytearray" | "bytes" => ParamKind::ByteArray,
            "array" => ParamKind::Array,
            "void" => ParamKind::Void,
            _ => ParamKind::Object(trimmed.to_string()),
        })
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::Object(name) => write!(f, "Object({name})"),
            other => f.write_str(other.as_str()),
        }
    }
}

impl FromStr for ParamKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}
