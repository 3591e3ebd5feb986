//! Declared option types and the typed values the binder produces.

use std::fmt;

use serde::Serialize;

/// Declared type of an option. Nullability lives on the option descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueType {
    String,
    Bool,
    Integer,
    Decimal,
    Enum(EnumType),
}

/// A closed set of named members, matched case-insensitively by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumType {
    name: String,
    members: Vec<String>,
}

impl EnumType {
    pub fn new<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Canonical member whose name matches `raw`, ignoring case.
    pub fn member(&self, raw: &str) -> Option<&str> {
        let folded = raw.to_lowercase();
        self.members
            .iter()
            .find(|m| m.to_lowercase() == folded)
            .map(String::as_str)
    }
}

impl ValueType {
    /// Name used in help output and type errors.
    pub fn name(&self) -> &str {
        match self {
            ValueType::String => "string",
            ValueType::Bool => "bool",
            ValueType::Integer => "integer",
            ValueType::Decimal => "decimal",
            ValueType::Enum(e) => e.name(),
        }
    }

    /// Value an unset, non-nullable option takes when it has no default.
    pub fn zero(&self) -> Value {
        match self {
            ValueType::String => Value::Null,
            ValueType::Bool => Value::Bool(false),
            ValueType::Integer => Value::Integer(0),
            ValueType::Decimal => Value::Decimal(0.0),
            ValueType::Enum(e) => e
                .members()
                .first()
                .map(|m| Value::Enum(m.clone()))
                .unwrap_or(Value::Null),
        }
    }

    /// Parse a non-empty raw string. `None` means the string does not convert.
    pub fn parse(&self, raw: &str) -> Option<Value> {
        match self {
            ValueType::String => Some(Value::String(raw.to_string())),
            ValueType::Bool => parse_bool(raw).map(Value::Bool),
            ValueType::Integer => raw.trim().parse::<i64>().ok().map(Value::Integer),
            ValueType::Decimal => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Value::Decimal),
            ValueType::Enum(e) => e.member(raw.trim()).map(|m| Value::Enum(m.to_string())),
        }
    }

    /// True when `value` is something an option of this type can hold.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => true,
            (ValueType::String, Value::String(_)) => true,
            (ValueType::Bool, Value::Bool(_)) => true,
            (ValueType::Integer, Value::Integer(_)) => true,
            (ValueType::Decimal, Value::Decimal(_)) => true,
            (ValueType::Enum(e), Value::Enum(m)) => e.members().iter().any(|x| x == m),
            _ => false,
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// A bound option value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    String(String),
    Bool(bool),
    Integer(i64),
    Decimal(f64),
    Enum(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::String(_) => "string",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Decimal(_) => "decimal",
            Value::Enum(_) => "enum",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::String(s) | Value::Enum(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Decimal(d) => write!(f, "{d}"),
        }
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

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Decimal(d)
    }
}
