//! Option descriptor: static metadata for one command parameter.

use serde::Serialize;

use super::value::{Value, ValueType};

/// One declared parameter of a command.
///
/// Names are stored without dashes; `--{long}` and `-{short}` are the raw
/// forms the tokenizer produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionDescriptor {
    long_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    short_name: Option<String>,
    required: bool,
    nullable: bool,
    #[serde(rename = "type")]
    value_type: ValueType,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<Value>,
    help: String,
}

impl OptionDescriptor {
    pub fn new(long_name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            long_name: long_name.into(),
            short_name: None,
            required: false,
            nullable: false,
            value_type,
            default: None,
            help: String::new(),
        }
    }

    pub fn string(long_name: impl Into<String>) -> Self {
        Self::new(long_name, ValueType::String)
    }

    pub fn bool(long_name: impl Into<String>) -> Self {
        Self::new(long_name, ValueType::Bool)
    }

    pub fn integer(long_name: impl Into<String>) -> Self {
        Self::new(long_name, ValueType::Integer)
    }

    pub fn decimal(long_name: impl Into<String>) -> Self {
        Self::new(long_name, ValueType::Decimal)
    }

    pub fn short(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = Some(short_name.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Unset values bind to `Null` instead of the type's zero value.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Checked against the declared type when the command is built.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    pub fn long_name(&self) -> &str {
        &self.long_name
    }

    pub fn short_name(&self) -> Option<&str> {
        self.short_name.as_deref()
    }

    pub fn long_flag(&self) -> String {
        format!("--{}", self.long_name)
    }

    pub fn short_flag(&self) -> Option<String> {
        self.short_name.as_ref().map(|s| format!("-{s}"))
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn value_type(&self) -> &ValueType {
        &self.value_type
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn help_text(&self) -> &str {
        &self.help
    }

    /// Value bound when the option is omitted (or given empty) and not required.
    pub fn fallback(&self) -> Value {
        match &self.default {
            Some(v) => v.clone(),
            None if self.nullable => Value::Null,
            None => self.value_type.zero(),
        }
    }

    /// Rewrites an enum default to its canonical member spelling.
    pub(crate) fn canonicalize_default(&mut self) {
        if let (ValueType::Enum(e), Some(Value::Enum(raw))) = (&self.value_type, &self.default)
            && let Some(member) = e.member(raw)
        {
            self.default = Some(Value::Enum(member.to_string()));
        }
    }
}
