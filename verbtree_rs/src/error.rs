//! Error taxonomy for registry build, tokenizing, binding and dispatch.
//!
//! Registry errors are fatal at startup. Everything else is per-invocation
//! and is either folded into a help result (tokenizing) or handed back to
//! the caller (binding).
//!
//! Vibecrafted with AI Agents by VetCoders (c)2026 VetCoders

use std::path::PathBuf;

use thiserror::Error;

/// Build-time failures. A registry that hits one of these is never served.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("command '{command}' declares option '{option}' more than once")]
    DuplicateOption { command: String, option: String },

    #[error("verb path '{path}' is claimed by both '{first}' and '{second}'")]
    DuplicateCommand {
        path: String,
        first: String,
        second: String,
    },

    #[error(
        "verb path '{path}' is a command and also a prefix of '{nested}'; a command cannot double as a namespace"
    )]
    PathConflict { path: String, nested: String },

    #[error("invalid descriptor '{command}': {reason}")]
    InvalidDescriptor { command: String, reason: String },

    #[error(
        "default for option '--{option}' on '{command}' does not match its declared type '{expected}'"
    )]
    DefaultTypeMismatch {
        command: String,
        option: String,
        expected: String,
    },

    #[error("help text registered for '{path}', which is not a namespace")]
    UnknownNamespace { path: String },
}

/// A raw argument that cannot be classified as a verb or an option/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    #[error("unexpected argument '{token}' at position {position}; verbs must come before options")]
    UnexpectedToken { token: String, position: usize },

    #[error("option '{option}' was supplied more than once")]
    RepeatedOption { option: String },
}

/// Failures while turning raw option strings into typed values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("required argument '--{option}' was not provided")]
    RequiredArgumentNotProvided { option: String },

    #[error("invalid value '{value}' for '--{option}': expected {expected}")]
    InvalidArgumentType {
        option: String,
        value: String,
        expected: String,
    },

    #[error("unrecognized option '{option}'{}", suggestion_hint(.suggestion))]
    UnrecognizedOption {
        option: String,
        suggestion: Option<String>,
    },
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|s| format!(" (did you mean '{s}'?)"))
        .unwrap_or_default()
}

impl BindError {
    /// Long name (without dashes) or raw key of the option the error is about.
    pub fn option(&self) -> &str {
        match self {
            BindError::RequiredArgumentNotProvided { option }
            | BindError::InvalidArgumentType { option, .. }
            | BindError::UnrecognizedOption { option, .. } => option,
        }
    }
}

/// The only error a dispatch call hands back; tokenizer failures become help.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("{command}: {source}")]
    Bind {
        command: String,
        #[source]
        source: BindError,
    },
}

impl DispatchError {
    pub fn bind_error(&self) -> &BindError {
        match self {
            DispatchError::Bind { source, .. } => source,
        }
    }
}

/// Extraction of a typed field from a bound command failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("command has no option named '--{0}'")]
    MissingField(String),

    #[error("option '--{option}' holds {actual}, not {expected}")]
    TypeMismatch {
        option: String,
        expected: &'static str,
        actual: String,
    },
}

/// Configuration file could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
