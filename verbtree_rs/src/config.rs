//! Dispatcher configuration.
//!
//! Loads optional TOML; every field falls back to its default.
//!
//! Vibecrafted with AI Agents by VetCoders (c)2026 VetCoders

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Help flags used when no configuration overrides them.
pub const DEFAULT_HELP_FLAGS: [&str; 3] = ["--help", "-h", "/?"];

/// Conventions the dispatcher applies on top of the registered commands.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Option keys that request help instead of running a command.
    pub help_flags: Vec<String>,
    /// Verb that on its own shows the generic help.
    pub help_verb: String,
    /// Maximum edit distance for "did you mean" suggestions; 0 disables them.
    pub suggestion_distance: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            help_flags: DEFAULT_HELP_FLAGS.iter().map(|f| f.to_string()).collect(),
            help_verb: "help".into(),
            suggestion_distance: 2,
        }
    }
}

impl DispatchConfig {
    /// Load config from a specific path. A missing file yields the defaults.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn is_help_flag(&self, token: &str) -> bool {
        self.help_flags.iter().any(|f| f == token)
    }

    pub(crate) fn is_help_verb(&self, verb: &str) -> bool {
        crate::fold(verb) == crate::fold(&self.help_verb)
    }
}
