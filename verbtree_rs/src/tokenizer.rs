//! Argument tokenizer: splits raw argv into leading verbs and an option map.
//!
//! Verbs are the maximal leading run of tokens that do not look like options.
//! After the first option every remaining token is an option key or the value
//! of the key right before it.
//!
//! Vibecrafted with AI Agents by VetCoders (c)2026 VetCoders

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::DispatchConfig;
use crate::error::TokenizeError;

/// Tokenizer output for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunArgs {
    verbs: Vec<String>,
    options: BTreeMap<String, String>,
}

impl RunArgs {
    pub fn verbs(&self) -> &[String] {
        &self.verbs
    }

    /// Raw option key (`--name`, `-n`) to value; flags map to `""`.
    pub fn options(&self) -> &BTreeMap<String, String> {
        &self.options
    }

    pub fn has_option(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }
}

/// Classifies tokens; the configured help flags always count as options so
/// that `/?` is not mistaken for a verb.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    extra_option_tokens: Vec<String>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(&DispatchConfig::default())
    }
}

impl Tokenizer {
    pub fn new(config: &DispatchConfig) -> Self {
        Self {
            extra_option_tokens: config
                .help_flags
                .iter()
                .filter(|f| !f.starts_with('-'))
                .cloned()
                .collect(),
        }
    }

    /// True when `token` is an option key rather than a verb or a value.
    pub fn looks_like_option(&self, token: &str) -> bool {
        if self.extra_option_tokens.iter().any(|t| t == token) {
            return true;
        }
        token.starts_with('-') && !is_number(token)
    }

    pub fn tokenize<S: AsRef<str>>(&self, args: &[S]) -> Result<RunArgs, TokenizeError> {
        match self.tokenize_partial(args) {
            (run, None) => Ok(run),
            (_, Some(err)) => Err(err),
        }
    }

    /// Like [`tokenize`](Self::tokenize) but also returns whatever was parsed
    /// before the first failure.
    pub fn tokenize_partial<S: AsRef<str>>(
        &self,
        args: &[S],
    ) -> (RunArgs, Option<TokenizeError>) {
        let mut run = RunArgs::default();
        let mut i = 0;

        while i < args.len() {
            let token = args[i].as_ref();

            if !self.looks_like_option(token) {
                if run.options.is_empty() {
                    run.verbs.push(token.to_string());
                    i += 1;
                    continue;
                }
                let err = TokenizeError::UnexpectedToken {
                    token: token.to_string(),
                    position: i,
                };
                return (run, Some(err));
            }

            let (key, value) = match split_inline_value(token) {
                Some((key, value)) => {
                    i += 1;
                    (key, value.to_string())
                }
                None => match args.get(i + 1).map(|next| next.as_ref()) {
                    Some(next) if !self.looks_like_option(next) => {
                        i += 2;
                        (token, next.to_string())
                    }
                    _ => {
                        i += 1;
                        (token, String::new())
                    }
                },
            };

            if run.options.contains_key(key) {
                let err = TokenizeError::RepeatedOption {
                    option: key.to_string(),
                };
                return (run, Some(err));
            }
            run.options.insert(key.to_string(), value);
        }

        (run, None)
    }
}

/// Tokenize with the default configuration.
pub fn tokenize<S: AsRef<str>>(args: &[S]) -> Result<RunArgs, TokenizeError> {
    Tokenizer::default().tokenize(args)
}

/// `--name=value` carries its value inline.
fn split_inline_value(token: &str) -> Option<(&str, &str)> {
    if !token.starts_with("--") {
        return None;
    }
    token.split_once('=').filter(|(key, _)| key.len() > 2)
}

fn is_number(token: &str) -> bool {
    token.parse::<f64>().is_ok_and(f64::is_finite)
}
