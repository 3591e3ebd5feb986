//! Terminal color utilities for hosts rendering dispatch results.
//!
//! The dispatcher core never colors anything; hosts wrap rendered help
//! with a [`Painter`].
//!
//! Vibecrafted with AI Agents by VetCoders (c)2026 VetCoders

use std::io::IsTerminal;
use std::str::FromStr;

// ============================================================================
// ANSI Color Codes
// ============================================================================

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const RESET: &str = "\x1b[0m";

// ============================================================================
// Color State
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" | "yes" | "true" => Ok(ColorMode::Always),
            "never" | "no" | "false" => Ok(ColorMode::Never),
            _ => Err(format!(
                "Invalid color mode '{}'. Use: auto, always, or never.",
                value
            )),
        }
    }
}

/// Determines if colors should be used based on ColorMode and terminal detection.
pub fn is_enabled(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stdout().is_terminal(),
    }
}

/// Colorizer that can be passed around to format functions.
#[derive(Clone, Copy, Debug)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            enabled: is_enabled(mode),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Errors - RED
    pub fn error(&self, s: &str) -> String {
        self.wrap(s, RED)
    }

    /// Invalid invocation, suggestions - YELLOW
    pub fn warn(&self, s: &str) -> String {
        self.wrap(s, YELLOW)
    }

    /// Bound command - GREEN
    pub fn ok(&self, s: &str) -> String {
        self.wrap(s, GREEN)
    }

    /// Verbs and option names - CYAN
    pub fn verb(&self, s: &str) -> String {
        self.wrap(s, CYAN)
    }

    /// Section titles - BOLD
    pub fn header(&self, s: &str) -> String {
        self.wrap(s, BOLD)
    }

    /// Hints - DIM
    pub fn dim(&self, s: &str) -> String {
        self.wrap(s, DIM)
    }

    /// Color a rendered help block line by line: section titles bold,
    /// invalid-invocation lines yellow, hints dim.
    pub fn help_text(&self, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        let mut out = String::with_capacity(text.len());
        for line in text.split_inclusive('\n') {
            let body = line.trim_end_matches('\n');
            let painted = if !body.starts_with(' ') && body.ends_with(':') {
                self.header(body)
            } else if body.starts_with("Invalid ")
                || body.starts_with("Unknown command:")
                || body.starts_with("Unexpected arguments:")
                || body.starts_with("Did you mean:")
            {
                self.warn(body)
            } else if body.starts_with("Run '") {
                self.dim(body)
            } else {
                body.to_string()
            };
            out.push_str(&painted);
            if line.ends_with('\n') {
                out.push('\n');
            }
        }
        out
    }

    pub fn wrap(&self, s: &str, code: &str) -> String {
        if self.enabled {
            format!("{code}{s}{RESET}")
        } else {
            s.to_string()
        }
    }
}
