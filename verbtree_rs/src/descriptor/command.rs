//! Command descriptor and its validating builder.

use std::collections::HashSet;

use serde::Serialize;

use super::option::OptionDescriptor;
use crate::config::DEFAULT_HELP_FLAGS;
use crate::error::RegistryError;
use crate::fold;

/// Static metadata for one command. Only obtainable through
/// [`CommandBuilder::build`], so every instance has passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandDescriptor {
    verb_path: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    aliases: Vec<Vec<String>>,
    help: String,
    hidden: bool,
    options: Vec<OptionDescriptor>,
}

impl CommandDescriptor {
    pub fn builder<I, S>(verb_path: I) -> CommandBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandBuilder::new(verb_path)
    }

    pub fn verb_path(&self) -> &[String] {
        &self.verb_path
    }

    /// Primary verb path joined with spaces, e.g. `table create`.
    pub fn name(&self) -> String {
        self.verb_path.join(" ")
    }

    pub fn aliases(&self) -> &[Vec<String>] {
        &self.aliases
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Options in declaration order.
    pub fn options(&self) -> &[OptionDescriptor] {
        &self.options
    }

    pub fn option(&self, long_name: &str) -> Option<&OptionDescriptor> {
        self.options.iter().find(|o| o.long_name() == long_name)
    }

    /// Primary path followed by every alias path.
    pub fn all_paths(&self) -> impl Iterator<Item = &[String]> {
        std::iter::once(self.verb_path.as_slice()).chain(self.aliases.iter().map(Vec::as_slice))
    }
}

/// Collects descriptor parts; [`build`](Self::build) enforces the invariants.
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    verb_path: Vec<String>,
    aliases: Vec<Vec<String>>,
    help: String,
    hidden: bool,
    options: Vec<OptionDescriptor>,
}

impl CommandBuilder {
    pub fn new<I, S>(verb_path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            verb_path: verb_path.into_iter().map(Into::into).collect(),
            aliases: Vec::new(),
            help: String::new(),
            hidden: false,
            options: Vec::new(),
        }
    }

    pub fn alias<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.push(path.into_iter().map(Into::into).collect());
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn option(mut self, option: OptionDescriptor) -> Self {
        self.options.push(option);
        self
    }

    pub fn build(self) -> Result<CommandDescriptor, RegistryError> {
        let command = self.verb_path.join(" ");
        let invalid = |reason: String| RegistryError::InvalidDescriptor {
            command: command.clone(),
            reason,
        };

        check_path(&self.verb_path).map_err(&invalid)?;
        let mut seen_paths = HashSet::new();
        seen_paths.insert(fold_path(&self.verb_path));
        for alias in &self.aliases {
            check_path(alias).map_err(|r| invalid(format!("alias: {r}")))?;
            if !seen_paths.insert(fold_path(alias)) {
                return Err(invalid(format!("alias '{}' is repeated", alias.join(" "))));
            }
        }

        let mut longs = HashSet::new();
        let mut shorts = HashSet::new();
        let mut options = Vec::with_capacity(self.options.len());
        for mut opt in self.options {
            check_option_name(opt.long_name()).map_err(&invalid)?;
            if !longs.insert(opt.long_name().to_string()) {
                return Err(RegistryError::DuplicateOption {
                    command: command.clone(),
                    option: opt.long_flag(),
                });
            }
            if let Some(short) = opt.short_name() {
                check_option_name(short).map_err(&invalid)?;
                if !shorts.insert(short.to_string()) {
                    return Err(RegistryError::DuplicateOption {
                        command: command.clone(),
                        option: format!("-{short}"),
                    });
                }
            }
            if let Some(flag) = help_flag_clash(&opt, DEFAULT_HELP_FLAGS) {
                return Err(invalid(format!("option '{flag}' is reserved for help")));
            }
            opt.canonicalize_default();
            if let Some(default) = opt.default()
                && !opt.value_type().accepts(default)
            {
                return Err(RegistryError::DefaultTypeMismatch {
                    command: command.clone(),
                    option: opt.long_name().to_string(),
                    expected: opt.value_type().name().to_string(),
                });
            }
            options.push(opt);
        }

        Ok(CommandDescriptor {
            verb_path: self.verb_path,
            aliases: self.aliases,
            help: self.help,
            hidden: self.hidden,
            options,
        })
    }
}

/// The raw form of `opt` that a help flag would shadow, if any.
pub(crate) fn help_flag_clash<S: AsRef<str>>(
    opt: &OptionDescriptor,
    help_flags: impl IntoIterator<Item = S>,
) -> Option<String> {
    let long = opt.long_flag();
    let short = opt.short_flag();
    help_flags.into_iter().find_map(|flag| {
        let flag: &str = flag.as_ref();
        (flag == long || short.as_deref() == Some(flag)).then(|| flag.to_string())
    })
}

pub(crate) fn fold_path(path: &[String]) -> Vec<String> {
    path.iter().map(|v| fold(v)).collect()
}

fn check_path(path: &[String]) -> Result<(), String> {
    if path.is_empty() {
        return Err("verb path is empty".into());
    }
    for verb in path {
        if verb.is_empty() {
            return Err("verb path contains an empty verb".into());
        }
        if verb.starts_with('-') || verb.chars().any(char::is_whitespace) {
            return Err(format!("'{verb}' is not a valid verb"));
        }
    }
    Ok(())
}

fn check_option_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("option name is empty".into());
    }
    if name.starts_with('-') || name.contains('=') || name.chars().any(char::is_whitespace) {
        return Err(format!(
            "option name '{name}' must be given without dashes, spaces or '='"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{EnumType, Value, ValueType};

    #[test]
    fn test_build_valid_descriptor() {
        let cmd = CommandDescriptor::builder(["table", "create"])
            .alias(["tc"])
            .help("Create a table")
            .option(OptionDescriptor::string("name").short("n").required())
            .option(OptionDescriptor::bool("audit"))
            .build()
            .unwrap();
        assert_eq!(cmd.name(), "table create");
        assert_eq!(cmd.all_paths().count(), 2);
        assert!(cmd.option("name").unwrap().is_required());
        assert!(cmd.option("missing").is_none());
    }

    #[test]
    fn test_duplicate_long_name_fails() {
        let err = CommandDescriptor::builder(["table", "create"])
            .option(OptionDescriptor::string("name"))
            .option(OptionDescriptor::integer("name"))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateOption {
                command: "table create".into(),
                option: "--name".into(),
            }
        );
    }

    #[test]
    fn test_duplicate_short_name_fails() {
        let err = CommandDescriptor::builder(["column", "create"])
            .option(OptionDescriptor::string("name").short("n"))
            .option(OptionDescriptor::string("namespace").short("n"))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::DuplicateOption { ref option, .. } if option == "-n"
        ));
    }

    #[test]
    fn test_default_type_mismatch_fails() {
        let err = CommandDescriptor::builder(["table", "create"])
            .option(OptionDescriptor::integer("size").default_value("big"))
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::DefaultTypeMismatch { .. }));
    }

    #[test]
    fn test_enum_default_must_be_a_member() {
        let stage = ValueType::Enum(EnumType::new("Stage", ["Pre", "Post"]));
        let ok = CommandDescriptor::builder(["step"])
            .option(
                OptionDescriptor::new("stage", stage.clone())
                    .default_value(Value::Enum("post".into())),
            )
            .build()
            .unwrap();
        assert_eq!(
            ok.option("stage").unwrap().default(),
            Some(&Value::Enum("Post".into()))
        );

        let err = CommandDescriptor::builder(["step"])
            .option(
                OptionDescriptor::new("stage", stage).default_value(Value::Enum("Never".into())),
            )
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::DefaultTypeMismatch { .. }));
    }

    #[test]
    fn test_invalid_paths_fail() {
        let empty: [&str; 0] = [];
        assert!(CommandDescriptor::builder(empty).build().is_err());
        assert!(CommandDescriptor::builder(["table", ""]).build().is_err());
        assert!(CommandDescriptor::builder(["--table"]).build().is_err());
        assert!(
            CommandDescriptor::builder(["table"])
                .alias(["TABLE"])
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_help_flags_are_reserved() {
        let short = CommandDescriptor::builder(["auth", "create"])
            .option(OptionDescriptor::string("host").short("h").required())
            .build()
            .unwrap_err();
        assert_eq!(
            short,
            RegistryError::InvalidDescriptor {
                command: "auth create".into(),
                reason: "option '-h' is reserved for help".into(),
            }
        );

        let long = CommandDescriptor::builder(["auth", "create"])
            .option(OptionDescriptor::bool("help"))
            .build()
            .unwrap_err();
        assert!(matches!(long, RegistryError::InvalidDescriptor { ref reason, .. } if reason.contains("'--help'")));

        // other short names starting with h are fine
        assert!(
            CommandDescriptor::builder(["auth", "create"])
                .option(OptionDescriptor::string("host").short("H"))
                .build()
                .is_ok()
        );
    }

    #[test]
    fn test_option_name_with_dashes_fails() {
        let err = CommandDescriptor::builder(["table"])
            .option(OptionDescriptor::string("--name"))
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidDescriptor { .. }));
    }
}
