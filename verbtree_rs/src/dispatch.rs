//! Dispatcher: tokenizer -> registry lookup -> binder, or a help result.
//!
//! One invocation ends in exactly one of:
//! - a bound command,
//! - generic, namespace or command help,
//! - a bind error.
//!
//! Tokenizer failures are folded into generic help and never escape.
//!
//! Vibecrafted with AI Agents by VetCoders (c)2026 VetCoders

use serde::Serialize;
use tracing::trace;

use crate::binder::{Binder, BoundCommand};
use crate::config::DispatchConfig;
use crate::descriptor::{CommandDescriptor, help_flag_clash};
use crate::error::{DispatchError, RegistryError};
use crate::registry::Registry;
use crate::suggest;
use crate::tokenizer::{RunArgs, Tokenizer};
use crate::tree::NodeId;

/// Maximum number of verb suggestions attached to a help result.
const MAX_SUGGESTIONS: usize = 3;

/// Terminal result of one dispatch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Dispatch<'r> {
    Command(BoundCommand<'r>),
    GenericHelp(GenericHelp<'r>),
    NamespaceHelp(NamespaceHelp),
    CommandHelp(CommandHelp<'r>),
}

impl<'r> Dispatch<'r> {
    pub fn is_help(&self) -> bool {
        !matches!(self, Dispatch::Command(_))
    }

    pub fn command(&self) -> Option<&BoundCommand<'r>> {
        match self {
            Dispatch::Command(cmd) => Some(cmd),
            _ => None,
        }
    }

    /// True when help is shown because the invocation itself was wrong.
    pub fn is_invalid(&self) -> bool {
        match self {
            Dispatch::GenericHelp(help) => help.invalid.is_some(),
            Dispatch::NamespaceHelp(help) => !help.unknown.is_empty(),
            Dispatch::CommandHelp(help) => !help.unknown.is_empty(),
            Dispatch::Command(_) => false,
        }
    }
}

/// One listed child or top-level entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelpEntry {
    /// Full verb path, space separated.
    pub path: String,
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    /// Runnable command (as opposed to a namespace).
    pub runnable: bool,
}

/// Why generic help was shown instead of the requested command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum InvalidInvocation {
    UnknownCommand { verbs: Vec<String> },
    MalformedArguments { message: String, parsed: RunArgs },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenericHelp<'r> {
    /// Every registered descriptor, hidden ones included.
    #[serde(skip)]
    pub commands: &'r [CommandDescriptor],
    /// Visible top-level nodes.
    pub entries: Vec<HelpEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid: Option<InvalidInvocation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamespaceHelp {
    #[serde(skip)]
    pub node: NodeId,
    pub path: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    /// Visible children.
    pub entries: Vec<HelpEntry>,
    /// Verbs after the namespace that matched nothing.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unknown: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandHelp<'r> {
    pub command: &'r CommandDescriptor,
    /// Extra verbs typed after a complete command path.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unknown: Vec<String>,
}

/// Stateless across calls; holds only the read-only registry and config.
#[derive(Debug, Clone)]
pub struct Dispatcher<'r> {
    registry: &'r Registry,
    config: DispatchConfig,
    tokenizer: Tokenizer,
    binder: Binder,
}

impl<'r> Dispatcher<'r> {
    /// Descriptors never declare the default help flags, so this cannot fail.
    pub fn new(registry: &'r Registry) -> Self {
        Self::assemble(registry, DispatchConfig::default())
    }

    /// Fails when a registered option is spelled like one of the configured
    /// help flags, since such an option could never be bound.
    pub fn with_config(
        registry: &'r Registry,
        config: DispatchConfig,
    ) -> Result<Self, RegistryError> {
        for command in registry.commands() {
            for opt in command.options() {
                if let Some(flag) = help_flag_clash(opt, &config.help_flags) {
                    return Err(RegistryError::InvalidDescriptor {
                        command: command.name(),
                        reason: format!("option '{flag}' is configured as a help flag"),
                    });
                }
            }
        }
        Ok(Self::assemble(registry, config))
    }

    fn assemble(registry: &'r Registry, config: DispatchConfig) -> Self {
        Self {
            registry,
            tokenizer: Tokenizer::new(&config),
            binder: Binder::new(config.suggestion_distance),
            config,
        }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn dispatch<S: AsRef<str>>(&self, args: &[S]) -> Result<Dispatch<'r>, DispatchError> {
        let (run, failure) = self.tokenizer.tokenize_partial(args);
        if let Some(err) = failure {
            trace!(error = %err, "tokenize failed, falling back to generic help");
            return Ok(Dispatch::GenericHelp(self.generic_help(Some(
                InvalidInvocation::MalformedArguments {
                    message: err.to_string(),
                    parsed: run,
                },
            ))));
        }
        trace!(verbs = ?run.verbs(), options = run.options().len(), "tokenized arguments");

        let all_verbs = run.verbs();
        let flagged = run
            .options()
            .keys()
            .any(|key| self.config.is_help_flag(key));

        let (verbs, help_requested) = match all_verbs {
            [] => return Ok(Dispatch::GenericHelp(self.generic_help(None))),
            [only] if self.config.is_help_verb(only) => {
                return Ok(Dispatch::GenericHelp(self.generic_help(None)));
            }
            // `help table create` reads as `table create --help`
            [first, rest @ ..]
                if self.config.is_help_verb(first)
                    && self.registry.find_deepest_prefix(&all_verbs[..1]).is_none() =>
            {
                (rest, true)
            }
            _ => (all_verbs, flagged),
        };

        let Some(descriptor) = self.registry.find_exact(verbs) else {
            trace!(?verbs, "no exact match, trying deepest prefix");
            return Ok(self.prefix_help(verbs));
        };

        if help_requested {
            trace!(command = %descriptor.name(), "help requested");
            return Ok(Dispatch::CommandHelp(CommandHelp {
                command: descriptor,
                unknown: Vec::new(),
            }));
        }

        self.binder
            .bind(descriptor, run.options())
            .map(Dispatch::Command)
            .map_err(|source| DispatchError::Bind {
                command: descriptor.name(),
                source,
            })
    }

    fn prefix_help(&self, verbs: &[String]) -> Dispatch<'r> {
        let Some(found) = self.registry.find_deepest_prefix(verbs) else {
            let suggestions = match verbs.first() {
                Some(first) => self.suggest_under(None, first),
                None => Vec::new(),
            };
            let mut help = self.generic_help(Some(InvalidInvocation::UnknownCommand {
                verbs: verbs.to_vec(),
            }));
            help.suggestions = suggestions;
            return Dispatch::GenericHelp(help);
        };

        let unknown = verbs[found.consumed..].to_vec();
        if let Some(command) = self.registry.node_command(found.node) {
            return Dispatch::CommandHelp(CommandHelp { command, unknown });
        }

        let suggestions = match unknown.first() {
            Some(next) => self.suggest_under(Some(found.node), next),
            None => Vec::new(),
        };
        let tree = self.registry.tree();
        Dispatch::NamespaceHelp(NamespaceHelp {
            node: found.node,
            path: tree.path(found.node).into_iter().map(String::from).collect(),
            help: tree.node(found.node).help().map(String::from),
            entries: self.entries(tree.node(found.node).children()),
            unknown,
            suggestions,
        })
    }

    fn generic_help(&self, invalid: Option<InvalidInvocation>) -> GenericHelp<'r> {
        GenericHelp {
            commands: self.registry.commands(),
            entries: self.entries(self.registry.tree().roots()),
            invalid,
            suggestions: Vec::new(),
        }
    }

    fn entries(&self, nodes: impl Iterator<Item = NodeId>) -> Vec<HelpEntry> {
        let tree = self.registry.tree();
        nodes
            .filter(|id| !tree.node(*id).is_hidden())
            .map(|id| HelpEntry {
                path: tree.path(id).join(" "),
                token: tree.node(id).token().to_string(),
                help: self.registry.node_help(id).map(String::from),
                runnable: tree.node(id).command().is_some(),
            })
            .collect()
    }

    /// Visible siblings close to `verb`, as full paths.
    fn suggest_under(&self, parent: Option<NodeId>, verb: &str) -> Vec<String> {
        let tree = self.registry.tree();
        let siblings: Vec<NodeId> = match parent {
            None => tree.roots().collect(),
            Some(id) => tree.node(id).children().collect(),
        };
        let visible: Vec<NodeId> = siblings
            .into_iter()
            .filter(|id| !tree.node(*id).is_hidden())
            .collect();
        suggest::ranked(
            verb,
            visible.iter().map(|id| tree.node(*id).token()),
            self.config.suggestion_distance,
            MAX_SUGGESTIONS,
        )
        .into_iter()
        .map(|token| {
            let mut path: Vec<&str> = parent.map(|p| tree.path(p)).unwrap_or_default();
            path.push(token);
            path.join(" ")
        })
        .collect()
    }
}
