//! Command registry: the validated descriptor list plus its verb tree.
//!
//! Built once at startup and read-only afterwards. A registry either builds
//! completely or not at all.
//!
//! Vibecrafted with AI Agents by VetCoders (c)2026 VetCoders

use tracing::debug;

use crate::descriptor::{CommandBuilder, CommandDescriptor, fold_path};
use crate::error::RegistryError;
use crate::tree::{CommandId, NodeId, PrefixMatch, VerbTree};

#[derive(Debug, Clone)]
pub struct Registry {
    commands: Vec<CommandDescriptor>,
    tree: VerbTree,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Build from descriptors that were already constructed (and therefore
    /// already passed per-descriptor validation).
    pub fn register<I>(descriptors: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = CommandDescriptor>,
    {
        Self::assemble(descriptors.into_iter().collect(), Vec::new())
    }

    fn assemble(
        mut commands: Vec<CommandDescriptor>,
        namespace_help: Vec<(Vec<String>, String)>,
    ) -> Result<Self, RegistryError> {
        commands.sort_by_cached_key(|c| fold_path(c.verb_path()));

        let mut tree = VerbTree::build(&commands)?;
        for (path, help) in namespace_help {
            tree.set_help(&path, help)?;
        }

        debug!(
            commands = commands.len(),
            nodes = tree.len(),
            "command registry built"
        );
        Ok(Self { commands, tree })
    }

    /// Every descriptor, hidden ones included, ordered by verb path.
    pub fn commands(&self) -> &[CommandDescriptor] {
        &self.commands
    }

    pub fn visible_commands(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.commands.iter().filter(|c| !c.is_hidden())
    }

    pub fn tree(&self) -> &VerbTree {
        &self.tree
    }

    /// # Panics
    ///
    /// When `id` comes from another registry. Use
    /// [`get_command`](Self::get_command) for ids of unknown origin.
    pub fn command(&self, id: CommandId) -> &CommandDescriptor {
        &self.commands[id.index()]
    }

    pub fn get_command(&self, id: CommandId) -> Option<&CommandDescriptor> {
        self.commands.get(id.index())
    }

    pub fn find_exact<S: AsRef<str>>(&self, verbs: &[S]) -> Option<&CommandDescriptor> {
        self.tree.find_exact(verbs).map(|id| self.command(id))
    }

    pub fn find_deepest_prefix<S: AsRef<str>>(&self, verbs: &[S]) -> Option<PrefixMatch> {
        self.tree.find_deepest_prefix(verbs)
    }

    /// Command attached to a node, if any.
    pub fn node_command(&self, node: NodeId) -> Option<&CommandDescriptor> {
        self.tree.node(node).command().map(|id| self.command(id))
    }

    /// Help line for a node: namespace text, or its command's help.
    pub fn node_help(&self, node: NodeId) -> Option<&str> {
        match self.node_command(node) {
            Some(cmd) if !cmd.help().is_empty() => Some(cmd.help()),
            Some(_) => None,
            None => self.tree.node(node).help(),
        }
    }
}

/// Collects commands and namespace help, then validates everything in
/// [`build`](Self::build): descriptors first, verb paths second.
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    pending: Vec<CommandBuilder>,
    namespace_help: Vec<(Vec<String>, String)>,
}

impl RegistryBuilder {
    pub fn command(mut self, command: CommandBuilder) -> Self {
        self.pending.push(command);
        self
    }

    /// Help text for a namespace node such as `table`.
    pub fn namespace<I, S>(mut self, path: I, help: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.namespace_help
            .push((path.into_iter().map(Into::into).collect(), help.into()));
        self
    }

    pub fn build(self) -> Result<Registry, RegistryError> {
        let commands = self
            .pending
            .into_iter()
            .map(CommandBuilder::build)
            .collect::<Result<Vec<_>, _>>()?;
        Registry::assemble(commands, self.namespace_help)
    }
}
