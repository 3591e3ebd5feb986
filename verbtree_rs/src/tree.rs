//! Verb tree: a trie of verb tokens built from every command's primary path
//! and aliases.
//!
//! Nodes live in an arena and point at their parent by id. Children are keyed
//! by the case-folded token; the node keeps the spelling it was first
//! registered with for display.
//!
//! Vibecrafted with AI Agents by VetCoders (c)2026 VetCoders

use std::collections::BTreeMap;

use serde::Serialize;

use crate::descriptor::{CommandDescriptor, fold_path};
use crate::error::RegistryError;
use crate::fold;

/// Index of a node inside its [`VerbTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(usize);

/// Index of a command inside the registry's descriptor list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CommandId(pub(crate) usize);

impl CommandId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct VerbNode {
    token: String,
    parent: Option<NodeId>,
    children: BTreeMap<String, NodeId>,
    command: Option<CommandId>,
    hidden: bool,
    help: Option<String>,
}

impl VerbNode {
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children ordered by folded token.
    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.values().copied()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn command(&self) -> Option<CommandId> {
        self.command
    }

    /// Hidden when its command is hidden, or when it is a namespace whose
    /// children are all hidden.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Help text supplied for a namespace node.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }
}

/// Deepest node reached by walking a verb list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixMatch {
    pub node: NodeId,
    /// Number of verbs consumed to reach `node`.
    pub consumed: usize,
}

#[derive(Debug, Clone, Default)]
pub struct VerbTree {
    nodes: Vec<VerbNode>,
    roots: BTreeMap<String, NodeId>,
}

/// One path to attach: (folded path, original path, command, owner name).
struct Attachment<'a> {
    folded: Vec<String>,
    path: &'a [String],
    command: CommandId,
    owner: String,
}

impl VerbTree {
    /// Build the tree from descriptors indexed by position.
    ///
    /// Paths are attached in lexicographic order of their folded form, so the
    /// same collision is reported no matter how the descriptors were ordered.
    pub fn build(descriptors: &[CommandDescriptor]) -> Result<Self, RegistryError> {
        let mut attachments: Vec<Attachment<'_>> = descriptors
            .iter()
            .enumerate()
            .flat_map(|(idx, desc)| {
                desc.all_paths().map(move |path| Attachment {
                    folded: fold_path(path),
                    path,
                    command: CommandId(idx),
                    owner: desc.name(),
                })
            })
            .collect();
        attachments.sort_by(|a, b| a.folded.cmp(&b.folded).then_with(|| a.owner.cmp(&b.owner)));

        let mut tree = VerbTree::default();
        for attachment in &attachments {
            let node = tree.insert_path(attachment.path);
            match tree.nodes[node.0].command {
                Some(existing) if existing != attachment.command => {
                    return Err(RegistryError::DuplicateCommand {
                        path: attachment.path.join(" "),
                        first: descriptors[existing.0].name(),
                        second: attachment.owner.clone(),
                    });
                }
                _ => tree.nodes[node.0].command = Some(attachment.command),
            }
        }

        tree.check_leaf_namespaces()?;
        tree.derive_hidden(descriptors);
        Ok(tree)
    }

    fn insert_path(&mut self, path: &[String]) -> NodeId {
        let mut parent: Option<NodeId> = None;
        for token in path {
            let key = fold(token);
            let existing = match parent {
                None => self.roots.get(&key).copied(),
                Some(p) => self.nodes[p.0].children.get(&key).copied(),
            };
            let id = match existing {
                Some(id) => id,
                None => {
                    let id = NodeId(self.nodes.len());
                    self.nodes.push(VerbNode {
                        token: token.clone(),
                        parent,
                        children: BTreeMap::new(),
                        command: None,
                        hidden: false,
                        help: None,
                    });
                    match parent {
                        None => self.roots.insert(key, id),
                        Some(p) => self.nodes[p.0].children.insert(key, id),
                    };
                    id
                }
            };
            parent = Some(id);
        }
        // Verb paths are validated non-empty before they reach the tree.
        parent.unwrap_or(NodeId(0))
    }

    /// A node cannot both run a command and group further commands.
    fn check_leaf_namespaces(&self) -> Result<(), RegistryError> {
        let mut stack: Vec<NodeId> = self.roots.values().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            if node.command.is_some()
                && let Some(first_child) = node.children().next()
            {
                let nested = self.first_command_below(first_child);
                return Err(RegistryError::PathConflict {
                    path: self.path(id).join(" "),
                    nested: self.path(nested).join(" "),
                });
            }
            stack.extend(node.children.values().rev().copied());
        }
        Ok(())
    }

    fn first_command_below(&self, mut id: NodeId) -> NodeId {
        loop {
            let node = &self.nodes[id.0];
            match node.children().next() {
                Some(child) if node.command.is_none() => id = child,
                _ => return id,
            }
        }
    }

    /// Children are always pushed after their parent, so a reverse sweep sees
    /// every child before the node itself.
    fn derive_hidden(&mut self, descriptors: &[CommandDescriptor]) {
        for idx in (0..self.nodes.len()).rev() {
            let hidden = match self.nodes[idx].command {
                Some(cmd) => descriptors[cmd.0].is_hidden(),
                None => {
                    let node = &self.nodes[idx];
                    node.has_children() && node.children().all(|c| self.nodes[c.0].hidden)
                }
            };
            self.nodes[idx].hidden = hidden;
        }
    }

    pub(crate) fn set_help(&mut self, path: &[String], help: String) -> Result<(), RegistryError> {
        let unknown = || RegistryError::UnknownNamespace {
            path: path.join(" "),
        };
        let found = self
            .walk(path)
            .filter(|m| m.consumed == path.len())
            .ok_or_else(&unknown)?;
        let node = &mut self.nodes[found.node.0];
        if node.command.is_some() {
            return Err(unknown());
        }
        node.help = Some(help);
        Ok(())
    }

    fn walk<S: AsRef<str>>(&self, verbs: &[S]) -> Option<PrefixMatch> {
        let mut current: Option<NodeId> = None;
        let mut consumed = 0;
        for verb in verbs {
            let key = fold(verb.as_ref());
            let next = match current {
                None => self.roots.get(&key),
                Some(id) => self.nodes[id.0].children.get(&key),
            };
            match next {
                Some(&id) => {
                    current = Some(id);
                    consumed += 1;
                }
                None => break,
            }
        }
        current.map(|node| PrefixMatch { node, consumed })
    }

    /// Command at the node reached by consuming every verb, if that node has one.
    pub fn find_exact<S: AsRef<str>>(&self, verbs: &[S]) -> Option<CommandId> {
        self.walk(verbs)
            .filter(|m| m.consumed == verbs.len())
            .and_then(|m| self.nodes[m.node.0].command)
    }

    /// Last node reached while walking `verbs`, command or not.
    pub fn find_deepest_prefix<S: AsRef<str>>(&self, verbs: &[S]) -> Option<PrefixMatch> {
        self.walk(verbs)
    }

    /// # Panics
    ///
    /// When `id` was not produced by this tree. Use [`get_node`](Self::get_node)
    /// for ids of unknown origin.
    pub fn node(&self, id: NodeId) -> &VerbNode {
        &self.nodes[id.0]
    }

    pub fn get_node(&self, id: NodeId) -> Option<&VerbNode> {
        self.nodes.get(id.0)
    }

    /// Top-level nodes ordered by folded token.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.roots.values().copied()
    }

    /// Tokens from the root down to `id`.
    pub fn path(&self, id: NodeId) -> Vec<&str> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = &self.nodes[node_id.0];
            path.push(node.token.as_str());
            current = node.parent;
        }
        path.reverse();
        path
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
