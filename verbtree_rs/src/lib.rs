//! # verbtree
//!
//! **Multi-word command dispatcher** - turns raw process arguments into either
//! a bound, typed command or structured help.
//!
//! ```text
//! argv ──► Tokenizer ──► verbs + options
//!                            │
//!                            ▼
//!                  Registry (verb tree) ──► exact match? ──► Binder ──► BoundCommand
//!                            │                                 │
//!                            └── deepest prefix / nothing ──► Help  ◄── --help / -h / /?
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use verbtree::{CommandDescriptor, Dispatch, Dispatcher, OptionDescriptor, Registry};
//!
//! let registry = Registry::builder()
//!     .command(
//!         CommandDescriptor::builder(["table", "create"])
//!             .help("Create a table")
//!             .option(OptionDescriptor::string("name").short("n").required()),
//!     )
//!     .build()
//!     .expect("registry");
//!
//! let dispatcher = Dispatcher::new(&registry);
//! match dispatcher.dispatch(&["table", "create", "--name", "Foo"]) {
//!     Ok(Dispatch::Command(cmd)) => assert_eq!(cmd.value::<String>("name").unwrap(), "Foo"),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```
//!
//! Registries are built once and shared read-only; the dispatcher keeps no
//! state between calls and never prints. Diagnostics go through `tracing`.
//!
//! Vibecrafted with AI Agents by VetCoders (c)2026 VetCoders

// ============================================================================
// Core Modules
// ============================================================================

/// Command and option descriptors, declared types and bound values.
pub mod descriptor;

/// Argument tokenizer (verbs + option map).
pub mod tokenizer;

/// Verb tree: exact and deepest-prefix lookup over all verb paths.
pub mod tree;

/// Validated registry of commands.
pub mod registry;

/// Option binding and typed extraction.
pub mod binder;

/// Dispatcher state machine and its result types.
pub mod dispatch;

// ============================================================================
// Support Modules
// ============================================================================

/// Plain-text help formatting.
pub mod help;

/// Dispatcher configuration (help flags, help verb, suggestion distance).
pub mod config;

/// Error taxonomy.
pub mod error;

/// Terminal color utilities for hosts.
pub mod colors;

mod suggest;

// ============================================================================
// Re-exports
// ============================================================================

pub use binder::{Binder, BoundCommand, FromBound, FromValue, bind};
pub use config::DispatchConfig;
pub use descriptor::{
    CommandBuilder, CommandDescriptor, EnumType, OptionDescriptor, Value, ValueType,
};
pub use dispatch::{
    CommandHelp, Dispatch, Dispatcher, GenericHelp, HelpEntry, InvalidInvocation, NamespaceHelp,
};
pub use error::{
    BindError, ConfigError, DispatchError, ExtractError, RegistryError, TokenizeError,
};
pub use registry::{Registry, RegistryBuilder};
pub use tokenizer::{RunArgs, Tokenizer, tokenize};
pub use tree::{CommandId, NodeId, PrefixMatch, VerbNode, VerbTree};

/// Case folding used for every verb comparison: Unicode default lowercase,
/// independent of the host locale.
pub(crate) fn fold(token: &str) -> String {
    token.to_lowercase()
}
