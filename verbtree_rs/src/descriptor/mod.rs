//! Command and option descriptors: immutable metadata handed to the registry.
//!
//! - `value`: declared option types and bound values
//! - `option`: `OptionDescriptor`
//! - `command`: `CommandDescriptor` and its validating `CommandBuilder`
//!
//! Vibecrafted with AI Agents by VetCoders (c)2026 VetCoders

mod command;
mod option;
mod value;

pub use command::{CommandBuilder, CommandDescriptor};
pub(crate) use command::{fold_path, help_flag_clash};
pub use option::OptionDescriptor;
pub use value::{EnumType, Value, ValueType};
