//! Plain-text help formatting for dispatch results.
//!
//! Formatting only; colors and output belong to the host.
//!
//! Vibecrafted with AI Agents by VetCoders (c)2026 VetCoders

use std::fmt::Write;

use crate::descriptor::{CommandDescriptor, OptionDescriptor, ValueType};
use crate::dispatch::{
    CommandHelp, Dispatch, GenericHelp, HelpEntry, InvalidInvocation, NamespaceHelp,
};
use crate::registry::Registry;

/// Help text for any help variant; `None` for a bound command.
pub fn render(dispatch: &Dispatch<'_>, program: &str) -> Option<String> {
    match dispatch {
        Dispatch::Command(_) => None,
        Dispatch::GenericHelp(help) => Some(render_generic(help, program)),
        Dispatch::NamespaceHelp(help) => Some(render_namespace(help, program)),
        Dispatch::CommandHelp(help) => Some(render_command(help, program)),
    }
}

pub fn render_generic(help: &GenericHelp<'_>, program: &str) -> String {
    let mut out = String::new();
    match &help.invalid {
        Some(InvalidInvocation::UnknownCommand { verbs }) => {
            let _ = writeln!(out, "Invalid command: {}", verbs.join(" "));
        }
        Some(InvalidInvocation::MalformedArguments { message, .. }) => {
            let _ = writeln!(out, "Invalid arguments: {message}");
        }
        None => {}
    }
    push_suggestions(&mut out, &help.suggestions);
    if help.invalid.is_some() {
        out.push('\n');
    }

    let _ = writeln!(out, "Usage: {program} <command> [options]\n");
    push_entries(&mut out, "Commands:", &help.entries);
    let _ = writeln!(
        out,
        "\nRun '{program} <command> --help' for more information on a command."
    );
    out
}

pub fn render_namespace(help: &NamespaceHelp, program: &str) -> String {
    let mut out = String::new();
    let path = help.path.join(" ");
    if !help.unknown.is_empty() {
        let _ = writeln!(out, "Unknown command: {path} {}", help.unknown.join(" "));
        push_suggestions(&mut out, &help.suggestions);
        out.push('\n');
    }
    if let Some(text) = &help.help {
        let _ = writeln!(out, "{text}\n");
    }

    let _ = writeln!(out, "Usage: {program} {path} <command> [options]\n");
    push_entries(&mut out, "Commands:", &help.entries);
    out
}

pub fn render_command(help: &CommandHelp<'_>, program: &str) -> String {
    let mut out = String::new();
    let cmd = help.command;
    if !help.unknown.is_empty() {
        let _ = writeln!(out, "Unexpected arguments: {}\n", help.unknown.join(" "));
    }
    if !cmd.help().is_empty() {
        let _ = writeln!(out, "{}\n", cmd.help());
    }

    let _ = writeln!(out, "Usage: {program} {} [options]", cmd.name());
    if !cmd.aliases().is_empty() {
        out.push_str("\nAliases:\n");
        for alias in cmd.aliases() {
            let _ = writeln!(out, "  {program} {}", alias.join(" "));
        }
    }
    push_options(&mut out, cmd);
    out
}

/// Whole verb tree, one node per line, hidden nodes included.
///
/// ```text
/// table
///   create  [command]
/// debug  [hidden]
///   dump  [command, hidden]
/// ```
pub fn render_tree(registry: &Registry) -> String {
    let tree = registry.tree();
    let mut out = String::new();
    let roots: Vec<_> = tree.roots().collect();
    let mut stack: Vec<(usize, _)> = roots.into_iter().rev().map(|id| (0, id)).collect();
    while let Some((depth, id)) = stack.pop() {
        let node = tree.node(id);
        let mut marks = Vec::new();
        if node.command().is_some() {
            marks.push("command");
        }
        if node.is_hidden() {
            marks.push("hidden");
        }
        let _ = write!(out, "{:indent$}{}", "", node.token(), indent = depth * 2);
        if !marks.is_empty() {
            let _ = write!(out, "  [{}]", marks.join(", "));
        }
        out.push('\n');
        let children: Vec<_> = node.children().collect();
        stack.extend(children.into_iter().rev().map(|child| (depth + 1, child)));
    }
    out
}

fn push_suggestions(out: &mut String, suggestions: &[String]) {
    if !suggestions.is_empty() {
        let _ = writeln!(out, "Did you mean: {}?", suggestions.join(", "));
    }
}

fn push_entries(out: &mut String, title: &str, entries: &[HelpEntry]) {
    let _ = writeln!(out, "{title}");
    let width = entries
        .iter()
        .map(|e| e.token.chars().count())
        .max()
        .unwrap_or(0);
    for entry in entries {
        let help = entry.help.as_deref().unwrap_or("");
        let line = format!("  {:<width$}  {help}", entry.token);
        let _ = writeln!(out, "{}", line.trim_end());
    }
}

fn push_options(out: &mut String, cmd: &CommandDescriptor) {
    if cmd.options().is_empty() {
        return;
    }
    out.push_str("\nOptions:\n");
    let heads: Vec<String> = cmd.options().iter().map(option_head).collect();
    let width = heads.iter().map(|h| h.chars().count()).max().unwrap_or(0);
    for (opt, head) in cmd.options().iter().zip(&heads) {
        let line = format!("  {head:<width$}  {}", option_tail(opt));
        let _ = writeln!(out, "{}", line.trim_end());
    }
}

/// `--name, -n <string>`; bools are flags and take no placeholder.
fn option_head(opt: &OptionDescriptor) -> String {
    let mut head = opt.long_flag();
    if let Some(short) = opt.short_flag() {
        head.push_str(", ");
        head.push_str(&short);
    }
    if !matches!(opt.value_type(), ValueType::Bool) {
        let _ = write!(head, " <{}>", opt.value_type().name());
    }
    head
}

fn option_tail(opt: &OptionDescriptor) -> String {
    let mut parts: Vec<String> = Vec::new();
    if !opt.help_text().is_empty() {
        parts.push(opt.help_text().to_string());
    }
    if opt.is_required() {
        parts.push("(required)".into());
    }
    if let ValueType::Enum(e) = opt.value_type() {
        parts.push(format!("[values: {}]", e.members().join(", ")));
    }
    if let Some(default) = opt.default().filter(|d| !d.is_null()) {
        parts.push(format!("[default: {default}]"));
    }
    parts.join(" ")
}
