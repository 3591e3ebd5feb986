//! vt - sample host for the verbtree dispatcher.
//!
//! Registers a small data-platform admin command set, dispatches the process
//! arguments and prints whatever comes back: a bound command, help text, or
//! the same result as JSON.
//!
//! Vibecrafted with AI Agents by VetCoders (c)2026 VetCoders

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use tracing::{debug, info};

use verbtree::colors::{ColorMode, Painter};
use verbtree::{
    BoundCommand, CommandDescriptor, Dispatch, DispatchConfig, Dispatcher, EnumType, ExtractError,
    FromBound, FromValue, OptionDescriptor, Registry, Value, ValueType, help,
};

const PROGRAM: &str = "vt";

/// Host flags consumed before dispatch.
#[derive(Debug, Default)]
struct HostArgs {
    json: bool,
    color: ColorMode,
    rest: Vec<String>,
}

impl HostArgs {
    /// Strip leading host flags; everything from the first other token on
    /// belongs to the dispatcher.
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut host = HostArgs::default();
        let mut args = args.into_iter().peekable();
        while let Some(arg) = args.peek() {
            if arg == "--json" {
                host.json = true;
            } else if arg == "--no-color" {
                host.color = ColorMode::Never;
            } else if let Some(mode) = arg.strip_prefix("--color=") {
                host.color = mode.parse().map_err(anyhow::Error::msg)?;
            } else {
                break;
            }
            args.next();
        }
        host.rest = args.collect();
        Ok(host)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let host = match HostArgs::parse(std::env::args().skip(1)) {
        Ok(host) => host,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(1);
        }
    };
    let painter = Painter::new(host.color);

    match run(&host, painter) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err}", painter.error("error:"));
            ExitCode::from(1)
        }
    }
}

fn run(host: &HostArgs, painter: Painter) -> Result<ExitCode> {
    let config = load_config()?;
    let registry = sample_registry()?;
    info!(commands = registry.commands().len(), "registry ready");

    let dispatcher = Dispatcher::with_config(&registry, config)?;
    let dispatch = dispatcher.dispatch(&host.rest)?;
    debug!(help = dispatch.is_help(), "dispatched");

    if host.json {
        println!("{}", serde_json::to_string_pretty(&dispatch)?);
    } else if let Some(text) = help::render(&dispatch, PROGRAM) {
        print!("{}", painter.help_text(&text));
    } else if let Dispatch::Command(cmd) = &dispatch {
        print!("{}", execute(cmd, &registry, painter)?);
    }

    Ok(if dispatch.is_invalid() {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    })
}

fn load_config() -> Result<DispatchConfig> {
    match std::env::var_os("VT_CONFIG") {
        Some(path) => {
            let path = PathBuf::from(path);
            debug!(path = %path.display(), "loading dispatch config");
            Ok(DispatchConfig::load_from_path(&path)?)
        }
        None => Ok(DispatchConfig::default()),
    }
}

// ============================================================================
// Command set
// ============================================================================

fn plugin_stage() -> ValueType {
    ValueType::Enum(EnumType::new(
        "PluginStage",
        ["PreValidation", "PreOperation", "PostOperation"],
    ))
}

fn sample_registry() -> Result<Registry, verbtree::RegistryError> {
    Registry::builder()
        .command(
            CommandDescriptor::builder(["table", "create"])
                .help("Create a table")
                .option(
                    OptionDescriptor::string("name")
                        .short("n")
                        .required()
                        .help("Display name"),
                )
                .option(
                    OptionDescriptor::string("schemaName")
                        .short("s")
                        .help("Logical name, derived from the display name when omitted"),
                )
                .option(
                    OptionDescriptor::new(
                        "ownership",
                        ValueType::Enum(EnumType::new(
                            "Ownership",
                            ["UserOwned", "OrganizationOwned"],
                        )),
                    )
                    .help("Ownership model"),
                )
                .option(OptionDescriptor::bool("audit").help("Enable auditing"))
                .option(
                    OptionDescriptor::integer("size")
                        .nullable()
                        .help("Initial capacity"),
                ),
        )
        .command(
            CommandDescriptor::builder(["table", "delete"])
                .help("Delete a table")
                .option(OptionDescriptor::string("name").short("n").required())
                .option(OptionDescriptor::bool("force").short("f").help("Skip confirmation")),
        )
        .command(
            CommandDescriptor::builder(["column", "create"])
                .help("Add a column to a table")
                .option(OptionDescriptor::string("table").short("t").required())
                .option(OptionDescriptor::string("name").short("n").required())
                .option(
                    OptionDescriptor::new(
                        "type",
                        ValueType::Enum(EnumType::new(
                            "ColumnType",
                            ["String", "Integer", "Decimal", "Boolean"],
                        )),
                    )
                    .default_value(Value::Enum("String".into())),
                )
                .option(OptionDescriptor::integer("maxLength").nullable())
                .option(OptionDescriptor::decimal("precision").default_value(2.0)),
        )
        .command(
            CommandDescriptor::builder(["plugin", "register"])
                .alias(["plugin", "reg"])
                .help("Register a plugin assembly")
                .option(
                    OptionDescriptor::string("assembly")
                        .short("a")
                        .required()
                        .help("Path to the assembly"),
                )
                .option(
                    OptionDescriptor::new("stage", plugin_stage())
                        .default_value(Value::Enum("PostOperation".into())),
                )
                .option(OptionDescriptor::bool("sandbox").help("Run isolated")),
        )
        .command(
            CommandDescriptor::builder(["plugin", "step", "register"])
                .help("Register a processing step for a plugin")
                .option(OptionDescriptor::string("plugin").short("p").required())
                .option(OptionDescriptor::string("message").short("m").required())
                .option(OptionDescriptor::string("entity").short("e").nullable())
                .option(OptionDescriptor::new("stage", plugin_stage()))
                .option(OptionDescriptor::integer("rank").default_value(1i64)),
        )
        .command(
            CommandDescriptor::builder(["auth", "create"])
                .help("Create a connection profile")
                .option(OptionDescriptor::string("url").required())
                .option(OptionDescriptor::string("username").short("u").nullable())
                .option(OptionDescriptor::bool("interactive").short("i")),
        )
        .command(
            CommandDescriptor::builder(["debug", "dump"])
                .hidden()
                .help("Dump the verb tree"),
        )
        .namespace(["table"], "Manage tables")
        .namespace(["column"], "Manage table columns")
        .namespace(["plugin"], "Manage plugins")
        .namespace(["plugin", "step"], "Manage plugin processing steps")
        .namespace(["auth"], "Manage connection profiles")
        .build()
}

// ============================================================================
// Execution
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PluginStage {
    PreValidation,
    PreOperation,
    PostOperation,
}

impl FromValue for PluginStage {
    const EXPECTED: &'static str = "PluginStage";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Enum(member) => match member.as_str() {
                "PreValidation" => Some(Self::PreValidation),
                "PreOperation" => Some(Self::PreOperation),
                "PostOperation" => Some(Self::PostOperation),
                _ => None,
            },
            _ => None,
        }
    }
}

#[derive(Debug)]
struct PluginRegister {
    assembly: String,
    stage: PluginStage,
    sandbox: bool,
}

impl FromBound for PluginRegister {
    fn from_bound(command: &BoundCommand<'_>) -> Result<Self, ExtractError> {
        Ok(Self {
            assembly: command.value("assembly")?,
            stage: command.value("stage")?,
            sandbox: command.value("sandbox")?,
        })
    }
}

/// Echo the bound command; `plugin register` also goes through typed
/// extraction and `debug dump` prints the verb tree.
fn execute(cmd: &BoundCommand<'_>, registry: &Registry, painter: Painter) -> Result<String> {
    let mut out = format!("{}\n", painter.ok(&cmd.descriptor().name()));
    for (key, value) in cmd.values() {
        out.push_str(&format!("  {} = {value}\n", painter.verb(key)));
    }

    if cmd.is(&["plugin", "register"]) {
        let plugin: PluginRegister = cmd.extract()?;
        debug!(?plugin, "typed plugin registration");
        let isolation = if plugin.sandbox { "sandboxed" } else { "full trust" };
        out.push_str(&format!(
            "{}\n",
            painter.dim(&format!(
                "{} registered at {:?} ({isolation})",
                plugin.assembly, plugin.stage
            ))
        ));
    } else if cmd.is(&["debug", "dump"]) {
        debug!(nodes = registry.tree().len(), "dumping verb tree");
        out.push_str(&help::render_tree(registry));
    }
    Ok(out)
}
