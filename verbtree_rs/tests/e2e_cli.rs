//! End-to-End CLI Tests for the `vt` host binary.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a command pointing to the vt binary
fn vt() -> Command {
    let mut cmd = cargo_bin_cmd!("vt");
    cmd.env_remove("VT_CONFIG").env_remove("RUST_LOG");
    cmd
}

// ============================================
// Help
// ============================================

mod help {
    use super::*;

    #[test]
    fn no_arguments_lists_top_level_commands() {
        vt().assert()
            .success()
            .stdout(predicate::str::contains("Usage: vt <command> [options]"))
            .stdout(predicate::str::contains("plugin"))
            .stdout(predicate::str::contains("Manage tables"))
            .stdout(predicate::str::contains("debug").not());
    }

    #[test]
    fn namespace_lists_children() {
        vt().arg("plugin")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("Manage plugins"))
            .stdout(predicate::str::contains("register"))
            .stdout(predicate::str::contains("step"));
    }

    #[test]
    fn command_help_lists_options() {
        for args in [
            vec!["table", "create", "--help"],
            vec!["table", "create", "/?"],
            vec!["help", "table", "create"],
        ] {
            vt().args(&args)
                .assert()
                .success()
                .stdout(predicate::str::contains("Usage: vt table create [options]"))
                .stdout(predicate::str::contains("--name, -n <string>"))
                .stdout(predicate::str::contains("[values: UserOwned, OrganizationOwned]"));
        }
    }

    #[test]
    fn alias_is_listed_in_command_help() {
        vt().args(["plugin", "register", "-h"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Aliases:\n  vt plugin reg"));
    }
}

// ============================================
// Invalid invocations
// ============================================

mod invalid {
    use super::*;

    #[test]
    fn unknown_command_suggests_and_exits_2() {
        vt().arg("tabel")
            .assert()
            .code(2)
            .stdout(predicate::str::contains("Invalid command: tabel"))
            .stdout(predicate::str::contains("Did you mean: table?"));
    }

    #[test]
    fn unknown_subcommand_gives_namespace_help() {
        vt().args(["table", "craete"])
            .assert()
            .code(2)
            .stdout(predicate::str::contains("Unknown command: table craete"))
            .stdout(predicate::str::contains("Did you mean: table create?"));
    }

    #[test]
    fn malformed_arguments_give_generic_help() {
        vt().args(["table", "create", "--name", "a", "b"])
            .assert()
            .code(2)
            .stdout(predicate::str::contains("Invalid arguments:"))
            .stdout(predicate::str::contains("Commands:"));
    }

    #[test]
    fn missing_required_option_fails() {
        vt().args(["table", "create"])
            .assert()
            .code(1)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains(
                "required argument '--name' was not provided",
            ));
    }

    #[test]
    fn typo_in_option_is_suggested() {
        vt().args(["table", "create", "--name", "x", "--sise", "3"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("unrecognized option '--sise'"))
            .stderr(predicate::str::contains("did you mean '--size'?"));
    }

    #[test]
    fn bad_enum_value_fails() {
        vt().args(["plugin", "reg", "-a", "x.dll", "--stage", "Later"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("expected PluginStage"));
    }
}

// ============================================
// Bound commands
// ============================================

mod run {
    use super::*;

    #[test]
    fn binds_and_echoes_values() {
        vt().args(["Table", "Create", "-n", "Account", "--audit", "--size", "-5"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("table create\n"))
            .stdout(predicate::str::contains("  name = Account\n"))
            .stdout(predicate::str::contains("  audit = true\n"))
            .stdout(predicate::str::contains("  size = -5\n"))
            .stdout(predicate::str::contains("  ownership = UserOwned\n"))
            .stdout(predicate::str::contains("  schemaName = null\n"));
    }

    #[test]
    fn alias_runs_typed_plugin_registration() {
        vt().args(["plugin", "reg", "--assembly=Contoso.dll", "--stage", "preoperation"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("plugin register\n"))
            .stdout(predicate::str::contains(
                "Contoso.dll registered at PreOperation (full trust)",
            ));
    }

    #[test]
    fn hidden_dump_prints_the_verb_tree() {
        vt().args(["debug", "dump"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("debug dump\n"))
            .stdout(predicate::str::contains("table\n  create  [command]\n  delete  [command]\n"))
            .stdout(predicate::str::contains("  step\n    register  [command]\n"))
            .stdout(predicate::str::contains("debug  [hidden]\n  dump  [command, hidden]\n"));
    }

    #[test]
    fn json_output() {
        let output = vt()
            .args(["--json", "column", "create", "-t", "account", "-n", "code"])
            .output()
            .unwrap();
        assert!(output.status.success());
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["kind"], "command");
        assert_eq!(json["command"], "column create");
        assert_eq!(json["values"]["type"], "String");
        assert_eq!(json["values"]["precision"], 2.0);
        assert!(json["values"]["maxLength"].is_null());
    }

    #[test]
    fn json_help_carries_suggestions() {
        let output = vt().args(["--json", "tabel"]).output().unwrap();
        assert_eq!(output.status.code(), Some(2));
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["kind"], "generic_help");
        assert_eq!(json["invalid"]["reason"], "unknown_command");
        assert_eq!(json["suggestions"][0], "table");
    }
}

// ============================================
// Configuration
// ============================================

mod config {
    use super::*;

    #[test]
    fn config_file_disables_suggestions() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vt.toml");
        std::fs::write(&path, "suggestion_distance = 0\n").unwrap();

        vt().env("VT_CONFIG", &path)
            .arg("tabel")
            .assert()
            .code(2)
            .stdout(predicate::str::contains("Did you mean").not());
    }

    #[test]
    fn config_file_adds_help_flag() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vt.toml");
        std::fs::write(&path, "help_flags = [\"--usage\"]\n").unwrap();

        vt().env("VT_CONFIG", &path)
            .args(["auth", "create", "--usage"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage: vt auth create [options]"));
    }

    #[test]
    fn help_flag_shadowing_an_option_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vt.toml");
        std::fs::write(&path, "help_flags = [\"--help\", \"-n\"]\n").unwrap();

        vt().env("VT_CONFIG", &path)
            .arg("table")
            .assert()
            .code(1)
            .stderr(predicate::str::contains(
                "option '-n' is configured as a help flag",
            ));
    }

    #[test]
    fn broken_config_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vt.toml");
        std::fs::write(&path, "suggestion_distance = \"far\"\n").unwrap();

        vt().env("VT_CONFIG", &path)
            .arg("table")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("failed to parse"));
    }
}
