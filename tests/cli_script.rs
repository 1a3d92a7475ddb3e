mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::path::Path;

fn cli(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("trip_ledger_cli").expect("binary");
    cmd.env("TRIP_LEDGER_HOME", home).env("NO_COLOR", "1");
    cmd
}

#[test]
fn script_mode_imports_settles_and_reports() {
    let (temp, snapshot) = common::workspace_with_goa();
    let home = temp.path().join("home");
    let input = format!(
        "import {}\nsettle goa paid\nreport\nexit\nlist\n",
        snapshot.display()
    );

    cli(&home)
        .env("TRIP_LEDGER_CLI_SCRIPT", "1")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Imported trip `Goa` (3 members, 2 budget items, 1 spending items)."))
        .stdout(contains("Per-person share : ₹100.00"))
        .stdout(contains("Ben owes Asha ₹100.00"))
        .stdout(contains("Chen owes Asha ₹100.00"))
        .stdout(contains("Per-person share: ₹133.33"))
        .stdout(contains("Ben owes Asha ₹33.33"))
        // `exit` stops before `list` runs
        .stdout(contains("=== Trips ===").not());

    assert!(home.join("trips").join("goa.json").exists());
    assert!(home.join("config").join("config.json").exists());
}

#[test]
fn script_mode_keeps_going_after_errors() {
    let temp = tempfile::tempdir().expect("tempdir");
    cli(temp.path())
        .env("TRIP_LEDGER_CLI_SCRIPT", "1")
        .write_stdin("show nowhere\nsetle\nversion\n")
        .assert()
        .success()
        .stdout(contains("Trip not found: nowhere"))
        .stdout(contains("Suggestion: `settle`?"))
        .stdout(predicate::str::is_match(r"Trip Ledger \d+\.\d+\.\d+").expect("regex"));
}

#[test]
fn one_shot_failure_exits_non_zero() {
    let temp = tempfile::tempdir().expect("tempdir");
    cli(temp.path())
        .args(["balances", "nowhere"])
        .assert()
        .failure()
        .stdout(contains("Trip not found: nowhere"));

    cli(temp.path())
        .arg("remaining")
        .assert()
        .failure()
        .stdout(contains("No trip selected"));
}

#[test]
fn help_lists_every_command() {
    let temp = tempfile::tempdir().expect("tempdir");
    let assert = cli(temp.path()).arg("help").assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    for name in [
        "help", "version", "exit", "list", "import", "show", "export", "balances", "remaining",
        "settle", "report", "config",
    ] {
        assert!(stdout.contains(&format!("  {name} ")), "missing {name}");
    }

    cli(temp.path())
        .args(["help", "settle"])
        .assert()
        .success()
        .stdout(contains("Usage: settle [trip] [assigned|paid]"));
    cli(temp.path())
        .args(["HELP", "quit"])
        .assert()
        .success()
        .stdout(contains("Help: exit"))
        .stdout(contains("Aliases: quit"));
}

#[test]
fn report_rejects_extra_arguments() {
    let (temp, snapshot) = common::workspace_with_goa();
    let home = temp.path().join("home");
    cli(&home).arg("import").arg(&snapshot).assert().success();

    cli(&home)
        .args(["report", "goa", "extra"])
        .assert()
        .failure()
        .stdout(contains("usage: report [trip] [--json]"));
    cli(&home)
        .args(["report", "goa", "--csv"])
        .assert()
        .failure()
        .stdout(contains("unknown flag `--csv`"));
}

#[test]
fn importing_a_clashing_name_keeps_both_trips() {
    let (temp, snapshot) = common::workspace_with_goa();
    let home = temp.path().join("home");
    cli(&home).arg("import").arg(&snapshot).assert().success();

    let mut other = common::goa_trip();
    other.id = uuid::Uuid::new_v4();
    other.name = "GOA".to_string();
    let clash = temp.path().join("clash.json");
    std::fs::write(&clash, serde_json::to_string(&other).expect("json")).expect("write");

    cli(&home)
        .arg("import")
        .arg(&clash)
        .assert()
        .success()
        .stdout(contains("Another trip already uses `goa`"));
    cli(&home)
        .arg("ls")
        .assert()
        .success()
        .stdout(contains("Goa "))
        .stdout(contains("GOA "));
    cli(&home)
        .args(["show", "Goa"])
        .assert()
        .success()
        .stdout(contains("Trip: Goa"));
}

#[test]
fn config_changes_persist_between_runs() {
    let (temp, snapshot) = common::workspace_with_goa();
    let home = temp.path().join("home");

    cli(&home)
        .args(["config", "set", "currency", "usd"])
        .assert()
        .success()
        .stdout(contains("Set currency = usd."));
    cli(&home)
        .args(["config", "set", "contribution_basis", "assigned"])
        .assert()
        .success();
    cli(&home)
        .args(["config", "set", "theme", "dark"])
        .assert()
        .failure()
        .stdout(contains("Unknown setting `theme`"));

    cli(&home)
        .arg("import")
        .arg(&snapshot)
        .assert()
        .success();
    cli(&home)
        .arg("settle")
        .assert()
        .success()
        .stdout(contains("Settlement: Goa (assigned)"))
        .stdout(contains("Chen owes Asha $33.33"));
}

#[test]
fn report_json_and_export_round_trip() {
    let (temp, snapshot) = common::workspace_with_goa();
    let home = temp.path().join("home");
    cli(&home).arg("import").arg(&snapshot).assert().success();

    let assert = cli(&home).args(["report", "goa", "--json"]).assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    let report: serde_json::Value = serde_json::from_str(&stdout).expect("json report");
    assert_eq!(report["basis"], "assigned");
    assert_eq!(report["all_settled"], false);
    assert_eq!(report["settlements"].as_array().map(Vec::len), Some(2));

    let target = temp.path().join("out").join("copy.json");
    cli(&home)
        .arg("export")
        .arg("Goa")
        .arg(&target)
        .assert()
        .success()
        .stdout(contains("Exported `Goa`"));
    let copy: trip_domain::Trip =
        serde_json::from_str(&std::fs::read_to_string(&target).expect("read")).expect("parse");
    assert_eq!(copy.name, "Goa");
    assert_eq!(copy.budget_items.len(), 2);
}
