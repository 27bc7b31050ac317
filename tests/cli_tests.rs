use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

struct TestContext {
    dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_warcalc"));
        cmd.env("RUST_LOG", "warcalc=warn")
            .arg("--data-dir")
            .arg(self.data_dir());
        cmd
    }

    /// Runs `roster add` and returns the id printed on stdout.
    fn add_unit(&self, args: &[&str]) -> u64 {
        let output = self
            .cmd()
            .args(["roster", "add"])
            .args(args)
            .assert()
            .success()
            .get_output()
            .clone();
        String::from_utf8_lossy(&output.stdout)
            .trim()
            .parse()
            .expect("add should print the unit id")
    }

    fn payload(&self, extra: &[&str]) -> Value {
        let output = self
            .cmd()
            .arg("payload")
            .args(extra)
            .assert()
            .success()
            .get_output()
            .clone();
        serde_json::from_slice(&output.stdout).expect("payload should be JSON")
    }
}

#[test]
fn test_cli_add_then_payload() {
    let ctx = TestContext::new();
    ctx.add_unit(&[
        "--name", "Boyz", "--models", "10", "--attacks", "2", "--skill", "4+",
    ]);

    let payload = ctx.payload(&[]);
    let entries = payload.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["unitName"], "Boyz");
    assert_eq!(entries[0]["numberOfModels"], 10);
    assert_eq!(entries[0]["bsValue"], 4);
    assert_eq!(entries[0]["strength"], 4);
    assert_eq!(entries[0]["damageValue"], "1");
    assert_eq!(entries[0]["rerollType"], "NONE");

    assert!(ctx.data_dir().join("warhammer_army.json").exists());
}

#[test]
fn test_cli_toggles_reach_payload() {
    let ctx = TestContext::new();
    ctx.add_unit(&[
        "--name",
        "Nobz",
        "--lethal-hits",
        "--sustained",
        "D3",
        "--reroll-hits",
        "ONES",
        "--crit-hit",
        "5",
        "--ap=-1",
    ]);

    let entry = &ctx.payload(&[])[0];
    assert_eq!(entry["lethalHits"], true);
    assert_eq!(entry["sustainedHits"], true);
    assert_eq!(entry["sustainedValue"], "D3");
    assert_eq!(entry["rerollType"], "ONES");
    assert_eq!(entry["critHitValue"], 5);
    assert_eq!(entry["ap"], -1);
}

#[test]
fn test_cli_unit_filter_and_remove() {
    let ctx = TestContext::new();
    let boyz = ctx.add_unit(&["--name", "Boyz"]);
    let nobz = ctx.add_unit(&["--name", "Nobz"]);

    let all = ctx.payload(&[]);
    assert_eq!(all[0]["unitName"], "Nobz");
    assert_eq!(all[1]["unitName"], "Boyz");

    let single = ctx.payload(&["--unit", &boyz.to_string()]);
    assert_eq!(single.as_array().unwrap().len(), 1);
    assert_eq!(single[0]["unitName"], "Boyz");

    ctx.cmd()
        .args(["roster", "remove", &nobz.to_string()])
        .assert()
        .success();
    let remaining = ctx.payload(&[]);
    assert_eq!(remaining.as_array().unwrap().len(), 1);
}

#[test]
fn test_cli_unknown_unit_fails() {
    let ctx = TestContext::new();
    ctx.add_unit(&["--name", "Boyz"]);
    ctx.cmd()
        .args(["payload", "--unit", "999"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_cli_list_shows_points() {
    let ctx = TestContext::new();
    ctx.add_unit(&["--name", "Boyz", "--points", "850"]);

    let output = ctx
        .cmd()
        .args(["--points-limit", "1000", "roster", "list"])
        .assert()
        .success()
        .get_output()
        .clone();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Boyz"));
    assert!(stdout.contains("Points: [#################---] 850 / 1000 (85%)"));
}

#[test]
fn test_cli_list_empty_roster() {
    let ctx = TestContext::new();
    let output = ctx
        .cmd()
        .args(["roster", "list"])
        .assert()
        .success()
        .get_output()
        .clone();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Roster is empty."));
    assert!(stdout.contains("Points: [--------------------] 0 / 2000 (0%)"));
}

#[test]
fn test_cli_calc_without_engine_reports_no_result() {
    let ctx = TestContext::new();
    ctx.add_unit(&["--name", "Boyz"]);

    let output = ctx
        .cmd()
        .args([
            "--engine-url",
            "http://127.0.0.1:9/api/calculate",
            "--request-timeout-secs",
            "5",
            "calc",
        ])
        .assert()
        .success()
        .get_output()
        .clone();
    assert!(String::from_utf8_lossy(&output.stdout).contains("No result"));
}

#[test]
fn test_cli_calc_on_empty_roster() {
    let ctx = TestContext::new();
    let output = ctx
        .cmd()
        .arg("calc")
        .assert()
        .success()
        .get_output()
        .clone();
    assert!(String::from_utf8_lossy(&output.stdout).contains("roster is empty"));
}

#[test]
fn test_cli_bad_config_file_exits_with_config_error() {
    let ctx = TestContext::new();
    let config = ctx.data_dir().join("settings.json");
    fs::write(&config, "not json").unwrap();

    ctx.cmd()
        .arg("--config")
        .arg(&config)
        .args(["roster", "list"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_cli_config_file_sets_storage_key() {
    let ctx = TestContext::new();
    let config = ctx.data_dir().join("settings.json");
    fs::write(&config, r#"{ "storage_key": "tournament" }"#).unwrap();

    ctx.cmd()
        .arg("--config")
        .arg(&config)
        .args(["roster", "add", "--name", "Boyz"])
        .assert()
        .success();

    assert!(ctx.data_dir().join("tournament.json").exists());
    assert!(!ctx.data_dir().join("warhammer_army.json").exists());
}
