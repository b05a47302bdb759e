mod support;

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use support::fixture::{write_scenario, UPCOMING_START};

fn surebet(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("surebet").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("SUREBET_SNAPSHOT_DIR")
        .env_remove("ORDERS_INTERVAL")
        .env_remove("TRADES_INTERVAL");
    cmd
}

fn scenario() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("snapshots")).unwrap();
    write_scenario(&dir.path().join("snapshots"));
    dir
}

#[test]
fn scan_prints_opportunity_and_closed_surebet() {
    let dir = scenario();
    surebet(&dir)
        .arg("scan")
        .assert()
        .success()
        .stdout(predicate::str::contains("Arbitrage Opportunities"))
        .stdout(predicate::str::contains("Alpha vs Beta"))
        .stdout(predicate::str::contains("33.33%"))
        .stdout(predicate::str::contains("Gamma vs Delta"));
}

#[test]
fn scan_json_emits_typed_lines() {
    let dir = scenario();
    let output = surebet(&dir)
        .args(["--json", "scan", "--snapshot", "snapshots"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let line = stdout
        .lines()
        .find(|line| line.contains("\"scan\""))
        .expect("scan record");
    let value: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(value["type"], "scan");
    assert_eq!(value["payload"]["opportunities"].as_array().unwrap().len(), 1);
    assert_eq!(value["payload"]["closed"].as_array().unwrap().len(), 1);
}

#[test]
fn high_min_roi_filters_everything() {
    let dir = scenario();
    surebet(&dir)
        .args(["scan", "--min-roi", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No hedgeable positions"));
}

#[test]
fn prematch_ranks_upcoming_market() {
    let dir = scenario();
    let now = (UPCOMING_START - 2 * 3_600).to_string();
    surebet(&dir)
        .args(["prematch", "--now", &now])
        .assert()
        .success()
        .stdout(predicate::str::contains("Home vs Away"));
}

#[test]
fn positions_history_and_stats() {
    let dir = scenario();
    surebet(&dir)
        .arg("positions")
        .assert()
        .success()
        .stdout(predicate::str::contains("Active Positions"));
    surebet(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("WON"));
    surebet(&dir)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Win rate"))
        .stdout(predicate::str::contains("100.00%"));
}

#[test]
fn hedge_recommend_prints_stake() {
    let dir = tempfile::tempdir().unwrap();
    surebet(&dir)
        .args(["hedge", "recommend", "--stake", "100", "--odds", "4", "--roi", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("263.64"));
}

#[test]
fn hedge_plan_unknown_market_fails() {
    let dir = scenario();
    surebet(&dir)
        .args([
            "hedge", "plan", "--market", "0xnope", "--side", "two", "--stake", "20",
            "--min-odds", "1.4",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("market not found"));
}

#[test]
fn hedge_plan_sizes_against_book() {
    let dir = scenario();
    surebet(&dir)
        .args([
            "hedge", "plan", "--market", "0xhedgeable", "--side", "two", "--stake", "50",
            "--min-odds", "1.4",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("50000000"));
}

#[test]
fn missing_snapshot_fails() {
    let dir = tempfile::tempdir().unwrap();
    surebet(&dir)
        .args(["scan", "--snapshot", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("trades.json"));
}

#[test]
fn config_init_then_validate() {
    let dir = tempfile::tempdir().unwrap();
    surebet(&dir).args(["config", "init"]).assert().success();
    assert!(dir.path().join("surebet.toml").exists());

    surebet(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));

    surebet(&dir).args(["config", "init"]).assert().failure();
    surebet(&dir)
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn invalid_config_returns_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("bad.toml"), "[arbitrage]\nmin_roi = -1.0\n").unwrap();
    surebet(&dir)
        .args(["config", "validate", "--config", "bad.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("arbitrage.min_roi"));
}

#[test]
fn explicit_missing_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    surebet(&dir)
        .args(["config", "show", "--config", "absent.toml"])
        .assert()
        .failure();
}
