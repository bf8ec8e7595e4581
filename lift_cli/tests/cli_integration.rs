use assert_cmd::prelude::*;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

// Small building so runs finish quickly
fn write_valid_config(dir: &tempfile::TempDir) -> PathBuf {
    let toml = r#"
[building]
floors = 6
cars = 2
capacity = 4
speed_floors_per_s = 2.0

[dispatch]
strategy = "request_queue"
oldest_window = 2

[simulation]
seed = 11
ticks = 300
dt_ms = 100
spawn_per_s = 1.0
"#;
    let path = dir.path().join("cfg.toml");
    fs::write(&path, toml).unwrap();
    path
}

fn write_scenario(dir: &tempfile::TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("scenario.csv");
    let mut f = fs::File::create(&path).unwrap();
    write!(f, "{body}").unwrap();
    path
}

#[rstest]
#[case(&["--help"], 0, "Usage:", "stdout")]
#[case(&["run", "--ticks", "50"], 0, "delivered:", "stdout")]
#[case(&["run", "--strategy", "floor_scan", "--ticks", "50"], 0, "floor_scan", "stdout")]
#[case(&["run", "--strategy", "sideways"], 2, "invalid value", "stderr")]
#[case(&["self-check"], 0, "self-check ok", "stdout")]
#[case(&["fly"], 2, "unrecognized subcommand", "stderr")]
fn cli_table_cases(
    #[case] args: &[&str],
    #[case] exit_code: i32,
    #[case] needle: &str,
    #[case] stream: &str,
) {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);

    let mut cmd = Command::cargo_bin("lift").unwrap();

    // Always include a valid config to avoid relying on default path
    cmd.arg("--config").arg(&cfg).arg("--log-level").arg("error");
    for a in args {
        cmd.arg(a);
    }

    let assert = cmd.assert().code(exit_code);
    match stream {
        "stdout" => {
            assert.stdout(predicate::str::contains(needle));
        }
        "stderr" => {
            assert.stderr(predicate::str::contains(needle));
        }
        other => panic!("unknown stream: {other}"),
    }
}

#[rstest]
fn cli_reports_bad_scenario_header() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);
    let csv = write_scenario(&dir, "step,from,to\n0,0,3\n");

    let mut cmd = Command::cargo_bin("lift").unwrap();
    cmd.arg("--config")
        .arg(&cfg)
        .arg("--scenario")
        .arg(&csv)
        .arg("run");

    cmd.assert()
        .code(3)
        .stderr(predicate::str::contains("Invalid headers"));
}

#[rstest]
fn cli_rejects_scenario_above_top_floor() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);
    let csv = write_scenario(&dir, "tick,origin,destination\n0,0,3\n5,9,1\n");

    let mut cmd = Command::cargo_bin("lift").unwrap();
    cmd.arg("--config")
        .arg(&cfg)
        .arg("--scenario")
        .arg(&csv)
        .arg("run");

    cmd.assert()
        .code(3)
        .stderr(predicate::str::contains("top floor 5"));
}

#[rstest]
#[case("[building]\nfloors = 1\n", "building.floors must be >= 2")]
#[case("[dispatch]\nstrategy = \"nearest\"\n", "unknown variant")]
#[case("[logging]\nrotation = \"weekly\"\n", "never|daily|hourly")]
#[case("[building\n", "Invalid configuration")]
fn cli_config_errors_exit_2(#[case] toml: &str, #[case] needle: &str) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, toml).unwrap();

    let mut cmd = Command::cargo_bin("lift").unwrap();
    cmd.arg("--config").arg(&path).arg("run");

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains(needle));
}

#[rstest]
fn cli_missing_config_file_exits_2() {
    let dir = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("lift").unwrap();
    cmd.arg("--config")
        .arg(dir.path().join("nope.toml"))
        .arg("self-check");

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("read failed"));
}

#[rstest]
fn cli_rejects_zero_dt_override_path() {
    // dt_ms = 0 fails validation before the run starts.
    let dir = tempdir().unwrap();
    let path = dir.path().join("cfg.toml");
    fs::write(&path, "[simulation]\ndt_ms = 0\n").unwrap();

    let mut cmd = Command::cargo_bin("lift").unwrap();
    cmd.arg("--config").arg(&path).arg("run");

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("simulation.dt_ms must be >= 1"));
}

/// Scripted passengers are all delivered end to end with either strategy.
#[rstest]
#[case("request_queue")]
#[case("floor_scan")]
fn cli_delivers_scripted_passengers(#[case] strategy: &str) {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);
    let csv = write_scenario(
        &dir,
        "tick,origin,destination\n0,0,5\n3,4,1\n10,2,3\n10,5,0\n",
    );

    let mut cmd = Command::cargo_bin("lift").unwrap();
    cmd.arg("--json")
        .arg("--log-level")
        .arg("error")
        .arg("--config")
        .arg(&cfg)
        .arg("--scenario")
        .arg(&csv)
        .arg("run")
        .arg("--strategy")
        .arg(strategy)
        .arg("--ticks")
        .arg("20000");

    let out = cmd.assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8_lossy(&out);
    let line = stdout
        .lines()
        .find(|l| l.contains("\"delivered\""))
        .unwrap_or("");
    let v: serde_json::Value = serde_json::from_str(line).expect("valid JSON");
    assert_eq!(v["strategy"], strategy);
    assert_eq!(v["spawned"], 4);
    assert_eq!(v["delivered"], 4);
    assert!(v["ticks"].as_u64().unwrap() < 20000);
}

#[rstest]
fn same_seed_gives_same_summary() {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);
    let run = || {
        let mut cmd = Command::cargo_bin("lift").unwrap();
        cmd.arg("--json")
            .arg("--log-level")
            .arg("error")
            .arg("--config")
            .arg(&cfg)
            .arg("run")
            .arg("--seed")
            .arg("42");
        let out = cmd.assert().success().get_output().stdout.clone();
        let v: serde_json::Value =
            serde_json::from_str(String::from_utf8_lossy(&out).trim()).unwrap();
        (v["spawned"].clone(), v["delivered"].clone(), v["moves"].clone())
    };
    assert_eq!(run(), run());
}
