use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn small_run(cmd: &mut Command) -> &mut Command {
    cmd.arg("run")
        .arg("--virtual-clock")
        .arg("--width")
        .arg("160")
        .arg("--height")
        .arg("100")
        .arg("--dpi")
        .arg("60")
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_scene-bench"));
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Widget toolkit rendering benchmark"));
}

#[test]
fn test_cli_list() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_scene-bench"));
    cmd.arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rectangle rounded"))
        .stdout(predicate::str::contains("Text large"))
        .stdout(predicate::str::contains("35 scenes, 70 passes"));
}

#[test]
fn test_cli_run_virtual_clock() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_scene-bench"));
    small_run(&mut cmd)
        .assert()
        .success()
        .stdout(predicate::str::contains("1/70: Rectangle"))
        .stdout(predicate::str::contains("70/70: Text large + opa"))
        .stdout(predicate::str::contains("Weighted FPS:"));
}

#[test]
fn test_cli_export_json_report() {
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("report.json");

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_scene-bench"));
    small_run(&mut cmd)
        .arg("--export-report")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("Report exported to"));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["scenes"].as_array().unwrap().len(), 35);
    assert_eq!(json["display"]["width"], 160);
    assert!(json["weighted_fps"].is_u64());
}

#[test]
fn test_cli_fail_below_threshold() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_scene-bench"));
    small_run(&mut cmd)
        .arg("--fail-below")
        .arg(u32::MAX.to_string())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("is below threshold"));
}

#[test]
fn test_cli_rejects_invalid_display() {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_scene-bench"));
    cmd.arg("run")
        .arg("--virtual-clock")
        .arg("--dpi")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid display"));
}

#[test]
fn test_cli_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bench.toml");
    fs::write(
        &config,
        "[display]\nwidth = 120\nheight = 90\ndpi = 50\n\n[host]\nvirtual_clock = true\n",
    )
    .unwrap();

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_scene-bench"));
    cmd.arg("--config")
        .arg(&config)
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("120x90 @ 50 dpi (virtual clock)"));
}
