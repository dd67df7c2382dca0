use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn dartboard() -> Command {
    Command::cargo_bin("dartboard").expect("binary")
}

#[test]
fn circle_calibration_then_classify() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("cameras.json");

    dartboard()
        .args(["calibrate", "circle", "--camera", "front", "--store"])
        .arg(&store)
        .args(["--cx", "320", "--cy", "240", "--radius", "200", "--rotation", "90"])
        .assert()
        .success()
        .stdout(predicate::str::contains("front: center=(320.00, 240.00)"));

    let out = dartboard()
        .args(["classify", "--camera", "front", "--store"])
        .arg(&store)
        .args(["320", "120"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["segment_value"], 20);
    assert_eq!(json["multiplier"], 3);
    assert_eq!(json["score"], 60);
    assert_eq!(json["in_bounds"], true);
}

#[test]
fn four_point_calibration_recovers_rotation() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("cameras.json");

    // Evenly spread boundaries of a 100 px board centred at (200, 200) with
    // 20 at the top: 20/1, 6/10, 3/19, 11/14 at 9, 99, 189 and 279 degrees.
    let points = [(9.0f64, "20/1"), (99.0, "6/10"), (189.0, "3/19"), (279.0, "11/14")];
    let mut cmd = dartboard();
    cmd.args(["calibrate", "points", "--camera", "cam0", "--store"])
        .arg(&store);
    for (angle, label) in points {
        let a = (angle - 90.0f64).to_radians();
        let (x, y) = (200.0 + 100.0 * a.cos(), 200.0 + 100.0 * a.sin());
        cmd.arg(format!("--point={x},{y}"))
            .args(["--label", label]);
    }
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("rotation=90.00"));

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&store).unwrap()).unwrap();
    assert!(saved["cam0"]["radius"].as_f64().unwrap() > 99.99);
}

#[test]
fn four_point_calibration_needs_four_points() {
    let dir = TempDir::new().unwrap();
    dartboard()
        .args(["calibrate", "points", "--camera", "cam0", "--store"])
        .arg(dir.path().join("cameras.json"))
        .args(["--point", "1,2", "--point", "3,4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exactly 4 points, got 2"));
}

#[test]
fn play_reports_busts_and_wins() {
    dartboard()
        .args(["play", "--starting-score", "40", "--players", "2"])
        .args(["DB", "20", "D10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("player 1: DB bust (overshoot), stays on 40"))
        .stdout(predicate::str::contains("player 2: 20 -> 20"))
        .stdout(predicate::str::contains("player 2 wins with D10"))
        .stdout(predicate::str::contains("winner: player 2"));
}

#[test]
fn play_supports_undo_and_suggests_checkouts() {
    dartboard()
        .args(["play", "T20", "T20", "undo", "T19"])
        .assert()
        .success()
        .stdout(predicate::str::contains("undo T20 by player 1"))
        .stdout(predicate::str::contains("player 1: 384"))
        .stdout(predicate::str::contains("to throw: player 1 (1 darts left)"));
}

#[test]
fn play_rejects_bad_notation() {
    dartboard()
        .args(["play", "T21"])
        .assert()
        .failure();
}

#[test]
fn classify_unknown_camera_fails() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("cameras.json");
    std::fs::write(&store, "{}").unwrap();
    dartboard()
        .args(["classify", "--camera", "nope", "--store"])
        .arg(&store)
        .args(["1", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn log_level_falls_back_to_environment() {
    dartboard()
        .env("DARTBOARD_LOG", "debug")
        .args(["play", "T20"])
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG"))
        .stderr(predicate::str::contains("player 1 threw T20, 441 left"));

    dartboard()
        .env_remove("DARTBOARD_LOG")
        .args(["play", "T20"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn log_level_flag_overrides_environment() {
    dartboard()
        .env("DARTBOARD_LOG", "debug")
        .args(["--log-level", "off", "play", "T20"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}
