//! Integration tests for the nutri binary.
//!
//! These tests verify end-to-end behavior including:
//! - BMI and calorie output, including locale decimals
//! - Plan generation, saving and CSV export
//! - Goal queuing through the outbox
//! - Error reporting for invalid input

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
///
/// Config and data lookups point at an empty directory so a developer's own
/// `~/.config/nutri/config.toml` cannot change the results.
fn cli() -> Command {
    let isolated = std::path::Path::new(env!("CARGO_TARGET_TMPDIR")).join("nutri-no-config");
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("nutri"));
    cmd.env("XDG_CONFIG_HOME", &isolated)
        .env("XDG_DATA_HOME", &isolated);
    cmd
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Nutrition and workout planning toolkit",
        ));
}

#[test]
fn test_bmi_with_comma_decimals() {
    cli()
        .args(["bmi", "--weight", "70,5", "--height", "1,75"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BMI: 23.0 (Normal weight)"));
}

#[test]
fn test_bmi_json_output() {
    let output = cli()
        .args(["bmi", "--weight", "95", "--height", "1.70", "--json"])
        .output()
        .expect("run nutri");
    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(value["value"], 32.9);
    assert_eq!(value["category"], "obesity_1");
}

#[test]
fn test_bmi_missing_weight_fails() {
    cli()
        .args(["bmi", "--weight", "", "--height", "1.75"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("weight is required"));
}

#[test]
fn test_bmi_out_of_range_fails() {
    cli()
        .args(["bmi", "--weight", "70", "--height", "175"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("height out of range"));
}

#[test]
fn test_bmi_implausible_fails() {
    cli()
        .args(["bmi", "--weight", "40", "--height", "2.5"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Implausible BMI"));
}

#[test]
fn test_calories_portuguese_labels() {
    cli()
        .args([
            "calories",
            "--weight",
            "70",
            "--height-cm",
            "175",
            "--age",
            "30",
            "--sex",
            "M",
            "--activity",
            "moderado",
            "--goal",
            "emagrecer",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Daily calories: 2056 kcal"));
}

#[test]
fn test_calories_unknown_activity_is_sedentary() {
    // BMR 1655 * 1.2 = 1986 with no goal adjustment
    cli()
        .args([
            "calories",
            "--weight",
            "70",
            "--height-cm",
            "176",
            "--age",
            "30",
            "--sex",
            "M",
            "--activity",
            "weekend-warrior",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Daily calories: 1986 kcal"));
}

#[test]
fn test_bmi_rounded_value_and_category_agree() {
    // 24.96 rounds to 25.0, the first Overweight value
    cli()
        .args(["bmi", "--weight", "24,96", "--height", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("BMI: 25.0 (Overweight)"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_config_file_sets_calorie_floor() {
    let temp_dir = setup_test_dir();
    let config_dir = temp_dir.path().join("nutri");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[calories]\nfloor_kcal = 3000\n",
    )
    .unwrap();

    cli()
        .env("XDG_CONFIG_HOME", temp_dir.path())
        .args([
            "calories",
            "--weight",
            "70",
            "--height-cm",
            "175",
            "--age",
            "30",
            "--sex",
            "M",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Implausible daily calories"));
}

#[test]
fn test_calories_below_floor_fails() {
    cli()
        .args([
            "calories",
            "--weight",
            "35",
            "--height-cm",
            "140",
            "--age",
            "90",
            "--sex",
            "F",
            "--goal",
            "lose",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Implausible daily calories"));
}

#[test]
fn test_plan_text_output() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["plan", "--days", "3", "--goal", "emagrecer", "--minutes", "30"])
        .args(["--time", "manhã"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Day 1: HIIT Intervals"))
        .stdout(predicate::str::contains("Day 3: Full-Body Circuit"))
        .stdout(predicate::str::contains("manhã"));

    // Nothing persisted without --save
    assert!(!temp_dir.path().join("state.json").exists());
}

#[test]
fn test_plan_json_cycles_catalog() {
    let output = cli()
        .args(["plan", "--days", "7", "--goal", "lose", "--json"])
        .output()
        .expect("run nutri");
    assert!(output.status.success());

    let plan: Vec<Value> = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(plan.len(), 7);
    assert_eq!(plan[5]["exercise_name"], plan[0]["exercise_name"]);
    assert_eq!(plan[6]["exercise_name"], plan[1]["exercise_name"]);
    assert_eq!(plan[6]["day_label"], "Day 7");
}

#[test]
fn test_plan_zero_days_fails() {
    cli()
        .args(["plan", "--days", "0", "--goal", "lose"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("days per week"));
}

#[test]
fn test_plan_huge_day_count_fails() {
    cli()
        .args(["plan", "--days", "4000000000", "--goal", "lose"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at most 366"));
}

#[test]
fn test_plan_save_persists_and_queues() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .args(["plan", "--days", "4", "--goal", "gain", "--save"])
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan saved"));

    let state: Value =
        serde_json::from_str(&fs::read_to_string(data_dir.join("state.json")).unwrap()).unwrap();
    assert_eq!(state["plan"]["entries"].as_array().unwrap().len(), 4);
    assert_eq!(state["plan"]["request"]["goal"], "gain");

    let outbox = fs::read_to_string(data_dir.join("outbox/requests.jsonl")).unwrap();
    let line: Value = serde_json::from_str(outbox.lines().next().unwrap()).unwrap();
    assert_eq!(line["path"], "/treinos/plano");
    assert_eq!(line["body"]["plano"].as_array().unwrap().len(), 4);
}

#[test]
fn test_plan_csv_export() {
    let temp_dir = setup_test_dir();
    let csv_path = temp_dir.path().join("plan.csv");

    cli()
        .args(["plan", "--days", "2", "--goal", "maintain", "--csv"])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 days"));

    let content = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(content.lines().count(), 3);
    assert!(content.contains("Day 2,Functional Training"));
}

#[test]
fn test_goal_queues_record() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .args(["goal", "--current", "70", "--target", "65,5", "--days", "90"])
        .args(["--height-cm", "175", "--age", "30", "--sex", "M"])
        .args(["--activity", "moderate"])
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Daily calories: 2056 kcal"));

    let outbox = fs::read_to_string(data_dir.join("outbox/requests.jsonl")).unwrap();
    let line: Value = serde_json::from_str(outbox.lines().next().unwrap()).unwrap();
    assert_eq!(line["path"], "/metas");
    assert_eq!(line["method"], "POST");
    assert_eq!(line["body"]["peso_atual"], 70.0);
    assert_eq!(line["body"]["peso_meta"], 65.5);
    assert_eq!(line["body"]["dias"], 90);
    assert_eq!(line["body"]["calorias_diarias"], 2056);

    cli()
        .arg("outbox")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 request(s) waiting"))
        .stdout(predicate::str::contains("/metas"));
}

#[test]
fn test_goal_rejects_unknown_sex() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["goal", "--current", "70", "--target", "65", "--days", "30"])
        .args(["--height-cm", "175", "--age", "30", "--sex", "x"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown sex"));

    assert!(!temp_dir.path().join("outbox/requests.jsonl").exists());
}

#[test]
fn test_empty_outbox() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("outbox")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Outbox is empty"));
}
