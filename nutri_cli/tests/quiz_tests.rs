//! Questionnaire tests driving `nutri quiz` over stdin.

use assert_cmd::Command;
use predicates::prelude::*;

/// Binary with config and data lookups pointed at an empty directory
fn cli() -> Command {
    let isolated = std::path::Path::new(env!("CARGO_TARGET_TMPDIR")).join("nutri-no-config");
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("nutri"));
    cmd.env("XDG_CONFIG_HOME", &isolated)
        .env("XDG_DATA_HOME", &isolated);
    cmd
}

/// Welcome, goal=lose, activity=moderate, diet=vegetarian+gluten free,
/// body=male 70 kg 175 cm 30 y, meals=three, no target weight
const FULL_RUN: &str = "\n1\n3\n2,5\n1\n70\n175\n30\n3\n\n";

#[test]
fn test_quiz_full_run() {
    cli()
        .arg("quiz")
        .write_stdin(FULL_RUN)
        .assert()
        .success()
        .stdout(predicate::str::contains("Step 7 of 7"))
        .stdout(predicate::str::contains("Questionnaire complete"))
        .stdout(predicate::str::contains("Goal: Lose"))
        .stdout(predicate::str::contains("Diet: vegetarian, gluten_free"))
        .stdout(predicate::str::contains("BMI: 22.9 (Normal weight)"))
        .stdout(predicate::str::contains("Daily calories: 2056 kcal"));
}

#[test]
fn test_quiz_back_from_first_step_cancels() {
    cli()
        .arg("quiz")
        .write_stdin("b\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Questionnaire cancelled"));
}

#[test]
fn test_quiz_blocks_without_selection() {
    // An invalid choice keeps the goal step open; input then runs out
    cli()
        .arg("quiz")
        .write_stdin("\n9\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ignoring unknown choice '9'"))
        .stdout(predicate::str::contains("Please complete this step"))
        .stdout(predicate::str::contains("Questionnaire cancelled"));
}

#[test]
fn test_quiz_back_keeps_answers() {
    // Pick gain, go back from the activity step, re-pick gain and carry on
    let input = "\n3\nb\n3\n3\n1\n1\n70\n175\n30\n3\n\n";
    cli()
        .arg("quiz")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Goal: Gain"))
        .stdout(predicate::str::contains("Questionnaire complete"));
}

#[test]
fn test_quiz_finish_without_target_weight() {
    // Final step advances even with its field left blank
    cli()
        .arg("quiz")
        .write_stdin(FULL_RUN)
        .assert()
        .success()
        .stdout(predicate::str::contains("Target weight:").not())
        .stdout(predicate::str::contains("Questionnaire complete"));
}
