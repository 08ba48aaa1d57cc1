use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn odds() -> Command {
    Command::cargo_bin("risk-odds").unwrap()
}

#[test]
fn json_report_has_every_field() {
    odds()
        .args(["--offense", "10", "--defense", "5", "--trials", "50", "--seed", "3", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"trials\": 50"))
        .stdout(predicate::str::contains("\"offense_wins\""))
        .stdout(predicate::str::contains("\"offense_win_rate\""))
        .stdout(predicate::str::contains("\"avg_rounds\""));
}

#[test]
fn text_report_is_readable() {
    odds()
        .args(["--offense", "8", "--defense", "3", "--trials", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("offense 8 vs defense 3 over 20 trials"))
        .stdout(predicate::str::contains("offense wins:"));
}

#[test]
fn troop_counts_are_required() {
    odds()
        .args(["--defense", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--offense is required"));
}

#[test]
fn zero_troops_are_rejected() {
    odds()
        .args(["--offense", "0", "--defense", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("troop counts must be positive"));
}

#[test]
fn config_file_with_flag_override() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "offense": 12, "defense": 4, "trials": 30, "seed": 9 }}"#).unwrap();

    odds()
        .arg("--config")
        .arg(file.path())
        .args(["--defense", "6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("offense 12 vs defense 6 over 30 trials (seed 9)"));
}

#[test]
fn same_seed_same_output() {
    let run = || {
        odds()
            .args(["--offense", "9", "--defense", "9", "--trials", "40", "--seed", "77", "--json"])
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run(), run());
}
