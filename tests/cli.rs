#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn cli() -> Command {
    Command::cargo_bin("cardio-roster").unwrap()
}

#[test]
fn seed_then_solve_and_check_coverage() {
    let dir = tempdir().unwrap();
    cli().current_dir(dir.path()).arg("seed").assert().success();
    assert!(dir.path().join("snapshot.json").exists());
    assert!(dir.path().join("rules.json").exists());

    cli()
        .current_dir(dir.path())
        .args(["solve", "--out-json", "schedule.json", "--out-csv", "assignments.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 gap(s)"));
    assert!(dir.path().join("schedule.json").exists());
    assert!(dir.path().join("assignments.csv").exists());

    cli()
        .current_dir(dir.path())
        .arg("coverage")
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: no coverage gaps"));
}

#[test]
fn coverage_exits_with_code_2_on_gaps() {
    let dir = tempdir().unwrap();
    cli().current_dir(dir.path()).arg("seed").assert().success();

    cli()
        .current_dir(dir.path())
        .args(["coverage", "--rules", "missing-rules.json", "--end", "2026-01-09"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("WTH_APN (10 gap(s))"));
}

#[test]
fn vacations_and_import() {
    let dir = tempdir().unwrap();
    cli().current_dir(dir.path()).arg("seed").assert().success();

    cli()
        .current_dir(dir.path())
        .args(["vacations", "--week-start", "2026-02-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("JOO — M–F"));

    fs::write(
        dir.path().join("extra.csv"),
        "provider,start_date,end_date\nRAM,2026-03-10,2026-03-11\n",
    )
    .unwrap();
    cli()
        .current_dir(dir.path())
        .args(["import-vacations", "--csv", "extra.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 vacation request(s)"));

    cli()
        .current_dir(dir.path())
        .args(["vacations", "--week-start", "2026-03-09"])
        .assert()
        .success()
        .stdout(predicate::str::contains("RAM — T–W"));
}

#[test]
fn solve_without_snapshot_fails() {
    let dir = tempdir().unwrap();
    cli()
        .current_dir(dir.path())
        .arg("solve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cardio-roster seed"));
}
