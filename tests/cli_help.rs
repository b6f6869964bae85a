//! CLI help strings succeed.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn lhm_help() {
    Command::cargo_bin("lhm")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("set-address"));
}

#[test]
fn lhm_add_help() {
    Command::cargo_bin("lhm")
        .unwrap()
        .args(["add", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--disabled"));
}
