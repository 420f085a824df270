use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn cycletrack_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("cycletrack"));
    cmd.env("HOME", home).env("USERPROFILE", home);
    cmd
}

#[test]
fn help_lists_the_board_surface() {
    let home = TempDir::new().expect("home");
    cycletrack_cmd(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("board"))
        .stdout(contains("dispatch"))
        .stdout(contains("preset"))
        .stdout(contains("daemon"));
}

#[test]
fn zero_duration_is_rejected_at_parse_time() {
    let home = TempDir::new().expect("home");
    cycletrack_cmd(home.path())
        .args(["configure", "0", "--name", "D1", "--duration", "0"])
        .assert()
        .failure()
        .stderr(contains("greater than zero"));
}

#[test]
fn out_of_range_components_are_rejected_at_parse_time() {
    let home = TempDir::new().expect("home");
    cycletrack_cmd(home.path())
        .args(["dispatch", "D1", "--duration", "1:75:00"])
        .assert()
        .failure()
        .stderr(contains("at most 59"));

    cycletrack_cmd(home.path())
        .args(["dispatch", "D1", "--duration", "100h"])
        .assert()
        .failure()
        .stderr(contains("exceeds 99"));
}

#[test]
fn garbage_duration_is_rejected_at_parse_time() {
    let home = TempDir::new().expect("home");
    cycletrack_cmd(home.path())
        .args(["preset", "add", "D1", "PN-1", "--duration", "soon"])
        .assert()
        .failure()
        .stderr(contains("duration"));
}

#[test]
fn configure_requires_name_and_duration() {
    let home = TempDir::new().expect("home");
    cycletrack_cmd(home.path())
        .args(["configure", "0"])
        .assert()
        .failure()
        .stderr(contains("--name"));
}
