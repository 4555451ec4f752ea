// ABOUTME: Integration tests for the skoupa CLI.
// ABOUTME: Validates help output and configuration failure exit codes.

use assert_cmd::Command;
use predicates::prelude::*;

fn skoupa_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("skoupa"));
    // Keep the host environment from leaking into parsing tests.
    cmd.env_remove("GRACE_PERIOD").env_remove("AGGRESSIVE");
    cmd
}

#[test]
fn help_shows_flags() {
    skoupa_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--grace_period"))
        .stdout(predicate::str::contains("--aggressive"))
        .stdout(predicate::str::contains("--runtime"))
        .stdout(predicate::str::contains("--socket"));
}

#[test]
fn version_prints() {
    skoupa_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("skoupa"));
}

#[test]
fn rejects_malformed_grace_period_flag() {
    skoupa_cmd()
        .args(["-g", "fortnight"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("grace period"));
}

#[test]
fn rejects_grace_period_without_unit() {
    skoupa_cmd()
        .args(["--grace_period", "720"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("grace period"));
}

#[test]
fn rejects_malformed_grace_period_env() {
    skoupa_cmd()
        .env("GRACE_PERIOD", "12x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("grace period"));
}

#[test]
fn rejects_unknown_runtime() {
    skoupa_cmd()
        .args(["--runtime", "lxc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown runtime"));
}

#[test]
fn unreachable_socket_exits_nonzero() {
    skoupa_cmd()
        .args(["--socket", "/nonexistent/skoupa-test.sock"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unavailable"));
}

#[test]
fn unreachable_socket_reports_json_error_when_asked() {
    skoupa_cmd()
        .args(["--json", "--socket", "/nonexistent/skoupa-test.sock"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"event\":\"error\""));
}
