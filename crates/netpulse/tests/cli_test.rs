//! Integration tests for the `netpulse` CLI binary.
//!
//! These validate argument parsing, help output, shell completions, and
//! config handling — all without requiring a reachable telemetry store.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `netpulse` binary with env isolation.
///
/// Points config directories at a throwaway path so tests never touch
/// the user's real configuration slot.
fn netpulse_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("netpulse");
    cmd.env("HOME", "/tmp/netpulse-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/netpulse-cli-test-nonexistent")
        .env_remove("NETPULSE_API_URL")
        .env_remove("NETPULSE_API_KEY");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = netpulse_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    netpulse_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("dashboard")
            .and(predicate::str::contains("hosts"))
            .and(predicate::str::contains("scan"))
            .and(predicate::str::contains("summary"))
            .and(predicate::str::contains("config")),
    );
}

#[test]
fn test_version_flag() {
    netpulse_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("netpulse"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    netpulse_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    netpulse_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = netpulse_cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_invalid_output_format() {
    let output = netpulse_cmd()
        .args(["--output", "yaml", "hosts"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("possible values"),
        "Expected error about valid output formats:\n{text}"
    );
}

// ── Config handling ─────────────────────────────────────────────────

#[test]
fn test_config_show_without_slot_renders_defaults() {
    // `config show` uses load_config_or_default() so it succeeds even
    // when no slot file exists — it renders the built-in defaults.
    netpulse_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("192.168.1.0/24")
                .and(predicate::str::contains("scan_interval")),
        );
}

#[test]
fn test_config_add_subnet_rejects_bad_cidr() {
    let output = netpulse_cmd()
        .args(["config", "add-subnet", "999.1.1.1/24"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected usage exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("octet") || text.contains("Invalid"),
        "Expected validation message:\n{text}"
    );
}

#[test]
fn test_config_add_subnet_rejects_bad_prefix() {
    netpulse_cmd()
        .args(["config", "add-subnet", "192.168.1.0/33"])
        .assert()
        .failure();
}

#[test]
fn test_config_set_interval_rejects_out_of_bounds() {
    netpulse_cmd()
        .args(["config", "set-interval", "301"])
        .assert()
        .failure();
    netpulse_cmd()
        .args(["config", "set-interval", "4"])
        .assert()
        .failure();
}

// ── Subcommand help discovery ───────────────────────────────────────

#[test]
fn test_hosts_flags_exist() {
    netpulse_cmd()
        .args(["hosts", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--sort")
                .and(predicate::str::contains("--desc"))
                .and(predicate::str::contains("--filter")),
        );
}

#[test]
fn test_config_subcommands_exist() {
    netpulse_cmd()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("show")
                .and(predicate::str::contains("add-subnet"))
                .and(predicate::str::contains("remove-subnet"))
                .and(predicate::str::contains("set-interval")),
        );
}
