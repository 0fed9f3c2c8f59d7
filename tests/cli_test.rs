//! End-to-end tests for the deadlock-lens binary

use std::io::Write;
use std::process::{Command, Output, Stdio};

use pretty_assertions::assert_eq;
use serde_json::Value;

const ENV_VARS: &[&str] = &[
    "DEADLOCK_LENS_INPUT_FORMAT",
    "DEADLOCK_LENS_FORMAT",
    "DEADLOCK_LENS_QUIET",
    "DEADLOCK_LENS_ERROR_ON_DEADLOCK",
    "DEADLOCK_LENS_INPUT",
    "DEADLOCK_LENS_GRAPH_FORMAT",
    "DEADLOCK_LENS_OUTPUT",
    "DEADLOCK_LENS_HIGHLIGHT_DEADLOCK",
];

fn deadlock_lens() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_deadlock-lens"));
    for var in ENV_VARS {
        command.env_remove(var);
    }
    command
}

fn run_with_stdin(mut command: Command, stdin: &str) -> Output {
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_env_fallbacks_select_json_and_fail_on_deadlock() {
    let mut command = deadlock_lens();
    command
        .args(["check", "-q"])
        .env("DEADLOCK_LENS_FORMAT", "json")
        .env("DEADLOCK_LENS_ERROR_ON_DEADLOCK", "true");

    let output = run_with_stdin(command, "P1 -> P1\n");

    assert_eq!(output.status.code(), Some(1));
    let report = stdout_json(&output);
    assert_eq!(report["deadlocked"], 1);
    assert_eq!(report["snapshots"][0]["deadlock"], true);
    assert_eq!(report["snapshots"][0]["cycle"], serde_json::json!(["P1"]));
}

#[test]
fn test_error_on_deadlock_flag() {
    let mut command = deadlock_lens();
    command.args(["check", "-q", "--format", "json", "--error-on-deadlock"]);

    let output = run_with_stdin(command, "P1 -> P2\nP2 -> P3\nP3 -> P1\n");

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout_json(&output)["snapshots"][0]["cycle"],
        serde_json::json!(["P1", "P2", "P3"])
    );
}

#[test]
fn test_clear_snapshot_exits_zero() {
    let mut command = deadlock_lens();
    command.args(["check", "-q", "--format", "json", "--error-on-deadlock"]);

    let output = run_with_stdin(command, "A -> B\nB -> C\n");

    assert_eq!(output.status.code(), Some(0));
    let report = stdout_json(&output);
    assert_eq!(report["deadlocked"], 0);
    assert_eq!(report["snapshots"][0]["deadlock"], false);
}

#[test]
fn test_deadlock_without_flag_exits_zero() {
    let mut command = deadlock_lens();
    command.args(["check", "-q", "--format", "json"]);

    let output = run_with_stdin(command, "P1 -> P1\n");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_json(&output)["deadlocked"], 1);
}

#[test]
fn test_missing_input_fails() {
    let temp = tempfile::tempdir().unwrap();
    let missing = temp.path().join("nonexistent.wfg");

    let output = deadlock_lens()
        .args(["check", "-q", "--format", "json", "--error-on-deadlock"])
        .arg(&missing)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No snapshots found"));
}

#[test]
fn test_graph_format_from_env() {
    let mut command = deadlock_lens();
    command
        .args(["graph", "-q"])
        .env("DEADLOCK_LENS_GRAPH_FORMAT", "mermaid");

    let output = run_with_stdin(command, "writer -> reader\nreader -> writer\n");

    assert!(output.status.success());
    let diagram = String::from_utf8_lossy(&output.stdout);
    assert!(diagram.starts_with("graph LR"));
    assert!(diagram.contains("Deadlock: reader -> writer -> reader"));
}
