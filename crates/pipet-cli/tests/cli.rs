// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Integration tests for `pipet check` and `pipet types`.
//! Each test runs the binary on a program document fixture.

use std::path::{Path, PathBuf};
use std::process::Command;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Run pipet with colors off, returning (stdout, stderr, exit code).
fn pipet(args: &[&str], fixture_name: &str) -> (String, String, i32) {
    let out = Command::new(env!("CARGO_BIN_EXE_pipet"))
        .args(args)
        .arg(fixture(fixture_name))
        .env("NO_COLOR", "1")
        .env_remove("PIPET_LOG")
        .output()
        .expect("failed to run pipet");
    (
        String::from_utf8_lossy(&out.stdout).into_owned(),
        String::from_utf8_lossy(&out.stderr).into_owned(),
        out.status.code().unwrap_or(-1),
    )
}

#[test]
fn check_reports_root_type() {
    let (stdout, stderr, code) = pipet(&["check"], "broadcast.json");
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.contains("[Int]"), "stdout: {}", stdout);
    assert!(stdout.contains("Check OK"), "stdout: {}", stdout);
}

#[test]
fn check_reports_mismatch() {
    let (_, stderr, code) = pipet(&["check"], "mismatch.json");
    assert_eq!(code, 1);
    assert!(stderr.contains("error[E0301]: cannot apply `File -> Int`"), "{}", stderr);
    assert!(stderr.contains("expected `File`, found `Bool`"), "{}", stderr);
    assert!(stderr.contains("Check FAILED: 1 error"), "{}", stderr);
}

#[test]
fn check_reports_untyped_symbol() {
    let (_, stderr, code) = pipet(&["check"], "untyped.json");
    assert_eq!(code, 1);
    assert!(stderr.contains("error[E0300]: symbol `out` has no type"), "{}", stderr);
    // The pipe itself is not reported again.
    assert!(!stderr.contains("E0301"), "{}", stderr);
}

#[test]
fn unresolved_names_stop_before_analysis() {
    let (stdout, stderr, code) = pipet(&["check", "--format", "json"], "undefined.json");
    assert_eq!(code, 1, "stderr: {}", stderr);
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["phase"], "resolve");
    assert_eq!(report["success"], false);
    assert_eq!(report["diagnostics"][0]["code"], "E0200");
    assert_eq!(report["diagnostics"][0]["location"]["column"], 9);
}

#[test]
fn list_policy_flag_changes_the_verdict() {
    let (stdout, _, code) = pipet(&["check"], "mixed_list.json");
    assert_eq!(code, 0);
    assert!(stdout.contains("[Int]"), "stdout: {}", stdout);

    let (stdout, _, code) = pipet(&["check", "--unify-lists", "--json"], "mixed_list.json");
    assert_eq!(code, 1);
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["phase"], "types");
    assert_eq!(report["error_count"], 1);
    assert_eq!(report["diagnostics"][0]["code"], "E0302");
    assert_eq!(report["diagnostics"][0]["category"], "Type");
}

#[test]
fn types_marks_broadcast_nodes() {
    let (stdout, stderr, code) = pipet(&["types"], "broadcast.json");
    assert_eq!(code, 0, "stderr: {}", stderr);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 5, "stdout: {}", stdout);
    assert!(lines[0].contains("pipe application"), "{}", lines[0]);
    assert!(lines[0].ends_with("[Int] (broadcast)"), "{}", lines[0]);
    assert!(lines[1].ends_with("[File]"), "{}", lines[1]);
    assert!(lines[4].ends_with("File -> Int"), "{}", lines[4]);
}

#[test]
fn types_as_json() {
    let (stdout, _, code) = pipet(&["types", "--format", "json"], "broadcast.json");
    assert_eq!(code, 0);
    let rows: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(rows[0]["type"], "[Int]");
    assert_eq!(rows[0]["broadcast"], true);
    assert_eq!(rows[2]["kind"], "file literal");
    assert_eq!(rows[2]["broadcast"], false);
}

#[test]
fn bad_type_notation_suggests_a_fix() {
    let (_, stderr, code) = pipet(&["check"], "bad_type.json");
    assert_eq!(code, 1);
    assert!(stderr.contains("error[E0304]"), "{}", stderr);
    assert!(stderr.contains("did you mean `File`?"), "{}", stderr);
    assert!(stderr.contains("in the declared type of `out`"), "{}", stderr);
}

#[test]
fn missing_file_is_reported() {
    let (_, stderr, code) = pipet(&["check"], "does-not-exist.json");
    assert_eq!(code, 1);
    assert!(stderr.contains("error: cannot read"), "{}", stderr);
}

#[test]
fn unknown_option_is_a_usage_error() {
    let (_, stderr, code) = pipet(&["check", "--frobnicate"], "broadcast.json");
    assert_eq!(code, 2);
    assert!(stderr.contains("unknown option: --frobnicate"), "{}", stderr);
}
