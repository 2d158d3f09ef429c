//! CLI integration tests.
//!
//! Uses `assert_cmd` to spawn the `cisp` binary and verify exit codes,
//! stdout content, and stderr content. Source files are written into a
//! fresh temporary directory per test.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper: create a Command for the `cisp` binary with logging disabled.
fn cisp() -> Command {
    let mut cmd = cargo_bin_cmd!("cisp");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Writes `source` to `name` inside `dir`, returning the full path.
fn write_source(dir: &TempDir, name: &str, source: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, source).expect("write source file");
    path
}

// ──────────────────────────────────────────────
// 1. Help and arguments
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    cisp()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Run CISP rule files"));
}

#[test]
fn no_files_is_a_usage_error() {
    cisp().assert().failure().stderr(predicate::str::contains("Usage"));
}

// ──────────────────────────────────────────────
// 2. Running programs
// ──────────────────────────────────────────────

#[test]
fn runs_main_and_reports_its_result() {
    let dir = TempDir::new().unwrap();
    let file = write_source(&dir, "calc.cisp", "main { print: \"hi\"; @return 1 + 2 * 3; }");

    cisp()
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains(">> Executing:"))
        .stdout(predicate::str::contains("calc.cisp"))
        .stdout(predicate::str::contains("hi\n"))
        .stdout(predicate::str::contains("main returned 7 in"));
}

#[test]
fn quiet_prints_only_program_output() {
    let dir = TempDir::new().unwrap();
    let file = write_source(&dir, "hello.cisp", "main { print: \"hello\"; }");

    cisp()
        .arg("--quiet")
        .arg(&file)
        .assert()
        .success()
        .stdout("hello\n");
}

#[test]
fn files_run_in_order() {
    let dir = TempDir::new().unwrap();
    let first = write_source(&dir, "a.cisp", "main { print: \"first\"; }");
    let second = write_source(&dir, "b.cisp", "main { print: \"second\"; }");

    cisp()
        .arg("--quiet")
        .arg(&first)
        .arg(&second)
        .assert()
        .success()
        .stdout("first\nsecond\n");
}

// ──────────────────────────────────────────────
// 3. Errors
// ──────────────────────────────────────────────

#[test]
fn runtime_error_renders_a_diagnostic_and_exits_1() {
    let dir = TempDir::new().unwrap();
    let file = write_source(&dir, "bad.cisp", "main {\n    @return 1 + \"a\";\n}\n");

    cisp()
        .arg("--quiet")
        .arg(&file)
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "error[E_TYPE]: 2:13 invalid types for +: int and string",
        ))
        .stderr(predicate::str::contains("bad.cisp:2:13"))
        .stderr(predicate::str::contains("@return 1 + \"a\";"));
}

#[test]
fn error_stops_later_files() {
    let dir = TempDir::new().unwrap();
    let bad = write_source(&dir, "bad.cisp", "main { @else { } }");
    let good = write_source(&dir, "good.cisp", "main { print: \"never\"; }");

    cisp()
        .arg("--quiet")
        .arg(&bad)
        .arg(&good)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("never").not())
        .stderr(predicate::str::contains("E_CONTROL_FLOW"));
}

#[test]
fn parse_error_shows_help() {
    let dir = TempDir::new().unwrap();
    let file = write_source(&dir, "lex.cisp", "main { --x: 1 & 2; }");

    cisp()
        .arg(&file)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[E_LEX]"))
        .stderr(predicate::str::contains("help: did you mean `&&`?"));
}

#[test]
fn unreadable_file_is_reported_and_skipped() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.cisp");
    let good = write_source(&dir, "good.cisp", "main { print: \"still runs\"; }");

    cisp()
        .arg("--quiet")
        .arg(&missing)
        .arg(&good)
        .assert()
        .code(1)
        .stdout("still runs\n")
        .stderr(predicate::str::contains("cannot read"));
}

// ──────────────────────────────────────────────
// 4. --emit
// ──────────────────────────────────────────────

#[test]
fn emit_tokens_prints_json() {
    let dir = TempDir::new().unwrap();
    let file = write_source(&dir, "t.cisp", "main { }");

    let output = cisp().arg("--emit").arg("tokens").arg(&file).output().unwrap();
    assert!(output.status.success());

    let tokens: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let kinds: Vec<&str> = tokens
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["kind"].as_str().unwrap())
        .collect();

    assert_eq!(kinds, ["Identifier", "LBrace", "RBrace", "Eof"]);
}

#[test]
fn emit_ast_prints_json_without_running() {
    let dir = TempDir::new().unwrap();
    let file = write_source(&dir, "t.cisp", "main { print: \"not run\"; }");

    let output = cisp().arg("--emit").arg("ast").arg(&file).output().unwrap();
    assert!(output.status.success());

    let ast: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rule = &ast["items"][0];

    assert_eq!(rule["kind"], "Rule");
    assert_eq!(rule["selector"]["name"]["name"], "main");
    assert_eq!(rule["body"][0]["kind"], "Declaration");
}
