//! CLI integration tests running the built binary
//!
//! Every test works in its own temporary directory, so the binary's working
//! directory is set per command instead of changing the test process's.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const JAVA_ONLY_CONFIG: &str = r#"
[regexcheck]
version = "1"
languages = ["java"]
include = ["src/**"]
"#;

const BAD_JAVA: &str = r#"final class Patterns {
  @Regex final static String BAD_REGEX = "abc[";
}
"#;

const GOOD_JAVA: &str = r#"final class Patterns {
  @Regex final static String GOOD_REGEX = "abc[a-z]+";
}
"#;

fn regexcheck(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("regexcheck").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

fn project(config: &str, java: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("regexcheck.toml"), config).unwrap();
    fs::create_dir_all(temp.path().join("src")).unwrap();
    fs::write(temp.path().join("src/Patterns.java"), java).unwrap();
    temp
}

#[test]
fn test_help_lists_commands() {
    let temp = TempDir::new().unwrap();
    regexcheck(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn test_init_writes_config_once() {
    let temp = TempDir::new().unwrap();

    regexcheck(temp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));
    assert!(temp.path().join("regexcheck.toml").exists());

    regexcheck(temp.path())
        .arg("init")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));

    regexcheck(temp.path())
        .args(["init", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Overwrote"));
}

#[test]
fn test_check_passes_on_valid_patterns() {
    let temp = project(JAVA_ONLY_CONFIG, GOOD_JAVA);
    regexcheck(temp.path())
        .args(["check", "--color", "never"])
        .assert()
        .code(0)
        .stderr(predicate::str::contains("Check PASSED"))
        .stderr(predicate::str::contains("1 marked declaration"));
}

#[test]
fn test_check_fails_on_invalid_pattern() {
    let temp = project(JAVA_ONLY_CONFIG, BAD_JAVA);
    regexcheck(temp.path())
        .args(["check", "--color", "never"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[invalid-regex-syntax]"))
        .stderr(predicate::str::contains("Invalid regular expression: "))
        .stderr(predicate::str::contains("Patterns.java:2:30"))
        .stderr(predicate::str::contains("Check FAILED"));
}

#[test]
fn test_warning_does_not_fail_the_run() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("flags.rs"),
        "#[regex]\nconst ALIAS: &str = FLAG;\nconst FLAG: bool = true;\n",
    )
    .unwrap();

    regexcheck(temp.path())
        .args(["check", "--color", "never"])
        .assert()
        .code(0)
        .stderr(predicate::str::contains("warning[unexpected-constant-type]"))
        .stderr(predicate::str::contains("0 errors, 1 warning"));
}

#[test]
fn test_jsonl_output_on_stdout() {
    let temp = project(JAVA_ONLY_CONFIG, BAD_JAVA);
    let output = regexcheck(temp.path())
        .args(["check", "--format", "jsonl"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).unwrap();
    let records: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["type"], "diagnostic");
    assert_eq!(records[0]["code"], "invalid-regex-syntax");
    assert_eq!(records[0]["symbol"], "BAD_REGEX");
    assert_eq!(records[0]["line"], 2);
    assert_eq!(records[1]["type"], "status");
    assert_eq!(records[1]["passed"], false);
    assert_eq!(records[1]["errors"], 1);
    assert_eq!(records[1]["files_checked"], 1);
}

#[test]
fn test_custom_marker_from_config() {
    let config = r#"
[regexcheck]
version = "1"
languages = ["java"]

[markers]
java = "Pattern"
"#;
    let java = r#"final class Patterns {
  @Pattern static String LOOSE = "a";
  @Regex static String IGNORED = "(";
}
"#;
    let temp = project(config, java);
    regexcheck(temp.path())
        .args(["check", "--color", "never"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "@Pattern can only be used on a final string",
        ))
        .stderr(predicate::str::contains("IGNORED").not());
}

#[test]
fn test_rust_sources_are_checked() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("lib.rs"),
        "#[regex]\nstatic mut PATTERN: &str = \"a+\";\n",
    )
    .unwrap();

    regexcheck(temp.path())
        .args(["check", "--color", "never"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[wrong-modifier]"))
        .stderr(predicate::str::contains(
            "#[regex] can only be used on a final string",
        ));
}

#[test]
fn test_explicit_paths_limit_the_walk() {
    let temp = project(JAVA_ONLY_CONFIG, BAD_JAVA);
    fs::create_dir_all(temp.path().join("src/clean")).unwrap();
    fs::write(temp.path().join("src/clean/Clean.java"), GOOD_JAVA).unwrap();

    regexcheck(temp.path())
        .args(["check", "--color", "never", "src/clean"])
        .assert()
        .code(0);
}

#[test]
fn test_overlapping_paths_report_once() {
    let temp = project(JAVA_ONLY_CONFIG, BAD_JAVA);
    let output = regexcheck(temp.path())
        .args(["check", "--format", "jsonl", ".", "src"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).unwrap();
    let status: serde_json::Value = serde_json::from_str(stdout.lines().last().unwrap()).unwrap();
    assert_eq!(status["errors"], 1);
    assert_eq!(status["files_checked"], 1);
}

#[test]
fn test_invalid_toml_exits_3() {
    let temp = project("[regexcheck\nversion = ", GOOD_JAVA);
    regexcheck(temp.path())
        .arg("check")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Invalid configuration syntax"));
}

#[test]
fn test_invalid_config_value_exits_2() {
    let temp = project(
        "[regexcheck]\nversion = \"7\"\nlanguages = [\"java\"]\n",
        GOOD_JAVA,
    );
    regexcheck(temp.path())
        .arg("check")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unsupported configuration version"));
}

#[test]
fn test_missing_explicit_config_exits_2() {
    let temp = TempDir::new().unwrap();
    regexcheck(temp.path())
        .args(["check", "--config", "nowhere.toml"])
        .assert()
        .code(2);
}

#[test]
fn test_verbose_logs_to_stderr() {
    let temp = project(JAVA_ONLY_CONFIG, GOOD_JAVA);
    regexcheck(temp.path())
        .args(["check", "--verbose", "--format", "jsonl"])
        .assert()
        .code(0)
        .stderr(predicate::str::contains("discovered source files"))
        .stdout(predicate::str::contains("\"type\":\"status\""));
}
