//! In-process tests for the check and init commands
//!
//! These tests change the current directory, so they run serially.

mod common;

use common::TestResult;
use regexcheck::cli::{CheckOptions, InitOutcome, run_check, run_init};
use regexcheck::config::{ColorOption, OutputFormat};
use serial_test::serial;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Runs `f` with the current directory set to a fresh temporary directory
fn with_temp_dir<F>(f: F) -> TestResult
where
    F: FnOnce(&Path) -> TestResult,
{
    let temp = TempDir::new()?;
    let original = std::env::current_dir()?;

    std::env::set_current_dir(temp.path())?;
    let result = f(temp.path());
    std::env::set_current_dir(original)?;
    result
}

fn quiet() -> CheckOptions {
    CheckOptions {
        color: Some(ColorOption::Never),
        format: Some(OutputFormat::Jsonl),
        ..CheckOptions::default()
    }
}

#[test]
#[serial]
fn test_init_then_check_empty_project() -> TestResult {
    with_temp_dir(|dir| {
        assert_eq!(
            run_init(dir, false)?,
            InitOutcome::Created(dir.join("regexcheck.toml"))
        );
        assert_eq!(run_check(&quiet()), 0);
        Ok(())
    })
}

#[test]
#[serial]
fn test_check_reports_errors_with_exit_1() -> TestResult {
    with_temp_dir(|dir| {
        fs::create_dir_all(dir.join("src"))?;
        fs::write(
            dir.join("src/lib.rs"),
            "#[regex]\npub const WORD: &str = r\"\\w+\";\n\n#[regex]\npub fn not_a_field() {}\n",
        )?;
        assert_eq!(run_check(&quiet()), 1);
        Ok(())
    })
}

#[test]
#[serial]
fn test_exclude_skips_generated_sources() -> TestResult {
    with_temp_dir(|dir| {
        fs::write(
            dir.join("regexcheck.toml"),
            "[regexcheck]\nversion = \"1\"\nlanguages = [\"java\"]\nexclude = [\"gen/**\"]\n",
        )?;
        fs::create_dir_all(dir.join("gen"))?;
        fs::write(
            dir.join("gen/Broken.java"),
            "class Broken { @Regex static final String P = \"(\"; }\n",
        )?;
        assert_eq!(run_check(&quiet()), 0);
        Ok(())
    })
}

#[test]
#[serial]
fn test_explicit_config_path() -> TestResult {
    with_temp_dir(|dir| {
        fs::create_dir_all(dir.join("conf"))?;
        fs::write(
            dir.join("conf/strict.toml"),
            "[regexcheck]\nversion = \"1\"\nlanguages = [\"java\"]\n\n[markers]\njava = \"Checked\"\n",
        )?;
        fs::write(
            dir.join("A.java"),
            "class A { @Checked static final String P = \"[\"; }\n",
        )?;

        let options = CheckOptions {
            config: Some(PathBuf::from("conf/strict.toml")),
            ..quiet()
        };
        assert_eq!(run_check(&options), 1);
        assert_eq!(run_check(&quiet()), 0);
        Ok(())
    })
}

#[test]
#[serial]
fn test_human_format_from_config() -> TestResult {
    with_temp_dir(|dir| {
        fs::write(
            dir.join("regexcheck.toml"),
            "[regexcheck]\nversion = \"1\"\nlanguages = [\"rust\"]\n\n[output]\nformat = \"human\"\ncolor = \"never\"\n",
        )?;
        fs::write(dir.join("main.rs"), "fn main() {}\n")?;
        assert_eq!(run_check(&CheckOptions::default()), 0);
        Ok(())
    })
}

#[test]
#[serial]
fn test_unparsable_config_exits_3() -> TestResult {
    with_temp_dir(|dir| {
        fs::write(dir.join("regexcheck.toml"), "languages = [")?;
        assert_eq!(run_check(&quiet()), 3);
        Ok(())
    })
}

#[test]
#[serial]
fn test_unreadable_source_is_skipped() -> TestResult {
    with_temp_dir(|dir| {
        fs::write(dir.join("binary.rs"), [0xff_u8, 0xfe, 0x00, 0x80])?;
        fs::write(
            dir.join("ok.rs"),
            "#[regex]\nconst DIGITS: &str = \"[0-9]+\";\n",
        )?;
        assert_eq!(run_check(&quiet()), 0);
        Ok(())
    })
}

#[test]
#[serial]
fn test_overlapping_relative_paths_check_each_file_once() -> TestResult {
    with_temp_dir(|dir| {
        fs::create_dir_all(dir.join("src"))?;
        fs::write(dir.join("src/lib.rs"), "#[regex]\nconst P: &str = \"[\";\n")?;

        let files = regexcheck::cli::common::discover_files(
            &[PathBuf::from("."), PathBuf::from("src")],
            &regexcheck::config::Config::default(),
        )?;
        assert_eq!(files.len(), 1);

        let options = CheckOptions {
            paths: vec![PathBuf::from("."), PathBuf::from("src")],
            ..quiet()
        };
        assert_eq!(run_check(&options), 1);
        Ok(())
    })
}
