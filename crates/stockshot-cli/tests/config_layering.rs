//! Integration tests for configuration layering.
//!
//! Tests the full priority chain: built-in defaults < XDG config < project config < CLI args

#![allow(clippy::unwrap_used)] // Test code uses unwrap for brevity
#![allow(deprecated)] // cargo_bin deprecation warning

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use stockshot_test_support::SyntheticImageBuilder;
use tempfile::TempDir;

struct Sandbox {
    root: TempDir,
    image: PathBuf,
}

impl Sandbox {
    fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let image = root.path().join("flat.png");
        SyntheticImageBuilder::uniform_gray(32, 32, 100)
            .to_rgba_image()
            .save(&image)
            .unwrap();
        fs::create_dir_all(root.path().join("project")).unwrap();
        Self { root, image }
    }

    fn project(&self) -> PathBuf {
        self.root.path().join("project")
    }

    fn write_project_config(&self, content: &str) {
        fs::write(self.project().join(".stockshot.toml"), content).unwrap();
    }

    fn write_xdg_config(&self, content: &str) {
        let dir = self.root.path().join("xdg").join("stockshot");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.toml"), content).unwrap();
    }

    fn command(&self) -> Command {
        let home: &Path = self.root.path();
        let mut cmd = Command::cargo_bin("stockshot").unwrap();
        cmd.current_dir(self.project())
            .env("HOME", home)
            .env("XDG_CONFIG_HOME", home.join("xdg"))
            .arg(&self.image);
        cmd
    }
}

#[test]
fn test_project_config_applies_format() {
    let sandbox = Sandbox::new();
    sandbox.write_project_config(
        r"
[output]
format = 'json'
",
    );

    sandbox
        .command()
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("["));
}

#[test]
fn test_cli_overrides_project_config() {
    let sandbox = Sandbox::new();
    sandbox.write_project_config(
        r"
[output]
format = 'json'
",
    );

    sandbox
        .command()
        .arg("--format")
        .arg("jsonl")
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("{"));
}

#[test]
fn test_project_config_found_in_parent_directory() {
    let sandbox = Sandbox::new();
    sandbox.write_project_config(
        r"
[output]
format = 'json'
",
    );
    let nested = sandbox.project().join("deep").join("er");
    fs::create_dir_all(&nested).unwrap();

    sandbox
        .command()
        .current_dir(&nested)
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("["));
}

#[test]
fn test_xdg_config_applies() {
    let sandbox = Sandbox::new();
    sandbox.write_xdg_config(
        r"
[output]
format = 'json'
pretty = true
",
    );

    sandbox
        .command()
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("[\n"));
}

#[test]
fn test_project_config_overrides_xdg() {
    let sandbox = Sandbox::new();
    sandbox.write_xdg_config(
        r"
[output]
format = 'json'
",
    );
    sandbox.write_project_config(
        r"
[output]
format = 'jsonl'
",
    );

    sandbox
        .command()
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("{"));
}

#[test]
fn test_out_of_range_config_value_warns_and_is_ignored() {
    let sandbox = Sandbox::new();
    sandbox.write_project_config(
        r"
[gate]
min_score = 500.0
",
    );

    sandbox
        .command()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("gate.min_score must be 0-100"));
}

#[test]
fn test_oversized_max_points_is_ignored() {
    let sandbox = Sandbox::new();
    sandbox.write_project_config(
        r"
[saliency]
max_points = 9223372036854775807
",
    );

    sandbox
        .command()
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"score\""))
        .stderr(predicate::str::contains("saliency.max_points must be 1-1000"));
}

#[test]
fn test_malformed_config_falls_back_to_defaults() {
    let sandbox = Sandbox::new();
    sandbox.write_project_config("[output\nformat = 'json'\n");

    sandbox
        .command()
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("{"))
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_config_recursive_applies() {
    let sandbox = Sandbox::new();
    let nested = sandbox.project().join("shots").join("day1");
    fs::create_dir_all(&nested).unwrap();
    fs::copy(&sandbox.image, nested.join("inner.png")).unwrap();
    sandbox.write_project_config(
        r"
[general]
recursive = true
",
    );

    let home = sandbox.root.path();
    let mut cmd = Command::cargo_bin("stockshot").unwrap();
    cmd.current_dir(sandbox.project())
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("xdg"))
        .arg(sandbox.project().join("shots"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("inner.png"));
}
