//! Test harness utilities for running the `testbed` binary and inspecting
//! its output.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde::de::DeserializeOwned;
use testbed_settings::SettingKey;

use crate::fixtures::SettingsTree;

/// Result of running the testbed CLI.
#[derive(Debug)]
pub struct CliResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Create a CliResult from a Command Output.
    pub fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Assert that the command succeeded.
    #[track_caller]
    pub fn assert_success(&self) {
        assert!(
            self.success,
            "Command failed with exit code {}.\nstdout: {}\nstderr: {}",
            self.exit_code, self.stdout, self.stderr
        );
    }

    /// Assert that the command failed with exit code 1.
    #[track_caller]
    pub fn assert_failure(&self) {
        assert!(
            !self.success,
            "Expected command to fail, but it succeeded.\nstdout: {}",
            self.stdout
        );
        assert_eq!(self.exit_code, 1, "stderr: {}", self.stderr);
    }

    /// Parse stdout as JSON.
    #[track_caller]
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_str(&self.stdout).unwrap_or_else(|e| {
            panic!(
                "stdout is not the expected JSON: {}\nstdout: {}\nstderr: {}",
                e, self.stdout, self.stderr
            )
        })
    }
}

/// A test harness for running testbed CLI commands against a settings tree.
pub struct TestHarness {
    /// Settings files the commands run against.
    pub tree: SettingsTree,
    binary: PathBuf,
}

impl TestHarness {
    /// Create a new test harness for the binary at `binary`.
    ///
    /// Integration tests of the CLI crate pass `env!("CARGO_BIN_EXE_testbed")`.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            tree: SettingsTree::new(),
            binary: binary.into(),
        }
    }

    /// Get the working directory path.
    pub fn path(&self) -> &Path {
        self.tree.path()
    }

    /// Run the CLI with the given arguments in the tree root.
    ///
    /// `TESTBED_*` variables and `RUST_LOG` from the outer environment are
    /// removed so results do not depend on the machine running the tests.
    pub fn run_cli(&self, args: &[&str]) -> CliResult {
        self.run_cli_with_env(args, &[])
    }

    /// Run the CLI with extra environment variables.
    pub fn run_cli_with_env(&self, args: &[&str], envs: &[(&str, &str)]) -> CliResult {
        let mut command = Command::new(&self.binary);
        command
            .args(args)
            .current_dir(self.path())
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        for key in SettingKey::all() {
            command.env_remove(key.env_var());
        }
        command.envs(envs.iter().copied());

        match command.output() {
            Ok(out) => CliResult::from_output(out),
            Err(e) => CliResult {
                success: false,
                exit_code: -1,
                stdout: String::new(),
                stderr: format!("Failed to run CLI: {}", e),
            },
        }
    }

    /// Run `resolve --json` starting from the directory at `rel`.
    pub fn resolve_json(&self, rel: &str) -> CliResult {
        let dir = self.tree.dir(rel);
        self.run_cli(&[
            "resolve",
            "--dir",
            dir.to_str().expect("temp path is UTF-8"),
            "--file-name",
            self.tree.file_name(),
            "--json",
        ])
    }
}
