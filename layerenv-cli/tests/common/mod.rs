//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with a temporary working directory
//! - Command builder helpers that isolate the CLI from the caller's settings
//! - `.env` and options file fixtures

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables read by the CLI itself.
const CLI_VARS: [&str; 3] = [
    "LAYERENV_ENV_FILE",
    "LAYERENV_LOG_MODE",
    "LAYERENV_OUTPUT_FORMAT",
];

/// Test environment with an isolated working directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            temp_path,
        }
    }

    /// Get a bare command builder without pre-configured settings.
    pub fn command_bare(&self) -> Command {
        Command::cargo_bin("layerenv").expect("Failed to find layerenv binary")
    }

    /// Get a command builder running inside the temporary directory.
    ///
    /// CLI-specific environment variables are removed so the caller's shell
    /// settings can't leak into the test.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.current_dir(&self.temp_path);
        for var in CLI_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write `contents` to `name` inside the temporary directory.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Write the default `.env` file in the working directory.
    pub fn write_dotenv(&self, contents: &str) -> PathBuf {
        self.write_file(".env", contents)
    }

    /// Run `show --format json` with extra arguments and parse the output.
    ///
    /// # Panics
    /// Panics if the command fails or doesn't print a JSON object.
    pub fn show_json(&self, args: &[&str]) -> serde_json::Map<String, serde_json::Value> {
        let output = self
            .command()
            .args(args)
            .arg("show")
            .arg("--format")
            .arg("json")
            .output()
            .expect("Failed to run show command");

        assert!(
            output.status.success(),
            "show failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        serde_json::from_slice(&output.stdout).expect("Output is not a JSON object")
    }
}
