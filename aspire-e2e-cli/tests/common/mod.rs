//! Common test utilities for CLI integration tests.
//!
//! Every command runs against a temporary global file (via `--config-path`)
//! and a temporary repository (via `--working-dir`), so the real
//! `~/.aspire-e2e` is never read or written.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with an isolated global file and repository.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path of the global configuration file (not created yet)
    pub global_path: PathBuf,
    /// Repository root containing a `.git` directory
    pub repo: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let global_path = temp_dir.path().join("home").join("resources.json");
        let repo = temp_dir.path().join("repo");
        fs::create_dir_all(repo.join(".git")).expect("Failed to create repo");

        Self {
            temp_dir,
            global_path,
            repo,
        }
    }

    /// Get a bare command builder without pre-configured flags.
    ///
    /// Environment variables that would leak host configuration into the
    /// test are removed.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("aspire-e2e").expect("Failed to find aspire-e2e binary");
        cmd.env_remove("ASPIRE_E2E_CONFIG_PATH")
            .env_remove("ASPIRE_E2E_LOG_MODE");
        cmd
    }

    /// Get a command builder pointed at this environment's files.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--config-path")
            .arg(&self.global_path)
            .arg("--working-dir")
            .arg(&self.repo);
        cmd
    }

    /// Run a command expected to succeed and return its trimmed stdout.
    pub fn run(&self, args: &[&str]) -> String {
        let output = self.command().args(args).output().expect("Failed to run");
        assert!(
            output.status.success(),
            "{args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout)
            .expect("Invalid UTF-8 in output")
            .trim()
            .to_string()
    }

    /// Create a resource with the given extra `update` flags.
    pub fn add_resource(&self, id: &str, flags: &[&str]) {
        let mut args = vec!["update", id, "--create"];
        args.extend_from_slice(flags);
        self.run(&args);
    }

    /// Write the local layer at the repository root.
    pub fn write_local(&self, json: &str) {
        fs::write(self.repo.join("e2e-resources.json"), json).expect("Failed to write local");
    }

    /// Write a file under the temp directory and return its path.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, contents).expect("Failed to write file");
        path
    }

    /// The global file parsed as JSON.
    pub fn global_json(&self) -> serde_json::Value {
        let text = fs::read_to_string(&self.global_path).expect("Global file missing");
        serde_json::from_str(&text).expect("Global file is not JSON")
    }

    /// Repository root.
    pub fn repo(&self) -> &Path {
        &self.repo
    }
}
