//! Common test utilities for plumbline integration tests.
//!
//! Provides `TestEnv` for isolated test environments that never read the
//! user's `~/.config/plumbline/config.kdl`.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
pub use tempfile::TempDir;

/// A test environment with isolated working and home directories.
///
/// - `work_dir`: current directory of the command (project config lives here)
/// - `home_dir`: stands in for `$HOME` and `$XDG_CONFIG_HOME`
///
/// The `plumb()` method sets both per-invocation, making tests parallel-safe.
pub struct TestEnv {
    pub work_dir: TempDir,
    pub home_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            work_dir: TempDir::new().unwrap(),
            home_dir: TempDir::new().unwrap(),
        }
    }

    /// Get a Command for the plumb binary with isolated directories.
    pub fn plumb(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_plumb"));
        cmd.current_dir(self.work_dir.path());
        cmd.env("HOME", self.home_dir.path());
        cmd.env("XDG_CONFIG_HOME", self.home_dir.path().join(".config"));
        cmd.env_remove("PLUMB_SUBMIT_URL");
        cmd.env_remove("PLUMB_CONFIG");
        cmd.env_remove("PLUMB_LOG");
        cmd
    }

    pub fn path(&self) -> &Path {
        self.work_dir.path()
    }

    /// Write a state file into the working directory and return its path.
    pub fn write_state(&self, name: &str, state: &serde_json::Value) -> PathBuf {
        let path = self.work_dir.path().join(name);
        std::fs::write(&path, serde_json::to_string_pretty(state).unwrap()).unwrap();
        path
    }

    /// Write the project config file.
    pub fn write_project_config(&self, content: &str) {
        let dir = self.work_dir.path().join(".plumbline");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.kdl"), content).unwrap();
    }

    /// Write the user-level config file.
    pub fn write_system_config(&self, content: &str) {
        let dir = self.home_dir.path().join(".config").join("plumbline");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.kdl"), content).unwrap();
    }

    pub fn read_state(&self, name: &str) -> serde_json::Value {
        let content = std::fs::read_to_string(self.work_dir.path().join(name)).unwrap();
        serde_json::from_str(&content).unwrap()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a command's stdout as JSON.
pub fn parse_json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).unwrap()
}
