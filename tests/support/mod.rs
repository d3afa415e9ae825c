//! Test support utilities for stackplan integration tests.
//!
//! Provides an isolated working directory and helper commands.

#![allow(dead_code)]

pub mod commands;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment with an isolated temp directory.
///
/// Child processes run with `.current_dir()` set to the temp directory and
/// with every variable stackplan reads removed, so tests can safely run in
/// parallel and never see the developer's shell environment.
pub struct Test {
    /// Temporary directory holding config files
    pub dir: TempDir,
    /// Extra environment variables for child processes
    env: Vec<(String, String)>,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self {
            dir,
            env: Vec::new(),
        }
    }

    /// Create a test environment with a config file written to `dev.json`.
    pub fn with_config(contents: &str) -> Self {
        let t = Self::new();
        t.write_config("dev.json", contents);
        t
    }

    /// Set an environment variable for every command of this test.
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.env.push((key.to_string(), value.to_string()));
        self
    }

    /// Set all four fallback database variables.
    pub fn with_fallback_db(self) -> Self {
        FALLBACK_DB_ENV
            .iter()
            .fold(self, |t, (key, value)| t.env(key, value))
    }

    /// Write a config file into the test directory.
    pub fn write_config(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("failed to write config");
        path
    }
}
