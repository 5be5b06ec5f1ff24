//! Test support utilities for secret-seed integration tests.
//!
//! Provides reusable test environment setup and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment with an isolated temp directory.
///
/// Holds the payload files and, in `test-store` builds, the JSON file the
/// binary uses as its secrets store. Child processes get everything through
/// arguments and env vars, so tests can run in parallel.
pub struct Test {
    pub dir: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    /// Path of the fake store file (may not exist yet).
    pub fn store_path(&self) -> PathBuf {
        self.dir.path().join("store.json")
    }

    /// Write a payload file and return its path.
    pub fn write_payload(&self, file: &str, content: &[u8]) -> PathBuf {
        let path = self.dir.path().join(file);
        std::fs::write(&path, content).expect("failed to write payload");
        path
    }

    /// Environment with the standard `secret.json` payload written.
    pub fn with_payload(content: &[u8]) -> Self {
        let t = Self::new();
        t.write_payload(PAYLOAD_FILE, content);
        t
    }
}
