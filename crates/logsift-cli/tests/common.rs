//! Common test utilities shared across integration tests.
//!
//! Note: Clippy cannot track usage across integration test files,
//! hence the `allow(dead_code)` annotation.
#![cfg(test)]
#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestFixture {
    _temp_dir: TempDir,
    root: PathBuf,
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.join(name);
        fs::write(&path, content).expect("Failed to write fixture file");
        path
    }

    /// A small rule table exercised by most tests: an exact-match rule and
    /// a non-JSON block rule.
    pub fn basic_rules(&self) -> PathBuf {
        self.write_file(
            "rules.toml",
            r#"
[[rules]]
id = "HELLO"
description = "greeting message"
[rules.matcher]
field = "msg"
equals = "hello"

[[rules]]
id = "PANIC"
description = "panic stack trace"
[rules.matcher]
field = "non_json"
contains = "panic:"
"#,
        )
    }

    pub fn command(&self) -> Command {
        Command::cargo_bin("logsift").expect("Failed to find logsift binary")
    }
}
