//! # ClintonGPT CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test file
//! declares `mod common;` and runs the compiled `clintongpt` binary through
//! `assert_cmd`.
//!
//! Commands built with [`sandboxed_cmd`] run inside a temporary directory that
//! acts as both the project root (it contains a `.git` directory, so the
//! project config search stops there) and the user config home. No
//! `GIPHY_API_KEY` is passed through, so no test ever reaches the network.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Replies the built-in table sends when no category matches.
pub const DEFAULT_REPLIES: [&str; 2] = ["Suure!", "Put that one on the Need to know list!"];

/// Replies of the built-in `greeting` category.
pub const GREETING_REPLIES: [&str; 3] = ["Suure!", "Hello there!", "Hi! How can I help?"];

/// A `Command` for the `clintongpt` binary built for this test run.
pub fn clintongpt_cmd() -> Command {
    Command::cargo_bin("clintongpt").expect("Failed to find clintongpt binary for testing")
}

/// A fresh, isolated directory for one test.
pub fn sandbox() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create sandbox directory");
    fs::create_dir(dir.path().join(".git")).expect("Failed to create .git marker");
    dir
}

/// `clintongpt_cmd()` running inside `sandbox` with no user config or API key.
pub fn sandboxed_cmd(sandbox: &Path) -> Command {
    let mut cmd = clintongpt_cmd();
    cmd.current_dir(sandbox)
        .env("HOME", sandbox)
        .env("XDG_CONFIG_HOME", sandbox.join("xdg"))
        .env_remove("GIPHY_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

/// Writes `.clintongpt.toml` at the sandbox root.
pub fn write_project_config(sandbox: &Path, content: &str) {
    fs::write(sandbox.join(".clintongpt.toml"), content)
        .expect("Failed to write project config");
}

/// Writes the user config file the sandboxed binary will read.
pub fn write_user_config(sandbox: &Path, content: &str) {
    let dir = sandbox.join("xdg").join("clintongpt");
    fs::create_dir_all(&dir).expect("Failed to create user config dir");
    fs::write(dir.join("config.toml"), content).expect("Failed to write user config");
}

/// The trimmed lines of a command's stdout.
pub fn stdout_lines(output: &std::process::Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}
