//! # ClintonGPT CLI Srv Integration Tests
//!
//! File: cli/tests/srv.rs
//!
//! The HTTP handlers are tested in-process in `server_logic.rs`. These tests
//! only cover argument handling of the binary, which fails fast before
//! binding.
//!
mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_srv_help() {
    clintongpt_cmd()
        .args(["srv", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("--static-dir"))
        .stdout(predicate::str::contains("--no-cors"));
}

#[test]
fn test_srv_rejects_missing_static_dir() {
    let dir = sandbox();
    sandboxed_cmd(dir.path())
        .args(["srv", "--no-image", "--static-dir", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Static directory not found"));
}

#[test]
fn test_srv_rejects_bad_host() {
    clintongpt_cmd()
        .args(["srv", "--host", "not-an-ip"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
