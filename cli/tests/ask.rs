//! # ClintonGPT CLI Ask Integration Tests
//!
//! File: cli/tests/ask.rs
//!
//! Runs `clintongpt ask` against the built-in table and against custom
//! categories from configuration files.
//!
mod common;
use common::*;
use predicates::prelude::*;
use serde_json::Value;

#[test]
fn test_ask_greeting() {
    let dir = sandbox();
    let output = sandboxed_cmd(dir.path())
        .args(["ask", "hello", "--no-image"])
        .output()
        .expect("Failed to run clintongpt");
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1, "unexpected output: {:?}", lines);
    assert!(GREETING_REPLIES.contains(&lines[0].as_str()));
}

#[test]
fn test_ask_without_match_uses_default_replies() {
    let dir = sandbox();
    let output = sandboxed_cmd(dir.path())
        .args(["ask", "asdfqwerty"])
        .output()
        .expect("Failed to run clintongpt");
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1);
    assert!(DEFAULT_REPLIES.contains(&lines[0].as_str()));
}

#[test]
fn test_ask_json_output() {
    let dir = sandbox();
    let output = sandboxed_cmd(dir.path())
        .args(["ask", "--json", "--no-image", "GOODBYE", "friend"])
        .output()
        .expect("Failed to run clintongpt");
    assert!(output.status.success());

    let body: Value = serde_json::from_slice(&output.stdout).expect("stdout is not JSON");
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["text"], "GOODBYE friend");
    assert_eq!(messages[0]["isFromUser"], true);
    let reply = messages[1]["text"].as_str().unwrap();
    assert!([
        "Put that one on the Need to know list!",
        "See you later!",
        "Take care!"
    ]
    .contains(&reply));
    assert!(messages[1].get("imageUrl").is_none());
}

#[test]
fn test_ask_explain() {
    let dir = sandbox();
    sandboxed_cmd(dir.path())
        .args(["ask", "--explain", "--no-image", "I think the earth is round"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Keyword hits:"))
        .stdout(predicate::str::contains("Chosen: thinking"));
}

#[test]
fn test_ask_blank_message_fails() {
    let dir = sandbox();
    sandboxed_cmd(dir.path())
        .args(["ask", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("message is blank"));
}

#[test]
fn test_ask_custom_category_from_project_config() {
    let dir = sandbox();
    write_project_config(
        dir.path(),
        r#"
[responder]
extend_builtin = false

[[responder.categories]]
name = "rust"
keywords = ["crab", "Ferris"]
replies = ["Ferris approves!"]
"#,
    );

    sandboxed_cmd(dir.path())
        .args(["ask", "I", "love", "FERRIS", "the", "crab", "--no-image"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Ferris approves!\n"));
}

#[test]
fn test_ask_extended_table_keeps_builtin() {
    let dir = sandbox();
    write_user_config(
        dir.path(),
        r#"
[responder]
extend_builtin = true

[[responder.categories]]
name = "rust"
keywords = ["crab"]
replies = ["Ferris approves!"]
"#,
    );

    let output = sandboxed_cmd(dir.path())
        .args(["ask", "hello", "--no-image"])
        .output()
        .expect("Failed to run clintongpt");
    assert!(output.status.success());
    assert!(GREETING_REPLIES.contains(&stdout_lines(&output)[0].as_str()));

    sandboxed_cmd(dir.path())
        .args(["ask", "crab", "--no-image"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Ferris approves!\n"));
}

#[test]
fn test_ask_with_custom_apology_answers_normally() {
    let dir = sandbox();
    write_project_config(dir.path(), "[bot]\napology = \"Oops!\"\n");

    let output = sandboxed_cmd(dir.path())
        .args(["ask", "hello", "--no-image"])
        .output()
        .expect("Failed to run clintongpt");
    assert!(output.status.success());
    assert!(GREETING_REPLIES.contains(&stdout_lines(&output)[0].as_str()));
}
