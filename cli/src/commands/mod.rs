//! # ClintonGPT Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the ClintonGPT CLI. Each
//! command defines its own clap arguments struct and an async `handle_*`
//! function called from `main.rs`.
//!
//! ## Commands
//!
//! - `ask`: send one message and print the reply
//! - `chat`: interactive conversation on stdin/stdout
//! - `categories`: show the effective category table
//! - `srv`: HTTP JSON API (and optional static front end) around one conversation
//!
//! `shared` holds the pieces several commands need: the image lookup flags and
//! the conversation builder.
//!

/// One-shot question from the command line.
pub mod ask;
/// Listing of the category table.
pub mod categories;
/// Interactive REPL, the terminal counterpart of the chat screen.
pub mod chat;
/// Flags and setup shared between commands.
pub mod shared;
/// HTTP server exposing the conversation as a JSON API.
pub mod srv;
