//! # ClintonGPT Common Building Blocks (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Everything the command handlers share, kept apart from command-specific
//! logic (`commands::`) and infrastructure (`core::`):
//!
//! - **`responder`**: the category table, keyword classification and reply selection.
//! - **`image`**: the best-effort animated image lookup and its HTTP client.
//! - **`conversation`**: the append-only message log and per-submission orchestration.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::{conversation::Conversation, image, responder::{CategoryTable, Responder}};
//!
//! # async fn run_example(cfg: crate::core::config::Config) -> crate::core::error::Result<()> {
//! let table = std::sync::Arc::new(CategoryTable::from_config(&cfg.responder)?);
//! let images = image::from_config(&cfg.image, None, false)?;
//! let mut conversation = Conversation::new(Responder::new(table), images);
//! conversation.submit("hello").await;
//! # Ok(())
//! # }
//! ```
//!

/// Append-only conversation log and turn orchestration.
pub mod conversation;
/// Animated image lookup for replies.
pub mod image;
/// Keyword classification and canned reply selection.
pub mod responder;
