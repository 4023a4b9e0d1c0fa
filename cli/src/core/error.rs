//! # ClintonGPT Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout ClintonGPT. Domain
//! failures are described by `ChatError`; everything else travels as
//! `anyhow::Error` so call sites can attach context with `.context(...)`.
//!
//! Most failures never reach the user as errors at all:
//! - Classification is total and cannot fail.
//! - Image lookup failures are folded into "no image" inside the lookup.
//! - Orchestration failures are replaced by the apology reply.
//!
//! What remains are startup problems (bad configuration, an invalid custom
//! category, a port that cannot be bound), which end the command with
//! `Error: ...` on stderr.
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! return Err(ChatError::InvalidCategory {
//!     name: "rust".into(),
//!     reason: "no replies".into(),
//! })?;
//!
//! // Recognize it later
//! if let Some(ChatError::InvalidCategory { name, .. }) = err.downcast_ref::<ChatError>() {
//!     eprintln!("fix category '{}'", name);
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for ClintonGPT.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid category '{name}': {reason}")]
    InvalidCategory { name: String, reason: String },

    #[error("Category '{category}' has no replies to choose from.")]
    EmptyReplies { category: String },

    #[error("Image lookup failed: {0}")]
    ImageLookup(String),

    #[error("Image service request failed: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    #[error("Image lookup panicked while handling query '{query}'.")]
    LookupPanicked { query: String },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
