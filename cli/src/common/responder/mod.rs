//! # ClintonGPT Responder (`common::responder`)
//!
//! File: cli/src/common/responder/mod.rs
//!
//! ## Overview
//!
//! The response-selection routine at the heart of ClintonGPT:
//!
//! 1. `classify` lower-cases the input and counts keyword hits per category,
//!    keeping the first category with the strictly highest count.
//! 2. `select_reply` draws a canned reply for the winner (or one of the two
//!    defaults) and derives the image search query from it.
//!
//! Classification is deterministic. Randomness only enters through the RNG
//! owned by [`Responder`], which tests replace with a seeded one.
//!
//! ## Submodules
//!
//! - **`categories`**: `Category`, `CategoryTable`, the built-in table and custom tables from config.
//! - **`classify`**: keyword scoring and the tie-break rule.
//! - **`select`**: reply choice and image query normalization.
//!
//! ## Usage
//!
//! ```rust
//! let mut responder = Responder::new(Arc::new(CategoryTable::builtin()));
//! let reply = responder.respond("hello")?;
//! println!("{} (search: {})", reply.text, reply.image_query);
//! ```
//!
pub mod categories;
pub mod classify;
pub mod select;

pub use categories::{Category, CategoryTable, DEFAULT_REPLIES};
pub use classify::{classify, score_all, ScoredMatch};
pub use select::{image_query, select_reply, Reply};

use crate::core::error::ChatError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tracing::debug;

/// Category table plus the random source used to pick replies.
pub struct Responder<R = StdRng> {
    table: Arc<CategoryTable>,
    rng: R,
}

impl Responder<StdRng> {
    /// Responder seeded from the operating system.
    pub fn new(table: Arc<CategoryTable>) -> Self {
        Self::with_rng(table, StdRng::from_os_rng())
    }
}

impl<R: Rng> Responder<R> {
    pub fn with_rng(table: Arc<CategoryTable>, rng: R) -> Self {
        Self { table, rng }
    }

    pub fn table(&self) -> &CategoryTable {
        &self.table
    }

    /// Classifies `text` and picks a reply for it.
    pub fn respond(&mut self, text: &str) -> Result<Reply, ChatError> {
        let matched = classify(&self.table, text);
        let reply = select_reply(matched.as_ref(), &mut self.rng)?;
        debug!(
            category = reply.category.as_deref().unwrap_or("<none>"),
            hits = matched.map_or(0, |m| m.hit_count),
            "Selected reply {:?}",
            reply.text
        );
        Ok(reply)
    }
}
