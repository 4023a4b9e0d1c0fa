//! # Conversation (`common::conversation`)
//!
//! File: cli/src/common/conversation/mod.rs
//!
//! ## Overview
//!
//! Owns the append-only message log and runs one submission at a time:
//!
//! 1. Append the user's message.
//! 2. Classify, pick a reply, and await the image lookup.
//! 3. Append the bot's message with the reply text and optional image.
//!
//! Step 2 is awaited before step 3, so the log is always in submission order.
//! If step 2 fails for any reason (including a panic inside an image lookup
//! implementation) the failure is logged and the configured apology is sent
//! instead, without an image. A failed turn never ends the conversation.
//!
//! Whitespace-only submissions are ignored and leave the log untouched.
//!
//! ## Usage
//!
//! ```rust
//! let mut conversation = Conversation::new(responder, images).with_apology("Suure!");
//! if let Some(turn) = conversation.submit("hello").await {
//!     let bot = &turn[1];
//!     println!("{}", bot.text);
//! }
//! ```
//!
pub mod message;

pub use message::Message;

use crate::common::image::ImageLookup;
use crate::common::responder::{CategoryTable, Reply, Responder};
use crate::core::error::{ChatError, Result};
use futures_util::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error};

/// Reply used when no apology is configured.
pub const DEFAULT_APOLOGY: &str = "Suure!";

pub struct Conversation {
    responder: Responder,
    images: Arc<dyn ImageLookup>,
    apology: String,
    log: Vec<Message>,
}

impl Conversation {
    pub fn new(responder: Responder, images: Arc<dyn ImageLookup>) -> Self {
        Self {
            responder,
            images,
            apology: DEFAULT_APOLOGY.to_string(),
            log: Vec::new(),
        }
    }

    pub fn with_apology(mut self, apology: impl Into<String>) -> Self {
        self.apology = apology.into();
        self
    }

    /// Every message so far, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.log
    }

    pub fn table(&self) -> &CategoryTable {
        self.responder.table()
    }

    /// Runs one turn and returns the two messages it appended (user, bot).
    ///
    /// Returns `None` without touching the log when `text` is blank.
    pub async fn submit(&mut self, text: &str) -> Option<&[Message]> {
        if text.trim().is_empty() {
            debug!("Ignoring blank submission.");
            return None;
        }

        let start = self.log.len();
        self.log.push(Message::from_user(text));

        let bot = match self.generate(text).await {
            Ok((reply, image_url)) => Message::from_bot(reply.text, image_url),
            Err(e) => {
                error!("Failed to generate a reply for {:?}: {:#}", text, e);
                Message::from_bot(self.apology.clone(), None)
            }
        };
        self.log.push(bot);

        Some(&self.log[start..])
    }

    async fn generate(&mut self, text: &str) -> Result<(Reply, Option<String>)> {
        let reply = self.responder.respond(text)?;
        let image_url = AssertUnwindSafe(self.images.lookup(&reply.image_query))
            .catch_unwind()
            .await
            .map_err(|_| ChatError::LookupPanicked {
                query: reply.image_query.clone(),
            })?;
        Ok((reply, image_url))
    }
}
