//! # Reply Selection
//!
//! File: cli/src/common/responder/select.rs
//!
//! Turns a classification result into the reply text and the query sent to
//! the image search service.
//!
use super::categories::DEFAULT_REPLIES;
use super::classify::ScoredMatch;
use crate::core::error::ChatError;
use once_cell::sync::Lazy;
use rand::seq::IndexedRandom;
use rand::Rng;
use regex::Regex;
use serde::Serialize;

static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("image query pattern is valid"));

/// The chosen reply, before its image has been looked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub text: String,
    pub image_query: String,
    /// Winning category, or `None` when the default replies were used.
    pub category: Option<String>,
}

/// Picks a reply uniformly at random.
///
/// A matched category contributes its own replies; no match falls back to
/// [`DEFAULT_REPLIES`]. Fails only if a category somehow has no replies.
pub fn select_reply<R: Rng + ?Sized>(
    matched: Option<&ScoredMatch<'_>>,
    rng: &mut R,
) -> Result<Reply, ChatError> {
    let (category, text) = match matched {
        Some(m) => {
            let name = m.category.name();
            let text = m
                .category
                .replies()
                .choose(rng)
                .ok_or_else(|| ChatError::EmptyReplies {
                    category: name.to_string(),
                })?;
            (Some(name), text.clone())
        }
        None => {
            let text = DEFAULT_REPLIES
                .choose(rng)
                .ok_or_else(|| ChatError::EmptyReplies {
                    category: "default".to_string(),
                })?;
            (None, (*text).to_string())
        }
    };

    Ok(Reply {
        image_query: image_query(category, &text),
        category: category.map(str::to_string),
        text,
    })
}

/// Builds the image search query: category name and reply text, lower-cased,
/// with every run of characters outside `[a-z0-9]` collapsed to one space.
pub fn image_query(category: Option<&str>, reply: &str) -> String {
    let combined = format!("{} {}", category.unwrap_or(""), reply).to_lowercase();
    NON_ALPHANUMERIC
        .replace_all(&combined, " ")
        .trim()
        .to_string()
}
