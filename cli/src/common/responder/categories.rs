//! # Category Table
//!
//! File: cli/src/common/responder/categories.rs
//!
//! ## Overview
//!
//! The ordered table of reply categories. Each category pairs a list of
//! lowercase keywords with the canned replies it may produce. Declaration order
//! matters: when two categories score the same number of keyword hits, the one
//! declared first wins.
//!
//! The built-in table ships with the binary. A custom table can replace or
//! extend it through the `[responder]` section of the configuration, either
//! inline or from a separate TOML file:
//!
//! ```toml
//! [[categories]]
//! name = "rust"
//! keywords = ["crab", "ferris"]
//! replies = ["Ferris approves!"]
//! ```
//!
use crate::core::config::{CategoryConfig, ResponderConfig};
use crate::core::error::{ChatError, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::{fs, path::Path};
use tracing::{debug, info};

/// Replies used when no category matched the input.
pub const DEFAULT_REPLIES: [&str; 2] = ["Suure!", "Put that one on the Need to know list!"];

/// (name, keywords, replies), in tie-break order.
const BUILTIN: &[(&str, &[&str], &[&str])] = &[
    (
        "positive",
        &[
            "happy", "great", "awesome", "amazing", "wow", "cool", "excellent", "love", "like",
            "good", "yes", "yeah", "sure", "okay", "ok",
        ],
        &["Suure!", "That sounds amazing!", "I love that!", "That's fantastic!"],
    ),
    (
        "negative",
        &[
            "sad", "bad", "terrible", "awful", "hate", "dislike", "no", "nope", "wrong", "sorry",
            "apologize",
        ],
        &[
            "Put that one on the Need to know list!",
            "Let's think about this...",
            "Hmm, interesting perspective...",
        ],
    ),
    (
        "thinking",
        &[
            "think", "thought", "idea", "maybe", "perhaps", "possibly", "consider", "wonder",
            "question",
        ],
        &[
            "Put that one on the Need to know list!",
            "That's worth thinking about!",
            "Interesting thought!",
        ],
    ),
    (
        "excited",
        &[
            "excited", "wow", "amazing", "incredible", "fantastic", "wonderful", "brilliant",
            "perfect",
        ],
        &["Suure!", "That's incredible!", "Absolutely amazing!"],
    ),
    (
        "confused",
        &[
            "confused", "what", "huh", "pardon", "sorry", "repeat", "again", "clarify", "explain",
        ],
        &["Let me think about that...", "Interesting question!", "Hmm..."],
    ),
    (
        "agreement",
        &[
            "agree", "yes", "sure", "okay", "fine", "alright", "definitely", "absolutely",
            "certainly",
        ],
        &["Suure!", "Absolutely!", "Definitely!"],
    ),
    (
        "disagreement",
        &["disagree", "no", "nope", "wrong", "incorrect", "false", "never", "not"],
        &[
            "Put that one on the Need to know list!",
            "Let's discuss this...",
            "Interesting perspective...",
        ],
    ),
    (
        "greeting",
        &[
            "hello", "hi", "hey", "greetings", "good morning", "good afternoon", "good evening",
        ],
        &["Suure!", "Hello there!", "Hi! How can I help?"],
    ),
    (
        "farewell",
        &["bye", "goodbye", "see you", "farewell", "later", "take care"],
        &["Put that one on the Need to know list!", "See you later!", "Take care!"],
    ),
    (
        "thanks",
        &["thanks", "thank you", "appreciate", "grateful"],
        &["Suure!", "You're welcome!", "My pleasure!"],
    ),
    (
        "science",
        &[
            "science", "experiment", "research", "study", "lab", "chemistry", "physics", "biology",
        ],
        &["Suure!", "Science is fascinating!", "Let's explore that!"],
    ),
    (
        "needToKnow",
        &[
            "important", "remember", "note", "write down", "don't forget", "keep in mind",
        ],
        &["Put that one on the Need to know list!", "I'll remember that!", "Noted!"],
    ),
];

/// A named group of trigger keywords and the replies they unlock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    name: String,
    keywords: Vec<String>,
    replies: Vec<String>,
}

impl Category {
    /// Builds a validated category. Keywords are trimmed and lower-cased so
    /// they can be matched against lower-cased input.
    pub fn new(
        name: impl Into<String>,
        keywords: Vec<String>,
        replies: Vec<String>,
    ) -> std::result::Result<Self, ChatError> {
        let name = name.into().trim().to_string();
        let invalid = |reason: &str| ChatError::InvalidCategory {
            name: name.clone(),
            reason: reason.to_string(),
        };

        if name.is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        let keywords: Vec<String> = keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .collect();
        if keywords.is_empty() {
            return Err(invalid("at least one keyword is required"));
        }
        if keywords.iter().any(String::is_empty) {
            return Err(invalid("keywords cannot be blank"));
        }
        if replies.is_empty() {
            return Err(invalid("at least one reply is required"));
        }
        if replies.iter().any(|r| r.trim().is_empty()) {
            return Err(invalid("replies cannot be blank"));
        }

        Ok(Self {
            name,
            keywords,
            replies,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn replies(&self) -> &[String] {
        &self.replies
    }
}

impl TryFrom<&CategoryConfig> for Category {
    type Error = ChatError;

    fn try_from(cfg: &CategoryConfig) -> std::result::Result<Self, Self::Error> {
        Category::new(cfg.name.clone(), cfg.keywords.clone(), cfg.replies.clone())
    }
}

/// Ordered, immutable collection of categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    categories: Vec<Category>,
}

/// Layout of a standalone `categories_file`.
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct CategoryFile {
    #[serde(default)]
    categories: Vec<CategoryConfig>,
}

impl CategoryTable {
    /// Validates a table: it must not be empty and names must be unique.
    pub fn new(categories: Vec<Category>) -> std::result::Result<Self, ChatError> {
        if categories.is_empty() {
            return Err(ChatError::Config(
                "The category table must contain at least one category.".to_string(),
            ));
        }
        {
            let mut seen = HashSet::new();
            for category in &categories {
                if !seen.insert(category.name()) {
                    return Err(ChatError::InvalidCategory {
                        name: category.name().to_string(),
                        reason: "declared more than once".to_string(),
                    });
                }
            }
        }
        Ok(Self { categories })
    }

    /// The table compiled into the binary.
    pub fn builtin() -> Self {
        let categories = BUILTIN
            .iter()
            .map(|(name, keywords, replies)| Category {
                name: (*name).to_string(),
                keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
                replies: replies.iter().map(|r| (*r).to_string()).collect(),
            })
            .collect();
        Self { categories }
    }

    /// Builds the effective table from the `[responder]` configuration.
    ///
    /// Categories from `categories_file` come first, then inline ones. With
    /// `extend_builtin` they are appended after the built-in categories,
    /// otherwise they replace them.
    pub fn from_config(cfg: &ResponderConfig) -> Result<Self> {
        if cfg.is_builtin() {
            debug!("Using the built-in category table.");
            return Ok(Self::builtin());
        }

        let mut custom = Vec::new();
        if let Some(file) = &cfg.categories_file {
            custom.extend(load_category_file(Path::new(file))?);
        }
        custom.extend(cfg.categories.iter().cloned());

        let mut categories = if cfg.extend_builtin {
            Self::builtin().categories
        } else {
            Vec::new()
        };
        for entry in &custom {
            categories.push(Category::try_from(entry)?);
        }

        let table = Self::new(categories)?;
        info!(
            "Loaded {} custom categor{} ({} total).",
            custom.len(),
            if custom.len() == 1 { "y" } else { "ies" },
            table.len()
        );
        Ok(table)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name() == name)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn as_slice(&self) -> &[Category] {
        &self.categories
    }
}

fn load_category_file(path: &Path) -> Result<Vec<CategoryConfig>> {
    info!("Loading categories from: {}", path.display());
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read categories file: {}", path.display()))?;
    let file: CategoryFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse categories file: {}", path.display()))?;
    Ok(file.categories)
}
