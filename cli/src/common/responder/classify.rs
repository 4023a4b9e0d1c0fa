//! # Keyword Classification
//!
//! File: cli/src/common/responder/classify.rs
//!
//! Scores every category by how many of its keywords occur in the input.
//! Matching is plain substring containment on the lower-cased text, so "good"
//! also matches inside "goodbye" and "hi" inside "think".
//!
use super::categories::{Category, CategoryTable};
use tracing::trace;

/// A category together with its keyword hit count for one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMatch<'a> {
    pub category: &'a Category,
    pub hit_count: usize,
}

/// Number of the category's keywords contained in `lowered`.
///
/// `lowered` must already be lower-cased.
pub fn hit_count(category: &Category, lowered: &str) -> usize {
    category
        .keywords()
        .iter()
        .filter(|keyword| lowered.contains(keyword.as_str()))
        .count()
}

/// Picks the category with the most keyword hits.
///
/// Categories are scanned in table order and a later one only takes over when
/// its count is strictly greater, so the earliest category wins a tie.
/// Returns `None` when nothing scores above zero.
pub fn classify<'a>(table: &'a CategoryTable, text: &str) -> Option<ScoredMatch<'a>> {
    let lowered = text.to_lowercase();
    let mut best: Option<ScoredMatch<'a>> = None;

    for category in table.iter() {
        let hits = hit_count(category, &lowered);
        let best_hits = best.map_or(0, |m| m.hit_count);
        if hits > best_hits {
            best = Some(ScoredMatch {
                category,
                hit_count: hits,
            });
        }
    }

    trace!(
        "Classified {:?} as {:?}",
        text,
        best.map(|m| (m.category.name(), m.hit_count))
    );
    best
}

/// Hit counts for every category in table order, including zeros.
pub fn score_all<'a>(table: &'a CategoryTable, text: &str) -> Vec<ScoredMatch<'a>> {
    let lowered = text.to_lowercase();
    table
        .iter()
        .map(|category| ScoredMatch {
            category,
            hit_count: hit_count(category, &lowered),
        })
        .collect()
}
