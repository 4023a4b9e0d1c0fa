//! # Ask Command
//!
//! File: cli/src/commands/ask.rs
//!
//! ## Overview
//!
//! Sends a single message and prints the bot's reply:
//!
//! ```bash
//! clintongpt ask hello there
//! clintongpt ask --json "I think the earth is round"
//! clintongpt ask --explain --no-image "thanks, that was great"
//! ```
//!
//! Without `--json` the reply text is printed on the first line and the image
//! URL (if any) on the second. With `--json` both messages of the turn are
//! printed as `{"messages": [user, bot]}`.
//!
use super::shared::{self, ImageArgs};
use crate::common::responder::{classify, score_all, CategoryTable};
use crate::core::config;
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use serde_json::json;
use tracing::info;

/// Arguments for `clintongpt ask`.
#[derive(Parser, Debug)]
pub struct AskArgs {
    /// The message to send. Multiple words are joined with spaces.
    #[arg(required = true, num_args = 1..)]
    pub message: Vec<String>,

    /// Print the turn as JSON instead of plain text.
    #[arg(long)]
    pub json: bool,

    /// Show keyword hits per category before the reply.
    #[arg(long)]
    pub explain: bool,

    #[command(flatten)]
    pub image: ImageArgs,
}

pub async fn handle_ask(args: AskArgs) -> Result<()> {
    let text = args.message.join(" ");
    if text.trim().is_empty() {
        anyhow::bail!("Nothing to ask: the message is blank.");
    }
    info!("Asking: {:?}", text);

    let cfg = config::load_config().context("Failed to load ClintonGPT configuration")?;
    let mut conversation = shared::build_conversation(&cfg, &args.image)?;

    if args.explain {
        for line in explain_lines(conversation.table(), &text) {
            println!("{}", line);
        }
    }

    let turn = conversation
        .submit(&text)
        .await
        .context("The message produced no reply")?;

    if args.json {
        let rendered = serde_json::to_string_pretty(&json!({ "messages": turn }))
            .context("Failed to serialize the reply")?;
        println!("{}", rendered);
    } else {
        let bot = &turn[1];
        println!("{}", bot.text);
        if let Some(url) = &bot.image_url {
            println!("{}", url);
        }
    }
    Ok(())
}

/// Per-category hit counts in table order, and which category would be chosen.
fn explain_lines(table: &CategoryTable, text: &str) -> Vec<String> {
    let scores = score_all(table, text);
    let width = table
        .iter()
        .map(|c| c.name().len())
        .max()
        .unwrap_or(0);

    let mut lines = vec!["Keyword hits:".to_string()];
    lines.extend(scores.iter().map(|s| {
        format!("  {:<width$}  {}", s.category.name(), s.hit_count, width = width)
    }));

    lines.push(match classify(table, text) {
        Some(s) => format!("Chosen: {}", s.category.name()),
        None => "Chosen: none (default replies)".to_string(),
    });
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explain_lines_tie_goes_to_earlier_category() {
        let table = CategoryTable::builtin();
        let lines = explain_lines(&table, "I think the earth is round");
        assert_eq!(lines[0], "Keyword hits:");
        assert_eq!(lines.len(), table.len() + 2);
        assert!(lines.iter().any(|l| l.trim_start().starts_with("thinking") && l.ends_with(" 1")));
        assert!(lines.iter().any(|l| l.trim_start().starts_with("greeting") && l.ends_with(" 1")));
        assert_eq!(lines.last().unwrap(), "Chosen: thinking");
    }

    #[test]
    fn test_explain_lines_without_match() {
        let table = CategoryTable::builtin();
        let lines = explain_lines(&table, "asdfqwerty");
        assert_eq!(lines.last().unwrap(), "Chosen: none (default replies)");
    }

    #[test]
    fn test_message_words_are_collected() {
        let args = AskArgs::parse_from(["ask", "hello", "there", "--json"]);
        assert_eq!(args.message, vec!["hello", "there"]);
        assert!(args.json);
        assert!(!args.explain);
    }
}
