//! # Categories Command
//!
//! File: cli/src/commands/categories.rs
//!
//! Prints the effective category table (built-in or from configuration) in
//! tie-break order, followed by the default replies used when nothing matches.
//!
use crate::common::responder::{CategoryTable, DEFAULT_REPLIES};
use crate::core::config;
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use serde_json::json;

/// Arguments for `clintongpt categories`.
#[derive(Parser, Debug)]
pub struct CategoriesArgs {
    /// Print the table as JSON.
    #[arg(long)]
    pub json: bool,
}

pub async fn handle_categories(args: CategoriesArgs) -> Result<()> {
    let cfg = config::load_config().context("Failed to load ClintonGPT configuration")?;
    let table = CategoryTable::from_config(&cfg.responder)
        .context("Failed to build the category table")?;

    if args.json {
        let rendered = serde_json::to_string_pretty(&json!({
            "categories": table.as_slice(),
            "defaultReplies": DEFAULT_REPLIES,
        }))
        .context("Failed to serialize the category table")?;
        println!("{}", rendered);
    } else {
        let source = if cfg.responder.is_builtin() {
            "built-in"
        } else {
            "configured"
        };
        println!("{}", render(&table, source));
    }
    Ok(())
}

fn render(table: &CategoryTable, source: &str) -> String {
    let quote = |items: &[String]| {
        items
            .iter()
            .map(|r| format!("\"{}\"", r))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    let mut out = format!(
        "Categories ({} {}, earliest wins ties):\n",
        table.len(),
        source
    );
    for (i, category) in table.iter().enumerate() {
        out.push_str(&format!("\n{:>3}. {}\n", i + 1, category.name()));
        out.push_str(&format!("     keywords: {}\n", category.keywords().join(", ")));
        out.push_str(&format!("     replies:  {}\n", quote(category.replies())));
    }
    let defaults: Vec<String> = DEFAULT_REPLIES.iter().map(|r| r.to_string()).collect();
    out.push_str(&format!("\nNo match: {}", quote(&defaults)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::responder::Category;

    #[test]
    fn test_render_builtin() {
        let text = render(&CategoryTable::builtin(), "built-in");
        assert!(text.starts_with("Categories (12 built-in, earliest wins ties):"));
        assert!(text.contains("  1. positive\n"));
        assert!(text.contains(" 12. needToKnow\n"));
        assert!(text.contains("keywords: hello, hi, hey"));
        assert!(text.ends_with("No match: \"Suure!\" | \"Put that one on the Need to know list!\""));
    }

    #[test]
    fn test_render_custom() {
        let category = Category::new(
            "rust",
            vec!["Crab".into(), "ferris".into()],
            vec!["Ferris approves!".into()],
        )
        .unwrap();
        let table = CategoryTable::new(vec![category]).unwrap();
        let text = render(&table, "configured");
        assert!(text.starts_with("Categories (1 configured"));
        assert!(text.contains("keywords: crab, ferris"));
        assert!(text.contains("replies:  \"Ferris approves!\""));
    }
}
