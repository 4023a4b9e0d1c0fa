//! # Shared Command Helpers
//!
//! File: cli/src/commands/shared.rs
//!
//! Flags and setup used by every command that talks to the responder.
//!
use crate::common::conversation::{Conversation, Message};
use crate::common::image::{self, ImageLookup};
use crate::common::responder::{CategoryTable, Responder};
use crate::core::config::Config;
use crate::core::error::Result;
use anyhow::Context;
use clap::Args;
use std::sync::Arc;

/// Image lookup flags, flattened into `ask`, `chat` and `srv`.
#[derive(Args, Debug, Clone, Default)]
pub struct ImageArgs {
    /// Reply with text only; never contact the image service.
    #[arg(long)]
    pub no_image: bool,

    /// API key for the image search service (overrides `[image] api_key`).
    #[arg(long, env = "GIPHY_API_KEY", hide_env_values = true)]
    pub giphy_api_key: Option<String>,
}

/// Builds a fresh conversation from the loaded configuration.
pub fn build_conversation(cfg: &Config, image_args: &ImageArgs) -> Result<Conversation> {
    let images = image::from_config(
        &cfg.image,
        image_args.giphy_api_key.clone(),
        image_args.no_image,
    )?;
    conversation_with_images(cfg, images)
}

/// Everything `build_conversation` does except choosing the image lookup.
fn conversation_with_images(cfg: &Config, images: Arc<dyn ImageLookup>) -> Result<Conversation> {
    let table = CategoryTable::from_config(&cfg.responder)
        .context("Failed to build the category table")?;
    Ok(Conversation::new(Responder::new(Arc::new(table)), images)
        .with_apology(cfg.bot.apology.clone()))
}

/// Terminal rendering of a bot message: the text, then the image URL if any.
pub fn format_bot_message(bot_name: &str, message: &Message) -> String {
    match &message.image_url {
        Some(url) => format!("{}: {}\n  🎞  {}", bot_name, message.text, url),
        None => format!("{}: {}", bot_name, message.text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{CategoryConfig, ResponderConfig};

    #[tokio::test]
    async fn test_build_conversation_uses_config() {
        let cfg = Config {
            responder: ResponderConfig {
                categories: vec![CategoryConfig {
                    name: "rust".into(),
                    keywords: vec!["crab".into()],
                    replies: vec!["Ferris approves!".into()],
                }],
                ..Default::default()
            },
            ..Default::default()
        };
        let args = ImageArgs {
            no_image: true,
            giphy_api_key: None,
        };

        let mut conversation = build_conversation(&cfg, &args).unwrap();
        assert_eq!(conversation.table().len(), 1);

        let turn = conversation.submit("a crab!").await.unwrap();
        assert_eq!(turn[1].text, "Ferris approves!");
        assert_eq!(turn[1].image_url, None);
    }

    struct PanickingLookup;

    #[async_trait::async_trait]
    impl ImageLookup for PanickingLookup {
        async fn lookup(&self, _query: &str) -> Option<String> {
            panic!("image service exploded");
        }
    }

    #[tokio::test]
    async fn test_configured_apology_replaces_failed_turn() {
        let mut cfg = Config::default();
        cfg.bot.apology = "Oops, my bad!".into();

        let mut conversation = conversation_with_images(&cfg, Arc::new(PanickingLookup)).unwrap();
        let turn = conversation.submit("hello").await.unwrap();
        assert_eq!(turn[1].text, "Oops, my bad!");
        assert_eq!(turn[1].image_url, None);
    }

    #[test]
    fn test_build_conversation_rejects_invalid_table() {
        let cfg = Config {
            responder: ResponderConfig {
                categories: vec![CategoryConfig {
                    name: "broken".into(),
                    keywords: vec![],
                    replies: vec!["x".into()],
                }],
                ..Default::default()
            },
            ..Default::default()
        };
        let err = build_conversation(&cfg, &ImageArgs::default()).err().unwrap();
        assert!(format!("{:#}", err).contains("Invalid category 'broken'"));
    }

    #[test]
    fn test_format_bot_message() {
        let plain = Message::from_bot("Noted!", None);
        assert_eq!(format_bot_message("ClintonGPT", &plain), "ClintonGPT: Noted!");

        let with_image = Message::from_bot("Noted!", Some("https://media.example/n.gif".into()));
        let rendered = format_bot_message("ClintonGPT", &with_image);
        assert!(rendered.starts_with("ClintonGPT: Noted!\n"));
        assert!(rendered.ends_with("https://media.example/n.gif"));
    }
}
