//! # Chat Command
//!
//! File: cli/src/commands/chat.rs
//!
//! ## Overview
//!
//! An interactive conversation on the terminal. Each line read from stdin is
//! one submission; the bot's reply is printed as `Name: text`, followed by the
//! image URL when one was found. Blank lines are ignored. The session ends at
//! end of input or on `/quit`.
//!
//! ```bash
//! clintongpt chat
//! clintongpt chat hello there          # sends "hello there" first
//! printf 'hi\nthanks\n' | clintongpt chat --no-image
//! ```
//!
//! Input that is not valid UTF-8 is decoded lossily rather than ending the
//! session.
//!
//! The `> ` prompt and the greeting line are only shown when stdin is a terminal,
//! so piped sessions print replies only.
//!
use super::shared::{self, ImageArgs};
use crate::common::conversation::Conversation;
use crate::core::config;
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use std::borrow::Cow;
use std::io::{IsTerminal, Write};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

const QUIT_COMMANDS: [&str; 2] = ["/quit", "/exit"];

/// Arguments for `clintongpt chat`.
#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Optional first message, sent before reading from stdin.
    pub initial: Vec<String>,

    #[command(flatten)]
    pub image: ImageArgs,
}

pub async fn handle_chat(args: ChatArgs) -> Result<()> {
    let cfg = config::load_config().context("Failed to load ClintonGPT configuration")?;
    let mut conversation = shared::build_conversation(&cfg, &args.image)?;
    let interactive = std::io::stdin().is_terminal();
    let bot_name = cfg.bot.name.as_str();

    if interactive {
        println!(
            "Start a conversation with {}! (type /quit or press Ctrl+D to leave)",
            bot_name
        );
    }

    let initial = args.initial.join(" ");
    if !initial.trim().is_empty() {
        send(&mut conversation, bot_name, &initial).await;
    }

    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut buf = Vec::new();
    loop {
        if interactive {
            print!("> ");
            std::io::stdout().flush().context("Failed to flush stdout")?;
        }
        buf.clear();
        let read = stdin
            .read_until(b'\n', &mut buf)
            .await
            .context("Failed to read from stdin")?;
        if read == 0 {
            debug!("End of input.");
            break;
        }
        let line = decode_line(&buf);
        if is_quit(&line) {
            break;
        }
        send(&mut conversation, bot_name, &line).await;
    }

    info!(
        "Chat ended after {} messages.",
        conversation.messages().len()
    );
    Ok(())
}

async fn send(conversation: &mut Conversation, bot_name: &str, text: &str) {
    if let Some(turn) = conversation.submit(text).await {
        println!("{}", shared::format_bot_message(bot_name, &turn[1]));
    }
}

/// Decodes one raw input line, replacing invalid UTF-8 instead of failing.
fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    match String::from_utf8_lossy(raw) {
        Cow::Borrowed(line) => line.to_string(),
        Cow::Owned(line) => {
            warn!("Input line was not valid UTF-8; invalid bytes were replaced.");
            line
        }
    }
}

fn is_quit(line: &str) -> bool {
    QUIT_COMMANDS.contains(&line.trim())
}
