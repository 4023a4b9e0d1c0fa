//! # ClintonGPT Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point for the ClintonGPT CLI, a keyword-triggered chat responder that
//! answers with canned replies and, when an image API key is available, an
//! animated image matching the mood of the reply.
//!
//! This file:
//! - Parses command-line arguments with Clap
//! - Sets up logging from the verbosity flags (or `RUST_LOG`)
//! - Routes to the command handlers and reports their errors
//!
//! ## Examples
//!
//! ```bash
//! clintongpt ask hello
//! clintongpt chat
//! clintongpt -v srv --port 9000
//! clintongpt categories --json
//! ```
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command handlers (ask, chat, categories, srv)
mod common; // Responder, image lookup and conversation
mod core; // Errors and configuration

#[derive(Parser, Debug)]
#[command(
    name = "clintongpt",
    about = "💬 ClintonGPT: a keyword-triggered chat responder",
    long_about = "Answers messages with canned replies picked by keyword category,\n\
                  optionally decorated with an animated image. Talk to it once (ask),\n\
                  interactively (chat) or over HTTP (srv).",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Send one message and print the reply.
    #[command(alias = "a")]
    Ask(commands::ask::AskArgs),
    /// Talk interactively over stdin/stdout.
    #[command(alias = "c")]
    Chat(commands::chat::ChatArgs),
    /// Show the category table in use.
    Categories(commands::categories::CategoriesArgs),
    /// Serve the conversation as an HTTP JSON API.
    #[command(alias = "s")]
    Srv(commands::srv::SrvArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Ask(args) => commands::ask::handle_ask(args).await,
        Commands::Chat(args) => commands::chat::handle_chat(args).await,
        Commands::Categories(args) => commands::categories::handle_categories(args).await,
        Commands::Srv(args) => commands::srv::handle_srv(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
