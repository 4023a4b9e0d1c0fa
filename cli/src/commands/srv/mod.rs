//! # Chat Server Command (`srv`)
//!
//! File: cli/src/commands/srv/mod.rs
//!
//! ## Overview
//!
//! `clintongpt srv` serves a single conversation as a small JSON API, plus an
//! optional static front end:
//!
//! ```bash
//! # API only, on localhost:8000
//! clintongpt srv
//!
//! # Reachable from the LAN, with a browser UI
//! clintongpt srv --host 0.0.0.0 --static-dir ./ui
//! ```
//!
//! - `config`: argument parsing and merging with the `[server]` section
//! - `server_logic`: router, handlers, port fallback and graceful shutdown
//! - `utils`: startup banner and address discovery
//!
mod config;
mod server_logic;
mod utils;

pub use config::SrvArgs;

use crate::commands::shared;
use crate::core::config as app_config;
use crate::core::error::Result;
use anyhow::Context;
use tracing::info;

/// Entry point for `clintongpt srv`.
pub async fn handle_srv(args: SrvArgs) -> Result<()> {
    info!("Handling srv command...");

    let cfg = app_config::load_config().context("Failed to load ClintonGPT configuration")?;
    let server_config = config::resolve(&args, &cfg.server)
        .await
        .context("Failed to resolve server configuration")?;
    let conversation = shared::build_conversation(&cfg, &args.image)?;

    server_logic::run_server(server_config, conversation, &cfg.bot.name).await
}
