//! # Chat Server Configuration
//!
//! File: cli/src/commands/srv/config.rs
//!
//! ## Overview
//!
//! Resolves the effective settings for `clintongpt srv` from two sources:
//! 1. Command-line arguments (highest priority, when they differ from their defaults)
//! 2. The `[server]` section of the loaded configuration
//!
//! ```toml
//! [server]
//! port = 9000
//! host = "0.0.0.0"
//! enable_cors = false
//! static_dir = "~/sites/clintongpt-ui"
//! ```
//!
//! The optional static directory is resolved to an absolute, canonical path and
//! must exist. Everything else is taken as-is.
//!
use crate::commands::shared::ImageArgs;
use crate::core::config::ServerSection;
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use std::env;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Arguments for `clintongpt srv`.
#[derive(Parser, Debug)]
pub struct SrvArgs {
    /// Port to listen on. The next free port is used if this one is taken.
    #[arg(long, short, default_value_t = 8000)]
    pub port: u16,

    /// Address to bind. Use `0.0.0.0` to accept connections from other machines.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Do not send CORS headers.
    #[arg(long)]
    pub no_cors: bool,

    /// Directory with a browser front end, served for every non-API path.
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    #[command(flatten)]
    pub image: ImageArgs,
}

/// Effective server settings after merging arguments and configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub host: IpAddr,
    pub enable_cors: bool,
    /// Canonical path of the front end directory, if one is served.
    pub static_dir: Option<PathBuf>,
}

/// Merges `args` over `section` and validates the static directory.
///
/// A port or host given on the command line only wins when it differs from
/// the argument default, so `[server] port = 9000` still applies to a plain
/// `clintongpt srv`. `--no-cors` always wins when present.
pub async fn resolve(args: &SrvArgs, section: &ServerSection) -> Result<ServerConfig> {
    let cli_defaults = SrvArgs::parse_from(["srv"]);

    let port = if args.port != cli_defaults.port {
        args.port
    } else {
        section.port
    };
    let host = if args.host != cli_defaults.host {
        args.host
    } else {
        section.host
    };
    let enable_cors = !args.no_cors && section.enable_cors;

    let static_dir = match args
        .static_dir
        .clone()
        .or_else(|| section.static_dir.as_ref().map(PathBuf::from))
    {
        Some(dir) => Some(resolve_static_dir(&dir).await?),
        None => None,
    };

    let config = ServerConfig {
        port,
        host,
        enable_cors,
        static_dir,
    };
    debug!("Effective server configuration: {:?}", config);
    Ok(config)
}

/// Makes `dir` absolute, canonicalizes it and checks it is a directory.
async fn resolve_static_dir(dir: &Path) -> Result<PathBuf> {
    let absolute = if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        env::current_dir()
            .context("Failed to get current working directory")?
            .join(dir)
    };

    let canonical = tokio::fs::canonicalize(&absolute)
        .await
        .with_context(|| format!("Static directory not found: {}", absolute.display()))?;
    let metadata = tokio::fs::metadata(&canonical)
        .await
        .with_context(|| format!("Failed to read metadata for {}", canonical.display()))?;
    if !metadata.is_dir() {
        anyhow::bail!("Static path is not a directory: {}", canonical.display());
    }
    Ok(canonical)
}
