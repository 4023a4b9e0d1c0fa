//! # ClintonGPT Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges and validates ClintonGPT's configuration. The
//! responder works without any configuration at all; the file only exists to
//! supply an image service key, tune timeouts, swap in a custom category table
//! or set server defaults.
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line flags and `GIPHY_API_KEY` (applied by the commands)
//! 2. Project-specific `.clintongpt.toml` in the current directory or ancestors
//! 3. User-specific `<config dir>/clintongpt/config.toml`
//! 4. Default values defined in the code
//!
//! The project search walks up from the current directory and stops at the
//! first directory containing `.git`.
//!
//! ## Examples
//!
//! ```rust
//! let cfg = config::load_config()?;
//! let table = CategoryTable::from_config(&cfg.responder)?;
//! println!("{} answers with '{}' when things go wrong", cfg.bot.name, cfg.bot.apology);
//! ```
//!
use crate::core::error::{ChatError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

const PROJECT_CONFIG_FILENAME: &str = ".clintongpt.toml";

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub image: ImageConfig,
    #[serde(default)]
    pub responder: ResponderConfig,
    #[serde(default)]
    pub server: ServerSection,
}

/// Presentation settings for the bot side of the conversation.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Display name used by the REPL and the server banner.
    #[serde(default = "default_bot_name")]
    pub name: String,
    /// Reply used when generating a response fails unexpectedly.
    #[serde(default = "default_apology")]
    pub apology: String,
}

/// Settings for the animated image search service.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ImageConfig {
    /// Set to false to never attach images.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Search endpoint; receives `api_key` and `s` query parameters.
    #[serde(default = "default_image_endpoint")]
    pub endpoint: String,
    /// Service credential. Without one, lookups are skipped.
    pub api_key: Option<String>,
    /// Upper bound for a whole lookup request, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

/// Custom category table settings.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ResponderConfig {
    /// Append custom categories after the built-in ones instead of replacing them.
    #[serde(default)]
    pub extend_builtin: bool,
    /// TOML file holding `[[categories]]` entries (can use ~).
    pub categories_file: Option<String>,
    /// Inline categories, in declaration order.
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
}

impl ResponderConfig {
    /// True when the built-in table is used unchanged.
    pub fn is_builtin(&self) -> bool {
        self.categories.is_empty() && self.categories_file.is_none()
    }
}

/// One category as written in configuration.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CategoryConfig {
    pub name: String,
    pub keywords: Vec<String>,
    pub replies: Vec<String>,
}

/// Defaults for `clintongpt srv`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_true")]
    pub enable_cors: bool,
    /// Directory with the browser front end (can use ~).
    pub static_dir: Option<String>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            apology: default_apology(),
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: default_image_endpoint(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            enable_cors: true,
            static_dir: None,
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_bot_name() -> String {
    "ClintonGPT".to_string()
}
fn default_apology() -> String {
    "Suure!".to_string()
}
fn default_image_endpoint() -> String {
    "https://api.giphy.com/v1/gifs/translate".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_connect_timeout_secs() -> u64 {
    5
}
fn default_port() -> u16 {
    8000
}
fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

/// Loads the effective configuration for the current working directory.
pub fn load_config() -> Result<Config> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    load_config_from(&current_dir)
}

/// Loads configuration as if the command had been started in `start_dir`.
pub fn load_config_from(start_dir: &Path) -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config(start_dir)?;
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config);
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", redacted(&merged_config));
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "ClintonGPT", "clintongpt") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config(start_dir: &Path) -> Result<Option<Config>> {
    match find_project_config_path(start_dir) {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            load_config_from_path(&path).map(Some)
        }
        None => {
            debug!("No {} found in {} or its ancestors.", PROJECT_CONFIG_FILENAME, start_dir.display());
            Ok(None)
        }
    }
}

fn find_project_config_path(start_dir: &Path) -> Option<PathBuf> {
    let mut path = start_dir;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Project value wins when it differs from the built-in default.
fn prefer<T: PartialEq>(project: T, user: T, default: &T) -> T {
    if &project != default {
        project
    } else {
        user
    }
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project = match project {
        Some(p) => p,
        None => return user,
    };
    let defaults = Config::default();

    let bot = BotConfig {
        name: prefer(project.bot.name, user.bot.name, &defaults.bot.name),
        apology: prefer(project.bot.apology, user.bot.apology, &defaults.bot.apology),
    };

    let image = ImageConfig {
        enabled: prefer(project.image.enabled, user.image.enabled, &defaults.image.enabled),
        endpoint: prefer(project.image.endpoint, user.image.endpoint, &defaults.image.endpoint),
        api_key: project.image.api_key.or(user.image.api_key),
        timeout_secs: prefer(
            project.image.timeout_secs,
            user.image.timeout_secs,
            &defaults.image.timeout_secs,
        ),
        connect_timeout_secs: prefer(
            project.image.connect_timeout_secs,
            user.image.connect_timeout_secs,
            &defaults.image.connect_timeout_secs,
        ),
    };

    // A category table is taken whole from one source; mixing would make the
    // declaration order (and with it the tie-break) hard to predict.
    let responder = if project.responder.is_builtin() && !project.responder.extend_builtin {
        user.responder
    } else {
        project.responder
    };

    let server = ServerSection {
        port: prefer(project.server.port, user.server.port, &defaults.server.port),
        host: prefer(project.server.host, user.server.host, &defaults.server.host),
        enable_cors: prefer(
            project.server.enable_cors,
            user.server.enable_cors,
            &defaults.server.enable_cors,
        ),
        static_dir: project.server.static_dir.or(user.server.static_dir),
    };

    Config {
        bot,
        image,
        responder,
        server,
    }
}

fn expand_config_paths(config: &mut Config) {
    if let Some(file) = config.responder.categories_file.as_mut() {
        *file = shellexpand::tilde(file.as_str()).into_owned();
        debug!("Expanded categories file: {}", file);
    }
    if let Some(dir) = config.server.static_dir.as_mut() {
        *dir = shellexpand::tilde(dir.as_str()).into_owned();
        debug!("Expanded static directory: {}", dir);
    }
}

fn validate_config(config: &Config) -> Result<()> {
    if config.bot.apology.trim().is_empty() {
        return Err(anyhow!(ChatError::Config(
            "bot.apology cannot be empty.".to_string()
        )));
    }
    if config.image.timeout_secs == 0 || config.image.connect_timeout_secs == 0 {
        return Err(anyhow!(ChatError::Config(
            "image timeouts must be greater than zero seconds.".to_string()
        )));
    }
    let endpoint = config.image.endpoint.as_str();
    if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
        return Err(anyhow!(ChatError::Config(format!(
            "Invalid image endpoint '{}'. Expected an http:// or https:// URL.",
            endpoint
        ))));
    }
    if let Some(dir) = &config.server.static_dir {
        let path = PathBuf::from(dir);
        if !path.is_dir() {
            return Err(anyhow!(ChatError::Config(format!(
                "Configured static directory '{}' does not exist or is not a directory.",
                path.display()
            ))));
        }
    }
    Ok(())
}

/// Copy of the config that is safe to log.
fn redacted(config: &Config) -> Config {
    let mut copy = config.clone();
    if copy.image.api_key.is_some() {
        copy.image.api_key = Some("***".to_string());
    }
    copy
}
