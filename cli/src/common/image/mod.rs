//! # Image Lookup (`common::image`)
//!
//! File: cli/src/common/image/mod.rs
//!
//! ## Overview
//!
//! Best-effort lookup of an animated image for a reply. The conversation only
//! sees [`ImageLookup::lookup`], which never fails: network errors, bad
//! status codes, malformed payloads and empty results all come back as `None`
//! and are treated exactly like "no image available".
//!
//! Implementations:
//! - [`giphy::GiphyClient`]: HTTP client for a GIPHY-style translate endpoint.
//! - [`NoImages`]: always `None`; used with `--no-image` or without an API key.
//!
use crate::core::config::ImageConfig;
use crate::core::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

pub mod giphy;

pub use giphy::GiphyClient;

/// Source of image URLs for reply queries.
#[async_trait]
pub trait ImageLookup: Send + Sync {
    /// Returns an image URL for `query`, or `None` if there is none or the
    /// lookup failed for any reason.
    async fn lookup(&self, query: &str) -> Option<String>;
}

/// Lookup that never finds anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoImages;

#[async_trait]
impl ImageLookup for NoImages {
    async fn lookup(&self, _query: &str) -> Option<String> {
        None
    }
}

/// Chooses the lookup implementation for a command.
///
/// `api_key` (from the command line or `GIPHY_API_KEY`) takes precedence over
/// the configured key. Images are skipped when `disabled` is set, when the
/// config turns them off, or when no key is available.
pub fn from_config(
    cfg: &ImageConfig,
    api_key: Option<String>,
    disabled: bool,
) -> Result<Arc<dyn ImageLookup>> {
    if disabled || !cfg.enabled {
        info!("Image lookups disabled.");
        return Ok(Arc::new(NoImages));
    }
    let usable = |k: &String| !k.trim().is_empty();
    let key = api_key
        .filter(usable)
        .or_else(|| cfg.api_key.clone().filter(usable));
    match key {
        Some(key) => Ok(Arc::new(GiphyClient::new(cfg, key)?)),
        None => {
            info!("No image service API key configured; replies will be text only.");
            Ok(Arc::new(NoImages))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_images_is_always_none() {
        assert_eq!(NoImages.lookup("greeting hello there").await, None);
        assert_eq!(NoImages.lookup("").await, None);
    }

    #[tokio::test]
    async fn test_from_config_without_key_never_calls_out() {
        // Endpoint points nowhere; with no key it must not be used.
        let cfg = ImageConfig {
            endpoint: "http://127.0.0.1:9".into(),
            ..Default::default()
        };
        let lookup = from_config(&cfg, None, false).unwrap();
        assert_eq!(lookup.lookup("anything").await, None);

        let blank = from_config(&cfg, Some("   ".into()), false).unwrap();
        assert_eq!(blank.lookup("anything").await, None);
    }

    #[tokio::test]
    async fn test_blank_override_falls_back_to_config_key() {
        let router = axum::Router::new().route(
            "/translate",
            axum::routing::get(|| async {
                axum::Json(serde_json::json!(
                    {"data": {"images": {"fixed_height": {"url": "https://media.example/k.gif"}}}}
                ))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let cfg = ImageConfig {
            endpoint: format!("http://{}/translate", addr),
            api_key: Some("config-key".into()),
            ..Default::default()
        };
        let lookup = from_config(&cfg, Some(String::new()), false).unwrap();
        assert_eq!(
            lookup.lookup("suure").await.as_deref(),
            Some("https://media.example/k.gif")
        );
    }

    #[tokio::test]
    async fn test_from_config_disabled() {
        let cfg = ImageConfig {
            api_key: Some("key".into()),
            ..Default::default()
        };
        let lookup = from_config(&cfg, None, true).unwrap();
        assert_eq!(lookup.lookup("anything").await, None);

        let off = ImageConfig {
            enabled: false,
            ..cfg
        };
        let lookup = from_config(&off, Some("key".into()), false).unwrap();
        assert_eq!(lookup.lookup("anything").await, None);
    }
}
