//! # GIPHY Image Client
//!
//! File: cli/src/common/image/giphy.rs
//!
//! ## Overview
//!
//! Looks up one animated image per reply with a single GET request:
//!
//! ```text
//! GET {endpoint}?api_key={key}&s={query}
//! ```
//!
//! The URL is read from `data.images.fixed_height.url` in the JSON response.
//! Every failure (connect error, timeout, non-2xx status, body that is not
//! JSON, missing or empty URL) is logged and reported as `None`. Requests are
//! never retried.
//!
//! Both the whole request and the connect phase are bounded by the timeouts
//! in `[image]`, so a hung service delays a reply by at most `timeout_secs`.
//!
use super::ImageLookup;
use crate::core::config::ImageConfig;
use crate::core::error::{ChatError, Result};
use anyhow::Context;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

/// JSON pointer to the image URL in a translate response.
const IMAGE_URL_POINTER: &str = "/data/images/fixed_height/url";

pub struct GiphyClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl fmt::Debug for GiphyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GiphyClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"***")
            .finish()
    }
}

impl GiphyClient {
    pub fn new(cfg: &ImageConfig, api_key: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
            .build()
            .map_err(ChatError::from)
            .context("Failed to build image service HTTP client")?;
        debug!(
            "Image lookups via {} (timeout {}s, connect {}s)",
            cfg.endpoint, cfg.timeout_secs, cfg.connect_timeout_secs
        );
        Ok(Self {
            http,
            endpoint: cfg.endpoint.clone(),
            api_key,
        })
    }

    /// Performs the request and reports failures as errors.
    pub async fn fetch(&self, query: &str) -> std::result::Result<Option<String>, ChatError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("api_key", self.api_key.as_str()), ("s", query)])
            .send()
            .await
            .map_err(redact_url)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::ImageLookup(format!(
                "service answered with status {}",
                status
            )));
        }

        let body: Value = response.json().await.map_err(redact_url)?;
        Ok(extract_image_url(&body))
    }
}

/// Drops the request URL from a client error; it carries the API key.
fn redact_url(e: reqwest::Error) -> ChatError {
    ChatError::from(e.without_url())
}

/// Reads a non-empty URL from `data.images.fixed_height.url`.
pub fn extract_image_url(body: &Value) -> Option<String> {
    body.pointer(IMAGE_URL_POINTER)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl ImageLookup for GiphyClient {
    async fn lookup(&self, query: &str) -> Option<String> {
        match self.fetch(query).await {
            Ok(Some(url)) => {
                debug!("Image for '{}': {}", query, url);
                Some(url)
            }
            Ok(None) => {
                debug!("No image found for '{}'", query);
                None
            }
            Err(e) => {
                warn!("Image lookup for '{}' failed: {}", query, e);
                None
            }
        }
    }
}
