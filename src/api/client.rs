//! Storefront HTTP client
//!
//! Plain GET requests with browser-like headers, linear retry backoff and a
//! fixed pause after every successful response.
//!
//! # Example
//!
//! ```rust,no_run
//! use divashop_scraper::api::{PageFetcher, ShopClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ShopClient::new()?;
//!     let html = client.fetch_text("https://thedivashop.ng/collections/sale").await?;
//!     println!("Got {} bytes", html.len());
//!     Ok(())
//! }
//! ```

use super::error::{Result, ScrapeError};
use super::fetcher::PageFetcher;
use crate::utils::config::ScraperConfig;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client for storefront pages
#[derive(Debug, Clone)]
pub struct ShopClient {
    client: Client,
    max_retries: u32,
    backoff: Duration,
    politeness_delay: Duration,
}

impl ShopClient {
    /// Create a client with default settings
    pub fn new() -> Result<Self> {
        Self::with_config(&ScraperConfig::default())
    }

    /// Create a client from scraper configuration
    pub fn with_config(config: &ScraperConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| ScrapeError::Config(format!("user_agent: {}", e)))?,
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&config.accept_language)
                .map_err(|e| ScrapeError::Config(format!("accept_language: {}", e)))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            max_retries: config.max_retries.max(1),
            backoff: config.backoff(),
            politeness_delay: config.politeness_delay(),
        })
    }

    /// Single GET attempt, body included
    async fn get_once(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl PageFetcher for ShopClient {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        let mut attempt = 1;

        loop {
            match self.get_once(url).await {
                Ok(body) => {
                    debug!("GET {} ({} bytes)", url, body.len());
                    tokio::time::sleep(self.politeness_delay).await;
                    return Ok(body);
                }
                Err(e) if attempt < self.max_retries && e.is_retryable() => {
                    warn!(
                        "GET {} failed (attempt {}/{}): {}",
                        url, attempt, self.max_retries, e
                    );
                    tokio::time::sleep(self.backoff * attempt).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
