//! Page source abstraction
//!
//! The crawler only needs page bodies, so it is generic over this trait.
//! `ShopClient` implements it over HTTP; tests use in-memory fixtures.

use super::error::Result;
use async_trait::async_trait;

/// Source of storefront pages
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a page body as text
    async fn fetch_text(&self, url: &str) -> Result<String>;

    /// Fetch a page body and parse it as JSON
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value> {
        let body = self.fetch_text(url).await?;
        Ok(serde_json::from_str(&body)?)
    }
}
