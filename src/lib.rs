//! # Diva Shop Scraper
//!
//! Scrapes product collections from The Diva Shop (a Shopify storefront) and
//! exports the catalog as JSON and CSV.
//!
//! - `api`: HTTP client with retries and polite pacing
//! - `parse`: collection listings, product pages, variant JSON
//! - `crawler`: pagination and per-product orchestration
//! - `data`: product records, CSV/JSON persistence, catalog summary
//! - `utils`: configuration, logging and Ctrl-C handling
//!
//! ## Example
//!
//! ```no_run
//! use divashop_scraper::{Config, Crawler, ProductStore, ShopClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let client = ShopClient::with_config(&config.scraper)?;
//!     let crawler = Crawler::new(client, &config.scraper);
//!
//!     let products = crawler.scrape_all(&config.scraper.collections).await;
//!     ProductStore::write_all(&products, &config.output)?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod crawler;
pub mod data;
pub mod parse;
pub mod utils;

pub use api::{PageFetcher, ScrapeError, ShopClient};
pub use crawler::{dedup_by_url, Crawler, PageSnapshot};
pub use data::{CatalogSummary, Product, ProductStore, Variant};
pub use utils::{setup_logging, until_interrupted, Config, INTERRUPTED_EXIT_CODE};
