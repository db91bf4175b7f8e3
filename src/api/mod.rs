//! HTTP access to the storefront

pub mod client;
pub mod error;
pub mod fetcher;

pub use client::ShopClient;
pub use error::{Result, ScrapeError};
pub use fetcher::PageFetcher;
