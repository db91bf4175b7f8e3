//! Collection crawling
//!
//! Walks collection listings page by page, visits every product found and
//! merges each product page with its variant JSON. Requests are sequential;
//! pacing is left to the `PageFetcher`.

use crate::api::{PageFetcher, Result};
use crate::data::types::Product;
use crate::parse::links::{collection_slug, page_url, product_json_url};
use crate::parse::{parse_collection_page, parse_product_html, parse_variant_json, CollectionPage};
use crate::utils::config::ScraperConfig;
use std::collections::HashMap;
use tracing::{debug, error, info, warn};

/// One listing page of a collection
#[derive(Debug, Clone, PartialEq)]
pub struct PageSnapshot {
    /// Bare collection URL for the first page, `?page=N` afterwards
    pub url: String,
    pub page: CollectionPage,
}

/// Storefront crawler
pub struct Crawler<F: PageFetcher> {
    fetcher: F,
    base_url: String,
    max_pages: usize,
}

impl<F: PageFetcher> Crawler<F> {
    pub fn new(fetcher: F, config: &ScraperConfig) -> Self {
        Self {
            fetcher,
            base_url: config.base_url.clone(),
            max_pages: config.max_pages.max(1),
        }
    }

    /// Collect the listing pages of a collection
    ///
    /// Stops at the first page without a "next" link, at the first page past
    /// the first that lists no products, or after `max_pages`. Failing to
    /// fetch the first page is an error; a later failure ends pagination.
    pub async fn paginate(&self, collection_url: &str) -> Result<Vec<PageSnapshot>> {
        let mut pages = Vec::new();

        for page_no in 1..=self.max_pages {
            let url = page_url(collection_url, page_no);
            let html = match self.fetcher.fetch_text(&url).await {
                Ok(html) => html,
                Err(e) if page_no == 1 => return Err(e),
                Err(e) => {
                    warn!("Stopping pagination at {}: {}", url, e);
                    break;
                }
            };

            let page = parse_collection_page(&self.base_url, &html);
            if !page.has_products && page_no > 1 {
                break;
            }

            let has_next = page.has_next;
            pages.push(PageSnapshot {
                url: if page_no == 1 {
                    collection_url.to_string()
                } else {
                    url
                },
                page,
            });

            if !has_next {
                break;
            }
            if page_no == self.max_pages {
                warn!("Reached page limit ({}) for {}", self.max_pages, collection_url);
            }
        }

        Ok(pages)
    }

    /// Scrape a single product page; `None` if it cannot be fetched or has no title
    pub async fn scrape_product(&self, collection: &str, url: &str) -> Option<Product> {
        let html = match self.fetcher.fetch_text(url).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Failed to fetch product {}: {}", url, e);
                return None;
            }
        };

        let draft = parse_product_html(&self.base_url, collection, url, &html)?;

        let variant_set = match product_json_url(&self.base_url, url) {
            Some(json_url) => match self.fetcher.fetch_json(&json_url).await {
                Ok(data) => parse_variant_json(&data),
                Err(e) => {
                    debug!("No variant data from {}: {}", json_url, e);
                    None
                }
            },
            None => None,
        };

        Some(Product::assemble(draft, variant_set))
    }

    /// Scrape every product listed in a collection
    pub async fn scrape_collection(&self, collection_url: &str) -> Result<Vec<Product>> {
        info!("Scraping collection: {}", collection_url);
        let slug = collection_slug(collection_url);

        let pages = self.paginate(collection_url).await?;
        let mut products = Vec::new();

        for snapshot in &pages {
            info!(
                "Found {} product links on {}",
                snapshot.page.product_links.len(),
                snapshot.url
            );

            for link in &snapshot.page.product_links {
                if let Some(product) = self.scrape_product(slug, link).await {
                    products.push(product);
                }
            }
        }

        Ok(products)
    }

    /// Scrape several collections, skipping those that fail outright
    ///
    /// Products listed in more than one collection are kept once, at their
    /// first position, with the most recently scraped record.
    pub async fn scrape_all<S: AsRef<str>>(&self, collection_urls: &[S]) -> Vec<Product> {
        let mut all = Vec::new();

        for url in collection_urls {
            let url = url.as_ref();
            match self.scrape_collection(url).await {
                Ok(products) => all.extend(products),
                Err(e) => error!("Skipping collection {}: {}", url, e),
            }
        }

        dedup_by_url(all)
    }
}

/// Keep one record per URL: first-seen position, last-seen value
pub fn dedup_by_url(products: Vec<Product>) -> Vec<Product> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<Product> = Vec::with_capacity(products.len());

    for product in products {
        match index.get(&product.url) {
            Some(&i) => unique[i] = product,
            None => {
                index.insert(product.url.clone(), unique.len());
                unique.push(product);
            }
        }
    }

    unique
}
