//! URL helpers and collection page parsing

use super::select_all;
use scraper::Html;
use std::collections::BTreeSet;

const PRODUCT_CARD_SELECTOR: &str =
    ".product-grid .grid__item, .collection .grid__item, .product-card, .product-grid-item";

const NEXT_PAGE_SELECTOR: &str = ".pagination a[rel='next'], a.pagination__next";

const PRODUCT_LINK_SELECTOR: &str = "a.product-card, a.full-unstyled-link, a.product-item__title, \
     a.grid-view-item__link, a.product-title";

/// What a single collection page tells us
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionPage {
    /// Page lists at least one product card
    pub has_products: bool,
    /// Pagination offers a next page
    pub has_next: bool,
    /// Canonical product URLs, sorted and deduplicated
    pub product_links: Vec<String>,
}

/// Resolve a site-relative href against the storefront root
pub fn full_url(base_url: &str, href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{}{}", base_url.trim_end_matches('/'), href)
    }
}

/// Drop the query string
pub fn strip_query(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

/// Product handle: the path segment after `/products/`
pub fn product_handle(url: &str) -> &str {
    let tail = url.rsplit("/products/").next().unwrap_or(url);
    strip_query(tail).trim_matches('/')
}

/// Collection slug: the last path segment of a collection URL
pub fn collection_slug(url: &str) -> &str {
    strip_query(url)
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(url)
}

/// Collection-scoped product URLs collapse onto `<base>/products/<handle>`
pub fn canonical_product_url(base_url: &str, url: &str) -> String {
    if url.contains("/collections/") && url.contains("/products/") {
        format!(
            "{}/products/{}",
            base_url.trim_end_matches('/'),
            product_handle(url)
        )
    } else {
        strip_query(url).to_string()
    }
}

/// URL of the `page`-th listing page
pub fn page_url(collection_url: &str, page: usize) -> String {
    format!("{}?page={}", collection_url, page)
}

/// Shopify JSON endpoint for a product page
pub fn product_json_url(base_url: &str, product_url: &str) -> Option<String> {
    if !product_url.contains("/products/") {
        return None;
    }
    Some(format!(
        "{}/products/{}.js",
        base_url.trim_end_matches('/'),
        product_handle(product_url)
    ))
}

/// Parse a collection listing page
pub fn parse_collection_page(base_url: &str, html: &str) -> CollectionPage {
    let document = Html::parse_document(html);

    let has_products = !select_all(&document, PRODUCT_CARD_SELECTOR).is_empty();
    let has_next = !select_all(&document, NEXT_PAGE_SELECTOR).is_empty();

    CollectionPage {
        has_products,
        has_next,
        product_links: extract_product_links(base_url, &document),
    }
}

fn extract_product_links(base_url: &str, document: &Html) -> Vec<String> {
    let product_hrefs = |css: &str| -> Vec<String> {
        select_all(document, css)
            .into_iter()
            .filter_map(|a| a.value().attr("href"))
            .filter(|href| href.contains("/products/"))
            .map(|href| full_url(base_url, href))
            .collect()
    };

    let mut links = product_hrefs(PRODUCT_LINK_SELECTOR);
    if links.is_empty() {
        links = product_hrefs("a[href]");
    }

    links
        .iter()
        .map(|url| canonical_product_url(base_url, url))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
