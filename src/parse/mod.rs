//! Page parsing
//!
//! Pure functions over page bodies. Parsed documents never outlive the call,
//! so results are owned values that can cross `.await` points.

pub mod links;
pub mod price;
pub mod product;
pub mod variants;

pub use links::{parse_collection_page, CollectionPage};
pub use price::{detect_currency, parse_price};
pub use product::{parse_product_html, ProductDraft};
pub use variants::{parse_variant_json, VariantSet};

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

/// Compile a CSS selector, logging instead of failing on bad syntax
pub(crate) fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(sel) => Some(sel),
        Err(e) => {
            warn!("Invalid selector {:?}: {:?}", css, e);
            None
        }
    }
}

/// All elements of `document` matching `css`, in document order
pub(crate) fn select_all<'a>(document: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    selector(css)
        .map(|sel| document.select(&sel).collect())
        .unwrap_or_default()
}

/// First element of `document` matching `css`
pub(crate) fn select_first<'a>(document: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    select_all(document, css).into_iter().next()
}

/// All descendants of `element` matching `css`
pub(crate) fn select_within<'a>(element: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    selector(css)
        .map(|sel| element.select(&sel).collect())
        .unwrap_or_default()
}

/// Text nodes of `element`, trimmed, empties dropped, joined with `separator`
pub(crate) fn stripped_text(element: ElementRef<'_>, separator: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}
