//! Product page parsing
//!
//! Structured data (JSON-LD) is preferred; theme markup is the fallback for
//! every field. Selectors cover the common Shopify themes.

use super::links::{full_url, strip_query};
use super::price::{detect_currency, price_in_label};
use super::{select_all, select_first, select_within, stripped_text};
use crate::data::types::Variant;
use scraper::Html;
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::warn;

const TITLE_SELECTOR: &str = "h1.product__title, h1.product-title, h1.product-name, h1";

const PRICE_SELECTOR: &str = ".price__current, .price .price-item--regular, .product__price, \
     span.price-item--regular, .price.price--large .price-item--regular";

const COMPARE_PRICE_SELECTOR: &str =
    ".price__was, .price .price-item--compare, span.price-item--sale, .price-item--compare";

const DESCRIPTION_SELECTOR: &str =
    ".product__description, .product-description, #tab-description, .rte";

const IMAGE_SELECTOR: &str =
    ".product__media img, .product-gallery img, .product-images img, img[src]";

const VENDOR_SELECTOR: &str = ".product-meta__vendor, a.product-vendor";
const TYPE_SELECTOR: &str = ".product-meta__type, .product__type";
const TAG_SELECTOR: &str = ".product-tags a, .tags a";

const VARIANT_SELECT_SELECTOR: &str =
    ".product-form__input select, form[action*='cart/add'] select";
const VARIANT_LABEL_SELECTOR: &str =
    ".product-form__input label, .variant-input label, .swatch__label";

/// Longer labels are prose, not option names
const MAX_VARIANT_LABEL_CHARS: usize = 80;

/// Image URLs that are theme chrome rather than product photos
const IMAGE_DENYLIST: &[&str] = &[
    "icon",
    "placeholder",
    "spinner",
    "loading",
    "Fast_Delivery",
    "Quick_Customer_Support",
    "100_Authentic_Products",
    "Buy-More-Save-More",
    "/files/",
];

/// Everything read from a product page before variant data is merged in
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub collection: String,
    pub title: String,
    pub url: String,
    /// Raw current price as displayed or reported by structured data
    pub price_text: Option<String>,
    pub compare_text: Option<String>,
    pub currency: Option<String>,
    pub description: Option<String>,
    pub images: Vec<String>,
    pub tags: Vec<String>,
    pub vendor: Option<String>,
    pub product_type: Option<String>,
    /// Variants inferred from option selectors and swatch labels
    pub html_variants: Vec<Variant>,
}

fn non_empty(s: String) -> Option<String> {
    (!s.is_empty()).then_some(s)
}

fn is_ld_product(value: &Value) -> bool {
    value.get("@type").and_then(Value::as_str) == Some("Product")
}

/// First JSON-LD block describing a `Product`
fn find_ld_product(document: &Html) -> Option<Map<String, Value>> {
    for script in select_all(document, r#"script[type="application/ld+json"]"#) {
        let raw: String = script.text().collect();
        let data: Value = match serde_json::from_str(&raw) {
            Ok(data) => data,
            Err(_) => continue,
        };

        let found = match data {
            Value::Array(items) => items.into_iter().find(is_ld_product),
            other if is_ld_product(&other) => Some(other),
            _ => None,
        };

        if let Some(Value::Object(map)) = found {
            return Some(map);
        }
    }
    None
}

fn ld_string(ld: Option<&Map<String, Value>>, key: &str) -> Option<String> {
    ld.and_then(|m| m.get(key))
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .and_then(non_empty)
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Price text and currency from JSON-LD `offers`
///
/// A list of offers contributes its lowest price and the first currency seen.
fn ld_offer(ld: &Map<String, Value>) -> (Option<String>, Option<String>) {
    match ld.get("offers") {
        Some(offer @ Value::Object(_)) => (
            offer.get("price").and_then(value_as_text),
            offer
                .get("priceCurrency")
                .and_then(Value::as_str)
                .map(str::to_string),
        ),
        Some(Value::Array(offers)) => {
            let lowest = offers
                .iter()
                .filter_map(|o| o.get("price").and_then(value_as_f64))
                .fold(None, |acc: Option<f64>, p| Some(acc.map_or(p, |a| a.min(p))));
            let currency = offers
                .iter()
                .filter_map(|o| o.get("priceCurrency").and_then(Value::as_str))
                .find(|c| !c.is_empty())
                .map(str::to_string);
            (lowest.map(|p| p.to_string()), currency)
        }
        _ => (None, None),
    }
}

fn ld_images(ld: &Map<String, Value>) -> Vec<String> {
    let image_url = |v: &Value| -> Option<String> {
        match v {
            Value::String(s) => Some(strip_query(s).to_string()),
            Value::Object(o) => o
                .get("url")
                .and_then(Value::as_str)
                .map(|s| strip_query(s).to_string()),
            _ => None,
        }
    };

    let mut images = Vec::new();
    match ld.get("image") {
        Some(Value::Array(items)) => images.extend(items.iter().filter_map(|v| image_url(v))),
        Some(single) => images.extend(image_url(single)),
        None => {}
    }
    dedup_in_order(images)
}

fn html_images(base_url: &str, document: &Html) -> Vec<String> {
    let images = select_all(document, IMAGE_SELECTOR)
        .into_iter()
        .filter_map(|img| {
            let attrs = img.value();
            attrs
                .attr("data-src")
                .filter(|s| !s.is_empty())
                .or_else(|| attrs.attr("src"))
                .filter(|s| !s.is_empty())
        })
        .filter_map(|src| {
            let src = if let Some(rest) = src.strip_prefix("//") {
                format!("https://{}", rest)
            } else if src.starts_with('/') {
                full_url(base_url, src)
            } else {
                src.to_string()
            };

            if src.starts_with("data:image") || IMAGE_DENYLIST.iter().any(|t| src.contains(t)) {
                return None;
            }
            Some(strip_query(&src).to_string())
        })
        .collect();

    dedup_in_order(images)
}

fn dedup_in_order(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Variants inferred from `<select>` options and swatch/radio labels
fn html_variants(document: &Html) -> Vec<Variant> {
    let mut variants = Vec::new();

    for select in select_all(document, VARIANT_SELECT_SELECTOR) {
        for option in select_within(select, "option") {
            let label = stripped_text(option, "");
            if label.is_empty() {
                continue;
            }
            let price = price_in_label(&label);
            variants.push(Variant {
                price,
                ..Variant::titled(label)
            });
        }
    }

    for label in select_all(document, VARIANT_LABEL_SELECTOR) {
        let text = stripped_text(label, " ");
        if !text.is_empty() && text.chars().count() < MAX_VARIANT_LABEL_CHARS {
            variants.push(Variant::titled(text));
        }
    }

    let mut seen = HashSet::new();
    variants
        .into_iter()
        .filter(|v| {
            let key = v.option_title.as_deref().unwrap_or_default().to_lowercase();
            !key.is_empty() && seen.insert(key)
        })
        .collect()
}

fn first_text(document: &Html, css: &str, separator: &str) -> Option<String> {
    select_first(document, css)
        .map(|el| stripped_text(el, separator))
        .and_then(non_empty)
}

/// Parse a product page; `None` when no title can be found
pub fn parse_product_html(
    base_url: &str,
    collection: &str,
    url: &str,
    html: &str,
) -> Option<ProductDraft> {
    let document = Html::parse_document(html);
    let ld = find_ld_product(&document);

    let title = ld_string(ld.as_ref(), "name").or_else(|| first_text(&document, TITLE_SELECTOR, ""));
    let title = match title {
        Some(title) => title,
        None => {
            warn!("No title parsed for {}", url);
            return None;
        }
    };

    let (ld_price, mut currency) = ld.as_ref().map(ld_offer).unwrap_or_default();
    let price_text = ld_price
        .and_then(non_empty)
        .or_else(|| first_text(&document, PRICE_SELECTOR, ""));
    let compare_text = first_text(&document, COMPARE_PRICE_SELECTOR, "");

    if currency.is_none() {
        let shown = format!(
            "{}{}",
            price_text.as_deref().unwrap_or_default(),
            compare_text.as_deref().unwrap_or_default()
        );
        currency = detect_currency(&shown);
    }

    let description = ld_string(ld.as_ref(), "description")
        .or_else(|| first_text(&document, DESCRIPTION_SELECTOR, "\n"));

    let mut images = ld.as_ref().map(ld_images).unwrap_or_default();
    if images.is_empty() {
        images = html_images(base_url, &document);
    }

    let tags = select_all(&document, TAG_SELECTOR)
        .into_iter()
        .map(|a| stripped_text(a, ""))
        .filter(|t| !t.is_empty())
        .collect();

    Some(ProductDraft {
        collection: collection.to_string(),
        title,
        url: url.to_string(),
        price_text,
        compare_text,
        currency,
        description,
        images,
        tags,
        vendor: first_text(&document, VENDOR_SELECTOR, ""),
        product_type: first_text(&document, TYPE_SELECTOR, ""),
        html_variants: html_variants(&document),
    })
}
