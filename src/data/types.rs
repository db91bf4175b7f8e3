//! Product records
//!
//! - `Variant`: one purchasable option of a product (size, colour, scent...)
//! - `Product`: everything scraped for a single product page

use crate::parse::price::parse_price;
use crate::parse::{ProductDraft, VariantSet};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A purchasable variant of a product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    /// Display title, e.g. "250ml" or "Size: 250ml / Black"
    pub option_title: Option<String>,
    pub price: Option<f64>,
    pub compare_at_price: Option<f64>,
    pub sku: Option<String>,
    pub available: Option<bool>,
    /// Option name to chosen value, e.g. {"Size": "250ml"}
    #[serde(default)]
    pub options: IndexMap<String, Option<String>>,
}

impl Variant {
    /// Variant known only by its label
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            option_title: Some(title.into()),
            ..Default::default()
        }
    }
}

/// A scraped product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Collection slug the product was found in
    pub collection: String,
    pub title: String,
    /// Canonical `<base>/products/<handle>` URL
    pub url: String,
    /// Lowest known price (variant prices preferred over the page price)
    pub price: Option<f64>,
    pub compare_at_price: Option<f64>,
    pub currency: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub vendor: Option<String>,
    pub product_type: Option<String>,
    #[serde(default)]
    pub variants: Vec<Variant>,
    /// Option names in storefront order, e.g. ["Size", "Color"]
    #[serde(default)]
    pub option_names: Vec<String>,
    /// Sorted distinct values per option name, keyed in `option_names` order
    #[serde(default)]
    pub option_values: IndexMap<String, Vec<String>>,
}

fn lowest(prices: impl Iterator<Item = f64>) -> Option<f64> {
    prices.fold(None, |acc, p| Some(acc.map_or(p, |a: f64| a.min(p))))
}

impl Product {
    /// Merge a parsed page with the variant endpoint's data
    ///
    /// Endpoint variants replace HTML-inferred ones when there are any. The
    /// headline prices are the lowest variant prices, falling back to the
    /// prices displayed on the page.
    pub fn assemble(draft: ProductDraft, variant_set: Option<VariantSet>) -> Self {
        let VariantSet {
            option_names,
            option_values,
            variants,
        } = variant_set.unwrap_or_default();

        let variants = if variants.is_empty() {
            draft.html_variants
        } else {
            variants
        };

        let price = lowest(variants.iter().filter_map(|v| v.price))
            .or_else(|| draft.price_text.as_deref().and_then(parse_price));
        let compare_at_price = lowest(variants.iter().filter_map(|v| v.compare_at_price))
            .or_else(|| draft.compare_text.as_deref().and_then(parse_price));

        Self {
            collection: draft.collection,
            title: draft.title,
            url: draft.url,
            price,
            compare_at_price,
            currency: draft.currency,
            description: draft.description,
            images: draft.images,
            tags: draft.tags,
            vendor: draft.vendor,
            product_type: draft.product_type,
            variants,
            option_names,
            option_values,
        }
    }

    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    /// True when the product is discounted against its compare-at price
    pub fn is_on_sale(&self) -> bool {
        matches!(
            (self.price, self.compare_at_price),
            (Some(price), Some(compare)) if compare > price
        )
    }

    /// Percentage discount relative to the compare-at price
    pub fn discount_pct(&self) -> Option<f64> {
        match (self.price, self.compare_at_price) {
            (Some(price), Some(compare)) if compare > 0.0 && compare > price => {
                Some((compare - price) / compare * 100.0)
            }
            _ => None,
        }
    }
}
