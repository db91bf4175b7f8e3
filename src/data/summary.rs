//! Catalog summary statistics over scraped products

use super::types::Product;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Price distribution of a group of products
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceStats {
    pub count: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

impl PriceStats {
    fn from_prices(prices: &[f64]) -> Self {
        if prices.is_empty() {
            return Self::default();
        }

        Self {
            count: prices.len(),
            min: prices.iter().copied().reduce(f64::min),
            max: prices.iter().copied().reduce(f64::max),
            mean: Some(prices.iter().sum::<f64>() / prices.len() as f64),
        }
    }
}

/// Per-collection breakdown
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CollectionStats {
    pub products: usize,
    pub on_sale: usize,
    pub prices: PriceStats,
}

/// Overview of a scraped catalog
#[derive(Debug, Clone, Serialize)]
pub struct CatalogSummary {
    pub generated_at: DateTime<Utc>,
    pub products: usize,
    pub variants: usize,
    pub on_sale: usize,
    pub without_price: usize,
    /// Deepest markdown against a compare-at price, in percent
    pub max_discount_pct: Option<f64>,
    pub prices: PriceStats,
    pub collections: BTreeMap<String, CollectionStats>,
}

impl CatalogSummary {
    pub fn from_products(products: &[Product]) -> Self {
        let mut grouped: BTreeMap<&str, Vec<&Product>> = BTreeMap::new();
        for p in products {
            grouped.entry(p.collection.as_str()).or_default().push(p);
        }

        let collections = grouped
            .into_iter()
            .map(|(name, items)| {
                let prices: Vec<f64> = items.iter().filter_map(|p| p.price).collect();
                let stats = CollectionStats {
                    products: items.len(),
                    on_sale: items.iter().filter(|p| p.is_on_sale()).count(),
                    prices: PriceStats::from_prices(&prices),
                };
                (name.to_string(), stats)
            })
            .collect();

        let prices: Vec<f64> = products.iter().filter_map(|p| p.price).collect();

        Self {
            generated_at: Utc::now(),
            products: products.len(),
            variants: products.iter().map(Product::variant_count).sum(),
            on_sale: products.iter().filter(|p| p.is_on_sale()).count(),
            without_price: products.len() - prices.len(),
            max_discount_pct: products
                .iter()
                .filter_map(Product::discount_pct)
                .reduce(f64::max),
            prices: PriceStats::from_prices(&prices),
            collections,
        }
    }
}

fn fmt_price(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}

impl fmt::Display for CatalogSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Catalog Summary ({})", self.generated_at.format("%Y-%m-%d %H:%M UTC"))?;
        writeln!(f, "================")?;
        writeln!(f, "Products:      {}", self.products)?;
        writeln!(f, "Variants:      {}", self.variants)?;
        writeln!(f, "On sale:       {}", self.on_sale)?;
        writeln!(f, "Without price: {}", self.without_price)?;
        if let Some(pct) = self.max_discount_pct {
            writeln!(f, "Max discount:  {:.1}%", pct)?;
        }
        writeln!(
            f,
            "Price range:   {} - {} (mean {})",
            fmt_price(self.prices.min),
            fmt_price(self.prices.max),
            fmt_price(self.prices.mean)
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "{:<28} {:>8} {:>8} {:>12} {:>12}",
            "Collection", "Products", "On sale", "Min", "Max"
        )?;
        writeln!(f, "{:-<72}", "")?;
        for (name, stats) in &self.collections {
            writeln!(
                f,
                "{:<28} {:>8} {:>8} {:>12} {:>12}",
                name,
                stats.products,
                stats.on_sale,
                fmt_price(stats.prices.min),
                fmt_price(stats.prices.max)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn product(collection: &str, price: Option<f64>, compare: Option<f64>) -> Product {
        Product {
            collection: collection.to_string(),
            title: "Item".to_string(),
            url: format!("https://thedivashop.ng/products/{}-{:?}", collection, price),
            price,
            compare_at_price: compare,
            currency: None,
            description: None,
            images: Vec::new(),
            tags: Vec::new(),
            vendor: None,
            product_type: None,
            variants: Vec::new(),
            option_names: Vec::new(),
            option_values: IndexMap::new(),
        }
    }

    #[test]
    fn test_summary_counts() {
        let products = vec![
            product("sale", Some(1000.0), Some(1500.0)),
            product("sale", Some(3000.0), None),
            product("darling", Some(2000.0), None),
            product("darling", None, None),
        ];

        let summary = CatalogSummary::from_products(&products);

        assert_eq!(summary.products, 4);
        assert_eq!(summary.on_sale, 1);
        assert_eq!(summary.without_price, 1);
        assert_eq!(summary.prices.count, 3);
        assert_eq!(summary.prices.min, Some(1000.0));
        assert_eq!(summary.prices.max, Some(3000.0));
        assert!((summary.prices.mean.unwrap() - 2000.0).abs() < 1e-9);

        let sale = &summary.collections["sale"];
        assert_eq!(sale.products, 2);
        assert_eq!(sale.on_sale, 1);
        assert_eq!(summary.collections["darling"].prices.count, 1);
    }

    #[test]
    fn test_max_discount() {
        let products = vec![
            product("sale", Some(7500.0), Some(10000.0)),
            product("sale", Some(1000.0), Some(2000.0)),
            product("darling", Some(2000.0), None),
        ];

        let summary = CatalogSummary::from_products(&products);
        assert!((summary.max_discount_pct.unwrap() - 50.0).abs() < 1e-9);
        assert!(summary.to_string().contains("Max discount:  50.0%"));

        let none = CatalogSummary::from_products(&products[2..]);
        assert_eq!(none.max_discount_pct, None);
        assert!(!none.to_string().contains("Max discount"));
    }

    #[test]
    fn test_empty_catalog() {
        let summary = CatalogSummary::from_products(&[]);
        assert_eq!(summary.products, 0);
        assert_eq!(summary.prices, PriceStats::default());
        assert!(summary.to_string().contains("Price range:   - - - (mean -)"));
    }

    #[test]
    fn test_display_lists_collections() {
        let summary = CatalogSummary::from_products(&[product("amigos", Some(2500.0), None)]);
        let text = summary.to_string();
        assert!(text.contains("amigos"));
        assert!(text.contains("2500.00"));
    }
}
