//! Saving and loading scraped products
//!
//! JSON keeps the full nested record; CSV flattens every product to one row.

use super::types::Product;
use crate::utils::config::OutputConfig;
use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// CSV columns, in `CsvRow` field order
const CSV_HEADER: [&str; 14] = [
    "collection",
    "title",
    "url",
    "price",
    "compare_at_price",
    "currency",
    "vendor",
    "product_type",
    "tags",
    "images",
    "variant_count",
    "variant_titles",
    "variant_option_names",
    "variant_option_values",
];

/// Flat CSV view of a product
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    collection: &'a str,
    title: &'a str,
    url: &'a str,
    price: Option<f64>,
    compare_at_price: Option<f64>,
    currency: &'a str,
    vendor: &'a str,
    product_type: &'a str,
    tags: String,
    images: String,
    variant_count: usize,
    variant_titles: String,
    variant_option_names: String,
    variant_option_values: String,
}

impl<'a> From<&'a Product> for CsvRow<'a> {
    fn from(p: &'a Product) -> Self {
        let variant_titles = p
            .variants
            .iter()
            .map(|v| v.option_title.as_deref().unwrap_or_default())
            .collect::<Vec<_>>()
            .join("; ");

        let option_values = p
            .option_names
            .iter()
            .map(|name| {
                let values = p
                    .option_values
                    .get(name)
                    .map(|v| v.join("|"))
                    .unwrap_or_default();
                format!("{}: {}", name, values)
            })
            .collect::<Vec<_>>()
            .join("; ");

        Self {
            collection: &p.collection,
            title: &p.title,
            url: &p.url,
            price: p.price,
            compare_at_price: p.compare_at_price,
            currency: p.currency.as_deref().unwrap_or_default(),
            vendor: p.vendor.as_deref().unwrap_or_default(),
            product_type: p.product_type.as_deref().unwrap_or_default(),
            tags: p.tags.join("; "),
            images: p.images.join("; "),
            variant_count: p.variants.len(),
            variant_titles,
            variant_option_names: p.option_names.join(", "),
            variant_option_values: option_values,
        }
    }
}

/// Product persistence
pub struct ProductStore;

impl ProductStore {
    /// Save products as pretty-printed JSON
    pub fn save_json<P: AsRef<Path>>(products: &[Product], path: P) -> Result<()> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create file: {:?}", path.as_ref()))?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, products)?;
        writer.flush()?;
        Ok(())
    }

    /// Save products as one flattened CSV row each
    ///
    /// The header is written even when there are no products.
    pub fn save_csv<P: AsRef<Path>>(products: &[Product], path: P) -> Result<()> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create file: {:?}", path.as_ref()))?;

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        writer.write_record(CSV_HEADER)?;

        for product in products {
            writer.serialize(CsvRow::from(product))?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Write both JSON and CSV into the configured output directory
    pub fn write_all(products: &[Product], output: &OutputConfig) -> Result<(PathBuf, PathBuf)> {
        std::fs::create_dir_all(&output.dir)
            .with_context(|| format!("Failed to create directory: {:?}", output.dir))?;

        let json_path = output.json_path();
        let csv_path = output.csv_path();

        Self::save_json(products, &json_path)?;
        Self::save_csv(products, &csv_path)?;

        info!(
            "Wrote {} products to {} and {}",
            products.len(),
            json_path.display(),
            csv_path.display()
        );

        Ok((json_path, csv_path))
    }

    /// Load products from a JSON file written by `save_json`
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Vec<Product>> {
        let file = File::open(&path)
            .with_context(|| format!("Failed to open file: {:?}", path.as_ref()))?;

        let products: Vec<Product> = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse products: {:?}", path.as_ref()))?;
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::types::Variant;
    use indexmap::IndexMap;
    use tempfile::tempdir;

    fn wig() -> Product {
        Product {
            collection: "darling".to_string(),
            title: "Darling Wig, \"Super Star\"".to_string(),
            url: "https://thedivashop.ng/products/super-star".to_string(),
            price: Some(45000.0),
            compare_at_price: None,
            currency: Some("NGN".to_string()),
            description: Some("Line one\nLine two".to_string()),
            images: vec![
                "https://cdn.shopify.com/a.jpg".to_string(),
                "https://cdn.shopify.com/b.jpg".to_string(),
            ],
            tags: vec!["wigs".to_string()],
            vendor: Some("Darling".to_string()),
            product_type: None,
            variants: vec![Variant::titled("12\" / 1B"), Variant::default()],
            option_names: vec!["Length".to_string(), "Color".to_string()],
            option_values: IndexMap::from([
                ("Length".to_string(), vec!["12\"".to_string(), "16\"".to_string()]),
                ("Color".to_string(), vec!["1B".to_string()]),
            ]),
        }
    }

    #[test]
    fn test_csv_row_flattening() {
        let product = wig();
        let row = CsvRow::from(&product);

        assert_eq!(row.images, "https://cdn.shopify.com/a.jpg; https://cdn.shopify.com/b.jpg");
        assert_eq!(row.variant_count, 2);
        assert_eq!(row.variant_titles, "12\" / 1B; ");
        assert_eq!(row.variant_option_names, "Length, Color");
        assert_eq!(row.variant_option_values, "Length: 12\"|16\"; Color: 1B");
        assert_eq!(row.product_type, "");
    }

    #[test]
    fn test_save_csv_header_and_quoting() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("products.csv");

        ProductStore::save_csv(&[wig()], &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), CSV_HEADER.to_vec());

        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[1], "Darling Wig, \"Super Star\"");
        assert_eq!(record[3].parse::<f64>().unwrap(), 45000.0);
        assert_eq!(&record[4], "");
        assert_eq!(&record[10], "2");
    }

    #[test]
    fn test_save_csv_empty_catalog_has_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("products.csv");

        ProductStore::save_csv(&[], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, format!("{}\n", CSV_HEADER.join(",")));
        assert!(content.starts_with("collection,title,url,price,compare_at_price"));
    }

    #[test]
    fn test_csv_row_field_order_matches_header() {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(true)
            .from_writer(Vec::new());
        writer.serialize(CsvRow::from(&wig())).unwrap();
        let bytes = writer.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.starts_with(&format!("{}\n", CSV_HEADER.join(","))));
    }

    #[test]
    fn test_write_all_and_load_json() {
        let dir = tempdir().unwrap();
        let output = OutputConfig {
            dir: dir.path().join("nested").join("data"),
            ..OutputConfig::default()
        };

        let (json_path, csv_path) = ProductStore::write_all(&[wig()], &output).unwrap();
        assert!(json_path.exists());
        assert!(csv_path.exists());

        let loaded = ProductStore::load_json(&json_path).unwrap();
        assert_eq!(loaded, vec![wig()]);
    }

    #[test]
    fn test_json_keeps_unicode() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("products.json");
        let mut product = wig();
        product.currency = Some("₦".to_string());

        ProductStore::save_json(&[product], &path).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();

        assert!(raw.contains("\"currency\": \"₦\""));
        assert!(raw.contains("\"compare_at_price\": null"));
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(ProductStore::load_json("/nonexistent/products.json").is_err());
    }
}
