//! Shopify product JSON (`/products/<handle>.js`)
//!
//! The endpoint reports prices in minor units (kobo, cents) and maps each
//! variant's choices positionally through `option1`, `option2`, `option3`.

use crate::data::types::Variant;
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::BTreeSet;

/// Options and variants reported by the product JSON endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariantSet {
    pub option_names: Vec<String>,
    /// Sorted distinct values per option name, in storefront option order
    pub option_values: IndexMap<String, Vec<String>>,
    pub variants: Vec<Variant>,
}

fn minor_units(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64).map(|v| v / 100.0)
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn option_name(option: &Value) -> Option<String> {
    let name = match option {
        Value::String(s) => s.as_str(),
        Value::Object(o) => o.get("name")?.as_str()?,
        _ => return None,
    };
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// Parse the product JSON document; `None` if it is not a JSON object
pub fn parse_variant_json(data: &Value) -> Option<VariantSet> {
    let data = data.as_object()?;

    let option_names: Vec<String> = data
        .get("options")
        .and_then(Value::as_array)
        .map(|opts| opts.iter().filter_map(option_name).collect())
        .unwrap_or_default();

    let mut values: IndexMap<String, BTreeSet<String>> = option_names
        .iter()
        .map(|name| (name.clone(), BTreeSet::new()))
        .collect();

    let mut variants = Vec::new();
    for v in data
        .get("variants")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
    {
        let mut options = IndexMap::new();
        for (idx, name) in option_names.iter().enumerate() {
            let chosen = v
                .get(format!("option{}", idx + 1))
                .and_then(Value::as_str)
                .map(str::to_string);

            if let Some(val) = chosen.as_ref().filter(|s| !s.is_empty()) {
                values.entry(name.clone()).or_default().insert(val.clone());
            }
            options.insert(name.clone(), chosen);
        }

        variants.push(Variant {
            option_title: v.get("title").and_then(Value::as_str).map(str::to_string),
            price: minor_units(v.get("price")),
            compare_at_price: minor_units(v.get("compare_at_price")),
            sku: v.get("sku").and_then(Value::as_str).map(str::to_string),
            available: Some(v.get("available").map_or(false, truthy)),
            options,
        });
    }

    Some(VariantSet {
        option_names,
        option_values: values
            .into_iter()
            .map(|(name, vals)| (name, vals.into_iter().collect()))
            .collect(),
        variants,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "title": "Darling Super Star",
            "options": [
                {"name": "Length", "position": 1, "values": ["12\"", "16\""]},
                {"name": " Color ", "position": 2, "values": ["1B", "613"]}
            ],
            "variants": [
                {"title": "12\" / 1B", "price": 450000, "compare_at_price": 500000,
                 "sku": "DSS-12-1B", "available": true, "option1": "12\"", "option2": "1B"},
                {"title": "16\" / 613", "price": 520000, "compare_at_price": null,
                 "sku": "", "available": false, "option1": "16\"", "option2": "613"},
                {"title": "16\" / 1B", "price": 520000, "compare_at_price": null,
                 "sku": null, "available": 1, "option1": "16\"", "option2": "1B"}
            ]
        })
    }

    #[test]
    fn test_option_names_are_trimmed() {
        let set = parse_variant_json(&sample()).unwrap();
        assert_eq!(set.option_names, vec!["Length", "Color"]);
    }

    #[test]
    fn test_prices_in_minor_units() {
        let set = parse_variant_json(&sample()).unwrap();
        assert_eq!(set.variants.len(), 3);
        assert_eq!(set.variants[0].price, Some(4500.0));
        assert_eq!(set.variants[0].compare_at_price, Some(5000.0));
        assert_eq!(set.variants[1].compare_at_price, None);
    }

    #[test]
    fn test_variant_fields() {
        let set = parse_variant_json(&sample()).unwrap();
        let first = &set.variants[0];
        assert_eq!(first.option_title.as_deref(), Some("12\" / 1B"));
        assert_eq!(first.sku.as_deref(), Some("DSS-12-1B"));
        assert_eq!(first.available, Some(true));
        assert_eq!(first.options["Color"].as_deref(), Some("1B"));

        assert_eq!(set.variants[1].available, Some(false));
        assert_eq!(set.variants[1].sku.as_deref(), Some(""));
        assert_eq!(set.variants[2].available, Some(true));
        assert_eq!(set.variants[2].sku, None);
    }

    #[test]
    fn test_option_values_sorted_and_distinct() {
        let set = parse_variant_json(&sample()).unwrap();
        assert_eq!(set.option_values["Length"], vec!["12\"", "16\""]);
        assert_eq!(set.option_values["Color"], vec!["1B", "613"]);
    }

    #[test]
    fn test_option_order_follows_storefront() {
        let set = parse_variant_json(&sample()).unwrap();
        let names: Vec<_> = set.option_values.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Length", "Color"]);

        let chosen: Vec<_> = set.variants[0].options.keys().map(String::as_str).collect();
        assert_eq!(chosen, vec!["Length", "Color"]);
    }

    #[test]
    fn test_plain_string_options() {
        let data = json!({
            "options": ["Size"],
            "variants": [{"title": "250ml", "price": 300000, "option1": "250ml"}]
        });
        let set = parse_variant_json(&data).unwrap();
        assert_eq!(set.option_names, vec!["Size"]);
        assert_eq!(set.variants[0].price, Some(3000.0));
        assert_eq!(set.variants[0].available, Some(false));
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(parse_variant_json(&json!([1, 2, 3])).is_none());
        assert_eq!(parse_variant_json(&json!({})).unwrap(), VariantSet::default());
    }
}
