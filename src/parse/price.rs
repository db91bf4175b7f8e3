//! Price and currency extraction from display strings

use regex::Regex;
use std::sync::OnceLock;

fn currency_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[₦₵$€£]|NGN|USD|EUR|GBP").expect("valid currency regex"))
}

fn labelled_price_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"([₦₵$€£]|NGN|USD|EUR|GBP)?\s?([0-9,]+(?:\.[0-9]{2})?)")
            .expect("valid price regex")
    })
}

/// Parse a display price such as `"₦12,500.00"` into a number
///
/// Everything except digits, `.` and `,` is dropped and commas are treated as
/// thousands separators.
pub fn parse_price(text: &str) -> Option<f64> {
    let digits: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if digits.is_empty() {
        return None;
    }

    digits.parse().ok()
}

/// Currency symbol or ISO code appearing in `text`
pub fn detect_currency(text: &str) -> Option<String> {
    currency_regex().find(text).map(|m| m.as_str().to_string())
}

/// Price embedded in a variant label, e.g. `"500ml - ₦4,200"`
pub fn price_in_label(label: &str) -> Option<f64> {
    labelled_price_regex()
        .find(label)
        .and_then(|m| parse_price(m.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("₦12,500.00"), Some(12500.0));
        assert_eq!(parse_price("NGN 3,000"), Some(3000.0));
        assert_eq!(parse_price("$19.99"), Some(19.99));
        assert_eq!(parse_price("4500"), Some(4500.0));
    }

    #[test]
    fn test_parse_price_rejects_garbage() {
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("Sold out"), None);
        assert_eq!(parse_price("1.2.3"), None);
    }

    #[test]
    fn test_detect_currency() {
        assert_eq!(detect_currency("₦12,500.00"), Some("₦".to_string()));
        assert_eq!(detect_currency("Price: NGN 3,000"), Some("NGN".to_string()));
        assert_eq!(detect_currency("12,500"), None);
    }

    #[test]
    fn test_price_in_label() {
        assert_eq!(price_in_label("500ml - ₦4,200"), Some(500.0));
        assert_eq!(price_in_label("₦4,200.50"), Some(4200.5));
        assert_eq!(price_in_label("Black"), None);
    }
}
