//! Error types for storefront scraping

use thiserror::Error;

/// Result type alias for scraper operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Errors that can occur while fetching or persisting storefront data
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Transport-level failure (DNS, connect, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ScrapeError {
    /// Check if the request that produced this error is worth repeating
    pub fn is_retryable(&self) -> bool {
        match self {
            ScrapeError::Request(_) => true,
            ScrapeError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_retryability() {
        let throttled = ScrapeError::Status {
            url: "https://example.com".to_string(),
            status: 429,
        };
        let server = ScrapeError::Status {
            url: "https://example.com".to_string(),
            status: 503,
        };
        let missing = ScrapeError::Status {
            url: "https://example.com".to_string(),
            status: 404,
        };

        assert!(throttled.is_retryable());
        assert!(server.is_retryable());
        assert!(!missing.is_retryable());
    }

    #[test]
    fn test_non_network_errors_are_final() {
        let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(!ScrapeError::from(json).is_retryable());
        assert!(!ScrapeError::Config("bad url".to_string()).is_retryable());
    }

    #[test]
    fn test_status_message() {
        let err = ScrapeError::Status {
            url: "https://thedivashop.ng/x".to_string(),
            status: 404,
        };
        assert_eq!(err.to_string(), "https://thedivashop.ng/x returned HTTP 404");
    }
}
