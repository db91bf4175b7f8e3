//! Configuration management
//!
//! Defaults reproduce the storefront the scraper was written for; every value
//! can be overridden from a TOML file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Storefront root
pub const DEFAULT_BASE_URL: &str = "https://thedivashop.ng";

/// Collections scraped when none are given on the command line
pub const DEFAULT_COLLECTIONS: &[&str] = &[
    "https://thedivashop.ng/collections/darling",
    "https://thedivashop.ng/collections/amigos",
    "https://thedivashop.ng/collections/megagrowth",
    "https://thedivashop.ng/collections/tcb-naturals",
    "https://thedivashop.ng/collections/good-knight",
    "https://thedivashop.ng/collections/aer-pocket",
    "https://thedivashop.ng/collections/personal-care",
    "https://thedivashop.ng/collections/sale",
    "https://thedivashop.ng/collections/the-diva-shop-gift-card",
];

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// HTTP and crawl settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub base_url: String,
    pub collections: Vec<String>,
    pub user_agent: String,
    pub accept_language: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    /// Linear backoff unit: attempt `n` waits `n * backoff_ms` before retrying
    pub backoff_ms: u64,
    /// Pause after every successful response
    pub politeness_delay_ms: u64,
    /// Upper bound on `?page=N` requests per collection
    pub max_pages: usize,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            collections: DEFAULT_COLLECTIONS.iter().map(|s| s.to_string()).collect(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            timeout_secs: 30,
            max_retries: 3,
            backoff_ms: 1000,
            politeness_delay_ms: 400,
            max_pages: 100,
        }
    }
}

impl ScraperConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }

    pub fn politeness_delay(&self) -> Duration {
        Duration::from_millis(self.politeness_delay_ms)
    }
}

/// Output file settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub json_file: String,
    pub csv_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            json_file: "products.json".to_string(),
            csv_file: "products.csv".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn json_path(&self) -> PathBuf {
        self.dir.join(&self.json_file)
    }

    pub fn csv_path(&self) -> PathBuf {
        self.dir.join(&self.csv_file)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub scraper: ScraperConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {:?}", path.as_ref()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load configuration from file or use default
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write config: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Create default configuration file
    pub fn create_default<P: AsRef<Path>>(path: P) -> Result<()> {
        Config::default().save(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.scraper.base_url, "https://thedivashop.ng");
        assert_eq!(config.scraper.collections.len(), 9);
        assert_eq!(config.scraper.max_retries, 3);
        assert_eq!(config.scraper.politeness_delay(), Duration::from_millis(400));
        assert_eq!(config.output.json_path(), PathBuf::from("data/products.json"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [scraper]
            max_retries = 5
            collections = ["https://thedivashop.ng/collections/sale"]

            [output]
            dir = "out"
            "#,
        )
        .unwrap();

        assert_eq!(config.scraper.max_retries, 5);
        assert_eq!(config.scraper.collections.len(), 1);
        assert_eq!(config.scraper.timeout_secs, 30);
        assert_eq!(config.output.csv_path(), PathBuf::from("out/products.csv"));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scraper.toml");

        Config::create_default(&path).unwrap();
        let loaded = Config::load(&path).unwrap();

        assert_eq!(loaded.scraper.user_agent, ScraperConfig::default().user_agent);
        assert_eq!(loaded.output.dir, PathBuf::from("data"));
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let config = Config::load_or_default("/nonexistent/scraper.toml");
        assert_eq!(config.scraper.max_pages, 100);
    }
}
