//! Diva Shop Scraper
//!
//! Command-line entry point.
//!
//! ```bash
//! divashop-scraper scrape
//! divashop-scraper scrape https://thedivashop.ng/collections/sale --output-dir out
//! divashop-scraper product https://thedivashop.ng/products/some-handle
//! divashop-scraper summary --input data/products.json
//! divashop-scraper init-config --path divashop.toml
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use divashop_scraper::{
    setup_logging, until_interrupted, CatalogSummary, Config, Crawler, ProductStore, ShopClient,
    INTERRUPTED_EXIT_CODE,
};
use std::path::PathBuf;
use tracing::info;

/// Config file picked up when `--config` is not given
const DEFAULT_CONFIG_PATH: &str = "divashop.toml";

#[derive(Parser)]
#[command(name = "divashop-scraper")]
#[command(about = "Scrape The Diva Shop collections into CSV and JSON")]
struct Cli {
    /// Path to a TOML configuration file (default: ./divashop.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape collections and write products.json / products.csv
    Scrape {
        /// Collection URLs (defaults to the configured list)
        urls: Vec<String>,

        /// Output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Maximum listing pages per collection
        #[arg(long)]
        max_pages: Option<usize>,
    },

    /// Scrape a single product page and print it as JSON
    Product {
        /// Product URL
        url: String,

        /// Collection name recorded on the product
        #[arg(long, default_value = "manual")]
        collection: String,
    },

    /// Summarize a previously written products.json
    Summary {
        /// Path to products.json (defaults to the configured output)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Write the default configuration file
    InitConfig {
        /// Destination path
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(DEFAULT_CONFIG_PATH),
    };

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    setup_logging(&level)?;

    match until_interrupted(run(cli.command, config), tokio::signal::ctrl_c()).await {
        Some(result) => result,
        None => {
            println!("Interrupted.");
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
    }
}

async fn run(command: Commands, mut config: Config) -> Result<()> {
    match command {
        Commands::Scrape {
            urls,
            output_dir,
            max_pages,
        } => {
            if let Some(dir) = output_dir {
                config.output.dir = dir;
            }
            if let Some(max_pages) = max_pages {
                config.scraper.max_pages = max_pages;
            }

            let targets = if urls.is_empty() {
                config.scraper.collections.clone()
            } else {
                urls
            };
            info!("Scraping {} collections", targets.len());

            let client = ShopClient::with_config(&config.scraper)?;
            let crawler = Crawler::new(client, &config.scraper);

            let products = crawler.scrape_all(&targets).await;

            let (json_path, csv_path) = ProductStore::write_all(&products, &config.output)?;

            println!(
                "Wrote {} products to:\n  {}\n  {}",
                products.len(),
                json_path.display(),
                csv_path.display()
            );
        }

        Commands::Product { url, collection } => {
            let client = ShopClient::with_config(&config.scraper)?;
            let crawler = Crawler::new(client, &config.scraper);

            match crawler.scrape_product(&collection, &url).await {
                Some(product) => println!("{}", serde_json::to_string_pretty(&product)?),
                None => anyhow::bail!("Could not scrape product at {}", url),
            }
        }

        Commands::Summary { input } => {
            let path = input.unwrap_or_else(|| config.output.json_path());
            let products = ProductStore::load_json(&path)?;
            info!("Loaded {} products from {}", products.len(), path.display());

            print!("{}", CatalogSummary::from_products(&products));
        }

        Commands::InitConfig { path } => {
            Config::create_default(&path)?;
            println!("Wrote default configuration to {}", path.display());
        }
    }

    Ok(())
}
