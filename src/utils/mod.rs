//! Configuration, logging and shutdown helpers

pub mod config;
pub mod logging;
pub mod shutdown;

pub use config::{Config, LoggingConfig, OutputConfig, ScraperConfig};
pub use logging::setup_logging;
pub use shutdown::{until_interrupted, INTERRUPTED_EXIT_CODE};
