//! Product records, persistence and summaries

pub mod store;
pub mod summary;
pub mod types;

pub use store::ProductStore;
pub use summary::{CatalogSummary, CollectionStats, PriceStats};
pub use types::{Product, Variant};
