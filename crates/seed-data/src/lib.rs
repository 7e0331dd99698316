//! Seeding and reporting tools for the bookstore collection.
//!
//! This crate writes the fixed ten-book catalog into MongoDB, prints what it
//! inserted along with a per-genre summary, and can walk the rest of the query
//! catalog (filters, listings, aggregations, indexes) against the result.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seed_data::prelude::*;
//!
//! let config = SeedConfig::from_env();
//! let report = run_seed(&config, &classic_books()).await?;
//! assert_eq!(report.inserted.len(), CATALOG_SIZE);
//! ```

pub mod catalog;
pub mod config;
pub mod db;
pub mod explorer;
pub mod report;

use tracing_subscriber::EnvFilter;

/// Installs the fmt subscriber on stderr, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::catalog::{CATALOG_SIZE, classic_books, extra_book};
    pub use crate::config::SeedConfig;
    pub use crate::db::{SeedError, SeedReport, Seeder, run_seed};
    pub use crate::explorer::run_explore;
    pub use bookstore::{Book, BookStore, CategoryCount};
}
