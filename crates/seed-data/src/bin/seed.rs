//! Seed script - inserts the ten-book catalog and prints a summary
//!
//! Run with:
//! ```
//! cargo run -p seed-data --bin seed
//! ```
//!
//! Failures are printed and the process still exits successfully.

use seed_data::prelude::*;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    seed_data::init_tracing();

    let config = SeedConfig::from_env();
    tracing::info!("Seeding {}", config.namespace());

    if let Ok(report) = run_seed(&config, &classic_books()).await {
        tracing::info!("Seed completed!");
        tracing::info!("  Inserted: {}", report.inserted.len());
        tracing::info!("  Total in collection: {}", report.total);
        tracing::info!("  Genres: {}", report.categories.len());
    }

    Ok(())
}
