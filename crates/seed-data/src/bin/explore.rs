//! Runs the book query catalog against the seeded collection
//!
//! Run with:
//! ```
//! cargo run -p seed-data --bin explore
//! ```
//!
//! Set `BOOKSTORE_APPLY_CHANGES=1` to also run the insert/update/delete steps.

use seed_data::prelude::*;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    seed_data::init_tracing();

    let config = SeedConfig::from_env();
    tracing::info!(
        "Exploring {} (changes {})",
        config.namespace(),
        if config.apply_changes { "enabled" } else { "disabled" }
    );

    if run_explore(&config).await.is_ok() {
        tracing::info!("Explore completed!");
    }

    Ok(())
}
