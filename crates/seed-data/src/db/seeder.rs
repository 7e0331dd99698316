//! Database seeding utilities.

use bookstore::{Book, BookFilter, BookStore, CategoryCount, StoreError, open_client, ping};
use mongodb::{Client, bson::oid::ObjectId};
use thiserror::Error;
use tracing::{error, info};

use crate::config::SeedConfig;
use crate::report;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result of a completed seed-and-report run.
#[derive(Debug, Clone)]
pub struct SeedReport {
    /// Ids generated for the submitted books, in submission order.
    pub inserted_ids: Vec<ObjectId>,
    /// The inserted books as read back from the store, in submission order.
    pub inserted: Vec<Book>,
    /// Documents in the collection after the insert.
    pub total: u64,
    pub categories: Vec<CategoryCount>,
}

/// Database seeder for the book collection.
pub struct Seeder {
    store: BookStore,
}

impl Seeder {
    pub fn new(store: BookStore) -> Self {
        Self { store }
    }

    /// Inserts `books` as one batch.
    pub async fn seed_books(&self, books: &[Book]) -> Result<Vec<ObjectId>, SeedError> {
        info!(
            "Seeding {} books into {}.{}...",
            books.len(),
            self.store.database_name(),
            self.store.collection_name()
        );

        let ids = self.store.insert_many(books).await?;

        info!("Seeded {} books", ids.len());
        Ok(ids)
    }

    /// Seeds `books`, then reads them back and summarizes the collection,
    /// printing each step as it completes.
    pub async fn seed_and_report(&self, books: &[Book]) -> Result<SeedReport, SeedError> {
        let inserted_ids = self.seed_books(books).await?;
        report::print_inserted(inserted_ids.len());

        let inserted = self.store.find_by_ids(&inserted_ids).await?;
        report::print_listing(&inserted);

        let total = self.store.count(&BookFilter::new()).await?;
        report::print_total(total);

        let categories = self.store.category_breakdown().await?;
        report::print_categories(&categories);

        Ok(SeedReport {
            inserted_ids,
            inserted,
            total,
            categories,
        })
    }
}

/// Connects to the configured endpoint, seeds `books` and prints the report.
///
/// The client is always shut down before returning, whether or not seeding
/// succeeded. Failures are printed and logged here, and also returned.
pub async fn run_seed(config: &SeedConfig, books: &[Book]) -> Result<SeedReport, SeedError> {
    let client = match open_client(&config.mongodb_uri).await {
        Ok(client) => client,
        Err(e) => {
            error!("Invalid MongoDB endpoint: {e}");
            report::print_error(&e);
            return Err(e.into());
        }
    };

    let outcome = seed_with_client(&client, config, books).await;
    if let Err(e) = &outcome {
        error!("Seeding failed: {e}");
        report::print_error(e);
    }

    close(client).await;
    outcome
}

async fn seed_with_client(
    client: &Client,
    config: &SeedConfig,
    books: &[Book],
) -> Result<SeedReport, SeedError> {
    ping(client).await?;
    report::print_connected();

    let store = BookStore::new(client.database(&config.database), &config.collection);
    Seeder::new(store).seed_and_report(books).await
}

/// Shuts the client down and prints the closing line.
pub(crate) async fn close(client: Client) {
    client.shutdown().await;
    info!("MongoDB client shut down");
    report::print_closed();
}
