//! Book records and the query catalog run against them.
//!
//! [`BookStore`] wraps a single MongoDB collection of [`Book`] documents and
//! exposes the inserts, reads, updates, aggregations and index commands used by
//! the seeding tools. Filter documents and aggregation pipelines are assembled
//! in [`query_builder`] so their shape can be tested without a server.

pub mod database;
pub mod errors;
pub mod models;
pub mod query_builder;

use mongodb::{Client, bson::doc};
use tracing::info;

pub use crate::database::BookStore;
pub use crate::errors::StoreError;
pub use crate::models::{
    AuthorCount, Book, BookSummary, CategoryCount, DecadeCount, ExplainSummary, GenrePrice,
    SortDirection, SortField,
};
pub use crate::query_builder::{BookFilter, Page};

/// Parses `uri` into a client handle without touching the network.
///
/// The driver connects lazily, so an unreachable server only surfaces on the
/// first command; see [`ping`].
pub async fn open_client(uri: &str) -> Result<Client, StoreError> {
    let client = Client::with_uri_str(uri).await?;
    Ok(client)
}

/// Round-trips a `ping` to confirm the server is reachable.
pub async fn ping(client: &Client) -> Result<(), StoreError> {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await?;

    info!("Connected to MongoDB");
    Ok(())
}
