use mongodb::bson;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] bson::de::Error),

    #[error("No inserted id reported for record {0}")]
    MissingInsertedId(usize),

    #[error("Inserted id is not an ObjectId: {0}")]
    UnexpectedId(bson::Bson),

    #[error("Invalid page: number {number}, size {size} (both must be at least 1)")]
    InvalidPage { number: u64, size: u64 },
}
