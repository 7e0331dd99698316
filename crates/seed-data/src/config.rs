//! Configuration for the seed and explore tools.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_DATABASE: &str = "plp_bookstore";
pub const DEFAULT_COLLECTION: &str = "books";

pub const MONGODB_URI_VAR: &str = "MONGODB_URI";
pub const DATABASE_VAR: &str = "BOOKSTORE_DB";
pub const COLLECTION_VAR: &str = "BOOKSTORE_COLLECTION";
pub const APPLY_CHANGES_VAR: &str = "BOOKSTORE_APPLY_CHANGES";

/// Where to seed and what the explorer may do there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedConfig {
    /// MongoDB connection string.
    pub mongodb_uri: String,

    /// Target database name.
    pub database: String,

    /// Target collection name.
    pub collection: String,

    /// Whether the explorer runs its insert/update/delete steps.
    pub apply_changes: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            mongodb_uri: DEFAULT_MONGODB_URI.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            apply_changes: false,
        }
    }
}

impl SeedConfig {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from a variable lookup. Unset or blank values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        Self {
            mongodb_uri: read(MONGODB_URI_VAR).unwrap_or(defaults.mongodb_uri),
            database: read(DATABASE_VAR).unwrap_or(defaults.database),
            collection: read(COLLECTION_VAR).unwrap_or(defaults.collection),
            apply_changes: read(APPLY_CHANGES_VAR)
                .map(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true"))
                .unwrap_or(defaults.apply_changes),
        }
    }

    /// `database.collection`, for log lines.
    pub fn namespace(&self) -> String {
        format!("{}.{}", self.database, self.collection)
    }
}
