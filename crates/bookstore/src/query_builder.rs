//! Builders for filter documents and aggregation pipelines.
//!
//! Everything here is pure: the functions only assemble BSON documents, so the
//! exact shape sent to the server can be checked without a database.

use mongodb::bson::{Document, doc, oid::ObjectId};

use crate::errors::StoreError;
use crate::models::{SortDirection, SortField};

/// Builder for a `find`/`count` filter over book documents.
///
/// # Example
/// ```ignore
/// let filter = BookFilter::new()
///     .in_stock(true)
///     .published_after(2010)
///     .build();
/// // { "in_stock": true, "published_year": { "$gt": 2010 } }
/// ```
#[derive(Debug, Default, Clone)]
pub struct BookFilter {
    ids: Option<Vec<ObjectId>>,
    genre: Option<String>,
    author: Option<String>,
    title: Option<String>,
    in_stock: Option<bool>,
    published_after: Option<i32>,
    published_before: Option<i32>,
}

impl BookFilter {
    /// Creates an empty filter that matches every document.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(mut self, ids: &[ObjectId]) -> Self {
        self.ids = Some(ids.to_vec());
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = Some(in_stock);
        self
    }

    /// Matches books published strictly after `year`.
    pub fn published_after(mut self, year: i32) -> Self {
        self.published_after = Some(year);
        self
    }

    /// Matches books published strictly before `year`.
    pub fn published_before(mut self, year: i32) -> Self {
        self.published_before = Some(year);
        self
    }

    /// Builds the filter document. Both year bounds share one `published_year`
    /// condition.
    pub fn build(&self) -> Document {
        let mut filter = Document::new();

        if let Some(ids) = &self.ids {
            filter.insert("_id", doc! { "$in": ids.clone() });
        }
        if let Some(genre) = &self.genre {
            filter.insert("genre", genre.as_str());
        }
        if let Some(author) = &self.author {
            filter.insert("author", author.as_str());
        }
        if let Some(title) = &self.title {
            filter.insert("title", title.as_str());
        }
        if let Some(in_stock) = self.in_stock {
            filter.insert("in_stock", in_stock);
        }

        let mut year = Document::new();
        if let Some(after) = self.published_after {
            year.insert("$gt", after);
        }
        if let Some(before) = self.published_before {
            year.insert("$lt", before);
        }
        if !year.is_empty() {
            filter.insert("published_year", year);
        }

        filter
    }
}

/// A 1-based page of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u64,
    size: u64,
}

impl Page {
    /// Both values must be at least 1, and the page's starting offset must
    /// fit in an `i64`, which is the widest skip the server accepts.
    pub fn new(number: u64, size: u64) -> Result<Self, StoreError> {
        let invalid = StoreError::InvalidPage { number, size };
        if number == 0 || size == 0 || size > i64::MAX as u64 {
            return Err(invalid);
        }
        match (number - 1).checked_mul(size) {
            Some(skip) if skip <= i64::MAX as u64 => Ok(Self { number, size }),
            _ => Err(invalid),
        }
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Documents to skip before this page starts.
    pub fn skip(&self) -> u64 {
        (self.number - 1) * self.size
    }

    pub fn limit(&self) -> i64 {
        // `new` caps size at i64::MAX
        self.size as i64
    }
}

/// Projection used by summary listings: title, author and price, no `_id`.
pub fn summary_projection() -> Document {
    doc! { "title": 1, "author": 1, "price": 1, "_id": 0 }
}

pub fn sort_document(field: SortField, direction: SortDirection) -> Document {
    doc! { field.as_str(): direction.as_i32() }
}

/// Count of books per genre, most populous first. Ties are ordered by genre
/// name so output is stable between runs.
pub fn category_breakdown() -> Vec<Document> {
    vec![
        doc! { "$group": { "_id": "$genre", "count": { "$sum": 1 } } },
        doc! { "$sort": { "count": -1, "_id": 1 } },
    ]
}

/// Average price per genre, most expensive genre first.
pub fn average_price_by_genre() -> Vec<Document> {
    vec![
        doc! { "$group": { "_id": "$genre", "averagePrice": { "$avg": "$price" } } },
        doc! { "$sort": { "averagePrice": -1, "_id": 1 } },
    ]
}

/// Authors ranked by number of books, capped at `limit` rows.
pub fn top_authors(limit: i64) -> Vec<Document> {
    vec![
        doc! { "$group": { "_id": "$author", "bookCount": { "$sum": 1 } } },
        doc! { "$sort": { "bookCount": -1, "_id": 1 } },
        doc! { "$limit": limit },
    ]
}

/// Count of books per publication decade, oldest first. The decade key is the
/// decade's first year as an integer.
pub fn count_by_decade() -> Vec<Document> {
    vec![
        doc! {
            "$addFields": {
                "decade": {
                    "$toInt": {
                        "$multiply": [
                            { "$floor": { "$divide": ["$published_year", 10] } },
                            10
                        ]
                    }
                }
            }
        },
        doc! { "$group": { "_id": "$decade", "count": { "$sum": 1 } } },
        doc! { "$sort": { "_id": 1 } },
    ]
}

/// Key documents for the indexes the query catalog relies on.
pub fn index_keys() -> Vec<Document> {
    vec![
        doc! { "title": 1 },
        doc! { "author": 1, "published_year": -1 },
    ]
}
