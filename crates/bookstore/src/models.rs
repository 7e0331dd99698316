use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A book document as stored in the `books` collection.
///
/// `id` is `None` until the store assigns one on insert; it is skipped when
/// serializing so the server generates the `_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub author: String,
    /// Category of the book.
    pub genre: String,
    pub published_year: i32,
    pub price: f64,
    pub in_stock: bool,
    pub pages: i32,
    pub publisher: String,
}

impl Book {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: &str,
        author: &str,
        genre: &str,
        published_year: i32,
        price: f64,
        in_stock: bool,
        pages: i32,
        publisher: &str,
    ) -> Self {
        Self {
            id: None,
            title: title.to_string(),
            author: author.to_string(),
            genre: genre.to_string(),
            published_year,
            price,
            in_stock,
            pages,
            publisher: publisher.to_string(),
        }
    }

    /// Returns a copy of this book carrying the given store id.
    pub fn with_id(mut self, id: ObjectId) -> Self {
        self.id = Some(id);
        self
    }
}

/// Title, author and price of a book, as returned by projected listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSummary {
    pub title: String,
    pub author: String,
    pub price: f64,
}

/// One row of the category breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    #[serde(rename = "_id")]
    pub genre: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenrePrice {
    #[serde(rename = "_id")]
    pub genre: String,
    #[serde(rename = "averagePrice")]
    pub average_price: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorCount {
    #[serde(rename = "_id")]
    pub author: String,
    #[serde(rename = "bookCount")]
    pub book_count: i64,
}

/// Number of books published in a decade. `decade` is the decade's first year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecadeCount {
    #[serde(rename = "_id")]
    pub decade: i32,
    pub count: i64,
}

/// Condensed `executionStats` output of an explained query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExplainSummary {
    /// Stage at the root of the winning plan (e.g. `FETCH`, `COLLSCAN`).
    pub winning_stage: String,
    /// Index used by the winning plan, if any.
    pub index_name: Option<String>,
    pub docs_examined: i64,
    pub keys_examined: i64,
    pub returned: i64,
}

/// Field a listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Title,
    Price,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::Price => "price",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_i32(&self) -> i32 {
        match self {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{self, doc};

    fn dune() -> Book {
        Book::new(
            "Dune",
            "Frank Herbert",
            "Science Fiction",
            1965,
            15.99,
            true,
            412,
            "Chilton Books",
        )
    }

    #[test]
    fn test_new_book_serializes_without_id() {
        let document = bson::to_document(&dune()).unwrap();

        assert!(!document.contains_key("_id"));
        assert_eq!(document.get_str("genre").unwrap(), "Science Fiction");
        assert_eq!(document.get_i32("published_year").unwrap(), 1965);
        assert_eq!(document.get_f64("price").unwrap(), 15.99);
        assert!(document.get_bool("in_stock").unwrap());
        assert_eq!(document.get_i32("pages").unwrap(), 412);
    }

    #[test]
    fn test_stored_book_round_trips_id() {
        let id = ObjectId::new();
        let book = dune().with_id(id);

        let document = bson::to_document(&book).unwrap();
        assert_eq!(document.get_object_id("_id").unwrap(), id);

        let decoded: Book = bson::from_document(document).unwrap();
        assert_eq!(decoded, book);
    }

    #[test]
    fn test_category_count_reads_group_output() {
        let row = doc! { "_id": "Dystopian", "count": 2 };
        let count: CategoryCount = bson::from_document(row).unwrap();

        assert_eq!(count.genre, "Dystopian");
        assert_eq!(count.count, 2);
    }

    #[test]
    fn test_sort_values() {
        assert_eq!(SortField::Price.as_str(), "price");
        assert_eq!(SortDirection::Ascending.as_i32(), 1);
        assert_eq!(SortDirection::Descending.as_i32(), -1);
    }
}
