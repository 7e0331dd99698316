use futures::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{self, Bson, Document, doc, oid::ObjectId},
};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::errors::StoreError;
use crate::models::{
    AuthorCount, Book, BookSummary, CategoryCount, DecadeCount, ExplainSummary, GenrePrice,
    SortDirection, SortField,
};
use crate::query_builder::{self, BookFilter, Page};

/// Typed access to one book collection.
#[derive(Clone)]
pub struct BookStore {
    database: Database,
    collection: Collection<Book>,
}

impl BookStore {
    pub fn new(database: Database, collection_name: &str) -> Self {
        let collection = database.collection::<Book>(collection_name);
        Self {
            database,
            collection,
        }
    }

    pub fn collection_name(&self) -> &str {
        self.collection.name()
    }

    pub fn database_name(&self) -> &str {
        self.database.name()
    }

    /// Inserts `books` in one batch and returns the generated ids in the same
    /// order as the input.
    pub async fn insert_many(&self, books: &[Book]) -> Result<Vec<ObjectId>, StoreError> {
        let result = self.collection.insert_many(books).await?;

        (0..books.len())
            .map(|index| match result.inserted_ids.get(&index) {
                Some(Bson::ObjectId(id)) => Ok(*id),
                Some(other) => Err(StoreError::UnexpectedId(other.clone())),
                None => Err(StoreError::MissingInsertedId(index)),
            })
            .collect()
    }

    pub async fn insert_one(&self, book: &Book) -> Result<ObjectId, StoreError> {
        let result = self.collection.insert_one(book).await?;

        match result.inserted_id {
            Bson::ObjectId(id) => Ok(id),
            other => Err(StoreError::UnexpectedId(other)),
        }
    }

    /// Fetches the books with the given ids, ordered like `ids`. Ids with no
    /// matching document are skipped.
    pub async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Book>, StoreError> {
        let found = self.find(&BookFilter::new().ids(ids)).await?;
        Ok(order_by_ids(found, ids))
    }

    pub async fn find(&self, filter: &BookFilter) -> Result<Vec<Book>, StoreError> {
        let books: Vec<Book> = self
            .collection
            .find(filter.build())
            .await?
            .try_collect()
            .await?;

        Ok(books)
    }

    pub async fn count(&self, filter: &BookFilter) -> Result<u64, StoreError> {
        let count = self.collection.count_documents(filter.build()).await?;
        Ok(count)
    }

    /// Sets the price of the first book with `title`. Returns whether a book matched.
    pub async fn update_price(&self, title: &str, price: f64) -> Result<bool, StoreError> {
        let result = self
            .collection
            .update_one(
                BookFilter::new().title(title).build(),
                doc! { "$set": { "price": price } },
            )
            .await?;

        Ok(result.matched_count > 0)
    }

    pub async fn set_in_stock(&self, title: &str, in_stock: bool) -> Result<bool, StoreError> {
        let result = self
            .collection
            .update_one(
                BookFilter::new().title(title).build(),
                doc! { "$set": { "in_stock": in_stock } },
            )
            .await?;

        Ok(result.matched_count > 0)
    }

    /// Deletes the first book with `title`. Returns whether one was deleted.
    pub async fn delete_by_title(&self, title: &str) -> Result<bool, StoreError> {
        let result = self
            .collection
            .delete_one(BookFilter::new().title(title).build())
            .await?;

        Ok(result.deleted_count > 0)
    }

    /// Lists title/author/price of matching books, optionally sorted and paged.
    pub async fn find_summaries(
        &self,
        filter: &BookFilter,
        sort: Option<(SortField, SortDirection)>,
        page: Option<Page>,
    ) -> Result<Vec<BookSummary>, StoreError> {
        let summaries = self.collection.clone_with_type::<BookSummary>();
        let mut find = summaries
            .find(filter.build())
            .projection(query_builder::summary_projection());

        if let Some((field, direction)) = sort {
            find = find.sort(query_builder::sort_document(field, direction));
        }
        if let Some(page) = page {
            find = find.skip(page.skip()).limit(page.limit());
        }

        let listed: Vec<BookSummary> = find.await?.try_collect().await?;
        Ok(listed)
    }

    pub async fn category_breakdown(&self) -> Result<Vec<CategoryCount>, StoreError> {
        self.aggregate(query_builder::category_breakdown()).await
    }

    pub async fn average_price_by_genre(&self) -> Result<Vec<GenrePrice>, StoreError> {
        self.aggregate(query_builder::average_price_by_genre()).await
    }

    pub async fn top_authors(&self, limit: i64) -> Result<Vec<AuthorCount>, StoreError> {
        self.aggregate(query_builder::top_authors(limit)).await
    }

    pub async fn count_by_decade(&self) -> Result<Vec<DecadeCount>, StoreError> {
        self.aggregate(query_builder::count_by_decade()).await
    }

    async fn aggregate<T: DeserializeOwned>(
        &self,
        pipeline: Vec<Document>,
    ) -> Result<Vec<T>, StoreError> {
        let rows: Vec<Document> = self.collection.aggregate(pipeline).await?.try_collect().await?;

        rows.into_iter()
            .map(|row| bson::from_document(row).map_err(StoreError::from))
            .collect()
    }

    /// Creates the title index and the author/year compound index. Returns the
    /// index names.
    pub async fn create_indexes(&self) -> Result<Vec<String>, StoreError> {
        let mut names = Vec::new();

        for keys in query_builder::index_keys() {
            let model = IndexModel::builder().keys(keys).build();
            let result = self.collection.create_index(model).await?;
            info!("Created index {}", result.index_name);
            names.push(result.index_name);
        }

        Ok(names)
    }

    /// Explains a lookup by exact title with `executionStats` verbosity.
    pub async fn explain_title_lookup(&self, title: &str) -> Result<ExplainSummary, StoreError> {
        let command = doc! {
            "explain": {
                "find": self.collection.name(),
                "filter": BookFilter::new().title(title).build(),
            },
            "verbosity": "executionStats",
        };
        let output = self.database.run_command(command).await?;

        if let Ok(json) =
            serde_json::to_string_pretty(&Bson::Document(output.clone()).into_relaxed_extjson())
        {
            debug!("Explain output:\n{json}");
        }

        Ok(summarize_explain(&output))
    }
}

/// Arranges `found` in the order of `ids`. `$in` gives no ordering guarantee.
/// Ids with no matching book are skipped, as are books whose id is not listed.
pub fn order_by_ids(mut found: Vec<Book>, ids: &[ObjectId]) -> Vec<Book> {
    let mut ordered = Vec::with_capacity(found.len());
    for id in ids {
        if let Some(pos) = found.iter().position(|book| book.id.as_ref() == Some(id)) {
            ordered.push(found.swap_remove(pos));
        }
    }
    ordered
}

/// Pulls the interesting numbers out of an `explain` reply. Missing fields
/// are left at their defaults; server versions differ in what they report.
pub fn summarize_explain(output: &Document) -> ExplainSummary {
    let mut summary = ExplainSummary::default();

    if let Ok(stats) = output.get_document("executionStats") {
        summary.docs_examined = read_int(stats, "totalDocsExamined");
        summary.keys_examined = read_int(stats, "totalKeysExamined");
        summary.returned = read_int(stats, "nReturned");
    }

    let winning_plan = output
        .get_document("queryPlanner")
        .and_then(|planner| planner.get_document("winningPlan"));
    if let Ok(plan) = winning_plan {
        // Newer servers nest the classic plan under `queryPlan`.
        let plan = plan.get_document("queryPlan").unwrap_or(plan);
        summary.winning_stage = plan.get_str("stage").unwrap_or_default().to_string();
        summary.index_name = find_index_name(plan);
    }

    summary
}

fn read_int(doc: &Document, key: &str) -> i64 {
    match doc.get(key) {
        Some(Bson::Int32(n)) => i64::from(*n),
        Some(Bson::Int64(n)) => *n,
        Some(Bson::Double(n)) => *n as i64,
        _ => 0,
    }
}

/// Walks `inputStage` links until a stage names the index it scanned.
fn find_index_name(plan: &Document) -> Option<String> {
    let mut stage = Some(plan);
    while let Some(current) = stage {
        if let Ok(name) = current.get_str("indexName") {
            return Some(name.to_string());
        }
        stage = current.get_document("inputStage").ok();
    }
    None
}
