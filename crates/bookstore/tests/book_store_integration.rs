//! Integration tests for the book query catalog.
//!
//! These tests run every `BookStore` operation against a live server:
//! - inserts, id-ordered reads and counts
//! - single-document updates and deletes by title
//! - projected, sorted and paged listings
//! - aggregations and index creation
//!
//! To run these tests, set MONGODB_URI to a reachable server:
//! `MONGODB_URI=mongodb://localhost:27017 cargo nextest run -p bookstore`
//!
//! Each test works in its own throwaway database which is dropped at the end,
//! so they can safely run against a development server.

use bookstore::{
    Book, BookFilter, BookStore, Page, SortDirection, SortField, StoreError, open_client, ping,
};
use mongodb::{Client, bson::oid::ObjectId};
use std::env;

/// Get a client, skipping tests if MONGODB_URI is not set.
async fn get_test_client() -> Option<Client> {
    let uri = match env::var("MONGODB_URI") {
        Ok(uri) => uri,
        Err(_) => {
            eprintln!("Skipping test: MONGODB_URI not set");
            return None;
        }
    };

    let client = match open_client(&uri).await {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Skipping test: Failed to create client: {e}");
            return None;
        }
    };

    match ping(&client).await {
        Ok(()) => Some(client),
        Err(e) => {
            eprintln!("Skipping test: Failed to connect to MongoDB: {e}");
            None
        }
    }
}

fn test_store(client: &Client) -> BookStore {
    let db_name = format!("bookstore_test_{}", ObjectId::new().to_hex());
    BookStore::new(client.database(&db_name), "books")
}

async fn cleanup(client: &Client, store: &BookStore) {
    let _ = client.database(store.database_name()).drop().await;
}

fn sample_books() -> Vec<Book> {
    vec![
        Book::new(
            "Dune",
            "Frank Herbert",
            "Science Fiction",
            1965,
            15.99,
            true,
            412,
            "Chilton Books",
        ),
        Book::new(
            "Foundation",
            "Isaac Asimov",
            "Science Fiction",
            1951,
            11.49,
            true,
            255,
            "Gnome Press",
        ),
        Book::new(
            "I, Robot",
            "Isaac Asimov",
            "Science Fiction",
            1950,
            9.99,
            true,
            253,
            "Gnome Press",
        ),
        Book::new(
            "Frankenstein",
            "Mary Shelley",
            "Gothic Fiction",
            1818,
            8.99,
            true,
            280,
            "Lackington",
        ),
        Book::new(
            "The Martian",
            "Andy Weir",
            "Science Fiction",
            2011,
            14.99,
            false,
            369,
            "Crown Publishing",
        ),
        Book::new(
            "Ready Player One",
            "Ernest Cline",
            "Science Fiction",
            2011,
            13.50,
            true,
            374,
            "Random House",
        ),
        Book::new(
            "Fahrenheit 451",
            "Ray Bradbury",
            "Dystopian",
            1953,
            10.99,
            true,
            249,
            "Ballantine Books",
        ),
    ]
}

#[tokio::test]
async fn test_insert_and_find_by_ids_preserves_order() {
    let Some(client) = get_test_client().await else {
        return;
    };
    let store = test_store(&client);
    let books = sample_books();

    let ids = store.insert_many(&books).await.expect("insert failed");
    assert_eq!(ids.len(), books.len());

    let fetched = store.find_by_ids(&ids).await.expect("find failed");
    assert_eq!(fetched.len(), books.len());
    for ((stored, original), id) in fetched.iter().zip(&books).zip(&ids) {
        assert_eq!(stored, &original.clone().with_id(*id));
    }

    cleanup(&client, &store).await;
}

#[tokio::test]
async fn test_filters_and_counts() {
    let Some(client) = get_test_client().await else {
        return;
    };
    let store = test_store(&client);
    store.insert_many(&sample_books()).await.expect("insert failed");

    let asimov = store
        .find(&BookFilter::new().author("Isaac Asimov"))
        .await
        .expect("find failed");
    assert_eq!(asimov.len(), 2);

    let before_1900 = store
        .count(&BookFilter::new().published_before(1900))
        .await
        .expect("count failed");
    assert_eq!(before_1900, 1);

    let recent_in_stock = store
        .count(&BookFilter::new().in_stock(true).published_after(2010))
        .await
        .expect("count failed");
    assert_eq!(recent_in_stock, 1);

    cleanup(&client, &store).await;
}

#[tokio::test]
async fn test_update_and_delete_by_title() {
    let Some(client) = get_test_client().await else {
        return;
    };
    let store = test_store(&client);
    store.insert_many(&sample_books()).await.expect("insert failed");

    assert!(store.set_in_stock("The Martian", true).await.unwrap());
    assert!(store.update_price("The Martian", 16.99).await.unwrap());
    let martian = store
        .find(&BookFilter::new().title("The Martian"))
        .await
        .unwrap();
    assert!(martian[0].in_stock);
    assert_eq!(martian[0].price, 16.99);

    assert!(store.delete_by_title("Fahrenheit 451").await.unwrap());
    assert!(!store.delete_by_title("Fahrenheit 451").await.unwrap());
    assert!(!store.update_price("No Such Book", 1.0).await.unwrap());

    cleanup(&client, &store).await;
}

#[tokio::test]
async fn test_sorted_paged_summaries() {
    let Some(client) = get_test_client().await else {
        return;
    };
    let store = test_store(&client);
    store.insert_many(&sample_books()).await.expect("insert failed");

    let cheapest_first = store
        .find_summaries(
            &BookFilter::new(),
            Some((SortField::Price, SortDirection::Ascending)),
            None,
        )
        .await
        .unwrap();
    assert_eq!(cheapest_first.first().unwrap().title, "Frankenstein");
    assert_eq!(cheapest_first.last().unwrap().title, "Dune");

    let by_title = Some((SortField::Title, SortDirection::Ascending));
    let page_one = store
        .find_summaries(&BookFilter::new(), by_title, Some(Page::new(1, 5).unwrap()))
        .await
        .unwrap();
    let page_two = store
        .find_summaries(&BookFilter::new(), by_title, Some(Page::new(2, 5).unwrap()))
        .await
        .unwrap();
    assert_eq!(page_one.len(), 5);
    assert_eq!(page_two.len(), 2);
    assert_eq!(page_one[0].title, "Dune");
    assert_eq!(page_two[1].title, "The Martian");

    cleanup(&client, &store).await;
}

#[tokio::test]
async fn test_aggregations() {
    let Some(client) = get_test_client().await else {
        return;
    };
    let store = test_store(&client);
    let books = sample_books();
    store.insert_many(&books).await.expect("insert failed");

    let breakdown = store.category_breakdown().await.unwrap();
    assert_eq!(breakdown[0].genre, "Science Fiction");
    assert_eq!(breakdown[0].count, 5);
    let total: i64 = breakdown.iter().map(|row| row.count).sum();
    assert_eq!(total, books.len() as i64);

    let top = store.top_authors(1).await.unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].author, "Isaac Asimov");
    assert_eq!(top[0].book_count, 2);

    let prices = store.average_price_by_genre().await.unwrap();
    assert_eq!(prices.len(), 3);
    assert!(prices.windows(2).all(|w| w[0].average_price >= w[1].average_price));

    let decades = store.count_by_decade().await.unwrap();
    assert_eq!(decades.first().unwrap().decade, 1810);
    assert_eq!(decades.last().unwrap().decade, 2010);
    let fifties = decades.iter().find(|row| row.decade == 1950).unwrap();
    assert_eq!(fifties.count, 3);

    cleanup(&client, &store).await;
}

#[tokio::test]
async fn test_indexes_and_explain() {
    let Some(client) = get_test_client().await else {
        return;
    };
    let store = test_store(&client);
    store.insert_many(&sample_books()).await.expect("insert failed");

    let names = store.create_indexes().await.unwrap();
    assert_eq!(names, vec!["title_1", "author_1_published_year_-1"]);

    let summary = store.explain_title_lookup("The Martian").await.unwrap();
    assert_eq!(summary.returned, 1);
    assert_eq!(summary.index_name.as_deref(), Some("title_1"));

    cleanup(&client, &store).await;
}

#[test]
fn test_invalid_page_is_rejected_before_query() {
    assert!(matches!(
        Page::new(0, 5),
        Err(StoreError::InvalidPage { .. })
    ));
}
