//! Walks the book query catalog against a seeded collection.
//!
//! Read queries, listings, aggregations and index commands always run. The
//! insert/update/delete steps only run when the config allows changes.

use bookstore::{BookFilter, BookStore, Page, SortDirection, SortField, open_client, ping};
use mongodb::Client;
use tracing::{error, info};

use crate::catalog;
use crate::config::SeedConfig;
use crate::db::{SeedError, close};
use crate::report;

/// Books per page in the paged listing.
pub const PAGE_SIZE: u64 = 5;
/// Pages shown by the paged listing.
pub const PAGES_SHOWN: u64 = 3;

/// Connects, runs the catalog and always shuts the client down afterwards.
pub async fn run_explore(config: &SeedConfig) -> Result<(), SeedError> {
    let client = match open_client(&config.mongodb_uri).await {
        Ok(client) => client,
        Err(e) => {
            error!("Invalid MongoDB endpoint: {e}");
            report::print_error(&e);
            return Err(e.into());
        }
    };

    let outcome = explore_with_client(&client, config).await;
    if let Err(e) = &outcome {
        error!("Exploring failed: {e}");
        report::print_error(e);
    }

    close(client).await;
    outcome
}

async fn explore_with_client(client: &Client, config: &SeedConfig) -> Result<(), SeedError> {
    ping(client).await?;
    report::print_connected();

    let store = BookStore::new(client.database(&config.database), &config.collection);

    if config.apply_changes {
        apply_changes(&store).await?;
    } else {
        info!("Skipping insert/update/delete steps; changes not enabled");
    }

    read_queries(&store).await?;
    advanced_queries(&store).await?;
    aggregations(&store).await?;
    indexing(&store).await?;

    Ok(())
}

async fn apply_changes(store: &BookStore) -> Result<(), SeedError> {
    report::print_heading("Changes");

    let extra = catalog::extra_book();
    let id = store.insert_one(&extra).await?;
    report::print_done(&format!("Inserted \"{}\" ({id})", extra.title));

    if store.set_in_stock("The Martian", true).await? {
        report::print_done("Marked \"The Martian\" as in stock");
    }
    if store.update_price("The Martian", 16.99).await? {
        report::print_done("Set the price of \"The Martian\" to $16.99");
    }
    if store.delete_by_title("Fahrenheit 451").await? {
        report::print_done("Deleted \"Fahrenheit 451\"");
    }

    Ok(())
}

async fn read_queries(store: &BookStore) -> Result<(), SeedError> {
    let queries = [
        (
            "Science Fiction books",
            BookFilter::new().genre("Science Fiction"),
        ),
        ("Published before 1900", BookFilter::new().published_before(1900)),
        ("Published after 1900", BookFilter::new().published_after(1900)),
        ("Books by Isaac Asimov", BookFilter::new().author("Isaac Asimov")),
    ];

    for (title, filter) in queries {
        report::print_heading(title);
        let books = store.find(&filter).await?;
        report::print_lines(report::listing_lines(&books));
    }

    Ok(())
}

async fn advanced_queries(store: &BookStore) -> Result<(), SeedError> {
    report::print_heading("In stock and published after 2010");
    let recent = store
        .find_summaries(
            &BookFilter::new().in_stock(true).published_after(2010),
            None,
            None,
        )
        .await?;
    report::print_lines(recent.iter().map(report::summary_line));

    for (title, direction) in [
        ("Cheapest first", SortDirection::Ascending),
        ("Most expensive first", SortDirection::Descending),
    ] {
        report::print_heading(title);
        let sorted = store
            .find_summaries(&BookFilter::new(), Some((SortField::Price, direction)), None)
            .await?;
        report::print_lines(sorted.iter().map(report::summary_line));
    }

    for number in 1..=PAGES_SHOWN {
        let page = Page::new(number, PAGE_SIZE)?;
        report::print_heading(&format!(
            "Page {} (books {}-{})",
            page.number(),
            page.skip() + 1,
            page.skip() + page.size()
        ));
        let listed = store
            .find_summaries(
                &BookFilter::new(),
                Some((SortField::Title, SortDirection::Ascending)),
                Some(page),
            )
            .await?;
        report::print_lines(listed.iter().map(report::summary_line));
    }

    Ok(())
}

async fn aggregations(store: &BookStore) -> Result<(), SeedError> {
    report::print_heading("Average price by genre");
    let prices = store.average_price_by_genre().await?;
    report::print_lines(prices.iter().map(report::genre_price_line));

    report::print_heading("Author with the most books");
    let top = store.top_authors(1).await?;
    report::print_lines(top.iter().map(report::author_line));

    report::print_heading("Books by publication decade");
    let decades = store.count_by_decade().await?;
    report::print_lines(decades.iter().map(report::decade_line));

    Ok(())
}

async fn indexing(store: &BookStore) -> Result<(), SeedError> {
    report::print_heading("Indexes");
    for name in store.create_indexes().await? {
        report::print_done(&format!("Index {name} ready"));
    }

    report::print_heading("Explain: title lookup for \"The Martian\"");
    let summary = store.explain_title_lookup("The Martian").await?;
    report::print_lines(report::explain_lines(&summary));

    Ok(())
}
