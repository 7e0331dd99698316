//! Console rendering for seed and explore runs.
//!
//! Line builders return plain text; the `print_*` functions add color and
//! write to stdout (stderr for errors).

use std::fmt::Display;

use bookstore::{
    AuthorCount, Book, BookSummary, CategoryCount, DecadeCount, ExplainSummary, GenrePrice,
};
use colored::Colorize;

pub fn connected_line() -> String {
    "Connected to MongoDB server".to_string()
}

pub fn inserted_line(count: usize) -> String {
    format!("{count} books were successfully inserted into the database")
}

/// Numbered listing, 1-based, in the order given.
pub fn listing_lines(books: &[Book]) -> Vec<String> {
    books
        .iter()
        .enumerate()
        .map(|(i, book)| {
            format!(
                "{}. \"{}\" by {} ({})",
                i + 1,
                book.title,
                book.author,
                book.published_year
            )
        })
        .collect()
}

pub fn total_line(total: u64) -> String {
    format!("Total books in collection: {total}")
}

pub fn category_lines(categories: &[CategoryCount]) -> Vec<String> {
    categories
        .iter()
        .map(|row| format!("- {}: {} book(s)", row.genre, row.count))
        .collect()
}

pub fn summary_line(summary: &BookSummary) -> String {
    format!(
        "\"{}\" by {} - ${:.2}",
        summary.title, summary.author, summary.price
    )
}

pub fn genre_price_line(row: &GenrePrice) -> String {
    format!("- {}: ${:.2} average", row.genre, row.average_price)
}

pub fn author_line(row: &AuthorCount) -> String {
    format!("- {}: {} book(s)", row.author, row.book_count)
}

pub fn decade_line(row: &DecadeCount) -> String {
    format!("- {}s: {} book(s)", row.decade, row.count)
}

pub fn explain_lines(summary: &ExplainSummary) -> Vec<String> {
    vec![
        format!(
            "Winning stage: {}",
            if summary.winning_stage.is_empty() {
                "unknown"
            } else {
                summary.winning_stage.as_str()
            }
        ),
        format!(
            "Index used: {}",
            summary.index_name.as_deref().unwrap_or("none")
        ),
        format!("Keys examined: {}", summary.keys_examined),
        format!("Documents examined: {}", summary.docs_examined),
        format!("Documents returned: {}", summary.returned),
    ]
}

pub fn print_connected() {
    println!("{}", connected_line().green());
}

pub fn print_inserted(count: usize) {
    println!("{}", inserted_line(count).green());
}

pub fn print_listing(books: &[Book]) {
    println!("{}", "\nNewly Inserted Books:".cyan());
    for line in listing_lines(books) {
        println!("{}", line.cyan());
    }
}

pub fn print_total(total: u64) {
    println!("{}", format!("\n{}", total_line(total)).magenta());
}

pub fn print_categories(categories: &[CategoryCount]) {
    println!("{}", "Genre Summary:".magenta());
    for line in category_lines(categories) {
        println!("{}", line.magenta());
    }
}

/// Blank line plus a heading, for explorer sections.
pub fn print_heading(title: &str) {
    println!("\n{}", title.cyan().bold());
}

pub fn print_lines(lines: impl IntoIterator<Item = String>) {
    for line in lines {
        println!("  {line}");
    }
}

pub fn print_done(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn print_error(err: &impl Display) {
    eprintln!("{} {err}", "Error occurred:".red());
}

pub fn print_closed() {
    println!("{}", "Connection closed".green());
}
