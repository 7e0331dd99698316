//! Database integration for seeding the book collection.
//!
//! The [`Seeder`] inserts the catalog and reads back a summary; [`run_seed`]
//! wraps it with connection setup and guaranteed shutdown.

mod seeder;

pub(crate) use seeder::close;
pub use seeder::{SeedError, SeedReport, Seeder, run_seed};
