//! Storage Layer - SQLite-backed persistence
//!
//! System of record is a single SQLite table:
//! - expenses(id, date, amount, category, subcategory, note)

pub mod schema;
pub mod filter;
pub mod sqlite;

pub use sqlite::ExpenseStore;
