//! # Expense Tracker - personal finance records over MCP
//!
//! A small expense ledger exposed as MCP tools over HTTP.
//!
//! Expense Tracker provides:
//! - SQLite-backed storage of expense records (one table, WAL journal)
//! - Date-bounded listing and per-category summaries
//! - An advisory category list served as an MCP resource
//! - A JSON-RPC 2.0 endpoint speaking the MCP tool/resource methods

pub mod expense;
pub mod outcome;
pub mod storage;
pub mod categories;
pub mod tools;
pub mod mcp;
pub mod server;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use expense::{CategorySummary, DateRange, Expense, NewExpense};
pub use outcome::{FailureKind, ToolOutcome};
pub use storage::ExpenseStore;
pub use categories::CategoryResource;
pub use tools::ExpenseTools;
pub use config::ServerConfig;

/// Result type alias for Expense Tracker operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Expense Tracker operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Background task failed: {0}")]
    Task(String),
}
