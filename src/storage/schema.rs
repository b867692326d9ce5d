//! Database schema definitions

/// SQL to create the expenses table
pub const CREATE_EXPENSES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS expenses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT NOT NULL,
    amount REAL NOT NULL,
    category TEXT NOT NULL,
    subcategory TEXT DEFAULT '',
    note TEXT DEFAULT ''
)
"#;

/// Column list shared by every row-returning SELECT
pub const EXPENSE_COLUMNS: &str = "id, date, amount, category, subcategory, note";

/// Durability mode applied when the store is initialized
pub const JOURNAL_MODE: &str = "WAL";

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![CREATE_EXPENSES_TABLE]
}
