//! SQLite storage implementation

use std::path::{Path, PathBuf};
use rusqlite::{Connection, OpenFlags, params};
use crate::Result;
use crate::expense::{CategorySummary, DateRange, Expense, NewExpense};
use super::filter::Predicates;
use super::schema;

/// SQLite-backed expense ledger.
///
/// Holds only the file path: every operation opens its own connection and
/// drops it before returning, on success and failure alike.
#[derive(Debug, Clone)]
pub struct ExpenseStore {
    path: PathBuf,
    read_only: bool,
}

impl ExpenseStore {
    /// Point at a database file without touching it
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            read_only: false,
        }
    }

    /// Point at an existing database file that is never written.
    ///
    /// Writes through this store fail with SQLite's read-only error.
    pub fn read_only(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            read_only: true,
        }
    }

    /// Open a database file (creates if doesn't exist) and initialize it
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(path);
        store.initialize()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn connect(&self) -> Result<Connection> {
        if self.read_only {
            return Ok(Connection::open_with_flags(&self.path, OpenFlags::SQLITE_OPEN_READ_ONLY)?);
        }
        Ok(Connection::open(&self.path)?)
    }

    /// Switch to WAL, create the schema and prove the file is writable.
    ///
    /// Safe to call repeatedly.
    pub fn initialize(&self) -> Result<()> {
        let conn = self.connect()?;

        let mode: String = conn.query_row(
            &format!("PRAGMA journal_mode={}", schema::JOURNAL_MODE),
            [],
            |row| row.get(0),
        )?;
        tracing::debug!("journal mode for {}: {}", self.path.display(), mode);

        for stmt in schema::all_schema_statements() {
            conn.execute(stmt, [])?;
        }

        // Scratch row, removed by rowid so real rows are never touched
        conn.execute(
            "INSERT INTO expenses (date, amount, category) VALUES ('2000-01-01', 0, 'test')",
            [],
        )?;
        let scratch_id = conn.last_insert_rowid();
        conn.execute("DELETE FROM expenses WHERE id = ?1", [scratch_id])?;

        tracing::info!("Database initialized with write access: {}", self.path.display());
        Ok(())
    }

    // ========== Expense Operations ==========

    /// Insert one expense and return its id
    pub fn add_expense(&self, expense: &NewExpense) -> Result<i64> {
        let conn = self.connect()?;
        conn.execute(
            r#"
            INSERT INTO expenses (date, amount, category, subcategory, note)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                expense.resolved_date(),
                expense.amount,
                expense.category,
                expense.subcategory,
                expense.note,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Expenses within `range`, most recent first
    pub fn list_expenses(&self, range: &DateRange) -> Result<Vec<Expense>> {
        let predicates = Predicates::new().date_range(range);
        let sql = format!(
            "SELECT {} FROM expenses{} ORDER BY date DESC, id DESC",
            schema::EXPENSE_COLUMNS,
            predicates.where_clause()
        );

        let conn = self.connect()?;
        let mut stmt = conn.prepare(&sql)?;
        let expenses = stmt
            .query_map(predicates.params().as_slice(), row_to_expense)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(expenses)
    }

    /// Totals per category within `range`, largest total first
    pub fn summarize(&self, range: &DateRange, category: Option<&str>) -> Result<Vec<CategorySummary>> {
        let predicates = Predicates::new().date_range(range).category(category);
        let sql = format!(
            "SELECT category, SUM(amount) AS total_amount, COUNT(*) AS count \
             FROM expenses{} GROUP BY category ORDER BY total_amount DESC",
            predicates.where_clause()
        );

        let conn = self.connect()?;
        let mut stmt = conn.prepare(&sql)?;
        let summaries = stmt
            .query_map(predicates.params().as_slice(), |row| {
                Ok(CategorySummary {
                    category: row.get(0)?,
                    total_amount: row.get(1)?,
                    count: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(summaries)
    }

    /// Count all expenses
    pub fn count_expenses(&self) -> Result<usize> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

/// Helper to convert a row to an Expense
fn row_to_expense(row: &rusqlite::Row) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: row.get(0)?,
        date: row.get(1)?,
        amount: row.get(2)?,
        category: row.get(3)?,
        subcategory: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        note: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
    })
}
