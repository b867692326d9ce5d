//! The expense operations as tools: async entry points that never fail.
//!
//! Store calls run on the blocking pool and every error is folded into a
//! [`ToolOutcome`] so transports only ever serialize data.

use serde::Deserialize;

use crate::categories::CategoryResource;
use crate::expense::{CategorySummary, DateRange, Expense, NewExpense};
use crate::outcome::{Added, FailureKind, ToolOutcome};
use crate::storage::ExpenseStore;
use crate::Error;

/// Message returned when a write hits a read-only store
pub const READ_ONLY_MESSAGE: &str = "Database is in read-only mode. Check file permissions.";

/// Arguments of `summarize`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummarizeArgs {
    #[serde(flatten)]
    pub range: DateRange,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ExpenseTools {
    store: ExpenseStore,
    categories: CategoryResource,
}

impl ExpenseTools {
    pub fn new(store: ExpenseStore, categories: CategoryResource) -> Self {
        Self { store, categories }
    }

    async fn blocking<T, F>(&self, op: F) -> crate::Result<T>
    where
        F: FnOnce(&ExpenseStore) -> crate::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || op(&store))
            .await
            .map_err(|e| Error::Task(e.to_string()))?
    }

    pub async fn add_expense(&self, expense: NewExpense) -> ToolOutcome<Added> {
        match self.blocking(move |store| store.add_expense(&expense)).await {
            Ok(id) => {
                tracing::debug!("Added expense {}", id);
                ToolOutcome::success(Added {
                    id,
                    message: "Expense added successfully".to_string(),
                })
            }
            Err(e) => {
                tracing::warn!("add_expense failed: {}", e);
                write_failure(&e)
            }
        }
    }

    pub async fn list_expenses(&self, range: DateRange) -> ToolOutcome<Vec<Expense>> {
        match self.blocking(move |store| store.list_expenses(&range)).await {
            Ok(rows) => ToolOutcome::success(rows),
            Err(e) => {
                tracing::warn!("list_expenses failed: {}", e);
                read_failure(&e, "Error listing expenses")
            }
        }
    }

    pub async fn summarize(&self, args: SummarizeArgs) -> ToolOutcome<Vec<CategorySummary>> {
        let result = self
            .blocking(move |store| store.summarize(&args.range, args.category.as_deref()))
            .await;
        match result {
            Ok(rows) => ToolOutcome::success(rows),
            Err(e) => {
                tracing::warn!("summarize failed: {}", e);
                read_failure(&e, "Error summarizing expenses")
            }
        }
    }

    /// The category document, see [`CategoryResource::read`]
    pub fn categories(&self) -> String {
        self.categories.read()
    }
}

/// Read-only stores are told apart from other failures by the error text.
fn write_failure<T>(err: &Error) -> ToolOutcome<T> {
    if let Error::Task(cause) = err {
        return ToolOutcome::failure(FailureKind::Internal, format!("Database error: {cause}"));
    }
    let text = err.to_string();
    if text.to_lowercase().contains("readonly") {
        ToolOutcome::failure(FailureKind::ReadOnly, READ_ONLY_MESSAGE)
    } else {
        ToolOutcome::failure(FailureKind::Database, format!("Database error: {text}"))
    }
}

fn read_failure<T>(err: &Error, context: &str) -> ToolOutcome<T> {
    let kind = match err {
        Error::Task(_) => FailureKind::Internal,
        _ => FailureKind::Query,
    };
    ToolOutcome::failure(kind, format!("{context}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tools_in(dir: &TempDir) -> ExpenseTools {
        let store = ExpenseStore::open(dir.path().join("expenses.db")).unwrap();
        ExpenseTools::new(store, CategoryResource::new(dir.path().join("categories.json")))
    }

    #[tokio::test]
    async fn test_add_then_list() {
        let dir = TempDir::new().unwrap();
        let tools = tools_in(&dir);

        let added = tools
            .add_expense(NewExpense::new(9.99, "Entertainment").with_date("2024-05-01"))
            .await;
        let added = added.into_data().unwrap();
        assert_eq!(added.message, "Expense added successfully");

        let listed = tools.list_expenses(DateRange::all()).await.into_data().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, added.id);
    }

    #[tokio::test]
    async fn test_summarize_category_filter() {
        let dir = TempDir::new().unwrap();
        let tools = tools_in(&dir);
        tools.add_expense(NewExpense::new(1.0, "Travel").with_date("2024-01-01")).await;
        tools.add_expense(NewExpense::new(2.0, "Other").with_date("2024-01-01")).await;

        let args = SummarizeArgs {
            category: Some("Travel".into()),
            ..Default::default()
        };
        let rows = tools.summarize(args).await.into_data().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category, "Travel");
    }

    #[tokio::test]
    async fn test_query_failure_is_data() {
        let dir = TempDir::new().unwrap();
        // Never initialized: the table does not exist
        let tools = ExpenseTools::new(
            ExpenseStore::new(dir.path().join("empty.db")),
            CategoryResource::new(dir.path().join("categories.json")),
        );

        match tools.list_expenses(DateRange::all()).await {
            ToolOutcome::Error { kind, message } => {
                assert_eq!(kind, FailureKind::Query);
                assert!(message.starts_with("Error listing expenses:"));
            }
            other => panic!("expected failure, got {:?}", other),
        }

        match tools.summarize(SummarizeArgs::default()).await {
            ToolOutcome::Error { kind, message } => {
                assert_eq!(kind, FailureKind::Query);
                assert!(message.starts_with("Error summarizing expenses:"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_add_failure_is_generic_database_error() {
        let dir = TempDir::new().unwrap();
        let tools = ExpenseTools::new(
            ExpenseStore::new(dir.path().join("empty.db")),
            CategoryResource::new(dir.path().join("categories.json")),
        );

        match tools.add_expense(NewExpense::new(1.0, "Other")).await {
            ToolOutcome::Error { kind, message } => {
                assert_eq!(kind, FailureKind::Database);
                assert!(message.starts_with("Database error:"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_add_to_read_only_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("expenses.db");
        ExpenseStore::open(&path).unwrap();
        let _writer = rusqlite::Connection::open(&path).unwrap();

        let tools = ExpenseTools::new(
            ExpenseStore::read_only(&path),
            CategoryResource::new(dir.path().join("categories.json")),
        );
        let outcome = tools
            .add_expense(NewExpense::new(4.0, "Food & Dining").with_date("2024-01-01"))
            .await;
        assert_eq!(outcome, ToolOutcome::failure(FailureKind::ReadOnly, READ_ONLY_MESSAGE));

        // Reads still work
        let listed = tools.list_expenses(DateRange::all()).await.into_data().unwrap();
        assert!(listed.is_empty());
    }

    #[test]
    fn test_summarize_args_flatten() {
        let args: SummarizeArgs = serde_json::from_value(serde_json::json!({
            "start_date": "2024-01-01",
            "category": "Travel"
        }))
        .unwrap();
        assert_eq!(args.range.start(), Some("2024-01-01"));
        assert_eq!(args.range.end(), None);
        assert_eq!(args.category.as_deref(), Some("Travel"));
    }
}
