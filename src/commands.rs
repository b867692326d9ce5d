use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::Path;

use expense_tracker::config::{self, ServerConfig, TrackerConfig};
use expense_tracker::tools::SummarizeArgs;
use expense_tracker::ui::{self, Icons};
use expense_tracker::{
    CategoryResource, DateRange, ExpenseStore, ExpenseTools, NewExpense, ToolOutcome,
};

fn open_tools(config: &ServerConfig) -> anyhow::Result<ExpenseTools> {
    let store = ExpenseStore::open(&config.database)?;
    Ok(ExpenseTools::new(store, CategoryResource::new(&config.categories)))
}

/// Reports never create or write the database file.
fn report_tools(config: &ServerConfig) -> ExpenseTools {
    let store = ExpenseStore::read_only(&config.database);
    ExpenseTools::new(store, CategoryResource::new(&config.categories))
}

/// Print the JSON envelope, or hand the payload to `render`.
fn emit<T, F>(outcome: ToolOutcome<T>, json: bool, render: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce(T),
{
    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        if outcome.is_error() {
            anyhow::bail!("operation failed");
        }
        return Ok(());
    }

    match outcome {
        ToolOutcome::Success { data } => {
            render(data);
            Ok(())
        }
        ToolOutcome::Error { kind, message } => {
            ui::error(&message);
            anyhow::bail!("{} failure", kind)
        }
    }
}

pub async fn run_serve(config: &ServerConfig) -> anyhow::Result<()> {
    ui::header("Expense Tracker MCP server");
    ui::info("Database", &config.database.display().to_string());
    ui::info("Categories", &config.categories.display().to_string());
    ui::info("Endpoint", &format!("http://{}:{}/mcp", config.host, config.port));

    expense_tracker::server::start_server(config).await
}

pub async fn run_add(config: &ServerConfig, expense: NewExpense, json: bool) -> anyhow::Result<()> {
    let tools = open_tools(config)?;
    let outcome = tools.add_expense(expense).await;

    emit(outcome, json, |added| {
        ui::success(&format!("{} (id {})", added.message, added.id));
    })
}

pub async fn run_list(config: &ServerConfig, range: DateRange, json: bool) -> anyhow::Result<()> {
    let tools = report_tools(config);
    let outcome = tools.list_expenses(range).await;

    emit(outcome, json, |expenses| {
        ui::section(Icons::LEDGER, "Expenses");
        if expenses.is_empty() {
            println!("{}", ui::muted("No expenses found."));
            return;
        }
        println!("{}", ui::expenses_table(&expenses));
        ui::summary_row("Entries:", &expenses.len().to_string());
    })
}

pub async fn run_summarize(
    config: &ServerConfig,
    range: DateRange,
    category: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let tools = report_tools(config);
    let outcome = tools.summarize(SummarizeArgs { range, category }).await;

    emit(outcome, json, |summaries| {
        ui::section(Icons::STATS, "Summary by category");
        if summaries.is_empty() {
            println!("{}", ui::muted("No expenses found."));
            return;
        }
        println!("{}", ui::summary_table(&summaries));

        let total: f64 = summaries.iter().map(|s| s.total_amount).sum();
        let count: i64 = summaries.iter().map(|s| s.count).sum();
        let total_text = ui::table::format_amount(total);
        ui::summary_row(
            "Total:",
            &total_text.style(ui::theme().amount_style(total)).to_string(),
        );
        ui::summary_row("Entries:", &count.to_string());
    })
}

pub fn run_categories(config: &ServerConfig) {
    let resource = CategoryResource::new(&config.categories);
    if !resource.path().exists() {
        ui::warn(&format!("{} not found, showing default categories", resource.path().display()));
    }
    println!("{}", resource.read());
}

pub fn run_init(path: &Path, overrides: TrackerConfig, force: bool) -> anyhow::Result<()> {
    let starter = TrackerConfig {
        database: overrides.database.or_else(|| Some(config::DEFAULT_DATABASE_PATH.to_string())),
        categories: overrides.categories.or_else(|| Some(config::DEFAULT_CATEGORIES_PATH.to_string())),
        host: Some(config::DEFAULT_HOST.to_string()),
        port: Some(config::DEFAULT_PORT),
    };

    config::write_config(path, &starter, force)?;
    ui::success(&format!("{} Wrote {}", Icons::GEAR, path.display()));
    Ok(())
}
