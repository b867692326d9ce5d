//! Expense Tracker CLI - serve the MCP endpoint or work with the ledger directly

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use expense_tracker::config::{self, ServerConfig, TrackerConfig};
use expense_tracker::{DateRange, NewExpense};

mod commands;

#[derive(Parser)]
#[command(name = "expense-tracker")]
#[command(version)]
#[command(about = "Personal expense tracker served as MCP tools over HTTP")]
#[command(long_about = r#"
Expense Tracker keeps a ledger of expenses in SQLite and exposes it to MCP clients:
  • add_expense    record an expense (date defaults to today)
  • list_expenses  list expenses, optionally within a date range
  • summarize      totals and counts per category
  • expense:///categories  suggested category labels

Example usage:
  expense-tracker serve --port 8080
  expense-tracker add --amount 12.50 --category "Food & Dining" --note lunch
  expense-tracker summarize --start-date 2024-01-01 --end-date 2024-01-31
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to the database file
    #[arg(short, long, global = true)]
    database: Option<String>,

    /// Path to the categories JSON file
    #[arg(long, global = true)]
    categories: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the MCP endpoint over HTTP
    Serve {
        /// Address to listen on
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,
    },

    /// Record an expense
    Add {
        /// Amount spent (negative for refunds)
        #[arg(short, long, allow_hyphen_values = true)]
        amount: f64,

        /// Category label
        #[arg(short, long)]
        category: String,

        /// Optional subcategory
        #[arg(short, long, default_value = "")]
        subcategory: String,

        /// Optional note
        #[arg(short, long, default_value = "")]
        note: String,

        /// Date as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Print the raw JSON result
        #[arg(long)]
        json: bool,
    },

    /// List expenses, most recent first
    List {
        /// Inclusive lower date bound
        #[arg(long)]
        start_date: Option<String>,

        /// Inclusive upper date bound
        #[arg(long)]
        end_date: Option<String>,

        /// Print the raw JSON result
        #[arg(long)]
        json: bool,
    },

    /// Totals and counts per category
    Summarize {
        /// Inclusive lower date bound
        #[arg(long)]
        start_date: Option<String>,

        /// Inclusive upper date bound
        #[arg(long)]
        end_date: Option<String>,

        /// Only summarize this category
        #[arg(short, long)]
        category: Option<String>,

        /// Print the raw JSON result
        #[arg(long)]
        json: bool,
    },

    /// Print the category list document
    Categories,

    /// Write a starter config file
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let file_config = config::load_config(cli.config.as_deref())?;
    let mut overrides = TrackerConfig {
        database: cli.database,
        categories: cli.categories,
        ..Default::default()
    };

    match cli.command {
        Commands::Serve { host, port } => {
            overrides.host = host;
            overrides.port = port;
            let config = ServerConfig::resolve(file_config, overrides);
            commands::run_serve(&config).await?;
        }

        Commands::Add { amount, category, subcategory, note, date, json } => {
            let config = ServerConfig::resolve(file_config, overrides);
            let mut expense = NewExpense::new(amount, category)
                .with_subcategory(subcategory)
                .with_note(note);
            expense.date = date;
            commands::run_add(&config, expense, json).await?;
        }

        Commands::List { start_date, end_date, json } => {
            let config = ServerConfig::resolve(file_config, overrides);
            let range = DateRange { start_date, end_date };
            commands::run_list(&config, range, json).await?;
        }

        Commands::Summarize { start_date, end_date, category, json } => {
            let config = ServerConfig::resolve(file_config, overrides);
            let range = DateRange { start_date, end_date };
            commands::run_summarize(&config, range, category, json).await?;
        }

        Commands::Categories => {
            let config = ServerConfig::resolve(file_config, overrides);
            commands::run_categories(&config);
        }

        Commands::Init { force } => {
            let path = cli.config.unwrap_or_else(config::default_config_path);
            commands::run_init(&path, overrides, force)?;
        }
    }

    Ok(())
}
