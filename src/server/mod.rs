use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::categories::CategoryResource;
use crate::config::ServerConfig;
use crate::mcp::McpHandler;
use crate::storage::ExpenseStore;
use crate::tools::ExpenseTools;

pub mod routes;

/// Server state
pub struct AppState {
    pub handler: McpHandler,
}

/// Errors from binding or serving HTTP
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to bind on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(String),
}

pub fn build_router(tools: ExpenseTools) -> Router {
    let state = Arc::new(AppState {
        handler: McpHandler::new(tools),
    });

    Router::new()
        .route("/mcp", post(routes::handle_mcp))
        .route("/health", get(routes::handle_health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Initialize the store, then serve MCP until the process is stopped.
///
/// A store that cannot be opened or written aborts startup.
pub async fn start_server(config: &ServerConfig) -> anyhow::Result<()> {
    let store = ExpenseStore::open(&config.database)?;
    let categories = CategoryResource::new(&config.categories);
    tracing::info!(
        "Database path: {} ({} expenses on record)",
        store.path().display(),
        store.count_expenses()?
    );

    let app = build_router(ExpenseTools::new(store, categories));

    let addr: SocketAddr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind {
            addr: addr.to_string(),
            source: e,
        })?;
    tracing::info!("Starting MCP server on http://{}/mcp", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Serve(e.to_string()))?;

    Ok(())
}
