//! Routes JSON-RPC requests to the MCP method implementations.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::categories::{CATEGORIES_MIME, CATEGORIES_URI};
use crate::expense::{DateRange, NewExpense};
use crate::outcome::ToolOutcome;
use crate::tools::{ExpenseTools, SummarizeArgs};

use super::catalog::{self, ADD_EXPENSE, LIST_EXPENSES, SUMMARIZE};
use super::jsonrpc::{
    error_codes, JsonRpcErrorResponse, JsonRpcNotification, JsonRpcOutput, JsonRpcRequest,
    JsonRpcResponse, RequestId,
};
use super::types::{
    Capability, InitializeResult, ResourceContents, ResourcesListResult, ResourcesReadParams,
    ResourcesReadResult, ServerCapabilities, ServerInfo, ToolContent, ToolsCallParams,
    ToolsCallResult, ToolsListResult, PROTOCOL_VERSION,
};

/// Server name reported during `initialize`
pub const SERVER_NAME: &str = "ExpenseTracker";

pub struct McpHandler {
    tools: ExpenseTools,
}

impl McpHandler {
    pub fn new(tools: ExpenseTools) -> Self {
        Self { tools }
    }

    pub async fn dispatch(&self, request: &JsonRpcRequest) -> JsonRpcOutput {
        let id = request.id.clone();
        tracing::debug!(method = %request.method, "dispatching MCP request");

        match request.method.as_str() {
            "initialize" => handle_initialize(id),
            "ping" => success(id, json!({})),
            "tools/list" => respond(
                id,
                ToolsListResult {
                    tools: catalog::tool_definitions(),
                },
            ),
            "tools/call" => self.handle_tools_call(id, &request.params).await,
            "resources/list" => respond(
                id,
                ResourcesListResult {
                    resources: catalog::resource_definitions(),
                },
            ),
            "resources/read" => self.handle_resources_read(id, &request.params),
            other => failure(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method not found: {other}"),
            ),
        }
    }

    /// Notifications need no answer; they are only logged.
    pub fn handle_notification(&self, notification: &JsonRpcNotification) {
        tracing::debug!(method = %notification.method, "received MCP notification");
    }

    async fn handle_tools_call(&self, id: RequestId, params: &Option<Value>) -> JsonRpcOutput {
        let call = match parse_params::<ToolsCallParams>(params, "tools/call") {
            Ok(call) => call,
            Err(message) => return failure(id, error_codes::INVALID_PARAMS, message),
        };
        let arguments = match call.arguments {
            None | Some(Value::Null) => json!({}),
            Some(v) => v,
        };
        tracing::debug!(tool = %call.name, "calling tool");

        let result = match call.name.as_str() {
            ADD_EXPENSE => match serde_json::from_value::<NewExpense>(arguments) {
                Ok(expense) => call_result(&self.tools.add_expense(expense).await),
                Err(e) => return invalid_arguments(id, ADD_EXPENSE, e),
            },
            LIST_EXPENSES => match serde_json::from_value::<DateRange>(arguments) {
                Ok(range) => call_result(&self.tools.list_expenses(range).await),
                Err(e) => return invalid_arguments(id, LIST_EXPENSES, e),
            },
            SUMMARIZE => match serde_json::from_value::<SummarizeArgs>(arguments) {
                Ok(args) => call_result(&self.tools.summarize(args).await),
                Err(e) => return invalid_arguments(id, SUMMARIZE, e),
            },
            other => {
                return failure(id, error_codes::INVALID_PARAMS, format!("Unknown tool: {other}"));
            }
        };

        match result {
            Ok(call) => respond(id, call),
            Err(e) => failure(id, error_codes::INTERNAL_ERROR, e.to_string()),
        }
    }

    fn handle_resources_read(&self, id: RequestId, params: &Option<Value>) -> JsonRpcOutput {
        let read = match parse_params::<ResourcesReadParams>(params, "resources/read") {
            Ok(read) => read,
            Err(message) => return failure(id, error_codes::INVALID_PARAMS, message),
        };
        if read.uri != CATEGORIES_URI {
            return failure(
                id,
                error_codes::INVALID_PARAMS,
                format!("Unknown resource: {}", read.uri),
            );
        }

        respond(
            id,
            ResourcesReadResult {
                contents: vec![ResourceContents {
                    uri: CATEGORIES_URI.to_string(),
                    mime_type: CATEGORIES_MIME.to_string(),
                    text: self.tools.categories(),
                }],
            },
        )
    }
}

fn handle_initialize(id: RequestId) -> JsonRpcOutput {
    respond(
        id,
        InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(Capability {}),
                resources: Some(Capability {}),
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        },
    )
}

/// Tool outcomes travel as JSON text plus the same value as structured content.
fn call_result<T: Serialize>(outcome: &ToolOutcome<T>) -> serde_json::Result<ToolsCallResult> {
    let structured = serde_json::to_value(outcome)?;
    let text = serde_json::to_string(&structured)?;
    Ok(ToolsCallResult {
        content: vec![ToolContent::Text { text }],
        structured_content: Some(structured),
        is_error: outcome.is_error(),
    })
}

fn parse_params<T: DeserializeOwned>(params: &Option<Value>, method: &str) -> Result<T, String> {
    match params {
        Some(p) => serde_json::from_value::<T>(p.clone())
            .map_err(|e| format!("invalid {method} params: {e}")),
        None => Err(format!("{method} requires params")),
    }
}

fn invalid_arguments(id: RequestId, tool: &str, err: serde_json::Error) -> JsonRpcOutput {
    failure(
        id,
        error_codes::INVALID_PARAMS,
        format!("invalid arguments for {tool}: {err}"),
    )
}

fn respond<T: Serialize>(id: RequestId, result: T) -> JsonRpcOutput {
    match serde_json::to_value(result) {
        Ok(v) => success(id, v),
        Err(e) => failure(id, error_codes::INTERNAL_ERROR, e.to_string()),
    }
}

fn success(id: RequestId, result: Value) -> JsonRpcOutput {
    JsonRpcOutput::Success(JsonRpcResponse::success(id, result))
}

fn failure(id: RequestId, code: i32, message: impl Into<String>) -> JsonRpcOutput {
    JsonRpcOutput::Error(JsonRpcErrorResponse::error(id, code, message))
}
