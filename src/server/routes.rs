use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::mcp::jsonrpc::error_codes;
use crate::mcp::{JsonRpcNotification, JsonRpcRequest};
use crate::server::AppState;

pub async fn handle_health() -> impl IntoResponse {
    Json(json!({"status": "ok", "service": "expense-tracker"}))
}

/// `POST /mcp`: one JSON-RPC message per request body.
pub async fn handle_mcp(State(state): State<Arc<AppState>>, body: String) -> Response {
    let message: Value = match serde_json::from_str(&body) {
        Ok(v) => v,
        Err(_) => return json_rpc_error(StatusCode::OK, error_codes::PARSE_ERROR, "Parse error"),
    };

    if message.is_array() {
        return json_rpc_error(
            StatusCode::OK,
            error_codes::INVALID_REQUEST,
            "Invalid request: batch requests are not supported",
        );
    }
    if !message.is_object() {
        return json_rpc_error(
            StatusCode::OK,
            error_codes::INVALID_REQUEST,
            "Invalid request: expected a JSON object",
        );
    }

    let has_id = message.get("id").is_some_and(|v| !v.is_null());
    if !has_id {
        if let Ok(notification) = serde_json::from_value::<JsonRpcNotification>(message) {
            state.handler.handle_notification(&notification);
        }
        return StatusCode::NO_CONTENT.into_response();
    }

    let request: JsonRpcRequest = match serde_json::from_value(message) {
        Ok(r) => r,
        Err(e) => {
            return json_rpc_error(
                StatusCode::OK,
                error_codes::INVALID_REQUEST,
                &format!("Invalid request: {e}"),
            )
        }
    };

    let output = state.handler.dispatch(&request).await;
    match output.to_json() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(e) => json_rpc_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            &e.to_string(),
        ),
    }
}

/// JSON-RPC error without a request id (`id: null`)
fn json_rpc_error(status: StatusCode, code: i32, message: &str) -> Response {
    let body = json!({
        "jsonrpc": "2.0",
        "id": null,
        "error": { "code": code, "message": message }
    });
    (status, Json(body)).into_response()
}
