//! MCP (Model Context Protocol) over JSON-RPC 2.0
//!
//! Exposes the expense tools and the category resource to MCP clients.

pub mod jsonrpc;
pub mod types;
pub mod catalog;
pub mod handler;

pub use handler::McpHandler;
pub use jsonrpc::{JsonRpcNotification, JsonRpcOutput, JsonRpcRequest, RequestId};
