//! MCP method payloads: initialize, tools/*, resources/*.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Protocol revision this server speaks
pub const PROTOCOL_VERSION: &str = "2025-03-26";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerCapabilities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Capability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Capability>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Capability {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

/// Response for `initialize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

/// A single tool definition in the `tools/list` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpToolDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsListResult {
    pub tools: Vec<McpToolDefinition>,
}

/// Request params for `tools/call`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsCallParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// Content item in a tool call response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    Text { text: String },
}

/// Response for `tools/call`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsCallResult {
    pub content: Vec<ToolContent>,
    #[serde(rename = "structuredContent", default, skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Value>,
    #[serde(default, rename = "isError")]
    pub is_error: bool,
}

/// A resource definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpResourceDefinition {
    pub uri: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "mimeType", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcesListResult {
    pub resources: Vec<McpResourceDefinition>,
}

/// Request params for `resources/read`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcesReadParams {
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceContents {
    pub uri: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub text: String,
}

/// Response for `resources/read`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcesReadResult {
    pub contents: Vec<ResourceContents>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tool_definition_uses_camel_case_schema_key() {
        let def = McpToolDefinition {
            name: "list_expenses".into(),
            description: None,
            input_schema: json!({"type": "object"}),
        };
        let s = serde_json::to_string(&def).unwrap();
        assert!(s.contains("inputSchema"));
        assert!(!s.contains("description"));
    }

    #[test]
    fn tools_call_params_without_arguments() {
        let p: ToolsCallParams = serde_json::from_str(r#"{"name":"list_expenses"}"#).unwrap();
        assert_eq!(p.name, "list_expenses");
        assert!(p.arguments.is_none());
    }

    #[test]
    fn tool_content_is_tagged_text() {
        let c = ToolContent::Text { text: "hi".into() };
        assert_eq!(serde_json::to_value(&c).unwrap(), json!({"type": "text", "text": "hi"}));
    }
}
