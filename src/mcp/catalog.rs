//! Tool and resource definitions advertised by the server.

use serde_json::Value;

use crate::categories::{CATEGORIES_MIME, CATEGORIES_URI};
use super::types::{McpResourceDefinition, McpToolDefinition};

pub const ADD_EXPENSE: &str = "add_expense";
pub const LIST_EXPENSES: &str = "list_expenses";
pub const SUMMARIZE: &str = "summarize";

/// One input property: name, JSON type, description, required
type Arg = (&'static str, &'static str, &'static str, bool);

const DATE_START: Arg = ("start_date", "string", "Inclusive lower bound, YYYY-MM-DD", false);
const DATE_END: Arg = ("end_date", "string", "Inclusive upper bound, YYYY-MM-DD", false);

pub fn tool_definitions() -> Vec<McpToolDefinition> {
    vec![
        McpToolDefinition {
            name: ADD_EXPENSE.to_string(),
            description: Some(
                "Add a new expense entry to the database. If date is not provided, it defaults to today's date."
                    .to_string(),
            ),
            input_schema: build_input_schema(&[
                ("amount", "number", "Amount spent; any sign", true),
                ("category", "string", "Category label", true),
                ("subcategory", "string", "Optional subcategory", false),
                ("note", "string", "Optional free-form note", false),
                ("date", "string", "Date as YYYY-MM-DD; defaults to today", false),
            ]),
        },
        McpToolDefinition {
            name: LIST_EXPENSES.to_string(),
            description: Some(
                "List expense entries, most recent first. Provide start_date, end_date, both, or neither."
                    .to_string(),
            ),
            input_schema: build_input_schema(&[DATE_START, DATE_END]),
        },
        McpToolDefinition {
            name: SUMMARIZE.to_string(),
            description: Some(
                "Summarize expenses by category with total amount and count, optionally within a date range or for one category."
                    .to_string(),
            ),
            input_schema: build_input_schema(&[
                DATE_START,
                DATE_END,
                ("category", "string", "Only summarize this category", false),
            ]),
        },
    ]
}

pub fn resource_definitions() -> Vec<McpResourceDefinition> {
    vec![McpResourceDefinition {
        uri: CATEGORIES_URI.to_string(),
        name: "categories".to_string(),
        description: Some("Suggested expense category labels".to_string()),
        mime_type: Some(CATEGORIES_MIME.to_string()),
    }]
}

/// Builds a JSON Schema `inputSchema` from argument descriptions.
fn build_input_schema(arguments: &[Arg]) -> Value {
    let mut properties = serde_json::Map::new();
    let mut required = Vec::new();

    for (name, arg_type, description, is_required) in arguments {
        let mut prop = serde_json::Map::new();
        prop.insert("type".to_string(), Value::String(arg_type.to_string()));
        prop.insert("description".to_string(), Value::String(description.to_string()));
        properties.insert(name.to_string(), Value::Object(prop));
        if *is_required {
            required.push(Value::String(name.to_string()));
        }
    }

    let mut schema = serde_json::Map::new();
    schema.insert("type".to_string(), Value::String("object".to_string()));
    schema.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".to_string(), Value::Array(required));
    }

    Value::Object(schema)
}
