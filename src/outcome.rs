//! Tagged tool results
//!
//! Every tool answers with the same envelope so callers discriminate on
//! `status` instead of on the payload's shape:
//!
//! ```json
//! {"status": "success", "data": ...}
//! {"status": "error", "kind": "query", "message": "..."}
//! ```

use serde::{Deserialize, Serialize};

/// Why a tool call failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The store file rejected a write because it is read-only
    ReadOnly,
    /// Any other write failure
    Database,
    /// A read query failed
    Query,
    /// A background task panicked or was cancelled
    Internal,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::ReadOnly => "read_only",
            FailureKind::Database => "database",
            FailureKind::Query => "query",
            FailureKind::Internal => "internal",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ToolOutcome<T> {
    Success { data: T },
    Error { kind: FailureKind, message: String },
}

impl<T> ToolOutcome<T> {
    pub fn success(data: T) -> Self {
        ToolOutcome::Success { data }
    }

    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        ToolOutcome::Error {
            kind,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ToolOutcome::Error { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ToolOutcome::Success { data } => Some(data),
            ToolOutcome::Error { .. } => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            ToolOutcome::Success { data } => Some(data),
            ToolOutcome::Error { .. } => None,
        }
    }
}

/// Payload of a successful `add_expense`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Added {
    pub id: i64,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_shape() {
        let outcome = ToolOutcome::success(vec![1, 2]);
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value, json!({"status": "success", "data": [1, 2]}));
    }

    #[test]
    fn test_error_shape() {
        let outcome: ToolOutcome<Vec<i32>> = ToolOutcome::failure(FailureKind::ReadOnly, "nope");
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            value,
            json!({"status": "error", "kind": "read_only", "message": "nope"})
        );
        assert!(outcome.is_error());
        assert!(outcome.data().is_none());
    }
}
