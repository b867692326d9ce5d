//! Advisory category list served as the `expense:///categories` resource.
//!
//! Nothing validates expense categories against this list.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// URI the category list is published under
pub const CATEGORIES_URI: &str = "expense:///categories";

/// MIME type of the category document
pub const CATEGORIES_MIME: &str = "application/json";

/// Labels returned when no category file exists
pub const DEFAULT_CATEGORIES: [&str; 10] = [
    "Food & Dining",
    "Transportation",
    "Shopping",
    "Entertainment",
    "Bills & Utilities",
    "Healthcare",
    "Travel",
    "Education",
    "Business",
    "Other",
];

#[derive(Debug, Clone)]
pub struct CategoryResource {
    path: PathBuf,
}

impl CategoryResource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The category document as JSON text.
    ///
    /// The file's contents are returned verbatim. A missing file yields the
    /// default list; any other read failure yields an inline error document.
    pub fn read(&self) -> String {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => default_document(),
            Err(e) => {
                tracing::warn!("Could not read categories from {}: {}", self.path.display(), e);
                error_document(&e.to_string())
            }
        }
    }
}

/// `{"categories": [...]}` with the default labels, two-space indented
pub fn default_document() -> String {
    let doc = serde_json::json!({ "categories": DEFAULT_CATEGORIES });
    serde_json::to_string_pretty(&doc).unwrap_or_else(|e| error_document(&e.to_string()))
}

fn error_document(cause: &str) -> String {
    serde_json::json!({ "error": format!("Could not load categories: {cause}") }).to_string()
}
