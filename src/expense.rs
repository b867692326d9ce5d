//! Expense records and the filters applied to them

use serde::{Deserialize, Deserializer, Serialize};

/// Date format used for stored dates. Lexical order equals calendar order.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A stored expense row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub date: String,
    pub amount: f64,
    pub category: String,
    pub subcategory: String,
    pub note: String,
}

/// Input for a new expense. `date` falls back to today when absent.
///
/// A null `subcategory` or `note` is stored as an empty string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewExpense {
    #[serde(deserialize_with = "coerce_amount")]
    pub amount: f64,
    pub category: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub subcategory: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub note: String,
    #[serde(default)]
    pub date: Option<String>,
}

impl NewExpense {
    pub fn new(amount: f64, category: impl Into<String>) -> Self {
        Self {
            amount,
            category: category.into(),
            subcategory: String::new(),
            note: String::new(),
            date: None,
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = subcategory.into();
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// The date to store: the supplied one verbatim (even empty), or today's
    /// local date when none was given.
    pub fn resolved_date(&self) -> String {
        self.date.clone().unwrap_or_else(today)
    }
}

/// Per-category aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub total_amount: f64,
    pub count: i64,
}

/// Inclusive date bounds. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

impl DateRange {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn between(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start_date: Some(start.into()),
            end_date: Some(end.into()),
        }
    }

    pub fn since(start: impl Into<String>) -> Self {
        Self {
            start_date: Some(start.into()),
            end_date: None,
        }
    }

    pub fn until(end: impl Into<String>) -> Self {
        Self {
            start_date: None,
            end_date: Some(end.into()),
        }
    }

    pub fn start(&self) -> Option<&str> {
        non_empty(self.start_date.as_deref())
    }

    pub fn end(&self) -> Option<&str> {
        non_empty(self.end_date.as_deref())
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Today's local date as `YYYY-MM-DD`
pub fn today() -> String {
    chrono::Local::now().date_naive().format(DATE_FORMAT).to_string()
}

/// Accepts a JSON number or a numeric string.
fn coerce_amount<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(f64),
        Text(String),
    }

    match Amount::deserialize(deserializer)? {
        Amount::Number(n) => Ok(n),
        Amount::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("amount is not a number: {e}"))),
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_expense_defaults() {
        let expense: NewExpense =
            serde_json::from_value(json!({"amount": 12.5, "category": "Travel"})).unwrap();
        assert_eq!(expense.amount, 12.5);
        assert_eq!(expense.subcategory, "");
        assert_eq!(expense.note, "");
        assert!(expense.date.is_none());
    }

    #[test]
    fn test_amount_coerced_from_string() {
        let expense: NewExpense =
            serde_json::from_value(json!({"amount": "-3.25", "category": "Other"})).unwrap();
        assert_eq!(expense.amount, -3.25);
    }

    #[test]
    fn test_amount_rejects_text() {
        let result = serde_json::from_value::<NewExpense>(json!({"amount": "lots", "category": "Other"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_resolved_date() {
        let explicit = NewExpense::new(1.0, "Food & Dining").with_date("2024-02-29");
        assert_eq!(explicit.resolved_date(), "2024-02-29");

        let missing = NewExpense::new(1.0, "Food & Dining");
        assert_eq!(missing.resolved_date(), today());

        let empty = NewExpense::new(1.0, "Food & Dining").with_date("");
        assert_eq!(empty.resolved_date(), "");
    }

    #[test]
    fn test_null_subcategory_and_note_are_empty() {
        let expense: NewExpense = serde_json::from_value(json!({
            "amount": 3,
            "category": "Food & Dining",
            "subcategory": null,
            "note": null,
            "date": null
        }))
        .unwrap();
        assert_eq!(expense.subcategory, "");
        assert_eq!(expense.note, "");
        assert!(expense.date.is_none());
    }

    #[test]
    fn test_date_range_ignores_empty_bounds() {
        let range = DateRange {
            start_date: Some(String::new()),
            end_date: Some("2024-01-31".into()),
        };
        assert_eq!(range.start(), None);
        assert_eq!(range.end(), Some("2024-01-31"));
    }
}
