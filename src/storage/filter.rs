//! Predicate builder for the optional filters on reads.
//!
//! Each present filter contributes one `(condition, value)` pair; the pairs are
//! joined into a single parameterized `WHERE` clause, so every combination of
//! bounds goes through the same code path and values never touch the SQL text.

use rusqlite::types::ToSql;

use crate::expense::{non_empty, DateRange};

#[derive(Default)]
pub struct Predicates {
    conditions: Vec<&'static str>,
    values: Vec<Box<dyn ToSql>>,
}

impl Predicates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inclusive lexical bounds on `date`.
    pub fn date_range(mut self, range: &DateRange) -> Self {
        if let Some(start) = range.start() {
            self.push("date >= ?", start.to_string());
        }
        if let Some(end) = range.end() {
            self.push("date <= ?", end.to_string());
        }
        self
    }

    /// Exact match on `category`; empty means no filter.
    pub fn category(mut self, category: Option<&str>) -> Self {
        if let Some(category) = non_empty(category) {
            self.push("category = ?", category.to_string());
        }
        self
    }

    fn push(&mut self, condition: &'static str, value: String) {
        self.conditions.push(condition);
        self.values.push(Box::new(value));
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// ` WHERE a AND b`, or an empty string when nothing was added
    pub fn where_clause(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        }
    }

    /// Bound values in the order their placeholders appear
    pub fn params(&self) -> Vec<&dyn ToSql> {
        self.values.iter().map(|v| v.as_ref()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_filters() {
        let p = Predicates::new().date_range(&DateRange::all()).category(None);
        assert_eq!(p.where_clause(), "");
        assert!(p.params().is_empty());
    }

    #[test]
    fn test_both_bounds() {
        let p = Predicates::new().date_range(&DateRange::between("2024-01-01", "2024-01-31"));
        assert_eq!(p.where_clause(), " WHERE date >= ? AND date <= ?");
        assert_eq!(p.params().len(), 2);
    }

    #[test]
    fn test_single_bounds() {
        let start = Predicates::new().date_range(&DateRange::since("2024-01-01"));
        assert_eq!(start.where_clause(), " WHERE date >= ?");

        let end = Predicates::new().date_range(&DateRange::until("2024-01-31"));
        assert_eq!(end.where_clause(), " WHERE date <= ?");
    }

    #[test]
    fn test_category_with_range() {
        let p = Predicates::new()
            .date_range(&DateRange::since("2024-01-01"))
            .category(Some("Travel"));
        assert_eq!(p.where_clause(), " WHERE date >= ? AND category = ?");
        assert_eq!(p.params().len(), 2);
    }

    #[test]
    fn test_empty_category_ignored() {
        let p = Predicates::new().category(Some(""));
        assert!(p.is_empty());
    }
}
