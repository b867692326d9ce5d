use tabled::{settings::Style, Table, Tabled};

use crate::expense::{CategorySummary, Expense};

#[derive(Tabled)]
pub struct ExpenseRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Amount")]
    pub amount: String,
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Subcategory")]
    pub subcategory: String,
    #[tabled(rename = "Note")]
    pub note: String,
}

impl From<&Expense> for ExpenseRow {
    fn from(e: &Expense) -> Self {
        Self {
            id: e.id,
            date: e.date.clone(),
            amount: format_amount(e.amount),
            category: e.category.clone(),
            subcategory: e.subcategory.clone(),
            note: e.note.clone(),
        }
    }
}

#[derive(Tabled)]
pub struct SummaryRow {
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Total")]
    pub total: String,
    #[tabled(rename = "Count")]
    pub count: i64,
}

impl From<&CategorySummary> for SummaryRow {
    fn from(s: &CategorySummary) -> Self {
        Self {
            category: s.category.clone(),
            total: format_amount(s.total_amount),
            count: s.count,
        }
    }
}

/// Two decimals, no currency symbol
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

pub fn expenses_table(expenses: &[Expense]) -> String {
    render(expenses.iter().map(ExpenseRow::from).collect())
}

pub fn summary_table(summaries: &[CategorySummary]) -> String {
    render(summaries.iter().map(SummaryRow::from).collect())
}

fn render<R: Tabled>(rows: Vec<R>) -> String {
    if rows.is_empty() {
        return String::new();
    }

    Table::new(&rows).with(Style::rounded()).to_string()
}
