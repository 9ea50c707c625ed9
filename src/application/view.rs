use crate::domain::{Entry, format_amount};

use super::ViewError;

/// Row data handed to the view for one accepted entry.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub date: String,
    pub description: String,
    pub category: String,
    pub amount: f64,
    pub is_income: bool,
}

impl From<&Entry> for RowView {
    fn from(entry: &Entry) -> Self {
        Self {
            date: entry.date().to_string(),
            description: entry.description().to_string(),
            category: entry.category().to_string(),
            amount: entry.amount(),
            is_income: entry.is_income(),
        }
    }
}

/// Output surface driven by the [`super::Orchestrator`].
/// Clearing a message is a `set_*_text` call with an empty string.
pub trait LedgerView {
    fn append_row(&mut self, row: &RowView) -> Result<(), ViewError>;

    fn set_balance_text(&mut self, text: &str) -> Result<(), ViewError>;

    fn set_error_text(&mut self, message: &str) -> Result<(), ViewError>;

    fn set_success_text(&mut self, message: &str) -> Result<(), ViewError>;

    fn clear_inputs(&mut self) -> Result<(), ViewError>;
}

/// Text for the balance line, e.g. "Total Balance: $75.5".
pub fn balance_text(balance: f64) -> String {
    format!("Total Balance: ${}", format_amount(balance))
}
