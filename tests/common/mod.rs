// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use tally::application::{LedgerView, Orchestrator, RowView, Settings, ViewError};
use tally::domain::RawSubmission;

/// Every call the orchestrator made on the view, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCall {
    AppendRow(RowView),
    SetBalance(String),
    SetError(String),
    SetSuccess(String),
    ClearInputs,
}

/// View that records calls and mirrors what a page would currently display.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub calls: Vec<ViewCall>,
    pub rows: Vec<RowView>,
    pub balance_text: String,
    pub error_text: String,
    pub success_text: String,
    /// Make `append_row` fail, to exercise the unexpected-failure path.
    pub fail_rows: bool,
}

impl RecordingView {
    pub fn failing_rows() -> Self {
        Self {
            fail_rows: true,
            ..Self::default()
        }
    }
}

impl LedgerView for RecordingView {
    fn append_row(&mut self, row: &RowView) -> Result<(), ViewError> {
        if self.fail_rows {
            return Err(ViewError::Other("table is gone".into()));
        }
        self.calls.push(ViewCall::AppendRow(row.clone()));
        self.rows.push(row.clone());
        Ok(())
    }

    fn set_balance_text(&mut self, text: &str) -> Result<(), ViewError> {
        self.calls.push(ViewCall::SetBalance(text.to_string()));
        self.balance_text = text.to_string();
        Ok(())
    }

    fn set_error_text(&mut self, message: &str) -> Result<(), ViewError> {
        self.calls.push(ViewCall::SetError(message.to_string()));
        self.error_text = message.to_string();
        Ok(())
    }

    fn set_success_text(&mut self, message: &str) -> Result<(), ViewError> {
        self.calls.push(ViewCall::SetSuccess(message.to_string()));
        self.success_text = message.to_string();
        Ok(())
    }

    fn clear_inputs(&mut self) -> Result<(), ViewError> {
        self.calls.push(ViewCall::ClearInputs);
        Ok(())
    }
}

/// Orchestrator over a fresh recording view with the default 5 second delay.
pub fn test_orchestrator() -> Orchestrator<RecordingView> {
    Orchestrator::new(RecordingView::default(), Settings::default())
}

/// A fixed instant, offset by `secs` seconds.
pub fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_683_000_000 + secs, 0).unwrap()
}

pub fn submission(date: &str, description: &str, category: &str, amount: &str) -> RawSubmission {
    RawSubmission::new(date, description, category, amount)
}

pub fn valid_submission(amount: &str) -> RawSubmission {
    submission("2023-05-01", "Item", "Misc", amount)
}

pub fn invalid_submission() -> RawSubmission {
    submission("2023-05-01", "Item", "Misc", "0")
}
