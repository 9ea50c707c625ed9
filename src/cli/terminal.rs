use std::io::Write;

use crate::application::{LedgerView, RowView, ViewError};
use crate::domain::{EntryDate, FormField, RawSubmission, format_amount};

/// Renders the ledger as plain text lines and holds the form being filled in.
pub struct TerminalView<W: Write> {
    out: W,
    form: RawSubmission,
    header_written: bool,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            form: RawSubmission::default(),
            header_written: false,
        }
    }

    pub fn form(&self) -> &RawSubmission {
        &self.form
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set_field(field, value);
    }

    /// Write a prompt for `field` without a trailing newline.
    pub fn prompt(&mut self, field: FormField) -> Result<(), ViewError> {
        write!(self.out, "{}: ", field.name())?;
        self.out.flush()?;
        Ok(())
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> LedgerView for TerminalView<W> {
    fn append_row(&mut self, row: &RowView) -> Result<(), ViewError> {
        if !self.header_written {
            writeln!(
                self.out,
                "{:<12} {:<30} {:<15} {:>12} TYPE",
                "DATE", "DESCRIPTION", "CATEGORY", "AMOUNT"
            )?;
            writeln!(self.out, "{}", "-".repeat(78))?;
            self.header_written = true;
        }

        let kind = if row.is_income { "income" } else { "expense" };
        let off_calendar = EntryDate::parse(&row.date)
            .and_then(|date| date.to_naive_date())
            .is_none();

        write!(
            self.out,
            "{:<12} {:<30} {:<15} {:>12} {}",
            row.date,
            truncate(&row.description, 30),
            truncate(&row.category, 15),
            format_amount(row.amount),
            kind
        )?;
        if off_calendar {
            write!(self.out, " (date not on calendar)")?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn set_balance_text(&mut self, text: &str) -> Result<(), ViewError> {
        writeln!(self.out, "{}", text)?;
        Ok(())
    }

    fn set_error_text(&mut self, message: &str) -> Result<(), ViewError> {
        if !message.is_empty() {
            writeln!(self.out, "Error: {}", message)?;
        }
        Ok(())
    }

    fn set_success_text(&mut self, message: &str) -> Result<(), ViewError> {
        if !message.is_empty() {
            writeln!(self.out, "{}", message)?;
        }
        Ok(())
    }

    fn clear_inputs(&mut self) -> Result<(), ViewError> {
        self.form = RawSubmission::default();
        Ok(())
    }
}

pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
