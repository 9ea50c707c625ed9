use chrono::{DateTime, TimeDelta, Utc};

use crate::domain::{Entry, Ledger, RawSubmission, validate};

use super::{AppError, Channel, ClearTimers, LedgerView, RowView, balance_text};

/// Shown to the user for every rejected submission, whatever the reason.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred. Please check your inputs.";

pub const SUCCESS_MESSAGE: &str = "Transaction added successfully.";

/// Runtime knobs for the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// How long error and success messages stay on screen.
    pub clear_delay: TimeDelta,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            clear_delay: TimeDelta::seconds(5),
        }
    }
}

/// Outcome of a single submission.
#[derive(Debug)]
pub enum Submission {
    Accepted(Entry),
    /// The specific reason is kept for diagnostics; the view only ever saw
    /// [`GENERIC_ERROR_MESSAGE`].
    Rejected(AppError),
}

impl Submission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Submission::Accepted(_))
    }
}

/// Sequences validation, ledger updates and view notifications.
/// This is the one place the ledger is mutated.
pub struct Orchestrator<V: LedgerView> {
    ledger: Ledger,
    view: V,
    timers: ClearTimers,
}

impl<V: LedgerView> Orchestrator<V> {
    pub fn new(view: V, settings: Settings) -> Self {
        Self {
            ledger: Ledger::new(),
            view,
            timers: ClearTimers::new(settings.clear_delay),
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Handle one form submission at time `now`.
    ///
    /// Message clears that fell due before `now` run first. Never fails: any
    /// error is logged and reported to the view as the generic message.
    pub fn submit(&mut self, raw: &RawSubmission, now: DateTime<Utc>) -> Submission {
        self.tick(now);

        match self.try_submit(raw, now) {
            Ok(entry) => {
                tracing::debug!(
                    date = %entry.date(),
                    category = entry.category(),
                    amount = entry.amount(),
                    balance = self.ledger.current_balance(),
                    "Entry added"
                );
                Submission::Accepted(entry)
            }
            Err(err) => self.reject(err, now),
        }
    }

    /// Report a submission that failed before or outside validation, e.g.
    /// input that could not be decoded. Same user-facing outcome as any
    /// other rejection.
    pub fn reject(&mut self, err: AppError, now: DateTime<Utc>) -> Submission {
        tracing::error!(error = %err, "An error occurred");
        self.show_error(GENERIC_ERROR_MESSAGE, now);
        Submission::Rejected(err)
    }

    fn try_submit(&mut self, raw: &RawSubmission, now: DateTime<Utc>) -> Result<Entry, AppError> {
        let entry = validate(raw)?;

        self.ledger.append(entry.clone());
        self.view.append_row(&RowView::from(&entry))?;
        self.view
            .set_balance_text(&balance_text(self.ledger.current_balance()))?;

        self.view.clear_inputs()?;
        self.view.set_success_text(SUCCESS_MESSAGE)?;
        self.timers.schedule(Channel::Success, now);

        Ok(entry)
    }

    fn show_error(&mut self, message: &str, now: DateTime<Utc>) {
        let shown = self
            .view
            .set_error_text(message)
            .and_then(|()| self.view.set_success_text(""));
        if let Err(err) = shown {
            tracing::warn!(error = %err, "Failed to display error message");
        }
        self.timers.schedule(Channel::Error, now);
    }

    /// Blank every message line whose clear delay has elapsed by `now`.
    /// Each timer blanks whatever text is on its line at that moment.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        for channel in self.timers.take_due(now) {
            let cleared = match channel {
                Channel::Error => self.view.set_error_text(""),
                Channel::Success => self.view.set_success_text(""),
            };
            if let Err(err) = cleared {
                tracing::warn!(error = %err, ?channel, "Failed to clear message");
            }
        }
    }

    /// When the next pending message clear is due, if any.
    pub fn next_clear_due(&self) -> Option<DateTime<Utc>> {
        self.timers.next_due()
    }
}
