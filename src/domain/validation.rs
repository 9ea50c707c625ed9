use serde::{Deserialize, Serialize};

use super::{Entry, EntryDate, parse_amount};

/// The named input fields of the entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Date,
    Description,
    Category,
    Amount,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Date,
        FormField::Description,
        FormField::Category,
        FormField::Amount,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FormField::Date => "date",
            FormField::Description => "description",
            FormField::Category => "category",
            FormField::Amount => "amount",
        }
    }
}

/// Raw, unvalidated values of one form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSubmission {
    pub date: String,
    pub description: String,
    pub category: String,
    pub amount: String,
}

impl RawSubmission {
    pub fn new(
        date: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            description: description.into(),
            category: category.into(),
            amount: amount.into(),
        }
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Date => &self.date,
            FormField::Description => &self.description,
            FormField::Category => &self.category,
            FormField::Amount => &self.amount,
        }
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Date => self.date = value,
            FormField::Description => self.description = value,
            FormField::Category => self.category = value,
            FormField::Amount => self.amount = value,
        }
    }
}

/// Why a submission was rejected. Only the first failing field is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    InvalidDate,
    MissingDescription,
    MissingCategory,
    InvalidAmount,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidDate => {
                write!(f, "Please enter a valid date in the format YYYY-MM-DD.")
            }
            ValidationError::MissingDescription => write!(f, "Please enter a description."),
            ValidationError::MissingCategory => write!(f, "Please enter a category."),
            ValidationError::InvalidAmount => write!(f, "Please enter a valid amount."),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a submission, checking date, description, category, amount in
/// that order and stopping at the first failure.
///
/// Description and category only need to be non-empty; whitespace passes.
pub fn validate(raw: &RawSubmission) -> Result<Entry, ValidationError> {
    let date = EntryDate::parse(&raw.date).ok_or(ValidationError::InvalidDate)?;
    // An unparseable amount becomes NaN so it fails after the text checks.
    let amount = parse_amount(&raw.amount).unwrap_or(f64::NAN);

    Entry::try_new(date, &raw.description, &raw.category, amount)
}
