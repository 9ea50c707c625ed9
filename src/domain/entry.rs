use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// A date as typed into the form, guaranteed to match `YYYY-MM-DD`.
/// Only the shape is checked: `2023-13-40` is a valid `EntryDate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntryDate(String);

impl EntryDate {
    /// Accepts exactly four digits, a dash, two digits, a dash, two digits.
    pub fn parse(input: &str) -> Option<Self> {
        let bytes = input.as_bytes();
        if bytes.len() != 10 {
            return None;
        }
        let shaped = bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
        shaped.then(|| Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Calendar reading of the date, if it names a real day.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, "%Y-%m-%d").ok()
    }
}

impl TryFrom<String> for EntryDate {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or(ValidationError::InvalidDate)
    }
}

impl From<EntryDate> for String {
    fn from(date: EntryDate) -> Self {
        date.0
    }
}

impl fmt::Display for EntryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One accepted ledger transaction.
///
/// Every constructor goes through [`Entry::try_new`], deserialization
/// included, so an `Entry` always satisfies the form rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EntryRecord")]
pub struct Entry {
    date: EntryDate,
    description: String,
    category: String,
    amount: f64,
}

/// Unchecked field bundle read from serialized data.
#[derive(Deserialize)]
struct EntryRecord {
    date: EntryDate,
    description: String,
    category: String,
    amount: f64,
}

impl TryFrom<EntryRecord> for Entry {
    type Error = ValidationError;

    fn try_from(record: EntryRecord) -> Result<Self, Self::Error> {
        Entry::try_new(
            record.date,
            record.description,
            record.category,
            record.amount,
        )
    }
}

impl Entry {
    /// Check description, category and amount, in that order.
    /// Text must be non-empty; the amount finite and nonzero.
    pub fn try_new(
        date: EntryDate,
        description: impl Into<String>,
        category: impl Into<String>,
        amount: f64,
    ) -> Result<Self, ValidationError> {
        let description = description.into();
        if description.is_empty() {
            return Err(ValidationError::MissingDescription);
        }
        let category = category.into();
        if category.is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        if !amount.is_finite() || amount == 0.0 {
            return Err(ValidationError::InvalidAmount);
        }

        Ok(Self {
            date,
            description,
            category,
            amount,
        })
    }

    pub fn date(&self) -> &EntryDate {
        &self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Positive for income, negative for expenses. Never zero.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn is_income(&self) -> bool {
        self.amount >= 0.0
    }
}

/// Parse the longest leading decimal number in `input`.
/// Leading whitespace is skipped and trailing garbage ignored, so
/// "12abc" -> 12 and "  -4.5" -> -4.5. Returns None when no digits lead.
pub fn parse_amount(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return parse_infinity(&s[int_start..]).map(|inf| {
            if bytes.first() == Some(&b'-') {
                -inf
            } else {
                inf
            }
        });
    }

    // Exponent only counts when at least one digit follows it.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

fn parse_infinity(rest: &str) -> Option<f64> {
    rest.starts_with("Infinity").then_some(f64::INFINITY)
}

/// Render an amount the way the balance line shows it: shortest round-trip
/// decimal, no fixed precision. 100.0 -> "100", 75.5 -> "75.5".
/// An overflowed balance prints as "Infinity" or "-Infinity".
pub fn format_amount(amount: f64) -> String {
    if amount == 0.0 {
        // Avoid "-0".
        return "0".to_string();
    }
    if amount.is_infinite() {
        let sign = if amount < 0.0 { "-" } else { "" };
        return format!("{}Infinity", sign);
    }
    if amount.is_nan() {
        return "NaN".to_string();
    }
    format!("{}", amount)
}
