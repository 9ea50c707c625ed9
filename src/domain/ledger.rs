use serde::{Deserialize, Serialize};

use super::Entry;

/// Sum of all entry amounts, folded in insertion order.
pub fn compute_balance(entries: &[Entry]) -> f64 {
    entries.iter().fold(0.0, |balance, entry| balance + entry.amount())
}

/// The ordered, append-only list of accepted entries and its running total.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    entries: Vec<Entry>,
    total_balance: f64,
}

/// Owned copy of the ledger, for reporting.
///
/// When read back, `total_balance` is recomputed from `entries`; an
/// overflowed total is written by JSON as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SnapshotRecord")]
pub struct LedgerSnapshot {
    pub entries: Vec<Entry>,
    pub total_balance: f64,
}

#[derive(Deserialize)]
struct SnapshotRecord {
    entries: Vec<Entry>,
}

impl From<SnapshotRecord> for LedgerSnapshot {
    fn from(record: SnapshotRecord) -> Self {
        let total_balance = compute_balance(&record.entries);
        Self {
            entries: record.entries,
            total_balance,
        }
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an already validated entry and recompute the balance.
    pub fn append(&mut self, entry: Entry) {
        self.entries.push(entry);
        self.total_balance = compute_balance(&self.entries);
    }

    pub fn current_balance(&self) -> f64 {
        self.total_balance
    }

    /// Entries in submission order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            entries: self.entries.clone(),
            total_balance: self.total_balance,
        }
    }
}
