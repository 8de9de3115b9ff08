//! Ledger transaction record types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The three kinds of money movement the ledger records.
///
/// A closed set: every transaction is exactly one of these, and the kind
/// only changes how the aggregation engine buckets the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
    Investment,
}

impl TransactionKind {
    /// Canonical name, as stored and displayed.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
            TransactionKind::Investment => "Investment",
        }
    }

    /// Parse a canonical kind name (case-sensitive). Anything else is `None`.
    pub fn parse(s: &str) -> Option<TransactionKind> {
        match s {
            "Income" => Some(TransactionKind::Income),
            "Expense" => Some(TransactionKind::Expense),
            "Investment" => Some(TransactionKind::Investment),
            _ => None,
        }
    }
}

/// A single dated money movement.
///
/// Immutable once created. The model does no validation of its own; the
/// entry boundary rejects bad input before a `Transaction` exists, and the
/// load path reconstructs whatever the store kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Calendar date (no timezone).
    pub date: NaiveDate,
    pub kind: TransactionKind,
    /// Non-negative, currency-agnostic.
    pub amount: f64,
    /// Grouping key. Compared exactly as entered: case and whitespace kept.
    pub category: String,
    /// Optional free text, empty when absent.
    pub note: String,
}

impl Transaction {
    /// Canonical column order used for storage and tabular display.
    pub const FIELDS: [&'static str; 5] = ["Date", "Type", "Amount", "Category", "Note"];

    pub fn new(
        date: NaiveDate,
        kind: TransactionKind,
        amount: f64,
        category: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            date,
            kind,
            amount,
            category: category.into(),
            note: note.into(),
        }
    }

    /// The record flattened into [`Transaction::FIELDS`] order.
    pub fn to_record(&self) -> [String; 5] {
        [
            self.date.to_string(),
            self.kind.as_str().to_string(),
            self.amount.to_string(),
            self.category.clone(),
            self.note.clone(),
        ]
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}
