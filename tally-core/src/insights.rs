//! Insight engine: category-level statistics over the full transaction set.
//!
//! Spending (summed expense amounts) and frequency (row counts) are
//! separate measures with separate winners.

use std::collections::{HashMap, HashSet};

use crate::transaction::{Transaction, TransactionKind};

/// Category-level statistics. Produced only for a non-empty input.
#[derive(Debug, Clone, PartialEq)]
pub struct Insights {
    /// Distinct labels, case- and whitespace-sensitive.
    pub unique_categories: HashSet<String>,
    /// Amount summed per label across all kinds.
    pub category_totals: HashMap<String, f64>,
    /// Largest summed amount over Expense rows only; `None` when there are
    /// no expenses.
    pub highest_spending_category: Option<String>,
    /// Label occurring most often, counting all kinds.
    pub most_frequent_category: String,
}

/// Compute category insights, or `None` for an empty input.
///
/// An empty set is "nothing to compute", not a zeroed result; callers
/// branch on the `Option` before reading fields.
pub fn category_insights(transactions: &[Transaction]) -> Option<Insights> {
    if transactions.is_empty() {
        return None;
    }

    // First-seen label order; ties below resolve to the earliest label.
    let mut order: Vec<&str> = Vec::new();
    let mut totals: HashMap<&str, f64> = HashMap::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut expense_totals: HashMap<&str, f64> = HashMap::new();

    for txn in transactions {
        let label = txn.category.as_str();
        if !totals.contains_key(label) {
            order.push(label);
        }
        *totals.entry(label).or_insert(0.0) += txn.amount;
        *counts.entry(label).or_insert(0) += 1;
        if txn.kind == TransactionKind::Expense {
            *expense_totals.entry(label).or_insert(0.0) += txn.amount;
        }
    }

    let highest_spending_category =
        max_by_first_seen(&order, |label| expense_totals.get(label).copied());
    let most_frequent_category = max_by_first_seen(&order, |label| counts.get(label).copied())
        .expect("non-empty input has at least one category");

    Some(Insights {
        unique_categories: order.iter().map(|s| s.to_string()).collect(),
        category_totals: totals
            .into_iter()
            .map(|(label, total)| (label.to_string(), total))
            .collect(),
        highest_spending_category,
        most_frequent_category,
    })
}

/// Maximum by `value` over labels in first-seen order; a later label only
/// wins on a strictly greater value, so ties keep the earliest.
fn max_by_first_seen<V, F>(order: &[&str], value: F) -> Option<String>
where
    V: PartialOrd,
    F: Fn(&str) -> Option<V>,
{
    let mut best: Option<(&str, V)> = None;
    for &label in order {
        let Some(v) = value(label) else {
            continue;
        };
        let replace = match &best {
            Some((_, current)) => v > *current,
            None => true,
        };
        if replace {
            best = Some((label, v));
        }
    }
    best.map(|(label, _)| label.to_string())
}
