//! Aggregation engine: per-kind totals, net balance, savings rate.

use serde::Serialize;

use crate::transaction::{Transaction, TransactionKind};

/// Aggregate view of a full transaction set. All fields are zero for an
/// empty input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub total_income: f64,
    pub total_expense: f64,
    pub total_investment: f64,
    /// income - expense - investment
    pub net_balance: f64,
    /// (income - expense) / income * 100, or 0 when there is no income.
    pub savings_percentage: f64,
}

/// Sum the full set in one pass, one accumulator per kind.
///
/// Traversal order does not matter beyond float rounding.
pub fn calculate_totals(transactions: &[Transaction]) -> Totals {
    let mut totals = Totals::default();

    for txn in transactions {
        match txn.kind {
            TransactionKind::Income => totals.total_income += txn.amount,
            TransactionKind::Expense => totals.total_expense += txn.amount,
            TransactionKind::Investment => totals.total_investment += txn.amount,
        }
    }

    totals.net_balance = totals.total_income - totals.total_expense - totals.total_investment;

    if totals.total_income > 0.0 {
        // Savings = income - expense. Investment is an asset allocation,
        // not an outflow, so it stays out of the rate.
        let savings = totals.total_income - totals.total_expense;
        totals.savings_percentage = savings / totals.total_income * 100.0;
    }

    totals
}

/// Year-long projection of the current savings rate at the current income
/// level. Zero when the rate is not positive.
pub fn projected_annual_savings(totals: &Totals) -> f64 {
    if totals.savings_percentage <= 0.0 {
        return 0.0;
    }
    totals.total_income * (totals.savings_percentage / 100.0) * 12.0
}
