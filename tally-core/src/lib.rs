//! tally-core: transaction model and aggregation engines for the ledger.
//!
//! Everything here is pure and synchronous: the caller loads the full
//! transaction set, the engines read a borrowed slice and hand back fresh
//! result structures.

pub mod insights;
pub mod totals;
pub mod transaction;

pub use insights::{Insights, category_insights};
pub use totals::{Totals, calculate_totals, projected_annual_savings};
pub use transaction::{Transaction, TransactionKind};

/// Descriptive transform over category labels, shown next to the insights.
pub mod text {
    /// Join labels with `", "` in input order (duplicates included),
    /// uppercase the result and count occurrences of `'A'`.
    pub fn category_summary<S: AsRef<str>>(categories: &[S]) -> (String, usize) {
        if categories.is_empty() {
            return ("No categories available.".to_string(), 0);
        }

        let joined = categories
            .iter()
            .map(|c| c.as_ref())
            .collect::<Vec<_>>()
            .join(", ");
        let upper = joined.to_uppercase();
        let count = upper.chars().filter(|&ch| ch == 'A').count();

        (upper, count)
    }

}

pub use text::category_summary;
