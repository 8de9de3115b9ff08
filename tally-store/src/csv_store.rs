//! Append-only CSV store with best-effort reload.
//!
//! One row per transaction: Date,Type,Amount,Category,Note. Reload skips
//! rows it cannot make sense of instead of failing the whole load, so a
//! store that picked up a bad line keeps serving everything else.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use tally_core::{Transaction, TransactionKind};

/// CSV-backed transaction store. The file path is explicit configuration,
/// passed in at construction.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

/// Outcome of a full reload: everything readable, plus how many rows were
/// dropped on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub transactions: Vec<Transaction>,
    /// Data rows dropped during reload (missing or unparseable fields).
    pub skipped: usize,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record, writing the header first when the file is new.
    pub fn save(&self, txn: &Transaction) -> Result<()> {
        let is_new = !self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("opening {}", self.path.display()))?;

        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if is_new {
            wtr.write_record(Transaction::FIELDS)?;
        }
        wtr.write_record(&txn.to_record())?;
        wtr.flush()
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }

    /// Reload every readable record in file order. A missing store is an
    /// empty ledger, not an error.
    pub fn load_all(&self) -> Result<Vec<Transaction>> {
        Ok(self.load_report()?.transactions)
    }

    /// Reload with a count of rows that had to be skipped.
    pub fn load_report(&self) -> Result<LoadReport> {
        let mut report = LoadReport {
            transactions: Vec::new(),
            skipped: 0,
        };
        if !self.path.exists() {
            return Ok(report);
        }

        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)
            .with_context(|| format!("opening {}", self.path.display()))?;

        // Header names may carry stray whitespace, or a BOM from whatever
        // wrote the file; match them cleaned up.
        let headers = rdr
            .headers()
            .with_context(|| format!("reading header of {}", self.path.display()))?
            .clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
        };
        let date_col = column("Date");
        let type_col = column("Type");
        let amount_col = column("Amount");
        let category_col = column("Category");
        let note_col = column("Note");

        for result in rdr.records() {
            let Ok(record) = result else {
                report.skipped += 1;
                continue;
            };

            // Blank filler lines are not data rows.
            if record.iter().all(|f| f.trim().is_empty()) {
                continue;
            }

            let field = |col: Option<usize>| col.and_then(|i| record.get(i)).unwrap_or("");

            let kind_raw = field(type_col);
            let amount_raw = field(amount_col);
            if kind_raw.is_empty() || amount_raw.is_empty() {
                report.skipped += 1;
                continue;
            }
            let Some(kind) = TransactionKind::parse(kind_raw) else {
                report.skipped += 1;
                continue;
            };
            let Ok(amount) = amount_raw.trim().parse::<f64>() else {
                report.skipped += 1;
                continue;
            };
            let Ok(date) = field(date_col).trim().parse::<NaiveDate>() else {
                report.skipped += 1;
                continue;
            };

            // Category and note come back exactly as stored; the load path
            // is more permissive than the entry boundary.
            report.transactions.push(Transaction::new(
                date,
                kind,
                amount,
                field(category_col),
                field(note_col),
            ));
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn txn(date: &str, kind: TransactionKind, amount: f64, category: &str) -> Transaction {
        Transaction::new(date.parse().unwrap(), kind, amount, category, "")
    }

    #[test]
    fn test_missing_store_loads_empty() {
        let dir = tempdir().unwrap();
        let store = CsvStore::new(dir.path().join("transactions.csv"));
        let report = store.load_report().unwrap();
        assert!(report.transactions.is_empty());
        assert_eq!(report.skipped, 0);
    }

    #[test]
    fn test_save_then_load_round_trips_in_order() {
        let dir = tempdir().unwrap();
        let store = CsvStore::new(dir.path().join("transactions.csv"));

        let saved = vec![
            Transaction::new(
                "2024-01-01".parse().unwrap(),
                TransactionKind::Income,
                1000.0,
                "Salary",
                "January payroll",
            ),
            txn("2024-01-02", TransactionKind::Expense, 200.0, "Groceries"),
            txn("2024-01-03", TransactionKind::Investment, 100.0, "Crypto"),
        ];
        for t in &saved {
            store.save(t).unwrap();
        }

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded, saved);
    }

    #[test]
    fn test_header_is_written_exactly_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("transactions.csv");
        let store = CsvStore::new(&path);

        store
            .save(&txn("2024-01-01", TransactionKind::Income, 1.0, "A"))
            .unwrap();
        store
            .save(&txn("2024-01-02", TransactionKind::Expense, 2.0, "B"))
            .unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let headers = raw
            .lines()
            .filter(|l| l.starts_with("Date,Type,Amount"))
            .count();
        assert_eq!(headers, 1);
        assert_eq!(raw.lines().count(), 3);
    }

    #[test]
    fn test_malformed_rows_are_skipped_not_fatal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("transactions.csv");
        fs::write(
            &path,
            "Date,Type,Amount,Category,Note\n\
             2024-01-01,Income,1000.0,Salary,\n\
             2024-01-02,Expense,not-a-number,Food,\n\
             2024-01-03,Transfer,50.0,Misc,\n\
             2024-01-04,,25.0,Misc,\n\
             2024-01-05,Expense,,Misc,\n\
             \n\
             2024-01-06,Expense,75.0,Rent,late\n",
        )
        .unwrap();

        let store = CsvStore::new(&path);
        let report = store.load_report().unwrap();

        assert_eq!(report.transactions.len(), 2);
        assert_eq!(report.skipped, 4);
        assert_eq!(report.transactions[0].category, "Salary");
        assert_eq!(report.transactions[1].category, "Rent");
        assert_eq!(report.transactions[1].note, "late");
    }

    #[test]
    fn test_whitespace_padded_headers_still_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("transactions.csv");
        fs::write(
            &path,
            " Date , Type ,Amount , Category,Note \n\
             2024-02-10,Expense,42.0,Utilities,power bill\n",
        )
        .unwrap();

        let loaded = CsvStore::new(&path).load_all().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].amount, 42.0);
        assert_eq!(loaded[0].category, "Utilities");
        assert_eq!(loaded[0].note, "power bill");
    }

    #[test]
    fn test_unparseable_date_is_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("transactions.csv");
        fs::write(
            &path,
            "Date,Type,Amount,Category,Note\n\
             sometime,Expense,10.0,Food,\n\
             2024-03-01,Expense,10.0,Food,\n",
        )
        .unwrap();

        let report = CsvStore::new(&path).load_report().unwrap();
        assert_eq!(report.transactions.len(), 1);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn test_category_whitespace_survives_round_trip() {
        let dir = tempdir().unwrap();
        let store = CsvStore::new(dir.path().join("transactions.csv"));
        let spaced = txn("2024-01-01", TransactionKind::Expense, 5.0, " Food ");
        store.save(&spaced).unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded[0].category, " Food ");
    }
}
