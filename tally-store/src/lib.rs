//! tally-store: append-only CSV persistence for ledger transactions.

pub mod csv_store;

pub use csv_store::{CsvStore, LoadReport};
