use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tally_core::{
    Transaction, TransactionKind, calculate_totals, category_insights, category_summary,
    projected_annual_savings,
};
use tally_store::CsvStore;

mod config;
mod state;

#[derive(Parser, Debug)]
#[command(name = "tally", version, about = "Personal finance ledger CLI")]
struct Cli {
    /// Transactions file (overrides config; default ~/.tally/transactions.csv)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the default config to ~/.tally/config.toml
    Init,

    /// Record one transaction
    Add {
        /// Date as YYYY-MM-DD
        #[arg(long)]
        date: String,

        #[arg(long)]
        amount: f64,

        #[arg(long)]
        category: String,

        #[arg(long, default_value = "")]
        note: String,

        /// Income, Expense or Investment
        #[arg(long)]
        kind: String,
    },

    /// Totals, net balance and savings rate
    Summary,

    /// Category-level statistics
    Insights,

    /// Joined category text and letter count
    Categories,

    /// Most recent transactions
    List {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let store = CsvStore::new(resolve_data_file(cli.data)?);
    run(&store, cli.command)
}

fn run(store: &CsvStore, command: Command) -> Result<()> {
    match command {
        Command::Init => config::init_config()?,

        Command::Add {
            date,
            amount,
            category,
            note,
            kind,
        } => {
            let txn = validate_entry(&date, amount, &category, &note, &kind)?;
            store
                .save(&txn)
                .with_context(|| format!("saving to {}", store.path().display()))?;
            println!(
                "Recorded {} of {:.2} under {} on {}",
                txn.kind.as_str(),
                txn.amount,
                txn.category,
                txn.date
            );
        }

        Command::Summary => {
            let txns = store.load_all()?;
            let totals = calculate_totals(&txns);

            println!("Total income:      {:>12.2}", totals.total_income);
            println!("Total expense:     {:>12.2}", totals.total_expense);
            println!("Total investment:  {:>12.2}", totals.total_investment);
            println!("Net balance:       {:>12.2}", totals.net_balance);
            println!("Savings rate:      {:>11.1}%", totals.savings_percentage);

            let projected = projected_annual_savings(&totals);
            if projected > 0.0 {
                println!("\nAt this rate you would put away {projected:.2} over a year.");
            }
        }

        Command::Insights => {
            let report = store.load_report()?;
            match category_insights(&report.transactions) {
                None => println!("No transactions recorded yet."),
                Some(insights) => {
                    let mut unique: Vec<&str> =
                        insights.unique_categories.iter().map(|s| s.as_str()).collect();
                    unique.sort_unstable();
                    println!("Categories ({}): {}", unique.len(), unique.join(", "));

                    let mut by_total: Vec<(&str, f64)> = insights
                        .category_totals
                        .iter()
                        .map(|(label, total)| (label.as_str(), *total))
                        .collect();
                    by_total.sort_by(|a, b| {
                        b.1.partial_cmp(&a.1).unwrap().then_with(|| a.0.cmp(b.0))
                    });
                    for (label, total) in by_total {
                        println!("  {label:<20} {total:>10.2}");
                    }

                    println!(
                        "Top spend:     {}",
                        insights.highest_spending_category.as_deref().unwrap_or("N/A")
                    );
                    println!("Most frequent: {}", insights.most_frequent_category);
                }
            }
            if report.skipped > 0 {
                println!("({} unreadable rows skipped)", report.skipped);
            }
        }

        Command::Categories => {
            let txns = store.load_all()?;
            let labels: Vec<&str> = txns.iter().map(|t| t.category.as_str()).collect();
            let (joined, count) = category_summary(&labels);
            println!("{joined}");
            println!("'A' count: {count}");
        }

        Command::List { limit } => {
            let txns = store.load_all()?;
            if txns.is_empty() {
                println!("No transactions recorded yet.");
                return Ok(());
            }
            let start = txns.len().saturating_sub(limit);
            println!(
                "{:<12} {:<12} {:>10}  {:<20} {}",
                "Date", "Type", "Amount", "Category", "Note"
            );
            for t in &txns[start..] {
                println!(
                    "{:<12} {:<12} {:>10.2}  {:<20} {}",
                    t.date.to_string(),
                    t.kind.as_str(),
                    t.amount,
                    t.category,
                    t.note
                );
            }
        }
    }

    Ok(())
}

/// Entry boundary: reject bad input before a `Transaction` exists.
fn validate_entry(
    date: &str,
    amount: f64,
    category: &str,
    note: &str,
    kind: &str,
) -> Result<Transaction> {
    if amount <= 0.0 {
        bail!("amount must be positive, got {amount}");
    }
    if category.is_empty() {
        bail!("category must not be empty");
    }
    let Some(kind) = TransactionKind::parse(kind) else {
        bail!("unknown kind {kind:?} (expected Income, Expense or Investment)");
    };
    let date: NaiveDate = date
        .parse()
        .with_context(|| format!("parsing date {date:?} (expected YYYY-MM-DD)"))?;

    Ok(Transaction::new(date, kind, amount, category, note))
}

fn resolve_data_file(overridden: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(p) = overridden {
        return Ok(p);
    }
    Ok(config::load_config()?.store.data_file)
}
