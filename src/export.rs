//! CSV export of the transaction ledger.

use std::{fs::File, io::Write, path::Path};

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{TransactionOrigin, TransactionStatus};
use crate::errors::CoreResult;
use crate::ledger::Ledger;

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    date: NaiveDate,
    description: &'a str,
    amount: f64,
    flow: &'a str,
    category: &'a str,
    account: &'a str,
    status: &'a str,
    origin: &'a str,
}

/// Writes the whole ledger as CSV, account names resolved for display.
pub fn write_csv<W: Write>(ledger: &Ledger, writer: W) -> CoreResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for txn in &ledger.transactions {
        let account = ledger
            .account(txn.account_id)
            .map(|account| account.name.as_str())
            .unwrap_or("unknown");
        csv.serialize(CsvRow {
            date: txn.date,
            description: &txn.description,
            amount: txn.amount,
            flow: if txn.amount >= 0.0 { "income" } else { "expense" },
            category: &txn.category,
            account,
            status: match txn.status {
                TransactionStatus::Realized => "realized",
                TransactionStatus::Upcoming => "upcoming",
            },
            origin: match txn.origin {
                TransactionOrigin::Manual => "manual",
                TransactionOrigin::BankImport => "bank",
                TransactionOrigin::Recurring => "recurring",
            },
        })?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes the ledger to `dir/transactions_<date>.csv` and returns the path.
pub fn export_to_dir(ledger: &Ledger, dir: &Path, today: NaiveDate) -> CoreResult<std::path::PathBuf> {
    let path = dir.join(format!("transactions_{}.csv", today.format("%Y-%m-%d")));
    let file = File::create(&path)?;
    write_csv(ledger, file)?;
    Ok(path)
}
