//! Plain-text tables for the menu loop.

use colored::Colorize;

use crate::domain::Transaction;
use crate::ledger::{ForecastSeries, Ledger};
use crate::services::LedgerTotals;

pub fn account_table(ledger: &Ledger) {
    if ledger.accounts.is_empty() {
        println!("No accounts yet");
        return;
    }
    println!("{:<24} {}", "Name".bold(), "Kind".bold());
    for account in &ledger.accounts {
        println!("{:<24} {}", account.name, account.kind);
    }
}

pub fn rule_table(ledger: &Ledger) {
    if ledger.rules.is_empty() {
        println!("No fixed charges yet");
        return;
    }
    println!(
        "{:<20} {:>10} {:<12} {:>4}  {}",
        "Name".bold(),
        "Amount".bold(),
        "Frequency".bold(),
        "Day".bold(),
        "Category".bold()
    );
    for rule in &ledger.rules {
        println!(
            "{:<20} {:>10.2} {:<12} {:>4}  {}",
            rule.name,
            rule.amount,
            rule.frequency.to_string(),
            rule.day_of_month,
            rule.category
        );
    }
}

pub fn forecast_table(series: &ForecastSeries) {
    println!(
        "{:<10} {:>9} {:>9} {:>9} {:>9} {:>9} {:>10}",
        "Month".bold(),
        "Income".bold(),
        "Savings".bold(),
        "Bills".bold(),
        "Expenses".bold(),
        "Net".bold(),
        "Balance".bold()
    );
    for row in series.rows() {
        println!(
            "{:<10} {:>9.2} {:>9.2} {:>9.2} {:>9.2} {:>9.2} {:>10.2}",
            row.month, row.income, row.savings, row.bills, row.expenses, row.net, row.balance
        );
    }
}

pub fn transaction_table(ledger: &Ledger, transactions: &[&Transaction], limit: usize) {
    if transactions.is_empty() {
        println!("No transactions yet");
        return;
    }
    println!(
        "{:<12} {:<28} {:>10}  {:<12} {}",
        "Date".bold(),
        "Description".bold(),
        "Amount".bold(),
        "Category".bold(),
        "Account".bold()
    );
    for txn in transactions.iter().take(limit) {
        let amount = format!("{:>10.2}", txn.amount);
        let amount = if txn.amount < 0.0 {
            amount.red()
        } else {
            amount.green()
        };
        let account = ledger
            .account(txn.account_id)
            .map(|account| account.name.as_str())
            .unwrap_or("unknown");
        println!(
            "{:<12} {:<28} {}  {:<12} {}",
            txn.date, txn.description, amount, txn.category, account
        );
    }
    if transactions.len() > limit {
        println!("... and {} more", transactions.len() - limit);
    }
}

pub fn totals_line(totals: &LedgerTotals) {
    println!(
        "{} {:.2}  {} {:.2}  {} {:.2}",
        "Income".green().bold(),
        totals.income,
        "Expenses".red().bold(),
        totals.expenses,
        "Balance".bold(),
        totals.balance
    );
}
