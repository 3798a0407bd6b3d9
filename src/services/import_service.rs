//! Boundary types and merge semantics for bank-aggregator imports.
//!
//! The HTTP side of the aggregation API (user and token creation, connect
//! sessions, account retrieval) lives outside this crate; callers hand the
//! already-fetched records to [`ImportService::merge`].

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Transaction, TransactionKind, TransactionOrigin, TransactionStatus};
use crate::errors::{CoreError, CoreResult};
use crate::ledger::Ledger;

/// An account as reported by the aggregator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BankAccount {
    pub id: String,
    pub name: String,
    pub balance: f64,
}

/// A settled transaction as reported by the aggregator. Negative amounts
/// are outflows, matching the ledger's sign convention.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BankRecord {
    pub id: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount: f64,
}

static CATEGORY_KEYWORDS: Lazy<Vec<(&str, &[&str])>> = Lazy::new(|| {
    vec![
        ("Groceries", &["supermarket", "grocery", "carrefour", "auchan"] as &[&str]),
        ("Transport", &["uber", "train", "sncf", "fuel", "parking"]),
        ("Housing", &["rent", "electric", "edf", "water", "internet"]),
        ("Leisure", &["netflix", "spotify", "cinema", "restaurant"]),
        ("Health", &["pharmacy", "doctor", "hospital"]),
    ]
});

const FALLBACK_CATEGORY: &str = "Other";
const FALLBACK_DESCRIPTION: &str = "Transaction";

pub struct ImportService;

impl ImportService {
    /// Picks a category from keyword heuristics over the description.
    pub fn categorize(description: &str) -> &'static str {
        let haystack = description.to_lowercase();
        for (category, keywords) in CATEGORY_KEYWORDS.iter() {
            if keywords.iter().any(|keyword| haystack.contains(keyword)) {
                return category;
            }
        }
        FALLBACK_CATEGORY
    }

    /// Replaces all previously imported rows with the new batch, attached
    /// to `account_id`. Manual and generated transactions are untouched.
    /// Returns the number of rows imported.
    pub fn merge(ledger: &mut Ledger, account_id: Uuid, records: &[BankRecord]) -> CoreResult<usize> {
        if ledger.account(account_id).is_none() {
            return Err(CoreError::AccountNotFound(account_id));
        }

        ledger.transactions.retain(|txn| !txn.is_imported());
        let batch: Vec<Transaction> = records
            .iter()
            .map(|record| imported_transaction(record, account_id))
            .collect();
        let count = ledger.append_transactions(batch);
        ledger.touch();
        tracing::info!(count, "merged bank import");
        Ok(count)
    }

    /// Sum of the aggregator-side balances.
    pub fn total_balance(accounts: &[BankAccount]) -> f64 {
        accounts.iter().map(|account| account.balance).sum()
    }
}

fn imported_transaction(record: &BankRecord, account_id: Uuid) -> Transaction {
    let description = record
        .description
        .as_deref()
        .filter(|text| !text.trim().is_empty())
        .unwrap_or(FALLBACK_DESCRIPTION);
    Transaction {
        id: Uuid::new_v4(),
        date: record.date,
        description: description.to_string(),
        amount: record.amount,
        category: ImportService::categorize(description).to_string(),
        account_id,
        // Imported rows describe settled history.
        status: TransactionStatus::Realized,
        origin: TransactionOrigin::BankImport,
        rule_id: None,
        kind: TransactionKind::Normal,
        linked_transfer_id: None,
        external_ref: Some(record.id.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Account, AccountKind};
    use crate::services::{ManualEntry, TransactionService};

    fn record(id: &str, description: &str, amount: f64) -> BankRecord {
        BankRecord {
            id: id.into(),
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            description: Some(description.into()),
            amount,
        }
    }

    #[test]
    fn categorize_matches_keywords_case_insensitively() {
        assert_eq!(ImportService::categorize("CARREFOUR CITY PARIS"), "Groceries");
        assert_eq!(ImportService::categorize("Uber trip"), "Transport");
        assert_eq!(ImportService::categorize("Netflix.com"), "Leisure");
        assert_eq!(ImportService::categorize("Mystery shop"), "Other");
    }

    #[test]
    fn merge_replaces_imported_rows_and_keeps_manual_ones() {
        let mut ledger = Ledger::new("Import");
        let account = ledger.add_account(Account::new("Checking", AccountKind::Checking));
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        TransactionService::add_manual(
            &mut ledger,
            ManualEntry {
                date: NaiveDate::from_ymd_opt(2025, 2, 2).unwrap(),
                description: "Cash withdrawal".into(),
                amount: -40.0,
                category: "Other".into(),
                account_id: account,
            },
            today,
        )
        .unwrap();

        let first = [record("a", "EDF invoice", -60.0), record("b", "Refund", 12.0)];
        assert_eq!(ImportService::merge(&mut ledger, account, &first).unwrap(), 2);
        assert_eq!(ledger.transaction_count(), 3);

        let second = [record("c", "SNCF ticket", -25.0)];
        assert_eq!(ImportService::merge(&mut ledger, account, &second).unwrap(), 1);
        assert_eq!(ledger.transaction_count(), 2);
        assert!(ledger
            .transactions
            .iter()
            .any(|txn| txn.description == "Cash withdrawal"));
        assert!(ledger
            .transactions
            .iter()
            .any(|txn| txn.external_ref.as_deref() == Some("c")));
    }

    #[test]
    fn missing_description_falls_back() {
        let mut ledger = Ledger::new("Import");
        let account = ledger.add_account(Account::new("Checking", AccountKind::Checking));
        let record = BankRecord {
            id: "x".into(),
            date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            description: None,
            amount: -5.0,
        };
        ImportService::merge(&mut ledger, account, &[record]).unwrap();
        assert_eq!(ledger.transactions[0].description, "Transaction");
        assert_eq!(ledger.transactions[0].category, "Other");
    }

    #[test]
    fn total_balance_sums_accounts() {
        let accounts = [
            BankAccount {
                id: "1".into(),
                name: "Checking".into(),
                balance: 820.5,
            },
            BankAccount {
                id: "2".into(),
                name: "Savings".into(),
                balance: 1200.0,
            },
        ];
        assert_eq!(ImportService::total_balance(&accounts), 2020.5);
    }
}
