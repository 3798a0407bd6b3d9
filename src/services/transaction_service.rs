//! Manual entry, guarded removal, and filtering of ledger transactions.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{Transaction, TransactionStatus};
use crate::errors::{CoreError, CoreResult};
use crate::ledger::Ledger;

/// A manually keyed transaction. The amount is signed: negative for money
/// leaving the account.
#[derive(Debug, Clone)]
pub struct ManualEntry {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub account_id: Uuid,
}

/// Narrowing criteria for transaction listings. All criteria compose.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Case-insensitive substring match on the description.
    pub search: Option<String>,
    pub category: Option<String>,
    pub flow: Option<FlowFilter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowFilter {
    Income,
    Expense,
}

pub struct TransactionService;

impl TransactionService {
    /// Validates and appends a manual entry; returns its id.
    pub fn add_manual(ledger: &mut Ledger, entry: ManualEntry, today: NaiveDate) -> CoreResult<Uuid> {
        if entry.description.trim().is_empty() {
            return Err(CoreError::Validation("description is required".into()));
        }
        if entry.category.trim().is_empty() {
            return Err(CoreError::Validation("category is required".into()));
        }
        if !entry.amount.is_finite() || entry.amount == 0.0 {
            return Err(CoreError::Validation(
                "amount must be a non-zero number".into(),
            ));
        }
        if ledger.account(entry.account_id).is_none() {
            return Err(CoreError::AccountNotFound(entry.account_id));
        }

        let status = TransactionStatus::from_date(entry.date, today);
        let txn = Transaction::manual(
            entry.date,
            entry.description.trim(),
            entry.amount,
            entry.category,
            entry.account_id,
            status,
        );
        Ok(ledger.add_transaction(txn))
    }

    /// Removes a transaction. Bank-imported rows are protected: they mirror
    /// the aggregator's history and can only be replaced by a re-import.
    pub fn remove(ledger: &mut Ledger, id: Uuid) -> CoreResult<Transaction> {
        let txn = ledger
            .transaction(id)
            .ok_or(CoreError::TransactionNotFound(id))?;
        if txn.is_imported() {
            return Err(CoreError::InvalidOperation(
                "bank-imported transactions cannot be removed".into(),
            ));
        }
        ledger
            .remove_transaction(id)
            .ok_or(CoreError::TransactionNotFound(id))
    }

    /// Returns matching transactions, newest first.
    pub fn filter<'a>(ledger: &'a Ledger, filter: &TransactionFilter) -> Vec<&'a Transaction> {
        let needle = filter
            .search
            .as_ref()
            .map(|term| term.to_lowercase())
            .filter(|term| !term.is_empty());
        let mut matches: Vec<&Transaction> = ledger
            .transactions
            .iter()
            .filter(|txn| {
                if let Some(needle) = &needle {
                    if !txn.description.to_lowercase().contains(needle) {
                        return false;
                    }
                }
                if let Some(category) = &filter.category {
                    if &txn.category != category {
                        return false;
                    }
                }
                match filter.flow {
                    Some(FlowFilter::Income) => txn.amount > 0.0,
                    Some(FlowFilter::Expense) => txn.amount < 0.0,
                    None => true,
                }
            })
            .collect();
        matches.sort_by(|a, b| b.date.cmp(&a.date));
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Account, AccountKind, TransactionOrigin};

    fn base_ledger() -> (Ledger, Uuid) {
        let mut ledger = Ledger::new("Txn");
        let account = ledger.add_account(Account::new("Checking", AccountKind::Checking));
        (ledger, account)
    }

    fn entry(account_id: Uuid, amount: f64, description: &str) -> ManualEntry {
        ManualEntry {
            date: NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
            description: description.into(),
            amount,
            category: "Groceries".into(),
            account_id,
        }
    }

    #[test]
    fn manual_entry_in_the_past_is_realized() {
        let (mut ledger, account) = base_ledger();
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let id =
            TransactionService::add_manual(&mut ledger, entry(account, -12.5, "Market"), today)
                .unwrap();
        let txn = ledger.transaction(id).unwrap();
        assert_eq!(txn.status, TransactionStatus::Realized);
        assert_eq!(txn.origin, TransactionOrigin::Manual);
    }

    #[test]
    fn zero_amount_is_rejected() {
        let (mut ledger, account) = base_ledger();
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let err = TransactionService::add_manual(&mut ledger, entry(account, 0.0, "Nothing"), today)
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn imported_rows_cannot_be_removed() {
        let (mut ledger, account) = base_ledger();
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let id = TransactionService::add_manual(&mut ledger, entry(account, -9.0, "Cafe"), today)
            .unwrap();
        if let Some(txn) = ledger.transactions.iter_mut().find(|t| t.id == id) {
            txn.origin = TransactionOrigin::BankImport;
        }
        let err = TransactionService::remove(&mut ledger, id).unwrap_err();
        assert!(matches!(err, CoreError::InvalidOperation(_)));
        assert_eq!(ledger.transaction_count(), 1);
    }

    #[test]
    fn filter_composes_search_and_flow() {
        let (mut ledger, account) = base_ledger();
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        TransactionService::add_manual(&mut ledger, entry(account, -30.0, "Weekly market"), today)
            .unwrap();
        TransactionService::add_manual(&mut ledger, entry(account, 45.0, "Market refund"), today)
            .unwrap();
        TransactionService::add_manual(&mut ledger, entry(account, -8.0, "Bus ticket"), today)
            .unwrap();

        let filter = TransactionFilter {
            search: Some("market".into()),
            flow: Some(FlowFilter::Expense),
            ..TransactionFilter::default()
        };
        let matches = TransactionService::filter(&ledger, &filter);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].description, "Weekly market");
    }

    #[test]
    fn filter_sorts_newest_first() {
        let (mut ledger, account) = base_ledger();
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let mut early = entry(account, -5.0, "Early");
        early.date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        let mut late = entry(account, -5.0, "Late");
        late.date = NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();
        TransactionService::add_manual(&mut ledger, early, today).unwrap();
        TransactionService::add_manual(&mut ledger, late, today).unwrap();

        let matches = TransactionService::filter(&ledger, &TransactionFilter::default());
        assert_eq!(matches[0].description, "Late");
    }
}
