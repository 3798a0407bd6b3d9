//! Ledger-wide totals and per-category breakdowns.

use std::collections::HashMap;

use crate::ledger::Ledger;

/// Headline figures over the whole ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LedgerTotals {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
}

pub struct SummaryService;

impl SummaryService {
    pub fn totals(ledger: &Ledger) -> LedgerTotals {
        let (income, expenses) =
            ledger
                .transactions
                .iter()
                .fold((0.0, 0.0), |(income, expenses), txn| {
                    if txn.amount >= 0.0 {
                        (income + txn.amount, expenses)
                    } else {
                        (income, expenses + txn.amount.abs())
                    }
                });
        LedgerTotals {
            income,
            expenses,
            balance: income - expenses,
        }
    }

    /// Outflow totals grouped by category, largest first.
    pub fn expenses_by_category(ledger: &Ledger) -> Vec<(String, f64)> {
        let mut by_category: HashMap<&str, f64> = HashMap::new();
        for txn in ledger.transactions.iter().filter(|txn| txn.amount < 0.0) {
            *by_category.entry(txn.category.as_str()).or_default() += txn.amount.abs();
        }
        let mut entries: Vec<(String, f64)> = by_category
            .into_iter()
            .map(|(category, total)| (category.to_string(), total))
            .collect();
        entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Account, AccountKind, Transaction, TransactionStatus};
    use chrono::NaiveDate;

    fn ledger_with_amounts(amounts: &[(f64, &str)]) -> Ledger {
        let mut ledger = Ledger::new("Summary");
        let account = ledger.add_account(Account::new("Checking", AccountKind::Checking));
        let date = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        for (amount, category) in amounts {
            ledger.add_transaction(Transaction::manual(
                date,
                "Entry",
                *amount,
                *category,
                account,
                TransactionStatus::Realized,
            ));
        }
        ledger
    }

    #[test]
    fn totals_split_by_sign() {
        let ledger = ledger_with_amounts(&[(1500.0, "Salary"), (-300.0, "Housing"), (-75.5, "Groceries")]);
        let totals = SummaryService::totals(&ledger);
        assert_eq!(totals.income, 1500.0);
        assert_eq!(totals.expenses, 375.5);
        assert_eq!(totals.balance, 1124.5);
    }

    #[test]
    fn category_breakdown_is_sorted_descending() {
        let ledger = ledger_with_amounts(&[
            (-20.0, "Groceries"),
            (-50.0, "Housing"),
            (-35.0, "Groceries"),
        ]);
        let breakdown = SummaryService::expenses_by_category(&ledger);
        assert_eq!(breakdown[0], ("Groceries".to_string(), 55.0));
        assert_eq!(breakdown[1], ("Housing".to_string(), 50.0));
    }
}
