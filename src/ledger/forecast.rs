//! Twelve-month forecast series derived directly from the rule set.
//!
//! The forecast never reads the transaction ledger and deliberately ignores
//! the account-opening bound that the generator honors: it shows the full
//! potential of the rule set for a calendar year. Identical rule sets
//! always yield identical series.

use serde::{Deserialize, Serialize};

use crate::domain::{Account, AccountKind, RecurrenceRule, BILLS_CATEGORY};

pub const MONTHS_PER_YEAR: usize = 12;

pub const MONTH_NAMES: [&str; MONTHS_PER_YEAR] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Monthly projected aggregates, one slot per calendar month.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ForecastSeries {
    pub income: [f64; MONTHS_PER_YEAR],
    pub savings: [f64; MONTHS_PER_YEAR],
    pub bills: [f64; MONTHS_PER_YEAR],
    pub expenses: [f64; MONTHS_PER_YEAR],
}

impl ForecastSeries {
    /// Folds every rule into the four series. Contributions use absolute
    /// magnitudes; the bucket decides the direction.
    pub fn from_rules(rules: &[RecurrenceRule], accounts: &[Account]) -> Self {
        let mut series = ForecastSeries::default();

        for rule in rules {
            for month0 in 0..MONTHS_PER_YEAR as u32 {
                if !rule.frequency.applies_to(month0) {
                    continue;
                }
                let slot = month0 as usize;
                let magnitude = rule.amount.abs();

                if let Some(destination) = rule.destination() {
                    // Transfers only count when they land on a savings
                    // account; other transfers stay invisible here.
                    let is_savings = accounts
                        .iter()
                        .find(|account| account.id == destination)
                        .map(|account| account.kind == AccountKind::Savings)
                        .unwrap_or(false);
                    if is_savings {
                        series.savings[slot] += magnitude;
                    }
                } else if rule.amount > 0.0 {
                    series.income[slot] += magnitude;
                } else if rule.category == BILLS_CATEGORY {
                    series.bills[slot] += magnitude;
                } else {
                    series.expenses[slot] += magnitude;
                }
            }
        }

        series
    }

    /// Net movement for one month: income minus savings, bills, expenses.
    pub fn monthly_net(&self, month0: usize) -> f64 {
        self.income[month0] - self.savings[month0] - self.bills[month0] - self.expenses[month0]
    }

    /// Materializes the per-month rows with running balances.
    pub fn rows(&self) -> Vec<ForecastRow> {
        let mut balance = 0.0;
        let mut savings_cumulative = 0.0;
        (0..MONTHS_PER_YEAR)
            .map(|month0| {
                let net = self.monthly_net(month0);
                balance += net;
                savings_cumulative += self.savings[month0];
                ForecastRow {
                    month: MONTH_NAMES[month0],
                    income: self.income[month0],
                    savings: self.savings[month0],
                    savings_cumulative,
                    bills: self.bills[month0],
                    expenses: self.expenses[month0],
                    net,
                    balance,
                }
            })
            .collect()
    }
}

/// One month of the forecast table, with cumulative columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRow {
    pub month: &'static str,
    pub income: f64,
    pub savings: f64,
    pub savings_cumulative: f64,
    pub bills: f64,
    pub expenses: f64,
    pub net: f64,
    pub balance: f64,
}
