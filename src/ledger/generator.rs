//! Expands recurrence rules into concrete transactions for the current
//! calendar year.
//!
//! Generation is idempotent at month granularity: a rule emits at most one
//! occurrence (or transfer pair) per month, and months that already hold a
//! transaction for the rule are skipped. Re-running the generator after a
//! rule is added or the ledger is reloaded therefore never duplicates
//! entries.

use chrono::{Datelike, Duration, NaiveDate};
use uuid::Uuid;

use crate::domain::{
    Account, RecurrenceRule, RuleKind, Transaction, TransactionKind, TransactionOrigin,
    TransactionStatus, TRANSFER_CATEGORY,
};

const MONTHS: u32 = 12;

/// Expands `rules` into the transactions missing from `existing` for the
/// year containing `today`. Never fails: rules whose accounts cannot be
/// resolved are skipped.
pub fn expand_rules(
    rules: &[RecurrenceRule],
    existing: &[Transaction],
    accounts: &[Account],
    opened_on: Option<NaiveDate>,
    today: NaiveDate,
) -> Vec<Transaction> {
    let year = today.year();
    let start_month = start_month(year, opened_on);
    let mut batch = Vec::new();

    for rule in rules {
        let Some(context) = RuleAccounts::resolve(rule, accounts) else {
            tracing::debug!(rule = %rule.name, "skipping rule with unresolved account");
            continue;
        };

        for month0 in start_month..MONTHS {
            if !rule.frequency.applies_to(month0) {
                continue;
            }
            let date = occurrence_date(year, month0, rule.day_of_month);
            if let Some(opened) = opened_on {
                if date < opened {
                    continue;
                }
            }
            if already_generated(existing, rule.id, year, month0) {
                continue;
            }
            let status = TransactionStatus::from_date(date, today);
            match context.destination {
                None => batch.push(charge_occurrence(rule, date, status)),
                Some(destination) => {
                    batch.extend(transfer_occurrences(rule, context.source, destination, date, status));
                }
            }
        }
    }

    batch
}

/// First zero-based month of the generation window. The opening month
/// itself is excluded when the account was opened in the target year.
pub fn start_month(year: i32, opened_on: Option<NaiveDate>) -> u32 {
    match opened_on {
        Some(opened) if opened.year() == year => (opened.month0() + 1).min(MONTHS),
        _ => 0,
    }
}

/// Concrete date for an occurrence, with the day clamped to the month's
/// actual length (a day-31 rule lands on Feb 28 in a non-leap year).
pub fn occurrence_date(year: i32, month0: u32, day_of_month: u32) -> NaiveDate {
    let month = month0 + 1;
    let day = day_of_month.clamp(1, days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1).unwrap();
    (first_next - Duration::days(1)).day()
}

fn already_generated(existing: &[Transaction], rule_id: Uuid, year: i32, month0: u32) -> bool {
    existing.iter().any(|txn| {
        txn.rule_id == Some(rule_id) && txn.date.year() == year && txn.date.month0() == month0
    })
}

fn charge_occurrence(rule: &RecurrenceRule, date: NaiveDate, status: TransactionStatus) -> Transaction {
    Transaction {
        id: Uuid::new_v4(),
        date,
        description: rule.name.clone(),
        amount: rule.amount,
        category: rule.category.clone(),
        account_id: rule.account_id,
        status,
        origin: TransactionOrigin::Recurring,
        rule_id: Some(rule.id),
        kind: TransactionKind::Normal,
        linked_transfer_id: None,
        external_ref: None,
    }
}

/// Builds the debit and credit legs of a transfer occurrence. The legs
/// share equal magnitudes with opposite signs and point at each other via
/// `linked_transfer_id`.
fn transfer_occurrences(
    rule: &RecurrenceRule,
    source: &Account,
    destination: &Account,
    date: NaiveDate,
    status: TransactionStatus,
) -> [Transaction; 2] {
    let magnitude = rule.amount.abs();
    let out_id = Uuid::new_v4();
    let in_id = Uuid::new_v4();

    let leg = |id, linked, account_id, amount, description: String| Transaction {
        id,
        date,
        description,
        amount,
        category: TRANSFER_CATEGORY.into(),
        account_id,
        status,
        origin: TransactionOrigin::Recurring,
        rule_id: Some(rule.id),
        kind: TransactionKind::Transfer,
        linked_transfer_id: Some(linked),
        external_ref: None,
    };

    [
        leg(
            out_id,
            in_id,
            rule.account_id,
            -magnitude,
            format!("{} (to {})", rule.name, destination.name),
        ),
        leg(
            in_id,
            out_id,
            destination.id,
            magnitude,
            format!("{} (from {})", rule.name, source.name),
        ),
    ]
}

/// Resolved account references for one rule. `None` when any referenced
/// account is missing, which silently excludes the rule from expansion.
struct RuleAccounts<'a> {
    source: &'a Account,
    destination: Option<&'a Account>,
}

impl<'a> RuleAccounts<'a> {
    fn resolve(rule: &RecurrenceRule, accounts: &'a [Account]) -> Option<Self> {
        let find = |id: Uuid| accounts.iter().find(|account| account.id == id);
        let source = find(rule.account_id)?;
        let destination = match rule.kind {
            RuleKind::Transfer { destination } => Some(find(destination)?),
            RuleKind::Charge => None,
        };
        Some(Self { source, destination })
    }
}
