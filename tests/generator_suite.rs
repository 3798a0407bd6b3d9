use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use cashflow_core::domain::{
    Account, AccountKind, Frequency, TransactionKind, TransactionStatus,
};
use cashflow_core::ledger::Ledger;
use cashflow_core::services::{ChargeDraft, RuleService, TransferDraft};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
}

fn ledger_with_accounts() -> (Ledger, Uuid, Uuid) {
    let mut ledger = Ledger::new("Generator");
    let checking = ledger.add_account(Account::new("Checking", AccountKind::Checking));
    let savings = ledger.add_account(Account::new("Savings", AccountKind::Savings));
    (ledger, checking, savings)
}

fn monthly_charge(account_id: Uuid) -> ChargeDraft {
    ChargeDraft {
        name: "Gym".into(),
        amount: 50.0,
        category: "Leisure".into(),
        frequency: Frequency::Monthly,
        day_of_month: 15,
        account_id,
    }
}

#[test]
fn monthly_charge_covers_the_whole_year() {
    let (mut ledger, checking, _) = ledger_with_accounts();
    let id = RuleService::create_charge(&mut ledger, monthly_charge(checking)).unwrap();
    let count = RuleService::expand_rule(&mut ledger, id, today()).unwrap();

    assert_eq!(count, 12);
    for (index, txn) in ledger.transactions.iter().enumerate() {
        assert_eq!(txn.date.year(), 2025);
        assert_eq!(txn.date.month0() as usize, index);
        assert_eq!(txn.date.day(), 15);
        assert_eq!(txn.amount, -50.0);
        assert_eq!(txn.rule_id, Some(id));
    }
    let realized = ledger
        .transactions
        .iter()
        .filter(|txn| txn.status == TransactionStatus::Realized)
        .count();
    // Jan 15 through May 15 precede June 10; June 15 onward is upcoming.
    assert_eq!(realized, 5);
}

#[test]
fn second_generation_run_emits_nothing() {
    let (mut ledger, checking, _) = ledger_with_accounts();
    RuleService::create_charge(&mut ledger, monthly_charge(checking)).unwrap();
    assert_eq!(RuleService::generate_year(&mut ledger, today()), 12);
    assert_eq!(RuleService::generate_year(&mut ledger, today()), 0);
    assert_eq!(ledger.transaction_count(), 12);
}

#[test]
fn quarterly_rule_lands_on_quarter_months() {
    let (mut ledger, checking, _) = ledger_with_accounts();
    let mut draft = monthly_charge(checking);
    draft.frequency = Frequency::Quarterly;
    RuleService::create_charge(&mut ledger, draft).unwrap();
    RuleService::generate_year(&mut ledger, today());

    let months: Vec<u32> = ledger.transactions.iter().map(|txn| txn.date.month()).collect();
    assert_eq!(months, vec![1, 4, 7, 10]);
}

#[test]
fn yearly_rule_fires_once_in_january() {
    let (mut ledger, checking, _) = ledger_with_accounts();
    let mut draft = monthly_charge(checking);
    draft.frequency = Frequency::Yearly;
    RuleService::create_charge(&mut ledger, draft).unwrap();
    RuleService::generate_year(&mut ledger, today());

    assert_eq!(ledger.transaction_count(), 1);
    assert_eq!(ledger.transactions[0].date.month(), 1);
}

#[test]
fn day_of_month_is_clamped_to_short_months() {
    let (mut ledger, checking, _) = ledger_with_accounts();
    let mut draft = monthly_charge(checking);
    draft.day_of_month = 31;
    RuleService::create_charge(&mut ledger, draft).unwrap();
    RuleService::generate_year(&mut ledger, today());

    let days: Vec<u32> = ledger.transactions.iter().map(|txn| txn.date.day()).collect();
    assert_eq!(days, vec![31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]);
}

#[test]
fn transfer_produces_linked_opposite_legs() {
    let (mut ledger, checking, savings) = ledger_with_accounts();
    let draft = TransferDraft {
        name: "Put aside".into(),
        amount: 200.0,
        frequency: Frequency::Monthly,
        day_of_month: 1,
        source_id: checking,
        destination_id: savings,
    };
    RuleService::create_transfer(&mut ledger, draft).unwrap();
    RuleService::generate_year(&mut ledger, today());

    assert_eq!(ledger.transaction_count(), 24);
    for month in 1..=12 {
        let legs: Vec<_> = ledger
            .transactions
            .iter()
            .filter(|txn| txn.date.month() == month)
            .collect();
        assert_eq!(legs.len(), 2);
        let out = legs.iter().find(|txn| txn.amount < 0.0).expect("debit leg");
        let inflow = legs.iter().find(|txn| txn.amount > 0.0).expect("credit leg");
        assert_eq!(out.amount, -200.0);
        assert_eq!(inflow.amount, 200.0);
        assert_eq!(out.account_id, checking);
        assert_eq!(inflow.account_id, savings);
        assert_eq!(out.linked_transfer_id, Some(inflow.id));
        assert_eq!(inflow.linked_transfer_id, Some(out.id));
        assert_eq!(out.kind, TransactionKind::Transfer);
    }
}

#[test]
fn opening_date_excludes_the_opening_month() {
    let (mut ledger, checking, _) = ledger_with_accounts();
    ledger.set_opened_on(Some(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()));
    RuleService::create_charge(&mut ledger, monthly_charge(checking)).unwrap();
    RuleService::generate_year(&mut ledger, today());

    assert_eq!(ledger.transaction_count(), 9);
    let first = ledger.transactions.iter().map(|txn| txn.date).min().unwrap();
    assert_eq!(first, NaiveDate::from_ymd_opt(2025, 4, 15).unwrap());
}

#[test]
fn opening_date_in_a_prior_year_does_not_bound() {
    let (mut ledger, checking, _) = ledger_with_accounts();
    ledger.set_opened_on(Some(NaiveDate::from_ymd_opt(2024, 11, 2).unwrap()));
    RuleService::create_charge(&mut ledger, monthly_charge(checking)).unwrap();
    assert_eq!(RuleService::generate_year(&mut ledger, today()), 12);
}

#[test]
fn deleting_a_rule_cascades_to_its_transactions_only() {
    let (mut ledger, checking, savings) = ledger_with_accounts();
    let kept = RuleService::create_charge(&mut ledger, monthly_charge(checking)).unwrap();
    let doomed = RuleService::create_transfer(
        &mut ledger,
        TransferDraft {
            name: "Put aside".into(),
            amount: 80.0,
            frequency: Frequency::Monthly,
            day_of_month: 2,
            source_id: checking,
            destination_id: savings,
        },
    )
    .unwrap();
    RuleService::generate_year(&mut ledger, today());
    assert_eq!(ledger.transaction_count(), 36);

    let removed = RuleService::delete(&mut ledger, doomed);
    assert_eq!(removed, 24);
    assert_eq!(ledger.transaction_count(), 12);
    assert!(ledger
        .transactions
        .iter()
        .all(|txn| txn.rule_id == Some(kept)));
    assert!(ledger.rule(doomed).is_none());
}

#[test]
fn dedup_is_month_level_not_exact_date() {
    use cashflow_core::services::RuleUpdate;

    let (mut ledger, checking, _) = ledger_with_accounts();
    let id = RuleService::create_charge(&mut ledger, monthly_charge(checking)).unwrap();
    RuleService::generate_year(&mut ledger, today());

    // Moving the day within the month is not a new occurrence.
    RuleService::update(
        &mut ledger,
        id,
        RuleUpdate {
            day_of_month: Some(28),
            ..RuleUpdate::default()
        },
    )
    .unwrap();
    assert_eq!(RuleService::generate_year(&mut ledger, today()), 0);
}

#[test]
fn generation_backfills_missing_months() {
    use cashflow_core::services::TransactionService;

    let (mut ledger, checking, _) = ledger_with_accounts();
    RuleService::create_charge(&mut ledger, monthly_charge(checking)).unwrap();
    RuleService::generate_year(&mut ledger, today());

    let july = ledger
        .transactions
        .iter()
        .find(|txn| txn.date.month() == 7)
        .map(|txn| txn.id)
        .unwrap();
    TransactionService::remove(&mut ledger, july).unwrap();
    assert_eq!(ledger.transaction_count(), 11);

    assert_eq!(RuleService::generate_year(&mut ledger, today()), 1);
    assert_eq!(ledger.transaction_count(), 12);
}
