//! End-to-end flow: accounts, rules, generation, bank import, export,
//! and persistence round-trip.

use chrono::NaiveDate;

use cashflow_core::domain::{Account, AccountKind, Frequency};
use cashflow_core::export;
use cashflow_core::ledger::Ledger;
use cashflow_core::services::{
    BankRecord, ChargeDraft, ImportService, ManualEntry, RuleService, TransactionService,
};
use cashflow_core::storage::{JsonStorage, StorageBackend};

#[test]
fn full_session_survives_a_save_load_cycle() {
    let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
    let mut ledger = Ledger::new("Personal");
    let checking = ledger.add_account(Account::new("Checking", AccountKind::Checking));
    ledger.add_account(Account::new("Savings", AccountKind::Savings));

    let rule = RuleService::create_charge(
        &mut ledger,
        ChargeDraft {
            name: "Rent".into(),
            amount: 900.0,
            category: "Bills".into(),
            frequency: Frequency::Monthly,
            day_of_month: 1,
            account_id: checking,
        },
    )
    .unwrap();
    RuleService::expand_rule(&mut ledger, rule, today).unwrap();

    TransactionService::add_manual(
        &mut ledger,
        ManualEntry {
            date: NaiveDate::from_ymd_opt(2025, 5, 20).unwrap(),
            description: "Concert tickets".into(),
            amount: -60.0,
            category: "Leisure".into(),
            account_id: checking,
        },
        today,
    )
    .unwrap();

    let records = [BankRecord {
        id: "bank-1".into(),
        date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
        description: Some("CARREFOUR MARKET".into()),
        amount: -45.3,
    }];
    ImportService::merge(&mut ledger, checking, &records).unwrap();
    assert_eq!(ledger.transaction_count(), 14);

    let temp = tempfile::tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf()), None).unwrap();
    storage.save(&ledger, "personal").unwrap();
    let reloaded = storage.load("personal").unwrap();

    assert_eq!(reloaded.transaction_count(), ledger.transaction_count());
    assert_eq!(reloaded.rules.len(), 1);
    assert_eq!(reloaded.accounts.len(), 2);
    assert_eq!(
        reloaded
            .transactions
            .iter()
            .filter(|txn| txn.is_imported())
            .count(),
        1
    );

    // Generation stays idempotent across the persistence boundary.
    let mut reloaded = reloaded;
    assert_eq!(RuleService::generate_year(&mut reloaded, today), 0);

    let path = export::export_to_dir(&reloaded, temp.path(), today).unwrap();
    let text = std::fs::read_to_string(path).unwrap();
    // Header plus one line per transaction.
    assert_eq!(text.lines().count(), 15);
    assert!(text.contains("Concert tickets"));
    assert!(text.contains("CARREFOUR MARKET"));
}
