//! Business logic services over the ledger aggregate.

pub mod import_service;
pub mod rule_service;
pub mod summary_service;
pub mod transaction_service;

pub use import_service::{BankAccount, BankRecord, ImportService};
pub use rule_service::{ChargeDraft, RuleService, RuleUpdate, TransferDraft};
pub use summary_service::{LedgerTotals, SummaryService};
pub use transaction_service::{FlowFilter, ManualEntry, TransactionFilter, TransactionService};
