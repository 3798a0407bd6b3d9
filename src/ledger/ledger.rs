use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Account, CategoryBook, RecurrenceRule, Transaction};

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// The application's whole budgeting state: accounts, category lists,
/// recurrence rules, and the transaction ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub categories: CategoryBook,
    #[serde(default)]
    pub rules: Vec<RecurrenceRule>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    /// Date the tracked bank account was opened; bounds generation when it
    /// falls inside the current year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opened_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Ledger::schema_version_default")]
    pub schema_version: u8,
}

impl Ledger {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            accounts: Vec::new(),
            categories: CategoryBook::starter(),
            rules: Vec::new(),
            transactions: Vec::new(),
            opened_on: None,
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_account(&mut self, account: Account) -> Uuid {
        let id = account.id;
        self.accounts.push(account);
        self.touch();
        id
    }

    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    pub fn account_by_name(&self, name: &str) -> Option<&Account> {
        let normalized = name.trim().to_ascii_lowercase();
        self.accounts
            .iter()
            .find(|account| account.name.trim().to_ascii_lowercase() == normalized)
    }

    pub fn add_rule(&mut self, rule: RecurrenceRule) -> Uuid {
        let id = rule.id;
        self.rules.push(rule);
        self.touch();
        id
    }

    pub fn rule(&self, id: Uuid) -> Option<&RecurrenceRule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    pub fn rule_mut(&mut self, id: Uuid) -> Option<&mut RecurrenceRule> {
        self.rules.iter_mut().find(|rule| rule.id == id)
    }

    pub fn add_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        self.transactions.push(transaction);
        self.touch();
        id
    }

    /// Appends a generated batch in one go. No-op (and no `touch`) when the
    /// batch is empty.
    pub fn append_transactions(&mut self, batch: Vec<Transaction>) -> usize {
        let count = batch.len();
        if count > 0 {
            self.transactions.extend(batch);
            self.touch();
        }
        count
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn remove_transaction(&mut self, id: Uuid) -> Option<Transaction> {
        let index = self.transactions.iter().position(|txn| txn.id == id)?;
        let removed = self.transactions.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn set_opened_on(&mut self, date: Option<NaiveDate>) {
        self.opened_on = date;
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}
