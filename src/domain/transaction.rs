use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable};

/// A single dated, signed ledger entry. Negative amounts leave the account,
/// positive amounts enter it. Transactions are immutable once created;
/// removal is the only mutation path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub account_id: Uuid,
    pub status: TransactionStatus,
    pub origin: TransactionOrigin,
    /// Back-reference to the originating rule when `origin` is `Recurring`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<Uuid>,
    pub kind: TransactionKind,
    /// For transfer legs, the id of the sibling leg.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_transfer_id: Option<Uuid>,
    /// Aggregator-side identifier for bank-imported rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_ref: Option<String>,
}

impl Transaction {
    /// Creates a manual entry. Status is decided by the caller from the
    /// entry date.
    pub fn manual(
        date: NaiveDate,
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        account_id: Uuid,
        status: TransactionStatus,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            description: description.into(),
            amount,
            category: category.into(),
            account_id,
            status,
            origin: TransactionOrigin::Manual,
            rule_id: None,
            kind: TransactionKind::Normal,
            linked_transfer_id: None,
            external_ref: None,
        }
    }

    pub fn is_generated(&self) -> bool {
        self.origin == TransactionOrigin::Recurring
    }

    pub fn is_imported(&self) -> bool {
        self.origin == TransactionOrigin::BankImport
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("{} {} {:+.2}", self.date, self.description, self.amount)
    }
}

/// Whether the transaction date had already passed at generation time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionStatus {
    Realized,
    Upcoming,
}

impl TransactionStatus {
    /// `Realized` iff `date` is strictly before `today`.
    pub fn from_date(date: NaiveDate, today: NaiveDate) -> Self {
        if date < today {
            TransactionStatus::Realized
        } else {
            TransactionStatus::Upcoming
        }
    }
}

/// Where a transaction came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionOrigin {
    Manual,
    BankImport,
    Recurring,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionKind {
    Normal,
    Transfer,
}
