pub mod account;
pub mod category;
pub mod common;
pub mod rule;
pub mod transaction;

pub use account::{Account, AccountKind};
pub use category::{CategoryBook, BILLS_CATEGORY, TRANSFER_CATEGORY};
pub use common::{Displayable, Identifiable, NamedEntity};
pub use rule::{Frequency, RecurrenceRule, RuleKind};
pub use transaction::{Transaction, TransactionKind, TransactionOrigin, TransactionStatus};
