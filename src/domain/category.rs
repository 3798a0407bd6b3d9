//! Category lists used to classify rule amounts and forecast buckets.

use serde::{Deserialize, Serialize};

/// Reserved category assigned to both legs of a transfer.
pub const TRANSFER_CATEGORY: &str = "Transfer";

/// Reserved category routed to the forecast's bills series.
pub const BILLS_CATEGORY: &str = "Bills";

/// Externally supplied category name lists. The planner only consults them
/// to decide an amount's sign and a forecast bucket; the lists themselves
/// are owned and edited by the surrounding application.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryBook {
    #[serde(default)]
    pub income: Vec<String>,
    #[serde(default)]
    pub expense: Vec<String>,
    #[serde(default)]
    pub savings: Vec<String>,
}

impl CategoryBook {
    /// The seed lists a fresh ledger starts with.
    pub fn starter() -> Self {
        Self {
            income: vec!["Salary".into(), "Other income".into()],
            expense: vec![
                "Groceries".into(),
                "Transport".into(),
                "Housing".into(),
                "Leisure".into(),
                "Health".into(),
                "Shopping".into(),
                "Services".into(),
                BILLS_CATEGORY.into(),
                "Other".into(),
            ],
            savings: vec!["Savings".into()],
        }
    }

    /// Whether a charge in this category moves money out of the account.
    /// Expense and savings categories are outflows; anything else counts
    /// as income.
    pub fn is_outflow(&self, category: &str) -> bool {
        contains(&self.expense, category) || contains(&self.savings, category)
    }
}

fn contains(list: &[String], candidate: &str) -> bool {
    list.iter().any(|name| name == candidate)
}
