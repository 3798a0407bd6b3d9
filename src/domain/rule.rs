//! Recurring charge and transfer definitions.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::category::TRANSFER_CATEGORY;
use crate::domain::common::{Displayable, Identifiable, NamedEntity};

/// How often a rule fires within the generation year.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Frequency {
    Monthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    /// Whether this frequency fires in the given zero-based month.
    /// Quarterly rules land on months 0, 3, 6, 9; yearly rules on January.
    pub fn applies_to(self, month0: u32) -> bool {
        match self {
            Frequency::Monthly => true,
            Frequency::Quarterly => month0 % 3 == 0,
            Frequency::Yearly => month0 == 0,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Frequency::Monthly => "Monthly",
            Frequency::Quarterly => "Quarterly",
            Frequency::Yearly => "Yearly",
        };
        f.write_str(label)
    }
}

/// Distinguishes plain charges from inter-account transfers. Keeping the
/// destination inside the variant means a transfer can never lack one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RuleKind {
    Charge,
    Transfer { destination: Uuid },
}

/// A user-defined template for a periodic money movement.
///
/// For charges the amount is stored signed: negative when the category is
/// an outflow, positive for income. For transfers it is an unsigned
/// magnitude; the sign is applied per leg at generation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurrenceRule {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    pub category: String,
    pub frequency: Frequency,
    pub day_of_month: u32,
    pub account_id: Uuid,
    pub kind: RuleKind,
}

impl RecurrenceRule {
    pub fn charge(
        name: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        frequency: Frequency,
        day_of_month: u32,
        account_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            category: category.into(),
            frequency,
            day_of_month,
            account_id,
            kind: RuleKind::Charge,
        }
    }

    pub fn transfer(
        name: impl Into<String>,
        magnitude: f64,
        frequency: Frequency,
        day_of_month: u32,
        source: Uuid,
        destination: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount: magnitude,
            category: TRANSFER_CATEGORY.into(),
            frequency,
            day_of_month,
            account_id: source,
            kind: RuleKind::Transfer { destination },
        }
    }

    pub fn is_transfer(&self) -> bool {
        matches!(self.kind, RuleKind::Transfer { .. })
    }

    /// Destination account for transfer rules, `None` for charges.
    pub fn destination(&self) -> Option<Uuid> {
        match self.kind {
            RuleKind::Transfer { destination } => Some(destination),
            RuleKind::Charge => None,
        }
    }
}

impl Identifiable for RecurrenceRule {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for RecurrenceRule {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for RecurrenceRule {
    fn display_label(&self) -> String {
        format!("{} ({}, day {})", self.name, self.frequency, self.day_of_month)
    }
}
