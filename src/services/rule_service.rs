//! Creation, mutation, and expansion of recurrence rules.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{Frequency, RecurrenceRule, RuleKind};
use crate::errors::{CoreError, CoreResult};
use crate::ledger::{generator, Ledger};

/// Input for a new simple charge. The amount is an unsigned magnitude; the
/// service decides the sign from the category lists.
#[derive(Debug, Clone)]
pub struct ChargeDraft {
    pub name: String,
    pub amount: f64,
    pub category: String,
    pub frequency: Frequency,
    pub day_of_month: u32,
    pub account_id: Uuid,
}

/// Input for a new fixed transfer between two accounts.
#[derive(Debug, Clone)]
pub struct TransferDraft {
    pub name: String,
    pub amount: f64,
    pub frequency: Frequency,
    pub day_of_month: u32,
    pub source_id: Uuid,
    pub destination_id: Uuid,
}

/// Partial update merged into an existing rule. `None` fields are left
/// untouched. Materialized transactions are never revisited; call
/// [`RuleService::regenerate`] to reconcile them explicitly.
#[derive(Debug, Clone, Default)]
pub struct RuleUpdate {
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub frequency: Option<Frequency>,
    pub day_of_month: Option<u32>,
    pub account_id: Option<Uuid>,
    pub destination_id: Option<Uuid>,
}

pub struct RuleService;

impl RuleService {
    /// Creates a simple recurring charge. The stored amount is negated when
    /// the category resolves to an outflow (expense or savings lists).
    ///
    /// Creation does not expand the rule; follow up with
    /// [`RuleService::expand_rule`].
    pub fn create_charge(ledger: &mut Ledger, draft: ChargeDraft) -> CoreResult<Uuid> {
        validate_name(&draft.name)?;
        validate_amount(draft.amount)?;
        validate_day(draft.day_of_month)?;
        if draft.category.trim().is_empty() {
            return Err(CoreError::Validation("category is required".into()));
        }
        ensure_account(ledger, draft.account_id)?;

        let magnitude = draft.amount.abs();
        let signed = if ledger.categories.is_outflow(&draft.category) {
            -magnitude
        } else {
            magnitude
        };
        let rule = RecurrenceRule::charge(
            draft.name.trim(),
            signed,
            draft.category,
            draft.frequency,
            draft.day_of_month,
            draft.account_id,
        );
        let id = ledger.add_rule(rule);
        tracing::info!(%id, "created fixed charge");
        Ok(id)
    }

    /// Creates a fixed transfer. The magnitude is stored unsigned; legs are
    /// signed at generation time. Category is forced to `Transfer`.
    pub fn create_transfer(ledger: &mut Ledger, draft: TransferDraft) -> CoreResult<Uuid> {
        validate_name(&draft.name)?;
        validate_amount(draft.amount)?;
        validate_day(draft.day_of_month)?;
        ensure_account(ledger, draft.source_id)?;
        ensure_account(ledger, draft.destination_id)?;
        if draft.source_id == draft.destination_id {
            return Err(CoreError::Validation(
                "source and destination accounts must differ".into(),
            ));
        }

        let rule = RecurrenceRule::transfer(
            draft.name.trim(),
            draft.amount.abs(),
            draft.frequency,
            draft.day_of_month,
            draft.source_id,
            draft.destination_id,
        );
        let id = ledger.add_rule(rule);
        tracing::info!(%id, "created fixed transfer");
        Ok(id)
    }

    /// Merges `update` into the rule. Already-materialized transactions are
    /// a snapshot and stay untouched.
    pub fn update(ledger: &mut Ledger, id: Uuid, update: RuleUpdate) -> CoreResult<()> {
        let rule = ledger.rule_mut(id).ok_or(CoreError::RuleNotFound(id))?;
        if let Some(name) = update.name {
            rule.name = name;
        }
        if let Some(amount) = update.amount {
            rule.amount = amount;
        }
        if let Some(category) = update.category {
            if !rule.is_transfer() {
                rule.category = category;
            }
        }
        if let Some(frequency) = update.frequency {
            rule.frequency = frequency;
        }
        if let Some(day) = update.day_of_month {
            rule.day_of_month = day;
        }
        if let Some(account_id) = update.account_id {
            rule.account_id = account_id;
        }
        if let Some(destination) = update.destination_id {
            if let RuleKind::Transfer { .. } = rule.kind {
                rule.kind = RuleKind::Transfer { destination };
            }
        }
        ledger.touch();
        Ok(())
    }

    /// Removes the rule and every transaction generated from it. Deleting
    /// an unknown id is a no-op. Returns the number of cascaded
    /// transactions.
    pub fn delete(ledger: &mut Ledger, id: Uuid) -> usize {
        let removed = Self::remove_generated(ledger, id);
        let had_rule = ledger.rules.iter().any(|rule| rule.id == id);
        ledger.rules.retain(|rule| rule.id != id);
        if had_rule || removed > 0 {
            ledger.touch();
            tracing::info!(%id, removed, "deleted rule and cascaded transactions");
        }
        removed
    }

    /// Expands a single rule for the current year. Pairs with `create_*`
    /// as the explicit two-step creation flow.
    pub fn expand_rule(ledger: &mut Ledger, id: Uuid, today: NaiveDate) -> CoreResult<usize> {
        let rule = ledger.rule(id).cloned().ok_or(CoreError::RuleNotFound(id))?;
        let batch = generator::expand_rules(
            std::slice::from_ref(&rule),
            &ledger.transactions,
            &ledger.accounts,
            ledger.opened_on,
            today,
        );
        Ok(ledger.append_transactions(batch))
    }

    /// Expands every rule for the current year; returns the count emitted.
    pub fn generate_year(ledger: &mut Ledger, today: NaiveDate) -> usize {
        let batch = generator::expand_rules(
            &ledger.rules,
            &ledger.transactions,
            &ledger.accounts,
            ledger.opened_on,
            today,
        );
        let count = ledger.append_transactions(batch);
        tracing::info!(count, "generated recurring transactions");
        count
    }

    /// Explicit reconcile: drops the rule's generated transactions and
    /// expands it afresh against the edited definition.
    pub fn regenerate(ledger: &mut Ledger, id: Uuid, today: NaiveDate) -> CoreResult<usize> {
        if ledger.rule(id).is_none() {
            return Err(CoreError::RuleNotFound(id));
        }
        Self::remove_generated(ledger, id);
        Self::expand_rule(ledger, id, today)
    }

    fn remove_generated(ledger: &mut Ledger, id: Uuid) -> usize {
        let before = ledger.transactions.len();
        ledger.transactions.retain(|txn| txn.rule_id != Some(id));
        before - ledger.transactions.len()
    }
}

fn validate_name(name: &str) -> CoreResult<()> {
    if name.trim().is_empty() {
        Err(CoreError::Validation("name is required".into()))
    } else {
        Ok(())
    }
}

fn validate_amount(amount: f64) -> CoreResult<()> {
    if !amount.is_finite() || amount == 0.0 {
        Err(CoreError::Validation(
            "amount must be a non-zero number".into(),
        ))
    } else {
        Ok(())
    }
}

fn validate_day(day: u32) -> CoreResult<()> {
    if (1..=31).contains(&day) {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "day of month must be between 1 and 31".into(),
        ))
    }
}

fn ensure_account(ledger: &Ledger, id: Uuid) -> CoreResult<()> {
    if ledger.account(id).is_some() {
        Ok(())
    } else {
        Err(CoreError::AccountNotFound(id))
    }
}
