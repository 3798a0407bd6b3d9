//! Dialoguer prompt flows that build service inputs.

use chrono::NaiveDate;
use dialoguer::{Input, Select};
use uuid::Uuid;

use crate::domain::{Account, AccountKind, Displayable, Frequency};
use crate::errors::{CoreError, CoreResult};
use crate::ledger::Ledger;
use crate::services::{ChargeDraft, ManualEntry, TransferDraft};

use super::prompt_err;

pub fn account_form(ledger: &Ledger) -> CoreResult<Account> {
    let name: String = Input::new()
        .with_prompt("Account name")
        .interact_text()
        .map_err(prompt_err)?;
    if ledger.account_by_name(&name).is_some() {
        return Err(CoreError::Validation(format!(
            "account `{}` already exists",
            name.trim()
        )));
    }
    let kind = match Select::new()
        .with_prompt("Kind")
        .items(&["Checking", "Savings"])
        .default(0)
        .interact()
        .map_err(prompt_err)?
    {
        1 => AccountKind::Savings,
        _ => AccountKind::Checking,
    };
    Ok(Account::new(name.trim(), kind))
}

pub fn charge_form(ledger: &Ledger) -> CoreResult<ChargeDraft> {
    let account_id = pick_account(ledger, "Account")?;
    let name: String = Input::new()
        .with_prompt("Charge name")
        .interact_text()
        .map_err(prompt_err)?;
    let amount: f64 = Input::new()
        .with_prompt("Amount (magnitude)")
        .interact_text()
        .map_err(prompt_err)?;
    let category = pick_category(ledger)?;
    let frequency = pick_frequency()?;
    let day_of_month = pick_day()?;
    Ok(ChargeDraft {
        name,
        amount,
        category,
        frequency,
        day_of_month,
        account_id,
    })
}

pub fn transfer_form(ledger: &Ledger) -> CoreResult<TransferDraft> {
    let source_id = pick_account(ledger, "From account")?;
    let destination_id = pick_account(ledger, "To account")?;
    let name: String = Input::new()
        .with_prompt("Transfer name")
        .interact_text()
        .map_err(prompt_err)?;
    let amount: f64 = Input::new()
        .with_prompt("Amount")
        .interact_text()
        .map_err(prompt_err)?;
    let frequency = pick_frequency()?;
    let day_of_month = pick_day()?;
    Ok(TransferDraft {
        name,
        amount,
        frequency,
        day_of_month,
        source_id,
        destination_id,
    })
}

/// Opening date of the tracked bank account; an empty answer clears it.
pub fn opening_date_form() -> CoreResult<Option<NaiveDate>> {
    let raw: String = Input::new()
        .with_prompt("Account opening date (YYYY-MM-DD, empty to clear)")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| CoreError::Validation(format!("`{trimmed}` is not a valid date")))?;
    Ok(Some(date))
}

pub fn manual_entry_form(ledger: &Ledger) -> CoreResult<ManualEntry> {
    let account_id = pick_account(ledger, "Account")?;
    let raw_date: String = Input::new()
        .with_prompt("Date (YYYY-MM-DD)")
        .interact_text()
        .map_err(prompt_err)?;
    let date = NaiveDate::parse_from_str(raw_date.trim(), "%Y-%m-%d")
        .map_err(|_| CoreError::Validation(format!("`{}` is not a valid date", raw_date.trim())))?;
    let description: String = Input::new()
        .with_prompt("Description")
        .interact_text()
        .map_err(prompt_err)?;
    let amount: f64 = Input::new()
        .with_prompt("Amount (negative for expenses)")
        .interact_text()
        .map_err(prompt_err)?;
    let category = pick_category(ledger)?;
    Ok(ManualEntry {
        date,
        description,
        amount,
        category,
        account_id,
    })
}

pub fn pick_rule(ledger: &Ledger) -> CoreResult<Option<Uuid>> {
    if ledger.rules.is_empty() {
        println!("No rules defined yet");
        return Ok(None);
    }
    let labels: Vec<String> = ledger.rules.iter().map(Displayable::display_label).collect();
    let index = Select::new()
        .with_prompt("Rule")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    Ok(Some(ledger.rules[index].id))
}

fn pick_account(ledger: &Ledger, prompt: &str) -> CoreResult<Uuid> {
    if ledger.accounts.is_empty() {
        return Err(CoreError::Validation("create an account first".into()));
    }
    let labels: Vec<String> = ledger.accounts.iter().map(Displayable::display_label).collect();
    let index = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    Ok(ledger.accounts[index].id)
}

fn pick_category(ledger: &Ledger) -> CoreResult<String> {
    let mut names: Vec<String> = ledger.categories.income.clone();
    names.extend(ledger.categories.expense.iter().cloned());
    names.extend(ledger.categories.savings.iter().cloned());
    let index = Select::new()
        .with_prompt("Category")
        .items(&names)
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    Ok(names[index].clone())
}

fn pick_frequency() -> CoreResult<Frequency> {
    let index = Select::new()
        .with_prompt("Frequency")
        .items(&["Monthly", "Quarterly", "Yearly"])
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    Ok(match index {
        1 => Frequency::Quarterly,
        2 => Frequency::Yearly,
        _ => Frequency::Monthly,
    })
}

fn pick_day() -> CoreResult<u32> {
    let day: u32 = Input::new()
        .with_prompt("Day of month (1-31)")
        .interact_text()
        .map_err(prompt_err)?;
    Ok(day)
}
