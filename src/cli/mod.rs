//! Compact interactive front end over the core services.

mod forms;
mod render;

use chrono::Utc;
use colored::Colorize;
use dialoguer::Select;

use crate::errors::{CoreError, CoreResult};
use crate::ledger::{ForecastSeries, Ledger};
use crate::services::{RuleService, SummaryService, TransactionService, TransactionFilter};
use crate::storage::{JsonStorage, StorageBackend};
use crate::{export, utils};

const DEFAULT_LEDGER: &str = "personal";

/// Entry point for the `cashflow_cli` binary. With `help` (or `--help`)
/// as the first argument, prints usage and returns; otherwise starts the
/// interactive menu loop.
pub fn run_cli() -> CoreResult<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if matches!(args.first().map(String::as_str), Some("help" | "--help" | "-h")) {
        print_usage();
        return Ok(());
    }

    let storage = JsonStorage::new_default()?;
    let name = storage.last_ledger()?.unwrap_or_else(|| DEFAULT_LEDGER.into());
    let mut ledger = match storage.load(&name) {
        Ok(ledger) => ledger,
        Err(_) => Ledger::new(name.as_str()),
    };
    println!("{} {}", "Ledger:".bold(), ledger.name);

    loop {
        let choice = Select::new()
            .with_prompt("Main menu")
            .items(&[
                "Accounts",
                "Fixed charges",
                "Forecast",
                "Transactions",
                "Quit",
            ])
            .default(0)
            .interact()
            .map_err(prompt_err)?;
        let result = match choice {
            0 => accounts_menu(&mut ledger),
            1 => rules_menu(&mut ledger),
            2 => show_forecast(&ledger),
            3 => transactions_menu(&mut ledger),
            _ => break,
        };
        match result {
            Ok(changed) => {
                if changed {
                    storage.save(&ledger, &name)?;
                }
            }
            Err(CoreError::Validation(message)) => {
                println!("{} {}", "Invalid input:".red().bold(), message);
            }
            Err(err) => return Err(err),
        }
    }
    storage.save(&ledger, &name)?;
    Ok(())
}

fn print_usage() {
    println!("cashflow_cli - personal cash-flow planner");
    println!();
    println!("Usage: cashflow_cli [help]");
    println!();
    println!("Running without arguments opens the interactive menu:");
    println!("  accounts       manage checking and savings accounts");
    println!("  fixed charges  recurring charges and transfers, year generation");
    println!("  forecast       twelve-month projection from the rule set");
    println!("  transactions   manual entries, listing, CSV export");
    println!();
    println!("Data lives under CASHFLOW_HOME (default ~/.cashflow_core).");
}

fn accounts_menu(ledger: &mut Ledger) -> CoreResult<bool> {
    let choice = Select::new()
        .with_prompt("Accounts")
        .items(&["List", "Add account", "Set opening date", "Back"])
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    match choice {
        0 => {
            render::account_table(ledger);
            Ok(false)
        }
        1 => {
            let account = forms::account_form(ledger)?;
            let label = account.name.clone();
            ledger.add_account(account);
            println!("Added account {}", label.bold());
            Ok(true)
        }
        2 => {
            let date = forms::opening_date_form()?;
            ledger.set_opened_on(date);
            match date {
                Some(date) => println!("Generation now starts after {date}"),
                None => println!("Opening date cleared"),
            }
            Ok(true)
        }
        _ => Ok(false),
    }
}

fn rules_menu(ledger: &mut Ledger) -> CoreResult<bool> {
    let choice = Select::new()
        .with_prompt("Fixed charges")
        .items(&[
            "List",
            "Add charge",
            "Add transfer",
            "Delete rule",
            "Generate current year",
            "Back",
        ])
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    let today = Utc::now().date_naive();
    match choice {
        0 => {
            render::rule_table(ledger);
            Ok(false)
        }
        1 => {
            let draft = forms::charge_form(ledger)?;
            let id = RuleService::create_charge(ledger, draft)?;
            let count = RuleService::expand_rule(ledger, id, today)?;
            println!("Created charge; generated {count} transaction(s)");
            Ok(true)
        }
        2 => {
            let draft = forms::transfer_form(ledger)?;
            let id = RuleService::create_transfer(ledger, draft)?;
            let count = RuleService::expand_rule(ledger, id, today)?;
            println!("Created transfer; generated {count} transaction(s)");
            Ok(true)
        }
        3 => {
            let Some(id) = forms::pick_rule(ledger)? else {
                return Ok(false);
            };
            let removed = RuleService::delete(ledger, id);
            println!("Deleted rule and {removed} linked transaction(s)");
            Ok(true)
        }
        4 => {
            let count = RuleService::generate_year(ledger, today);
            println!("Generated {count} transaction(s)");
            Ok(count > 0)
        }
        _ => Ok(false),
    }
}

fn show_forecast(ledger: &Ledger) -> CoreResult<bool> {
    let series = ForecastSeries::from_rules(&ledger.rules, &ledger.accounts);
    render::forecast_table(&series);
    Ok(false)
}

fn transactions_menu(ledger: &mut Ledger) -> CoreResult<bool> {
    let choice = Select::new()
        .with_prompt("Transactions")
        .items(&["List recent", "Add manual entry", "Export CSV", "Back"])
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    match choice {
        0 => {
            let matches = TransactionService::filter(ledger, &TransactionFilter::default());
            render::transaction_table(ledger, &matches, 20);
            let totals = SummaryService::totals(ledger);
            render::totals_line(&totals);
            Ok(false)
        }
        1 => {
            let today = Utc::now().date_naive();
            let entry = forms::manual_entry_form(ledger)?;
            TransactionService::add_manual(ledger, entry, today)?;
            println!("Entry added");
            Ok(true)
        }
        2 => {
            let today = Utc::now().date_naive();
            let path = export::export_to_dir(ledger, &utils::app_data_dir(), today)?;
            println!("Wrote {}", path.display());
            Ok(false)
        }
        _ => Ok(false),
    }
}

pub(crate) fn prompt_err(err: dialoguer::Error) -> CoreError {
    CoreError::InvalidOperation(format!("prompt failed: {err}"))
}
