//! Expense CLI commands
//!
//! Implements CLI commands for recording expenses and listing due dates.

use std::path::PathBuf;

use chrono::Local;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::GestionResult;
use crate::export::{export_records_file, history_export_filename};
use crate::models::{Expense, NewExpense, Record};
use crate::reports::ExpenseDueReport;
use crate::services::{CatalogContext, ExpenseService};
use crate::storage::Storage;

use super::{create_output, parse_amount_arg, parse_date_arg, print_load_error, print_warnings};

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Provider name (must be in the provider catalog)
        provider: String,

        /// Expense amount (e.g. 4500.00)
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// Due date
        #[arg(short, long)]
        due: String,

        /// Expense type; may be omitted when the provider allows only one
        #[arg(short = 't', long = "type")]
        expense_type: Option<String>,

        /// Mark the expense as invoiced
        #[arg(short, long)]
        invoiced: bool,
    },

    /// Show pending and overdue expenses
    Report {
        /// Reference day for overdue detection (defaults to today)
        #[arg(long)]
        as_of: Option<String>,

        /// Export the due list to a CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export the full expenses history to CSV
    Export {
        /// Output file (defaults to expenses_history_<YYYYMMDD>.csv)
        output: Option<PathBuf>,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> GestionResult<()> {
    let service = ExpenseService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            provider,
            amount,
            due,
            expense_type,
            invoiced,
        } => {
            let (context, warnings) = CatalogContext::load(storage, settings);
            print_warnings(&warnings);

            let amount = parse_amount_arg(&amount)?;
            let due_date = parse_date_arg(&due)?;
            let expense_type = context.resolve_expense_type(&provider, expense_type.as_deref())?;

            let input = NewExpense {
                expense_type,
                provider,
                amount,
                due_date,
                invoiced,
            };

            let table = service.record(&input)?;
            println!(
                "Recorded expense: {} {} from {} due {}",
                input.expense_type,
                input.amount.format_with_symbol(&settings.currency_symbol),
                input.provider.trim(),
                input.due_date.format(&settings.due_date_format)
            );
            println!();

            let report = ExpenseDueReport::generate(&table, Local::now().date_naive());
            print!(
                "{}",
                report.format_terminal(&settings.currency_symbol, &settings.due_date_format)
            );
        }

        ExpenseCommands::Report { as_of, output } => {
            let as_of = match as_of {
                Some(raw) => parse_date_arg(&raw)?,
                None => Local::now().date_naive(),
            };

            let outcome = service.load();
            print_load_error(outcome.error.as_ref());

            let report = ExpenseDueReport::generate(&outcome.value, as_of);

            if let Some(path) = output {
                let mut writer = create_output(&path)?;
                report.export_csv(&mut writer, &settings.due_date_format)?;
                println!("Expenses report exported to: {}", path.display());
            } else {
                print!(
                    "{}",
                    report.format_terminal(&settings.currency_symbol, &settings.due_date_format)
                );
            }
        }

        ExpenseCommands::Export { output } => {
            let table = service.load().into_result()?;
            let path = output.unwrap_or_else(|| {
                PathBuf::from(history_export_filename(
                    Expense::NAME,
                    Local::now().date_naive(),
                ))
            });

            export_records_file(&table.rows, &path)?;
            println!("Exported {} expenses to: {}", table.len(), path.display());
        }
    }

    Ok(())
}
