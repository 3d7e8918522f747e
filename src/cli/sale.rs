//! Sale CLI commands
//!
//! Implements CLI commands for recording sales and reporting on them.

use std::path::PathBuf;

use chrono::Local;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::GestionResult;
use crate::export::{export_records_file, history_export_filename};
use crate::models::{NewSale, Partner, PaymentMethod, Record, Sale, SaleColumn};
use crate::reports::SalesSummaryReport;
use crate::services::SaleService;
use crate::storage::Storage;

use super::{create_output, parse_amount_arg, parse_date_arg, print_load_error};

/// Sale subcommands
#[derive(Subcommand, Debug)]
pub enum SaleCommands {
    /// Record a new sale
    Add {
        /// Sale amount (e.g. 150.00)
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// Payment method code: e (cash), t (transfer), d (debit), c (credit)
        #[arg(short = 'm', long, default_value = "e")]
        method: String,

        /// Partner code: f (Fernando), n (Ignacio)
        #[arg(short, long, default_value = "f")]
        partner: String,

        /// Mark the sale as invoiced
        #[arg(short, long)]
        invoiced: bool,

        /// Sale date (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Show accumulated sales
    Report {
        /// Number of recent sales to list
        #[arg(short, long)]
        recent: Option<usize>,

        /// Export the aggregates to a CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export the full sales history to CSV
    Export {
        /// Output file (defaults to sales_history_<YYYYMMDD>.csv)
        output: Option<PathBuf>,
    },

    /// List payment method and partner codes
    Codes,
}

/// Handle a sale command
pub fn handle_sale_command(
    storage: &Storage,
    settings: &Settings,
    cmd: SaleCommands,
) -> GestionResult<()> {
    let service = SaleService::new(storage);

    match cmd {
        SaleCommands::Add {
            amount,
            method,
            partner,
            invoiced,
            date,
        } => {
            let input = NewSale {
                date: match date {
                    Some(raw) => parse_date_arg(&raw)?,
                    None => Local::now().date_naive(),
                },
                amount: parse_amount_arg(&amount)?,
                payment_method_code: method,
                invoiced,
                partner_code: partner,
            };

            let table = service.record(&input)?;
            let sale = Sale::from_input(&input);
            println!(
                "Recorded sale: {} {} via {} ({}, {})",
                sale.value(SaleColumn::Date),
                sale.amount.format_with_symbol(&settings.currency_symbol),
                sale.payment_method,
                sale.invoiced,
                sale.partner
            );
            println!();

            let report = SalesSummaryReport::generate(&table, settings.recent_rows);
            print!("{}", report.format_terminal(&settings.currency_symbol));
        }

        SaleCommands::Report { recent, output } => {
            let outcome = service.load();
            print_load_error(outcome.error.as_ref());

            let report = SalesSummaryReport::generate(
                &outcome.value,
                recent.unwrap_or(settings.recent_rows),
            );

            if let Some(path) = output {
                let mut writer = create_output(&path)?;
                report.export_csv(&mut writer)?;
                println!("Sales report exported to: {}", path.display());
            } else {
                print!("{}", report.format_terminal(&settings.currency_symbol));
            }
        }

        SaleCommands::Export { output } => {
            let table = service.load().into_result()?;
            let path = output.unwrap_or_else(|| {
                PathBuf::from(history_export_filename(
                    Sale::NAME,
                    Local::now().date_naive(),
                ))
            });

            export_records_file(&table.rows, &path)?;
            println!("Exported {} sales to: {}", table.len(), path.display());
        }

        SaleCommands::Codes => {
            println!("Payment methods:");
            for method in PaymentMethod::all() {
                println!("  {}  {}", method.code(), method.label());
            }
            println!("Partners:");
            for partner in Partner::all() {
                println!("  {}  {}", partner.code(), partner.label());
            }
        }
    }

    Ok(())
}
