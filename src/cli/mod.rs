//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod catalog;
pub mod expense;
pub mod sale;
pub mod upload;

pub use catalog::{handle_catalog_command, CatalogCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use sale::{handle_sale_command, SaleCommands};
pub use upload::{handle_upload_command, UploadArgs};

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{GestionError, GestionResult};
use crate::models::record::parse_date;
use crate::models::Money;

/// Parse an amount argument such as `150`, `150.00` or `$1,500.50`
pub(crate) fn parse_amount_arg(raw: &str) -> GestionResult<Money> {
    Money::parse(raw).map_err(|e| GestionError::Validation(e.to_string()))
}

/// Parse a date argument in any accepted layout (e.g. `2025-01-10`, `10/01/2025`)
pub(crate) fn parse_date_arg(raw: &str) -> GestionResult<NaiveDate> {
    parse_date(raw).ok_or_else(|| {
        GestionError::Validation(format!(
            "Invalid date '{}'. Use YYYY-MM-DD or DD/MM/YYYY",
            raw
        ))
    })
}

/// Open `path` for a CSV export
pub(crate) fn create_output(path: &Path) -> GestionResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        GestionError::Export(format!("Cannot create {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

/// Print load problems that forced a fallback
pub(crate) fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }
}

/// Print the error carried by a load that fell back to an empty table
pub(crate) fn print_load_error(error: Option<&GestionError>) {
    if let Some(error) = error {
        eprintln!("Warning: {}", error);
    }
}
