//! Upload CLI command
//!
//! Bulk-loads a sales file named with a `DD-MM-YY` date.

use std::path::PathBuf;

use clap::Args;

use crate::config::settings::Settings;
use crate::error::GestionResult;
use crate::reports::SalesSummaryReport;
use crate::services::UploadService;
use crate::storage::{Storage, Table};

/// Arguments for `gestion upload`
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Sales CSV whose name contains the date, e.g. "ventas 14-03-25.csv"
    pub file: PathBuf,

    /// Directory for the export bundle (detail, aggregates and history CSVs)
    #[arg(short, long)]
    pub bundle: Option<PathBuf>,
}

/// Handle the upload command
pub fn handle_upload_command(
    storage: &Storage,
    settings: &Settings,
    args: UploadArgs,
) -> GestionResult<()> {
    let report = UploadService::new(storage).upload_file(&args.file, args.bundle.as_deref())?;

    println!(
        "Uploaded {} sales dated {} ({} rows skipped, {} rows in history)",
        report.imported.len(),
        report.date.format("%d-%m-%Y"),
        report.skipped.len(),
        report.history_rows
    );
    for row in &report.skipped {
        println!("  line {}: {}", row.line, row.reason);
    }
    println!();

    let summary = SalesSummaryReport::generate(&Table::from_rows(report.imported), 0);
    print!("{}", summary.format_terminal(&settings.currency_symbol));

    if !report.bundle_files.is_empty() {
        println!("\nExport bundle:");
        for path in &report.bundle_files {
            println!("  {}", path.display());
        }
    }

    Ok(())
}
