//! Bulk sales upload
//!
//! Reads a CSV of sales whose file name carries the sale date as `DD-MM-YY`,
//! appends every valid row to the sales history in one save, and optionally
//! writes the export bundle for the batch.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use regex::Regex;
use tracing::{info, warn};

use crate::error::{GestionError, GestionResult};
use crate::export::write_upload_bundle;
use crate::models::labels::invoiced_from_code;
use crate::models::{Money, NewSale, Sale};
use crate::storage::file_io::{read_bytes, TextEncoding};
use crate::storage::Storage;

use super::sale::SaleService;

/// Columns every upload must provide
pub const REQUIRED_COLUMNS: [&str; 4] = [
    "Amount",
    "Payment Method code",
    "Invoiced code",
    "Partner code",
];

const FILENAME_DATE_PATTERN: &str = r"(\d{2})-(\d{2})-(\d{2})";

/// Extract the `DD-MM-YY` date embedded in a file name
///
/// Two-digit years are in the 2000s. Names without a valid date are rejected.
pub fn date_from_filename(path: &Path) -> GestionResult<NaiveDate> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let pattern = Regex::new(FILENAME_DATE_PATTERN)
        .map_err(|e| GestionError::Upload(format!("Invalid date pattern: {}", e)))?;

    for captures in pattern.captures_iter(&name) {
        let day: u32 = captures[1].parse().unwrap_or(0);
        let month: u32 = captures[2].parse().unwrap_or(0);
        let year: i32 = captures[3].parse().unwrap_or(0);

        if let Some(date) = NaiveDate::from_ymd_opt(2000 + year, month, day) {
            return Ok(date);
        }
    }

    Err(GestionError::Upload(format!(
        "File name '{}' has no DD-MM-YY date",
        name
    )))
}

/// A row that was left out of the upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line in the uploaded file
    pub line: u64,
    pub reason: String,
}

/// Parsed contents of an upload file
#[derive(Debug, Clone)]
pub struct SalesUpload {
    pub date: NaiveDate,
    pub sales: Vec<NewSale>,
    pub skipped: Vec<SkippedRow>,
}

impl SalesUpload {
    /// Parse upload text; comma and semicolon delimiters are accepted
    pub fn parse(date: NaiveDate, text: &str) -> GestionResult<Self> {
        let mut first_error = None;

        for delimiter in [b',', b';'] {
            match Self::parse_with(date, text, delimiter) {
                Ok(upload) => return Ok(upload),
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }

        Err(first_error.unwrap_or_else(|| GestionError::Upload("Empty upload".into())))
    }

    /// Read and parse an upload file, taking the date from its name
    pub fn from_file(path: &Path) -> GestionResult<Self> {
        let date = date_from_filename(path)?;

        let bytes = read_bytes(path)?
            .ok_or_else(|| GestionError::Upload(format!("{} does not exist", path.display())))?;
        let text = TextEncoding::Utf8
            .decode(&bytes)
            .or_else(|| TextEncoding::Latin1.decode(&bytes))
            .unwrap_or_default();

        Self::parse(date, &text)
    }

    fn parse_with(date: NaiveDate, text: &str, delimiter: u8) -> GestionResult<Self> {
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        let columns = column_indices(&headers)?;

        let mut upload = Self {
            date,
            sales: Vec::new(),
            skipped: Vec::new(),
        };

        for result in reader.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();

            if record.iter().all(|field| field.is_empty()) {
                continue;
            }

            let field = |index: usize| record.get(columns[index]).unwrap_or("");

            let amount = match Money::parse(field(0)) {
                Ok(amount) if amount.is_positive() => amount,
                Ok(amount) => {
                    upload.skipped.push(SkippedRow {
                        line,
                        reason: format!("amount must be greater than zero (got {})", amount),
                    });
                    continue;
                }
                Err(_) => {
                    upload.skipped.push(SkippedRow {
                        line,
                        reason: format!("invalid amount '{}'", field(0)),
                    });
                    continue;
                }
            };

            upload.sales.push(NewSale {
                date,
                amount,
                payment_method_code: field(1).to_string(),
                invoiced: invoiced_from_code(field(2)),
                partner_code: field(3).to_string(),
            });
        }

        Ok(upload)
    }
}

fn column_indices(headers: &StringRecord) -> GestionResult<[usize; 4]> {
    let mut indices = [0; 4];
    let mut missing = Vec::new();

    for (slot, name) in REQUIRED_COLUMNS.iter().enumerate() {
        match headers.iter().position(|h| h == *name) {
            Some(index) => indices[slot] = index,
            None => missing.push(*name),
        }
    }

    if !missing.is_empty() {
        return Err(GestionError::Upload(format!(
            "Missing required columns: {}",
            missing.join(", ")
        )));
    }
    Ok(indices)
}

/// Outcome of a completed upload
#[derive(Debug, Clone)]
pub struct UploadReport {
    pub date: NaiveDate,
    /// Sales appended to the history
    pub imported: Vec<Sale>,
    pub skipped: Vec<SkippedRow>,
    /// Rows in the history after the upload
    pub history_rows: usize,
    /// Files written by the export bundle
    pub bundle_files: Vec<PathBuf>,
}

/// Service for bulk uploads
pub struct UploadService<'a> {
    storage: &'a Storage,
}

impl<'a> UploadService<'a> {
    /// Create a new upload service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Upload a sales file and optionally write the export bundle to `bundle_dir`
    pub fn upload_file(&self, path: &Path, bundle_dir: Option<&Path>) -> GestionResult<UploadReport> {
        let upload = SalesUpload::from_file(path)?;
        self.apply(upload, bundle_dir)
    }

    /// Append parsed upload rows to the history
    pub fn apply(&self, upload: SalesUpload, bundle_dir: Option<&Path>) -> GestionResult<UploadReport> {
        for row in &upload.skipped {
            warn!("Skipping upload line {}: {}", row.line, row.reason);
        }

        if upload.sales.is_empty() {
            return Err(GestionError::Upload(format!(
                "No valid sales to upload ({} rows skipped)",
                upload.skipped.len()
            )));
        }

        let history = SaleService::new(self.storage).record_batch(&upload.sales)?;
        let imported: Vec<Sale> = upload.sales.iter().map(Sale::from_input).collect();

        let bundle_files = match bundle_dir {
            Some(dir) => write_upload_bundle(dir, upload.date, &imported, &history.rows)?,
            None => Vec::new(),
        };

        info!(
            date = %upload.date,
            imported = imported.len(),
            skipped = upload.skipped.len(),
            "Uploaded sales"
        );

        Ok(UploadReport {
            date: upload.date,
            imported,
            skipped: upload.skipped,
            history_rows: history.len(),
            bundle_files,
        })
    }
}
