//! CSV-backed record tables
//!
//! A history file is read whole, coerced into typed records and rewritten whole
//! after every append. There is no lock: two processes appending at the same
//! time can lose one of the writes (last writer wins).

use std::marker::PhantomData;
use std::path::PathBuf;

use csv::{ReaderBuilder, Trim, WriterBuilder};
use tracing::{debug, warn};

use crate::error::{GestionError, GestionResult};
use crate::models::{RawRow, Record, RowRejection};

use super::file_io::{read_bytes, write_atomic, TextEncoding};
use super::LoadOutcome;

/// (encoding, delimiter) pairs tried in order when reading a history file
const READ_ATTEMPTS: &[(TextEncoding, u8)] = &[
    (TextEncoding::Utf8, b','),
    (TextEncoding::Utf8, b';'),
    (TextEncoding::Latin1, b','),
    (TextEncoding::Latin1, b';'),
];

/// Delimiter used when writing
const WRITE_DELIMITER: u8 = b',';

/// A row that was dropped while loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRow {
    /// 1-based line in the source file
    pub line: u64,
    pub reason: RowRejection,
}

/// The in-memory contents of a history file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table<R> {
    pub rows: Vec<R>,
    /// Rows skipped because the amount could not be coerced or the row was empty
    pub dropped: Vec<DroppedRow>,
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            dropped: Vec::new(),
        }
    }
}

impl<R> Table<R> {
    /// An empty table
    pub fn empty() -> Self {
        Self::default()
    }

    /// A table holding `rows` with nothing dropped
    pub fn from_rows(rows: Vec<R>) -> Self {
        Self {
            rows,
            dropped: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }
}

/// Reads and rewrites one CSV history file
#[derive(Debug, Clone)]
pub struct RecordStore<R> {
    path: PathBuf,
    _record: PhantomData<R>,
}

impl<R: Record> RecordStore<R> {
    /// Create a store backed by the file at `path`
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _record: PhantomData,
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load the table
    ///
    /// A missing file is an empty table. A file that cannot be parsed with any
    /// of the known encodings and delimiters yields an empty table and the error.
    pub fn load(&self) -> LoadOutcome<Table<R>> {
        let bytes = match read_bytes(&self.path) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!("No {} history at {}", R::NAME, self.path.display());
                return LoadOutcome::ok(Table::empty());
            }
            Err(e) => {
                warn!("Failed to read {} history: {}", R::NAME, e);
                return LoadOutcome::with_error(Table::empty(), e);
            }
        };

        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return LoadOutcome::ok(Table::empty());
        }

        let mut last_error = None;
        for (encoding, delimiter) in READ_ATTEMPTS {
            let Some(text) = encoding.decode(&bytes) else {
                continue;
            };

            match parse_table::<R>(&text, *delimiter) {
                Ok(table) => {
                    debug!(
                        "Loaded {} {} rows from {} ({:?}, '{}')",
                        table.len(),
                        R::NAME,
                        self.path.display(),
                        encoding,
                        char::from(*delimiter)
                    );
                    for dropped in &table.dropped {
                        warn!(
                            "Dropped {} row at line {}: {}",
                            R::NAME,
                            dropped.line,
                            dropped.reason
                        );
                    }
                    return LoadOutcome::ok(table);
                }
                Err(e) => last_error = Some(e),
            }
        }

        let reason = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "unsupported encoding".to_string());
        let error = GestionError::Storage(format!(
            "Could not parse {} history {}: {}",
            R::NAME,
            self.path.display(),
            reason
        ));
        warn!("{}", error);
        LoadOutcome::with_error(Table::empty(), error)
    }

    /// Write the whole table, replacing the file
    pub fn save(&self, table: &Table<R>) -> GestionResult<()> {
        let contents = serialize_table(table)?;
        write_atomic(&self.path, &contents)?;
        debug!(
            "Saved {} {} rows to {}",
            table.len(),
            R::NAME,
            self.path.display()
        );
        Ok(())
    }

    /// Load, add one row, save, and return the refreshed table
    pub fn append(&self, record: R) -> GestionResult<Table<R>> {
        self.append_batch(vec![record])
    }

    /// Load, add rows, save once, and return the refreshed table
    ///
    /// Refuses to run when the existing file is present but unreadable, since
    /// saving would replace it with only the new rows.
    pub fn append_batch(&self, records: Vec<R>) -> GestionResult<Table<R>> {
        let loaded = self.load();
        if let Some(error) = loaded.error {
            return Err(error);
        }

        let mut table = loaded.value;
        if !table.dropped.is_empty() {
            warn!(
                "Rewriting {} history without {} unreadable rows",
                R::NAME,
                table.dropped.len()
            );
        }

        table.rows.extend(records);
        self.save(&table)?;
        Ok(table)
    }
}

fn parse_table<R: Record>(text: &str, delimiter: u8) -> GestionResult<Table<R>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();

    let missing: Vec<&str> = R::HEADERS
        .iter()
        .copied()
        .filter(|h| !headers.iter().any(|existing| existing == h))
        .collect();
    if !missing.is_empty() {
        return Err(GestionError::Csv(format!(
            "missing columns: {}",
            missing.join(", ")
        )));
    }

    let mut table = Table::empty();
    for result in reader.records() {
        let values = result?;
        let line = values.position().map(|p| p.line()).unwrap_or_default();

        match R::from_row(&RawRow::new(&headers, &values)) {
            Ok(record) => table.rows.push(record),
            Err(reason) => table.dropped.push(DroppedRow { line, reason }),
        }
    }

    Ok(table)
}

fn serialize_table<R: Record>(table: &Table<R>) -> GestionResult<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .delimiter(WRITE_DELIMITER)
        .from_writer(Vec::new());

    writer.write_record(R::HEADERS)?;
    for record in &table.rows {
        writer.write_record(record.to_row())?;
    }

    writer
        .into_inner()
        .map_err(|e| GestionError::Csv(format!("Failed to finish CSV output: {}", e)))
}
