//! Storage layer for gestion-sol
//!
//! Provides the CSV history tables, the line-oriented catalog files and the
//! provider association file, all written atomically with automatic directory
//! creation.

pub mod catalog;
pub mod file_io;
pub mod init;
pub mod provider_map;
pub mod records;

pub use catalog::CatalogFile;
pub use file_io::{write_atomic, TextEncoding};
pub use init::{initialize_storage, needs_initialization};
pub use provider_map::{ProviderTypeMap, ProviderTypes};
pub use records::{DroppedRow, RecordStore, Table};

use crate::config::paths::GestionPaths;
use crate::error::GestionError;
use crate::models::{Expense, Sale};

/// A loaded value together with the failure that forced a fallback, if any
///
/// Loads never fail outright: a missing file is "no data yet", and any other
/// problem yields a safe fallback value plus the error for the caller to show.
#[derive(Debug)]
pub struct LoadOutcome<T> {
    pub value: T,
    pub error: Option<GestionError>,
}

impl<T> LoadOutcome<T> {
    /// A value loaded without problems
    pub fn ok(value: T) -> Self {
        Self { value, error: None }
    }

    /// A fallback value and the error that caused it
    pub fn with_error(value: T, error: GestionError) -> Self {
        Self {
            value,
            error: Some(error),
        }
    }

    /// Turn the outcome into a `Result`, discarding the fallback on error
    pub fn into_result(self) -> Result<T, GestionError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.value),
        }
    }
}

/// Main storage coordinator that provides access to every file
pub struct Storage {
    paths: GestionPaths,
    pub sales: RecordStore<Sale>,
    pub expenses: RecordStore<Expense>,
    pub expense_types: CatalogFile,
    pub providers: CatalogFile,
    pub provider_types: ProviderTypeMap,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: GestionPaths) -> Result<Self, GestionError> {
        paths.ensure_directories()?;

        Ok(Self {
            sales: RecordStore::new(paths.sales_file()),
            expenses: RecordStore::new(paths.expenses_file()),
            expense_types: CatalogFile::new(paths.expense_types_file()),
            providers: CatalogFile::new(paths.providers_file()),
            provider_types: ProviderTypeMap::new(paths.provider_types_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &GestionPaths {
        &self.paths
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}
