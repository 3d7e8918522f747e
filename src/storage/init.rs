//! Storage initialization
//!
//! Handles first-run setup: creates the directories, seeds both catalogs and
//! writes empty history tables with their header rows.

use tracing::info;

use crate::config::paths::GestionPaths;
use crate::config::settings::Settings;
use crate::error::GestionError;
use crate::models::{Expense, Record, Sale};

use super::records::{RecordStore, Table};
use super::CatalogFile;

/// Initialize storage for a fresh installation
///
/// Existing files are left untouched.
pub fn initialize_storage(paths: &GestionPaths, settings: &Settings) -> Result<(), GestionError> {
    paths.ensure_directories()?;

    CatalogFile::new(paths.expense_types_file())
        .load(&settings.default_expense_types)
        .into_result()?;
    CatalogFile::new(paths.providers_file())
        .load(&settings.default_providers)
        .into_result()?;

    create_empty_table::<Sale>(RecordStore::new(paths.sales_file()))?;
    create_empty_table::<Expense>(RecordStore::new(paths.expenses_file()))?;

    info!("Initialized storage at {}", paths.base_dir().display());
    Ok(())
}

fn create_empty_table<R: Record>(store: RecordStore<R>) -> Result<(), GestionError> {
    if store.path().exists() {
        return Ok(());
    }
    store.save(&Table::empty())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &GestionPaths) -> bool {
    !paths.sales_file().exists() || !paths.expenses_file().exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_creates_files() {
        let temp_dir = TempDir::new().unwrap();
        let paths = GestionPaths::with_base_dir(temp_dir.path().to_path_buf());
        assert!(needs_initialization(&paths));

        initialize_storage(&paths, &Settings::default()).unwrap();

        assert!(!needs_initialization(&paths));
        assert_eq!(
            fs::read_to_string(paths.sales_file()).unwrap(),
            "Date,Amount,Payment Method,Invoiced,Partner\n"
        );
        assert_eq!(
            fs::read_to_string(paths.providers_file()).unwrap(),
            "Proveedor Genérico\n"
        );
        assert_eq!(
            fs::read_to_string(paths.expense_types_file()).unwrap(),
            "Empleado\nMercadería\nOtros\nServicio\n"
        );
    }

    #[test]
    fn test_initialize_keeps_existing_history() {
        let temp_dir = TempDir::new().unwrap();
        let paths = GestionPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();

        let existing = "Date,Amount,Payment Method,Invoiced,Partner\n2025-01-10,5.00,Cash,Invoiced,Fernando\n";
        fs::write(paths.sales_file(), existing).unwrap();

        initialize_storage(&paths, &Settings::default()).unwrap();
        assert_eq!(fs::read_to_string(paths.sales_file()).unwrap(), existing);
    }
}
