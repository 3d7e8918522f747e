//! Catalog files for dropdown options
//!
//! Expense types and providers are stored one name per line. A missing or empty
//! file is seeded with the default list the first time it is loaded.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::{GestionError, GestionResult};

use super::file_io::{read_bytes, write_lines_atomic, TextEncoding};
use super::LoadOutcome;

/// A line-oriented list of unique names
#[derive(Debug, Clone)]
pub struct CatalogFile {
    path: PathBuf,
}

impl CatalogFile {
    /// Create a catalog backed by the file at `path`
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backing file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load the non-empty trimmed lines of the file
    ///
    /// When the file is absent or has no items it is seeded with `defaults`
    /// (sorted and deduplicated) and those are returned. Other read failures
    /// fall back to `defaults` without writing and carry the error.
    pub fn load(&self, defaults: &[String]) -> LoadOutcome<Vec<String>> {
        let bytes = match read_bytes(&self.path) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return self.seed(defaults),
            Err(e) => {
                warn!("Falling back to default catalog for {}: {}", self.path.display(), e);
                return LoadOutcome::with_error(normalize(defaults), e);
            }
        };

        let contents = TextEncoding::Utf8
            .decode(&bytes)
            .or_else(|| TextEncoding::Latin1.decode(&bytes))
            .unwrap_or_default();

        let items: Vec<String> = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();

        if items.is_empty() {
            return self.seed(defaults);
        }

        debug!("Loaded {} catalog entries from {}", items.len(), self.path.display());
        LoadOutcome::ok(items)
    }

    /// Deduplicate, sort and write one item per line, replacing the file
    pub fn save(&self, items: &[String]) -> GestionResult<()> {
        let items = normalize(items);
        write_lines_atomic(&self.path, &items).map_err(|e| {
            GestionError::Storage(format!(
                "Failed to save catalog {}: {}",
                self.path.display(),
                e
            ))
        })?;
        debug!("Saved {} catalog entries to {}", items.len(), self.path.display());
        Ok(())
    }

    fn seed(&self, defaults: &[String]) -> LoadOutcome<Vec<String>> {
        let items = normalize(defaults);
        debug!("Seeding catalog {} with defaults", self.path.display());
        match self.save(&items) {
            Ok(()) => LoadOutcome::ok(items),
            Err(e) => {
                warn!("{}", e);
                LoadOutcome::with_error(items, e)
            }
        }
    }
}

/// Trimmed, non-empty, unique and lexicographically sorted
pub fn normalize(items: &[String]) -> Vec<String> {
    let mut items: Vec<String> = items
        .iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect();
    items.sort();
    items.dedup();
    items
}
