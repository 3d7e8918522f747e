//! Provider to expense-type associations
//!
//! Stored as `Provider=Type1,Type2` lines. A provider with no line may be used
//! with every expense type.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::{GestionError, GestionResult};

use super::file_io::{read_bytes, write_lines_atomic, TextEncoding};
use super::LoadOutcome;

/// Separates a provider from its list
pub const PROVIDER_SEPARATOR: char = '=';

/// Separates expense types within a list
pub const TYPE_SEPARATOR: char = ',';

/// Provider name -> allowed expense types, in stored order
pub type ProviderTypes = BTreeMap<String, Vec<String>>;

/// The key=value file holding provider associations
#[derive(Debug, Clone)]
pub struct ProviderTypeMap {
    path: PathBuf,
}

impl ProviderTypeMap {
    /// Create a map backed by the file at `path`
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backing file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load the associations; lines without `=` are skipped
    ///
    /// A missing file is an empty map.
    pub fn load(&self) -> LoadOutcome<ProviderTypes> {
        let bytes = match read_bytes(&self.path) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return LoadOutcome::ok(ProviderTypes::new()),
            Err(e) => {
                warn!("Ignoring provider associations in {}: {}", self.path.display(), e);
                return LoadOutcome::with_error(ProviderTypes::new(), e);
            }
        };

        let contents = TextEncoding::Utf8
            .decode(&bytes)
            .or_else(|| TextEncoding::Latin1.decode(&bytes))
            .unwrap_or_default();

        let map = parse_map(&contents);
        debug!("Loaded {} provider associations", map.len());
        LoadOutcome::ok(map)
    }

    /// Write every provider with a non-empty list, replacing the file
    ///
    /// Providers whose list is empty are left out, which deletes the association.
    ///
    /// Names containing the file's own separators are refused, since they
    /// would not read back as the same association.
    pub fn save(&self, map: &ProviderTypes) -> GestionResult<()> {
        for (provider, types) in map {
            if provider.contains([PROVIDER_SEPARATOR, '\n', '\r']) {
                return Err(GestionError::Validation(format!(
                    "Provider '{}' cannot be stored in the association file",
                    provider
                )));
            }
            if let Some(bad) = types.iter().find(|t| t.contains([TYPE_SEPARATOR, '\n', '\r'])) {
                return Err(GestionError::Validation(format!(
                    "Expense type '{}' cannot be stored in the association file",
                    bad
                )));
            }
        }

        let lines: Vec<String> = map
            .iter()
            .filter(|(_, types)| !types.is_empty())
            .map(|(provider, types)| format!("{}={}", provider, types.join(",")))
            .collect();

        write_lines_atomic(&self.path, &lines).map_err(|e| {
            GestionError::Storage(format!(
                "Failed to save provider associations {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

fn parse_map(contents: &str) -> ProviderTypes {
    let mut map = ProviderTypes::new();

    for line in contents.lines() {
        let Some((provider, types)) = line.split_once(PROVIDER_SEPARATOR) else {
            continue;
        };

        let provider = provider.trim();
        if provider.is_empty() {
            continue;
        }

        let mut parsed: Vec<String> = Vec::new();
        for expense_type in types.split(TYPE_SEPARATOR).map(str::trim) {
            if !expense_type.is_empty() && !parsed.iter().any(|t| t == expense_type) {
                parsed.push(expense_type.to_string());
            }
        }

        map.insert(provider.to_string(), parsed);
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_map() -> (TempDir, ProviderTypeMap) {
        let temp_dir = TempDir::new().unwrap();
        let map = ProviderTypeMap::new(temp_dir.path().join("provider_types.txt"));
        (temp_dir, map)
    }

    #[test]
    fn test_missing_file_is_empty() {
        let (_temp_dir, map) = create_test_map();
        let loaded = map.load();
        assert!(loaded.value.is_empty());
        assert!(loaded.error.is_none());
        assert!(!map.path().exists());
    }

    #[test]
    fn test_parse_skips_malformed_lines() {
        let (_temp_dir, map) = create_test_map();
        fs::write(
            map.path(),
            "EPEC=Servicio\nno separator here\nMayorista= Mercadería , Otros,\n",
        )
        .unwrap();

        let loaded = map.load().value;
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded["EPEC"], vec!["Servicio"]);
        assert_eq!(loaded["Mayorista"], vec!["Mercadería", "Otros"]);
    }

    #[test]
    fn test_save_drops_empty_lists() {
        let (_temp_dir, map) = create_test_map();
        let mut associations = ProviderTypes::new();
        associations.insert("EPEC".into(), vec!["Servicio".into()]);
        associations.insert("Aguas".into(), Vec::new());

        map.save(&associations).unwrap();

        assert_eq!(fs::read_to_string(map.path()).unwrap(), "EPEC=Servicio\n");
        let reloaded = map.load().value;
        assert!(!reloaded.contains_key("Aguas"));
        assert_eq!(reloaded["EPEC"], vec!["Servicio"]);
    }

    #[test]
    fn test_save_refuses_names_with_separators() {
        let (_temp_dir, map) = create_test_map();

        let mut associations = ProviderTypes::new();
        associations.insert("Luz=Agua".into(), vec!["Servicio".into()]);
        assert!(matches!(
            map.save(&associations),
            Err(GestionError::Validation(_))
        ));

        let mut associations = ProviderTypes::new();
        associations.insert("EPEC".into(), vec!["Luz, gas".into()]);
        assert!(map.save(&associations).is_err());

        assert!(!map.path().exists());
    }
}
