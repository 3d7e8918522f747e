//! User settings for gestion-sol
//!
//! Manages display preferences and the default lists used to seed the
//! expense-type and provider catalogs.

use serde::{Deserialize, Serialize};

use super::paths::GestionPaths;
use crate::error::GestionError;

/// Expense types written to a fresh or empty catalog
pub const DEFAULT_EXPENSE_TYPES: &[&str] = &["Mercadería", "Servicio", "Empleado", "Otros"];

/// Providers written to a fresh or empty catalog
pub const DEFAULT_PROVIDERS: &[&str] = &["Proveedor Genérico"];

/// User settings for gestion-sol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Format for due dates in the expense detail list (strftime format)
    #[serde(default = "default_due_date_format")]
    pub due_date_format: String,

    /// Number of most recent sales printed under the sales summary
    #[serde(default = "default_recent_rows")]
    pub recent_rows: usize,

    /// Seed list for the expense-type catalog
    #[serde(default = "default_expense_types")]
    pub default_expense_types: Vec<String>,

    /// Seed list for the provider catalog
    #[serde(default = "default_providers")]
    pub default_providers: Vec<String>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_due_date_format() -> String {
    "%d-%m-%Y".to_string()
}

fn default_recent_rows() -> usize {
    10
}

fn default_expense_types() -> Vec<String> {
    DEFAULT_EXPENSE_TYPES.iter().map(|s| s.to_string()).collect()
}

fn default_providers() -> Vec<String> {
    DEFAULT_PROVIDERS.iter().map(|s| s.to_string()).collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            due_date_format: default_due_date_format(),
            recent_rows: default_recent_rows(),
            default_expense_types: default_expense_types(),
            default_providers: default_providers(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &GestionPaths) -> Result<Self, GestionError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                GestionError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                GestionError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &GestionPaths) -> Result<(), GestionError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            GestionError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| GestionError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.recent_rows, 10);
        assert_eq!(settings.default_expense_types.len(), 4);
        assert_eq!(settings.default_providers, vec!["Proveedor Genérico"]);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = GestionPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.currency_symbol = "ARS ".to_string();
        settings.default_providers = vec!["EPEC".to_string()];
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "ARS ");
        assert_eq!(loaded.default_providers, vec!["EPEC"]);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"recent_rows": 3}"#).unwrap();
        assert_eq!(settings.recent_rows, 3);
        assert_eq!(settings.due_date_format, "%d-%m-%Y");
        assert_eq!(settings.default_expense_types[0], "Mercadería");
    }
}
