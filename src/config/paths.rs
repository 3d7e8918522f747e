//! Path management for gestion-sol
//!
//! Provides XDG-compliant path resolution for settings and the CSV/text data files.
//!
//! ## Path Resolution Order
//!
//! 1. `GESTION_SOL_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/gestion-sol` or `~/.config/gestion-sol`
//! 3. Windows: `%APPDATA%\gestion-sol`

use std::path::PathBuf;

use crate::error::GestionError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "GESTION_SOL_DATA_DIR";

/// Manages all paths used by gestion-sol
#[derive(Debug, Clone)]
pub struct GestionPaths {
    /// Base directory for all gestion-sol data
    base_dir: PathBuf,
}

impl GestionPaths {
    /// Create a new GestionPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, GestionError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create GestionPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/gestion-sol/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/gestion-sol/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Sales history table
    pub fn sales_file(&self) -> PathBuf {
        self.data_dir().join("sales_history.csv")
    }

    /// Expenses history table
    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses_history.csv")
    }

    /// Expense-type catalog, one name per line
    pub fn expense_types_file(&self) -> PathBuf {
        self.data_dir().join("expense_types.txt")
    }

    /// Provider catalog, one name per line
    pub fn providers_file(&self) -> PathBuf {
        self.data_dir().join("providers.txt")
    }

    /// Provider to expense-type associations, `Provider=Type1,Type2` per line
    pub fn provider_types_file(&self) -> PathBuf {
        self.data_dir().join("provider_types.txt")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), GestionError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| GestionError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| GestionError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if gestion-sol has been initialized (settings file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, GestionError> {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(config_home).join("gestion-sol"));
    }

    let home = std::env::var("HOME")
        .map_err(|_| GestionError::Config("Could not determine HOME directory".into()))?;
    Ok(PathBuf::from(home).join(".config").join("gestion-sol"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, GestionError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| GestionError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("gestion-sol"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = GestionPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = GestionPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().exists());
        assert!(paths.data_dir().exists());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = GestionPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.sales_file(),
            temp_dir.path().join("data").join("sales_history.csv")
        );
        assert_eq!(
            paths.provider_types_file(),
            temp_dir.path().join("data").join("provider_types.txt")
        );
    }
}
