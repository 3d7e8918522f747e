//! Catalog service
//!
//! Holds the loaded expense types, providers and provider associations as an
//! explicit context, and applies additions to both the files and the context.

use tracing::{info, warn};

use crate::config::settings::Settings;
use crate::error::{GestionError, GestionResult};
use crate::storage::provider_map::{PROVIDER_SEPARATOR, TYPE_SEPARATOR};
use crate::storage::{CatalogFile, ProviderTypes, Storage};

/// The catalogs currently in effect
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogContext {
    pub expense_types: Vec<String>,
    pub providers: Vec<String>,
    pub provider_types: ProviderTypes,
}

impl CatalogContext {
    /// Load every catalog, seeding missing files from the settings defaults
    ///
    /// Read failures do not abort: the fallback values are used and each
    /// failure is returned as a warning message.
    pub fn load(storage: &Storage, settings: &Settings) -> (Self, Vec<String>) {
        let mut warnings = Vec::new();

        let types = storage.expense_types.load(&settings.default_expense_types);
        let providers = storage.providers.load(&settings.default_providers);
        let provider_types = storage.provider_types.load();

        for error in [&types.error, &providers.error, &provider_types.error]
            .into_iter()
            .flatten()
        {
            warn!("{}", error);
            warnings.push(error.to_string());
        }

        let context = Self {
            expense_types: types.value,
            providers: providers.value,
            provider_types: provider_types.value,
        };
        (context, warnings)
    }

    /// Expense types that may be used with `provider`
    ///
    /// A provider without a non-empty association may use the whole catalog.
    pub fn types_for_provider(&self, provider: &str) -> Vec<String> {
        match self.provider_types.get(provider.trim()) {
            Some(types) if !types.is_empty() => types.clone(),
            _ => self.expense_types.clone(),
        }
    }

    /// Check a provider and expense type pair against the catalogs
    ///
    /// When no type is given and the provider allows exactly one, that type is
    /// chosen. Returns the expense type to record.
    pub fn resolve_expense_type(
        &self,
        provider: &str,
        expense_type: Option<&str>,
    ) -> GestionResult<String> {
        let provider = provider.trim();
        if !self.has_provider(provider) {
            return Err(GestionError::provider_not_found(provider));
        }

        let allowed = self.types_for_provider(provider);
        match expense_type.map(str::trim) {
            Some(requested) if allowed.iter().any(|t| t == requested) => Ok(requested.to_string()),
            Some(requested) if !self.has_expense_type(requested) => {
                Err(GestionError::expense_type_not_found(requested))
            }
            Some(requested) => Err(GestionError::Validation(format!(
                "Expense type '{}' is not allowed for provider '{}' (allowed: {})",
                requested,
                provider,
                allowed.join(", ")
            ))),
            None if allowed.len() == 1 => Ok(allowed[0].clone()),
            None => Err(GestionError::Validation(format!(
                "An expense type must be selected for provider '{}' (allowed: {})",
                provider,
                allowed.join(", ")
            ))),
        }
    }

    pub fn has_provider(&self, provider: &str) -> bool {
        self.providers.iter().any(|p| p == provider.trim())
    }

    pub fn has_expense_type(&self, expense_type: &str) -> bool {
        self.expense_types.iter().any(|t| t == expense_type.trim())
    }
}

/// Service for catalog management
pub struct CatalogService<'a> {
    storage: &'a Storage,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add an expense type and return the updated, sorted list
    pub fn add_expense_type(
        &self,
        context: &mut CatalogContext,
        name: &str,
    ) -> GestionResult<Vec<String>> {
        let name = validated_name(name, "Expense type", TYPE_SEPARATOR)?;

        if context.has_expense_type(&name) {
            return Err(GestionError::Duplicate {
                entity_type: "Expense type",
                identifier: name,
            });
        }

        let mut items = context.expense_types.clone();
        items.push(name.clone());
        self.storage.expense_types.save(&items)?;

        context.expense_types = self.reload(&self.storage.expense_types, items)?;
        info!("Added expense type '{}'", name);
        Ok(context.expense_types.clone())
    }

    /// Add a provider and return the updated, sorted list
    pub fn add_provider(
        &self,
        context: &mut CatalogContext,
        name: &str,
    ) -> GestionResult<Vec<String>> {
        let name = validated_name(name, "Provider", PROVIDER_SEPARATOR)?;

        if context.has_provider(&name) {
            return Err(GestionError::Duplicate {
                entity_type: "Provider",
                identifier: name,
            });
        }

        let mut items = context.providers.clone();
        items.push(name.clone());
        self.storage.providers.save(&items)?;

        context.providers = self.reload(&self.storage.providers, items)?;
        info!("Added provider '{}'", name);
        Ok(context.providers.clone())
    }

    /// Replace the expense types associated with a provider
    ///
    /// An empty list removes the association, so the provider falls back to
    /// the whole catalog.
    pub fn set_provider_types(
        &self,
        context: &mut CatalogContext,
        provider: &str,
        types: &[String],
    ) -> GestionResult<()> {
        let provider = provider.trim();
        if !context.has_provider(provider) {
            return Err(GestionError::provider_not_found(provider));
        }

        let mut allowed: Vec<String> = Vec::new();
        for expense_type in types {
            let expense_type = expense_type.trim();
            if expense_type.is_empty() {
                continue;
            }
            if !context.has_expense_type(expense_type) {
                return Err(GestionError::expense_type_not_found(expense_type));
            }
            if !allowed.iter().any(|t| t == expense_type) {
                allowed.push(expense_type.to_string());
            }
        }

        let mut map = context.provider_types.clone();
        if allowed.is_empty() {
            map.remove(provider);
        } else {
            map.insert(provider.to_string(), allowed);
        }

        self.storage.provider_types.save(&map)?;
        context.provider_types = map;

        info!("Updated expense types for provider '{}'", provider);
        Ok(())
    }

    fn reload(&self, catalog: &CatalogFile, fallback: Vec<String>) -> GestionResult<Vec<String>> {
        catalog.load(&fallback).into_result()
    }
}

/// Trim a new catalog name; `separator` is the character the association
/// file uses to delimit this kind of name
fn validated_name(name: &str, entity: &str, separator: char) -> GestionResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(GestionError::Validation(format!(
            "{} name cannot be empty",
            entity
        )));
    }
    if name.contains(['\n', '\r']) {
        return Err(GestionError::Validation(format!(
            "{} name cannot span several lines",
            entity
        )));
    }
    if name.contains(separator) {
        return Err(GestionError::Validation(format!(
            "{} name cannot contain '{}'",
            entity, separator
        )));
    }
    Ok(name.to_string())
}
