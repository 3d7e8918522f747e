//! Catalog CLI commands
//!
//! Implements CLI commands for the expense-type and provider catalogs and
//! the provider associations.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_name_list, format_provider_tree};
use crate::error::GestionResult;
use crate::services::{CatalogContext, CatalogService};
use crate::storage::Storage;

use super::print_warnings;

/// Catalog subcommands
#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// List expense types
    Types,

    /// List providers with their allowed expense types
    Providers,

    /// Add an expense type
    AddType {
        /// Expense type name
        name: String,
    },

    /// Add a provider
    AddProvider {
        /// Provider name
        name: String,
    },

    /// Restrict a provider to the given expense types (none clears the restriction)
    Link {
        /// Provider name
        provider: String,

        /// Allowed expense types
        types: Vec<String>,
    },

    /// Show the expense types allowed for a provider
    TypesFor {
        /// Provider name
        provider: String,
    },
}

/// Handle a catalog command
pub fn handle_catalog_command(
    storage: &Storage,
    settings: &Settings,
    cmd: CatalogCommands,
) -> GestionResult<()> {
    let (mut context, warnings) = CatalogContext::load(storage, settings);
    print_warnings(&warnings);

    let service = CatalogService::new(storage);

    match cmd {
        CatalogCommands::Types => {
            print!("{}", format_name_list("Expense Types", &context.expense_types));
        }

        CatalogCommands::Providers => {
            print!("{}", format_provider_tree(&context));
        }

        CatalogCommands::AddType { name } => {
            let types = service.add_expense_type(&mut context, &name)?;
            println!("Added expense type: {}", name.trim());
            print!("{}", format_name_list("Expense Types", &types));
        }

        CatalogCommands::AddProvider { name } => {
            let providers = service.add_provider(&mut context, &name)?;
            println!("Added provider: {}", name.trim());
            print!("{}", format_name_list("Providers", &providers));
        }

        CatalogCommands::Link { provider, types } => {
            service.set_provider_types(&mut context, &provider, &types)?;
            if types.iter().all(|t| t.trim().is_empty()) {
                println!(
                    "Cleared expense types for '{}' (all types allowed)",
                    provider.trim()
                );
            } else {
                println!(
                    "Linked '{}' to: {}",
                    provider.trim(),
                    context.types_for_provider(&provider).join(", ")
                );
            }
        }

        CatalogCommands::TypesFor { provider } => {
            for expense_type in context.types_for_provider(&provider) {
                println!("{}", expense_type);
            }
        }
    }

    Ok(())
}
