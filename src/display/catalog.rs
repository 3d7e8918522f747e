//! Catalog display formatting
//!
//! Formats expense types and providers for terminal output, with each
//! provider's associated expense types in tree form.

use crate::services::CatalogContext;

/// Format a plain list of catalog entries
pub fn format_name_list(title: &str, names: &[String]) -> String {
    if names.is_empty() {
        return format!("No {} found.\n", title.to_lowercase());
    }

    let mut output = format!("{}:\n", title);
    for name in names {
        output.push_str(&format!("  {}\n", name));
    }
    output
}

/// Format providers with their allowed expense types
pub fn format_provider_tree(context: &CatalogContext) -> String {
    if context.providers.is_empty() {
        return "No providers found.\n\nRun 'gestion init' to create the default catalogs.\n"
            .to_string();
    }

    let mut output = String::from("Providers:\n");

    for provider in &context.providers {
        output.push_str(&format!("{}\n", provider));

        match context.provider_types.get(provider) {
            Some(types) if !types.is_empty() => {
                for (i, expense_type) in types.iter().enumerate() {
                    let prefix = if i == types.len() - 1 {
                        "└── "
                    } else {
                        "├── "
                    };
                    output.push_str(&format!("  {}{}\n", prefix, expense_type));
                }
            }
            _ => output.push_str("  └── (all expense types)\n"),
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_name_list() {
        let names = vec!["Otros".to_string(), "Servicio".to_string()];
        assert_eq!(
            format_name_list("Expense Types", &names),
            "Expense Types:\n  Otros\n  Servicio\n"
        );
        assert_eq!(format_name_list("Providers", &[]), "No providers found.\n");
    }

    #[test]
    fn test_format_provider_tree() {
        let mut context = CatalogContext {
            expense_types: vec!["Servicio".into(), "Otros".into()],
            providers: vec!["EPEC".into(), "Proveedor Genérico".into()],
            ..Default::default()
        };
        context
            .provider_types
            .insert("EPEC".into(), vec!["Servicio".into()]);

        let output = format_provider_tree(&context);
        assert!(output.contains("EPEC\n  └── Servicio\n"));
        assert!(output.contains("Proveedor Genérico\n  └── (all expense types)\n"));
    }
}
