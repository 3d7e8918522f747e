//! Report formatting utilities for terminal output
//!
//! Provides formatting helpers shared by the sales and expense reports.

use rust_decimal::prelude::ToPrimitive;

use crate::models::Money;
use crate::reports::GroupTotal;

/// Width of report rules and headers
pub const REPORT_WIDTH: usize = 64;

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

/// A titled table of group totals with a share bar per group
pub fn format_group_table(title: &str, groups: &[GroupTotal], currency: &str) -> String {
    let mut output = format!("\n{}\n{}\n", title, separator(REPORT_WIDTH));

    if groups.is_empty() {
        output.push_str("  (none)\n");
        return output;
    }

    let grand_total: Money = groups.iter().map(|g| g.total).sum();
    let max = grand_total.value().to_f64().unwrap_or_default();

    for group in groups {
        let value = group.total.value().to_f64().unwrap_or_default();
        output.push_str(&format!(
            "  {:<24} {:>16} {:>5}  {}\n",
            truncate(&group.key, 24),
            group.total.format_with_symbol(currency),
            group.count,
            format_bar(value, max, 12)
        ));
    }

    output
}
