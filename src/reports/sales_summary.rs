//! Sales Summary Report
//!
//! Accumulated sales with breakdowns by partner, invoicing status and payment method.

use std::io::Write;

use crate::display::report::{
    double_separator, format_group_table, separator, truncate, REPORT_WIDTH,
};
use crate::error::{GestionError, GestionResult};
use crate::models::labels::INVOICED_LABEL;
use crate::models::{Money, Record, Sale, SaleColumn};
use crate::storage::Table;

use super::aggregate::{group_sum, total, GroupTotal};

/// Sales Summary Report
#[derive(Debug, Clone)]
pub struct SalesSummaryReport {
    /// Sum of every sale
    pub total_sales: Money,
    /// Sum of invoiced sales
    pub total_invoiced: Money,
    /// Number of sales
    pub record_count: usize,
    pub by_partner: Vec<GroupTotal>,
    pub by_invoiced: Vec<GroupTotal>,
    pub by_payment_method: Vec<GroupTotal>,
    /// Most recently appended rows, oldest first
    pub recent: Vec<Sale>,
    /// Rows skipped while loading the history
    pub dropped_rows: usize,
}

impl SalesSummaryReport {
    /// Generate the summary from a loaded sales table
    pub fn generate(table: &Table<Sale>, recent_rows: usize) -> Self {
        let rows = &table.rows;
        let invoiced: Vec<Sale> = rows
            .iter()
            .filter(|s| s.invoiced == INVOICED_LABEL)
            .cloned()
            .collect();

        let recent_start = rows.len().saturating_sub(recent_rows);

        Self {
            total_sales: total(rows),
            total_invoiced: total(&invoiced),
            record_count: rows.len(),
            by_partner: group_sum(rows, SaleColumn::Partner),
            by_invoiced: group_sum(rows, SaleColumn::Invoiced),
            by_payment_method: group_sum(rows, SaleColumn::PaymentMethod),
            recent: rows[recent_start..].to_vec(),
            dropped_rows: table.dropped_count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        if self.is_empty() {
            return "No sales recorded yet. Use 'gestion sale add' to record the first one.\n"
                .to_string();
        }

        let mut output = String::new();

        output.push_str("Accumulated Sales Report\n");
        output.push_str(&double_separator(REPORT_WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "Total Sales:    {}\n",
            self.total_sales.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "Invoiced:       {}\n",
            self.total_invoiced.format_with_symbol(currency)
        ));
        output.push_str(&format!("Records:        {}\n", self.record_count));
        if self.dropped_rows > 0 {
            output.push_str(&format!(
                "Skipped rows:   {} (unreadable amount)\n",
                self.dropped_rows
            ));
        }

        output.push_str(&format_group_table("By Partner", &self.by_partner, currency));
        output.push_str(&format_group_table("By Invoicing", &self.by_invoiced, currency));
        output.push_str(&format_group_table(
            "By Payment Method",
            &self.by_payment_method,
            currency,
        ));

        if self.recent.is_empty() {
            return output;
        }

        output.push_str(&format!("\nLast {} sales\n", self.recent.len()));
        output.push_str(&separator(REPORT_WIDTH));
        output.push('\n');
        for sale in &self.recent {
            output.push_str(&format!(
                "{:<12} {:>14}  {:<10} {:<13} {}\n",
                sale.value(SaleColumn::Date),
                sale.amount.format_with_symbol(currency),
                sale.payment_method,
                sale.invoiced,
                truncate(&sale.partner, 20)
            ));
        }

        output
    }

    /// Export the aggregates to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> GestionResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["Dimension", "Group", "Amount", "Count"])?;

        let sections = [
            ("Partner", &self.by_partner),
            ("Invoiced", &self.by_invoiced),
            ("Payment Method", &self.by_payment_method),
        ];
        for (dimension, groups) in sections {
            for group in groups {
                csv_writer.write_record([
                    dimension,
                    group.key.as_str(),
                    &group.total.to_plain_string(),
                    &group.count.to_string(),
                ])?;
            }
        }

        csv_writer.write_record([
            "Total",
            "",
            &self.total_sales.to_plain_string(),
            &self.record_count.to_string(),
        ])?;

        csv_writer
            .flush()
            .map_err(|e| GestionError::Export(e.to_string()))?;

        Ok(())
    }
}
