//! Expense Due Report
//!
//! Pending and overdue expenses relative to a reference day, with pending
//! totals broken down by expense type and invoicing status.

use std::io::Write;

use chrono::NaiveDate;

use crate::display::report::{
    double_separator, format_group_table, separator, truncate, REPORT_WIDTH,
};
use crate::error::{GestionError, GestionResult};
use crate::models::{Expense, ExpenseColumn, Money};
use crate::storage::Table;

use super::aggregate::{group_sum, overdue_partition, DueStatus, GroupTotal};

/// One line of the due list
#[derive(Debug, Clone)]
pub struct DueEntry {
    pub status: DueStatus,
    pub expense: Expense,
}

/// Expense Due Report
#[derive(Debug, Clone)]
pub struct ExpenseDueReport {
    pub as_of: NaiveDate,
    /// Sum of expenses due on or after `as_of`
    pub pending_total: Money,
    /// Sum of expenses due before `as_of`
    pub overdue_total: Money,
    pub record_count: usize,
    pub overdue_count: usize,
    /// Pending expenses by type
    pub pending_by_type: Vec<GroupTotal>,
    /// Pending expenses by invoicing status
    pub pending_by_invoiced: Vec<GroupTotal>,
    /// Overdue first, then pending, each ascending by due date
    pub entries: Vec<DueEntry>,
    pub dropped_rows: usize,
}

impl ExpenseDueReport {
    /// Generate the report for the given reference day
    pub fn generate(table: &Table<Expense>, as_of: NaiveDate) -> Self {
        let partition = overdue_partition(table, as_of);

        let entries = partition
            .display_order()
            .map(|(status, expense)| DueEntry {
                status,
                expense: expense.clone(),
            })
            .collect();

        Self {
            as_of,
            pending_total: partition.pending_total(),
            overdue_total: partition.overdue_total(),
            record_count: table.len(),
            overdue_count: partition.overdue.len(),
            pending_by_type: group_sum(&partition.pending, ExpenseColumn::ExpenseType),
            pending_by_invoiced: group_sum(&partition.pending, ExpenseColumn::Invoiced),
            entries,
            dropped_rows: table.dropped_count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    /// Format the report for terminal display
    ///
    /// `date_format` is a chrono format string used for the due date column.
    pub fn format_terminal(&self, currency: &str, date_format: &str) -> String {
        if self.is_empty() {
            return "No expenses recorded yet. Use 'gestion expense add' to record the first one.\n"
                .to_string();
        }

        let mut output = String::new();

        output.push_str(&format!(
            "Expenses Report (as of {})\n",
            self.as_of.format(date_format)
        ));
        output.push_str(&double_separator(REPORT_WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "Pending:        {}\n",
            self.pending_total.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "Overdue:        {} ({} expenses)\n",
            self.overdue_total.format_with_symbol(currency),
            self.overdue_count
        ));
        output.push_str(&format!("Records:        {}\n", self.record_count));
        if self.dropped_rows > 0 {
            output.push_str(&format!(
                "Skipped rows:   {} (unreadable amount)\n",
                self.dropped_rows
            ));
        }

        output.push_str(&format_group_table(
            "Pending by Expense Type",
            &self.pending_by_type,
            currency,
        ));
        output.push_str(&format_group_table(
            "Pending by Invoicing",
            &self.pending_by_invoiced,
            currency,
        ));

        output.push_str("\nDue Dates\n");
        output.push_str(&separator(REPORT_WIDTH));
        output.push('\n');
        for entry in &self.entries {
            output.push_str(&format!(
                "{:<8} {:<11} {:>14}  {:<16} {}\n",
                entry.status.label(),
                format_due(entry.expense.due_date, date_format),
                entry.expense.amount.format_with_symbol(currency),
                truncate(&entry.expense.provider, 16),
                entry.expense.expense_type
            ));
        }

        output
    }

    /// Export the due list to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W, date_format: &str) -> GestionResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "Status",
            "Due Date",
            "Provider",
            "Expense Type",
            "Amount",
            "Invoiced",
        ])?;

        for entry in &self.entries {
            csv_writer.write_record([
                entry.status.label(),
                &format_due(entry.expense.due_date, date_format),
                &entry.expense.provider,
                &entry.expense.expense_type,
                &entry.expense.amount.to_plain_string(),
                &entry.expense.invoiced,
            ])?;
        }

        csv_writer
            .flush()
            .map_err(|e| GestionError::Export(e.to_string()))?;

        Ok(())
    }
}

fn format_due(date: Option<NaiveDate>, date_format: &str) -> String {
    date.map(|d| d.format(date_format).to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewExpense;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(kind: &str, due: NaiveDate, cents: i64, invoiced: bool) -> Expense {
        Expense::from_input(
            &NewExpense {
                expense_type: kind.into(),
                provider: "EPEC".into(),
                amount: Money::from_cents(cents),
                due_date: due,
                invoiced,
            },
            date(2024, 12, 20),
        )
    }

    #[test]
    fn test_due_order_and_totals() {
        let table = Table::from_rows(vec![
            expense("Servicio", date(2030, 1, 1), 20000, false),
            expense("Servicio", date(2025, 1, 1), 10000, true),
        ]);

        let report = ExpenseDueReport::generate(&table, date(2025, 6, 1));

        assert_eq!(report.entries[0].status, DueStatus::Overdue);
        assert_eq!(report.entries[0].expense.due_date, Some(date(2025, 1, 1)));
        assert_eq!(report.entries[1].status, DueStatus::Pending);
        assert_eq!(report.overdue_total, Money::from_cents(10000));
        assert_eq!(report.pending_total, Money::from_cents(20000));
        assert_eq!(report.overdue_count, 1);

        // overdue rows do not count toward pending breakdowns
        assert_eq!(report.pending_by_type.len(), 1);
        assert_eq!(report.pending_by_type[0].total, Money::from_cents(20000));
        assert_eq!(report.pending_by_invoiced[0].key, "Not Invoiced");
    }

    #[test]
    fn test_format_terminal() {
        let table = Table::from_rows(vec![expense("Mercadería", date(2025, 1, 1), 123450, true)]);
        let output =
            ExpenseDueReport::generate(&table, date(2025, 6, 1)).format_terminal("$", "%d-%m-%Y");

        assert!(output.contains("OVERDUE"));
        assert!(output.contains("01-01-2025"));
        assert!(output.contains("$1,234.50"));
    }

    #[test]
    fn test_empty_report() {
        let report = ExpenseDueReport::generate(&Table::empty(), date(2025, 6, 1));
        assert!(report.is_empty());
        assert_eq!(report.pending_total, Money::zero());
        assert!(report
            .format_terminal("$", "%d-%m-%Y")
            .contains("No expenses recorded yet"));
    }

    #[test]
    fn test_export_csv() {
        let table = Table::from_rows(vec![expense("Servicio", date(2030, 1, 1), 5000, false)]);
        let report = ExpenseDueReport::generate(&table, date(2025, 6, 1));

        let mut output = Vec::new();
        report.export_csv(&mut output, "%d-%m-%Y").unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.contains("PENDING,01-01-2030,EPEC,Servicio,50.00,Not Invoiced"));
    }
}
