//! CSV Export functionality
//!
//! Exports history tables and grouped totals to CSV format.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{GestionError, GestionResult};
use crate::models::Record;
use crate::reports::GroupTotal;

/// Default file name for an exported history, e.g. `sales_history_20250110.csv`
pub fn history_export_filename(kind: &str, date: NaiveDate) -> String {
    format!("{}_history_{}.csv", kind, date.format("%Y%m%d"))
}

/// Export every row of a table, header first
pub fn export_records_csv<R: Record, W: Write>(rows: &[R], writer: &mut W) -> GestionResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(R::HEADERS)?;
    for row in rows {
        csv_writer.write_record(row.to_row())?;
    }

    csv_writer
        .flush()
        .map_err(|e| GestionError::Export(e.to_string()))?;
    Ok(())
}

/// Export a table to a new file at `path`
pub fn export_records_file<R: Record>(rows: &[R], path: &Path) -> GestionResult<()> {
    let file = File::create(path).map_err(|e| {
        GestionError::Export(format!("Cannot create {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    export_records_csv(rows, &mut writer)?;
    writer
        .flush()
        .map_err(|e| GestionError::Export(e.to_string()))?;
    Ok(())
}

/// Export grouped totals with the group column named `group_header`
pub fn export_group_totals_csv<W: Write>(
    group_header: &str,
    groups: &[GroupTotal],
    writer: &mut W,
) -> GestionResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record([group_header, "Amount", "Count"])?;
    for group in groups {
        csv_writer.write_record([
            group.key.as_str(),
            &group.total.to_plain_string(),
            &group.count.to_string(),
        ])?;
    }

    csv_writer
        .flush()
        .map_err(|e| GestionError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, Money, NewExpense, NewSale, Sale};
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_history_export_filename() {
        assert_eq!(
            history_export_filename("sales", date(2025, 1, 10)),
            "sales_history_20250110.csv"
        );
    }

    #[test]
    fn test_export_sales_csv() {
        let sale = Sale::from_input(&NewSale {
            date: date(2025, 1, 10),
            amount: Money::from_cents(15000),
            payment_method_code: "t".into(),
            invoiced: true,
            partner_code: "f".into(),
        });

        let mut output = Vec::new();
        export_records_csv(&[sale], &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Date,Amount,Payment Method,Invoiced,Partner\n2025-01-10,150.00,Transfer,Invoiced,Fernando\n"
        );
    }

    #[test]
    fn test_export_quotes_fields() {
        let expense = Expense::from_input(
            &NewExpense {
                expense_type: "Servicio".into(),
                provider: "Luz, Agua y Gas".into(),
                amount: Money::from_cents(100),
                due_date: date(2025, 2, 1),
                invoiced: false,
            },
            date(2025, 1, 1),
        );

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.csv");
        export_records_file(&[expense], &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"Luz, Agua y Gas\""));
    }

    #[test]
    fn test_export_group_totals() {
        let groups = vec![GroupTotal {
            key: "Fernando".into(),
            total: Money::from_cents(15000),
            count: 1,
        }];

        let mut output = Vec::new();
        export_group_totals_csv("Partner", &groups, &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Partner,Amount,Count\nFernando,150.00,1\n"
        );
    }
}
