//! Upload export bundle
//!
//! The detail of an uploaded batch plus its three aggregates, one CSV file
//! each, and a copy of the running sales history.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::error::{GestionError, GestionResult};
use crate::models::{Sale, SaleColumn};
use crate::reports::group_sum;

use super::csv::{
    export_group_totals_csv, export_records_csv, export_records_file, history_export_filename,
};

/// Write the bundle for sales uploaded on `date` into `dir`
///
/// Returns the paths written, detail first and history last.
pub fn write_upload_bundle(
    dir: &Path,
    date: NaiveDate,
    uploaded: &[Sale],
    history: &[Sale],
) -> GestionResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|e| {
        GestionError::Export(format!("Cannot create {}: {}", dir.display(), e))
    })?;

    let stamp = date.format("%Y%m%d");
    let mut written = Vec::new();

    let detail = dir.join(format!("upload_{}_detail.csv", stamp));
    export_records_file(uploaded, &detail)?;
    written.push(detail);

    let aggregates = [
        ("by_partner", SaleColumn::Partner),
        ("by_invoiced", SaleColumn::Invoiced),
        ("by_payment_method", SaleColumn::PaymentMethod),
    ];
    for (suffix, column) in aggregates {
        let path = dir.join(format!("upload_{}_{}.csv", stamp, suffix));
        let mut writer = BufWriter::new(create(&path)?);
        export_group_totals_csv(column.header(), &group_sum(uploaded, column), &mut writer)?;
        written.push(path);
    }

    let history_path = dir.join(history_export_filename("sales", date));
    let mut writer = BufWriter::new(create(&history_path)?);
    export_records_csv(history, &mut writer)?;
    written.push(history_path);

    info!("Wrote upload bundle with {} files to {}", written.len(), dir.display());
    Ok(written)
}

fn create(path: &Path) -> GestionResult<File> {
    File::create(path)
        .map_err(|e| GestionError::Export(format!("Cannot create {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewSale};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_bundle_files() {
        let temp_dir = TempDir::new().unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let sale = Sale::from_input(&NewSale {
            date,
            amount: Money::from_cents(2000),
            payment_method_code: "e".into(),
            invoiced: false,
            partner_code: "n".into(),
        });

        let written = write_upload_bundle(temp_dir.path(), date, &[sale.clone()], &[sale]).unwrap();

        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "upload_20250314_detail.csv",
                "upload_20250314_by_partner.csv",
                "upload_20250314_by_invoiced.csv",
                "upload_20250314_by_payment_method.csv",
                "sales_history_20250314.csv",
            ]
        );

        let by_partner = fs::read_to_string(&written[1]).unwrap();
        assert_eq!(by_partner, "Partner,Amount,Count\nIgnacio (Nacho),20.00,1\n");
    }
}
