//! Sale service
//!
//! Validates submitted sales and appends them to the sales history.

use tracing::{info, warn};

use crate::error::{GestionError, GestionResult};
use crate::models::{NewSale, Sale};
use crate::storage::{LoadOutcome, Storage, Table};

/// Service for recording sales
pub struct SaleService<'a> {
    storage: &'a Storage,
}

impl<'a> SaleService<'a> {
    /// Create a new sale service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new sale and return the refreshed history
    ///
    /// Validation runs before the file is touched.
    pub fn record(&self, input: &NewSale) -> GestionResult<Table<Sale>> {
        input
            .validate()
            .map_err(|e| GestionError::Validation(e.to_string()))?;

        let sale = Sale::from_input(input);
        let table = self.storage.sales.append(sale)?;

        info!(
            amount = %input.amount,
            rows = table.len(),
            "Recorded sale"
        );
        Ok(table)
    }

    /// Record several sales with a single save
    ///
    /// Every input is validated first; one invalid sale rejects the batch.
    pub fn record_batch(&self, inputs: &[NewSale]) -> GestionResult<Table<Sale>> {
        for (index, input) in inputs.iter().enumerate() {
            input.validate().map_err(|e| {
                GestionError::Validation(format!("Sale {}: {}", index + 1, e))
            })?;
        }

        let sales = inputs.iter().map(Sale::from_input).collect();
        let table = self.storage.sales.append_batch(sales)?;

        info!(count = inputs.len(), rows = table.len(), "Recorded sales batch");
        Ok(table)
    }

    /// Load the sales history
    pub fn load(&self) -> LoadOutcome<Table<Sale>> {
        let outcome = self.storage.sales.load();
        if let Some(error) = &outcome.error {
            warn!("Sales history could not be read: {}", error);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::GestionPaths;
    use crate::models::{Money, SaleColumn};
    use crate::reports::{group_sum, total};
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = GestionPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    fn new_sale(cents: i64) -> NewSale {
        NewSale {
            date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            amount: Money::from_cents(cents),
            payment_method_code: "t".into(),
            invoiced: true,
            partner_code: "f".into(),
        }
    }

    #[test]
    fn test_record_on_empty_store() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SaleService::new(&storage);

        let table = service.record(&new_sale(15000)).unwrap();

        assert_eq!(total(&table.rows), Money::from_cents(15000));
        let by_partner = group_sum(&table.rows, SaleColumn::Partner);
        assert_eq!(by_partner.len(), 1);
        assert_eq!(by_partner[0].key, "Fernando");
        assert_eq!(by_partner[0].total, Money::from_cents(15000));
    }

    #[test]
    fn test_round_trip_keeps_previous_rows() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SaleService::new(&storage);

        service.record(&new_sale(100)).unwrap();
        let before = service.load().into_result().unwrap();
        service.record(&new_sale(200)).unwrap();
        let after = service.load().into_result().unwrap();

        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(after.rows[..before.len()], before.rows[..]);
        assert_eq!(after.rows[1].amount, Money::from_cents(200));
    }

    #[test]
    fn test_non_positive_amount_leaves_file_unchanged() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SaleService::new(&storage);

        service.record(&new_sale(500)).unwrap();
        let before = fs::read(storage.sales.path()).unwrap();

        let err = service.record(&new_sale(0)).unwrap_err();
        assert!(err.is_validation());
        let err = service.record(&new_sale(-100)).unwrap_err();
        assert!(err.is_validation());

        assert_eq!(fs::read(storage.sales.path()).unwrap(), before);
    }

    #[test]
    fn test_invalid_batch_writes_nothing() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SaleService::new(&storage);

        let result = service.record_batch(&[new_sale(100), new_sale(0)]);
        assert!(result.is_err());
        assert!(!storage.sales.path().exists());

        let table = service.record_batch(&[new_sale(100), new_sale(250)]).unwrap();
        assert_eq!(table.len(), 2);
    }
}
