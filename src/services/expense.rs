//! Expense service
//!
//! Validates submitted expenses and appends them to the expenses history,
//! stamped with the registration day.

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::error::{GestionError, GestionResult};
use crate::models::{Expense, NewExpense};
use crate::storage::{LoadOutcome, Storage, Table};

/// Service for recording expenses
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new expense registered today
    pub fn record(&self, input: &NewExpense) -> GestionResult<Table<Expense>> {
        self.record_on(input, Local::now().date_naive())
    }

    /// Record a new expense with an explicit registration day
    pub fn record_on(&self, input: &NewExpense, today: NaiveDate) -> GestionResult<Table<Expense>> {
        input
            .validate()
            .map_err(|e| GestionError::Validation(e.to_string()))?;

        let expense = Expense::from_input(input, today);
        let table = self.storage.expenses.append(expense)?;

        info!(
            provider = %input.provider.trim(),
            amount = %input.amount,
            "Recorded expense"
        );
        Ok(table)
    }

    /// Load the expenses history
    pub fn load(&self) -> LoadOutcome<Table<Expense>> {
        let outcome = self.storage.expenses.load();
        if let Some(error) = &outcome.error {
            warn!("Expenses history could not be read: {}", error);
        }
        outcome
    }
}
