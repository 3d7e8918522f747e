//! Expense model
//!
//! One row of the expenses history table: a bill from a provider with a due date.

use chrono::NaiveDate;

use super::labels::invoiced_label;
use super::record::{format_date, RawRow, Record, RowRejection};
use super::Money;

/// Columns of the expenses table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseColumn {
    RegistrationDate,
    ExpenseType,
    Provider,
    Amount,
    DueDate,
    Invoiced,
}

impl ExpenseColumn {
    /// Header text of the column
    pub fn header(&self) -> &'static str {
        match self {
            Self::RegistrationDate => "Registration Date",
            Self::ExpenseType => "Expense Type",
            Self::Provider => "Provider",
            Self::Amount => "Amount",
            Self::DueDate => "Due Date",
            Self::Invoiced => "Invoiced",
        }
    }
}

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    pub registration_date: Option<NaiveDate>,
    pub expense_type: String,
    pub provider: String,
    pub amount: Money,
    pub due_date: Option<NaiveDate>,
    pub invoiced: String,
}

impl Expense {
    /// Build an expense from form input registered on `today`
    pub fn from_input(input: &NewExpense, today: NaiveDate) -> Self {
        Self {
            registration_date: Some(today),
            expense_type: input.expense_type.trim().to_string(),
            provider: input.provider.trim().to_string(),
            amount: input.amount,
            due_date: Some(input.due_date),
            invoiced: invoiced_label(input.invoiced).to_string(),
        }
    }

    /// Whether the expense is past due on `as_of`
    ///
    /// Expenses without a due date are never overdue.
    pub fn is_overdue(&self, as_of: NaiveDate) -> bool {
        self.due_date.map(|due| due < as_of).unwrap_or(false)
    }
}

impl Record for Expense {
    type Column = ExpenseColumn;

    const NAME: &'static str = "expenses";

    const HEADERS: &'static [&'static str] = &[
        "Registration Date",
        "Expense Type",
        "Provider",
        "Amount",
        "Due Date",
        "Invoiced",
    ];

    const AMOUNT_HEADER: &'static str = "Amount";

    fn amount(&self) -> Money {
        self.amount
    }

    fn value(&self, column: ExpenseColumn) -> String {
        match column {
            ExpenseColumn::RegistrationDate => format_date(self.registration_date),
            ExpenseColumn::ExpenseType => self.expense_type.clone(),
            ExpenseColumn::Provider => self.provider.clone(),
            ExpenseColumn::Amount => self.amount.to_plain_string(),
            ExpenseColumn::DueDate => format_date(self.due_date),
            ExpenseColumn::Invoiced => self.invoiced.clone(),
        }
    }

    fn from_row(row: &RawRow<'_>) -> Result<Self, RowRejection> {
        if row.is_blank() {
            return Err(RowRejection::Blank);
        }

        Ok(Self {
            registration_date: row.date(ExpenseColumn::RegistrationDate.header()),
            expense_type: row.text(ExpenseColumn::ExpenseType.header()),
            provider: row.text(ExpenseColumn::Provider.header()),
            amount: row.amount(Self::AMOUNT_HEADER)?,
            due_date: row.date(ExpenseColumn::DueDate.header()),
            invoiced: row.text(ExpenseColumn::Invoiced.header()),
        })
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            format_date(self.registration_date),
            self.expense_type.clone(),
            self.provider.clone(),
            self.amount.to_plain_string(),
            format_date(self.due_date),
            self.invoiced.clone(),
        ]
    }
}

/// Fields submitted for a new expense
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub expense_type: String,
    pub provider: String,
    pub amount: Money,
    pub due_date: NaiveDate,
    pub invoiced: bool,
}

impl NewExpense {
    /// Check the submitted fields before anything is written
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }

        if self.provider.trim().is_empty() {
            return Err(ExpenseValidationError::MissingProvider);
        }

        if self.expense_type.trim().is_empty() {
            return Err(ExpenseValidationError::MissingExpenseType);
        }

        Ok(())
    }
}

/// Validation errors for new expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount(Money),
    MissingProvider,
    MissingExpenseType,
}

impl std::fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Expense amount must be greater than zero (got {})", amount)
            }
            Self::MissingProvider => write!(f, "A provider must be selected"),
            Self::MissingExpenseType => write!(f, "An expense type must be selected"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
