//! Core data models for gestion-sol
//!
//! This module contains the data structures of the bookkeeping domain:
//! sales, expenses, money amounts and the label lookups for coded fields.

pub mod expense;
pub mod labels;
pub mod money;
pub mod record;
pub mod sale;

pub use expense::{Expense, ExpenseColumn, ExpenseValidationError, NewExpense};
pub use labels::{Partner, PaymentMethod, UNKNOWN_LABEL};
pub use money::Money;
pub use record::{RawRow, Record, RowRejection};
pub use sale::{NewSale, Sale, SaleColumn, SaleValidationError};
