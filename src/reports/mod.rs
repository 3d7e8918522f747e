//! Reports module for gestion-sol
//!
//! Aggregation primitives over loaded tables plus the sales summary and the
//! expense due-date report built on top of them.

pub mod aggregate;
pub mod expense_due;
pub mod sales_summary;

pub use aggregate::{
    group_sum, overdue_partition, overdue_partition_today, total, DuePartition, DueStatus,
    GroupTotal,
};
pub use expense_due::{DueEntry, ExpenseDueReport};
pub use sales_summary::SalesSummaryReport;
