//! Service layer for gestion-sol
//!
//! The service layer provides business logic on top of the storage layer:
//! validation before any write, catalog rules, and the bulk upload.

pub mod catalog;
pub mod expense;
pub mod sale;
pub mod upload;

pub use catalog::{CatalogContext, CatalogService};
pub use expense::ExpenseService;
pub use sale::SaleService;
pub use upload::{date_from_filename, SalesUpload, SkippedRow, UploadReport, UploadService};
