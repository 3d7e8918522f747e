//! gestion-sol - Sales and expense bookkeeping for a small business
//!
//! This library records sales and expenses into flat CSV tables, keeps the
//! expense-type and provider catalogs used to fill in new expenses, and
//! computes the totals, group-by sums and due-date lists shown by the
//! `gestion` command-line tool.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Sale and expense records, labels and money amounts
//! - `storage`: CSV history tables and catalog files
//! - `services`: Validation, catalog rules and bulk upload
//! - `reports`: Aggregation and report generation
//! - `export`: CSV export
//! - `display`: Terminal formatting helpers
//! - `cli`: Command handlers for the `gestion` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use gestion_sol::config::{paths::GestionPaths, settings::Settings};
//! use gestion_sol::storage::Storage;
//!
//! let paths = GestionPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{GestionError, GestionResult};
