//! Display formatting for terminal output
//!
//! Provides utilities for formatting catalogs and report tables for the
//! terminal.

pub mod catalog;
pub mod report;

pub use catalog::{format_name_list, format_provider_tree};
