//! Export module for gestion-sol
//!
//! Provides CSV export of the history tables, grouped totals and the bundle
//! produced by a bulk upload.

pub mod bundle;
pub mod csv;

pub use bundle::write_upload_bundle;
pub use self::csv::{
    export_group_totals_csv, export_records_csv, export_records_file, history_export_filename,
};
