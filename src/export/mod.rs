//! Export module for FinanceFlow
//!
//! - CSV: active transactions and the monthly archive (spreadsheet-compatible)
//! - JSON: machine-readable full state export
//! - YAML: human-readable full state export

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_archive_csv, export_transactions_csv};
pub use json::{export_full_json, read_json_export, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_full_yaml, read_yaml_export};
