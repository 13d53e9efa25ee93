//! Export module for FlowLedger
//!
//! - CSV: the accounting report and the transaction list (spreadsheet-compatible)
//! - JSON: machine-readable export of the full book

pub mod csv;
pub mod json;

pub use self::csv::{export_accounting_csv, export_transactions_csv, ACCOUNTING_CSV_HEADER};
pub use json::{export_full_json, FullExport, EXPORT_SCHEMA_VERSION};
