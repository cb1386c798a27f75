//! The normalization pipeline
//!
//! Workbook reading, per-row record building and batch accumulation.

pub mod builder;
pub mod file_date;
pub mod phone;
pub mod workbook;

pub use builder::{build_record, RowOutcome};
pub use file_date::{embedded_date, file_date_for};
pub use phone::normalize_phone;
pub use workbook::{process_sheet, process_workbook, IngestBatch, InvalidRow};
