//! Daily store operations for normalized records

pub mod records;

pub use records::{count_records, insert_record, insert_records, InsertOutcome};
