//! Data model for the normalization pipeline

pub mod cell;
pub mod record;

pub use cell::{CellValue, RawRow};
pub use record::{UnifiedField, UnifiedRecord};
