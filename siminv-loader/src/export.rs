//! CSV extracts for the presentation layer
//!
//! Tabular renderings of the run outputs: record lists (optionally
//! filtered by account, device type or origin) and rejected rows with
//! their source layout.

use crate::error::Result;
use crate::ingest::InvalidRow;
use crate::models::{UnifiedField, UnifiedRecord};
use std::io::Write;

/// Conjunctive record filter; `None` means "don't filter on this"
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub account: Option<String>,
    pub device_type: Option<String>,
    pub origin: Option<String>,
}

impl RecordFilter {
    pub fn matches(&self, record: &UnifiedRecord) -> bool {
        let field_matches = |wanted: &Option<String>, value: Option<&str>| match wanted {
            Some(wanted) => value == Some(wanted.as_str()),
            None => true,
        };
        field_matches(&self.account, Some(&record.account_id))
            && field_matches(&self.device_type, record.device_type.as_deref())
            && field_matches(&self.origin, Some(&record.origin))
    }

    /// Apply the filter to a record list
    pub fn apply<'a>(&self, records: &'a [UnifiedRecord]) -> Vec<&'a UnifiedRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Write records as CSV: the 15 unified columns in canonical order,
/// absence rendered as an empty field.
pub fn write_records_csv<W: Write>(writer: W, records: &[UnifiedRecord]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record(UnifiedField::ALL.iter().map(|f| f.column_name()))?;
    for record in records {
        csv.write_record(
            UnifiedField::ALL
                .iter()
                .map(|&field| record.field(field).unwrap_or("")),
        )?;
    }
    csv.flush()?;
    Ok(())
}

/// Write rejected rows of one platform as CSV, under their source
/// headers.
///
/// All rows must come from the same sheet layout; the first row supplies
/// the header. An empty slice writes nothing.
pub fn write_invalid_rows_csv<W: Write>(writer: W, rows: &[InvalidRow]) -> Result<()> {
    let Some(first) = rows.first() else {
        return Ok(());
    };

    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(
        std::iter::once("platform").chain(first.row.headers()),
    )?;
    for invalid in rows {
        let values: Vec<String> = std::iter::once(invalid.platform.origin().to_string())
            .chain(
                invalid
                    .row
                    .values()
                    .map(|cell| cell.as_text().unwrap_or_default()),
            )
            .collect();
        csv.write_record(&values)?;
    }
    csv.flush()?;
    Ok(())
}
