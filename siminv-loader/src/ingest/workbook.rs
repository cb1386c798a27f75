//! Workbook and sheet processing
//!
//! Iterates the recognized sheets of an inventory workbook, builds a
//! record per data row and accumulates one flat batch across all sheets.
//! The calamine boundary is kept thin: [`process_sheet`] works on
//! in-memory headers and rows, so the sheet walk is testable without a
//! workbook file.

use crate::error::{LoaderError, Result};
use crate::ingest::builder::{build_record, RowOutcome};
use crate::ingest::file_date::file_date_for;
use crate::mappings::Platform;
use crate::models::{CellValue, RawRow, UnifiedRecord};
use calamine::{open_workbook, Reader, Xlsx};
use chrono::NaiveDate;
use std::path::Path;
use tracing::{debug, info, warn};

/// A rejected row, retained with its source platform for reporting
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidRow {
    pub platform: Platform,
    pub row: RawRow,
}

/// Accumulated output of one workbook run
#[derive(Debug, Clone)]
pub struct IngestBatch {
    /// Batch date shared by every record of this workbook
    pub file_date: String,
    /// Valid records, flat across sheets (sheet order x row order)
    pub records: Vec<UnifiedRecord>,
    /// Rows rejected for a missing account
    pub invalid: Vec<InvalidRow>,
    /// Cumulative data-row count across all recognized sheets
    pub total_rows: usize,
    /// Sheets with no platform mapping, skipped without error
    pub skipped_sheets: Vec<String>,
}

impl IngestBatch {
    pub fn new(file_date: String) -> Self {
        Self {
            file_date,
            records: Vec::new(),
            invalid: Vec::new(),
            total_rows: 0,
            skipped_sheets: Vec::new(),
        }
    }
}

/// Process one recognized sheet's rows into the batch.
///
/// `headers` is the sheet's first row rendered to text; every element of
/// `rows` is one data row in sheet order. Each data row bumps the total
/// counter exactly once, valid or not.
pub fn process_sheet<I>(platform: Platform, headers: &[String], rows: I, batch: &mut IngestBatch)
where
    I: IntoIterator<Item = Vec<CellValue>>,
{
    let file_date = batch.file_date.clone();
    let mut sheet_rows = 0usize;

    for cells in rows {
        batch.total_rows += 1;
        sheet_rows += 1;
        let row = RawRow::new(headers, cells);
        match build_record(row, platform, &file_date) {
            RowOutcome::Valid(record) => {
                debug!(platform = platform.origin(), account = %record.account_id, "Row normalized");
                batch.records.push(record);
            }
            RowOutcome::Invalid(row) => {
                warn!(platform = platform.origin(), ?row, "Row rejected: account missing");
                batch.invalid.push(InvalidRow { platform, row });
            }
        }
    }

    info!(
        platform = platform.origin(),
        rows = sheet_rows,
        "Sheet processed"
    );
}

/// Process every recognized sheet of the workbook at `path`.
///
/// The batch date is derived once from the file name (falling back to
/// `run_date`) and reused for every sheet and row. Sheets whose name has
/// no platform mapping are skipped and recorded as a diagnostic; they
/// contribute nothing to any count.
pub fn process_workbook(path: &Path, run_date: NaiveDate) -> Result<IngestBatch> {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_date = file_date_for(&filename, run_date);
    info!(workbook = %filename, file_date = %file_date, "Processing workbook");

    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e| LoaderError::Workbook(format!("{}: {}", path.display(), e)))?;

    let mut batch = IngestBatch::new(file_date);

    for sheet_name in workbook.sheet_names().to_vec() {
        let Some(platform) = Platform::from_sheet_name(&sheet_name) else {
            warn!(sheet = %sheet_name, "Sheet not recognized, skipping");
            batch.skipped_sheets.push(sheet_name);
            continue;
        };

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| LoaderError::Workbook(format!("{}: {}", sheet_name, e)))?;

        let mut rows = range.rows();
        // First row is the header; a headerless sheet contributes nothing
        let Some(header_row) = rows.next() else {
            continue;
        };
        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| CellValue::from(cell).as_text().unwrap_or_default())
            .collect();

        let data_rows = rows.map(|row| row.iter().map(CellValue::from).collect::<Vec<_>>());
        process_sheet(platform, &headers, data_rows, &mut batch);
    }

    info!(
        total_rows = batch.total_rows,
        valid = batch.records.len(),
        invalid = batch.invalid.len(),
        skipped_sheets = batch.skipped_sheets.len(),
        "Workbook processed"
    );

    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wialon_headers() -> Vec<String> {
        ["Nombre", "Cuenta", "Teléfono"]
            .iter()
            .map(|h| h.to_string())
            .collect()
    }

    #[test]
    fn test_sheet_accumulates_valid_and_invalid() {
        let mut batch = IngestBatch::new("2024-03-05".to_string());
        let rows = vec![
            vec![
                CellValue::Text("Unit 1".into()),
                CellValue::Text("ACME".into()),
                CellValue::Text("555-1234".into()),
            ],
            vec![
                CellValue::Text("Unit 2".into()),
                CellValue::Empty,
                CellValue::Text("555-5678".into()),
            ],
        ];
        process_sheet(Platform::Wialon, &wialon_headers(), rows, &mut batch);

        assert_eq!(batch.total_rows, 2);
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.invalid.len(), 1);
        assert_eq!(batch.records[0].origin, "WIALON");
        assert_eq!(batch.records[0].file_date, "2024-03-05");
        assert_eq!(batch.invalid[0].platform, Platform::Wialon);
    }

    #[test]
    fn test_batch_is_flat_across_sheets_in_order() {
        let mut batch = IngestBatch::new("2024-03-05".to_string());
        process_sheet(
            Platform::Wialon,
            &wialon_headers(),
            vec![vec![
                CellValue::Text("Unit 1".into()),
                CellValue::Text("ACME".into()),
                CellValue::Empty,
            ]],
            &mut batch,
        );
        let adas_headers: Vec<String> = ["equipo", "Subordinar"]
            .iter()
            .map(|h| h.to_string())
            .collect();
        process_sheet(
            Platform::Adas,
            &adas_headers,
            vec![vec![
                CellValue::Text("Tracker 9".into()),
                CellValue::Text("Fleet-B".into()),
            ]],
            &mut batch,
        );

        assert_eq!(batch.total_rows, 2);
        let origins: Vec<&str> = batch.records.iter().map(|r| r.origin.as_str()).collect();
        assert_eq!(origins, vec!["WIALON", "ADAS"]);
        // One file date for the whole batch
        assert!(batch.records.iter().all(|r| r.file_date == "2024-03-05"));
    }

    #[test]
    fn test_short_rows_are_padded_to_the_header() {
        let mut batch = IngestBatch::new("2024-03-05".to_string());
        let rows = vec![vec![
            CellValue::Text("Unit 1".into()),
            CellValue::Text("ACME".into()),
            // Teléfono column missing entirely
        ]];
        process_sheet(Platform::Wialon, &wialon_headers(), rows, &mut batch);

        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].phone, None);
    }

    #[test]
    fn test_empty_sheet_contributes_nothing() {
        let mut batch = IngestBatch::new("2024-03-05".to_string());
        process_sheet(Platform::Wialon, &wialon_headers(), Vec::new(), &mut batch);

        assert_eq!(batch.total_rows, 0);
        assert!(batch.records.is_empty());
        assert!(batch.invalid.is_empty());
    }
}
