//! Ingestion run reporting
//!
//! Data consumed by the presentation layer: run totals, the inserted and
//! duplicate-rejected record lists, per-platform shares and per-field
//! completeness. Everything here is derived; the pipeline never reads it
//! back.

use crate::ingest::IngestBatch;
use crate::mappings::Platform;
use crate::models::{UnifiedField, UnifiedRecord};
use serde::Serialize;

/// Completeness of one unified field across a platform's records
#[derive(Debug, Clone, Serialize)]
pub struct FieldCompleteness {
    pub field: &'static str,
    pub non_empty: usize,
    pub empty: usize,
    pub completeness_pct: f64,
}

/// One platform's share of the run
#[derive(Debug, Clone, Serialize)]
pub struct PlatformSummary {
    pub platform: &'static str,
    pub records: usize,
    /// Share of the run's total row count, one decimal
    pub share_pct: f64,
    pub mapped_columns: usize,
    pub fields: Vec<FieldCompleteness>,
}

/// Summary of one ingestion run
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub file_date: String,
    pub total_rows: usize,
    pub inserted_count: usize,
    pub duplicate_count: usize,
    pub invalid_rows: usize,
    pub skipped_sheets: Vec<String>,
    pub platforms: Vec<PlatformSummary>,
    /// Records written this run (empty in bulk mode, where only the
    /// count is known)
    pub inserted: Vec<UnifiedRecord>,
    /// Records rejected as duplicates this run (empty in bulk mode)
    pub duplicates: Vec<UnifiedRecord>,
}

impl IngestReport {
    /// Build a report from per-record insert outcomes
    pub fn from_outcomes(
        batch: &IngestBatch,
        inserted: Vec<UnifiedRecord>,
        duplicates: Vec<UnifiedRecord>,
    ) -> Self {
        Self {
            file_date: batch.file_date.clone(),
            total_rows: batch.total_rows,
            inserted_count: inserted.len(),
            duplicate_count: duplicates.len(),
            invalid_rows: batch.invalid.len(),
            skipped_sheets: batch.skipped_sheets.clone(),
            platforms: platform_summaries(batch),
            inserted,
            duplicates,
        }
    }

    /// Build a report from a bulk insert-or-ignore run, where only the
    /// written count is known
    pub fn from_bulk(batch: &IngestBatch, written: u64) -> Self {
        let written = written as usize;
        Self {
            file_date: batch.file_date.clone(),
            total_rows: batch.total_rows,
            inserted_count: written,
            duplicate_count: batch.records.len().saturating_sub(written),
            invalid_rows: batch.invalid.len(),
            skipped_sheets: batch.skipped_sheets.clone(),
            platforms: platform_summaries(batch),
            inserted: Vec::new(),
            duplicates: Vec::new(),
        }
    }
}

fn platform_summaries(batch: &IngestBatch) -> Vec<PlatformSummary> {
    Platform::ALL
        .iter()
        .map(|&platform| {
            let records: Vec<&UnifiedRecord> = batch
                .records
                .iter()
                .filter(|r| r.origin == platform.origin())
                .collect();
            PlatformSummary {
                platform: platform.origin(),
                records: records.len(),
                share_pct: percentage(records.len(), batch.total_rows),
                mapped_columns: platform.mapped_column_count(),
                fields: field_completeness(&records),
            }
        })
        .collect()
}

fn field_completeness(records: &[&UnifiedRecord]) -> Vec<FieldCompleteness> {
    UnifiedField::DATA_FIELDS
        .iter()
        .map(|&field| {
            let non_empty = records
                .iter()
                .filter(|r| r.field(field).is_some_and(|v| !v.trim().is_empty()))
                .count();
            FieldCompleteness {
                field: field.column_name(),
                non_empty,
                empty: records.len() - non_empty,
                completeness_pct: percentage(non_empty, records.len()),
            }
        })
        .collect()
}

/// Percentage rounded to one decimal; zero when the denominator is zero
fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64 * 1000.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::IngestBatch;

    fn record(origin: &str, name: Option<&str>, phone: Option<&str>) -> UnifiedRecord {
        UnifiedRecord {
            name: name.map(str::to_string),
            account_id: "ACME".to_string(),
            device_type: None,
            imei: None,
            iccid: None,
            activation_date: None,
            deactivation_date: None,
            last_message_time: None,
            last_report: None,
            vehicle: None,
            services: None,
            device_group: None,
            phone: phone.map(str::to_string),
            origin: origin.to_string(),
            file_date: "2024-03-05".to_string(),
        }
    }

    fn batch_with(records: Vec<UnifiedRecord>, total_rows: usize) -> IngestBatch {
        let mut batch = IngestBatch::new("2024-03-05".to_string());
        batch.records = records;
        batch.total_rows = total_rows;
        batch
    }

    #[test]
    fn test_platform_shares() {
        let batch = batch_with(
            vec![
                record("WIALON", Some("a"), None),
                record("WIALON", Some("b"), None),
                record("ADAS", Some("c"), None),
            ],
            4, // one row was invalid
        );
        let report = IngestReport::from_outcomes(&batch, batch.records.clone(), Vec::new());

        let wialon = &report.platforms[0];
        assert_eq!(wialon.platform, "WIALON");
        assert_eq!(wialon.records, 2);
        assert_eq!(wialon.share_pct, 50.0);

        let combustible = &report.platforms[2];
        assert_eq!(combustible.records, 0);
        assert_eq!(combustible.share_pct, 0.0);
    }

    #[test]
    fn test_field_completeness_counts() {
        let batch = batch_with(
            vec![
                record("WIALON", Some("a"), Some("5551234")),
                record("WIALON", None, Some("5555678")),
                record("WIALON", Some("   "), None),
            ],
            3,
        );
        let report = IngestReport::from_outcomes(&batch, Vec::new(), Vec::new());

        let fields = &report.platforms[0].fields;
        let name = fields.iter().find(|f| f.field == "name").unwrap();
        // Whitespace-only counts as empty
        assert_eq!(name.non_empty, 1);
        assert_eq!(name.empty, 2);

        let phone = fields.iter().find(|f| f.field == "phone").unwrap();
        assert_eq!(phone.non_empty, 2);
        assert_eq!(phone.completeness_pct, 66.7);

        let account = fields.iter().find(|f| f.field == "account_id").unwrap();
        assert_eq!(account.non_empty, 3);
        assert_eq!(account.completeness_pct, 100.0);
    }

    #[test]
    fn test_empty_run_has_no_divide_by_zero() {
        let batch = batch_with(Vec::new(), 0);
        let report = IngestReport::from_outcomes(&batch, Vec::new(), Vec::new());
        assert!(report
            .platforms
            .iter()
            .all(|p| p.share_pct == 0.0 && p.fields.iter().all(|f| f.completeness_pct == 0.0)));
    }

    #[test]
    fn test_bulk_report_counts() {
        let batch = batch_with(
            vec![
                record("WIALON", Some("a"), None),
                record("WIALON", Some("b"), None),
                record("WIALON", Some("c"), None),
            ],
            3,
        );
        let report = IngestReport::from_bulk(&batch, 2);
        assert_eq!(report.inserted_count, 2);
        assert_eq!(report.duplicate_count, 1);
        assert!(report.inserted.is_empty());
    }
}
