//! siminv-loader - inventory workbook ingestion
//!
//! Single-shot run: read one multi-platform inventory workbook,
//! normalize every recognized sheet into unified device records, append
//! them to today's store with duplicate detection, and emit the run
//! report.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use siminv_common::config;
use siminv_loader::db::records::{insert_record, insert_records, InsertOutcome};
use siminv_loader::export::{write_invalid_rows_csv, write_records_csv};
use siminv_loader::ingest::{process_workbook, InvalidRow};
use siminv_loader::mappings::Platform;
use siminv_loader::report::IngestReport;

/// Command-line arguments for siminv-loader
#[derive(Parser, Debug)]
#[command(name = "siminv-loader")]
#[command(about = "Normalize platform inventory workbooks into the daily device store")]
#[command(version)]
struct Args {
    /// Inventory workbook to ingest (.xlsx)
    workbook: PathBuf,

    /// Data directory holding the daily store files
    #[arg(short, long, env = "SIMINV_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Write CSV extracts (records, duplicates, rejected rows) into this
    /// directory
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Bulk insert-or-ignore instead of per-record duplicate detection
    /// (faster, but reports only a written count)
    #[arg(long)]
    bulk: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "siminv_loader=info,siminv_common=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // The run date is computed once and threaded through: it keys the
    // daily store and is the file-date fallback for undated filenames.
    let run_date = Local::now().date_naive();
    let data_dir = config::resolve_data_dir(args.data_dir.as_deref());
    let db_path = config::database_path(&data_dir, run_date);

    info!("Workbook: {}", args.workbook.display());
    info!("Daily store: {}", db_path.display());

    let batch = process_workbook(&args.workbook, run_date)
        .with_context(|| format!("Failed to process {}", args.workbook.display()))?;

    for sheet in &batch.skipped_sheets {
        warn!("Unrecognized sheet skipped: {}", sheet);
    }

    let pool = siminv_common::db::init_database(&db_path)
        .await
        .context("Failed to open the daily store")?;

    let report = if args.bulk {
        let written = insert_records(&pool, &batch.records).await?;
        info!("Bulk insert wrote {} of {} records", written, batch.records.len());
        IngestReport::from_bulk(&batch, written)
    } else {
        let mut inserted = Vec::new();
        let mut duplicates = Vec::new();
        for record in &batch.records {
            match insert_record(&pool, record).await? {
                InsertOutcome::Inserted => inserted.push(record.clone()),
                InsertOutcome::Duplicate => {
                    warn!(
                        account = %record.account_id,
                        origin = %record.origin,
                        "Duplicate record rejected"
                    );
                    duplicates.push(record.clone());
                }
            }
        }
        IngestReport::from_outcomes(&batch, inserted, duplicates)
    };

    info!(
        "Run complete: {} rows, {} inserted, {} duplicates, {} invalid",
        report.total_rows, report.inserted_count, report.duplicate_count, report.invalid_rows
    );

    if let Some(export_dir) = &args.export_dir {
        export_extracts(export_dir, &batch.records, &report, &batch.invalid)?;
    }

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

/// Write the CSV extracts of one run into `export_dir`
fn export_extracts(
    export_dir: &std::path::Path,
    records: &[siminv_loader::models::UnifiedRecord],
    report: &IngestReport,
    invalid: &[InvalidRow],
) -> Result<()> {
    std::fs::create_dir_all(export_dir)?;

    let records_path = export_dir.join("records.csv");
    write_records_csv(std::fs::File::create(&records_path)?, records)?;
    info!("Wrote {}", records_path.display());

    if !report.duplicates.is_empty() {
        let duplicates_path = export_dir.join("duplicates.csv");
        write_records_csv(std::fs::File::create(&duplicates_path)?, &report.duplicates)?;
        info!("Wrote {}", duplicates_path.display());
    }

    // Rejected rows keep their source layout, so one extract per platform
    for platform in Platform::ALL {
        let rows: Vec<InvalidRow> = invalid
            .iter()
            .filter(|r| r.platform == platform)
            .cloned()
            .collect();
        if rows.is_empty() {
            continue;
        }
        let path = export_dir.join(format!("{}_rejected.csv", platform.origin()));
        write_invalid_rows_csv(std::fs::File::create(&path)?, &rows)?;
        info!("Wrote {}", path.display());
    }

    Ok(())
}
