//! Record persistence with duplicate detection
//!
//! Re-ingestion is always additive-or-rejected: there is no update or
//! delete path. The per-record insert reports exactly which records the
//! identity constraint rejected; the bulk variant only reports how many
//! rows were written.

use crate::models::UnifiedRecord;
use siminv_common::Result;
use sqlx::sqlite::SqliteArguments;
use sqlx::{query::Query, Sqlite, SqlitePool};

const INSERT_SQL: &str = r#"
    INSERT INTO devices (
        name, account_id, device_type, imei, iccid,
        activation_date, deactivation_date, last_message_time,
        last_report, vehicle, services, device_group, phone, origin, file_date
    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;

const INSERT_OR_IGNORE_SQL: &str = r#"
    INSERT OR IGNORE INTO devices (
        name, account_id, device_type, imei, iccid,
        activation_date, deactivation_date, last_message_time,
        last_report, vehicle, services, device_group, phone, origin, file_date
    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;

/// Outcome of a single-record insert attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Record appended to the store
    Inserted,
    /// Identity constraint violated; nothing was written
    Duplicate,
}

/// Insert one record, classifying an identity-constraint violation as
/// [`InsertOutcome::Duplicate`].
///
/// Any other database failure propagates and is fatal for the run.
pub async fn insert_record(pool: &SqlitePool, record: &UnifiedRecord) -> Result<InsertOutcome> {
    let result = bind_record(sqlx::query(INSERT_SQL), record)
        .execute(pool)
        .await;

    match result {
        Ok(_) => Ok(InsertOutcome::Inserted),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(InsertOutcome::Duplicate),
        Err(e) => Err(e.into()),
    }
}

/// Bulk insert-or-ignore in one transaction.
///
/// Writes all non-conflicting records and returns only the count
/// written; use [`insert_record`] when per-record duplicate detail is
/// required.
pub async fn insert_records(pool: &SqlitePool, records: &[UnifiedRecord]) -> Result<u64> {
    let mut tx = pool.begin().await?;
    let mut written = 0u64;

    for record in records {
        let done = bind_record(sqlx::query(INSERT_OR_IGNORE_SQL), record)
            .execute(&mut *tx)
            .await?;
        written += done.rows_affected();
    }

    tx.commit().await?;
    Ok(written)
}

/// Count stored records
pub async fn count_records(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM devices")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

fn bind_record<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    record: &'q UnifiedRecord,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    query
        .bind(record.name.as_deref())
        .bind(&record.account_id)
        .bind(record.device_type.as_deref())
        .bind(record.imei.as_deref())
        .bind(record.iccid.as_deref())
        .bind(record.activation_date.as_deref())
        .bind(record.deactivation_date.as_deref())
        .bind(record.last_message_time.as_deref())
        .bind(record.last_report.as_deref())
        .bind(record.vehicle.as_deref())
        .bind(record.services.as_deref())
        .bind(record.device_group.as_deref())
        .bind(record.phone.as_deref())
        .bind(&record.origin)
        .bind(&record.file_date)
}
