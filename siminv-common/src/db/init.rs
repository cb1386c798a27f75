//! Daily store initialization
//!
//! Opens (or creates) the daily store file and ensures the schema exists.
//! Initialization is idempotent: reopening an existing store is a no-op
//! apart from the pragmas.

use crate::Result;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::info;

/// Initialize the daily store and return a connection pool
///
/// Creates the parent directory and the database file if missing, then
/// ensures the `devices` table and its identity index exist.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // mode=rwc: read, write, create
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePool::connect(&db_url).await?;

    if newly_created {
        info!("Initialized new daily store: {}", db_path.display());
    } else {
        info!("Opened existing daily store: {}", db_path.display());
    }

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await?;

    create_devices_table(&pool).await?;

    Ok(pool)
}

/// Create the `devices` table and its identity index
///
/// One row per unique device entity per day. All 15 unified fields are
/// stored as text; identity is the `(name, account_id, phone)` triple.
/// The index coalesces NULLs so that two rows absent the same field
/// still collide (a plain UNIQUE constraint would treat NULLs as
/// distinct in SQLite).
pub async fn create_devices_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS devices (
            name TEXT,
            account_id TEXT NOT NULL,
            device_type TEXT,
            imei TEXT,
            iccid TEXT,
            activation_date TEXT,
            deactivation_date TEXT,
            last_message_time TEXT,
            last_report TEXT,
            vehicle TEXT,
            services TEXT,
            device_group TEXT,
            phone TEXT,
            origin TEXT NOT NULL,
            file_date TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS devices_identity
        ON devices (IFNULL(name, ''), account_id, IFNULL(phone, ''))
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
