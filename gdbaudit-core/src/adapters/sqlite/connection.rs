//! SQLite connection handling and catalog flavor detection.
//!
//! Geodatabase files are always opened read-only and never created: a path
//! that is not an SQLite database fails here, before any report is written.

use super::SqliteGeodatabase;
use crate::Result;
use crate::error::GdbAuditError;
use crate::models::GeodatabaseFormat;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::Path;
use std::time::Duration;

/// How long to wait for the single connection before giving up.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

impl SqliteGeodatabase {
    /// Opens an SQLite-based geodatabase read-only and detects its catalog.
    ///
    /// # Errors
    /// Returns error if:
    /// - The file cannot be opened
    /// - The file is not an SQLite database
    pub async fn open(path: &Path) -> Result<Self> {
        let pool = create_connection(path).await?;
        let format = detect_format(&pool).await?;

        tracing::debug!("Opened {} at {}", format, path.display());

        Ok(Self {
            pool,
            format,
            path: path.to_path_buf(),
        })
    }

    /// Wraps an existing pool, detecting its catalog flavor.
    pub async fn from_pool(pool: SqlitePool, path: impl Into<std::path::PathBuf>) -> Result<Self> {
        let format = detect_format(&pool).await?;
        Ok(Self {
            pool,
            format,
            path: path.into(),
        })
    }

    /// Closes the connection gracefully.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

async fn create_connection(path: &Path) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .read_only(true)
        .create_if_missing(false);

    SqlitePoolOptions::new()
        .max_connections(1)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_with(options)
        .await
        .map_err(|e| {
            GdbAuditError::catalog_failed(
                format!("Failed to open SQLite geodatabase {}", path.display()),
                e,
            )
        })
}

/// Detects which geodatabase catalog the database carries.
///
/// A mobile geodatabase takes precedence: it may also contain GeoPackage
/// tables, but its own catalog is authoritative.
pub async fn detect_format(pool: &SqlitePool) -> Result<GeodatabaseFormat> {
    if has_table(pool, "GDB_Items").await? && has_table(pool, "GDB_ItemTypes").await? {
        return Ok(GeodatabaseFormat::MobileGeodatabase);
    }
    if has_table(pool, "gpkg_contents").await? {
        return Ok(GeodatabaseFormat::GeoPackage);
    }
    Ok(GeodatabaseFormat::Sqlite)
}

/// Checks whether a table exists, ignoring case as SQLite does.
pub async fn has_table(pool: &SqlitePool, table: &str) -> Result<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1 COLLATE NOCASE",
    )
    .bind(table)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        GdbAuditError::catalog_failed("Failed to read sqlite_master (not an SQLite database?)", e)
    })?;

    Ok(count > 0)
}
