//! Record counts and single-field cursors.
//!
//! A field is scanned by streaming `SELECT "field" FROM "table"` row by row,
//! so memory stays flat however large the element is. Each cell is decoded
//! by its runtime storage class rather than the declared column type, since
//! SQLite lets any column hold any class.

use super::quote_identifier;
use crate::Result;
use crate::error::GdbAuditError;
use crate::models::{ElementRef, Field, FieldValue, NullTally};
use futures::TryStreamExt;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool, TypeInfo, ValueRef};

/// Returns the number of records in an element.
pub async fn record_count(pool: &SqlitePool, element: &ElementRef) -> Result<u64> {
    let query = format!("SELECT COUNT(*) FROM {}", quote_identifier(&element.table));

    let count: i64 = sqlx::query_scalar(&query)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            GdbAuditError::query_failed(format!("Failed to count records of '{}'", element.name), e)
        })?;

    u64::try_from(count).map_err(|_| {
        GdbAuditError::query(format!(
            "Negative record count {} for '{}'",
            count, element.name
        ))
    })
}

/// Streams every value of one field and counts null or blank values.
pub async fn count_null_values(
    pool: &SqlitePool,
    element: &ElementRef,
    field: &Field,
) -> Result<u64> {
    let query = format!(
        "SELECT {} FROM {}",
        quote_identifier(&field.name),
        quote_identifier(&element.table)
    );

    let mut rows = sqlx::query(&query).fetch(pool);
    let mut tally = NullTally::default();

    while let Some(row) = rows.try_next().await.map_err(|e| {
        GdbAuditError::query_failed(
            format!("Failed to scan field '{}' of '{}'", field.name, element.name),
            e,
        )
    })? {
        tally.observe(&decode_value(&row, 0)?);
    }

    tracing::trace!(
        "Scanned {} values of {}.{}: {} null",
        tally.scanned,
        element.name,
        field.name,
        tally.nulls
    );

    Ok(tally.nulls)
}

/// Decodes one cell by its storage class.
pub fn decode_value(row: &SqliteRow, index: usize) -> Result<FieldValue> {
    let decode_error = |e: sqlx::Error| GdbAuditError::query_failed("Failed to decode value", e);

    let raw = row.try_get_raw(index).map_err(decode_error)?;
    if raw.is_null() {
        return Ok(FieldValue::Null);
    }
    let storage_class = raw.type_info().name().to_string();

    let value = match storage_class.as_str() {
        "TEXT" => {
            // SQLite does not enforce UTF-8; undecodable bytes are still content.
            let bytes: Vec<u8> = row.try_get_unchecked(index).map_err(decode_error)?;
            FieldValue::Text(String::from_utf8_lossy(&bytes).into_owned())
        }
        "INTEGER" => FieldValue::Integer(row.try_get_unchecked(index).map_err(decode_error)?),
        "REAL" => FieldValue::Real(row.try_get_unchecked(index).map_err(decode_error)?),
        _ => FieldValue::Blob(row.try_get_unchecked(index).map_err(decode_error)?),
    };

    Ok(value)
}
