//! Catalog listings for SQLite-based geodatabases.
//!
//! # Catalog Tables
//! - Mobile geodatabase: `GDB_Items` (Name, Path, Type) joined with
//!   `GDB_ItemTypes` (UUID, Name); shapes in `st_geometry_columns`
//! - GeoPackage: `gpkg_contents` (table_name, data_type) and
//!   `gpkg_geometry_columns` (table_name, column_name)
//! - Plain SQLite: `sqlite_master`
//!
//! Listings are ordered by name so repeated runs produce identical reports.

use super::connection::has_table;
use super::type_mapping::classify_column;
use crate::Result;
use crate::adapters::items::{CatalogItem, in_dataset};
use crate::error::GdbAuditError;
use crate::models::{ElementRef, Field, GeodatabaseFormat};
use sqlx::{Row, SqlitePool};

/// `GDB_ItemTypes.Name` of feature classes.
const ITEM_TYPE_FEATURE_CLASS: &str = "Feature Class";
/// `GDB_ItemTypes.Name` of feature datasets.
const ITEM_TYPE_FEATURE_DATASET: &str = "Feature Dataset";
/// `GDB_ItemTypes.Name` of standalone tables.
const ITEM_TYPE_TABLE: &str = "Table";

async fn catalog_items(pool: &SqlitePool, item_type: &str) -> Result<Vec<CatalogItem>> {
    let rows = sqlx::query(
        "SELECT i.Name AS name, COALESCE(i.Path, '') AS path \
         FROM GDB_Items i JOIN GDB_ItemTypes t ON i.Type = t.UUID \
         WHERE t.Name = ?1 ORDER BY i.Name",
    )
    .bind(item_type)
    .fetch_all(pool)
    .await
    .map_err(|e| {
        GdbAuditError::catalog_failed(format!("Failed to list {} items", item_type), e)
    })?;

    rows.iter()
        .map(|row| {
            Ok(CatalogItem {
                name: row
                    .try_get("name")
                    .map_err(|e| GdbAuditError::catalog_failed("Failed to read item name", e))?,
                path: row
                    .try_get("path")
                    .map_err(|e| GdbAuditError::catalog_failed("Failed to read item path", e))?,
            })
        })
        .collect()
}

async fn gpkg_contents(pool: &SqlitePool, data_type: &str) -> Result<Vec<String>> {
    sqlx::query_scalar(
        "SELECT table_name FROM gpkg_contents WHERE data_type = ?1 ORDER BY table_name",
    )
    .bind(data_type)
    .fetch_all(pool)
    .await
    .map_err(|e| {
        GdbAuditError::catalog_failed(
            format!("Failed to list GeoPackage '{}' contents", data_type),
            e,
        )
    })
}

/// Lists feature classes at the root or inside one feature dataset.
pub async fn list_feature_classes(
    pool: &SqlitePool,
    format: GeodatabaseFormat,
    feature_dataset: Option<&str>,
) -> Result<Vec<ElementRef>> {
    match format {
        GeodatabaseFormat::MobileGeodatabase => {
            let items = catalog_items(pool, ITEM_TYPE_FEATURE_CLASS).await?;
            Ok(in_dataset(items, feature_dataset)
                .iter()
                .map(|item| {
                    let name = item.display_name();
                    ElementRef::feature_class(name, name)
                })
                .collect())
        }
        GeodatabaseFormat::GeoPackage if feature_dataset.is_none() => {
            let names = gpkg_contents(pool, "features").await?;
            Ok(names
                .into_iter()
                .map(|name| ElementRef::feature_class(name.clone(), name))
                .collect())
        }
        _ => Ok(Vec::new()),
    }
}

/// Lists feature dataset names. Only mobile geodatabases have them.
pub async fn list_feature_datasets(
    pool: &SqlitePool,
    format: GeodatabaseFormat,
) -> Result<Vec<String>> {
    if format != GeodatabaseFormat::MobileGeodatabase {
        return Ok(Vec::new());
    }

    let items = catalog_items(pool, ITEM_TYPE_FEATURE_DATASET).await?;
    Ok(items
        .into_iter()
        .map(|item| item.display_name().to_string())
        .collect())
}

/// Lists standalone tables.
pub async fn list_tables(pool: &SqlitePool, format: GeodatabaseFormat) -> Result<Vec<ElementRef>> {
    let names: Vec<String> = match format {
        GeodatabaseFormat::MobileGeodatabase => catalog_items(pool, ITEM_TYPE_TABLE)
            .await?
            .into_iter()
            .map(|item| item.display_name().to_string())
            .collect(),
        GeodatabaseFormat::GeoPackage => gpkg_contents(pool, "attributes").await?,
        GeodatabaseFormat::Sqlite
        | GeodatabaseFormat::FileGeodatabase
        | GeodatabaseFormat::Memory => sqlx::query_scalar(
            "SELECT name FROM sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\' \
             ORDER BY name",
        )
        .fetch_all(pool)
        .await
        .map_err(|e| GdbAuditError::catalog_failed("Failed to list SQLite tables", e))?,
    };

    Ok(names
        .into_iter()
        .map(|name| ElementRef::table(name.clone(), name))
        .collect())
}

/// Column as reported by `pragma_table_info`.
#[derive(Debug, Clone)]
struct ColumnInfo {
    name: String,
    declared_type: String,
    pk: i64,
}

/// Lists an element's fields in column order, tagging identifier and shape
/// columns from the catalog.
pub async fn list_fields(
    pool: &SqlitePool,
    format: GeodatabaseFormat,
    element: &ElementRef,
) -> Result<Vec<Field>> {
    let rows = sqlx::query(
        "SELECT name, COALESCE(type, '') AS type, pk FROM pragma_table_info(?1) ORDER BY cid",
    )
    .bind(&element.table)
    .fetch_all(pool)
    .await
    .map_err(|e| {
        GdbAuditError::catalog_failed(format!("Failed to list fields of '{}'", element.name), e)
    })?;

    let columns = rows
        .iter()
        .map(|row| {
            Ok(ColumnInfo {
                name: row.try_get("name").map_err(|e| {
                    GdbAuditError::catalog_failed("Failed to read column name", e)
                })?,
                declared_type: row.try_get("type").map_err(|e| {
                    GdbAuditError::catalog_failed("Failed to read column type", e)
                })?,
                pk: row
                    .try_get("pk")
                    .map_err(|e| GdbAuditError::catalog_failed("Failed to read column pk", e))?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if columns.is_empty() {
        return Err(GdbAuditError::query(format!(
            "Element '{}' has no readable columns",
            element.name
        )));
    }

    let shape_columns = shape_columns(pool, format, &element.table).await?;
    let pk_count = columns.iter().filter(|column| column.pk > 0).count();

    Ok(columns
        .into_iter()
        .map(|column| {
            let is_rowid_alias = pk_count == 1
                && column.pk > 0
                && column.declared_type.eq_ignore_ascii_case("INTEGER");
            let is_shape = shape_columns
                .iter()
                .any(|shape| shape.eq_ignore_ascii_case(&column.name));
            let field_type = classify_column(&column.declared_type, is_rowid_alias, is_shape);
            Field::new(column.name, field_type)
        })
        .collect())
}

/// Shape column names registered for a table.
async fn shape_columns(
    pool: &SqlitePool,
    format: GeodatabaseFormat,
    table: &str,
) -> Result<Vec<String>> {
    let registry = match format {
        GeodatabaseFormat::GeoPackage => "gpkg_geometry_columns",
        GeodatabaseFormat::MobileGeodatabase => "st_geometry_columns",
        GeodatabaseFormat::Sqlite
        | GeodatabaseFormat::FileGeodatabase
        | GeodatabaseFormat::Memory => return Ok(Vec::new()),
    };
    if !has_table(pool, registry).await? {
        return Ok(Vec::new());
    }

    let query = format!(
        "SELECT column_name FROM {} WHERE table_name = ?1 COLLATE NOCASE",
        registry
    );
    sqlx::query_scalar(&query)
        .bind(table)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            GdbAuditError::catalog_failed(
                format!("Failed to read shape columns of '{}' from {}", table, registry),
                e,
            )
        })
}
