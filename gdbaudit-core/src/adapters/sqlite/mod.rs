//! SQLite-based geodatabase adapter.
//!
//! # Module Structure
//! - `connection`: read-only connection handling and catalog flavor detection
//! - `catalog`: feature class, feature dataset, table and field listings
//! - `type_mapping`: declared column type to [`FieldType`] conversion
//! - `scan`: record counts and single-field cursors
//!
//! # Supported Containers
//! - Mobile geodatabase: catalog in `GDB_Items` joined with `GDB_ItemTypes`
//! - GeoPackage: catalog in `gpkg_contents`, shapes in `gpkg_geometry_columns`
//! - Plain SQLite: every user table is audited as a standalone table
//!
//! All access is read-only (SELECT/PRAGMA only).

pub mod catalog;
pub mod connection;
pub mod scan;
pub mod type_mapping;


use super::GeodatabaseAdapter;
use crate::Result;
use crate::models::{ElementRef, Field, GeodatabaseFormat};
use async_trait::async_trait;
use sqlx::SqlitePool;
use std::path::PathBuf;

pub use type_mapping::map_declared_type;

/// Geodatabase stored in a single SQLite file.
pub struct SqliteGeodatabase {
    /// Connection pool (single read-only connection)
    pub pool: SqlitePool,
    /// Detected catalog flavor
    pub format: GeodatabaseFormat,
    /// Path of the opened file
    pub path: PathBuf,
}

impl std::fmt::Debug for SqliteGeodatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteGeodatabase")
            .field("format", &self.format)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl GeodatabaseAdapter for SqliteGeodatabase {
    fn format(&self) -> GeodatabaseFormat {
        self.format
    }

    async fn list_feature_classes(
        &self,
        feature_dataset: Option<&str>,
    ) -> Result<Vec<ElementRef>> {
        catalog::list_feature_classes(&self.pool, self.format, feature_dataset).await
    }

    async fn list_feature_datasets(&self) -> Result<Vec<String>> {
        catalog::list_feature_datasets(&self.pool, self.format).await
    }

    async fn list_tables(&self) -> Result<Vec<ElementRef>> {
        catalog::list_tables(&self.pool, self.format).await
    }

    async fn record_count(&self, element: &ElementRef) -> Result<u64> {
        scan::record_count(&self.pool, element).await
    }

    async fn list_fields(&self, element: &ElementRef) -> Result<Vec<Field>> {
        catalog::list_fields(&self.pool, self.format, element).await
    }

    async fn count_null_values(&self, element: &ElementRef, field: &Field) -> Result<u64> {
        scan::count_null_values(&self.pool, element, field).await
    }
}

/// Quotes an SQLite identifier with double quotes.
pub fn quote_identifier(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}
