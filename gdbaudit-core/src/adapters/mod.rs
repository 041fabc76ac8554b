//! Geodatabase adapter trait and factory.
//!
//! Every container format is read through [`GeodatabaseAdapter`], which
//! exposes exactly what the null-value audit needs: catalog listings, record
//! counts, field listings and a single-field forward scan.
//!
//! # Module Structure
//! - `filegdb`: `.gdb` directories through GDAL (`filegdb` feature)
//! - `items`: Esri `GDB_Items` catalog rows shared by both Esri formats
//! - `memory`: in-process geodatabase for embedding and tests
//! - `sqlite`: GeoPackage, mobile geodatabase and plain SQLite files

use crate::Result;
use crate::error::GdbAuditError;
use crate::models::{ElementRef, Field, GeodatabaseFormat};
use async_trait::async_trait;
use std::path::Path;

#[cfg(feature = "filegdb")]
pub mod filegdb;
#[cfg(any(feature = "sqlite", feature = "filegdb"))]
pub mod items;
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use memory::{MemoryElement, MemoryGeodatabase};

/// Read-only access to a geodatabase catalog and its records.
///
/// # Object Safety
/// This trait is object-safe, allowing for dynamic dispatch through
/// `Box<dyn GeodatabaseAdapter>`.
#[async_trait]
pub trait GeodatabaseAdapter: Send + Sync {
    /// Returns the container format this adapter reads.
    fn format(&self) -> GeodatabaseFormat;

    /// Lists feature classes at the root (`None`) or inside a feature dataset.
    ///
    /// Returned names are unqualified; the caller adds the dataset prefix.
    async fn list_feature_classes(&self, feature_dataset: Option<&str>)
    -> Result<Vec<ElementRef>>;

    /// Lists feature dataset names.
    async fn list_feature_datasets(&self) -> Result<Vec<String>>;

    /// Lists standalone tables.
    async fn list_tables(&self) -> Result<Vec<ElementRef>>;

    /// Returns the total number of records in an element.
    async fn record_count(&self, element: &ElementRef) -> Result<u64>;

    /// Lists an element's fields in catalog order.
    async fn list_fields(&self, element: &ElementRef) -> Result<Vec<Field>>;

    /// Scans every record of one field and counts null or blank values.
    ///
    /// See [`crate::models::FieldValue::is_null_or_blank`] for the definition.
    async fn count_null_values(&self, element: &ElementRef, field: &Field) -> Result<u64>;
}

/// Opens the geodatabase at `path` with the adapter matching its format.
///
/// # Errors
/// Returns error if:
/// - The path does not exist (validation error)
/// - The path is a directory other than a `.gdb` file geodatabase
/// - The required driver feature (`sqlite`, `filegdb`) is not compiled in
/// - The container cannot be opened read-only
pub async fn open_geodatabase(path: &Path) -> Result<Box<dyn GeodatabaseAdapter>> {
    validate_geodatabase_path(path)?;

    if path.is_dir() {
        return open_directory(path);
    }

    #[cfg(feature = "sqlite")]
    {
        let adapter = sqlite::SqliteGeodatabase::open(path).await?;
        Ok(Box::new(adapter))
    }
    #[cfg(not(feature = "sqlite"))]
    {
        Err(GdbAuditError::unsupported_format(
            path.display().to_string(),
            "compile with --features sqlite to enable SQLite-based geodatabases",
        ))
    }
}

fn open_directory(path: &Path) -> Result<Box<dyn GeodatabaseAdapter>> {
    if !is_file_geodatabase(path) {
        return Err(GdbAuditError::unsupported_format(
            format!("Directory {}", path.display()),
            "only .gdb directories and SQLite-based containers (.geodatabase, .gpkg, .sqlite) can be read",
        ));
    }

    #[cfg(feature = "filegdb")]
    {
        let adapter = filegdb::FileGeodatabase::open(path)?;
        Ok(Box::new(adapter))
    }
    #[cfg(not(feature = "filegdb"))]
    {
        Err(GdbAuditError::unsupported_format(
            format!("File geodatabase directory {}", path.display()),
            "compile with --features filegdb to read file geodatabases",
        ))
    }
}

/// Confirms that the geodatabase path resolves to an existing resource.
pub fn validate_geodatabase_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() || !path.exists() {
        return Err(GdbAuditError::geodatabase_not_found(path));
    }
    Ok(())
}

fn is_file_geodatabase(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gdb"))
}
