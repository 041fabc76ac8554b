//! File geodatabase adapter.
//!
//! Reads `.gdb` directories through GDAL's OpenFileGDB driver, read-only.
//! The catalog comes from the `GDB_Items` system table, which the driver
//! exposes as a layer when opened with `LIST_ALL_TABLES=YES`.
//!
//! # Module Structure
//! - `type_mapping`: OGR field type to [`crate::models::FieldType`] conversion

pub mod type_mapping;

use super::GeodatabaseAdapter;
use super::items::{
    CatalogItem, FEATURE_CLASS_TYPE, FEATURE_DATASET_TYPE, TABLE_TYPE, in_dataset,
};
use crate::Result;
use crate::error::GdbAuditError;
use crate::models::{ElementRef, Field, FieldValue, GeodatabaseFormat, NullTally};
use async_trait::async_trait;
use gdal::errors::GdalError;
use gdal::vector::{Feature, Layer, LayerAccess, OGRFieldType};
use gdal::{Dataset, DatasetOptions, GdalOpenFlags};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use type_mapping::{is_text, map_ogr_type};

/// GDAL driver for file geodatabases.
const DRIVER: &str = "OpenFileGDB";
/// System table listing every catalog item.
const CATALOG_TABLE: &str = "GDB_Items";

/// Geodatabase stored as a `.gdb` directory.
pub struct FileGeodatabase {
    // GDAL datasets may move between threads but not be shared.
    dataset: Mutex<Dataset>,
    path: PathBuf,
}

impl std::fmt::Debug for FileGeodatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileGeodatabase")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl FileGeodatabase {
    /// Opens a file geodatabase directory read-only.
    ///
    /// # Errors
    /// Returns error if GDAL cannot open the directory with the OpenFileGDB
    /// driver (not a geodatabase, unsupported version, unreadable files).
    pub fn open(path: &Path) -> Result<Self> {
        let options = DatasetOptions {
            open_flags: GdalOpenFlags::GDAL_OF_VECTOR | GdalOpenFlags::GDAL_OF_READONLY,
            allowed_drivers: Some(&[DRIVER]),
            open_options: Some(&["LIST_ALL_TABLES=YES"]),
            ..Default::default()
        };

        let dataset = Dataset::open_ex(path, options).map_err(|e| {
            GdbAuditError::catalog_failed(
                format!("Failed to open file geodatabase {}", path.display()),
                e,
            )
        })?;

        tracing::debug!("Opened file geodatabase at {}", path.display());

        Ok(Self {
            dataset: Mutex::new(dataset),
            path: path.to_path_buf(),
        })
    }

    fn with_dataset<T>(&self, action: impl FnOnce(&Dataset) -> Result<T>) -> Result<T> {
        let dataset = self.dataset.lock().map_err(|_| {
            GdbAuditError::query(format!(
                "File geodatabase handle is poisoned: {}",
                self.path.display()
            ))
        })?;
        action(&dataset)
    }
}

/// Position and OGR type of a named attribute field.
fn field_position(layer: &Layer<'_>, name: &str) -> Option<(usize, OGRFieldType::Type)> {
    layer
        .defn()
        .fields()
        .enumerate()
        .find(|(_, field)| field.name().eq_ignore_ascii_case(name))
        .map(|(index, field)| (index, field.field_type()))
}

fn catalog_items(dataset: &Dataset, item_type: &str) -> Result<Vec<CatalogItem>> {
    let mut layer = dataset
        .layer_by_name(CATALOG_TABLE)
        .map_err(|e| GdbAuditError::catalog_failed("Failed to open GDB_Items", e))?;

    let column = |name: &str| {
        field_position(&layer, name)
            .map(|(index, _)| index)
            .ok_or_else(|| GdbAuditError::query(format!("GDB_Items has no {} column", name)))
    };
    let name_index = column("Name")?;
    let path_index = column("Path")?;
    let type_index = column("Type")?;

    let read_failed = |e: GdalError| GdbAuditError::catalog_failed("Failed to read GDB_Items", e);
    let mut items = Vec::new();

    layer.reset_feature_reading();
    for feature in layer.features() {
        let kind = feature.field_as_string(type_index).map_err(read_failed)?;
        if !kind.is_some_and(|kind| kind.eq_ignore_ascii_case(item_type)) {
            continue;
        }
        items.push(CatalogItem {
            name: feature
                .field_as_string(name_index)
                .map_err(read_failed)?
                .unwrap_or_default(),
            path: feature
                .field_as_string(path_index)
                .map_err(read_failed)?
                .unwrap_or_default(),
        });
    }

    items.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(items)
}

/// Reads one cell. Only nullness matters for values that are neither text
/// nor numbers, so those are kept as raw text bytes.
fn read_value(
    feature: &Feature<'_>,
    index: usize,
    ogr_type: OGRFieldType::Type,
) -> std::result::Result<FieldValue, GdalError> {
    let value = match ogr_type {
        OGRFieldType::OFTInteger | OGRFieldType::OFTInteger64 => feature
            .field_as_integer64(index)?
            .map_or(FieldValue::Null, FieldValue::Integer),
        OGRFieldType::OFTReal => feature
            .field_as_double(index)?
            .map_or(FieldValue::Null, FieldValue::Real),
        other if is_text(other) => feature
            .field_as_string(index)?
            .map_or(FieldValue::Null, FieldValue::Text),
        _ => feature
            .field_as_string(index)?
            .map_or(FieldValue::Null, |raw| FieldValue::Blob(raw.into_bytes())),
    };
    Ok(value)
}

#[async_trait]
impl GeodatabaseAdapter for FileGeodatabase {
    fn format(&self) -> GeodatabaseFormat {
        GeodatabaseFormat::FileGeodatabase
    }

    async fn list_feature_classes(
        &self,
        feature_dataset: Option<&str>,
    ) -> Result<Vec<ElementRef>> {
        self.with_dataset(|dataset| {
            let items = catalog_items(dataset, FEATURE_CLASS_TYPE)?;
            Ok(in_dataset(items, feature_dataset)
                .iter()
                .map(|item| ElementRef::feature_class(item.display_name(), item.display_name()))
                .collect())
        })
    }

    async fn list_feature_datasets(&self) -> Result<Vec<String>> {
        self.with_dataset(|dataset| {
            Ok(catalog_items(dataset, FEATURE_DATASET_TYPE)?
                .iter()
                .map(|item| item.display_name().to_string())
                .collect())
        })
    }

    async fn list_tables(&self) -> Result<Vec<ElementRef>> {
        self.with_dataset(|dataset| {
            Ok(catalog_items(dataset, TABLE_TYPE)?
                .iter()
                .map(|item| ElementRef::table(item.display_name(), item.display_name()))
                .collect())
        })
    }

    async fn record_count(&self, element: &ElementRef) -> Result<u64> {
        self.with_dataset(|dataset| {
            let layer = dataset.layer_by_name(&element.table).map_err(|e| {
                GdbAuditError::query_failed(
                    format!("Failed to open layer for '{}'", element.name),
                    e,
                )
            })?;
            Ok(layer.feature_count())
        })
    }

    async fn list_fields(&self, element: &ElementRef) -> Result<Vec<Field>> {
        self.with_dataset(|dataset| {
            let layer = dataset.layer_by_name(&element.table).map_err(|e| {
                GdbAuditError::catalog_failed(
                    format!("Failed to list fields of '{}'", element.name),
                    e,
                )
            })?;
            Ok(layer
                .defn()
                .fields()
                .map(|field| Field::new(field.name(), map_ogr_type(field.field_type())))
                .collect())
        })
    }

    async fn count_null_values(&self, element: &ElementRef, field: &Field) -> Result<u64> {
        self.with_dataset(|dataset| {
            let scan_failed = |e: GdalError| {
                GdbAuditError::query_failed(
                    format!("Failed to scan field '{}' of '{}'", field.name, element.name),
                    e,
                )
            };

            let mut layer = dataset.layer_by_name(&element.table).map_err(scan_failed)?;
            let (index, ogr_type) = field_position(&layer, &field.name).ok_or_else(|| {
                GdbAuditError::query(format!(
                    "Unknown field '{}' in '{}'",
                    field.name, element.name
                ))
            })?;

            let mut tally = NullTally::default();
            layer.reset_feature_reading();
            for feature in layer.features() {
                tally.observe(&read_value(&feature, index, ogr_type).map_err(scan_failed)?);
            }

            tracing::trace!(
                "Scanned {} values of {}.{}: {} null",
                tally.scanned,
                element.name,
                field.name,
                tally.nulls
            );
            Ok(tally.nulls)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_empty_directory_is_catalog_error() {
        let dir = tempfile::tempdir().unwrap();
        let gdb = dir.path().join("Empty.gdb");
        std::fs::create_dir(&gdb).unwrap();

        let error = FileGeodatabase::open(&gdb).unwrap_err();
        assert!(matches!(error, GdbAuditError::Catalog { .. }));
        assert!(error.to_string().contains("Empty.gdb"));
    }
}
