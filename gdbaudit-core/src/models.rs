//! Geodatabase catalog and value models shared by adapters and the auditor.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Geodatabase container formats understood by gdbaudit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeodatabaseFormat {
    /// `.gdb` directory read through GDAL's OpenFileGDB driver
    FileGeodatabase,
    /// SQLite container with a `GDB_Items` catalog
    MobileGeodatabase,
    /// OGC GeoPackage (`gpkg_contents` catalog)
    GeoPackage,
    /// SQLite file without a geodatabase catalog
    Sqlite,
    /// In-process geodatabase built through [`crate::adapters::MemoryGeodatabase`]
    Memory,
}

impl fmt::Display for GeodatabaseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FileGeodatabase => "File Geodatabase",
            Self::MobileGeodatabase => "Mobile Geodatabase",
            Self::GeoPackage => "GeoPackage",
            Self::Sqlite => "SQLite",
            Self::Memory => "In-Memory",
        };
        f.write_str(name)
    }
}

/// Kind of auditable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Spatial dataset (root level or inside a feature dataset)
    FeatureClass,
    /// Standalone, non-spatial table
    Table,
}

impl ElementKind {
    /// Label used in report block headers.
    pub fn label(&self) -> &'static str {
        match self {
            Self::FeatureClass => "Feature Class",
            Self::Table => "Table",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reference to a feature class or table inside a geodatabase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementRef {
    /// Display name, qualified as `Dataset/Name` for nested feature classes
    pub name: String,
    /// Identifier the adapter uses to read the element's rows
    pub table: String,
    /// Feature class or table
    pub kind: ElementKind,
}

impl ElementRef {
    /// Creates a feature class reference.
    pub fn feature_class(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            kind: ElementKind::FeatureClass,
        }
    }

    /// Creates a standalone table reference.
    pub fn table(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            kind: ElementKind::Table,
        }
    }

    /// Qualifies the display name with its containing feature dataset.
    pub fn within_dataset(mut self, feature_dataset: &str) -> Self {
        self.name = format!("{}/{}", feature_dataset, self.name);
        self
    }
}

/// Field type tags, following the geodatabase field type vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Object identifier (row id)
    ObjectId,
    /// Shape column
    Geometry,
    /// Text
    String,
    /// 16-bit integer
    SmallInteger,
    /// 32-bit integer
    Integer,
    /// 64-bit integer
    BigInteger,
    /// Single precision float
    Single,
    /// Double precision float
    Double,
    /// Date or timestamp
    Date,
    /// Binary large object
    Blob,
    /// GUID
    Guid,
    /// Global ID (replica-tracked GUID)
    GlobalId,
    /// XML document
    Xml,
    /// Raster
    Raster,
    /// Declared type with no geodatabase equivalent
    Other(String),
}

impl FieldType {
    /// Identifier and geometry fields are never audited.
    pub fn is_system(&self) -> bool {
        matches!(self, Self::ObjectId | Self::Geometry)
    }
}

/// A named, typed attribute of an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field name as stored in the geodatabase
    pub name: String,
    /// Field type tag
    pub field_type: FieldType,
}

impl Field {
    /// Creates a new field.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// A single cell read by a field cursor.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Null sentinel
    Null,
    /// Text value
    Text(String),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Real(f64),
    /// Binary value
    Blob(Vec<u8>),
}

impl FieldValue {
    /// Returns true for the null sentinel and for whitespace-only text.
    ///
    /// Numeric, date and binary values are never blank, whatever they hold.
    pub fn is_null_or_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Integer(_) | Self::Real(_) | Self::Blob(_) => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Option<&str>> for FieldValue {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Self::Null, Self::from)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

/// Accumulates null-or-blank counts while a cursor walks a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullTally {
    /// Values seen
    pub scanned: u64,
    /// Values that were null or blank
    pub nulls: u64,
}

impl NullTally {
    /// Records one scanned value.
    pub fn observe(&mut self, value: &FieldValue) {
        self.scanned = self.scanned.saturating_add(1);
        if value.is_null_or_blank() {
            self.nulls = self.nulls.saturating_add(1);
        }
    }
}
