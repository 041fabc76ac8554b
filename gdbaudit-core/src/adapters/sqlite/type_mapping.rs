//! SQLite declared column types to geodatabase field types.
//!
//! Mobile geodatabases declare columns with Esri storage names (`int32`,
//! `float64`, `text(50)`, `st_geometry`), GeoPackages with SQL names
//! (`INTEGER`, `TEXT(50)`, `POINT`). Both are mapped here; identifier and
//! shape columns are decided by the catalog, not by the declared type alone.

use crate::models::FieldType;

/// Geometry type names a GeoPackage may use as a column's declared type.
const GEOMETRY_TYPE_NAMES: &[&str] = &[
    "GEOMETRY",
    "POINT",
    "LINESTRING",
    "POLYGON",
    "MULTIPOINT",
    "MULTILINESTRING",
    "MULTIPOLYGON",
    "GEOMETRYCOLLECTION",
    "CIRCULARSTRING",
    "COMPOUNDCURVE",
    "CURVEPOLYGON",
    "MULTICURVE",
    "MULTISURFACE",
    "CURVE",
    "SURFACE",
    "ST_GEOMETRY",
];

/// Maps a declared SQLite column type to a [`FieldType`].
///
/// # Arguments
/// * `declared` - The type from `PRAGMA table_info`, e.g. `TEXT(50)`
pub fn map_declared_type(declared: &str) -> FieldType {
    let upper = declared.trim().to_uppercase();
    let base = upper.split('(').next().unwrap_or_default().trim();

    if GEOMETRY_TYPE_NAMES.contains(&base) {
        return FieldType::Geometry;
    }

    match base {
        "" => FieldType::Other(declared.to_string()),
        "INT16" | "SMALLINT" | "TINYINT" | "MEDIUMINT" | "BOOLEAN" | "BOOL" => {
            FieldType::SmallInteger
        }
        "INT64" | "BIGINT" => FieldType::BigInteger,
        "INT" | "INT32" | "INTEGER" => FieldType::Integer,
        "FLOAT32" | "FLOAT" => FieldType::Single,
        "FLOAT64" | "DOUBLE" | "REAL" | "NUMERIC" | "DECIMAL" => FieldType::Double,
        "TEXT" | "CHAR" | "VARCHAR" | "NVARCHAR" | "NCHAR" | "CLOB" | "STRING" => {
            FieldType::String
        }
        "DATE" | "DATETIME" | "TIMESTAMP" | "REALDATE" | "DATEONLY" | "TIMEONLY" => {
            FieldType::Date
        }
        "BLOB" => FieldType::Blob,
        "UUIDTEXT" | "UUID" | "GUID" => FieldType::Guid,
        "GLOBALID" => FieldType::GlobalId,
        "XML" => FieldType::Xml,
        "RASTER" => FieldType::Raster,
        other if other.contains("INT") => FieldType::Integer,
        other if other.contains("CHAR") || other.contains("TEXT") => FieldType::String,
        _ => FieldType::Other(declared.to_string()),
    }
}

/// Decides a column's field type from its catalog context.
///
/// * `is_rowid_alias` - the column is the table's sole `INTEGER PRIMARY KEY`
/// * `is_shape` - the catalog registers the column as the shape column
pub fn classify_column(declared: &str, is_rowid_alias: bool, is_shape: bool) -> FieldType {
    if is_shape {
        return FieldType::Geometry;
    }
    if is_rowid_alias {
        return FieldType::ObjectId;
    }
    map_declared_type(declared)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geopackage_geometry_types() {
        assert_eq!(map_declared_type("POINT"), FieldType::Geometry);
        assert_eq!(map_declared_type("MultiPolygon"), FieldType::Geometry);
        assert_eq!(map_declared_type("GEOMETRY"), FieldType::Geometry);
    }

    #[test]
    fn test_mobile_geodatabase_types() {
        assert_eq!(map_declared_type("st_geometry"), FieldType::Geometry);
        assert_eq!(map_declared_type("int32"), FieldType::Integer);
        assert_eq!(map_declared_type("int16"), FieldType::SmallInteger);
        assert_eq!(map_declared_type("int64"), FieldType::BigInteger);
        assert_eq!(map_declared_type("float64"), FieldType::Double);
        assert_eq!(map_declared_type("text(50)"), FieldType::String);
        assert_eq!(map_declared_type("realdate"), FieldType::Date);
        assert_eq!(map_declared_type("uuidtext"), FieldType::Guid);
    }

    #[test]
    fn test_sql_types() {
        assert_eq!(map_declared_type("VARCHAR(255)"), FieldType::String);
        assert_eq!(map_declared_type("DATETIME"), FieldType::Date);
        assert_eq!(map_declared_type("BLOB"), FieldType::Blob);
        assert_eq!(map_declared_type("UNSIGNED BIG INT"), FieldType::Integer);
    }

    #[test]
    fn test_untyped_column() {
        assert_eq!(map_declared_type(""), FieldType::Other(String::new()));
        assert_eq!(
            map_declared_type("JSON"),
            FieldType::Other("JSON".to_string())
        );
    }

    #[test]
    fn test_classify_column_prefers_catalog() {
        assert_eq!(classify_column("INTEGER", true, false), FieldType::ObjectId);
        assert_eq!(classify_column("BLOB", false, true), FieldType::Geometry);
        assert_eq!(classify_column("INTEGER", false, false), FieldType::Integer);
    }
}
