//! OGR field types to geodatabase field types.
//!
//! The OpenFileGDB driver exposes the object id as the feature id and the
//! shape as a geometry field, so neither appears among attribute fields.

use crate::models::FieldType;
use gdal::vector::OGRFieldType;

/// Maps an OGR attribute field type to a [`FieldType`].
pub fn map_ogr_type(ogr_type: OGRFieldType::Type) -> FieldType {
    match ogr_type {
        OGRFieldType::OFTInteger => FieldType::Integer,
        OGRFieldType::OFTInteger64 => FieldType::BigInteger,
        OGRFieldType::OFTReal => FieldType::Double,
        OGRFieldType::OFTString | OGRFieldType::OFTWideString => FieldType::String,
        OGRFieldType::OFTDate | OGRFieldType::OFTTime | OGRFieldType::OFTDateTime => {
            FieldType::Date
        }
        OGRFieldType::OFTBinary => FieldType::Blob,
        other => FieldType::Other(format!("OGR field type {}", other)),
    }
}

/// Text fields are the only ones the blank rule applies to.
pub fn is_text(ogr_type: OGRFieldType::Type) -> bool {
    matches!(
        ogr_type,
        OGRFieldType::OFTString | OGRFieldType::OFTWideString
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_types() {
        assert_eq!(map_ogr_type(OGRFieldType::OFTInteger), FieldType::Integer);
        assert_eq!(
            map_ogr_type(OGRFieldType::OFTInteger64),
            FieldType::BigInteger
        );
        assert_eq!(map_ogr_type(OGRFieldType::OFTReal), FieldType::Double);
        assert_eq!(map_ogr_type(OGRFieldType::OFTString), FieldType::String);
        assert_eq!(map_ogr_type(OGRFieldType::OFTDateTime), FieldType::Date);
        assert_eq!(map_ogr_type(OGRFieldType::OFTBinary), FieldType::Blob);
    }

    #[test]
    fn test_list_types_are_other() {
        assert!(matches!(
            map_ogr_type(OGRFieldType::OFTIntegerList),
            FieldType::Other(_)
        ));
    }

    #[test]
    fn test_only_strings_are_text() {
        assert!(is_text(OGRFieldType::OFTString));
        assert!(!is_text(OGRFieldType::OFTInteger));
        assert!(!is_text(OGRFieldType::OFTBinary));
    }
}
