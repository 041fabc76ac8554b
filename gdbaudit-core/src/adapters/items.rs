//! Esri geodatabase catalog items.
//!
//! Mobile and file geodatabases both describe their contents in a
//! `GDB_Items` table. Each row carries a type UUID and a `Path` placing the
//! item at the root (`\Name`) or inside a feature dataset
//! (`\Dataset\Name`).

/// `GDB_ItemTypes.UUID` of feature classes.
pub const FEATURE_CLASS_TYPE: &str = "{70737809-852C-4A03-9E22-2CECEA5B9BFA}";
/// `GDB_ItemTypes.UUID` of feature datasets.
pub const FEATURE_DATASET_TYPE: &str = "{74737149-DCB5-4257-8904-B9724E32A530}";
/// `GDB_ItemTypes.UUID` of standalone tables.
pub const TABLE_TYPE: &str = "{CD06BC3B-789D-4C51-AAFA-A467912B8965}";

/// A `GDB_Items` row of interest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    /// Item name, possibly schema-qualified (`main.Roads`)
    pub name: String,
    /// Catalog path, `\Name` or `\Dataset\Name`
    pub path: String,
}

impl CatalogItem {
    /// Name without the SQLite schema qualifier.
    pub fn display_name(&self) -> &str {
        unqualified(&self.name)
    }

    /// Feature dataset holding this item, if any.
    pub fn parent_dataset(&self) -> Option<String> {
        let segments: Vec<&str> = self
            .path
            .split(['\\', '/'])
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            [.., parent, _] => Some(unqualified(parent).to_string()),
            _ => None,
        }
    }
}

/// Strips the SQLite schema qualifier (`main.`) from a catalog name.
pub fn unqualified(name: &str) -> &str {
    match name.split_once('.') {
        Some((schema, rest)) if schema.eq_ignore_ascii_case("main") => rest,
        _ => name,
    }
}

/// Keeps the items of one feature dataset (`Some`) or of the root (`None`).
pub fn in_dataset(items: Vec<CatalogItem>, feature_dataset: Option<&str>) -> Vec<CatalogItem> {
    items
        .into_iter()
        .filter(|item| item.parent_dataset().as_deref() == feature_dataset)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, path: &str) -> CatalogItem {
        CatalogItem {
            name: name.to_string(),
            path: path.to_string(),
        }
    }

    #[test]
    fn test_parent_dataset_from_path() {
        assert_eq!(item("Parcels", "\\Parcels").parent_dataset(), None);
        assert_eq!(
            item("Roads", "\\Transport\\Roads").parent_dataset(),
            Some("Transport".to_string())
        );
        assert_eq!(
            item("main.Roads", "\\main.Transport\\main.Roads").parent_dataset(),
            Some("Transport".to_string())
        );
        assert_eq!(item("Orphan", "").parent_dataset(), None);
    }

    #[test]
    fn test_unqualified() {
        assert_eq!(unqualified("main.Parcels"), "Parcels");
        assert_eq!(unqualified("MAIN.Parcels"), "Parcels");
        assert_eq!(unqualified("Parcels"), "Parcels");
        assert_eq!(unqualified("other.Parcels"), "other.Parcels");
        assert_eq!(item("main.Wells", "\\main.Wells").display_name(), "Wells");
    }

    #[test]
    fn test_in_dataset_filters_by_parent() {
        let items = vec![
            item("Wells", "\\Wells"),
            item("Roads", "\\Transport\\Roads"),
            item("Rail", "\\Transport\\Rail"),
        ];

        let root = in_dataset(items.clone(), None);
        assert_eq!(root, vec![item("Wells", "\\Wells")]);

        let transport = in_dataset(items, Some("Transport"));
        assert_eq!(transport.len(), 2);
        assert_eq!(transport[1].display_name(), "Rail");
    }
}
