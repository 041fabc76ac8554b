//! End-to-end audits of `.gdb` file geodatabases.
//!
//! Fixtures are written with GDAL's OpenFileGDB driver, so these tests need
//! a system GDAL with write support for that driver (3.6 or later).

#![cfg(feature = "filegdb")]

use gdal::DriverManager;
use gdal::vector::{
    FieldValue, Geometry, LayerAccess, LayerOptions, OGRFieldType, OGRwkbGeometryType,
};
use gdbaudit_core::{AuditConfig, run_audit};
use std::path::PathBuf;
use tempfile::TempDir;

fn text(value: &str) -> FieldValue {
    FieldValue::StringValue(value.to_string())
}

/// File geodatabase with a root feature class, a `Transport` feature dataset
/// and an empty table.
fn utilities_gdb(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("Utilities.gdb");
    let driver = DriverManager::get_driver_by_name("OpenFileGDB").unwrap();
    let mut dataset = driver.create_vector_only(&path).unwrap();

    {
        let mut wells = dataset
            .create_layer(LayerOptions {
                name: "Wells",
                ty: OGRwkbGeometryType::wkbPoint,
                ..Default::default()
            })
            .unwrap();
        wells
            .create_defn_fields(&[
                ("Owner", OGRFieldType::OFTString),
                ("Depth", OGRFieldType::OFTReal),
            ])
            .unwrap();
        let rows = [(Some("Smith"), 10.0), (Some(""), 0.0), (None, 5.0)];
        for (owner, depth) in rows {
            let point = Geometry::from_wkt("POINT (1 2)").unwrap();
            match owner {
                Some(owner) => wells
                    .create_feature_fields(
                        point,
                        &["Owner", "Depth"],
                        &[text(owner), FieldValue::RealValue(depth)],
                    )
                    .unwrap(),
                None => wells
                    .create_feature_fields(point, &["Depth"], &[FieldValue::RealValue(depth)])
                    .unwrap(),
            }
        }
    }

    {
        let mut roads = dataset
            .create_layer(LayerOptions {
                name: "Roads",
                ty: OGRwkbGeometryType::wkbLineString,
                options: Some(&["FEATURE_DATASET=Transport"]),
                ..Default::default()
            })
            .unwrap();
        roads
            .create_defn_fields(&[("Name", OGRFieldType::OFTString)])
            .unwrap();
        for name in ["Main St", "  "] {
            let line = Geometry::from_wkt("LINESTRING (0 0,1 1)").unwrap();
            roads
                .create_feature_fields(line, &["Name"], &[text(name)])
                .unwrap();
        }
    }

    {
        let permits = dataset
            .create_layer(LayerOptions {
                name: "Permits",
                ty: OGRwkbGeometryType::wkbNone,
                ..Default::default()
            })
            .unwrap();
        permits
            .create_defn_fields(&[("Holder", OGRFieldType::OFTString)])
            .unwrap();
    }

    drop(dataset);
    path
}

#[tokio::test]
async fn test_file_geodatabase_audit() {
    let dir = TempDir::new().unwrap();
    let gdb = utilities_gdb(&dir);
    let output = dir.path().join("report.txt");

    let summary = run_audit(&gdb, &output, &AuditConfig::default())
        .await
        .unwrap();
    let report = std::fs::read_to_string(&output).unwrap();

    assert_eq!(summary.elements, 3);
    assert_eq!(summary.failed_elements, 0);
    assert!(report.contains(
        "Feature Class: Wells\nTotal records: 3\nOwner: 2 null records of 3 (66.7%)\n"
    ));
    assert!(report.contains(
        "Feature Class: Transport/Roads\nTotal records: 2\nName: 1 null records of 2 (50.0%)\n"
    ));
    assert!(report.contains("Table: Permits\nTotal records: 0\nno records\n"));
    assert!(!report.contains("Depth:"));
    assert!(!report.contains("OBJECTID:"));
    assert!(!report.contains("GDB_Items"));

    let wells = report.find("Feature Class: Wells").unwrap();
    let roads = report.find("Feature Class: Transport/Roads").unwrap();
    let permits = report.find("Table: Permits").unwrap();
    assert!(wells < roads && roads < permits);
}

#[tokio::test]
async fn test_file_geodatabase_catalog() {
    use gdbaudit_core::adapters::open_geodatabase;

    let dir = TempDir::new().unwrap();
    let gdb = utilities_gdb(&dir);
    let adapter = open_geodatabase(&gdb).await.unwrap();

    assert_eq!(adapter.list_feature_datasets().await.unwrap(), vec!["Transport"]);
    let root: Vec<String> = adapter
        .list_feature_classes(None)
        .await
        .unwrap()
        .into_iter()
        .map(|element| element.name)
        .collect();
    assert_eq!(root, vec!["Wells"]);
    let fields: Vec<String> = adapter
        .list_fields(&adapter.list_tables().await.unwrap()[0])
        .await
        .unwrap()
        .into_iter()
        .map(|field| field.name)
        .collect();
    assert_eq!(fields, vec!["Holder"]);
}
