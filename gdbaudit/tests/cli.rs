//! Command-line behavior of the gdbaudit binary.

use std::process::Command;
use tempfile::TempDir;

fn gdbaudit() -> Command {
    Command::new(env!("CARGO_BIN_EXE_gdbaudit"))
}

#[test]
fn test_help_lists_arguments() {
    let output = gdbaudit().arg("--help").output().unwrap();

    assert!(output.status.success());
    let help = String::from_utf8_lossy(&output.stdout);
    assert!(help.contains("--format"));
    assert!(help.contains("--exclude-field"));
    assert!(help.contains("<GEODATABASE>"));
    assert!(help.contains("<OUTPUT>"));
}

#[test]
fn test_missing_arguments_fail() {
    let output = gdbaudit().output().unwrap();
    assert!(!output.status.success());

    let output = gdbaudit().arg("city.gpkg").output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_unknown_format_is_rejected() {
    let dir = TempDir::new().unwrap();
    let report = dir.path().join("nulls.txt");

    let output = gdbaudit()
        .args(["--format", "xml", "city.gpkg"])
        .arg(&report)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(!report.exists());
}

#[test]
fn test_missing_geodatabase_exits_with_error() {
    let dir = TempDir::new().unwrap();
    let report = dir.path().join("nulls.txt");

    let output = gdbaudit()
        .arg(dir.path().join("missing.gpkg"))
        .arg(&report)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(!report.exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing.gpkg"), "stderr was: {}", stderr);
}

#[test]
fn test_unreadable_file_geodatabase_directory_fails() {
    let dir = TempDir::new().unwrap();
    let gdb = dir.path().join("parcels.gdb");
    std::fs::create_dir(&gdb).unwrap();
    let report = dir.path().join("nulls.txt");

    let output = gdbaudit().arg(&gdb).arg(&report).output().unwrap();

    assert!(!output.status.success());
    assert!(!report.exists());
}

#[cfg(feature = "sqlite")]
#[test]
fn test_empty_database_produces_header_only_report() {
    let dir = TempDir::new().unwrap();
    let gdb = dir.path().join("empty.sqlite");
    std::fs::write(&gdb, b"").unwrap();
    let report = dir.path().join("nulls.txt");

    let output = gdbaudit().arg("-q").arg(&gdb).arg(&report).output().unwrap();

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let text = std::fs::read_to_string(&report).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Null-Value Analysis Report");
    assert_eq!(lines[2], format!("Geodatabase: {}", gdb.display()));
    assert_eq!(lines[3], "=".repeat(50));
    assert_eq!(lines.len(), 4);
}
