//! Null-value audit of geodatabase elements.
//!
//! This module provides:
//! - **Configuration**: field exclusions and report format
//! - **Auditor**: element enumeration and per-element null counting
//! - **Reports**: plain-text and JSON writers
//!
//! # Example
//! ```rust,no_run
//! use gdbaudit_core::audit::{AuditConfig, run_audit};
//! use std::path::Path;
//!
//! # async fn run() -> gdbaudit_core::Result<()> {
//! let summary = run_audit(
//!     Path::new("city.gpkg"),
//!     Path::new("nulls.txt"),
//!     &AuditConfig::default(),
//! )
//! .await?;
//! println!("{} elements audited", summary.elements);
//! # Ok(())
//! # }
//! ```

mod auditor;
mod config;
mod models;
mod report;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tracing::info;

use crate::Result;
use crate::adapters::{open_geodatabase, validate_geodatabase_path};
use crate::error::GdbAuditError;

// Re-export public API
pub use auditor::NullAuditor;
pub use config::{AuditConfig, DEFAULT_EXCLUDED_FIELDS, ReportFormat};
pub use models::{
    AuditHeader, AuditReport, AuditSummary, ElementAudit, ElementOutcome, FieldNullCount,
};
pub use report::{
    ELEMENT_SEPARATOR, HEADER_RULE, JsonReport, REPORT_TITLE, ReportSink, TextReport,
    render_element, render_field_line, render_header,
};

/// Audits the geodatabase at `geodatabase` and writes the report to `output`.
///
/// The geodatabase is validated and opened before the output file is
/// created, so an invalid input never leaves a report behind. The output file
/// is created (or truncated) before any element is analyzed.
///
/// # Errors
/// Returns error if:
/// - The configuration is invalid
/// - The geodatabase path does not exist or cannot be opened
/// - The output file cannot be created or written
/// - The catalog cannot be listed
pub async fn run_audit(
    geodatabase: &Path,
    output: &Path,
    config: &AuditConfig,
) -> Result<AuditSummary> {
    config.validate()?;
    validate_geodatabase_path(geodatabase)?;

    let adapter = open_geodatabase(geodatabase).await?;
    info!(
        "Opened {} geodatabase: {}",
        adapter.format(),
        geodatabase.display()
    );

    let file = File::create(output).map_err(|e| {
        GdbAuditError::io(
            format!("Failed to create report file {}", output.display()),
            e,
        )
    })?;
    let writer = BufWriter::new(file);

    let header = AuditHeader::now(geodatabase.display().to_string());
    let auditor = NullAuditor::new(config.clone());

    let summary = match config.format {
        ReportFormat::Text => {
            let mut report = TextReport::new(writer);
            auditor.audit(adapter.as_ref(), &header, &mut report).await?
        }
        ReportFormat::Json => {
            let mut report = JsonReport::new(writer);
            auditor.audit(adapter.as_ref(), &header, &mut report).await?
        }
    };

    info!("Report generated successfully at: {}", output.display());
    Ok(summary)
}
