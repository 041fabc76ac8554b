//! Report writers.
//!
//! The auditor hands each element's result to a [`ReportSink`] as soon as it
//! is analyzed. The text sink writes blocks immediately; the JSON sink
//! collects them and writes one document when the run finishes.

use std::io::Write;

use crate::Result;
use crate::error::GdbAuditError;

use super::models::{AuditHeader, AuditReport, ElementAudit, ElementOutcome, FieldNullCount};

/// Title line of the text report.
pub const REPORT_TITLE: &str = "Null-Value Analysis Report";
/// Timestamp layout of the `Date:` header line.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Written once under the header.
pub const HEADER_RULE: &str = "==================================================";
/// Written after every element block.
pub const ELEMENT_SEPARATOR: &str = "--------------------------------------------------";

/// Destination for audit results.
pub trait ReportSink {
    /// Writes the report header. Called once, before any element.
    fn begin(&mut self, header: &AuditHeader) -> Result<()>;

    /// Writes one element's result.
    fn element(&mut self, audit: &ElementAudit) -> Result<()>;

    /// Completes the report and flushes the underlying writer.
    fn finish(&mut self) -> Result<()>;
}

/// Formats the text report header.
pub fn render_header(header: &AuditHeader) -> String {
    format!(
        "{}\nDate: {}\nGeodatabase: {}\n{}\n",
        REPORT_TITLE,
        header.generated_at.format(DATE_FORMAT),
        header.geodatabase,
        HEADER_RULE
    )
}

/// Formats the report line for a field with nulls.
pub fn render_field_line(field: &FieldNullCount) -> String {
    if field.all_null() {
        format!("{}: ALL RECORDS ARE NULL", field.field_name)
    } else {
        format!(
            "{}: {} null records of {} ({:.1}%)",
            field.field_name,
            field.null_count,
            field.total_records,
            field.percentage()
        )
    }
}

/// Formats one element block, separator included.
pub fn render_element(audit: &ElementAudit) -> String {
    let mut lines = vec![
        String::new(),
        format!("{}: {}", audit.kind.label(), audit.name),
    ];
    if let Some(total) = audit.total_records {
        lines.push(format!("Total records: {}", total));
    }

    match &audit.outcome {
        ElementOutcome::Empty => lines.push("no records".to_string()),
        ElementOutcome::Analyzed { fields } if fields.is_empty() => {
            lines.push("no null-valued fields found".to_string());
        }
        ElementOutcome::Analyzed { fields } => {
            lines.extend(fields.iter().map(render_field_line));
        }
        ElementOutcome::Failed { message } => {
            lines.push(format!("Error analyzing element: {}", message));
        }
    }

    lines.push(ELEMENT_SEPARATOR.to_string());

    let mut block = lines.join("\n");
    block.push('\n');
    block
}

fn write_failed(e: std::io::Error) -> GdbAuditError {
    GdbAuditError::io("Failed to write report", e)
}

/// Plain-text report writer.
#[derive(Debug)]
pub struct TextReport<W: Write> {
    writer: W,
}

impl<W: Write> TextReport<W> {
    /// Creates a text report over a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the report, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for TextReport<W> {
    fn begin(&mut self, header: &AuditHeader) -> Result<()> {
        self.writer
            .write_all(render_header(header).as_bytes())
            .map_err(write_failed)
    }

    fn element(&mut self, audit: &ElementAudit) -> Result<()> {
        self.writer
            .write_all(render_element(audit).as_bytes())
            .map_err(write_failed)
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush().map_err(write_failed)
    }
}

/// JSON report writer.
#[derive(Debug)]
pub struct JsonReport<W: Write> {
    writer: W,
    report: Option<AuditReport>,
}

impl<W: Write> JsonReport<W> {
    /// Creates a JSON report over a writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            report: None,
        }
    }

    /// Consumes the report, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for JsonReport<W> {
    fn begin(&mut self, header: &AuditHeader) -> Result<()> {
        self.report = Some(AuditReport {
            header: header.clone(),
            elements: Vec::new(),
        });
        Ok(())
    }

    fn element(&mut self, audit: &ElementAudit) -> Result<()> {
        let report = self
            .report
            .as_mut()
            .ok_or_else(|| GdbAuditError::configuration("JSON report element before header"))?;
        report.elements.push(audit.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let report = self
            .report
            .take()
            .ok_or_else(|| GdbAuditError::configuration("JSON report finished before header"))?;

        serde_json::to_writer_pretty(&mut self.writer, &report).map_err(|e| {
            GdbAuditError::Serialization {
                context: "Failed to serialize JSON report".to_string(),
                source: e,
            }
        })?;
        self.writer.write_all(b"\n").map_err(write_failed)?;
        self.writer.flush().map_err(write_failed)
    }
}
