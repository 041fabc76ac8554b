//! Audit result models.
//!
//! Results carry counts only; no record values ever reach the report.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::models::{ElementKind, ElementRef};

/// Null count of one audited field with at least one null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldNullCount {
    /// Field name
    pub field_name: String,
    /// Records whose value is null or blank
    pub null_count: u64,
    /// Total records of the element
    pub total_records: u64,
}

impl FieldNullCount {
    /// Creates a new field null count.
    pub fn new(field_name: impl Into<String>, null_count: u64, total_records: u64) -> Self {
        Self {
            field_name: field_name.into(),
            null_count,
            total_records,
        }
    }

    /// Every record of the element is null in this field.
    pub fn all_null(&self) -> bool {
        self.total_records > 0 && self.null_count == self.total_records
    }

    /// Share of null records as a percentage.
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> f64 {
        if self.total_records == 0 {
            return 0.0;
        }
        self.null_count as f64 / self.total_records as f64 * 100.0
    }
}

/// How the analysis of one element ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ElementOutcome {
    /// The element has no records
    Empty,
    /// Fields were scanned; only fields with nulls are listed
    Analyzed {
        /// Fields with at least one null, in field order
        fields: Vec<FieldNullCount>,
    },
    /// Analysis failed part way
    Failed {
        /// Error message, including the driver's cause
        message: String,
    },
}

/// Audit result for one feature class or table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementAudit {
    /// Display name (dataset-qualified for nested feature classes)
    pub name: String,
    /// Feature class or table
    pub kind: ElementKind,
    /// Total records, when the count succeeded
    pub total_records: Option<u64>,
    /// Outcome of the analysis
    pub outcome: ElementOutcome,
}

impl ElementAudit {
    /// Creates an audit result for an element.
    pub fn new(element: &ElementRef, total_records: Option<u64>, outcome: ElementOutcome) -> Self {
        Self {
            name: element.name.clone(),
            kind: element.kind,
            total_records,
            outcome,
        }
    }

    /// Returns true if the element's analysis failed.
    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, ElementOutcome::Failed { .. })
    }

    /// Fields with nulls (empty for empty or failed elements).
    pub fn null_fields(&self) -> &[FieldNullCount] {
        match &self.outcome {
            ElementOutcome::Analyzed { fields } => fields,
            ElementOutcome::Empty | ElementOutcome::Failed { .. } => &[],
        }
    }
}

/// Report header information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditHeader {
    /// Local time the report was generated
    pub generated_at: DateTime<Local>,
    /// Geodatabase path as given by the caller
    pub geodatabase: String,
}

impl AuditHeader {
    /// Creates a header stamped with the current local time.
    pub fn now(geodatabase: impl Into<String>) -> Self {
        Self {
            generated_at: Local::now(),
            geodatabase: geodatabase.into(),
        }
    }
}

/// Complete audit document, as written by the JSON report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    /// Report header
    #[serde(flatten)]
    pub header: AuditHeader,
    /// Per-element results in audit order
    pub elements: Vec<ElementAudit>,
}

/// Run totals returned to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSummary {
    /// Elements audited (including failed ones)
    pub elements: usize,
    /// Elements whose analysis failed
    pub failed_elements: usize,
    /// Fields with at least one null, across all elements
    pub fields_with_nulls: usize,
}

impl AuditSummary {
    /// Adds one element's result to the totals.
    pub fn record(&mut self, audit: &ElementAudit) {
        self.elements = self.elements.saturating_add(1);
        if audit.is_failed() {
            self.failed_elements = self.failed_elements.saturating_add(1);
        }
        self.fields_with_nulls = self
            .fields_with_nulls
            .saturating_add(audit.null_fields().len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        assert!((FieldNullCount::new("a", 1, 3).percentage() - 33.333).abs() < 0.001);
        assert!((FieldNullCount::new("a", 2, 3).percentage() - 66.666).abs() < 0.001);
        assert_eq!(FieldNullCount::new("a", 0, 0).percentage(), 0.0);
    }

    #[test]
    fn test_all_null() {
        assert!(FieldNullCount::new("a", 3, 3).all_null());
        assert!(!FieldNullCount::new("a", 2, 3).all_null());
        assert!(!FieldNullCount::new("a", 0, 0).all_null());
    }

    #[test]
    fn test_summary_record() {
        let element = ElementRef::table("Owners", "Owners");
        let mut summary = AuditSummary::default();

        summary.record(&ElementAudit::new(
            &element,
            Some(3),
            ElementOutcome::Analyzed {
                fields: vec![
                    FieldNullCount::new("a", 1, 3),
                    FieldNullCount::new("b", 3, 3),
                ],
            },
        ));
        summary.record(&ElementAudit::new(
            &element,
            None,
            ElementOutcome::Failed {
                message: "locked".to_string(),
            },
        ));

        assert_eq!(
            summary,
            AuditSummary {
                elements: 2,
                failed_elements: 1,
                fields_with_nulls: 2,
            }
        );
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(ElementOutcome::Empty).unwrap();
        assert_eq!(json["status"], "empty");
    }
}
