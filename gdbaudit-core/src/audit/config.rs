//! Audit configuration.

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::error::GdbAuditError;
use crate::models::Field;

/// Field names that are never audited, whatever their type.
pub const DEFAULT_EXCLUDED_FIELDS: &[&str] = &["Shape", "SHAPE", "OBJECTID"];

/// Output format of the report file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Plain-text report
    #[default]
    Text,
    /// Structured JSON document
    Json,
}

/// Null-value audit configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Field names skipped in every element (exact, case-sensitive match)
    pub excluded_field_names: Vec<String>,
    /// Report output format
    pub format: ReportFormat,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            excluded_field_names: DEFAULT_EXCLUDED_FIELDS
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
            format: ReportFormat::Text,
        }
    }
}

impl AuditConfig {
    /// Creates a new audit config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to exclude one more field name.
    pub fn with_excluded_field(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.excluded_field_names.contains(&name) {
            self.excluded_field_names.push(name);
        }
        self
    }

    /// Builder method to set the report format.
    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns a configuration error if an excluded field name is blank.
    pub fn validate(&self) -> Result<()> {
        if self
            .excluded_field_names
            .iter()
            .any(|name| name.trim().is_empty())
        {
            return Err(GdbAuditError::configuration(
                "excluded field names must not be blank",
            ));
        }
        Ok(())
    }

    /// Returns true if the field is skipped: identifier or geometry typed, or
    /// named in the exclusion set.
    pub fn is_excluded(&self, field: &Field) -> bool {
        field.field_type.is_system()
            || self
                .excluded_field_names
                .iter()
                .any(|name| name == &field.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldType;

    #[test]
    fn test_default_exclusions() {
        let config = AuditConfig::default();

        assert!(config.is_excluded(&Field::new("Shape", FieldType::Blob)));
        assert!(config.is_excluded(&Field::new("SHAPE", FieldType::String)));
        assert!(config.is_excluded(&Field::new("OBJECTID", FieldType::Integer)));
        assert!(config.is_excluded(&Field::new("fid", FieldType::ObjectId)));
        assert!(config.is_excluded(&Field::new("geom", FieldType::Geometry)));
        assert!(!config.is_excluded(&Field::new("Owner", FieldType::String)));
    }

    #[test]
    fn test_exclusion_names_are_case_sensitive() {
        let config = AuditConfig::default();
        assert!(!config.is_excluded(&Field::new("shape", FieldType::String)));
        assert!(!config.is_excluded(&Field::new("ObjectId", FieldType::Integer)));
    }

    #[test]
    fn test_with_excluded_field() {
        let config = AuditConfig::new()
            .with_excluded_field("GlobalID")
            .with_excluded_field("GlobalID");

        assert_eq!(config.excluded_field_names.len(), 4);
        assert!(config.is_excluded(&Field::new("GlobalID", FieldType::GlobalId)));
    }

    #[test]
    fn test_validate_rejects_blank_names() {
        assert!(AuditConfig::default().validate().is_ok());
        assert!(
            AuditConfig::default()
                .with_excluded_field("  ")
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_format_default_is_text() {
        assert_eq!(AuditConfig::default().format, ReportFormat::Text);
        let config = AuditConfig::default().with_format(ReportFormat::Json);
        assert_eq!(config.format, ReportFormat::Json);
    }
}
