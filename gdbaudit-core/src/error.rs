//! Error types for gdbaudit operations.
//!
//! Run-level failures (invalid input path, unreadable catalog, unwritable
//! report) surface as [`GdbAuditError`] and abort the audit. Failures while
//! analyzing a single element are captured in that element's report block
//! instead; see [`crate::audit::ElementOutcome::Failed`].

use std::path::Path;
use thiserror::Error;

/// Main error type for gdbaudit operations.
#[derive(Debug, Error)]
pub enum GdbAuditError {
    /// Input validation failed (e.g. the geodatabase path does not exist)
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// The geodatabase container is not one this build can read
    #[error("Unsupported geodatabase format: {format} ({reason})")]
    UnsupportedFormat { format: String, reason: String },

    /// Opening the geodatabase or reading its catalog failed
    #[error("Catalog access failed: {context}")]
    Catalog {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Counting or scanning records failed
    #[error("Query execution failed: {context}")]
    Query {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// I/O operation failed
    #[error("I/O operation failed: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON report serialization failed
    #[error("Serialization failed: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results with GdbAuditError
pub type Result<T> = std::result::Result<T, GdbAuditError>;

impl GdbAuditError {
    /// Creates a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates the validation error reported when a geodatabase path is missing
    pub fn geodatabase_not_found(path: &Path) -> Self {
        Self::validation(format!(
            "The specified geodatabase does not exist: {}",
            path.display()
        ))
    }

    /// Creates an unsupported format error
    pub fn unsupported_format(format: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
            reason: reason.into(),
        }
    }

    /// Creates a catalog error with context
    pub fn catalog_failed<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Catalog {
            context: context.into(),
            source: Box::new(error),
        }
    }

    /// Creates a query error wrapping a driver error
    pub fn query_failed<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Query {
            context: context.into(),
            source: Some(Box::new(error)),
        }
    }

    /// Creates a query error without an underlying driver error
    pub fn query(context: impl Into<String>) -> Self {
        Self::Query {
            context: context.into(),
            source: None,
        }
    }

    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates an I/O error tagged with the path involved
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Renders the error together with its source chain on one line.
    ///
    /// Used for the inline error line of a failed element, where the
    /// driver's message is usually the useful part.
    pub fn detailed_message(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}
