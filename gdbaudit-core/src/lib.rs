//! Core library for gdbaudit.
//!
//! gdbaudit scans a geodatabase and reports, for every feature class and
//! table, how many records hold a null or blank value in each attribute
//! field.
//!
//! # Guarantees
//! - Geodatabases are opened read-only
//! - Reports contain counts and percentages only, never record values
//! - A failure in one element never aborts the audit of the others
//!
//! # Architecture
//! - `adapters`: [`GeodatabaseAdapter`] trait and container drivers
//! - `audit`: element enumeration, null counting and report writers
//! - `models`: catalog and value types shared by both

pub mod adapters;
pub mod audit;
pub mod error;
pub mod logging;
pub mod models;

// Re-export commonly used types
pub use adapters::{GeodatabaseAdapter, open_geodatabase};
pub use audit::{AuditConfig, AuditSummary, NullAuditor, ReportFormat, run_audit};
pub use error::{GdbAuditError, Result};
pub use logging::init_logging;
pub use models::{ElementKind, ElementRef, Field, FieldType, FieldValue, GeodatabaseFormat};
