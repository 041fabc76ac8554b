//! Null-value auditor.
//!
//! Walks every feature class and table of a geodatabase, counts null or
//! blank values per attribute field and streams the results to a
//! [`ReportSink`]. A failure inside one element is recorded in that
//! element's block; only catalog and report failures abort the run.

use tracing::{debug, info, warn};

use crate::Result;
use crate::adapters::GeodatabaseAdapter;
use crate::models::ElementRef;

use super::config::AuditConfig;
use super::models::{AuditHeader, AuditSummary, ElementAudit, ElementOutcome, FieldNullCount};
use super::report::ReportSink;

/// Auditor counting null and blank values per field.
///
/// # Example
///
/// ```rust,no_run
/// use gdbaudit_core::adapters::MemoryGeodatabase;
/// use gdbaudit_core::audit::{AuditConfig, AuditHeader, NullAuditor, TextReport};
///
/// # async fn run() -> gdbaudit_core::Result<()> {
/// let gdb = MemoryGeodatabase::new();
/// let auditor = NullAuditor::new(AuditConfig::default());
/// let mut report = TextReport::new(std::io::stdout());
/// auditor.audit(&gdb, &AuditHeader::now("in-memory"), &mut report).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct NullAuditor {
    config: AuditConfig,
}

impl NullAuditor {
    /// Creates a new auditor with the given configuration.
    pub fn new(config: AuditConfig) -> Self {
        Self { config }
    }

    /// Returns a reference to the auditor configuration.
    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Lists every auditable element.
    ///
    /// Order: root feature classes, then the feature classes of each feature
    /// dataset (named `Dataset/Name`), then standalone tables.
    ///
    /// # Errors
    /// Returns error if any catalog listing fails.
    pub async fn enumerate_elements(
        &self,
        adapter: &dyn GeodatabaseAdapter,
    ) -> Result<Vec<ElementRef>> {
        let mut elements = adapter.list_feature_classes(None).await?;

        for dataset in adapter.list_feature_datasets().await? {
            let nested = adapter.list_feature_classes(Some(&dataset)).await?;
            debug!(
                "Feature dataset {} holds {} feature classes",
                dataset,
                nested.len()
            );
            elements.extend(
                nested
                    .into_iter()
                    .map(|element| element.within_dataset(&dataset)),
            );
        }

        elements.extend(adapter.list_tables().await?);
        Ok(elements)
    }

    /// Analyzes one feature class or table.
    ///
    /// Never fails: an error while counting, listing fields or scanning is
    /// logged as a warning and returned as [`ElementOutcome::Failed`].
    pub async fn analyze_element(
        &self,
        adapter: &dyn GeodatabaseAdapter,
        element: &ElementRef,
    ) -> ElementAudit {
        let mut total_records = None;

        let outcome = match self
            .scan_element(adapter, element, &mut total_records)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                let message = e.detailed_message();
                warn!("Error analyzing {}: {}", element.name, message);
                ElementOutcome::Failed { message }
            }
        };

        ElementAudit::new(element, total_records, outcome)
    }

    async fn scan_element(
        &self,
        adapter: &dyn GeodatabaseAdapter,
        element: &ElementRef,
        total_records: &mut Option<u64>,
    ) -> Result<ElementOutcome> {
        let total = adapter.record_count(element).await?;
        *total_records = Some(total);
        debug!("{} {}: {} records", element.kind, element.name, total);

        if total == 0 {
            return Ok(ElementOutcome::Empty);
        }

        let fields = adapter.list_fields(element).await?;
        let mut with_nulls = Vec::new();

        for field in fields.iter().filter(|field| !self.config.is_excluded(field)) {
            let null_count = adapter.count_null_values(element, field).await?;
            if null_count > 0 {
                with_nulls.push(FieldNullCount::new(&field.name, null_count, total));
            }
        }

        Ok(ElementOutcome::Analyzed { fields: with_nulls })
    }

    /// Audits every element of a geodatabase into a report sink.
    ///
    /// # Errors
    /// Returns error if the catalog cannot be listed or the report cannot be
    /// written. Element failures are reported inline and do not fail the run.
    pub async fn audit(
        &self,
        adapter: &dyn GeodatabaseAdapter,
        header: &AuditHeader,
        sink: &mut dyn ReportSink,
    ) -> Result<AuditSummary> {
        sink.begin(header)?;

        let elements = self.enumerate_elements(adapter).await?;
        info!(
            "Auditing {} elements of {}",
            elements.len(),
            header.geodatabase
        );

        let mut summary = AuditSummary::default();
        for element in &elements {
            let audit = self.analyze_element(adapter, element).await;
            summary.record(&audit);
            sink.element(&audit)?;
        }

        sink.finish()?;

        info!(
            "Audited {} elements ({} failed), {} fields with null values",
            summary.elements, summary.failed_elements, summary.fields_with_nulls
        );
        Ok(summary)
    }
}
