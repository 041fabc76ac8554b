//! In-process geodatabase.
//!
//! Lets callers audit data they already hold in memory, and lets tests build
//! catalogs with exact field contents or elements that fail on access.

use super::GeodatabaseAdapter;
use crate::Result;
use crate::error::GdbAuditError;
use crate::models::{ElementRef, Field, FieldValue, GeodatabaseFormat, NullTally};
use async_trait::async_trait;

/// A feature class or table held in memory.
#[derive(Debug, Clone)]
pub struct MemoryElement {
    name: String,
    record_count: u64,
    columns: Vec<(Field, Vec<FieldValue>)>,
    failure: Option<String>,
}

impl MemoryElement {
    /// Creates an element with the given record count and no fields.
    pub fn new(name: impl Into<String>, record_count: u64) -> Self {
        Self {
            name: name.into(),
            record_count,
            columns: Vec::new(),
            failure: None,
        }
    }

    /// Builder method to add a field and its column of values.
    pub fn with_field(mut self, field: Field, values: Vec<FieldValue>) -> Self {
        self.columns.push((field, values));
        self
    }

    /// Builder method making every access to this element fail.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    fn check(&self) -> Result<()> {
        match &self.failure {
            Some(message) => Err(GdbAuditError::query(format!(
                "{} ({})",
                message, self.name
            ))),
            None => Ok(()),
        }
    }
}

/// Geodatabase whose catalog and records live in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryGeodatabase {
    feature_classes: Vec<MemoryElement>,
    feature_datasets: Vec<(String, Vec<MemoryElement>)>,
    tables: Vec<MemoryElement>,
}

impl MemoryGeodatabase {
    /// Creates an empty geodatabase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to add a root-level feature class.
    pub fn with_feature_class(mut self, element: MemoryElement) -> Self {
        self.feature_classes.push(element);
        self
    }

    /// Builder method to add a feature dataset and its feature classes.
    pub fn with_feature_dataset(
        mut self,
        name: impl Into<String>,
        feature_classes: Vec<MemoryElement>,
    ) -> Self {
        self.feature_datasets.push((name.into(), feature_classes));
        self
    }

    /// Builder method to add a standalone table.
    pub fn with_table(mut self, element: MemoryElement) -> Self {
        self.tables.push(element);
        self
    }

    fn lookup(&self, element: &ElementRef) -> Result<&MemoryElement> {
        self.feature_classes
            .iter()
            .chain(
                self.feature_datasets
                    .iter()
                    .flat_map(|(_, classes)| classes.iter()),
            )
            .chain(self.tables.iter())
            .find(|candidate| candidate.name == element.table)
            .ok_or_else(|| GdbAuditError::query(format!("Unknown element '{}'", element.name)))
    }
}

#[async_trait]
impl GeodatabaseAdapter for MemoryGeodatabase {
    fn format(&self) -> GeodatabaseFormat {
        GeodatabaseFormat::Memory
    }

    async fn list_feature_classes(
        &self,
        feature_dataset: Option<&str>,
    ) -> Result<Vec<ElementRef>> {
        let classes = match feature_dataset {
            None => self.feature_classes.as_slice(),
            Some(dataset) => self
                .feature_datasets
                .iter()
                .find(|(name, _)| name == dataset)
                .map(|(_, classes)| classes.as_slice())
                .ok_or_else(|| {
                    GdbAuditError::query(format!("Unknown feature dataset '{}'", dataset))
                })?,
        };

        Ok(classes
            .iter()
            .map(|element| ElementRef::feature_class(&element.name, &element.name))
            .collect())
    }

    async fn list_feature_datasets(&self) -> Result<Vec<String>> {
        Ok(self
            .feature_datasets
            .iter()
            .map(|(name, _)| name.clone())
            .collect())
    }

    async fn list_tables(&self) -> Result<Vec<ElementRef>> {
        Ok(self
            .tables
            .iter()
            .map(|element| ElementRef::table(&element.name, &element.name))
            .collect())
    }

    async fn record_count(&self, element: &ElementRef) -> Result<u64> {
        let stored = self.lookup(element)?;
        stored.check()?;
        Ok(stored.record_count)
    }

    async fn list_fields(&self, element: &ElementRef) -> Result<Vec<Field>> {
        let stored = self.lookup(element)?;
        stored.check()?;
        Ok(stored
            .columns
            .iter()
            .map(|(field, _)| field.clone())
            .collect())
    }

    async fn count_null_values(&self, element: &ElementRef, field: &Field) -> Result<u64> {
        let stored = self.lookup(element)?;
        stored.check()?;

        let (_, values) = stored
            .columns
            .iter()
            .find(|(candidate, _)| candidate.name == field.name)
            .ok_or_else(|| {
                GdbAuditError::query(format!(
                    "Unknown field '{}' in '{}'",
                    field.name, element.name
                ))
            })?;

        let mut tally = NullTally::default();
        for value in values {
            tally.observe(value);
        }

        if tally.scanned != stored.record_count {
            return Err(GdbAuditError::query(format!(
                "Field '{}' holds {} values but '{}' has {} records",
                field.name, tally.scanned, element.name, stored.record_count
            )));
        }

        Ok(tally.nulls)
    }
}
