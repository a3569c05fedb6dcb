//! In-memory schema metadata.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::definition::TableDef;
use crate::error::{MetadataError, Result};
use crate::provider::MetadataProvider;

/// Pre-extracted table definitions, keyed by schema name.
///
/// Tables keep insertion order within a schema. Schema lookups are exact
/// and table lookups ignore ASCII case.
///
/// ```
/// use structcmp::definition::{ColumnDef, TableDef};
/// use structcmp::provider::MetadataProvider;
/// use structcmp::snapshot::SchemaSnapshot;
///
/// let snapshot = SchemaSnapshot::new()
///     .with_table("shop", TableDef::new("users").column(ColumnDef::new("id", "int")));
/// assert_eq!(snapshot.list_table_names("shop").unwrap(), ["users"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaSnapshot {
    schemas: BTreeMap<String, Vec<TableDef>>,
}

impl SchemaSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a snapshot from JSON of the form
    /// `{"schema": [table, ...], ...}`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the snapshot to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Registers an empty schema.
    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schemas.entry(schema.into()).or_default();
        self
    }

    /// Adds a table to a schema, creating the schema if needed.
    #[must_use]
    pub fn with_table(mut self, schema: impl Into<String>, table: TableDef) -> Self {
        self.add_table(schema, table);
        self
    }

    /// Adds a table to a schema, replacing a same-named table in place.
    pub fn add_table(&mut self, schema: impl Into<String>, table: TableDef) {
        let tables = self.schemas.entry(schema.into()).or_default();
        match tables
            .iter_mut()
            .find(|t| t.name.eq_ignore_ascii_case(&table.name))
        {
            Some(existing) => *existing = table,
            None => tables.push(table),
        }
    }

    /// Tables of a schema, if the schema is known.
    #[must_use]
    pub fn tables(&self, schema: &str) -> Option<&[TableDef]> {
        self.schemas.get(schema).map(Vec::as_slice)
    }
}

impl MetadataProvider for SchemaSnapshot {
    fn list_table_names(&self, schema: &str) -> std::result::Result<Vec<String>, MetadataError> {
        self.tables(schema)
            .map(|tables| tables.iter().map(|t| t.name.clone()).collect())
            .ok_or_else(|| MetadataError::SchemaNotFound(schema.to_string()))
    }

    fn table_definition(
        &self,
        schema: &str,
        table: &str,
    ) -> std::result::Result<TableDef, MetadataError> {
        self.tables(schema)
            .ok_or_else(|| MetadataError::SchemaNotFound(schema.to_string()))?
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(table))
            .cloned()
            .ok_or_else(|| MetadataError::TableNotFound {
                schema: schema.to_string(),
                table: table.to_string(),
            })
    }
}
