//! Comparison configuration.

use serde::{Deserialize, Serialize};

use crate::dialect::DialectKind;
use crate::error::{CompareError, Result};
use crate::node::DbObjectType;

fn default_object_types() -> Vec<DbObjectType> {
    vec![DbObjectType::Table]
}

/// One side of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Schema to read metadata from.
    pub schema_name: String,
    /// SQL dialect of the schema's database.
    pub dialect: DialectKind,
    /// Object types to compare.
    #[serde(default = "default_object_types")]
    pub object_types: Vec<DbObjectType>,
}

impl SchemaConfig {
    /// Creates a configuration comparing tables.
    pub fn new(schema_name: impl Into<String>, dialect: DialectKind) -> Self {
        Self {
            schema_name: schema_name.into(),
            dialect,
            object_types: default_object_types(),
        }
    }

    /// Replaces the compared object types.
    #[must_use]
    pub fn object_types(mut self, object_types: impl IntoIterator<Item = DbObjectType>) -> Self {
        self.object_types = object_types.into_iter().collect();
        self
    }
}

/// Both sides of a comparison plus an optional table filter.
///
/// ```
/// use structcmp::config::ComparisonConfig;
///
/// let config = ComparisonConfig::from_json(r#"{
///     "source": {"schema_name": "prod", "dialect": "ORACLE"},
///     "target": {"schema_name": "test", "dialect": "ORACLE"},
///     "table_names": ["ORDERS"]
/// }"#).unwrap();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonConfig {
    /// Schema whose structure is desired.
    pub source: SchemaConfig,
    /// Schema the change scripts apply to.
    pub target: SchemaConfig,
    /// Restricts the comparison to these tables when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_names: Option<Vec<String>>,
}

impl ComparisonConfig {
    /// Creates a configuration comparing every table.
    pub fn new(source: SchemaConfig, target: SchemaConfig) -> Self {
        Self {
            source,
            target,
            table_names: None,
        }
    }

    /// Restricts the comparison to the given tables.
    #[must_use]
    pub fn table_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.table_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Checks the configuration before any metadata is read.
    ///
    /// All problems are reported: a single one as
    /// [`CompareError::Config`], several as [`CompareError::Multiple`].
    pub fn validate(&self) -> Result<()> {
        validate_pair(&self.source, &self.target)
    }
}

/// Validates a source/target pair.
pub(crate) fn validate_pair(source: &SchemaConfig, target: &SchemaConfig) -> Result<()> {
    let mut problems = Vec::new();

    if source.schema_name.trim().is_empty() || target.schema_name.trim().is_empty() {
        problems.push("Schema name must not be empty".to_string());
    }

    if source.dialect != target.dialect {
        problems.push("The dialect type of source and target schema must be equal".to_string());
    } else if source.dialect.rules().is_none() {
        problems.push(format!(
            "Unsupported dialect type for schema structure comparison: {}",
            source.dialect
        ));
    }

    let mut unsupported: Vec<DbObjectType> = source
        .object_types
        .iter()
        .chain(&target.object_types)
        .copied()
        .filter(|t| *t != DbObjectType::Table)
        .collect();
    unsupported.sort_unstable();
    unsupported.dedup();
    problems.extend(unsupported.into_iter().map(|t| {
        format!("Unsupported database object type for schema structure comparison: {t}")
    }));

    let mut source_types = source.object_types.clone();
    let mut target_types = target.object_types.clone();
    source_types.sort_unstable();
    source_types.dedup();
    target_types.sort_unstable();
    target_types.dedup();
    if source_types != target_types {
        problems.push("The object types of source and target schema must be equal".to_string());
    }

    match problems.len() {
        0 => Ok(()),
        1 => Err(CompareError::Config(problems.remove(0))),
        _ => Err(CompareError::Multiple(
            problems.into_iter().map(CompareError::Config).collect(),
        )),
    }
}
