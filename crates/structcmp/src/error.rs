//! Error types for schema comparison.

use structcmp_graph::GraphError;

/// Errors reported by a [`MetadataProvider`](crate::provider::MetadataProvider).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetadataError {
    /// The schema does not exist.
    #[error("Schema not found: {0}")]
    SchemaNotFound(String),

    /// The table does not exist in the schema.
    #[error("Table not found: {schema}.{table}")]
    TableNotFound {
        /// Schema that was searched.
        schema: String,
        /// Table that is missing.
        table: String,
    },

    /// The metadata source failed or returned unusable data.
    #[error("Metadata access failed: {0}")]
    Access(String),
}

/// Errors that can occur while setting up or running a comparison.
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    /// The comparison configuration is invalid.
    #[error("Invalid comparison config: {0}")]
    Config(String),

    /// Schema-level metadata could not be read.
    #[error("Failed to read metadata of schema '{schema}': {source}")]
    Metadata {
        /// Schema whose metadata was requested.
        schema: String,
        /// Underlying provider error.
        #[source]
        source: MetadataError,
    },

    /// A graph operation failed.
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Multiple errors occurred.
    #[error("Multiple errors occurred:\n{}", .0.iter().map(|e| format!("  - {e}")).collect::<Vec<_>>().join("\n"))]
    Multiple(Vec<CompareError>),
}

/// Result type for comparison operations.
pub type Result<T> = std::result::Result<T, CompareError>;
