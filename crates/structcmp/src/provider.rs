//! Metadata access.

use crate::definition::TableDef;
use crate::error::MetadataError;

/// Source of table metadata for one schema connection.
///
/// Implementations may block on I/O. Table names are returned in the
/// order the comparison output should follow for matched tables.
pub trait MetadataProvider {
    /// Names of the tables in `schema`.
    fn list_table_names(&self, schema: &str) -> Result<Vec<String>, MetadataError>;

    /// Full definition of one table.
    fn table_definition(&self, schema: &str, table: &str) -> Result<TableDef, MetadataError>;
}

impl<P: MetadataProvider + ?Sized> MetadataProvider for &P {
    fn list_table_names(&self, schema: &str) -> Result<Vec<String>, MetadataError> {
        (**self).list_table_names(schema)
    }

    fn table_definition(&self, schema: &str, table: &str) -> Result<TableDef, MetadataError> {
        (**self).table_definition(schema, table)
    }
}
