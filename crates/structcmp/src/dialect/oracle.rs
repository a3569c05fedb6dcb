//! Oracle dialect.

use super::{DialectKind, DialectRules};
use crate::definition::{
    ColumnDef, ConstraintDef, ConstraintKind, IndexDef, PartitionBound, PartitionMethod,
};

/// Oracle rules: double-quote quoting, upper-case identifier folding,
/// separate comment statements, NOT NULL checks folded into columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct OracleDialect;

impl OracleDialect {
    /// Creates a new Oracle dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn default_clause(column: &ColumnDef) -> String {
        format!(" DEFAULT {}", column.effective_default().unwrap_or("NULL"))
    }

    fn collate_clause(column: &ColumnDef) -> String {
        column
            .collation
            .as_ref()
            .map_or_else(String::new, |collation| format!(" COLLATE {collation}"))
    }
}

impl DialectRules for OracleDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::Oracle
    }

    fn quote_char(&self) -> char {
        '"'
    }

    fn normalize_identifier(&self, name: &str) -> String {
        name.to_uppercase()
    }

    fn column_definition(&self, column: &ColumnDef) -> String {
        format!(
            "{} {}{}{}{}",
            self.quote_identifier(&column.name),
            self.data_type(column),
            Self::collate_clause(column),
            if column.nullable { " NULL" } else { " NOT NULL" },
            Self::default_clause(column)
        )
    }

    fn inline_column_comments(&self) -> bool {
        false
    }

    fn supports_auto_increment(&self) -> bool {
        false
    }

    fn add_column(&self, table: &str, column: &ColumnDef) -> String {
        format!("ALTER TABLE {table} ADD {}", self.column_definition(column))
    }

    /// Restating the current nullability is an error in Oracle, so it is
    /// only emitted when it changes. A dropped collation falls back to
    /// the session default.
    fn modify_column(&self, table: &str, source: &ColumnDef, target: &ColumnDef) -> String {
        let nullability = match (source.nullable, target.nullable) {
            (false, true) => " NOT NULL",
            (true, false) => " NULL",
            _ => "",
        };
        let collation = match (&source.collation, &target.collation) {
            (None, Some(_)) => " COLLATE USING_NLS_COMP".to_string(),
            _ => Self::collate_clause(source),
        };
        format!(
            "ALTER TABLE {table} MODIFY {} {}{collation}{nullability}{}",
            self.quote_identifier(&source.name),
            self.data_type(source),
            Self::default_clause(source)
        )
    }

    fn drop_index(&self, _table: &str, index: &IndexDef) -> String {
        format!("DROP INDEX {}", self.quote_identifier(&index.name))
    }

    fn is_implicit_not_null_check(&self, constraint: &ConstraintDef) -> bool {
        constraint.kind == ConstraintKind::Check
            && constraint
                .check_clause
                .as_deref()
                .is_some_and(|clause| clause.trim_end().to_uppercase().ends_with("IS NOT NULL"))
    }

    fn partition_values(&self, method: PartitionMethod, bound: &PartitionBound) -> String {
        let values = bound.values.join(", ");
        if method.is_range() {
            format!(" VALUES LESS THAN ({values})")
        } else if method.is_list() {
            format!(" VALUES ({values})")
        } else {
            String::new()
        }
    }

    fn add_partition(
        &self,
        table: &str,
        method: PartitionMethod,
        bound: &PartitionBound,
    ) -> String {
        format!(
            "ALTER TABLE {table} ADD {}",
            self.partition_bound(method, bound)
        )
    }
}
