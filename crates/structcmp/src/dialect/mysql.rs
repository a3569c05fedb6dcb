//! MySQL dialect.

use super::{DialectKind, DialectRules};
use crate::definition::{
    ColumnDef, ConstraintDef, ConstraintKind, IndexDef, PartitionBound, PartitionMethod,
};

/// MySQL rules: backtick quoting, full column redefinition on modify,
/// kind-specific constraint drops.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDialect;

impl MySqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DialectRules for MySqlDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::MySql
    }

    fn quote_char(&self) -> char {
        '`'
    }

    fn column_definition(&self, column: &ColumnDef) -> String {
        let mut sql = format!(
            "{} {}",
            self.quote_identifier(&column.name),
            self.data_type(column)
        );
        if let Some(ref collation) = column.collation {
            sql.push_str(&format!(" COLLATE {collation}"));
        }
        sql.push_str(if column.nullable { " NULL" } else { " NOT NULL" });
        if let Some(default) = column.effective_default() {
            sql.push_str(&format!(" DEFAULT {default}"));
        }
        if column.auto_increment {
            sql.push_str(" AUTO_INCREMENT");
        }
        if let Some(ref comment) = column.comment {
            sql.push_str(&format!(" COMMENT {}", self.string_literal(comment)));
        }
        sql
    }

    fn add_column(&self, table: &str, column: &ColumnDef) -> String {
        format!(
            "ALTER TABLE {table} ADD COLUMN {}",
            self.column_definition(column)
        )
    }

    fn modify_column(&self, table: &str, source: &ColumnDef, _target: &ColumnDef) -> String {
        format!(
            "ALTER TABLE {table} MODIFY COLUMN {}",
            self.column_definition(source)
        )
    }

    fn drop_index(&self, table: &str, index: &IndexDef) -> String {
        format!(
            "ALTER TABLE {table} DROP INDEX {}",
            self.quote_identifier(&index.name)
        )
    }

    fn drop_constraint(&self, table: &str, constraint: &ConstraintDef) -> String {
        let name = self.quote_identifier(&constraint.name);
        match constraint.kind {
            ConstraintKind::PrimaryKey => format!("ALTER TABLE {table} DROP PRIMARY KEY"),
            ConstraintKind::ForeignKey => format!("ALTER TABLE {table} DROP FOREIGN KEY {name}"),
            ConstraintKind::Unique => format!("ALTER TABLE {table} DROP INDEX {name}"),
            ConstraintKind::Check => format!("ALTER TABLE {table} DROP CHECK {name}"),
        }
    }

    fn add_partition(
        &self,
        table: &str,
        method: PartitionMethod,
        bound: &PartitionBound,
    ) -> String {
        format!(
            "ALTER TABLE {table} ADD PARTITION ({})",
            self.partition_bound(method, bound)
        )
    }
}
