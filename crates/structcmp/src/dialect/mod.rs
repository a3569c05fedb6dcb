//! Dialect-specific identifier rules and DDL phrasing.
//!
//! Each statement builder returns one statement without its terminator;
//! [`ScriptBuilder`](crate::script::ScriptBuilder) appends `;\n`. Table
//! arguments named `table` are already qualified with
//! [`DialectRules::qualified_name`].

mod mysql;
mod oracle;

pub use mysql::MySqlDialect;
pub use oracle::OracleDialect;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::definition::{
    ColumnDef, ConstraintDef, ConstraintKind, IndexDef, PartitionBound, PartitionDef,
    PartitionMethod,
};

/// Database families a configuration can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DialectKind {
    /// MySQL and MySQL-compatible servers.
    #[serde(rename = "MYSQL")]
    MySql,
    /// Oracle-compatible servers.
    Oracle,
    /// PostgreSQL. Recognized, but not supported for comparison.
    #[serde(rename = "POSTGRESQL")]
    PostgreSql,
}

impl DialectKind {
    /// The rules for this dialect, if comparison supports it.
    #[must_use]
    pub fn rules(self) -> Option<Box<dyn DialectRules + Send + Sync>> {
        match self {
            Self::MySql => Some(Box::new(MySqlDialect::new())),
            Self::Oracle => Some(Box::new(OracleDialect::new())),
            Self::PostgreSql => None,
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MySql => "MYSQL",
            Self::Oracle => "ORACLE",
            Self::PostgreSql => "POSTGRESQL",
        })
    }
}

/// Identifier handling and DDL rendering for one SQL dialect.
pub trait DialectRules {
    /// Which dialect these rules implement.
    fn kind(&self) -> DialectKind;

    /// Identifier quote character.
    fn quote_char(&self) -> char;

    /// Quotes an identifier, doubling embedded quote characters.
    fn quote_identifier(&self, name: &str) -> String {
        let q = self.quote_char();
        let escaped = name.replace(q, &format!("{q}{q}"));
        format!("{q}{escaped}{q}")
    }

    /// Canonical form used to match identifiers across schemas.
    fn normalize_identifier(&self, name: &str) -> String {
        name.to_lowercase()
    }

    /// Whether two identifiers name the same object.
    fn same_identifier(&self, a: &str, b: &str) -> bool {
        self.normalize_identifier(a) == self.normalize_identifier(b)
    }

    /// `schema.name`, quoted. An empty schema yields just the name.
    fn qualified_name(&self, schema: &str, name: &str) -> String {
        if schema.is_empty() {
            self.quote_identifier(name)
        } else {
            format!(
                "{}.{}",
                self.quote_identifier(schema),
                self.quote_identifier(name)
            )
        }
    }

    /// Renders a string literal.
    fn string_literal(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    /// Quoted, comma-separated column list.
    fn column_list(&self, columns: &[String]) -> String {
        columns
            .iter()
            .map(|c| self.quote_identifier(c))
            .collect::<Vec<_>>()
            .join(", ")
    }

    // ---- columns ----

    /// Renders a column type with its length or precision.
    fn data_type(&self, column: &ColumnDef) -> String {
        match (column.length, column.precision, column.scale) {
            (Some(len), _, _) => format!("{}({len})", column.type_name),
            (None, Some(p), Some(s)) => format!("{}({p}, {s})", column.type_name),
            (None, Some(p), None) => format!("{}({p})", column.type_name),
            _ => column.type_name.clone(),
        }
    }

    /// Full column definition as used in `CREATE TABLE` and `ADD`.
    fn column_definition(&self, column: &ColumnDef) -> String;

    /// Whether column definitions can express auto-increment. When they
    /// cannot, the flag takes no part in column comparison.
    fn supports_auto_increment(&self) -> bool {
        true
    }

    /// Whether column comments are part of [`column_definition`](Self::column_definition).
    /// When they are not, comments are set with [`comment_on_column`](Self::comment_on_column).
    fn inline_column_comments(&self) -> bool {
        true
    }

    /// Sets a column comment with a separate statement.
    fn comment_on_column(&self, table: &str, column: &ColumnDef) -> String {
        format!(
            "COMMENT ON COLUMN {table}.{} IS {}",
            self.quote_identifier(&column.name),
            self.string_literal(column.comment.as_deref().unwrap_or_default())
        )
    }

    /// Adds a column.
    fn add_column(&self, table: &str, column: &ColumnDef) -> String;

    /// Changes `target` into `source` in place.
    fn modify_column(&self, table: &str, source: &ColumnDef, target: &ColumnDef) -> String;

    /// Drops a column.
    fn drop_column(&self, table: &str, column: &ColumnDef) -> String {
        format!(
            "ALTER TABLE {table} DROP COLUMN {}",
            self.quote_identifier(&column.name)
        )
    }

    // ---- indexes ----

    /// Creates an index.
    fn create_index(&self, table: &str, index: &IndexDef) -> String {
        let mut sql = String::from("CREATE ");
        if index.unique {
            sql.push_str("UNIQUE ");
        }
        sql.push_str("INDEX ");
        sql.push_str(&self.quote_identifier(&index.name));
        if let Some(ref algorithm) = index.algorithm {
            sql.push_str(&format!(" USING {algorithm}"));
        }
        sql.push_str(&format!(" ON {table} ({})", self.column_list(&index.columns)));
        if let Some(scope) = index.scope {
            sql.push(' ');
            sql.push_str(scope.as_sql());
        }
        sql
    }

    /// Drops an index.
    fn drop_index(&self, table: &str, index: &IndexDef) -> String;

    // ---- constraints ----

    /// Inline constraint definition. Foreign keys without an explicit
    /// reference schema point into `schema`.
    fn constraint_definition(&self, schema: &str, constraint: &ConstraintDef) -> String {
        let mut sql = format!("CONSTRAINT {} ", self.quote_identifier(&constraint.name));
        match constraint.kind {
            ConstraintKind::PrimaryKey | ConstraintKind::Unique => {
                sql.push_str(&format!(
                    "{} ({})",
                    constraint.kind,
                    self.column_list(&constraint.columns)
                ));
            }
            ConstraintKind::ForeignKey => {
                sql.push_str(&format!(
                    "FOREIGN KEY ({})",
                    self.column_list(&constraint.columns)
                ));
                if let Some(ref target) = constraint.references {
                    let target_schema = target.schema.as_deref().unwrap_or(schema);
                    sql.push_str(&format!(
                        " REFERENCES {} ({})",
                        self.qualified_name(target_schema, &target.table),
                        self.column_list(&target.columns)
                    ));
                    if let Some(ref action) = target.on_delete {
                        sql.push_str(&format!(" ON DELETE {action}"));
                    }
                    if let Some(ref action) = target.on_update {
                        sql.push_str(&format!(" ON UPDATE {action}"));
                    }
                }
            }
            ConstraintKind::Check => {
                sql.push_str(&format!(
                    "CHECK ({})",
                    constraint.check_clause.as_deref().unwrap_or_default()
                ));
            }
        }
        sql
    }

    /// Adds a constraint to an existing table.
    fn add_constraint(&self, table: &str, schema: &str, constraint: &ConstraintDef) -> String {
        format!(
            "ALTER TABLE {table} ADD {}",
            self.constraint_definition(schema, constraint)
        )
    }

    /// Drops a constraint.
    fn drop_constraint(&self, table: &str, constraint: &ConstraintDef) -> String {
        format!(
            "ALTER TABLE {table} DROP CONSTRAINT {}",
            self.quote_identifier(&constraint.name)
        )
    }

    /// Whether a constraint is implied by column nullability and must
    /// be left out of constraint comparison.
    fn is_implicit_not_null_check(&self, _constraint: &ConstraintDef) -> bool {
        false
    }

    // ---- partitions ----

    /// Value clause of one named partition.
    fn partition_values(&self, method: PartitionMethod, bound: &PartitionBound) -> String {
        let values = bound.values.join(", ");
        if method.is_range() {
            format!(" VALUES LESS THAN ({values})")
        } else if method.is_list() {
            format!(" VALUES IN ({values})")
        } else {
            String::new()
        }
    }

    /// `PARTITION name VALUES ...`.
    fn partition_bound(&self, method: PartitionMethod, bound: &PartitionBound) -> String {
        format!(
            "PARTITION {}{}",
            self.quote_identifier(&bound.name),
            self.partition_values(method, bound)
        )
    }

    /// `PARTITION BY ...` clause for `CREATE TABLE` and re-partitioning.
    fn partition_clause(&self, partition: &PartitionDef) -> String {
        let key = match partition.expression.as_deref() {
            Some(expr) if !expr.trim().is_empty() => expr.to_string(),
            _ => partition
                .columns
                .iter()
                .map(|c| self.quote_identifier(c))
                .collect::<Vec<_>>()
                .join(","),
        };
        let mut sql = format!("PARTITION BY {}({key})", partition.method.as_sql());
        if let Some(count) = partition.count {
            sql.push_str(&format!("\nPARTITIONS {count}"));
        }
        if !partition.definitions.is_empty() {
            let bounds: Vec<String> = partition
                .definitions
                .iter()
                .map(|b| format!("    {}", self.partition_bound(partition.method, b)))
                .collect();
            sql.push_str(&format!(" (\n{}\n)", bounds.join(",\n")));
        }
        sql
    }

    /// Partitions a table, or re-partitions it under a new scheme.
    fn partition_table(&self, table: &str, partition: &PartitionDef) -> String {
        format!("ALTER TABLE {table} {}", self.partition_clause(partition))
    }

    /// Adds one named partition.
    fn add_partition(&self, table: &str, method: PartitionMethod, bound: &PartitionBound)
        -> String;

    /// Drops one named partition.
    fn drop_partition(&self, table: &str, bound: &PartitionBound) -> String {
        format!(
            "ALTER TABLE {table} DROP PARTITION ({})",
            self.quote_identifier(&bound.name)
        )
    }

    /// Turns a partitioned table into a plain one.
    fn remove_partitioning(&self, table: &str) -> String {
        format!("ALTER TABLE {table} REMOVE PARTITIONING")
    }

    // ---- tables ----

    /// Drops a table.
    fn drop_table(&self, table: &str) -> String {
        format!("DROP TABLE {table}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_doubles_embedded_quotes() {
        assert_eq!(OracleDialect::new().quote_identifier("a\"b"), "\"a\"\"b\"");
        assert_eq!(MySqlDialect::new().quote_identifier("a`b"), "`a``b`");
    }

    #[test]
    fn qualified_name_skips_empty_schema() {
        let dialect = OracleDialect::new();
        assert_eq!(dialect.qualified_name("S", "T"), "\"S\".\"T\"");
        assert_eq!(dialect.qualified_name("", "T"), "\"T\"");
    }

    #[test]
    fn data_type_renders_length_then_precision() {
        let dialect = OracleDialect::new();
        assert_eq!(
            dialect.data_type(&ColumnDef::new("c", "VARCHAR2").length(100)),
            "VARCHAR2(100)"
        );
        assert_eq!(
            dialect.data_type(&ColumnDef::new("c", "NUMBER").precision(38, 0)),
            "NUMBER(38, 0)"
        );
        assert_eq!(dialect.data_type(&ColumnDef::new("c", "DATE")), "DATE");
    }

    #[test]
    fn identifiers_match_case_insensitively() {
        assert!(MySqlDialect::new().same_identifier("Orders", "ORDERS"));
        assert!(OracleDialect::new().same_identifier("orders", "ORDERS"));
        assert!(!OracleDialect::new().same_identifier("orders", "order"));
    }

    #[test]
    fn kind_serializes_like_its_display() {
        for kind in [DialectKind::MySql, DialectKind::Oracle, DialectKind::PostgreSql] {
            assert_eq!(serde_json::to_value(kind).unwrap(), kind.to_string());
        }
    }

    #[test]
    fn unsupported_dialect_has_no_rules() {
        assert!(DialectKind::PostgreSql.rules().is_none());
        assert_eq!(DialectKind::Oracle.rules().unwrap().kind(), DialectKind::Oracle);
    }

    #[test]
    fn hash_partition_clause_with_count() {
        let partition =
            PartitionDef::new("p", PartitionMethod::Hash, "sale_id").count(3);
        assert_eq!(
            MySqlDialect::new().partition_clause(&partition),
            "PARTITION BY HASH(sale_id)\nPARTITIONS 3"
        );
    }

    #[test]
    fn range_columns_partition_clause_lists_bounds() {
        let partition = PartitionDef::on_columns("p", PartitionMethod::RangeColumns, ["d"])
            .bound(PartitionBound::new("p0", ["'2024-01-01'"]))
            .bound(PartitionBound::new("p1", ["MAXVALUE"]));
        assert_eq!(
            MySqlDialect::new().partition_clause(&partition),
            "PARTITION BY RANGE COLUMNS(`d`) (\n    PARTITION `p0` VALUES LESS THAN ('2024-01-01'),\n    PARTITION `p1` VALUES LESS THAN (MAXVALUE)\n)"
        );
    }
}
