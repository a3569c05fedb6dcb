//! Change-script generation.
//!
//! [`ChangeScriptGenerator`] turns one comparison outcome into DDL that
//! transforms the target object into the source object. Statements are
//! rendered by the active [`DialectRules`] and terminated with `;\n`.

use crate::compare::column::same_column_attributes;
use crate::compare::partition::{bounds_compatible, same_partition_scheme};
use crate::compare::table::{explicit_constraints, explicit_indexes};
use crate::definition::{
    ColumnDef, ConstraintDef, ConstraintKind, IndexDef, ObjectRef, PartitionDef, TableDef,
};
use crate::dialect::DialectRules;
use crate::node::ComparisonResult;

/// Script emitted when a primary key would have to be dropped on its own.
pub const UNSUPPORTED_DROP_PRIMARY_KEY: &str =
    "-- Unsupported operation to drop primary key constraint\n";

/// Script emitted when a primary key would have to be added on its own.
pub const UNSUPPORTED_ADD_PRIMARY_KEY: &str =
    "-- Unsupported operation to add primary key constraint\n";

/// Accumulates statements and comments into one script.
#[derive(Debug, Clone, Default)]
pub struct ScriptBuilder {
    buf: String,
}

impl ScriptBuilder {
    /// Creates an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a statement, terminating it with `;\n`. Blank input is
    /// ignored.
    pub fn statement(&mut self, sql: impl AsRef<str>) -> &mut Self {
        let sql = sql.as_ref().trim_end();
        if sql.is_empty() {
            return self;
        }
        self.buf.push_str(sql);
        if !sql.ends_with(';') {
            self.buf.push(';');
        }
        self.buf.push('\n');
        self
    }

    /// Appends a `-- ` comment line.
    pub fn comment(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.buf.push_str("-- ");
        self.buf.push_str(text.as_ref());
        self.buf.push('\n');
        self
    }

    /// Appends text verbatim.
    pub fn raw(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.buf.push_str(text.as_ref());
        self
    }

    /// Whether nothing has been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the script text.
    #[must_use]
    pub fn build(self) -> String {
        self.buf
    }
}

/// Ensures a script fragment ends with a statement terminator.
///
/// Fragments that already end in `;` only get a trailing newline if they
/// lack one. Fragments whose last line is a `--` comment are left alone.
#[must_use]
pub fn append_delimiter_if_missing(script: &str) -> String {
    let trimmed = script.trim_end();
    if trimmed.is_empty() {
        return String::new();
    }
    let last_line = trimmed.lines().last().unwrap_or_default().trim_start();
    if trimmed.ends_with(';') || last_line.starts_with("--") {
        format!("{trimmed}\n")
    } else {
        format!("{trimmed};\n")
    }
}

/// Renders DDL for one comparison outcome.
///
/// Table references are qualified with the target schema. Foreign keys
/// that point into the source schema are redirected to the target
/// schema.
#[derive(Clone, Copy)]
pub struct ChangeScriptGenerator<'a> {
    dialect: &'a dyn DialectRules,
    source_schema: &'a str,
    target_schema: &'a str,
}

impl<'a> ChangeScriptGenerator<'a> {
    /// Creates a generator for one source/target schema pair.
    pub fn new(dialect: &'a dyn DialectRules, source_schema: &'a str, target_schema: &'a str) -> Self {
        Self {
            dialect,
            source_schema,
            target_schema,
        }
    }

    /// Generates the script for any object outcome.
    ///
    /// `table` names the owning table of sub-objects and is ignored for
    /// tables themselves. CONSISTENT outcomes, INCONSISTENT tables (whose
    /// scripts live in their children) and mismatched definition kinds
    /// yield an empty script.
    #[must_use]
    pub fn generate(
        &self,
        table: &str,
        result: ComparisonResult,
        source: Option<ObjectRef<'_>>,
        target: Option<ObjectRef<'_>>,
    ) -> String {
        use ComparisonResult::{Consistent, Inconsistent, OnlyInSource, OnlyInTarget};
        use ObjectRef::{Column, Constraint, Index, Partition, Table};

        match (result, source, target) {
            (Consistent, _, _) => String::new(),

            (OnlyInSource, Some(Table(s)), _) => self.create_table(s),
            (OnlyInTarget, _, Some(Table(t))) => self.drop_table(&t.name),

            (OnlyInSource, Some(Column(s)), _) => self.add_column(table, s),
            (OnlyInTarget, _, Some(Column(t))) => self.drop_column(table, t),
            (Inconsistent, Some(Column(s)), Some(Column(t))) => self.modify_column(table, s, t),

            (OnlyInSource, Some(Index(s)), _) => self.create_index(table, s),
            (OnlyInTarget, _, Some(Index(t))) => self.drop_index(table, t),
            (Inconsistent, Some(Index(s)), Some(Index(t))) => self.modify_index(table, s, t),

            (OnlyInSource, Some(Constraint(s)), _) => self.add_constraint(table, s),
            (OnlyInTarget, _, Some(Constraint(t))) => self.drop_constraint(table, t),
            (Inconsistent, Some(Constraint(s)), Some(Constraint(t))) => {
                self.modify_constraint(table, s, t)
            }

            (OnlyInSource, Some(Partition(s)), _) => self.add_partitioning(table, s),
            (OnlyInTarget, _, Some(Partition(_))) => self.remove_partitioning(table),
            (Inconsistent, Some(Partition(s)), Some(Partition(t))) => {
                self.modify_partitioning(table, s, t)
            }

            _ => String::new(),
        }
    }

    fn table_ref(&self, table: &str) -> String {
        self.dialect.qualified_name(self.target_schema, table)
    }

    /// Points a source-schema foreign key at the target schema.
    fn retarget(&self, constraint: &ConstraintDef) -> ConstraintDef {
        let mut constraint = constraint.clone();
        if let Some(target) = constraint.references.as_mut() {
            let local = target
                .schema
                .as_deref()
                .map_or(true, |s| self.dialect.same_identifier(s, self.source_schema));
            if local {
                target.schema = None;
            }
        }
        constraint
    }

    // ---- tables ----

    /// `CREATE TABLE` for a source table in the target schema, followed
    /// by its explicit indexes and, where comments are not inline,
    /// comment statements.
    #[must_use]
    pub fn create_table(&self, source: &TableDef) -> String {
        let table = self.table_ref(&source.name);
        let mut lines: Vec<String> = source
            .columns
            .iter()
            .map(|c| format!("    {}", self.dialect.column_definition(c)))
            .collect();
        lines.extend(explicit_constraints(self.dialect, source).into_iter().map(|c| {
            format!(
                "    {}",
                self.dialect
                    .constraint_definition(self.target_schema, &self.retarget(c))
            )
        }));

        let mut sql = format!("CREATE TABLE {table} (\n{}\n)", lines.join(",\n"));
        if let Some(partition) = source.partitions.first() {
            sql.push(' ');
            sql.push_str(&self.dialect.partition_clause(partition));
        }

        let mut script = ScriptBuilder::new();
        script.statement(sql);
        for index in explicit_indexes(self.dialect, source) {
            script.statement(self.dialect.create_index(&table, index));
        }
        if !self.dialect.inline_column_comments() {
            for column in source.columns.iter().filter(|c| c.comment.is_some()) {
                script.statement(self.dialect.comment_on_column(&table, column));
            }
        }
        script.build()
    }

    /// `DROP TABLE` in the target schema.
    #[must_use]
    pub fn drop_table(&self, table: &str) -> String {
        let mut script = ScriptBuilder::new();
        script.statement(self.dialect.drop_table(&self.table_ref(table)));
        script.build()
    }

    // ---- columns ----

    /// Adds a source column to the target table.
    #[must_use]
    pub fn add_column(&self, table: &str, column: &ColumnDef) -> String {
        let table = self.table_ref(table);
        let mut script = ScriptBuilder::new();
        script.statement(self.dialect.add_column(&table, column));
        if !self.dialect.inline_column_comments() && column.comment.is_some() {
            script.statement(self.dialect.comment_on_column(&table, column));
        }
        script.build()
    }

    /// Drops a target column.
    #[must_use]
    pub fn drop_column(&self, table: &str, column: &ColumnDef) -> String {
        let mut script = ScriptBuilder::new();
        script.statement(self.dialect.drop_column(&self.table_ref(table), column));
        script.build()
    }

    /// Redefines a target column after its source counterpart.
    #[must_use]
    pub fn modify_column(&self, table: &str, source: &ColumnDef, target: &ColumnDef) -> String {
        let table = self.table_ref(table);
        let inline = self.dialect.inline_column_comments();
        let attributes_changed = !same_column_attributes(self.dialect, source, target);
        let comment_changed = source.comment != target.comment;

        let mut script = ScriptBuilder::new();
        if attributes_changed || (comment_changed && inline) {
            script.statement(self.dialect.modify_column(&table, source, target));
        }
        if comment_changed && !inline {
            script.statement(self.dialect.comment_on_column(&table, source));
        }
        script.build()
    }

    // ---- indexes ----

    /// Creates a source index on the target table.
    #[must_use]
    pub fn create_index(&self, table: &str, index: &IndexDef) -> String {
        let mut script = ScriptBuilder::new();
        script.statement(self.dialect.create_index(&self.table_ref(table), index));
        script.build()
    }

    /// Drops a target index.
    #[must_use]
    pub fn drop_index(&self, table: &str, index: &IndexDef) -> String {
        let mut script = ScriptBuilder::new();
        script.statement(self.dialect.drop_index(&self.table_ref(table), index));
        script.build()
    }

    /// Drops the target index and recreates it after the source.
    #[must_use]
    pub fn modify_index(&self, table: &str, source: &IndexDef, target: &IndexDef) -> String {
        let table = self.table_ref(table);
        let mut script = ScriptBuilder::new();
        script
            .statement(self.dialect.drop_index(&table, target))
            .statement(self.dialect.create_index(&table, source));
        script.build()
    }

    // ---- constraints ----

    /// Adds a source constraint. A lone primary key yields a comment.
    #[must_use]
    pub fn add_constraint(&self, table: &str, constraint: &ConstraintDef) -> String {
        if constraint.kind == ConstraintKind::PrimaryKey {
            return UNSUPPORTED_ADD_PRIMARY_KEY.to_string();
        }
        let mut script = ScriptBuilder::new();
        script.statement(self.dialect.add_constraint(
            &self.table_ref(table),
            self.target_schema,
            &self.retarget(constraint),
        ));
        script.build()
    }

    /// Drops a target constraint. A lone primary key yields a comment.
    #[must_use]
    pub fn drop_constraint(&self, table: &str, constraint: &ConstraintDef) -> String {
        if constraint.kind == ConstraintKind::PrimaryKey {
            return UNSUPPORTED_DROP_PRIMARY_KEY.to_string();
        }
        let mut script = ScriptBuilder::new();
        script.statement(self.dialect.drop_constraint(&self.table_ref(table), constraint));
        script.build()
    }

    /// Drops the target constraint and adds the source one. Primary keys
    /// present on both sides are replaced the same way.
    #[must_use]
    pub fn modify_constraint(
        &self,
        table: &str,
        source: &ConstraintDef,
        target: &ConstraintDef,
    ) -> String {
        let table = self.table_ref(table);
        let mut script = ScriptBuilder::new();
        script
            .statement(self.dialect.drop_constraint(&table, target))
            .statement(self.dialect.add_constraint(
                &table,
                self.target_schema,
                &self.retarget(source),
            ));
        script.build()
    }

    // ---- partitions ----

    /// Partitions the target table after the source scheme.
    #[must_use]
    pub fn add_partitioning(&self, table: &str, partition: &PartitionDef) -> String {
        let mut script = ScriptBuilder::new();
        script.statement(self.dialect.partition_table(&self.table_ref(table), partition));
        script.build()
    }

    /// Removes partitioning from the target table.
    #[must_use]
    pub fn remove_partitioning(&self, table: &str) -> String {
        let mut script = ScriptBuilder::new();
        script.statement(self.dialect.remove_partitioning(&self.table_ref(table)));
        script.build()
    }

    /// Brings the target scheme in line with the source scheme.
    ///
    /// Schemes sharing method and key whose common partitions agree are
    /// adjusted partition by partition: additions in source order, then
    /// drops in target order. Anything else re-partitions the table,
    /// as does an adjustment that would leave nothing to run.
    #[must_use]
    pub fn modify_partitioning(
        &self,
        table: &str,
        source: &PartitionDef,
        target: &PartitionDef,
    ) -> String {
        let table = self.table_ref(table);
        let mut script = ScriptBuilder::new();

        let incremental = same_partition_scheme(self.dialect, source, target)
            && source.count == target.count
            && !source.definitions.is_empty()
            && !target.definitions.is_empty()
            && bounds_compatible(self.dialect, source, target);
        if !incremental {
            script.statement(self.dialect.partition_table(&table, source));
            return script.build();
        }

        let in_other = |bound: &str, other: &PartitionDef| {
            other
                .definitions
                .iter()
                .any(|b| self.dialect.same_identifier(&b.name, bound))
        };
        for bound in &source.definitions {
            if !in_other(&bound.name, target) {
                script.statement(self.dialect.add_partition(&table, source.method, bound));
            }
        }
        for bound in &target.definitions {
            if !in_other(&bound.name, source) {
                script.statement(self.dialect.drop_partition(&table, bound));
            }
        }
        if script.is_empty() {
            script.statement(self.dialect.partition_table(&table, source));
        }
        script.build()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::definition::{IndexScope, PartitionBound, PartitionMethod};
    use crate::dialect::{MySqlDialect, OracleDialect};

    const ORACLE: OracleDialect = OracleDialect::new();
    const MYSQL: MySqlDialect = MySqlDialect::new();

    fn oracle() -> ChangeScriptGenerator<'static> {
        ChangeScriptGenerator::new(&ORACLE, "SRC", "TGT")
    }

    fn mysql() -> ChangeScriptGenerator<'static> {
        ChangeScriptGenerator::new(&MYSQL, "src", "tgt")
    }

    // ================================================================
    // ScriptBuilder
    // ================================================================

    #[test]
    fn builder_terminates_each_statement_once() {
        let mut script = ScriptBuilder::new();
        script
            .statement("DROP TABLE t")
            .statement("DROP TABLE u;")
            .statement("   ")
            .comment("done");
        assert_eq!(script.build(), "DROP TABLE t;\nDROP TABLE u;\n-- done\n");
    }

    #[test]
    fn delimiter_is_added_only_when_missing() {
        assert_eq!(append_delimiter_if_missing("DROP TABLE t"), "DROP TABLE t;\n");
        assert_eq!(append_delimiter_if_missing("DROP TABLE t;"), "DROP TABLE t;\n");
        assert_eq!(append_delimiter_if_missing("DROP TABLE t;\n"), "DROP TABLE t;\n");
        assert_eq!(
            append_delimiter_if_missing(UNSUPPORTED_ADD_PRIMARY_KEY),
            UNSUPPORTED_ADD_PRIMARY_KEY
        );
        assert_eq!(append_delimiter_if_missing("  \n"), "");
    }

    // ================================================================
    // Columns
    // ================================================================

    #[test]
    fn column_scripts_target_the_target_schema() {
        let column = ColumnDef::new("X", "NUMBER");
        assert_eq!(
            oracle().drop_column("T", &column),
            "ALTER TABLE \"TGT\".\"T\" DROP COLUMN \"X\";\n"
        );
        assert_eq!(
            oracle().add_column("T", &column),
            "ALTER TABLE \"TGT\".\"T\" ADD \"X\" NUMBER NULL DEFAULT NULL;\n"
        );
    }

    #[test]
    fn oracle_comment_only_change_skips_modify() {
        let source = ColumnDef::new("C", "NUMBER").comment("new");
        let target = ColumnDef::new("C", "NUMBER").comment("old");
        assert_eq!(
            oracle().modify_column("T", &source, &target),
            "COMMENT ON COLUMN \"TGT\".\"T\".\"C\" IS 'new';\n"
        );
    }

    #[test]
    fn oracle_collation_only_change_sets_the_collation() {
        let source = ColumnDef::new("A", "NUMBER").precision(10, 2).collation("BINARY_CI");
        let target = ColumnDef::new("A", "NUMBER").precision(10, 2);
        assert_eq!(
            oracle().modify_column("T", &source, &target),
            "ALTER TABLE \"TGT\".\"T\" MODIFY \"A\" NUMBER(10, 2) COLLATE BINARY_CI DEFAULT NULL;\n"
        );
    }

    #[test]
    fn mysql_comment_change_restates_column() {
        let source = ColumnDef::new("c", "int").comment("new");
        let target = ColumnDef::new("c", "int");
        assert_eq!(
            mysql().modify_column("t", &source, &target),
            "ALTER TABLE `tgt`.`t` MODIFY COLUMN `c` int NULL COMMENT 'new';\n"
        );
    }

    // ================================================================
    // Indexes and constraints
    // ================================================================

    #[test]
    fn index_modification_is_drop_then_create() {
        let source = IndexDef::new("IDX1", ["C1"])
            .algorithm("BTREE")
            .scope(IndexScope::Global);
        let target = IndexDef::new("IDX1", ["C1", "C2"])
            .algorithm("BTREE")
            .scope(IndexScope::Global);
        assert_eq!(
            oracle().modify_index("T", &source, &target),
            "DROP INDEX \"IDX1\";\nCREATE INDEX \"IDX1\" USING BTREE ON \"TGT\".\"T\" (\"C1\") GLOBAL;\n"
        );
    }

    #[test]
    fn lone_primary_key_changes_are_unsupported() {
        let pk = ConstraintDef::primary_key("PK", ["ID"]);
        assert_eq!(oracle().add_constraint("T", &pk), UNSUPPORTED_ADD_PRIMARY_KEY);
        assert_eq!(oracle().drop_constraint("T", &pk), UNSUPPORTED_DROP_PRIMARY_KEY);
    }

    #[test]
    fn mysql_primary_key_modification_drops_then_adds() {
        let source = ConstraintDef::primary_key("PRIMARY", ["id", "tenant"]);
        let target = ConstraintDef::primary_key("PRIMARY", ["id"]);
        assert_eq!(
            mysql().modify_constraint("t", &source, &target),
            "ALTER TABLE `tgt`.`t` DROP PRIMARY KEY;\nALTER TABLE `tgt`.`t` ADD CONSTRAINT `PRIMARY` PRIMARY KEY (`id`, `tenant`);\n"
        );
    }

    #[test]
    fn foreign_keys_into_source_schema_are_retargeted() {
        let local = ConstraintDef::foreign_key("FK", ["ID2", "ID1"], "FK_PARENT", ["P1", "P2"])
            .referencing_schema("src");
        assert_eq!(
            oracle().add_constraint("FK_CHILD", &local),
            "ALTER TABLE \"TGT\".\"FK_CHILD\" ADD CONSTRAINT \"FK\" FOREIGN KEY (\"ID2\", \"ID1\") REFERENCES \"TGT\".\"FK_PARENT\" (\"P1\", \"P2\");\n"
        );

        let foreign = ConstraintDef::foreign_key("FK", ["A"], "P", ["ID"]).referencing_schema("SHARED");
        assert!(oracle()
            .add_constraint("C", &foreign)
            .contains("REFERENCES \"SHARED\".\"P\""));
    }

    #[test]
    fn check_constraint_add_and_drop() {
        let check = ConstraintDef::check("CHECK_X", "(\"A\" > 0)");
        assert_eq!(
            oracle().add_constraint("T", &check),
            "ALTER TABLE \"TGT\".\"T\" ADD CONSTRAINT \"CHECK_X\" CHECK ((\"A\" > 0));\n"
        );
        assert_eq!(
            oracle().drop_constraint("T", &check),
            "ALTER TABLE \"TGT\".\"T\" DROP CONSTRAINT \"CHECK_X\";\n"
        );
    }

    // ================================================================
    // Partitions
    // ================================================================

    fn ranged(bounds: &[(&str, &str)]) -> PartitionDef {
        bounds.iter().fold(
            PartitionDef::new("p", PartitionMethod::Range, "id"),
            |p, (name, value)| p.bound(PartitionBound::new(*name, [*value])),
        )
    }

    #[test]
    fn same_scheme_adds_then_drops_partitions() {
        let source = ranged(&[("p1", "10"), ("p2", "20"), ("p3", "30")]);
        let target = ranged(&[("p1", "10"), ("p2", "20"), ("p4", "40")]);
        assert_eq!(
            mysql().modify_partitioning("t", &source, &target),
            "ALTER TABLE `tgt`.`t` ADD PARTITION (PARTITION `p3` VALUES LESS THAN (30));\nALTER TABLE `tgt`.`t` DROP PARTITION (`p4`);\n"
        );
    }

    #[test]
    fn changed_method_repartitions() {
        let source = PartitionDef::new("p", PartitionMethod::Hash, "id").count(4);
        let target = ranged(&[("p1", "10")]);
        assert_eq!(
            mysql().modify_partitioning("t", &source, &target),
            "ALTER TABLE `tgt`.`t` PARTITION BY HASH(id)\nPARTITIONS 4;\n"
        );
    }

    #[test]
    fn moved_bound_repartitions() {
        let source = ranged(&[("p1", "15")]);
        let target = ranged(&[("p1", "10")]);
        assert!(mysql()
            .modify_partitioning("t", &source, &target)
            .starts_with("ALTER TABLE `tgt`.`t` PARTITION BY RANGE(id) ("));
    }

    #[test]
    fn reordered_bounds_repartition_rather_than_emit_nothing() {
        let source = ranged(&[("p2", "20"), ("p1", "10")]);
        let target = ranged(&[("p1", "10"), ("p2", "20")]);
        assert!(mysql()
            .modify_partitioning("t", &source, &target)
            .starts_with("ALTER TABLE `tgt`.`t` PARTITION BY RANGE(id) ("));
    }

    #[test]
    fn removed_partitioning() {
        assert_eq!(
            mysql().remove_partitioning("t"),
            "ALTER TABLE `tgt`.`t` REMOVE PARTITIONING;\n"
        );
    }

    // ================================================================
    // Tables
    // ================================================================

    #[test]
    fn create_table_renders_columns_constraints_partition_and_indexes() {
        let table = TableDef::new("SALES")
            .column(ColumnDef::new("SALE_ID", "NUMBER").not_null())
            .column(ColumnDef::new("NOTE", "VARCHAR2").length(20).comment("free text"))
            .constraint(ConstraintDef::primary_key("PK_SALES", ["SALE_ID"]))
            .constraint(ConstraintDef::check("SYS_C1", "\"SALE_ID\" IS NOT NULL"))
            .index(IndexDef::new("PK_SALES", ["SALE_ID"]).unique())
            .index(IndexDef::new("IDX_NOTE", ["NOTE"]).scope(IndexScope::Local))
            .partition(PartitionDef::new("p", PartitionMethod::Hash, "sale_id").count(3));

        assert_eq!(
            oracle().create_table(&table),
            "CREATE TABLE \"TGT\".\"SALES\" (\n    \"SALE_ID\" NUMBER NOT NULL DEFAULT NULL,\n    \"NOTE\" VARCHAR2(20) NULL DEFAULT NULL,\n    CONSTRAINT \"PK_SALES\" PRIMARY KEY (\"SALE_ID\")\n) PARTITION BY HASH(sale_id)\nPARTITIONS 3;\nCREATE INDEX \"IDX_NOTE\" ON \"TGT\".\"SALES\" (\"NOTE\") LOCAL;\nCOMMENT ON COLUMN \"TGT\".\"SALES\".\"NOTE\" IS 'free text';\n"
        );
    }

    #[test]
    fn drop_table_is_qualified() {
        assert_eq!(oracle().drop_table("T"), "DROP TABLE \"TGT\".\"T\";\n");
    }

    // ================================================================
    // Dispatch
    // ================================================================

    #[test]
    fn generate_dispatches_on_result_and_kind() {
        let column = ColumnDef::new("X", "NUMBER");
        let index = IndexDef::new("I", ["X"]);
        let gen = oracle();

        assert_eq!(
            gen.generate(
                "T",
                ComparisonResult::OnlyInTarget,
                None,
                Some(ObjectRef::Column(&column))
            ),
            gen.drop_column("T", &column)
        );
        assert_eq!(
            gen.generate(
                "T",
                ComparisonResult::OnlyInSource,
                Some(ObjectRef::Index(&index)),
                None
            ),
            gen.create_index("T", &index)
        );
        assert!(gen
            .generate(
                "T",
                ComparisonResult::Consistent,
                Some(ObjectRef::Column(&column)),
                Some(ObjectRef::Column(&column))
            )
            .is_empty());
    }
}
