//! Table comparison.

use tracing::debug;

use super::{
    ColumnComparator, CompareContext, ConstraintComparator, IndexComparator, ObjectComparator,
    PartitionComparator,
};
use crate::definition::{ConstraintDef, ConstraintKind, IndexDef, TableDef};
use crate::dialect::DialectRules;
use crate::node::{ComparisonResult, DbObjectType, ObjectComparisonNode};
use crate::script::ChangeScriptGenerator;

/// Indexes the user defined, without the one backing the primary key.
pub(crate) fn explicit_indexes<'t>(
    dialect: &dyn DialectRules,
    table: &'t TableDef,
) -> Vec<&'t IndexDef> {
    let pk_name = table.primary_key().map(|pk| pk.name.as_str());
    table
        .indexes
        .iter()
        .filter(|i| pk_name.map_or(true, |pk| !dialect.same_identifier(&i.name, pk)))
        .collect()
}

/// Constraints compared as constraints.
///
/// Unique constraints that share their name with a unique index are
/// left to index comparison. NOT NULL checks the dialect folds into
/// column nullability are dropped.
pub(crate) fn explicit_constraints<'t>(
    dialect: &dyn DialectRules,
    table: &'t TableDef,
) -> Vec<&'t ConstraintDef> {
    table
        .constraints
        .iter()
        .filter(|c| {
            let shadowed = c.kind == ConstraintKind::Unique
                && table
                    .indexes
                    .iter()
                    .any(|i| i.unique && dialect.same_identifier(&i.name, &c.name));
            !shadowed && !dialect.is_implicit_not_null_check(c)
        })
        .collect()
}

/// Compares whole tables of one schema pair.
pub struct TableComparator<'a> {
    dialect: &'a dyn DialectRules,
    source_schema: &'a str,
    target_schema: &'a str,
}

impl<'a> TableComparator<'a> {
    /// Creates a comparator for one schema pair.
    pub fn new(dialect: &'a dyn DialectRules, source_schema: &'a str, target_schema: &'a str) -> Self {
        Self {
            dialect,
            source_schema,
            target_schema,
        }
    }

    fn generator(&self) -> ChangeScriptGenerator<'a> {
        ChangeScriptGenerator::new(self.dialect, self.source_schema, self.target_schema)
    }

    fn node(&self, name: &str, result: ComparisonResult) -> ObjectComparisonNode {
        ObjectComparisonNode::new(
            DbObjectType::Table,
            name,
            self.source_schema,
            self.target_schema,
            result,
        )
    }

    /// Compares a table present on both sides.
    ///
    /// Children come in the order columns, indexes, constraints,
    /// partitions. The table's own script stays empty.
    #[must_use]
    pub fn compare(&self, source: &TableDef, target: &TableDef) -> ObjectComparisonNode {
        let ctx = CompareContext::new(
            self.dialect,
            self.source_schema,
            self.target_schema,
            &target.name,
        );

        let mut children = ColumnComparator::new(ctx).compare(
            &source.columns.iter().collect::<Vec<_>>(),
            &target.columns.iter().collect::<Vec<_>>(),
        );
        children.extend(
            IndexComparator::new(ctx)
                .compare(
                    &explicit_indexes(self.dialect, source),
                    &explicit_indexes(self.dialect, target),
                ),
        );
        children.extend(ConstraintComparator::new(ctx).compare(
            &explicit_constraints(self.dialect, source),
            &explicit_constraints(self.dialect, target),
        ));
        children.extend(PartitionComparator::new(ctx).compare(
            &source.partitions.iter().collect::<Vec<_>>(),
            &target.partitions.iter().collect::<Vec<_>>(),
        ));

        let mut node = self
            .node(&target.name, ComparisonResult::Consistent)
            .with_children(children);
        node.source_ddl.clone_from(&source.ddl);
        node.target_ddl.clone_from(&target.ddl);
        debug!(table = %target.name, result = %node.result, "Compared table");
        node
    }

    /// A table only the source has: created in the target schema.
    #[must_use]
    pub fn only_in_source(&self, source: &TableDef) -> ObjectComparisonNode {
        let mut node = self
            .node(&source.name, ComparisonResult::OnlyInSource)
            .with_change_script(self.generator().create_table(source));
        node.source_ddl.clone_from(&source.ddl);
        node
    }

    /// A table only the target has: dropped from the target schema.
    #[must_use]
    pub fn only_in_target(&self, target: &TableDef) -> ObjectComparisonNode {
        let mut node = self
            .node(&target.name, ComparisonResult::OnlyInTarget)
            .with_change_script(self.generator().drop_table(&target.name));
        node.target_ddl.clone_from(&target.ddl);
        node
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::definition::{ColumnDef, PartitionDef, PartitionMethod};
    use crate::dialect::{MySqlDialect, OracleDialect};

    const ORACLE: OracleDialect = OracleDialect::new();
    const MYSQL: MySqlDialect = MySqlDialect::new();

    fn kinds(node: &ObjectComparisonNode) -> Vec<(DbObjectType, &str, ComparisonResult)> {
        node.children
            .iter()
            .map(|c| (c.object_type(), c.name(), c.result))
            .collect()
    }

    #[test]
    fn identical_tables_are_consistent_without_scripts() {
        let table = TableDef::new("T")
            .column(ColumnDef::new("ID", "NUMBER").not_null())
            .constraint(ConstraintDef::primary_key("PK_T", ["ID"]))
            .index(IndexDef::new("PK_T", ["ID"]).unique())
            .ddl("CREATE TABLE T (ID NUMBER)");
        let node = TableComparator::new(&ORACLE, "A", "B").compare(&table, &table);

        assert!(node.is_consistent());
        assert!(node.change_script.is_none());
        assert!(node.children.iter().all(|c| c.change_script.is_none()));
        assert_eq!(node.source_ddl.as_deref(), Some("CREATE TABLE T (ID NUMBER)"));
        assert_eq!(node.target_ddl, node.source_ddl);
    }

    #[test]
    fn children_are_grouped_by_kind() {
        let source = TableDef::new("t")
            .column(ColumnDef::new("id", "int").not_null())
            .column(ColumnDef::new("v", "int"))
            .constraint(ConstraintDef::primary_key("PRIMARY", ["id"]))
            .index(IndexDef::new("PRIMARY", ["id"]).unique())
            .index(IndexDef::new("idx_v", ["v"]))
            .partition(PartitionDef::new("p", PartitionMethod::Hash, "id").count(4));
        let target = TableDef::new("t")
            .column(ColumnDef::new("id", "int").not_null())
            .constraint(ConstraintDef::primary_key("PRIMARY", ["id"]))
            .index(IndexDef::new("PRIMARY", ["id"]).unique());

        let node = TableComparator::new(&MYSQL, "src", "tgt").compare(&source, &target);
        assert_eq!(node.result, ComparisonResult::Inconsistent);
        assert_eq!(
            kinds(&node),
            [
                (DbObjectType::Column, "id", ComparisonResult::Consistent),
                (DbObjectType::Column, "v", ComparisonResult::OnlyInSource),
                (DbObjectType::Index, "idx_v", ComparisonResult::OnlyInSource),
                (DbObjectType::Constraint, "PRIMARY", ComparisonResult::Consistent),
                (DbObjectType::Partition, "p", ComparisonResult::OnlyInSource),
            ]
        );
    }

    #[test]
    fn unique_constraint_is_compared_as_its_index() {
        let table = TableDef::new("t")
            .constraint(ConstraintDef::unique("uk_email", ["email"]))
            .index(IndexDef::new("uk_email", ["email"]).unique());
        assert!(explicit_constraints(&MYSQL, &table).is_empty());
        assert_eq!(explicit_indexes(&MYSQL, &table).len(), 1);
    }

    #[test]
    fn primary_key_index_matches_by_dialect_identifier_rules() {
        let table = TableDef::new("ÄRGER")
            .column(ColumnDef::new("ID", "NUMBER").not_null())
            .constraint(ConstraintDef::primary_key("PK_ÄRGER", ["ID"]))
            .index(IndexDef::new("pk_ärger", ["ID"]).unique())
            .index(IndexDef::new("IDX_ID", ["ID"]));
        let kept: Vec<&str> = explicit_indexes(&ORACLE, &table)
            .into_iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(kept, ["IDX_ID"]);
    }

    #[test]
    fn oracle_not_null_checks_are_folded() {
        let table = TableDef::new("T")
            .constraint(ConstraintDef::check("SYS_C0042", "\"ID\" IS NOT NULL"))
            .constraint(ConstraintDef::check("CK_POS", "\"ID\" > 0"));
        let kept: Vec<&str> = explicit_constraints(&ORACLE, &table)
            .into_iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(kept, ["CK_POS"]);
        assert_eq!(explicit_constraints(&MYSQL, &table).len(), 2);
    }

    #[test]
    fn one_sided_tables_carry_create_and_drop_scripts() {
        let table = TableDef::new("t")
            .column(ColumnDef::new("id", "int").not_null())
            .ddl("CREATE TABLE `t` (`id` int NOT NULL)");
        let comparator = TableComparator::new(&MYSQL, "src", "tgt");

        let created = comparator.only_in_source(&table);
        assert_eq!(created.result, ComparisonResult::OnlyInSource);
        assert_eq!(
            created.change_script.as_deref(),
            Some("CREATE TABLE `tgt`.`t` (\n    `id` int NOT NULL\n);\n")
        );
        assert!(created.source_ddl.is_some());
        assert!(created.children.is_empty());

        let dropped = comparator.only_in_target(&table);
        assert_eq!(dropped.result, ComparisonResult::OnlyInTarget);
        assert_eq!(
            dropped.change_script.as_deref(),
            Some("DROP TABLE `tgt`.`t`;\n")
        );
        assert!(dropped.target_ddl.is_some());
    }
}
