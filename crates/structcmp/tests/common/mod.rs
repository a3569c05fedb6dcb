#![allow(dead_code)]

use structcmp::prelude::*;

pub const SRC: &str = "SRC";
pub const TGT: &str = "TGT";

/// Routes engine logs to the test output. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn run(
    dialect: DialectKind,
    source: &SchemaSnapshot,
    target: &SchemaSnapshot,
) -> SchemaComparison {
    init_tracing();
    let config = ComparisonConfig::new(
        SchemaConfig::new(SRC, dialect),
        SchemaConfig::new(TGT, dialect),
    );
    structcmp::compare(&config, source, target)
        .unwrap_or_else(|e| panic!("Comparison failed: {e}"))
}

pub fn names(comparison: &SchemaComparison) -> Vec<&str> {
    comparison
        .results
        .iter()
        .map(ObjectComparisonNode::name)
        .collect()
}

pub fn position(comparison: &SchemaComparison, table: &str) -> usize {
    comparison
        .results
        .iter()
        .position(|n| n.name() == table)
        .unwrap_or_else(|| panic!("Table {table} missing from results"))
}

pub fn child<'a>(
    node: &'a ObjectComparisonNode,
    object_type: DbObjectType,
    name: &str,
) -> &'a ObjectComparisonNode {
    node.find_child(object_type, name)
        .unwrap_or_else(|| panic!("{object_type} {name} missing under {}", node.name()))
}

// ================================================================
// Table builders
// ================================================================

pub fn id_column() -> ColumnDef {
    ColumnDef::new("ID", "NUMBER").precision(38, 0).not_null()
}

/// A table with a primary key on `ID`.
pub fn keyed(name: &str) -> TableDef {
    let pk = format!("PK_{name}");
    TableDef::new(name)
        .column(id_column())
        .constraint(ConstraintDef::primary_key(pk.clone(), ["ID"]))
        .index(IndexDef::new(pk, ["ID"]).unique())
}

/// A keyed table with one foreign key per parent.
pub fn referencing(name: &str, parents: &[&str]) -> TableDef {
    parents.iter().fold(keyed(name), |table, parent| {
        let column = format!("{parent}_ID");
        table
            .column(ColumnDef::new(column.clone(), "NUMBER").precision(38, 0))
            .constraint(ConstraintDef::foreign_key(
                format!("FK_{name}_{parent}"),
                [column],
                *parent,
                ["ID"],
            ))
    })
}

pub fn snapshot(schema: &str, tables: impl IntoIterator<Item = TableDef>) -> SchemaSnapshot {
    tables
        .into_iter()
        .fold(SchemaSnapshot::new().with_schema(schema), |s, t| {
            s.with_table(schema, t)
        })
}

/// Target side of the column update scenario.
pub fn update_column_target() -> TableDef {
    TableDef::new("UPDATE_COLUMN")
        .column(ColumnDef::new("ONLY_IN_TARGET_COL", "NUMBER").precision(38, 0))
        .column(id_column())
        .column(ColumnDef::new("C1", "VARCHAR2").length(10))
        .column(ColumnDef::new("C2", "VARCHAR2").length(10))
        .column(ColumnDef::new("C3", "NUMBER").precision(38, 0))
}

/// Source side of the column update scenario.
pub fn update_column_source() -> TableDef {
    TableDef::new("UPDATE_COLUMN")
        .column(id_column())
        .column(ColumnDef::new("C1", "VARCHAR2").length(100))
        .column(ColumnDef::new("C2", "DATE").not_null())
        .column(
            ColumnDef::new("C3", "NUMBER")
                .precision(38, 0)
                .default_value("0"),
        )
        .column(ColumnDef::new("ONLY_IN_SOURCE_COL", "NUMBER").precision(38, 0))
}
