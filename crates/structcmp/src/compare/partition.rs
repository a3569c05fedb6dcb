//! Partition scheme comparison.

use super::{same_identifiers, CompareContext, ObjectComparator};
use crate::definition::{PartitionBound, PartitionDef};
use crate::dialect::DialectRules;

/// Partitioning expression with quotes and whitespace removed, lowercase.
fn normalize_expression(expr: &str) -> String {
    expr.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '`' | '"'))
        .flat_map(char::to_lowercase)
        .collect()
}

fn same_values(a: &PartitionBound, b: &PartitionBound) -> bool {
    a.values.len() == b.values.len()
        && a.values
            .iter()
            .zip(&b.values)
            .all(|(a, b)| a.trim().eq_ignore_ascii_case(b.trim()))
}

/// Whether both schemes partition by the same method and key.
pub(crate) fn same_partition_scheme(
    dialect: &dyn DialectRules,
    source: &PartitionDef,
    target: &PartitionDef,
) -> bool {
    if source.method != target.method {
        return false;
    }
    match (source.expression.as_deref(), target.expression.as_deref()) {
        (Some(s), Some(t)) => normalize_expression(s) == normalize_expression(t),
        (None, None) => same_identifiers(dialect, &source.columns, &target.columns),
        _ => false,
    }
}

/// Whether every partition present on both sides has the same values.
pub(crate) fn bounds_compatible(
    dialect: &dyn DialectRules,
    source: &PartitionDef,
    target: &PartitionDef,
) -> bool {
    source.definitions.iter().all(|s| {
        target
            .definitions
            .iter()
            .find(|t| dialect.same_identifier(&s.name, &t.name))
            .map_or(true, |t| same_values(s, t))
    })
}

/// Compares the partitioning schemes of one table pair.
pub struct PartitionComparator<'a> {
    ctx: CompareContext<'a>,
}

impl<'a> PartitionComparator<'a> {
    pub fn new(ctx: CompareContext<'a>) -> Self {
        Self { ctx }
    }
}

impl ObjectComparator for PartitionComparator<'_> {
    type Def = PartitionDef;

    fn context(&self) -> &CompareContext<'_> {
        &self.ctx
    }

    fn is_equivalent(&self, source: &PartitionDef, target: &PartitionDef) -> bool {
        let dialect = self.ctx.dialect;
        same_partition_scheme(dialect, source, target)
            && source.count == target.count
            && source.definitions.len() == target.definitions.len()
            && source.definitions.iter().all(|s| {
                target
                    .definitions
                    .iter()
                    .any(|t| dialect.same_identifier(&s.name, &t.name) && same_values(s, t))
            })
    }
}
