//! Constraint comparison.

use super::{same_identifiers, same_text, CompareContext, ObjectComparator};
use crate::definition::{ConstraintDef, ForeignKeyRef};

/// Compares the explicit constraints of one table pair.
///
/// A foreign key pointing into its own schema matches one pointing into
/// the other side's own schema, so a schema copied under a new name
/// compares equal.
pub struct ConstraintComparator<'a> {
    ctx: CompareContext<'a>,
}

impl<'a> ConstraintComparator<'a> {
    pub fn new(ctx: CompareContext<'a>) -> Self {
        Self { ctx }
    }

    fn same_reference(&self, source: &ForeignKeyRef, target: &ForeignKeyRef) -> bool {
        let dialect = self.ctx.dialect;
        let local = |r: &ForeignKeyRef, own: &str| {
            r.schema
                .as_deref()
                .map_or(true, |s| dialect.same_identifier(s, own))
        };
        let same_schema = match (
            local(source, self.ctx.source_schema),
            local(target, self.ctx.target_schema),
        ) {
            (true, true) => true,
            (false, false) => same_text(source.schema.as_deref(), target.schema.as_deref()),
            _ => false,
        };

        same_schema
            && dialect.same_identifier(&source.table, &target.table)
            && same_identifiers(dialect, &source.columns, &target.columns)
            && same_text(source.on_delete.as_deref(), target.on_delete.as_deref())
            && same_text(source.on_update.as_deref(), target.on_update.as_deref())
    }
}

impl ObjectComparator for ConstraintComparator<'_> {
    type Def = ConstraintDef;

    fn context(&self) -> &CompareContext<'_> {
        &self.ctx
    }

    fn is_equivalent(&self, source: &ConstraintDef, target: &ConstraintDef) -> bool {
        let references = match (&source.references, &target.references) {
            (Some(s), Some(t)) => self.same_reference(s, t),
            (None, None) => true,
            _ => false,
        };
        source.kind == target.kind
            && references
            && same_identifiers(self.ctx.dialect, &source.columns, &target.columns)
            && source.check_clause.as_deref().map(str::trim)
                == target.check_clause.as_deref().map(str::trim)
    }
}
