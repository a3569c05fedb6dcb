//! Column comparison.

use super::{same_text, CompareContext, ObjectComparator};
use crate::definition::ColumnDef;
use crate::dialect::DialectRules;

/// Whether two columns agree on everything but their comment.
///
/// Types compare case-insensitively. A `NULL` default counts as no
/// default. Auto-increment only counts where the dialect can render it.
pub(crate) fn same_column_attributes(
    dialect: &dyn DialectRules,
    source: &ColumnDef,
    target: &ColumnDef,
) -> bool {
    source.type_name.eq_ignore_ascii_case(&target.type_name)
        && source.length == target.length
        && source.precision == target.precision
        && source.scale == target.scale
        && source.nullable == target.nullable
        && source.effective_default() == target.effective_default()
        && same_text(source.collation.as_deref(), target.collation.as_deref())
        && (!dialect.supports_auto_increment() || source.auto_increment == target.auto_increment)
}

/// Compares the columns of one table pair.
pub struct ColumnComparator<'a> {
    ctx: CompareContext<'a>,
}

impl<'a> ColumnComparator<'a> {
    pub fn new(ctx: CompareContext<'a>) -> Self {
        Self { ctx }
    }
}

impl ObjectComparator for ColumnComparator<'_> {
    type Def = ColumnDef;

    fn context(&self) -> &CompareContext<'_> {
        &self.ctx
    }

    fn is_equivalent(&self, source: &ColumnDef, target: &ColumnDef) -> bool {
        same_column_attributes(self.ctx.dialect, source, target) && source.comment == target.comment
    }
}
