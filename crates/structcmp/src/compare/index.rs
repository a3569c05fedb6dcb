//! Index comparison.

use super::{same_identifiers, same_text, CompareContext, ObjectComparator};
use crate::definition::IndexDef;

/// Compares the explicit indexes of one table pair.
pub struct IndexComparator<'a> {
    ctx: CompareContext<'a>,
}

impl<'a> IndexComparator<'a> {
    pub fn new(ctx: CompareContext<'a>) -> Self {
        Self { ctx }
    }
}

impl ObjectComparator for IndexComparator<'_> {
    type Def = IndexDef;

    fn context(&self) -> &CompareContext<'_> {
        &self.ctx
    }

    fn is_equivalent(&self, source: &IndexDef, target: &IndexDef) -> bool {
        source.unique == target.unique
            && source.scope == target.scope
            && same_text(source.algorithm.as_deref(), target.algorithm.as_deref())
            && same_identifiers(self.ctx.dialect, &source.columns, &target.columns)
    }
}
