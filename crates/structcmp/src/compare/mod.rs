//! Object comparators.
//!
//! Every comparator matches definitions by dialect-normalized name and
//! emits nodes in a fixed order: the target's objects first, in target
//! order, followed by source-only objects in source order.

pub mod column;
pub mod constraint;
pub mod index;
pub mod partition;
pub mod table;

pub use column::ColumnComparator;
pub use constraint::ConstraintComparator;
pub use index::IndexComparator;
pub use partition::PartitionComparator;
pub use table::TableComparator;

use crate::definition::Definition;
use crate::dialect::DialectRules;
use crate::node::{ComparisonResult, ObjectComparisonNode};
use crate::script::ChangeScriptGenerator;

/// One source/target pairing produced by [`match_by_name`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pairing<'d, T> {
    /// Both sides define the object.
    Matched {
        /// Source definition.
        source: &'d T,
        /// Target definition.
        target: &'d T,
    },
    /// Only the source defines the object.
    OnlyInSource(&'d T),
    /// Only the target defines the object.
    OnlyInTarget(&'d T),
}

/// Pairs definitions by name.
///
/// Walks `target` in order, pairing each object with the first unused
/// same-named source object. Source objects left unpaired are appended
/// in source order.
pub fn match_by_name<'d, T: Definition>(
    dialect: &dyn DialectRules,
    source: &[&'d T],
    target: &[&'d T],
) -> Vec<Pairing<'d, T>> {
    let mut pending: Vec<Option<&'d T>> = source.iter().copied().map(Some).collect();
    let mut pairs = Vec::with_capacity(source.len().max(target.len()));

    for &t in target {
        let matched = pending
            .iter_mut()
            .find(|s| matches!(s, Some(s) if dialect.same_identifier(s.name(), t.name())))
            .and_then(Option::take);
        pairs.push(match matched {
            Some(s) => Pairing::Matched {
                source: s,
                target: t,
            },
            None => Pairing::OnlyInTarget(t),
        });
    }

    pairs.extend(pending.into_iter().flatten().map(Pairing::OnlyInSource));
    pairs
}

/// What a sub-object comparator needs to know about the table pair.
#[derive(Clone, Copy)]
pub struct CompareContext<'a> {
    /// Active dialect.
    pub dialect: &'a dyn DialectRules,
    /// Source schema name.
    pub source_schema: &'a str,
    /// Target schema name.
    pub target_schema: &'a str,
    /// Name of the owning table.
    pub table: &'a str,
}

impl<'a> CompareContext<'a> {
    /// Creates a context for one table pair.
    pub fn new(
        dialect: &'a dyn DialectRules,
        source_schema: &'a str,
        target_schema: &'a str,
        table: &'a str,
    ) -> Self {
        Self {
            dialect,
            source_schema,
            target_schema,
            table,
        }
    }

    /// Script generator for this schema pair.
    #[must_use]
    pub fn generator(&self) -> ChangeScriptGenerator<'a> {
        ChangeScriptGenerator::new(self.dialect, self.source_schema, self.target_schema)
    }
}

/// Compares one kind of table sub-object.
///
/// Implementors decide equivalence; the provided
/// [`compare`](Self::compare) handles matching, classification, naming
/// and change scripts.
pub trait ObjectComparator {
    /// Definition type being compared.
    type Def: Definition;

    /// Table pair the comparator works on.
    fn context(&self) -> &CompareContext<'_>;

    /// Whether two same-named definitions are equivalent.
    fn is_equivalent(&self, source: &Self::Def, target: &Self::Def) -> bool;

    /// Compares two definition lists of one table pair.
    ///
    /// Matched and target-only nodes take the target's spelling of the
    /// name; source-only nodes take the source's.
    fn compare(&self, source: &[&Self::Def], target: &[&Self::Def]) -> Vec<ObjectComparisonNode> {
        let ctx = self.context();
        let generator = ctx.generator();

        match_by_name(ctx.dialect, source, target)
            .into_iter()
            .map(|pairing| {
                let (name, result, s, t) = match pairing {
                    Pairing::Matched { source, target } => {
                        let result = if self.is_equivalent(source, target) {
                            ComparisonResult::Consistent
                        } else {
                            ComparisonResult::Inconsistent
                        };
                        (target.name(), result, Some(source), Some(target))
                    }
                    Pairing::OnlyInSource(s) => {
                        (s.name(), ComparisonResult::OnlyInSource, Some(s), None)
                    }
                    Pairing::OnlyInTarget(t) => {
                        (t.name(), ComparisonResult::OnlyInTarget, None, Some(t))
                    }
                };
                let script = generator.generate(
                    ctx.table,
                    result,
                    s.map(|d| d.as_object()),
                    t.map(|d| d.as_object()),
                );
                ObjectComparisonNode::new(
                    <Self::Def as Definition>::OBJECT_TYPE,
                    name,
                    ctx.source_schema,
                    ctx.target_schema,
                    result,
                )
                .with_change_script(script)
            })
            .collect()
    }
}

/// Case-insensitive equality of optional text, ignoring surrounding
/// whitespace.
pub(crate) fn same_text(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.trim().eq_ignore_ascii_case(b.trim()),
        (None, None) => true,
        _ => false,
    }
}

/// Element-wise identifier equality.
pub(crate) fn same_identifiers(dialect: &dyn DialectRules, a: &[String], b: &[String]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(a, b)| dialect.same_identifier(a, b))
}
