//! Hierarchical comparison results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of one source/target object pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComparisonResult {
    /// Both sides define the object identically.
    Consistent,
    /// Both sides define the object, with differences.
    Inconsistent,
    /// Only the source schema has the object.
    OnlyInSource,
    /// Only the target schema has the object.
    OnlyInTarget,
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Consistent => "CONSISTENT",
            Self::Inconsistent => "INCONSISTENT",
            Self::OnlyInSource => "ONLY_IN_SOURCE",
            Self::OnlyInTarget => "ONLY_IN_TARGET",
        })
    }
}

/// Database object types.
///
/// Only [`Table`](Self::Table) and its child kinds take part in a
/// comparison; the rest exist so configurations naming them can be
/// rejected with a precise message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DbObjectType {
    Table,
    Column,
    Index,
    Constraint,
    Partition,
    View,
    Function,
    Procedure,
    Sequence,
    Trigger,
    Synonym,
}

impl fmt::Display for DbObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Table => "TABLE",
            Self::Column => "COLUMN",
            Self::Index => "INDEX",
            Self::Constraint => "CONSTRAINT",
            Self::Partition => "PARTITION",
            Self::View => "VIEW",
            Self::Function => "FUNCTION",
            Self::Procedure => "PROCEDURE",
            Self::Sequence => "SEQUENCE",
            Self::Trigger => "TRIGGER",
            Self::Synonym => "SYNONYM",
        })
    }
}

/// One compared object and, for tables, its compared sub-objects.
///
/// Nodes own their children; there are no parent links. Walk the tree
/// with [`walk`](Self::walk) when the path to a node matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectComparisonNode {
    object_type: DbObjectType,
    name: String,
    source_schema_name: String,
    target_schema_name: String,
    /// Classification of the pairing.
    pub result: ComparisonResult,
    /// DDL turning the target object into the source object.
    pub change_script: Option<String>,
    /// Source-side object DDL (top-level tables only).
    pub source_ddl: Option<String>,
    /// Target-side object DDL (top-level tables only).
    pub target_ddl: Option<String>,
    /// Why the object could not be compared, if it could not.
    pub error: Option<String>,
    /// Sub-object results: columns, indexes, constraints, partitions.
    pub children: Vec<ObjectComparisonNode>,
}

impl ObjectComparisonNode {
    /// Creates a leaf node.
    pub fn new(
        object_type: DbObjectType,
        name: impl Into<String>,
        source_schema_name: impl Into<String>,
        target_schema_name: impl Into<String>,
        result: ComparisonResult,
    ) -> Self {
        Self {
            object_type,
            name: name.into(),
            source_schema_name: source_schema_name.into(),
            target_schema_name: target_schema_name.into(),
            result,
            change_script: None,
            source_ddl: None,
            target_ddl: None,
            error: None,
            children: Vec::new(),
        }
    }

    /// Object type of the compared object.
    #[must_use]
    pub const fn object_type(&self) -> DbObjectType {
        self.object_type
    }

    /// Case-preserving object name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source schema the node was compared in.
    #[must_use]
    pub fn source_schema_name(&self) -> &str {
        &self.source_schema_name
    }

    /// Target schema the node was compared in.
    #[must_use]
    pub fn target_schema_name(&self) -> &str {
        &self.target_schema_name
    }

    /// Sets the change script, ignoring empty text.
    #[must_use]
    pub fn with_change_script(mut self, script: impl Into<String>) -> Self {
        let script = script.into();
        self.change_script = (!script.is_empty()).then_some(script);
        self
    }

    /// Attaches children and derives this node's result from them:
    /// CONSISTENT if every child is, INCONSISTENT otherwise.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Self>) -> Self {
        self.children = children;
        self.result = if self.children.iter().all(Self::is_consistent) {
            ComparisonResult::Consistent
        } else {
            ComparisonResult::Inconsistent
        };
        self
    }

    /// Whether this node and all its descendants are CONSISTENT.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.result == ComparisonResult::Consistent && self.children.iter().all(Self::is_consistent)
    }

    /// Whether the node carries an error marker.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Finds a direct child by type and case-insensitive name.
    #[must_use]
    pub fn find_child(&self, object_type: DbObjectType, name: &str) -> Option<&Self> {
        self.children
            .iter()
            .find(|c| c.object_type == object_type && c.name.eq_ignore_ascii_case(name))
    }

    /// Direct children that are not CONSISTENT.
    pub fn changed_children(&self) -> impl Iterator<Item = &Self> {
        self.children
            .iter()
            .filter(|c| c.result != ComparisonResult::Consistent)
    }

    /// Visits this node and its descendants in pre-order. The callback
    /// receives each node with its depth (0 for `self`).
    pub fn walk<F>(&self, f: &mut F)
    where
        F: FnMut(&Self, usize),
    {
        self.walk_at(0, f);
    }

    fn walk_at<F>(&self, depth: usize, f: &mut F)
    where
        F: FnMut(&Self, usize),
    {
        f(self, depth);
        for child in &self.children {
            child.walk_at(depth + 1, f);
        }
    }
}
