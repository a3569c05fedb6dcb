//! Schema-level comparison.
//!
//! The orchestrator reads table names from both sides, classifies them,
//! compares each table, and orders the top-level results:
//!
//! 1. tables only in the source, referenced tables before referencing ones;
//! 2. tables on both sides, in target enumeration order;
//! 3. tables only in the target, referencing tables before referenced ones.
//!
//! Each group is ordered with its own dependency graph built from the
//! foreign keys between its members. A cycle degrades that group to
//! enumeration order and is reported as a [`ComparisonWarning`].

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use serde::Serialize;
use structcmp_graph::{Graph, GraphError, Vertex};
use tracing::{debug, info, warn};

use crate::compare::TableComparator;
use crate::config::{validate_pair, ComparisonConfig, SchemaConfig};
use crate::definition::TableDef;
use crate::dialect::DialectRules;
use crate::error::{CompareError, Result};
use crate::node::{ComparisonResult, DbObjectType, ObjectComparisonNode};
use crate::provider::MetadataProvider;
use crate::script::append_delimiter_if_missing;

/// Side of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Source,
    Target,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Source => "source",
            Self::Target => "target",
        })
    }
}

/// Non-fatal conditions met during a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComparisonWarning {
    /// Foreign keys among one-sided tables form a cycle; those tables
    /// were left in enumeration order.
    CyclicDependency {
        /// Side whose tables are involved.
        side: Side,
        /// Tables of the affected group, in output order.
        tables: Vec<String>,
    },
    /// A requested table exists in neither schema.
    TableNotFound {
        /// Requested name.
        name: String,
    },
}

impl fmt::Display for ComparisonWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CyclicDependency { side, tables } => write!(
                f,
                "Cyclic foreign key dependency among {side} tables: {}",
                tables.join(", ")
            ),
            Self::TableNotFound { name } => {
                write!(f, "Table {name} not found in source or target schema")
            }
        }
    }
}

/// Ordered result of a schema comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaComparison {
    /// One node per table, in execution order.
    pub results: Vec<ObjectComparisonNode>,
    /// Conditions that did not stop the comparison.
    pub warnings: Vec<ComparisonWarning>,
}

impl SchemaComparison {
    /// Consumes the comparison, keeping only the table nodes.
    #[must_use]
    pub fn into_results(self) -> Vec<ObjectComparisonNode> {
        self.results
    }

    /// Whether every table compared CONSISTENT.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.results.iter().all(ObjectComparisonNode::is_consistent)
    }

    /// Finds a table node by case-insensitive name.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&ObjectComparisonNode> {
        self.results
            .iter()
            .find(|n| n.name().eq_ignore_ascii_case(name))
    }

    /// All change scripts in output order, each table's own script
    /// before its children's.
    #[must_use]
    pub fn total_change_script(&self) -> String {
        let mut script = String::new();
        for table in &self.results {
            table.walk(&mut |node, _| {
                if let Some(ref fragment) = node.change_script {
                    script.push_str(&append_delimiter_if_missing(fragment));
                }
            });
        }
        script
    }
}

/// One side of a comparison: its configuration and metadata source.
#[derive(Clone, Copy)]
pub struct SchemaSide<'a> {
    /// Schema configuration.
    pub config: &'a SchemaConfig,
    /// Metadata source for the schema.
    pub provider: &'a (dyn MetadataProvider + Sync),
}

impl<'a> SchemaSide<'a> {
    pub fn new(config: &'a SchemaConfig, provider: &'a (dyn MetadataProvider + Sync)) -> Self {
        Self { config, provider }
    }

    fn schema(&self) -> &'a str {
        &self.config.schema_name
    }

    fn list_table_names(&self) -> Result<Vec<String>> {
        self.provider
            .list_table_names(self.schema())
            .map_err(|source| CompareError::Metadata {
                schema: self.schema().to_string(),
                source,
            })
    }
}

/// A table node waiting for its place in the output.
struct Pending {
    node: ObjectComparisonNode,
    definition: Option<TableDef>,
}

/// Drives the comparison of two schemas.
///
/// Progress can be polled from another thread through
/// [`progress`](Self::progress) while [`compare`](Self::compare) runs.
pub struct SchemaComparator<'a> {
    source: SchemaSide<'a>,
    target: SchemaSide<'a>,
    dialect: Box<dyn DialectRules + Send + Sync>,
    total: AtomicUsize,
    completed: AtomicUsize,
    started: AtomicBool,
}

impl<'a> SchemaComparator<'a> {
    /// Creates a comparator after validating both configurations.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError::Config`] or [`CompareError::Multiple`]
    /// when the configurations cannot be compared.
    pub fn new(source: SchemaSide<'a>, target: SchemaSide<'a>) -> Result<Self> {
        validate_pair(source.config, target.config)?;
        let dialect = source.config.dialect.rules().ok_or_else(|| {
            CompareError::Config(format!(
                "Unsupported dialect type for schema structure comparison: {}",
                source.config.dialect
            ))
        })?;
        Ok(Self {
            source,
            target,
            dialect,
            total: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
            started: AtomicBool::new(false),
        })
    }

    /// Percentage of tables compared so far, in `[0, 100]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if !self.started.load(Ordering::Acquire) {
            return 0.0;
        }
        let total = self.total.load(Ordering::Acquire);
        if total == 0 {
            return 100.0;
        }
        let completed = self.completed.load(Ordering::Acquire).min(total);
        completed as f64 * 100.0 / total as f64
    }

    /// Compares every table of both schemas.
    ///
    /// # Errors
    ///
    /// Fails only when a schema's table names cannot be listed. Failures
    /// reading a single table end up on that table's node.
    pub fn compare(&self) -> Result<SchemaComparison> {
        self.run(None)
    }

    /// Compares only the named tables. Names found in neither schema are
    /// reported as [`ComparisonWarning::TableNotFound`].
    ///
    /// # Errors
    ///
    /// Same as [`compare`](Self::compare).
    pub fn compare_tables<S: AsRef<str>>(&self, names: &[S]) -> Result<SchemaComparison> {
        let names: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
        self.run(Some(&names))
    }

    fn run(&self, filter: Option<&[&str]>) -> Result<SchemaComparison> {
        let source_schema = self.source.schema();
        let target_schema = self.target.schema();
        info!(
            source = %source_schema,
            target = %target_schema,
            dialect = %self.dialect.kind(),
            "Comparing schema structures"
        );

        self.started.store(false, Ordering::Release);
        self.completed.store(0, Ordering::Release);

        let mut source_names = self.source.list_table_names()?;
        let mut target_names = self.target.list_table_names()?;
        let mut warnings = Vec::new();

        if let Some(requested) = filter {
            let dialect = self.dialect.as_ref();
            let is_requested =
                |name: &String| requested.iter().any(|r| dialect.same_identifier(r, name));
            source_names.retain(is_requested);
            target_names.retain(is_requested);
            for name in requested {
                let known = source_names
                    .iter()
                    .chain(&target_names)
                    .any(|n| dialect.same_identifier(n, name));
                if !known {
                    warn!(table = %name, "Requested table not found in either schema");
                    warnings.push(ComparisonWarning::TableNotFound {
                        name: (*name).to_string(),
                    });
                }
            }
        }

        let (matched, created, dropped) = self.classify(&source_names, &target_names);
        self.total
            .store(matched.len() + created.len() + dropped.len(), Ordering::Release);
        self.started.store(true, Ordering::Release);
        debug!(
            matched = matched.len(),
            only_in_source = created.len(),
            only_in_target = dropped.len(),
            "Classified tables"
        );

        let tables = TableComparator::new(self.dialect.as_ref(), source_schema, target_schema);

        let created: Vec<Pending> = created
            .into_iter()
            .map(|name| {
                let pending = match self.source.provider.table_definition(source_schema, name) {
                    Ok(def) => Pending {
                        node: tables.only_in_source(&def),
                        definition: Some(def),
                    },
                    Err(e) => self.failed(name, ComparisonResult::OnlyInSource, &e),
                };
                self.completed.fetch_add(1, Ordering::AcqRel);
                pending
            })
            .collect();

        let matched: Vec<ObjectComparisonNode> = matched
            .into_iter()
            .map(|(source_name, target_name)| {
                let source = self.source.provider.table_definition(source_schema, source_name);
                let target = self.target.provider.table_definition(target_schema, target_name);
                let node = match (source, target) {
                    (Ok(s), Ok(t)) => tables.compare(&s, &t),
                    (Err(e), _) | (_, Err(e)) => {
                        self.failed(target_name, ComparisonResult::Inconsistent, &e).node
                    }
                };
                self.completed.fetch_add(1, Ordering::AcqRel);
                node
            })
            .collect();

        let dropped: Vec<Pending> = dropped
            .into_iter()
            .map(|name| {
                let pending = match self.target.provider.table_definition(target_schema, name) {
                    Ok(def) => Pending {
                        node: tables.only_in_target(&def),
                        definition: Some(def),
                    },
                    Err(e) => self.failed(name, ComparisonResult::OnlyInTarget, &e),
                };
                self.completed.fetch_add(1, Ordering::AcqRel);
                pending
            })
            .collect();

        let mut results = self.dependency_order(Side::Source, source_schema, created, &mut warnings)?;
        results.extend(matched);
        let mut drops = self.dependency_order(Side::Target, target_schema, dropped, &mut warnings)?;
        drops.reverse();
        results.extend(drops);

        info!(
            tables = results.len(),
            warnings = warnings.len(),
            "Schema comparison finished"
        );
        Ok(SchemaComparison { results, warnings })
    }

    /// Splits names into matched pairs (target order), source-only and
    /// target-only names.
    fn classify<'n>(
        &self,
        source: &'n [String],
        target: &'n [String],
    ) -> (Vec<(&'n str, &'n str)>, Vec<&'n str>, Vec<&'n str>) {
        let mut pending: Vec<Option<&'n str>> = source.iter().map(|s| Some(s.as_str())).collect();
        let mut matched = Vec::new();
        let mut dropped = Vec::new();

        for t in target {
            let found = pending
                .iter_mut()
                .find(|s| matches!(s, Some(s) if self.dialect.same_identifier(s, t)))
                .and_then(Option::take);
            match found {
                Some(s) => matched.push((s, t.as_str())),
                None => dropped.push(t.as_str()),
            }
        }
        let created = pending.into_iter().flatten().collect();
        (matched, created, dropped)
    }

    fn failed(&self, name: &str, result: ComparisonResult, error: &impl fmt::Display) -> Pending {
        warn!(table = %name, error = %error, "Failed to read table metadata");
        let mut node = ObjectComparisonNode::new(
            DbObjectType::Table,
            name,
            self.source.schema(),
            self.target.schema(),
            result,
        );
        node.error = Some(error.to_string());
        Pending {
            node,
            definition: None,
        }
    }

    /// Orders one group so that referenced tables come first.
    fn dependency_order(
        &self,
        side: Side,
        schema: &str,
        group: Vec<Pending>,
        warnings: &mut Vec<ComparisonWarning>,
    ) -> Result<Vec<ObjectComparisonNode>> {
        let dialect = self.dialect.as_ref();
        let mut graph = Graph::new();
        let mut by_name: HashMap<String, usize> = HashMap::new();

        for (idx, pending) in group.iter().enumerate() {
            graph.insert_vertex(Vertex::new(idx.to_string(), pending.node.name()))?;
            by_name
                .entry(dialect.normalize_identifier(pending.node.name()))
                .or_insert(idx);
        }

        for (idx, pending) in group.iter().enumerate() {
            let Some(ref definition) = pending.definition else {
                continue;
            };
            for fk in definition.foreign_keys() {
                let Some(ref target) = fk.references else {
                    continue;
                };
                let same_schema = target
                    .schema
                    .as_deref()
                    .map_or(true, |s| dialect.same_identifier(s, schema));
                if !same_schema {
                    continue;
                }
                let Some(&referenced) = by_name.get(&dialect.normalize_identifier(&target.table))
                else {
                    continue;
                };
                let (from, to) = (referenced.to_string(), idx.to_string());
                if referenced == idx || graph.edge(&from, &to).is_some() {
                    continue;
                }
                graph.insert_edge(
                    Vertex::new(from, group[referenced].node.name()),
                    Vertex::new(to, pending.node.name()),
                    1.0,
                )?;
            }
        }

        let order: Vec<usize> = match graph.topological_order() {
            Ok(vertices) => {
                let positions: HashMap<&str, usize> = graph
                    .vertices()
                    .iter()
                    .enumerate()
                    .map(|(idx, v)| (v.id(), idx))
                    .collect();
                vertices
                    .into_iter()
                    .filter_map(|v| positions.get(v.id()).copied())
                    .collect()
            }
            Err(GraphError::CyclicGraph) => {
                let tables: Vec<String> = group.iter().map(|p| p.node.name().to_string()).collect();
                warn!(
                    side = %side,
                    tables = ?tables,
                    "Cyclic foreign key dependency, keeping enumeration order"
                );
                warnings.push(ComparisonWarning::CyclicDependency { side, tables });
                (0..group.len()).collect()
            }
            Err(other) => return Err(other.into()),
        };

        let mut slots: Vec<Option<ObjectComparisonNode>> =
            group.into_iter().map(|p| Some(p.node)).collect();
        Ok(order
            .into_iter()
            .filter_map(|idx| slots.get_mut(idx).and_then(Option::take))
            .collect())
    }
}

/// Compares two schemas described by `config`.
///
/// # Errors
///
/// Returns configuration errors before any metadata is read, and
/// [`CompareError::Metadata`] if a schema's tables cannot be listed.
pub fn compare(
    config: &ComparisonConfig,
    source: &(dyn MetadataProvider + Sync),
    target: &(dyn MetadataProvider + Sync),
) -> Result<SchemaComparison> {
    let comparator = SchemaComparator::new(
        SchemaSide::new(&config.source, source),
        SchemaSide::new(&config.target, target),
    )?;
    match config.table_names {
        Some(ref names) => comparator.compare_tables(names),
        None => comparator.compare(),
    }
}
