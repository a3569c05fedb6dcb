//! Object definitions handed to the engine by a metadata provider.
//!
//! Every collection keeps the order in which the provider enumerated the
//! objects; comparators rely on it for their output order.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::node::DbObjectType;

/// Common view over the definitions a comparator matches by name.
pub trait Definition {
    /// Object type of the definition.
    const OBJECT_TYPE: DbObjectType;

    /// Case-preserving object name.
    fn name(&self) -> &str;

    /// Borrowed, type-tagged view of the definition.
    fn as_object(&self) -> ObjectRef<'_>;
}

/// A borrowed definition of any supported object type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObjectRef<'a> {
    /// A whole table.
    Table(&'a TableDef),
    /// A table column.
    Column(&'a ColumnDef),
    /// A table index.
    Index(&'a IndexDef),
    /// A table constraint.
    Constraint(&'a ConstraintDef),
    /// A table partitioning scheme.
    Partition(&'a PartitionDef),
}

impl ObjectRef<'_> {
    /// Object type of the referenced definition.
    #[must_use]
    pub const fn object_type(&self) -> DbObjectType {
        match self {
            Self::Table(_) => DbObjectType::Table,
            Self::Column(_) => DbObjectType::Column,
            Self::Index(_) => DbObjectType::Index,
            Self::Constraint(_) => DbObjectType::Constraint,
            Self::Partition(_) => DbObjectType::Partition,
        }
    }

    /// Name of the referenced definition.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Table(t) => &t.name,
            Self::Column(c) => &c.name,
            Self::Index(i) => &i.name,
            Self::Constraint(c) => &c.name,
            Self::Partition(p) => &p.name,
        }
    }
}

const fn default_true() -> bool {
    true
}

// ================================================================
// Tables
// ================================================================

/// Full definition of one table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableDef {
    /// Table name.
    pub name: String,
    /// Columns in definition order.
    #[serde(default)]
    pub columns: Vec<ColumnDef>,
    /// Indexes, including implicit ones backing keys.
    #[serde(default)]
    pub indexes: Vec<IndexDef>,
    /// Table constraints.
    #[serde(default)]
    pub constraints: Vec<ConstraintDef>,
    /// Partitioning schemes, usually zero or one.
    #[serde(default)]
    pub partitions: Vec<PartitionDef>,
    /// Original DDL text as reported by the database.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ddl: Option<String>,
}

impl TableDef {
    /// Creates an empty table definition.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a column.
    #[must_use]
    pub fn column(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }

    /// Adds an index.
    #[must_use]
    pub fn index(mut self, index: IndexDef) -> Self {
        self.indexes.push(index);
        self
    }

    /// Adds a constraint.
    #[must_use]
    pub fn constraint(mut self, constraint: ConstraintDef) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Adds a partitioning scheme.
    #[must_use]
    pub fn partition(mut self, partition: PartitionDef) -> Self {
        self.partitions.push(partition);
        self
    }

    /// Sets the DDL text reported by the provider.
    #[must_use]
    pub fn ddl(mut self, ddl: impl Into<String>) -> Self {
        self.ddl = Some(ddl.into());
        self
    }

    /// Looks up a column by exact name.
    #[must_use]
    pub fn find_column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// The primary-key constraint, if any.
    #[must_use]
    pub fn primary_key(&self) -> Option<&ConstraintDef> {
        self.constraints
            .iter()
            .find(|c| c.kind == ConstraintKind::PrimaryKey)
    }

    /// All foreign-key constraints.
    pub fn foreign_keys(&self) -> impl Iterator<Item = &ConstraintDef> {
        self.constraints
            .iter()
            .filter(|c| c.kind == ConstraintKind::ForeignKey)
    }
}

impl Definition for TableDef {
    const OBJECT_TYPE: DbObjectType = DbObjectType::Table;

    fn name(&self) -> &str {
        &self.name
    }

    fn as_object(&self) -> ObjectRef<'_> {
        ObjectRef::Table(self)
    }
}

// ================================================================
// Columns
// ================================================================

/// Definition of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Column name.
    pub name: String,
    /// Base type name, e.g. `VARCHAR2` or `int`.
    pub type_name: String,
    /// Character or byte length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u64>,
    /// Numeric precision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    /// Numeric scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<i32>,
    /// Whether the column accepts NULL.
    #[serde(default = "default_true")]
    pub nullable: bool,
    /// Default expression, verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Collation name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,
    /// Whether the column is auto-incremented.
    #[serde(default)]
    pub auto_increment: bool,
    /// Column comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ColumnDef {
    /// Creates a nullable column without default.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            length: None,
            precision: None,
            scale: None,
            nullable: true,
            default_value: None,
            collation: None,
            auto_increment: false,
            comment: None,
        }
    }

    /// Sets the length.
    #[must_use]
    pub const fn length(mut self, length: u64) -> Self {
        self.length = Some(length);
        self
    }

    /// Sets precision and scale.
    #[must_use]
    pub const fn precision(mut self, precision: u32, scale: i32) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }

    /// Marks the column NOT NULL.
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Sets the default expression.
    #[must_use]
    pub fn default_value(mut self, expr: impl Into<String>) -> Self {
        self.default_value = Some(expr.into());
        self
    }

    /// Sets the collation.
    #[must_use]
    pub fn collation(mut self, collation: impl Into<String>) -> Self {
        self.collation = Some(collation.into());
        self
    }

    /// Marks the column auto-incremented.
    #[must_use]
    pub const fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Sets the comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Default expression with `NULL` treated as "no default".
    #[must_use]
    pub fn effective_default(&self) -> Option<&str> {
        self.default_value
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.eq_ignore_ascii_case("NULL"))
    }
}

impl Definition for ColumnDef {
    const OBJECT_TYPE: DbObjectType = DbObjectType::Column;

    fn name(&self) -> &str {
        &self.name
    }

    fn as_object(&self) -> ObjectRef<'_> {
        ObjectRef::Column(self)
    }
}

// ================================================================
// Indexes
// ================================================================

/// Whether an index on a partitioned table is partitioned with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IndexScope {
    /// Partitioned together with the table.
    Local,
    /// Spans all partitions.
    Global,
}

impl IndexScope {
    /// SQL keyword for the scope.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Local => "LOCAL",
            Self::Global => "GLOBAL",
        }
    }
}

/// Definition of one index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDef {
    /// Index name.
    pub name: String,
    /// Indexed columns, in key order.
    pub columns: Vec<String>,
    /// Whether the index enforces uniqueness.
    #[serde(default)]
    pub unique: bool,
    /// Access method, e.g. `BTREE`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
    /// Local or global scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<IndexScope>,
}

impl IndexDef {
    /// Creates a non-unique index.
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            unique: false,
            algorithm: None,
            scope: None,
        }
    }

    /// Marks the index unique.
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Sets the access method.
    #[must_use]
    pub fn algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = Some(algorithm.into());
        self
    }

    /// Sets the scope.
    #[must_use]
    pub const fn scope(mut self, scope: IndexScope) -> Self {
        self.scope = Some(scope);
        self
    }
}

impl Definition for IndexDef {
    const OBJECT_TYPE: DbObjectType = DbObjectType::Index;

    fn name(&self) -> &str {
        &self.name
    }

    fn as_object(&self) -> ObjectRef<'_> {
        ObjectRef::Index(self)
    }
}

// ================================================================
// Constraints
// ================================================================

/// Kind of a table constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConstraintKind {
    /// Primary key.
    PrimaryKey,
    /// Unique key.
    Unique,
    /// Foreign key.
    ForeignKey,
    /// Check constraint.
    Check,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PrimaryKey => "PRIMARY KEY",
            Self::Unique => "UNIQUE",
            Self::ForeignKey => "FOREIGN KEY",
            Self::Check => "CHECK",
        })
    }
}

/// Target of a foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyRef {
    /// Schema of the referenced table; `None` means the owning schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Referenced table.
    pub table: String,
    /// Referenced columns, aligned with the constraint columns.
    pub columns: Vec<String>,
    /// `ON DELETE` action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<String>,
    /// `ON UPDATE` action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_update: Option<String>,
}

/// Definition of one table constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintDef {
    /// Constraint name.
    pub name: String,
    /// Constraint kind.
    pub kind: ConstraintKind,
    /// Constrained columns (empty for CHECK).
    #[serde(default)]
    pub columns: Vec<String>,
    /// CHECK clause, verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_clause: Option<String>,
    /// Foreign-key target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<ForeignKeyRef>,
}

impl ConstraintDef {
    fn with_columns<I, S>(name: impl Into<String>, kind: ConstraintKind, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            kind,
            columns: columns.into_iter().map(Into::into).collect(),
            check_clause: None,
            references: None,
        }
    }

    /// Creates a primary-key constraint.
    pub fn primary_key<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_columns(name, ConstraintKind::PrimaryKey, columns)
    }

    /// Creates a unique constraint.
    pub fn unique<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_columns(name, ConstraintKind::Unique, columns)
    }

    /// Creates a foreign key referencing `table` in the owning schema.
    pub fn foreign_key<I, S, J, T>(
        name: impl Into<String>,
        columns: I,
        table: impl Into<String>,
        referenced: J,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        J: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut constraint = Self::with_columns(name, ConstraintKind::ForeignKey, columns);
        constraint.references = Some(ForeignKeyRef {
            schema: None,
            table: table.into(),
            columns: referenced.into_iter().map(Into::into).collect(),
            on_delete: None,
            on_update: None,
        });
        constraint
    }

    /// Creates a check constraint.
    pub fn check(name: impl Into<String>, clause: impl Into<String>) -> Self {
        let mut constraint =
            Self::with_columns(name, ConstraintKind::Check, std::iter::empty::<String>());
        constraint.check_clause = Some(clause.into());
        constraint
    }

    /// Sets the schema of the referenced table. No-op unless this is a
    /// foreign key.
    #[must_use]
    pub fn referencing_schema(mut self, schema: impl Into<String>) -> Self {
        if let Some(target) = self.references.as_mut() {
            target.schema = Some(schema.into());
        }
        self
    }

    /// Sets the `ON DELETE` action. No-op unless this is a foreign key.
    #[must_use]
    pub fn on_delete(mut self, action: impl Into<String>) -> Self {
        if let Some(target) = self.references.as_mut() {
            target.on_delete = Some(action.into());
        }
        self
    }

    /// Sets the `ON UPDATE` action. No-op unless this is a foreign key.
    #[must_use]
    pub fn on_update(mut self, action: impl Into<String>) -> Self {
        if let Some(target) = self.references.as_mut() {
            target.on_update = Some(action.into());
        }
        self
    }
}

impl Definition for ConstraintDef {
    const OBJECT_TYPE: DbObjectType = DbObjectType::Constraint;

    fn name(&self) -> &str {
        &self.name
    }

    fn as_object(&self) -> ObjectRef<'_> {
        ObjectRef::Constraint(self)
    }
}

// ================================================================
// Partitions
// ================================================================

/// Partitioning method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartitionMethod {
    /// `HASH(expr)`.
    Hash,
    /// `KEY(columns)`.
    Key,
    /// `RANGE(expr)`.
    Range,
    /// `RANGE COLUMNS(columns)`.
    RangeColumns,
    /// `LIST(expr)`.
    List,
    /// `LIST COLUMNS(columns)`.
    ListColumns,
}

impl PartitionMethod {
    /// SQL keyword(s) for the method.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Hash => "HASH",
            Self::Key => "KEY",
            Self::Range => "RANGE",
            Self::RangeColumns => "RANGE COLUMNS",
            Self::List => "LIST",
            Self::ListColumns => "LIST COLUMNS",
        }
    }

    /// Whether partitions are bounded by `VALUES LESS THAN`.
    #[must_use]
    pub const fn is_range(self) -> bool {
        matches!(self, Self::Range | Self::RangeColumns)
    }

    /// Whether partitions enumerate their `VALUES`.
    #[must_use]
    pub const fn is_list(self) -> bool {
        matches!(self, Self::List | Self::ListColumns)
    }
}

/// One named partition of a scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionBound {
    /// Partition name.
    pub name: String,
    /// Upper bounds (range) or member values (list), verbatim.
    #[serde(default)]
    pub values: Vec<String>,
}

impl PartitionBound {
    /// Creates a named partition.
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// A table partitioning scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionDef {
    /// Key under which the scheme is matched.
    pub name: String,
    /// Partitioning method.
    pub method: PartitionMethod,
    /// Partitioning expression; takes precedence over `columns`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    /// Partitioning columns.
    #[serde(default)]
    pub columns: Vec<String>,
    /// Partition count for schemes without named partitions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// Named partitions, in definition order.
    #[serde(default)]
    pub definitions: Vec<PartitionBound>,
}

impl PartitionDef {
    /// Creates a scheme partitioned by `expression`.
    pub fn new(
        name: impl Into<String>,
        method: PartitionMethod,
        expression: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            method,
            expression: Some(expression.into()),
            columns: Vec::new(),
            count: None,
            definitions: Vec::new(),
        }
    }

    /// Creates a scheme partitioned by `columns`.
    pub fn on_columns<I, S>(name: impl Into<String>, method: PartitionMethod, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            method,
            expression: None,
            columns: columns.into_iter().map(Into::into).collect(),
            count: None,
            definitions: Vec::new(),
        }
    }

    /// Sets the partition count.
    #[must_use]
    pub const fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Adds a named partition.
    #[must_use]
    pub fn bound(mut self, bound: PartitionBound) -> Self {
        self.definitions.push(bound);
        self
    }
}

impl Definition for PartitionDef {
    const OBJECT_TYPE: DbObjectType = DbObjectType::Partition;

    fn name(&self) -> &str {
        &self.name
    }

    fn as_object(&self) -> ObjectRef<'_> {
        ObjectRef::Partition(self)
    }
}
