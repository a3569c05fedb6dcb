//! Schema structure comparison with dependency-ordered change scripts.
//!
//! `structcmp` compares the tables of a source schema with those of a
//! target schema and produces, for every difference, the DDL that turns
//! the target into the source:
//! - Results form a tree: tables own their column, index, constraint and
//!   partition results
//! - Tables to create or drop are ordered by their foreign keys
//! - DDL is rendered per dialect (MySQL, Oracle)
//!
//! # Architecture
//!
//! - **Definitions** - Metadata handed over by a [`MetadataProvider`](provider::MetadataProvider)
//! - **Comparators** - Match objects by name and classify each pairing
//! - **Script generator** - Renders DDL through [`DialectRules`](dialect::DialectRules)
//! - **Orchestrator** - Runs a schema comparison and orders the results
//!
//! The engine performs no I/O itself. [`SchemaSnapshot`](snapshot::SchemaSnapshot)
//! serves metadata from memory or JSON.
//!
//! # Example
//!
//! ```rust
//! use structcmp::prelude::*;
//!
//! let source = SchemaSnapshot::new()
//!     .with_table("prod", TableDef::new("users").column(ColumnDef::new("id", "int").not_null()))
//!     .with_table(
//!         "prod",
//!         TableDef::new("orders")
//!             .column(ColumnDef::new("id", "int").not_null())
//!             .column(ColumnDef::new("user_id", "int"))
//!             .constraint(ConstraintDef::foreign_key("fk_user", ["user_id"], "users", ["id"])),
//!     );
//! let target = SchemaSnapshot::new().with_schema("test");
//!
//! let config = ComparisonConfig::new(
//!     SchemaConfig::new("prod", DialectKind::MySql),
//!     SchemaConfig::new("test", DialectKind::MySql),
//! );
//! let comparison = structcmp::compare(&config, &source, &target)?;
//!
//! let order: Vec<&str> = comparison.results.iter().map(|n| n.name()).collect();
//! assert_eq!(order, ["users", "orders"]);
//! assert!(comparison
//!     .total_change_script()
//!     .starts_with("CREATE TABLE `test`.`users` ("));
//! # Ok::<(), structcmp::error::CompareError>(())
//! ```

pub mod compare;
pub mod config;
pub mod definition;
pub mod dialect;
pub mod error;
pub mod node;
pub mod orchestrator;
pub mod provider;
pub mod script;
pub mod snapshot;

pub use orchestrator::compare;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::compare::{ObjectComparator, TableComparator};
    pub use crate::config::{ComparisonConfig, SchemaConfig};
    pub use crate::definition::{
        ColumnDef, ConstraintDef, ConstraintKind, ForeignKeyRef, IndexDef, IndexScope,
        PartitionBound, PartitionDef, PartitionMethod, TableDef,
    };
    pub use crate::dialect::{DialectKind, DialectRules, MySqlDialect, OracleDialect};
    pub use crate::error::{CompareError, MetadataError, Result};
    pub use crate::node::{ComparisonResult, DbObjectType, ObjectComparisonNode};
    pub use crate::orchestrator::{
        ComparisonWarning, SchemaComparator, SchemaComparison, SchemaSide, Side,
    };
    pub use crate::provider::MetadataProvider;
    pub use crate::script::ChangeScriptGenerator;
    pub use crate::snapshot::SchemaSnapshot;
}
