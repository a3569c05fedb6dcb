//! Directed graph utility used to sequence DDL by dependency.
//!
//! A [`Graph`] stores string-keyed vertices and weighted directed edges.
//! It offers:
//!
//! - insertion and deletion with duplicate and lookup checks
//! - weight and neighbor queries ([`INFINITE`] marks "no edge")
//! - depth-first and breadth-first traversal through a [`Visitor`]
//! - exact cycle detection in [`Graph::topological_order`]
//!
//! [`GraphConfigurer`] chains vertices together without manual edge
//! bookkeeping.
//!
//! # Example
//!
//! ```rust
//! use structcmp_graph::{Graph, Vertex};
//!
//! let mut graph = Graph::new();
//! graph.insert_edge(Vertex::new("users", "users"), Vertex::new("orders", "orders"), 1.0)?;
//! graph.insert_edge(Vertex::new("orders", "orders"), Vertex::new("items", "items"), 1.0)?;
//!
//! let order: Vec<&str> = graph
//!     .topological_order()?
//!     .into_iter()
//!     .map(Vertex::id)
//!     .collect();
//! assert_eq!(order, ["users", "orders", "items"]);
//! # Ok::<(), structcmp_graph::GraphError>(())
//! ```

pub mod configurer;
pub mod error;
pub mod graph;

pub use configurer::GraphConfigurer;
pub use error::{GraphError, Result};
pub use graph::{Edge, Graph, INFINITE, Vertex, VisitFailure, Visitor};
