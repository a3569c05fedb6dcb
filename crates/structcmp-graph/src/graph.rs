//! Vertex and edge storage, lookups, traversal and topological ordering.
//!
//! Vertices are kept in insertion order. That order is observable: it
//! breaks ties in [`Graph::topological_order`] and it is the order in
//! which [`Graph::vertices`] yields them.

use std::collections::{HashSet, VecDeque};
use std::fmt;

use tracing::warn;

use crate::error::{GraphError, Result};

/// Weight reported by [`Graph::weight`] when no edge connects two vertices.
pub const INFINITE: f32 = -1.0;

/// A graph vertex.
///
/// The incoming and outgoing edge lists hold edge ids and are
/// maintained by the owning [`Graph`].
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    id: String,
    label: String,
    in_edges: Vec<String>,
    out_edges: Vec<String>,
}

impl Vertex {
    /// Creates a detached vertex.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            in_edges: Vec::new(),
            out_edges: Vec::new(),
        }
    }

    /// Unique id of the vertex.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name of the vertex.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Ids of the edges ending at this vertex, in insertion order.
    #[must_use]
    pub fn in_edges(&self) -> &[String] {
        &self.in_edges
    }

    /// Ids of the edges starting at this vertex, in insertion order.
    #[must_use]
    pub fn out_edges(&self) -> &[String] {
        &self.out_edges
    }

    /// Copy of this vertex without its edges.
    pub(crate) fn detached(&self) -> Self {
        Self::new(self.id.clone(), self.label.clone())
    }
}

/// A directed, weighted edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    id: String,
    label: String,
    from: String,
    to: String,
    weight: f32,
}

impl Edge {
    /// Creates an unconnected edge with weight `0`.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            from: String::new(),
            to: String::new(),
            weight: 0.0,
        }
    }

    /// Sets the edge weight.
    #[must_use]
    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    /// Unique id of the edge.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name of the edge.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Id of the vertex the edge starts at.
    #[must_use]
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Id of the vertex the edge ends at.
    #[must_use]
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Weight of the edge.
    #[must_use]
    pub const fn weight(&self) -> f32 {
        self.weight
    }
}

/// Callback invoked for each vertex reached by a traversal.
///
/// A failing visit is logged and recorded; traversal then moves on to
/// the next vertex. Any `FnMut(&Vertex) -> Result<(), E>` closure is a
/// visitor.
pub trait Visitor {
    /// Error produced by a failed visit.
    type Error: fmt::Display;

    /// Visits one vertex.
    fn visit(&mut self, vertex: &Vertex) -> std::result::Result<(), Self::Error>;
}

impl<F, E> Visitor for F
where
    F: FnMut(&Vertex) -> std::result::Result<(), E>,
    E: fmt::Display,
{
    type Error = E;

    fn visit(&mut self, vertex: &Vertex) -> std::result::Result<(), E> {
        self(vertex)
    }
}

/// A visit that failed during traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitFailure {
    /// Id of the vertex whose visit failed.
    pub vertex_id: String,
    /// Rendered visitor error.
    pub message: String,
}

/// A directed graph with string-keyed vertices.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    edge_seq: u64,
}

impl Graph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a vertex.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateVertex`] if a vertex with the same
    /// id exists.
    pub fn insert_vertex(&mut self, vertex: Vertex) -> Result<&Vertex> {
        if self.contains(&vertex.id) {
            return Err(GraphError::DuplicateVertex(vertex.id));
        }
        self.vertices.push(vertex.detached());
        Ok(&self.vertices[self.vertices.len() - 1])
    }

    /// Connects `from` to `to` with a generated edge of the given weight.
    ///
    /// Either vertex is inserted first if the graph does not contain it
    /// yet; a vertex that is already present is reused as-is.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateEdge`] if the pair is already
    /// connected.
    pub fn insert_edge(&mut self, from: Vertex, to: Vertex, weight: f32) -> Result<&Edge> {
        self.edge_seq += 1;
        let edge = Edge::new(self.edge_seq.to_string(), format!("{}->{}", from.id, to.id))
            .with_weight(weight);
        self.insert_edge_with(from, to, edge)
    }

    /// Connects `from` to `to` with a caller-supplied edge.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateEdge`] if the pair is already
    /// connected, or [`GraphError::DuplicateEdgeId`] if the edge id is
    /// taken.
    pub fn insert_edge_with(&mut self, from: Vertex, to: Vertex, mut edge: Edge) -> Result<&Edge> {
        if self.edge(&from.id, &to.id).is_some() {
            return Err(GraphError::DuplicateEdge {
                from: from.id,
                to: to.id,
            });
        }
        if self.edges.iter().any(|e| e.id == edge.id) {
            return Err(GraphError::DuplicateEdgeId(edge.id));
        }

        let from_idx = self.index_or_insert(from);
        let to_idx = self.index_or_insert(to);
        edge.from = self.vertices[from_idx].id.clone();
        edge.to = self.vertices[to_idx].id.clone();
        self.vertices[from_idx].out_edges.push(edge.id.clone());
        self.vertices[to_idx].in_edges.push(edge.id.clone());
        self.edges.push(edge);
        Ok(&self.edges[self.edges.len() - 1])
    }

    /// Removes a vertex together with every edge touching it.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] if the id does not resolve.
    pub fn delete_vertex(&mut self, id: &str) -> Result<Vertex> {
        let idx = self
            .index_of(id)
            .ok_or_else(|| GraphError::VertexNotFound(id.to_string()))?;
        let vertex = self.vertices.remove(idx);

        let incident: HashSet<&str> = vertex
            .in_edges
            .iter()
            .chain(&vertex.out_edges)
            .map(String::as_str)
            .collect();
        self.edges.retain(|e| !incident.contains(e.id.as_str()));
        for other in &mut self.vertices {
            other.in_edges.retain(|e| !incident.contains(e.as_str()));
            other.out_edges.retain(|e| !incident.contains(e.as_str()));
        }
        Ok(vertex)
    }

    /// Removes the edge from `from` to `to`.
    ///
    /// The edge disappears from both adjacency lists and from the
    /// global edge list.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] if either id does not
    /// resolve, or [`GraphError::EdgeNotFound`] if the vertices are not
    /// connected.
    pub fn delete_edge(&mut self, from: &str, to: &str) -> Result<Edge> {
        let from_idx = self.require(from)?;
        let to_idx = self.require(to)?;
        let pos = self
            .edges
            .iter()
            .position(|e| e.from == from && e.to == to)
            .ok_or_else(|| GraphError::EdgeNotFound {
                from: from.to_string(),
                to: to.to_string(),
            })?;
        let edge = self.edges.remove(pos);
        self.vertices[from_idx].out_edges.retain(|e| *e != edge.id);
        self.vertices[to_idx].in_edges.retain(|e| *e != edge.id);
        Ok(edge)
    }

    /// Returns `true` if a vertex with the given id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    /// Looks up a vertex by id.
    #[must_use]
    pub fn vertex(&self, id: &str) -> Option<&Vertex> {
        self.vertices.iter().find(|v| v.id == id)
    }

    /// Looks up the edge from `from` to `to`.
    #[must_use]
    pub fn edge(&self, from: &str, to: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.from == from && e.to == to)
    }

    /// Weight of the edge from `from` to `to`, or [`INFINITE`] if the
    /// vertices are not connected.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] if either id does not
    /// resolve.
    pub fn weight(&self, from: &str, to: &str) -> Result<f32> {
        self.require(from)?;
        self.require(to)?;
        Ok(self.edge(from, to).map_or(INFINITE, Edge::weight))
    }

    /// Destination vertices of every outgoing edge of `id`, in edge
    /// insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] if the id does not resolve.
    pub fn neighbors(&self, id: &str) -> Result<Vec<&Vertex>> {
        let idx = self.require(id)?;
        Ok(self.neighbors_of(idx).map(|i| &self.vertices[i]).collect())
    }

    /// All vertices, in insertion order.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// All edges, in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Orders the vertices so that every edge points forward.
    ///
    /// Each step emits the first vertex, in insertion order, whose
    /// incoming edges all start at already emitted vertices. The result
    /// is therefore deterministic for a given insertion history.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::CyclicGraph`] if some vertices can never be
    /// emitted.
    pub fn topological_order(&self) -> Result<Vec<&Vertex>> {
        let mut ordered: Vec<&Vertex> = Vec::with_capacity(self.vertices.len());
        let mut emitted: HashSet<&str> = HashSet::new();
        let mut released: HashSet<&str> = HashSet::new();

        loop {
            let next = self.vertices.iter().find(|v| {
                !emitted.contains(v.id.as_str())
                    && v.in_edges.iter().all(|e| released.contains(e.as_str()))
            });
            let Some(vertex) = next else {
                break;
            };
            emitted.insert(&vertex.id);
            released.extend(vertex.out_edges.iter().map(String::as_str));
            ordered.push(vertex);
        }

        if ordered.len() < self.vertices.len() {
            return Err(GraphError::CyclicGraph);
        }
        Ok(ordered)
    }

    /// Visits every vertex reachable from `root`, depth first.
    ///
    /// Returns the visits that failed; a failure never stops the
    /// traversal.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] if `root` does not resolve.
    pub fn for_depth_first_each<V: Visitor>(
        &self,
        root: &str,
        mut visitor: V,
    ) -> Result<Vec<VisitFailure>> {
        let root_idx = self.require(root)?;
        let mut visited = HashSet::new();
        let mut failures = Vec::new();

        self.visit(root_idx, &mut visitor, &mut failures, "Depth-first");
        visited.insert(root_idx);
        self.depth_first_from(root_idx, &mut visited, &mut visitor, &mut failures);
        Ok(failures)
    }

    /// Visits every vertex reachable from `root`, breadth first.
    ///
    /// Returns the visits that failed; a failure never stops the
    /// traversal.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexNotFound`] if `root` does not resolve.
    pub fn for_breadth_first_each<V: Visitor>(
        &self,
        root: &str,
        mut visitor: V,
    ) -> Result<Vec<VisitFailure>> {
        let root_idx = self.require(root)?;
        let mut visited = HashSet::new();
        let mut failures = Vec::new();
        let mut queue = VecDeque::new();

        self.visit(root_idx, &mut visitor, &mut failures, "Breadth-first");
        visited.insert(root_idx);
        queue.push_back(root_idx);

        while let Some(current) = queue.pop_front() {
            for neighbor in self.neighbors_of(current) {
                if visited.insert(neighbor) {
                    self.visit(neighbor, &mut visitor, &mut failures, "Breadth-first");
                    queue.push_back(neighbor);
                }
            }
        }
        Ok(failures)
    }

    // ---- internals ----

    fn index_of(&self, id: &str) -> Option<usize> {
        self.vertices.iter().position(|v| v.id == id)
    }

    fn require(&self, id: &str) -> Result<usize> {
        self.index_of(id)
            .ok_or_else(|| GraphError::VertexNotFound(id.to_string()))
    }

    fn index_or_insert(&mut self, vertex: Vertex) -> usize {
        if let Some(idx) = self.index_of(&vertex.id) {
            return idx;
        }
        self.vertices.push(vertex.detached());
        self.vertices.len() - 1
    }

    fn neighbors_of(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.vertices[idx].out_edges.iter().filter_map(move |edge_id| {
            let edge = self.edges.iter().find(|e| e.id == *edge_id)?;
            self.index_of(&edge.to)
        })
    }

    fn visit<V: Visitor>(
        &self,
        idx: usize,
        visitor: &mut V,
        failures: &mut Vec<VisitFailure>,
        traversal: &str,
    ) {
        let vertex = &self.vertices[idx];
        if let Err(e) = visitor.visit(vertex) {
            warn!(vertex = %vertex.id, error = %e, "{traversal} traversal encountered an error");
            failures.push(VisitFailure {
                vertex_id: vertex.id.clone(),
                message: e.to_string(),
            });
        }
    }

    fn depth_first_from<V: Visitor>(
        &self,
        idx: usize,
        visited: &mut HashSet<usize>,
        visitor: &mut V,
        failures: &mut Vec<VisitFailure>,
    ) {
        let neighbors: Vec<usize> = self.neighbors_of(idx).collect();
        for neighbor in neighbors {
            if !visited.insert(neighbor) {
                continue;
            }
            self.visit(neighbor, visitor, failures, "Depth-first");
            self.depth_first_from(neighbor, visited, visitor, failures);
        }
    }
}
