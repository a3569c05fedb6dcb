//! Fluent helper for building chains of vertices.

use crate::error::{GraphError, Result};
use crate::graph::{Graph, Vertex};

/// Builds a chain of vertices in a [`Graph`], connecting each new vertex
/// to the previous one.
///
/// The configurer only remembers the first and the last vertex of its
/// chain; the graph is passed to every call.
#[derive(Debug, Clone, Default)]
pub struct GraphConfigurer {
    first: Option<String>,
    last: Option<String>,
}

impl GraphConfigurer {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `vertex` to the chain.
    ///
    /// The first vertex of a chain is inserted on its own (or reused if
    /// the graph already has it). Every later vertex is connected from
    /// the current last vertex with the given weight.
    ///
    /// # Errors
    ///
    /// Propagates insertion errors from the graph.
    pub fn next(&mut self, graph: &mut Graph, vertex: Vertex, weight: f32) -> Result<&mut Self> {
        let id = vertex.id().to_string();
        match self.last.as_deref() {
            None => {
                if !graph.contains(&id) {
                    graph.insert_vertex(vertex)?;
                }
            }
            Some(last) => {
                let from = graph
                    .vertex(last)
                    .map(Vertex::detached)
                    .ok_or_else(|| GraphError::VertexNotFound(last.to_string()))?;
                graph.insert_edge(from, vertex, weight)?;
            }
        }
        if self.first.is_none() {
            self.first = Some(id.clone());
        }
        self.last = Some(id);
        Ok(self)
    }

    /// Connects the last vertex of this chain to the first vertex of
    /// `other`. This chain's last vertex does not move.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EmptyConfigurer`] if either chain is empty.
    pub fn route(&mut self, graph: &mut Graph, weight: f32, other: &Self) -> Result<&mut Self> {
        let from = self.last_vertex(graph)?;
        let to = other.first_vertex(graph)?;
        graph.insert_edge(from, to, weight)?;
        Ok(self)
    }

    /// Id of the first vertex of the chain.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.first.as_deref()
    }

    /// Id of the last vertex of the chain.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }

    fn first_vertex(&self, graph: &Graph) -> Result<Vertex> {
        let id = self.first.as_deref().ok_or(GraphError::EmptyConfigurer)?;
        graph
            .vertex(id)
            .map(Vertex::detached)
            .ok_or_else(|| GraphError::VertexNotFound(id.to_string()))
    }

    fn last_vertex(&self, graph: &Graph) -> Result<Vertex> {
        let id = self.last.as_deref().ok_or(GraphError::EmptyConfigurer)?;
        graph
            .vertex(id)
            .map(Vertex::detached)
            .ok_or_else(|| GraphError::VertexNotFound(id.to_string()))
    }
}

impl Graph {
    /// Starts a new chain at `vertex`.
    ///
    /// # Errors
    ///
    /// Propagates insertion errors from the graph.
    pub fn new_configurer(&mut self, vertex: Vertex) -> Result<GraphConfigurer> {
        let mut configurer = GraphConfigurer::new();
        configurer.next(self, vertex, 1.0)?;
        Ok(configurer)
    }

    /// Extends every chain in `chains` with the first vertex of
    /// `converged`, so that all of them flow into it.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EmptyConfigurer`] if `converged` is empty.
    pub fn converge(
        &mut self,
        chains: &mut [GraphConfigurer],
        converged: &GraphConfigurer,
    ) -> Result<&mut Self> {
        let to = converged.first_vertex(self)?;
        for chain in chains {
            chain.next(self, to.clone(), 1.0)?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::INFINITE;

    fn v(id: &str) -> Vertex {
        Vertex::new(id, id)
    }

    #[test]
    fn chain_connects_consecutive_vertices() {
        let mut graph = Graph::new();
        let mut chain = graph.new_configurer(v("a")).unwrap();
        chain
            .next(&mut graph, v("b"), 2.0)
            .unwrap()
            .next(&mut graph, v("c"), 3.0)
            .unwrap();

        assert_eq!(chain.first(), Some("a"));
        assert_eq!(chain.last(), Some("c"));
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!((graph.weight("b", "c").unwrap() - 3.0).abs() < f32::EPSILON);
        assert!((graph.weight("a", "c").unwrap() - INFINITE).abs() < f32::EPSILON);
    }

    #[test]
    fn route_links_two_chains() {
        let mut graph = Graph::new();
        let mut left = graph.new_configurer(v("a")).unwrap();
        let right = graph.new_configurer(v("x")).unwrap();

        left.route(&mut graph, 1.0, &right).unwrap();
        assert_eq!(left.last(), Some("a"));
        assert!(graph.edge("a", "x").is_some());
    }

    #[test]
    fn converge_joins_chains_into_one_vertex() {
        let mut graph = Graph::new();
        let mut chains = vec![
            graph.new_configurer(v("a")).unwrap(),
            graph.new_configurer(v("b")).unwrap(),
        ];
        let sink = graph.new_configurer(v("sink")).unwrap();

        graph.converge(&mut chains, &sink).unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert!(chains.iter().all(|c| c.last() == Some("sink")));

        let order: Vec<&str> = graph
            .topological_order()
            .unwrap()
            .into_iter()
            .map(Vertex::id)
            .collect();
        assert_eq!(order.last(), Some(&"sink"));
    }

    #[test]
    fn converge_on_empty_chain_fails() {
        let mut graph = Graph::new();
        let mut chains = vec![graph.new_configurer(v("a")).unwrap()];
        let err = graph
            .converge(&mut chains, &GraphConfigurer::new())
            .unwrap_err();
        assert_eq!(err, GraphError::EmptyConfigurer);
    }
}
