//! Error types for graph operations.

/// Errors reported by [`Graph`](crate::Graph) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A vertex with the same id is already part of the graph.
    #[error("Duplicated vertex id {0}")]
    DuplicateVertex(String),

    /// An edge already connects the ordered vertex pair.
    #[error("Edge already exists between vertex {from} and {to}")]
    DuplicateEdge {
        /// Id of the source vertex.
        from: String,
        /// Id of the destination vertex.
        to: String,
    },

    /// An edge with the same id is already part of the graph.
    #[error("Duplicated edge id {0}")]
    DuplicateEdgeId(String),

    /// No vertex has the given id.
    #[error("Vertex not found by id {0}")]
    VertexNotFound(String),

    /// No edge connects the ordered vertex pair.
    #[error("Edge not found between vertex {from} and {to}")]
    EdgeNotFound {
        /// Id of the source vertex.
        from: String,
        /// Id of the destination vertex.
        to: String,
    },

    /// The edge set contains a cycle, so no topological order exists.
    #[error("Graph contains a cycle")]
    CyclicGraph,

    /// A configurer was used before any vertex was added to it.
    #[error("Graph configurer has no vertex")]
    EmptyConfigurer,
}

/// Result type for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;
