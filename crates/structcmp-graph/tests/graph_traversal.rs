//! Traversal and ordering over small weight-matrix DAGs.
//!
//! Each matrix row `i` lists the weights of edges `v{i} -> v{j}`; a zero
//! weight means no edge.

use std::collections::{HashMap, VecDeque};

use structcmp_graph::{Graph, GraphConfigurer, GraphError, INFINITE, Vertex, Visitor};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn build<const N: usize>(weights: &[[f32; N]]) -> Graph {
    let mut graph = Graph::new();
    for (i, row) in weights.iter().enumerate() {
        for (j, weight) in row.iter().enumerate() {
            if *weight <= 0.0 || i == j {
                continue;
            }
            let from = format!("v{i}");
            let to = format!("v{j}");
            graph
                .insert_edge(Vertex::new(&from, &from), Vertex::new(&to, &to), *weight)
                .unwrap();
        }
    }
    graph
}

/// Checks that vertices arrive in `v0, v1, ...` order.
struct InOrder {
    expected: VecDeque<String>,
}

impl InOrder {
    fn new(count: usize) -> Self {
        Self {
            expected: (0..count).map(|i| format!("v{i}")).collect(),
        }
    }
}

impl Visitor for InOrder {
    type Error = String;

    fn visit(&mut self, vertex: &Vertex) -> Result<(), String> {
        match self.expected.pop_front() {
            Some(id) if id == vertex.id() => Ok(()),
            Some(id) => Err(format!("expected {id}, visited {}", vertex.id())),
            None => Err(format!("unexpected visit of {}", vertex.id())),
        }
    }
}

// ================================================================
// Traversal
// ================================================================

#[test]
fn breadth_first_visits_every_vertex_level_by_level() {
    init_tracing();
    let weights = [
        [0., 1., 2., 0., 0., 0., 0., 0.],
        [0., 0., 0., 3., 4., 0., 0., 0.],
        [0., 0., 0., 0., 0., 5., 6., 0.],
        [0., 0., 0., 0., 0., 0., 0., 7.],
        [0., 0., 0., 0., 0., 0., 0., 8.],
        [0., 0., 0., 0., 0., 0., 0., 9.],
        [0., 0., 0., 0., 0., 0., 0., 10.],
        [0., 0., 0., 0., 0., 0., 0., 0.],
    ];
    let graph = build(&weights);

    assert_eq!(graph.vertex_count(), 8);
    assert_eq!(graph.edge_count(), 10);
    assert!((graph.weight("v4", "v7").unwrap() - 8.0).abs() < f32::EPSILON);

    let failures = graph
        .for_breadth_first_each("v0", InOrder::new(weights.len()))
        .unwrap();
    assert!(failures.is_empty(), "{failures:?}");
}

#[test]
fn depth_first_visits_every_vertex_branch_by_branch() {
    init_tracing();
    let weights = [
        [0., 1., 0., 0., 0., 2., 0., 0.],
        [0., 0., 2., 0., 4., 0., 0., 0.],
        [0., 0., 0., 3., 0., 0., 0., 0.],
        [0., 0., 0., 0., 0., 0., 0., 0.],
        [0., 0., 0., 3., 0., 0., 0., 0.],
        [0., 0., 0., 0., 0., 0., 6., 7.],
        [0., 0., 0., 3., 0., 0., 0., 0.],
        [0., 0., 0., 3., 0., 0., 0., 0.],
    ];
    let graph = build(&weights);

    assert_eq!(graph.vertex_count(), 8);
    assert_eq!(graph.edge_count(), 10);
    assert!((graph.weight("v4", "v7").unwrap() - INFINITE).abs() < f32::EPSILON);

    let failures = graph
        .for_depth_first_each("v0", InOrder::new(weights.len()))
        .unwrap();
    assert!(failures.is_empty(), "{failures:?}");
}

#[test]
fn out_of_order_visits_are_reported_not_fatal() {
    init_tracing();
    let mut graph = Graph::new();
    graph
        .insert_edge(Vertex::new("v0", "v0"), Vertex::new("v2", "v2"), 1.0)
        .unwrap();
    graph
        .insert_edge(Vertex::new("v0", "v0"), Vertex::new("v1", "v1"), 1.0)
        .unwrap();

    let failures = graph.for_breadth_first_each("v0", InOrder::new(3)).unwrap();
    let failed: Vec<&str> = failures.iter().map(|f| f.vertex_id.as_str()).collect();
    assert_eq!(failed, ["v2", "v1"]);
}

// ================================================================
// Topological order
// ================================================================

#[test]
fn acyclic_matrix_orders_every_vertex() {
    let graph = build(&[
        [0., 1., 1., 1., 0.],
        [0., 0., 0., 0., 0.],
        [0., 1., 0., 0., 1.],
        [0., 0., 0., 0., 1.],
        [0., 0., 0., 0., 0.],
    ]);
    let order: Vec<&str> = graph
        .topological_order()
        .unwrap()
        .into_iter()
        .map(Vertex::id)
        .collect();

    assert_eq!(order.len(), 5);
    for edge in graph.edges() {
        let from = order.iter().position(|id| *id == edge.from()).unwrap();
        let to = order.iter().position(|id| *id == edge.to()).unwrap();
        assert!(from < to, "{} must precede {}", edge.from(), edge.to());
    }
}

#[test]
fn back_edge_in_matrix_is_a_cycle() {
    let graph = build(&[
        [0., 1., 1., 1., 0.],
        [1., 0., 0., 0., 0.],
        [0., 1., 0., 0., 1.],
        [0., 0., 0., 0., 1.],
        [0., 0., 0., 0., 0.],
    ]);
    assert_eq!(graph.topological_order().unwrap_err(), GraphError::CyclicGraph);
}

// ================================================================
// Configurer
// ================================================================

fn extend(
    graph: &mut Graph,
    chain: &mut GraphConfigurer,
    edges: &[(usize, usize)],
    known: &mut HashMap<usize, Vertex>,
) {
    let current: usize = chain.last().unwrap().parse().unwrap();
    let targets: Vec<usize> = edges
        .iter()
        .filter(|(from, _)| *from == current)
        .map(|(_, to)| *to)
        .collect();

    match targets.as_slice() {
        [] => {}
        [single] => {
            let vertex = vertex_for(known, *single);
            chain.next(graph, vertex, 1.0).unwrap();
            extend(graph, chain, edges, known);
        }
        many => {
            for target in many {
                let vertex = vertex_for(known, *target);
                let mut branch = graph.new_configurer(vertex).unwrap();
                chain.route(graph, 1.0, &branch).unwrap();
                extend(graph, &mut branch, edges, known);
            }
        }
    }
}

fn vertex_for(known: &mut HashMap<usize, Vertex>, id: usize) -> Vertex {
    known
        .entry(id)
        .or_insert_with(|| Vertex::new(id.to_string(), id.to_string()))
        .clone()
}

#[test]
fn configurer_builds_the_same_dag_as_the_matrix() {
    let weights = [
        [0., 1., 0., 0., 0., 2., 0., 0.],
        [0., 0., 2., 0., 4., 0., 0., 0.],
        [0., 0., 0., 3., 0., 0., 0., 0.],
        [0., 0., 0., 0., 0., 0., 0., 0.],
        [0., 0., 0., 3., 0., 0., 0., 0.],
        [0., 0., 0., 0., 0., 0., 6., 7.],
        [0., 0., 0., 3., 0., 0., 0., 0.],
        [0., 0., 0., 3., 0., 0., 0., 0.],
    ];
    let mut edges = Vec::new();
    for (i, row) in weights.iter().enumerate() {
        for (j, weight) in row.iter().enumerate() {
            if i != j && *weight != 0.0 {
                edges.push((i, j));
            }
        }
    }

    let mut graph = Graph::new();
    let mut known = HashMap::new();
    let start = vertex_for(&mut known, edges[0].0);
    let mut chain = graph.new_configurer(start).unwrap();
    extend(&mut graph, &mut chain, &edges, &mut known);

    assert_eq!(graph.vertex_count(), 8);
    assert_eq!(graph.edge_count(), 10);
    assert!((graph.weight("4", "7").unwrap() - INFINITE).abs() < f32::EPSILON);
    assert!(graph.topological_order().is_ok());
}
