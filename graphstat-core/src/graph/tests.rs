//! Unit tests for the multigraph store and its property registry.

use rstest::rstest;

use crate::error::GraphError;

use super::{EntityKind, Graph};

fn path_graph() -> Graph {
    Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]).expect("path edges are valid")
}

#[test]
fn add_edge_rejects_unknown_vertices() {
    let mut graph = Graph::new();
    graph.add_vertices(2);
    let err = graph.add_edge(0, 2).expect_err("vertex 2 does not exist");
    assert_eq!(
        err,
        GraphError::VertexOutOfBounds {
            vertex: 2,
            vertex_count: 2
        }
    );
}

#[test]
fn adjacency_tracks_direction() {
    let graph = path_graph();
    assert_eq!(graph.out_edges(1), &[1]);
    assert_eq!(graph.in_edges(1), &[0]);
    assert_eq!(graph.out_degree(3), 0);
    assert_eq!(graph.in_degree(0), 0);
    assert!(graph.out_edges(42).is_empty());
}

#[test]
fn remove_edge_moves_last_edge_into_slot() {
    let mut graph = path_graph();
    graph.remove_edge(0).expect("edge 0 exists");

    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.endpoints(0), Ok((2, 3)));
    assert_eq!(graph.endpoints(1), Ok((1, 2)));
    assert_eq!(graph.out_edges(2), &[0]);
    assert_eq!(graph.in_edges(3), &[0]);
    assert!(graph.out_edges(0).is_empty());
}

#[test]
fn remove_vertex_drops_incident_edges_and_relabels() {
    let mut graph = path_graph();
    graph.remove_vertex(1).expect("vertex 1 exists");

    assert_eq!(graph.vertex_count(), 3);
    assert_eq!(graph.edge_count(), 1);
    // Vertex 3 moved into slot 1, so the surviving edge 2→3 now reads 2→1.
    let edge = graph.edge(0).expect("one edge remains");
    assert_eq!((edge.source, edge.target), (2, 1));
    assert_eq!(graph.in_edges(1), &[0]);
    assert_eq!(graph.out_edges(2), &[0]);
}

#[test]
fn remove_vertex_handles_self_loops() {
    let mut graph = Graph::from_edges(3, &[(2, 2), (0, 2), (1, 1)]).expect("valid edges");
    graph.remove_vertex(0).expect("vertex 0 exists");

    assert_eq!(graph.vertex_count(), 2);
    assert_eq!(graph.edge_count(), 2);
    let mut pairs: Vec<(usize, usize)> = graph.edges().map(|e| (e.source, e.target)).collect();
    pairs.sort_unstable();
    assert_eq!(pairs, vec![(0, 0), (1, 1)]);
}

#[test]
fn remove_parallel_edges_keeps_first_of_each_pair() {
    let mut graph =
        Graph::from_edges(3, &[(0, 1), (0, 1), (1, 0), (1, 2), (0, 1)]).expect("valid edges");
    let removed = graph.remove_parallel_edges();

    assert_eq!(removed, 2);
    let mut pairs: Vec<(usize, usize)> = graph.edges().map(|e| (e.source, e.target)).collect();
    pairs.sort_unstable();
    assert_eq!(pairs, vec![(0, 1), (1, 0), (1, 2)]);
}

#[test]
fn properties_follow_vertex_removal() {
    let mut graph = path_graph();
    graph.insert_vertex_index_property("id");
    graph.remove_vertex(0).expect("vertex 0 exists");

    let ids = graph.vertex_property("id").expect("property survives");
    assert_eq!(ids.values(), &[3.0, 1.0, 2.0]);
}

#[test]
fn properties_follow_edge_removal_and_growth() {
    let mut graph = path_graph();
    graph.insert_edge_index_property("eid");
    graph.remove_edge(1).expect("edge 1 exists");
    let added = graph.add_edge(3, 0).expect("valid edge");

    let ids = graph.edge_property("eid").expect("property survives");
    assert_eq!(ids.values(), &[0.0, 2.0, 0.0]);
    assert_eq!(ids.get(added), Some(0.0));
}

#[test]
fn set_property_creates_map_on_first_assignment() {
    let mut graph = path_graph();
    graph
        .set_vertex_property("weight", 2, 4.5)
        .expect("vertex 2 exists");

    let weights = graph.vertex_property("weight").expect("created");
    assert_eq!(weights.values(), &[0.0, 0.0, 4.5, 0.0]);
    assert_eq!(graph.properties().names(EntityKind::Vertex).collect::<Vec<_>>(), ["weight"]);
}

#[rstest]
#[case::vertex(EntityKind::Vertex)]
#[case::edge(EntityKind::Edge)]
fn unknown_property_reports_kind_and_name(#[case] kind: EntityKind) {
    let graph = path_graph();
    let err = graph.property(kind, "missing").expect_err("nothing registered");
    assert!(matches!(
        err,
        GraphError::UnknownProperty { kind: k, ref name } if k == kind && &**name == "missing"
    ));
}

#[test]
fn removing_property_reports_presence() {
    let mut graph = path_graph();
    graph.insert_edge_property("w", vec![1.0, 2.0, 3.0]);
    assert!(graph.remove_edge_property("w"));
    assert!(!graph.remove_edge_property("w"));
    assert!(graph.properties().is_empty());
}

#[test]
fn clear_edges_keeps_vertices() {
    let mut graph = path_graph();
    graph.insert_edge_index_property("eid");
    graph.clear_edges();
    assert_eq!(graph.vertex_count(), 4);
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.edge_property("eid").expect("map kept").is_empty());
}
