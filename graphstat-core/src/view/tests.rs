//! Tests for filtered traversal.

use std::sync::Arc;

use rstest::rstest;

use crate::graph::{EdgeRef, Graph};

use super::{FilterSpec, FilteredGraph, GraphView};

fn star_with_loop() -> Graph {
    // 0 → 1, 0 → 2, 2 → 0, 1 → 1
    Graph::from_edges(3, &[(0, 1), (0, 2), (2, 0), (1, 1)]).expect("valid edges")
}

fn sorted(iter: impl Iterator<Item = usize>) -> Vec<usize> {
    let mut items: Vec<usize> = iter.collect();
    items.sort_unstable();
    items
}

#[test]
fn unfiltered_view_mirrors_store() {
    let graph = star_with_loop();
    let view = GraphView::unfiltered(&graph);

    assert_eq!(view.vertex_count(), 3);
    assert_eq!(view.edge_count(), 4);
    assert!(!view.is_vertex_filter_active());
    assert!(!view.is_edge_filter_active());
    assert_eq!(sorted(view.out_neighbors(0)), vec![1, 2]);
    assert_eq!(sorted(view.in_neighbors(0)), vec![2]);
    assert_eq!(view.total_degree(0), 3);
    assert_eq!(view.total_degree(1), 3);
}

#[test]
fn reversed_view_swaps_directions() {
    let graph = star_with_loop();
    let view = GraphView::new(&graph, &FilterSpec::new().with_reversed(true));

    assert_eq!(sorted(view.out_neighbors(0)), vec![2]);
    assert_eq!(sorted(view.in_neighbors(0)), vec![1, 2]);
    assert_eq!(view.out_degree(0), 1);
    assert_eq!(view.in_degree(0), 2);
    assert!(view.out_edges(0).all(|edge| edge.source == 0));
    let first = view.edges().next().expect("edges exist");
    assert_eq!((first.source, first.target), (1, 0));
}

#[rstest]
#[case::plain(false)]
#[case::reversed(true)]
fn undirected_view_merges_directions(#[case] reversed: bool) {
    let graph = star_with_loop();
    let spec = FilterSpec::new().with_directed(false).with_reversed(reversed);
    let view = GraphView::new(&graph, &spec);

    assert_eq!(sorted(view.out_neighbors(0)), vec![1, 2, 2]);
    assert_eq!(sorted(view.in_neighbors(0)), vec![1, 2, 2]);
    // The self-loop reaches vertex 1 from both ends.
    assert_eq!(sorted(view.out_neighbors(1)), vec![0, 1, 1]);
    assert_eq!(view.out_degree(1), 3);
    assert_eq!(view.in_degree(1), 3);
    assert_eq!(view.total_degree(1), 3);
}

#[test]
fn vertex_filter_hides_incident_edges() {
    let mut graph = star_with_loop();
    graph.insert_vertex_index_property("id");
    let spec = FilterSpec::new().with_vertex_property("id", 0.0, 1.0);
    let view = GraphView::new(&graph, &spec);

    assert!(view.is_vertex_filter_active());
    assert_eq!(view.vertices().collect::<Vec<_>>(), vec![0, 1]);
    assert_eq!(view.edge_count(), 2);
    assert!(!view.contains_vertex(2));
    assert_eq!(sorted(view.out_neighbors(0)), vec![1]);
    assert_eq!(view.in_degree(0), 0);
    assert_eq!(view.out_degree(2), 0);
}

#[test]
fn edge_predicate_and_property_combine() {
    let mut graph = star_with_loop();
    graph.insert_edge_property("w", vec![1.0, 5.0, 5.0, 5.0]);
    let spec = FilterSpec::new()
        .with_edge_property("w", 2.0, 10.0)
        .with_edge_predicate(|_: &Graph, edge: EdgeRef| edge.source != edge.target);
    let view = GraphView::new(&graph, &spec);

    let kept: Vec<usize> = view.edges().map(|edge| edge.index).collect();
    assert_eq!(kept, vec![1, 2]);
    assert_eq!(view.vertex_count(), 3);
}

#[test]
fn unknown_filter_property_leaves_view_unfiltered() {
    let graph = star_with_loop();
    let spec = FilterSpec::new().with_vertex_property("missing", 0.0, 0.0);
    let view = GraphView::new(&graph, &spec);

    assert!(!view.is_vertex_filter_active());
    assert_eq!(view.vertex_count(), 3);
    assert_eq!(view.edge_count(), 4);
}

#[test]
fn all_neighbors_ignores_direction_in_directed_view() {
    let graph = star_with_loop();
    let view = GraphView::unfiltered(&graph);
    assert_eq!(sorted(view.all_neighbors(0)), vec![1, 2, 2]);
}

#[test]
fn session_clears_filter_when_property_removed() {
    let mut graph = star_with_loop();
    graph.insert_vertex_index_property("id");
    let mut session = FilteredGraph::new(graph);
    session.set_vertex_filter_property(Some("id"));
    session.set_vertex_filter_range(0.0, 0.0);
    assert!(session.is_vertex_filter_active());
    assert_eq!(session.view().vertex_count(), 1);

    assert!(session.remove_vertex_property("id"));
    assert!(!session.is_vertex_filter_active());
    assert_eq!(session.filter().vertex_filter().property(), None);
    assert_eq!(session.view().vertex_count(), 3);
}

#[test]
fn session_generic_filter_toggles() {
    let mut session = FilteredGraph::new(star_with_loop());
    session.set_generic_edge_filter(Some(Arc::new(|_: &Graph, edge: EdgeRef| edge.index == 0)));
    assert!(session.is_edge_filter_active());
    assert_eq!(session.view().edge_count(), 1);

    session.set_generic_edge_filter(None);
    assert!(!session.is_edge_filter_active());
    assert_eq!(session.view().edge_count(), 4);
}

#[test]
fn session_stores_local_clustering() {
    // Triangle 0-1-2 plus pendant vertex 3 hanging off 0.
    let graph = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 0), (0, 3)]).expect("valid edges");
    let mut session = FilteredGraph::new(graph);
    session.set_directed(false);
    session.set_local_clustering_to_property("clust");

    let values = session
        .graph()
        .vertex_property("clust")
        .expect("property stored");
    let expected = [1.0 / 3.0, 1.0, 1.0, 0.0];
    for (got, want) in values.values().iter().zip(expected) {
        assert!((got - want).abs() < 1e-12, "got {got}, want {want}");
    }
}
