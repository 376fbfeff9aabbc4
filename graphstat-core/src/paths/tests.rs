//! Unit tests for components and distances.

use rstest::rstest;

use crate::{FilterSpec, Graph, GraphView, test_utils::cycle};

use super::*;

#[test]
fn directed_cycle_distances() {
    let graph = cycle(5);
    let view = GraphView::unfiltered(&graph);
    assert_eq!(average_distance(&view), 2.0);
    // 1 + 1/2 + 1/3 + 1/4 per source, over 4 targets.
    let expected = (1.0 + 0.5 + 1.0 / 3.0 + 0.25) / 4.0;
    assert!((average_harmonic_distance(&view) - expected).abs() < 1e-12);
}

#[test]
fn undirected_cycle_distances() {
    let graph = cycle(5);
    let view = GraphView::new(&graph, &FilterSpec::new().with_directed(false));
    assert!((average_distance(&view) - 1.2).abs() < 1e-12);
}

#[test]
fn reversal_preserves_path_distances() {
    let graph = Graph::from_edges(3, &[(0, 1), (1, 2)]).expect("valid edges");
    let forward = GraphView::unfiltered(&graph);
    let backward = GraphView::new(&graph, &FilterSpec::new().with_reversed(true));
    // Pairs: three self pairs, 0→1, 1→2 (distance 1) and 0→2 (distance 2).
    assert_eq!(average_distance(&forward), 4.0 / 6.0);
    assert_eq!(average_distance(&backward), 4.0 / 6.0);
}

#[test]
fn disconnected_graph_splits_average_and_harmonic() {
    let single = Graph::from_edges(2, &[(0, 1)]).expect("valid edges");
    let split = Graph::from_edges(4, &[(0, 1), (2, 3)]).expect("valid edges");
    let spec = FilterSpec::new().with_directed(false);
    let single = GraphView::new(&single, &spec);
    let split = GraphView::new(&split, &spec);

    assert_eq!(average_distance(&single), 0.5);
    assert_eq!(average_distance(&split), 0.5);
    assert_eq!(average_harmonic_distance(&single), 1.0);
    assert!((average_harmonic_distance(&split) - 1.0 / 3.0).abs() < 1e-12);
}

#[rstest]
#[case::empty(0)]
#[case::single(1)]
fn tiny_views_have_zero_harmonic_distance(#[case] order: usize) {
    let graph = Graph::from_edges(order, &[]).expect("valid edges");
    assert_eq!(average_harmonic_distance(&GraphView::unfiltered(&graph)), 0.0);
}

#[test]
fn empty_view_has_nan_average_distance() {
    let graph = Graph::new();
    assert!(average_distance(&GraphView::unfiltered(&graph)).is_nan());
}

#[test]
fn components_ignore_direction_and_respect_filters() {
    let mut graph = Graph::from_edges(6, &[(0, 1), (2, 1), (3, 4), (4, 5)]).expect("valid edges");
    let hist = component_size_histogram(&GraphView::unfiltered(&graph));
    assert_eq!(hist.iter().collect::<Vec<_>>(), vec![([3.0], 2)]);

    graph.insert_vertex_index_property("id");
    let spec = FilterSpec::new().with_vertex_property("id", 0.0, 3.5);
    let hist = component_size_histogram(&GraphView::new(&graph, &spec));
    // Vertices 4 and 5 are excluded, leaving 3 isolated.
    assert_eq!(hist.count([3.0]), 1);
    assert_eq!(hist.count([1.0]), 1);
    assert_eq!(hist.total(), 2);
}
