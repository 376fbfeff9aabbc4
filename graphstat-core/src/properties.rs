//! Property suites over random small multigraphs.

use proptest::prelude::*;

use crate::{
    DegreeSpec, FilteredGraph, FixedDegree, GeneratorParams, GraphView, Histogram,
    average_distance, average_harmonic_distance, combined_degree_histogram,
    component_size_histogram, degree_histogram, generate_correlated_configuration_model,
    global_clustering, local_clustering_coefficients,
    test_utils::{GraphInput, suite_proptest_config},
};

fn degree_specs() -> [DegreeSpec; 4] {
    [
        DegreeSpec::In,
        DegreeSpec::Out,
        DegreeSpec::Total,
        DegreeSpec::Scalar("index".into()),
    ]
}

proptest! {
    #![proptest_config(suite_proptest_config(128))]

    #[test]
    fn degree_histograms_count_included_vertices(input in any::<GraphInput>()) {
        let graph = input.graph();
        let view = GraphView::new(&graph, &input.filter());
        for spec in degree_specs() {
            let hist = degree_histogram(&view, &spec).expect("selectors resolve");
            prop_assert_eq!(hist.total(), view.vertex_count());
        }
    }

    #[test]
    fn combined_histogram_marginals_match(input in any::<GraphInput>()) {
        let graph = input.graph();
        let view = GraphView::new(&graph, &input.filter());
        let combined = combined_degree_histogram(&view);
        let in_hist = degree_histogram(&view, &DegreeSpec::In).expect("structural");
        let out_hist = degree_histogram(&view, &DegreeSpec::Out).expect("structural");
        prop_assert_eq!(combined.marginal(0), in_hist);
        prop_assert_eq!(combined.marginal(1), out_hist);
    }

    #[test]
    fn merge_order_does_not_matter(input in any::<GraphInput>(), split in 0_usize..20) {
        let graph = input.graph();
        let view = GraphView::new(&graph, &input.flags());
        let degree = DegreeSpec::Total.resolve(&view).expect("structural");
        let vertices: Vec<usize> = view.vertices().collect();
        let split = split.min(vertices.len());
        let (head, tail) = vertices.split_at(split);
        let head: Histogram<1> = head.iter().map(|&v| [degree.value(v)]).collect();
        let tail: Histogram<1> = tail.iter().map(|&v| [degree.value(v)]).collect();

        let mut forward = head.clone();
        forward.merge(tail.clone());
        let mut backward = tail;
        backward.merge(head);

        let whole = degree_histogram(&view, &DegreeSpec::Total).expect("structural");
        prop_assert_eq!(&forward, &backward);
        prop_assert_eq!(forward, whole);
    }

    #[test]
    fn harmonic_distance_is_bounded(input in any::<GraphInput>()) {
        let graph = input.graph();
        let view = GraphView::new(&graph, &input.filter());
        let harmonic = average_harmonic_distance(&view);
        prop_assert!(harmonic.is_finite());
        prop_assert!((0.0..=1.0).contains(&harmonic), "harmonic = {}", harmonic);
        let average = average_distance(&view);
        prop_assert!(average.is_nan() == (view.vertex_count() == 0));
    }

    #[test]
    fn clustering_stays_in_unit_interval(input in any::<GraphInput>()) {
        let graph = input.graph();
        let view = GraphView::new(&graph, &input.filter());
        let global = global_clustering(&view);
        prop_assert!(global.is_nan() || (0.0..=1.0).contains(&global));

        let local = local_clustering_coefficients(&view);
        for vertex in 0..graph.vertex_count() {
            let value = local[vertex];
            prop_assert!((0.0..=1.0).contains(&value));
            let mut neighbours: Vec<usize> = view
                .all_neighbors(vertex)
                .filter(|&other| other != vertex)
                .collect();
            neighbours.sort_unstable();
            neighbours.dedup();
            if neighbours.len() < 2 {
                prop_assert_eq!(value, 0.0);
            }
        }
    }

    #[test]
    fn component_sizes_partition_vertices(input in any::<GraphInput>()) {
        let graph = input.graph();
        let view = GraphView::new(&graph, &input.filter());
        let hist = component_size_histogram(&view);
        let covered: usize = hist.iter().map(|([size], count)| size as usize * count).sum();
        prop_assert_eq!(covered, view.vertex_count());
    }

    #[test]
    fn reapplying_a_filter_is_idempotent(input in any::<GraphInput>()) {
        let graph = input.graph();
        let once = FilteredGraph::with_filter(graph.clone(), input.filter());
        let mut twice = once.clone();
        let (low, high) = input.filter().vertex_filter().range();
        twice.set_vertex_filter_property(Some("index"));
        twice.set_vertex_filter_range(low, high);

        let (first, second) = (once.view(), twice.view());
        prop_assert_eq!(first.vertices().collect::<Vec<_>>(), second.vertices().collect::<Vec<_>>());
        prop_assert_eq!(
            first.edges().collect::<Vec<_>>(),
            second.edges().collect::<Vec<_>>()
        );
        prop_assert_eq!(
            degree_histogram(&first, &DegreeSpec::Total).expect("structural"),
            degree_histogram(&second, &DegreeSpec::Total).expect("structural")
        );
    }
}

proptest! {
    #![proptest_config(suite_proptest_config(32))]

    #[test]
    fn fixed_class_generation_round_trips(
        vertices in 1_usize..60,
        degree in 0_usize..5,
        seed in any::<u64>(),
    ) {
        let model = FixedDegree::new(degree, degree);
        let params = GeneratorParams::new(vertices).with_rng_seed(seed);
        let graph = generate_correlated_configuration_model(&model, &model, &params)
            .expect("a single balanced class converges");
        let again = generate_correlated_configuration_model(&model, &model, &params)
            .expect("a single balanced class converges");

        prop_assert_eq!(graph.edge_count(), vertices * degree);
        for vertex in 0..vertices {
            prop_assert_eq!(graph.in_degree(vertex), degree);
            prop_assert_eq!(graph.out_degree(vertex), degree);
        }
        prop_assert!(graph.edges().eq(again.edges()));
    }
}
