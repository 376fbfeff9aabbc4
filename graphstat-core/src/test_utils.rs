//! Shared test utilities for `graphstat-core`.

use graphstat_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;
use test_strategy::Arbitrary;

use crate::{FilterSpec, Graph};

/// Builds a standard proptest configuration from the shared CI profile.
///
/// Keeps property suites aligned on the same `PROGTEST_CASES` and
/// `GRAPHSTAT_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Directed cycle `0 → 1 → … → order-1 → 0`.
pub(crate) fn cycle(order: usize) -> Graph {
    let edges: Vec<(usize, usize)> = (0..order).map(|v| (v, (v + 1) % order)).collect();
    Graph::from_edges(order, &edges).expect("cycle endpoints are in range")
}

/// Complete graph on `order` vertices with one edge per unordered pair,
/// oriented from the lower index.
pub(crate) fn complete(order: usize) -> Graph {
    let edges: Vec<(usize, usize)> = (0..order)
        .flat_map(|source| (source + 1..order).map(move |target| (source, target)))
        .collect();
    Graph::from_edges(order, &edges).expect("complete-graph endpoints are in range")
}

/// Small random multigraph plus view flags for property suites.
///
/// Raw endpoints are reduced modulo the vertex count, so self-loops and
/// parallel edges appear naturally.
#[derive(Clone, Debug, Arbitrary)]
pub(crate) struct GraphInput {
    #[strategy(1_usize..20)]
    pub(crate) vertices: usize,
    #[strategy(proptest::collection::vec((0_usize..64, 0_usize..64), 0..48))]
    pub(crate) raw_edges: Vec<(usize, usize)>,
    pub(crate) undirected: bool,
    pub(crate) reversed: bool,
    /// Inclusive upper bound on the vertex index kept by [`Self::filter`].
    #[strategy(0_usize..20)]
    pub(crate) keep_below: usize,
}

impl GraphInput {
    pub(crate) fn graph(&self) -> Graph {
        let edges: Vec<(usize, usize)> = self
            .raw_edges
            .iter()
            .map(|&(source, target)| (source % self.vertices, target % self.vertices))
            .collect();
        let mut graph =
            Graph::from_edges(self.vertices, &edges).expect("endpoints reduced into range");
        graph.insert_vertex_index_property("index");
        graph
    }

    /// Direction flags only.
    pub(crate) fn flags(&self) -> FilterSpec {
        FilterSpec::new()
            .with_directed(!self.undirected)
            .with_reversed(self.reversed)
    }

    /// Direction flags plus a vertex range filter on the index property.
    pub(crate) fn filter(&self) -> FilterSpec {
        self.flags()
            .with_vertex_property("index", 0.0, self.keep_below as f64)
    }
}
