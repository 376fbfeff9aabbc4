//! Clustering coefficients over the undirected simple neighbourhood.
//!
//! Direction, parallel edges and self-loops are ignored: each vertex's
//! neighbourhood is the sorted set of distinct other vertices it shares a
//! non-excluded edge with.

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::view::GraphView;

use super::{Histogram, vertex_pass};

fn neighbour_sets(view: &GraphView<'_>) -> Vec<Vec<usize>> {
    (0..view.graph().vertex_count())
        .into_par_iter()
        .map(|vertex| {
            if !view.contains_vertex(vertex) {
                return Vec::new();
            }
            let mut set: Vec<usize> = view
                .all_neighbors(vertex)
                .filter(|&other| other != vertex)
                .collect();
            set.sort_unstable();
            set.dedup();
            set
        })
        .collect()
}

/// Closed and total triplet counts centred on `vertex`.
fn triplets(sets: &[Vec<usize>], vertex: usize) -> (usize, usize) {
    let Some(own) = sets.get(vertex) else {
        return (0, 0);
    };
    let degree = own.len();
    let total = degree * degree.saturating_sub(1) / 2;
    let mut closed = 0;
    for (offset, &first) in own.iter().enumerate() {
        let Some(first_set) = sets.get(first) else {
            continue;
        };
        closed += own[offset + 1..]
            .iter()
            .filter(|&&second| first_set.binary_search(&second).is_ok())
            .count();
    }
    (closed, total)
}

fn coefficient((closed, total): (usize, usize)) -> f64 {
    if total == 0 {
        0.0
    } else {
        closed as f64 / total as f64
    }
}

/// Fraction of connected triplets that are closed: `3·triangles / triplets`.
///
/// Returns NaN when the view has no path of length two.
///
/// # Examples
/// ```
/// use graphstat_core::{Graph, GraphView, stats};
///
/// let triangle = Graph::from_edges(3, &[(0, 1), (1, 2), (2, 0)])?;
/// assert_eq!(stats::global_clustering(&GraphView::unfiltered(&triangle)), 1.0);
///
/// let single_edge = Graph::from_edges(2, &[(0, 1)])?;
/// assert!(stats::global_clustering(&GraphView::unfiltered(&single_edge)).is_nan());
/// # Ok::<(), graphstat_core::GraphError>(())
/// ```
#[instrument(
    name = "stats.global_clustering",
    skip_all,
    fields(vertices = view.vertex_count(), edges = view.edge_count())
)]
pub fn global_clustering(view: &GraphView<'_>) -> f64 {
    let sets = neighbour_sets(view);
    let counts: Vec<(usize, usize)> = (0..sets.len())
        .into_par_iter()
        .map(|vertex| triplets(&sets, vertex))
        .collect();
    let (closed, total) = counts
        .into_iter()
        .fold((0, 0), |(closed, total), (c, t)| (closed + c, total + t));
    debug!(closed, total, "triplets counted");
    if total == 0 {
        f64::NAN
    } else {
        closed as f64 / total as f64
    }
}

/// Local clustering coefficient of every vertex, indexed by vertex.
///
/// Vertices with fewer than two distinct neighbours, and excluded vertices,
/// get `0.0`.
#[instrument(
    name = "stats.local_clustering_coefficients",
    skip_all,
    fields(vertices = view.vertex_count())
)]
pub fn local_clustering_coefficients(view: &GraphView<'_>) -> Vec<f64> {
    let sets = neighbour_sets(view);
    (0..sets.len())
        .into_par_iter()
        .map(|vertex| coefficient(triplets(&sets, vertex)))
        .collect()
}

/// Histogram of the local clustering coefficient over non-excluded vertices.
#[instrument(
    name = "stats.local_clustering_histogram",
    skip_all,
    fields(vertices = view.vertex_count())
)]
pub fn local_clustering_histogram(view: &GraphView<'_>) -> Histogram<1> {
    let sets = neighbour_sets(view);
    vertex_pass(view, |vertex, hist| {
        hist.increment([coefficient(triplets(&sets, vertex))]);
    })
}
