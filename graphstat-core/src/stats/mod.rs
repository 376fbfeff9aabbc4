//! Degree histograms, degree correlations and clustering over a
//! [`GraphView`](crate::GraphView).
//!
//! Vertex-indexed passes fan out over rayon. Each worker fills a partial
//! [`Histogram`] and the partials are merged by summation; because counts are
//! integers the result is identical to a sequential pass whatever the
//! scheduling. Averages are collected per vertex in index order and folded
//! sequentially so floating-point results are reproducible too.

mod clustering;
mod correlation;
mod histogram;

use rayon::prelude::*;

use crate::view::GraphView;

pub use self::{
    clustering::{global_clustering, local_clustering_coefficients, local_clustering_histogram},
    correlation::{
        assortativity_coefficient, average_nearest_neighbor_degree, combined_degree_histogram,
        degree_correlation_histogram, degree_histogram, edge_degree_correlation_histogram,
        vertex_degree_scalar_correlation_histogram,
    },
    histogram::{AverageCorrelation, Bucket, Histogram, RunningMean},
};

/// Runs `visit` on every non-excluded vertex in parallel, each call adding
/// keys to a worker-local histogram, and merges the partials.
pub(crate) fn vertex_pass<const N: usize, F>(view: &GraphView<'_>, visit: F) -> Histogram<N>
where
    F: Fn(usize, &mut Histogram<N>) + Sync + Send,
{
    (0..view.graph().vertex_count())
        .into_par_iter()
        .filter(|&vertex| view.contains_vertex(vertex))
        .fold(Histogram::new, |mut partial, vertex| {
            visit(vertex, &mut partial);
            partial
        })
        .reduce(Histogram::new, |mut left, right| {
            left.merge(right);
            left
        })
}

/// Evaluates `map` on every non-excluded vertex in parallel and returns the
/// results in ascending vertex order.
pub(crate) fn per_vertex<T, F>(view: &GraphView<'_>, map: F) -> Vec<(usize, T)>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    (0..view.graph().vertex_count())
        .into_par_iter()
        .filter(|&vertex| view.contains_vertex(vertex))
        .map(|vertex| (vertex, map(vertex)))
        .collect()
}
