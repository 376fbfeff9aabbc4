//! Component sizes and breadth-first distance statistics.
//!
//! Every traversal stays inside the view: excluded vertices are never entered
//! and excluded edges are never followed. Distances follow the view's
//! out-neighbours, so they honour direction (and reversal) unless the view is
//! undirected. Component detection always ignores direction.

use std::collections::VecDeque;

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::{stats::Histogram, view::GraphView};

/// Breadth-first distances from `source` along out-neighbours. Unreached
/// vertices stay `None`.
fn distances_from(view: &GraphView<'_>, source: usize) -> Vec<Option<usize>> {
    let mut distances = vec![None; view.graph().vertex_count()];
    let mut queue = VecDeque::new();
    if let Some(slot) = distances.get_mut(source) {
        *slot = Some(0);
        queue.push_back((source, 0));
    }
    while let Some((vertex, distance)) = queue.pop_front() {
        for next in view.out_neighbors(vertex) {
            if let Some(slot) = distances.get_mut(next)
                && slot.is_none()
            {
                *slot = Some(distance + 1);
                queue.push_back((next, distance + 1));
            }
        }
    }
    distances
}

/// Runs one traversal per non-excluded source and returns the per-source
/// results in vertex order.
fn per_source<T, F>(view: &GraphView<'_>, summarise: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize, &[Option<usize>]) -> T + Sync + Send,
{
    let sources: Vec<usize> = view.vertices().collect();
    sources
        .par_iter()
        .map(|&source| summarise(source, &distances_from(view, source)))
        .collect()
}

/// Histogram of weakly connected component sizes.
///
/// # Examples
/// ```
/// use graphstat_core::{Graph, GraphView, paths};
///
/// let graph = Graph::from_edges(5, &[(0, 1), (2, 1), (3, 4)])?;
/// let hist = paths::component_size_histogram(&GraphView::unfiltered(&graph));
/// assert_eq!(hist.count([3.0]), 1);
/// assert_eq!(hist.count([2.0]), 1);
/// # Ok::<(), graphstat_core::GraphError>(())
/// ```
#[instrument(
    name = "paths.component_size_histogram",
    skip_all,
    fields(vertices = view.vertex_count(), edges = view.edge_count())
)]
pub fn component_size_histogram(view: &GraphView<'_>) -> Histogram<1> {
    let mut visited = vec![false; view.graph().vertex_count()];
    let mut hist = Histogram::new();
    let mut queue = VecDeque::new();
    for root in view.vertices() {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        queue.push_back(root);
        let mut size = 0_usize;
        while let Some(vertex) = queue.pop_front() {
            size += 1;
            for next in view.all_neighbors(vertex) {
                if !visited[next] {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }
        hist.increment([size as f64]);
    }
    debug!(components = hist.total(), "components found");
    hist
}

/// Mean shortest-path length over ordered reachable pairs `(u, v)`, including
/// `u == v` at distance zero.
///
/// Unreachable pairs are left out of both the sum and the count, so a
/// disconnected graph reports its per-component average. A view with no
/// vertices yields NaN.
#[instrument(
    name = "paths.average_distance",
    skip_all,
    fields(vertices = view.vertex_count(), edges = view.edge_count())
)]
pub fn average_distance(view: &GraphView<'_>) -> f64 {
    let partials = per_source(view, |_, distances| {
        distances
            .iter()
            .flatten()
            .fold((0_usize, 0_usize), |(sum, count), &d| (sum + d, count + 1))
    });
    let (sum, count) = partials
        .into_iter()
        .fold((0, 0), |(sum, count), (s, c)| (sum + s, count + c));
    debug!(sum, pairs = count, "distances accumulated");
    if count == 0 {
        f64::NAN
    } else {
        sum as f64 / count as f64
    }
}

/// Mean of `1 / d(u, v)` over every ordered pair of distinct non-excluded
/// vertices, with unreachable pairs contributing zero.
///
/// The result is finite and lies in `[0, 1]`. Fewer than two vertices yield
/// `0.0`.
#[instrument(
    name = "paths.average_harmonic_distance",
    skip_all,
    fields(vertices = view.vertex_count(), edges = view.edge_count())
)]
pub fn average_harmonic_distance(view: &GraphView<'_>) -> f64 {
    let vertices = view.vertex_count();
    if vertices < 2 {
        return 0.0;
    }
    let partials = per_source(view, |source, distances| {
        distances
            .iter()
            .enumerate()
            .filter(|&(target, _)| target != source)
            .filter_map(|(_, distance)| *distance)
            .map(|distance| 1.0 / distance as f64)
            .sum::<f64>()
    });
    let total: f64 = partials.into_iter().sum();
    let pairs = vertices as f64 * (vertices - 1) as f64;
    total / pairs
}

#[cfg(test)]
mod tests;
