//! Degree distributions and degree-degree correlations.
//!
//! Vertex statistics visit each non-excluded vertex once. Correlation
//! statistics are defined over edges: every non-excluded edge `u → v`
//! contributes one sample pairing a quantity of `u` with one of `v`. Edges are
//! enumerated through each source's out-edges, so in an undirected view every
//! edge contributes in both orientations and the correlation is symmetric.

use tracing::{debug, instrument};

use crate::{
    degree::DegreeSpec,
    error::Result,
    view::GraphView,
};

use super::{AverageCorrelation, Histogram, per_vertex, vertex_pass};

/// Histogram of the selected degree over non-excluded vertices.
///
/// # Errors
/// Returns [`crate::GraphError::UnknownProperty`] when `spec` names an
/// unregistered vertex property.
///
/// # Examples
/// ```
/// use graphstat_core::{DegreeSpec, Graph, GraphView, stats};
///
/// let graph = Graph::from_edges(3, &[(0, 1), (0, 2)])?;
/// let view = GraphView::unfiltered(&graph);
/// let hist = stats::degree_histogram(&view, &DegreeSpec::Out)?;
/// assert_eq!(hist.count([0.0]), 2);
/// assert_eq!(hist.count([2.0]), 1);
/// # Ok::<(), graphstat_core::GraphError>(())
/// ```
#[instrument(
    name = "stats.degree_histogram",
    err,
    skip_all,
    fields(vertices = view.vertex_count(), degree = %spec)
)]
pub fn degree_histogram(view: &GraphView<'_>, spec: &DegreeSpec) -> Result<Histogram<1>> {
    let degree = spec.resolve(view)?;
    Ok(vertex_pass(view, |vertex, hist| {
        hist.increment([degree.value(vertex)]);
    }))
}

/// Joint `(in, out)` degree histogram over non-excluded vertices.
#[instrument(
    name = "stats.combined_degree_histogram",
    skip_all,
    fields(vertices = view.vertex_count())
)]
pub fn combined_degree_histogram(view: &GraphView<'_>) -> Histogram<2> {
    vertex_pass(view, |vertex, hist| {
        hist.increment([view.in_degree(vertex) as f64, view.out_degree(vertex) as f64]);
    })
}

/// Histogram of `(origin(u), target(v))` over every non-excluded edge
/// `u → v`.
///
/// # Errors
/// Returns [`crate::GraphError::UnknownProperty`] when either selector names
/// an unregistered vertex property.
#[instrument(
    name = "stats.degree_correlation_histogram",
    err,
    skip_all,
    fields(edges = view.edge_count(), origin = %origin, target = %target)
)]
pub fn degree_correlation_histogram(
    view: &GraphView<'_>,
    origin: &DegreeSpec,
    target: &DegreeSpec,
) -> Result<Histogram<2>> {
    let origin = origin.resolve(view)?;
    let target = target.resolve(view)?;
    Ok(vertex_pass(view, |source, hist| {
        let own = origin.value(source);
        for edge in view.out_edges(source) {
            hist.increment([own, target.value(edge.target)]);
        }
    }))
}

/// Histogram of `(origin(u), scalar(e), target(v))` over every non-excluded
/// edge `e = u → v`.
///
/// # Errors
/// Returns [`crate::GraphError::UnknownProperty`] when `edge_scalar` is not a
/// registered edge property or a selector names an unregistered vertex
/// property.
#[instrument(
    name = "stats.edge_degree_correlation_histogram",
    err,
    skip_all,
    fields(edges = view.edge_count(), origin = %origin, target = %target)
)]
pub fn edge_degree_correlation_histogram(
    view: &GraphView<'_>,
    origin: &DegreeSpec,
    edge_scalar: &str,
    target: &DegreeSpec,
) -> Result<Histogram<3>> {
    let scalar = view.edge_property(edge_scalar)?;
    let origin = origin.resolve(view)?;
    let target = target.resolve(view)?;
    Ok(vertex_pass(view, |source, hist| {
        let own = origin.value(source);
        for edge in view.out_edges(source) {
            let weight = scalar.get(edge.index).unwrap_or(0.0);
            hist.increment([own, weight, target.value(edge.target)]);
        }
    }))
}

/// Histogram of `(degree(v), scalar(v))` over non-excluded vertices.
///
/// # Errors
/// Returns [`crate::GraphError::UnknownProperty`] when `scalar` or the degree
/// selector names an unregistered vertex property.
#[instrument(
    name = "stats.vertex_degree_scalar_correlation_histogram",
    err,
    skip_all,
    fields(vertices = view.vertex_count(), degree = %spec)
)]
pub fn vertex_degree_scalar_correlation_histogram(
    view: &GraphView<'_>,
    spec: &DegreeSpec,
    scalar: &str,
) -> Result<Histogram<2>> {
    let degree = spec.resolve(view)?;
    let values = view.vertex_property(scalar)?;
    Ok(vertex_pass(view, |vertex, hist| {
        hist.increment([degree.value(vertex), values.get(vertex).unwrap_or(0.0)]);
    }))
}

/// Mean neighbour degree grouped by the vertex's own degree.
///
/// For each non-excluded vertex with at least one non-excluded out-neighbour,
/// the mean of `neighbour(w)` over those neighbours is recorded under
/// `origin(v)`. Parallel edges count once per edge. Vertices without eligible
/// neighbours contribute nothing.
///
/// # Errors
/// Returns [`crate::GraphError::UnknownProperty`] when either selector names
/// an unregistered vertex property.
#[instrument(
    name = "stats.average_nearest_neighbor_degree",
    err,
    skip_all,
    fields(vertices = view.vertex_count(), origin = %origin, neighbour = %neighbour)
)]
pub fn average_nearest_neighbor_degree(
    view: &GraphView<'_>,
    origin: &DegreeSpec,
    neighbour: &DegreeSpec,
) -> Result<AverageCorrelation> {
    let origin = origin.resolve(view)?;
    let neighbour = neighbour.resolve(view)?;
    let means = per_vertex(view, |vertex| {
        let (sum, count) = view
            .out_neighbors(vertex)
            .fold((0.0, 0_usize), |(sum, count), target| {
                (sum + neighbour.value(target), count + 1)
            });
        (count > 0).then(|| sum / count as f64)
    });

    let mut table = AverageCorrelation::new();
    for (vertex, mean) in means {
        if let Some(mean) = mean {
            table.push(origin.value(vertex), mean);
        }
    }
    debug!(keys = table.len(), "average nearest-neighbour degree ready");
    Ok(table)
}

#[derive(Clone, Copy)]
struct AssortativitySums {
    edges: usize,
    degree: f64,
    degree_sq: f64,
    product: f64,
    min: f64,
    max: f64,
}

impl Default for AssortativitySums {
    fn default() -> Self {
        Self {
            edges: 0,
            degree: 0.0,
            degree_sq: 0.0,
            product: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl AssortativitySums {
    fn record(&mut self, source: f64, target: f64) {
        self.edges += 1;
        self.degree += source + target;
        self.degree_sq += source * source + target * target;
        self.product += source * target;
        self.min = self.min.min(source).min(target);
        self.max = self.max.max(source).max(target);
    }

    fn combine(mut self, other: Self) -> Self {
        self.edges += other.edges;
        self.degree += other.degree;
        self.degree_sq += other.degree_sq;
        self.product += other.product;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self
    }

    /// Every endpoint carries the same value. The variance alone misses this
    /// for fractional values, where rounding leaves it just above zero.
    fn is_constant(&self) -> bool {
        self.min == self.max
    }
}

/// Pearson correlation of the selected degree across edge endpoints.
///
/// With `m` non-excluded edges and sums over both endpoints of every edge,
/// `a = Σd / 2m` and `r = (Σ d(u)·d(v) / m − a²) / (Σd² / 2m − a²)`. A view
/// without edges, or one where every endpoint has the same degree, yields
/// NaN.
///
/// # Errors
/// Returns [`crate::GraphError::UnknownProperty`] when `spec` names an
/// unregistered vertex property.
#[instrument(
    name = "stats.assortativity_coefficient",
    err,
    skip_all,
    fields(edges = view.edge_count(), degree = %spec)
)]
pub fn assortativity_coefficient(view: &GraphView<'_>, spec: &DegreeSpec) -> Result<f64> {
    let degree = spec.resolve(view)?;
    let partials = per_vertex(view, |source| {
        let own = degree.value(source);
        let mut sums = AssortativitySums::default();
        for target in view.out_neighbors(source) {
            sums.record(own, degree.value(target));
        }
        sums
    });
    let sums = partials
        .into_iter()
        .map(|(_, sums)| sums)
        .fold(AssortativitySums::default(), AssortativitySums::combine);

    if sums.edges == 0 || sums.is_constant() {
        return Ok(f64::NAN);
    }
    let edges = sums.edges as f64;
    let mean = sums.degree / (2.0 * edges);
    let variance = sums.degree_sq / (2.0 * edges) - mean * mean;
    let covariance = sums.product / edges - mean * mean;
    let r = covariance / variance;
    Ok(if variance <= 0.0 || !r.is_finite() {
        f64::NAN
    } else {
        r
    })
}
