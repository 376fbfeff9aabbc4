//! Filtered, optionally undirected or reversed view over a [`Graph`].
//!
//! Every statistic reads the graph through a [`GraphView`], never through the
//! store directly. The view resolves the [`FilterSpec`] once, when it is
//! built, into vertex and edge inclusion masks; traversal then skips excluded
//! vertices, excluded edges, and every edge touching an excluded vertex.
//!
//! A filter naming a property that is not registered is treated as absent.
//! This keeps every downstream query total: the view logs a warning and
//! exposes the unfiltered entities instead of failing.

mod filter;
mod session;

use rayon::prelude::*;
use tracing::{debug, instrument, warn};

use crate::{
    error::Result,
    graph::{EdgeRef, EntityKind, Graph, ScalarMap},
};

pub use self::{
    filter::{EdgePredicate, EntityFilter, FilterSpec, VertexPredicate},
    session::FilteredGraph,
};

/// Read-only view of a graph restricted by a [`FilterSpec`].
///
/// # Examples
/// ```
/// use graphstat_core::{FilterSpec, Graph, GraphView};
///
/// let graph = Graph::from_edges(3, &[(0, 1), (1, 2)])?;
/// let spec = FilterSpec::new().with_vertex_predicate(|_: &Graph, v: usize| v != 2);
/// let view = GraphView::new(&graph, &spec);
/// assert_eq!(view.vertex_count(), 2);
/// assert_eq!(view.edge_count(), 1);
/// assert_eq!(view.out_degree(1), 0);
/// # Ok::<(), graphstat_core::GraphError>(())
/// ```
#[derive(Clone, Debug)]
pub struct GraphView<'g> {
    graph: &'g Graph,
    directed: bool,
    reversed: bool,
    vertex_mask: Option<Vec<bool>>,
    edge_mask: Option<Vec<bool>>,
    vertex_count: usize,
    edge_count: usize,
}

impl<'g> GraphView<'g> {
    /// Builds a view of `graph` restricted by `spec`.
    #[instrument(
        name = "view.build",
        skip_all,
        fields(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            directed = spec.is_directed(),
            reversed = spec.is_reversed()
        )
    )]
    pub fn new(graph: &'g Graph, spec: &FilterSpec) -> Self {
        let vertex_mask = build_vertex_mask(graph, spec.vertex_filter());
        let edge_mask = build_edge_mask(graph, spec.edge_filter(), vertex_mask.as_deref());
        let vertex_count = count_included(vertex_mask.as_deref(), graph.vertex_count());
        let edge_count = count_included(edge_mask.as_deref(), graph.edge_count());
        debug!(
            included_vertices = vertex_count,
            included_edges = edge_count,
            "view ready"
        );
        Self {
            graph,
            directed: spec.is_directed(),
            reversed: spec.is_reversed(),
            vertex_mask,
            edge_mask,
            vertex_count,
            edge_count,
        }
    }

    /// Builds a directed view with no filtering.
    #[must_use]
    pub fn unfiltered(graph: &'g Graph) -> Self {
        Self::new(graph, &FilterSpec::default())
    }

    /// Returns the underlying store.
    #[must_use]
    #[rustfmt::skip]
    pub fn graph(&self) -> &'g Graph { self.graph }

    /// Returns whether edges keep their direction.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_directed(&self) -> bool { self.directed }

    /// Returns whether edge direction is read backwards.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_reversed(&self) -> bool { self.reversed }

    /// Returns whether a usable vertex filter is in effect.
    #[must_use]
    pub fn is_vertex_filter_active(&self) -> bool {
        self.vertex_mask.is_some()
    }

    /// Returns whether any edge is hidden by a filter.
    #[must_use]
    pub fn is_edge_filter_active(&self) -> bool {
        self.edge_mask.is_some()
    }

    /// Number of non-excluded vertices.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertex_count(&self) -> usize { self.vertex_count }

    /// Number of non-excluded edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_count(&self) -> usize { self.edge_count }

    /// Returns whether `vertex` exists and is not excluded.
    #[must_use]
    pub fn contains_vertex(&self, vertex: usize) -> bool {
        vertex < self.graph.vertex_count() && mask_allows(self.vertex_mask.as_deref(), vertex)
    }

    /// Returns whether `edge` exists and is not excluded.
    #[must_use]
    pub fn contains_edge(&self, edge: usize) -> bool {
        edge < self.graph.edge_count() && mask_allows(self.edge_mask.as_deref(), edge)
    }

    /// Iterates over non-excluded vertices in index order.
    pub fn vertices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.graph.vertex_count()).filter(move |&vertex| self.contains_vertex(vertex))
    }

    /// Iterates over non-excluded edges in index order, oriented as the view
    /// reads them.
    pub fn edges(&self) -> impl Iterator<Item = EdgeRef> + '_ {
        self.graph
            .edges()
            .filter(move |edge| mask_allows(self.edge_mask.as_deref(), edge.index))
            .map(move |edge| self.orient(edge))
    }

    /// Iterates over edges leaving `vertex`, each oriented with
    /// `source == vertex`. In an undirected view every incident edge leaves
    /// the vertex, and a self-loop is listed twice.
    pub fn out_edges(&self, vertex: usize) -> impl Iterator<Item = EdgeRef> + '_ {
        let (kept, flipped) = self.out_lists(vertex);
        self.oriented(kept, false).chain(self.oriented(flipped, true))
    }

    /// Iterates over edges entering `vertex`, each oriented with
    /// `target == vertex`.
    pub fn in_edges(&self, vertex: usize) -> impl Iterator<Item = EdgeRef> + '_ {
        let (kept, flipped) = self.in_lists(vertex);
        self.oriented(kept, false).chain(self.oriented(flipped, true))
    }

    /// Iterates over the targets of [`Self::out_edges`].
    pub fn out_neighbors(&self, vertex: usize) -> impl Iterator<Item = usize> + '_ {
        self.out_edges(vertex).map(|edge| edge.target)
    }

    /// Iterates over the sources of [`Self::in_edges`].
    pub fn in_neighbors(&self, vertex: usize) -> impl Iterator<Item = usize> + '_ {
        self.in_edges(vertex).map(|edge| edge.source)
    }

    /// Iterates over every neighbour regardless of direction. Directed views
    /// list out-neighbours first, then in-neighbours.
    pub fn all_neighbors(&self, vertex: usize) -> impl Iterator<Item = usize> + '_ {
        let out = self.graph.out_edges(vertex);
        let incoming = self.graph.in_edges(vertex);
        self.oriented_from(out, vertex)
            .chain(self.oriented_from(incoming, vertex))
    }

    /// Number of non-excluded edges leaving `vertex`.
    #[must_use]
    pub fn out_degree(&self, vertex: usize) -> usize {
        let (kept, flipped) = self.out_lists(vertex);
        self.count_live(kept) + self.count_live(flipped)
    }

    /// Number of non-excluded edges entering `vertex`.
    #[must_use]
    pub fn in_degree(&self, vertex: usize) -> usize {
        let (kept, flipped) = self.in_lists(vertex);
        self.count_live(kept) + self.count_live(flipped)
    }

    /// Number of non-excluded incident edges. Directed views add in- and
    /// out-degree; undirected views count each incident edge once per
    /// endpoint, matching [`Self::out_degree`].
    #[must_use]
    pub fn total_degree(&self, vertex: usize) -> usize {
        if self.directed {
            self.in_degree(vertex) + self.out_degree(vertex)
        } else {
            self.out_degree(vertex)
        }
    }

    /// Looks up a vertex property through the view's store.
    ///
    /// # Errors
    /// Returns [`crate::GraphError::UnknownProperty`] when no such map exists.
    pub fn vertex_property(&self, name: &str) -> Result<&'g ScalarMap> {
        self.graph.property(EntityKind::Vertex, name)
    }

    /// Looks up an edge property through the view's store.
    ///
    /// # Errors
    /// Returns [`crate::GraphError::UnknownProperty`] when no such map exists.
    pub fn edge_property(&self, name: &str) -> Result<&'g ScalarMap> {
        self.graph.property(EntityKind::Edge, name)
    }

    /// Stored edge lists whose entries leave `vertex` as read by the view: the
    /// first keeps stored orientation, the second is read backwards.
    fn out_lists(&self, vertex: usize) -> (&'g [usize], &'g [usize]) {
        let out = self.graph.out_edges(vertex);
        let incoming = self.graph.in_edges(vertex);
        match (self.directed, self.reversed) {
            (false, _) => (out, incoming),
            (true, false) => (out, &[]),
            (true, true) => (&[], incoming),
        }
    }

    fn in_lists(&self, vertex: usize) -> (&'g [usize], &'g [usize]) {
        let out = self.graph.out_edges(vertex);
        let incoming = self.graph.in_edges(vertex);
        match (self.directed, self.reversed) {
            (false, _) => (incoming, out),
            (true, false) => (incoming, &[]),
            (true, true) => (&[], out),
        }
    }

    fn oriented(&self, edges: &'g [usize], flip: bool) -> impl Iterator<Item = EdgeRef> + '_ {
        edges
            .iter()
            .filter(move |&&edge| mask_allows(self.edge_mask.as_deref(), edge))
            .filter_map(move |&edge| self.graph.edge(edge))
            .map(move |edge| if flip { flip_edge(edge) } else { edge })
    }

    fn oriented_from(&self, edges: &'g [usize], vertex: usize) -> impl Iterator<Item = usize> + '_ {
        self.oriented(edges, false).map(move |edge| {
            if edge.source == vertex {
                edge.target
            } else {
                edge.source
            }
        })
    }

    fn orient(&self, edge: EdgeRef) -> EdgeRef {
        if self.reversed {
            flip_edge(edge)
        } else {
            edge
        }
    }

    fn count_live(&self, edges: &[usize]) -> usize {
        match self.edge_mask.as_deref() {
            None => edges.len(),
            Some(mask) => edges
                .iter()
                .filter(|&&edge| mask.get(edge).copied().unwrap_or(false))
                .count(),
        }
    }
}

fn flip_edge(edge: EdgeRef) -> EdgeRef {
    EdgeRef {
        index: edge.index,
        source: edge.target,
        target: edge.source,
    }
}

fn mask_allows(mask: Option<&[bool]>, index: usize) -> bool {
    mask.is_none_or(|mask| mask.get(index).copied().unwrap_or(false))
}

fn count_included(mask: Option<&[bool]>, total: usize) -> usize {
    mask.map_or(total, |mask| mask.iter().filter(|&&kept| kept).count())
}

/// Resolves the property part of a filter, degrading to `None` when the
/// property is not registered.
fn resolve_filter_property<'g, P: ?Sized>(
    graph: &'g Graph,
    kind: EntityKind,
    filter: &EntityFilter<P>,
) -> Option<&'g ScalarMap> {
    let name = filter.property()?;
    match graph.property(kind, name) {
        Ok(map) => Some(map),
        Err(error) => {
            warn!(
                kind = %kind,
                property = name,
                %error,
                "filter property is not registered; property filter disabled"
            );
            None
        }
    }
}

fn build_vertex_mask(graph: &Graph, filter: &EntityFilter<dyn VertexPredicate>) -> Option<Vec<bool>> {
    let values = resolve_filter_property(graph, EntityKind::Vertex, filter);
    let predicate = filter.predicate();
    if values.is_none() && predicate.is_none() {
        return None;
    }

    let mask = (0..graph.vertex_count())
        .into_par_iter()
        .map(|vertex| {
            let in_range = values
                .is_none_or(|map| map.get(vertex).is_some_and(|value| filter.in_range(value)));
            in_range && predicate.is_none_or(|predicate| predicate.include(graph, vertex))
        })
        .collect();
    Some(mask)
}

fn build_edge_mask(
    graph: &Graph,
    filter: &EntityFilter<dyn EdgePredicate>,
    vertex_mask: Option<&[bool]>,
) -> Option<Vec<bool>> {
    let values = resolve_filter_property(graph, EntityKind::Edge, filter);
    let predicate = filter.predicate();
    if values.is_none() && predicate.is_none() && vertex_mask.is_none() {
        return None;
    }

    let edges: Vec<EdgeRef> = graph.edges().collect();
    let mask = edges
        .par_iter()
        .map(|&edge| {
            let endpoints_kept =
                mask_allows(vertex_mask, edge.source) && mask_allows(vertex_mask, edge.target);
            let in_range = values
                .is_none_or(|map| map.get(edge.index).is_some_and(|value| filter.in_range(value)));
            endpoints_kept
                && in_range
                && predicate.is_none_or(|predicate| predicate.include(graph, edge))
        })
        .collect();
    Some(mask)
}

#[cfg(test)]
mod tests;
