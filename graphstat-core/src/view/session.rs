//! Owned graph plus the filter state every statistic is computed under.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    graph::{EntityKind, Graph},
    stats::local_clustering_coefficients,
};

use super::{EdgePredicate, FilterSpec, GraphView, VertexPredicate};

/// A [`Graph`] paired with a mutable [`FilterSpec`].
///
/// The session is the long-lived handle an embedding application holds:
/// filters are toggled between queries and each query borrows a fresh
/// [`GraphView`] through [`FilteredGraph::view`].
///
/// # Examples
/// ```
/// use graphstat_core::{FilteredGraph, Graph};
///
/// let mut session = FilteredGraph::new(Graph::from_edges(3, &[(0, 1), (1, 2)])?);
/// session.graph_mut().insert_vertex_index_property("id");
/// session.set_vertex_filter_property(Some("id"));
/// session.set_vertex_filter_range(0.0, 1.0);
/// assert!(session.is_vertex_filter_active());
/// assert_eq!(session.view().edge_count(), 1);
/// # Ok::<(), graphstat_core::GraphError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct FilteredGraph {
    graph: Graph,
    filter: FilterSpec,
}

impl FilteredGraph {
    /// Wraps `graph` with a directed, unfiltered specification.
    #[must_use]
    pub fn new(graph: Graph) -> Self {
        Self::with_filter(graph, FilterSpec::default())
    }

    /// Wraps `graph` with an explicit specification.
    #[must_use]
    pub fn with_filter(graph: Graph, filter: FilterSpec) -> Self {
        Self { graph, filter }
    }

    /// Returns the owned store.
    #[must_use]
    #[rustfmt::skip]
    pub fn graph(&self) -> &Graph { &self.graph }

    /// Mutable access to the store. Filters naming properties removed through
    /// this handle degrade to inactive on the next [`Self::view`].
    #[rustfmt::skip]
    pub fn graph_mut(&mut self) -> &mut Graph { &mut self.graph }

    /// Returns the current filter state.
    #[must_use]
    #[rustfmt::skip]
    pub fn filter(&self) -> &FilterSpec { &self.filter }

    /// Mutable access to the filter state.
    #[rustfmt::skip]
    pub fn filter_mut(&mut self) -> &mut FilterSpec { &mut self.filter }

    /// Consumes the session and returns the store.
    #[must_use]
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Borrows a view under the current filter state.
    #[must_use]
    pub fn view(&self) -> GraphView<'_> {
        GraphView::new(&self.graph, &self.filter)
    }

    /// Treats edges as directed, or as undirected when `false`.
    pub fn set_directed(&mut self, directed: bool) {
        self.filter.set_directed(directed);
    }

    /// Returns whether edges keep their direction.
    #[must_use]
    pub fn is_directed(&self) -> bool {
        self.filter.is_directed()
    }

    /// Reads every edge backwards when `true`.
    pub fn set_reversed(&mut self, reversed: bool) {
        self.filter.set_reversed(reversed);
    }

    /// Returns whether edge direction is read backwards.
    #[must_use]
    pub fn is_reversed(&self) -> bool {
        self.filter.is_reversed()
    }

    /// Selects the vertex property used for range filtering, or clears it.
    ///
    /// Naming a property that is not registered leaves the filter inactive.
    pub fn set_vertex_filter_property(&mut self, name: Option<&str>) {
        self.warn_if_unregistered(EntityKind::Vertex, name);
        self.filter.set_vertex_property(name);
    }

    /// Sets the inclusive range for the vertex filtering property.
    pub fn set_vertex_filter_range(&mut self, low: f64, high: f64) {
        self.filter.set_vertex_range(low, high);
    }

    /// Installs or clears a caller-supplied vertex predicate.
    pub fn set_generic_vertex_filter(&mut self, predicate: Option<Arc<dyn VertexPredicate>>) {
        self.filter.set_vertex_predicate(predicate);
    }

    /// Selects the edge property used for range filtering, or clears it.
    pub fn set_edge_filter_property(&mut self, name: Option<&str>) {
        self.warn_if_unregistered(EntityKind::Edge, name);
        self.filter.set_edge_property(name);
    }

    /// Sets the inclusive range for the edge filtering property.
    pub fn set_edge_filter_range(&mut self, low: f64, high: f64) {
        self.filter.set_edge_range(low, high);
    }

    /// Installs or clears a caller-supplied edge predicate.
    pub fn set_generic_edge_filter(&mut self, predicate: Option<Arc<dyn EdgePredicate>>) {
        self.filter.set_edge_predicate(predicate);
    }

    /// Returns whether vertices are currently being filtered: a predicate is
    /// installed or the filtering property is registered.
    #[must_use]
    pub fn is_vertex_filter_active(&self) -> bool {
        let filter = self.filter.vertex_filter();
        filter.predicate().is_some()
            || filter
                .property()
                .is_some_and(|name| self.graph.properties().contains(EntityKind::Vertex, name))
    }

    /// Returns whether edges are currently being filtered.
    #[must_use]
    pub fn is_edge_filter_active(&self) -> bool {
        let filter = self.filter.edge_filter();
        filter.predicate().is_some()
            || filter
                .property()
                .is_some_and(|name| self.graph.properties().contains(EntityKind::Edge, name))
    }

    /// Removes a vertex property, clearing the vertex filter's property if it
    /// named `name`. Returns whether the property existed.
    pub fn remove_vertex_property(&mut self, name: &str) -> bool {
        if self.filter.vertex_filter().property() == Some(name) {
            info!(property = name, "vertex filter property removed; clearing filter");
            self.filter.set_vertex_property(None);
        }
        self.graph.remove_vertex_property(name)
    }

    /// Removes an edge property, clearing the edge filter's property if it
    /// named `name`. Returns whether the property existed.
    pub fn remove_edge_property(&mut self, name: &str) -> bool {
        if self.filter.edge_filter().property() == Some(name) {
            info!(property = name, "edge filter property removed; clearing filter");
            self.filter.set_edge_property(None);
        }
        self.graph.remove_edge_property(name)
    }

    /// Computes every vertex's local clustering coefficient under the current
    /// filters and stores it as the vertex property `name`. Excluded vertices
    /// receive `0.0`.
    #[instrument(name = "stats.local_clustering_property", skip(self), fields(property = name))]
    pub fn set_local_clustering_to_property(&mut self, name: &str) {
        let values = local_clustering_coefficients(&self.view());
        self.graph.insert_vertex_property(name, values);
    }

    fn warn_if_unregistered(&self, kind: EntityKind, name: Option<&str>) {
        if let Some(name) = name
            && !self.graph.properties().contains(kind, name)
        {
            warn!(kind = %kind, property = name, "filter names an unregistered property");
        }
    }
}
