//! Filter specification: property ranges, generic predicates and direction
//! flags that restrict what a [`crate::GraphView`] exposes.

use std::{fmt, sync::Arc};

use crate::graph::{EdgeRef, Graph};

/// Caller-supplied vertex inclusion test.
///
/// Implementations must be pure functions of the vertex's current state; the
/// view evaluates each predicate once per vertex when it is built.
pub trait VertexPredicate: Send + Sync {
    /// Returns `true` when `vertex` belongs to the view.
    fn include(&self, graph: &Graph, vertex: usize) -> bool;
}

impl<F> VertexPredicate for F
where
    F: Fn(&Graph, usize) -> bool + Send + Sync,
{
    fn include(&self, graph: &Graph, vertex: usize) -> bool {
        self(graph, vertex)
    }
}

/// Caller-supplied edge inclusion test.
///
/// Implementations must be pure functions of the edge's current state.
pub trait EdgePredicate: Send + Sync {
    /// Returns `true` when `edge` belongs to the view.
    fn include(&self, graph: &Graph, edge: EdgeRef) -> bool;
}

impl<F> EdgePredicate for F
where
    F: Fn(&Graph, EdgeRef) -> bool + Send + Sync,
{
    fn include(&self, graph: &Graph, edge: EdgeRef) -> bool {
        self(graph, edge)
    }
}

/// Inclusion rule for one entity kind.
///
/// The filter is active when a property name or a predicate is set. Values of
/// the named property must lie in the inclusive `range`; the predicate, when
/// present, must also accept the entity.
pub struct EntityFilter<P: ?Sized> {
    property: Option<String>,
    range: (f64, f64),
    predicate: Option<Arc<P>>,
}

impl<P: ?Sized> Default for EntityFilter<P> {
    fn default() -> Self {
        Self {
            property: None,
            range: (f64::NEG_INFINITY, f64::INFINITY),
            predicate: None,
        }
    }
}

impl<P: ?Sized> Clone for EntityFilter<P> {
    fn clone(&self) -> Self {
        Self {
            property: self.property.clone(),
            range: self.range,
            predicate: self.predicate.clone(),
        }
    }
}

impl<P: ?Sized> EntityFilter<P> {
    /// Returns the name of the filtering property, if any.
    #[must_use]
    pub fn property(&self) -> Option<&str> {
        self.property.as_deref()
    }

    /// Returns the inclusive range accepted for the filtering property.
    #[must_use]
    #[rustfmt::skip]
    pub fn range(&self) -> (f64, f64) { self.range }

    /// Returns the generic predicate, if any.
    #[must_use]
    pub fn predicate(&self) -> Option<&Arc<P>> {
        self.predicate.as_ref()
    }

    /// Returns whether a property name or predicate is configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.property.is_some() || self.predicate.is_some()
    }

    pub(crate) fn in_range(&self, value: f64) -> bool {
        let (low, high) = self.range;
        value >= low && value <= high
    }

    fn set_property(&mut self, name: Option<String>) {
        self.property = name;
    }

    fn set_range(&mut self, low: f64, high: f64) {
        self.range = (low, high);
    }

    fn set_predicate(&mut self, predicate: Option<Arc<P>>) {
        self.predicate = predicate;
    }
}

impl<P: ?Sized> fmt::Debug for EntityFilter<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityFilter")
            .field("property", &self.property)
            .field("range", &self.range)
            .field("predicate", &self.predicate.is_some())
            .finish()
    }
}

/// Restrictions applied to a graph before any statistic reads it.
///
/// # Examples
/// ```
/// use graphstat_core::FilterSpec;
///
/// let spec = FilterSpec::new()
///     .with_vertex_property("weight", 0.0, 1.0)
///     .with_reversed(true);
/// assert_eq!(spec.vertex_filter().property(), Some("weight"));
/// assert!(spec.is_directed());
/// assert!(spec.is_reversed());
/// ```
#[derive(Clone, Debug)]
pub struct FilterSpec {
    directed: bool,
    reversed: bool,
    vertex: EntityFilter<dyn VertexPredicate>,
    edge: EntityFilter<dyn EdgePredicate>,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            directed: true,
            reversed: false,
            vertex: EntityFilter::default(),
            edge: EntityFilter::default(),
        }
    }
}

impl FilterSpec {
    /// Creates a directed, unreversed, unfiltered specification.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether edges keep their direction.
    #[must_use]
    pub fn with_directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    /// Sets whether edge direction is read backwards.
    #[must_use]
    pub fn with_reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    /// Keeps only vertices whose `name` property lies in `[low, high]`.
    #[must_use]
    pub fn with_vertex_property(mut self, name: &str, low: f64, high: f64) -> Self {
        self.set_vertex_property(Some(name));
        self.set_vertex_range(low, high);
        self
    }

    /// Keeps only edges whose `name` property lies in `[low, high]`.
    #[must_use]
    pub fn with_edge_property(mut self, name: &str, low: f64, high: f64) -> Self {
        self.set_edge_property(Some(name));
        self.set_edge_range(low, high);
        self
    }

    /// Keeps only vertices accepted by `predicate`.
    #[must_use]
    pub fn with_vertex_predicate(mut self, predicate: impl VertexPredicate + 'static) -> Self {
        self.set_vertex_predicate(Some(Arc::new(predicate)));
        self
    }

    /// Keeps only edges accepted by `predicate`.
    #[must_use]
    pub fn with_edge_predicate(mut self, predicate: impl EdgePredicate + 'static) -> Self {
        self.set_edge_predicate(Some(Arc::new(predicate)));
        self
    }

    /// Returns whether edges keep their direction.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_directed(&self) -> bool { self.directed }

    /// Returns whether edge direction is read backwards.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_reversed(&self) -> bool { self.reversed }

    /// Returns the vertex inclusion rule.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertex_filter(&self) -> &EntityFilter<dyn VertexPredicate> { &self.vertex }

    /// Returns the edge inclusion rule.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_filter(&self) -> &EntityFilter<dyn EdgePredicate> { &self.edge }

    /// Sets whether edges keep their direction.
    pub fn set_directed(&mut self, directed: bool) {
        self.directed = directed;
    }

    /// Sets whether edge direction is read backwards.
    pub fn set_reversed(&mut self, reversed: bool) {
        self.reversed = reversed;
    }

    /// Sets or clears the vertex filtering property.
    pub fn set_vertex_property(&mut self, name: Option<&str>) {
        self.vertex.set_property(name.map(str::to_owned));
    }

    /// Sets the inclusive range for the vertex filtering property.
    pub fn set_vertex_range(&mut self, low: f64, high: f64) {
        self.vertex.set_range(low, high);
    }

    /// Sets or clears the generic vertex predicate.
    pub fn set_vertex_predicate(&mut self, predicate: Option<Arc<dyn VertexPredicate>>) {
        self.vertex.set_predicate(predicate);
    }

    /// Sets or clears the edge filtering property.
    pub fn set_edge_property(&mut self, name: Option<&str>) {
        self.edge.set_property(name.map(str::to_owned));
    }

    /// Sets the inclusive range for the edge filtering property.
    pub fn set_edge_range(&mut self, low: f64, high: f64) {
        self.edge.set_range(low, high);
    }

    /// Sets or clears the generic edge predicate.
    pub fn set_edge_predicate(&mut self, predicate: Option<Arc<dyn EdgePredicate>>) {
        self.edge.set_predicate(predicate);
    }
}
