//! Directed multigraph store with dense, reusable vertex and edge indices.
//!
//! Vertices and edges are addressed by `usize` indices that always form the
//! contiguous range `0..count`. Removing an entity moves the last entity of the
//! same kind into the freed slot, so exactly one other index changes per
//! removal. Scalar property maps registered on the graph follow the same moves.

mod properties;

use std::{collections::HashSet, ops::Range};

use tracing::debug;

use crate::error::{GraphError, Result};

pub use self::properties::{EntityKind, PropertyRegistry, ScalarMap};

/// A borrowed description of one stored edge.
///
/// # Examples
/// ```
/// use graphstat_core::Graph;
///
/// let mut graph = Graph::new();
/// let a = graph.add_vertex();
/// let b = graph.add_vertex();
/// let edge = graph.add_edge(a, b)?;
/// let view = graph.edge(edge).expect("edge exists");
/// assert_eq!((view.source, view.target), (a, b));
/// # Ok::<(), graphstat_core::GraphError>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct EdgeRef {
    /// Index of the edge.
    pub index: usize,
    /// Vertex the edge leaves.
    pub source: usize,
    /// Vertex the edge enters.
    pub target: usize,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct EdgeRecord {
    source: usize,
    target: usize,
}

/// Directed multigraph with self-loops, parallel edges and scalar properties.
///
/// # Examples
/// ```
/// use graphstat_core::Graph;
///
/// let graph = Graph::from_edges(3, &[(0, 1), (1, 2), (1, 2)])?;
/// assert_eq!(graph.vertex_count(), 3);
/// assert_eq!(graph.edge_count(), 3);
/// assert_eq!(graph.out_degree(1), 2);
/// # Ok::<(), graphstat_core::GraphError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Graph {
    edges: Vec<EdgeRecord>,
    out_adjacency: Vec<Vec<usize>>,
    in_adjacency: Vec<Vec<usize>>,
    properties: PropertyRegistry,
}

impl Graph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with room for the given number of entities.
    #[must_use]
    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            edges: Vec::with_capacity(edges),
            out_adjacency: Vec::with_capacity(vertices),
            in_adjacency: Vec::with_capacity(vertices),
            properties: PropertyRegistry::default(),
        }
    }

    /// Builds a graph with `vertex_count` vertices and the listed edges, in
    /// order, so the `i`-th pair receives edge index `i`.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexOutOfBounds`] when a pair names a vertex
    /// `>= vertex_count`.
    pub fn from_edges(vertex_count: usize, edges: &[(usize, usize)]) -> Result<Self> {
        let mut graph = Self::with_capacity(vertex_count, edges.len());
        graph.add_vertices(vertex_count);
        for &(source, target) in edges {
            graph.add_edge(source, target)?;
        }
        Ok(graph)
    }

    /// Returns the number of vertices.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertex_count(&self) -> usize { self.out_adjacency.len() }

    /// Returns the number of edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_count(&self) -> usize { self.edges.len() }

    /// Returns whether the graph has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.out_adjacency.is_empty()
    }

    /// Appends a vertex and returns its index.
    pub fn add_vertex(&mut self) -> usize {
        let index = self.vertex_count();
        self.out_adjacency.push(Vec::new());
        self.in_adjacency.push(Vec::new());
        self.properties
            .resize_kind(EntityKind::Vertex, self.vertex_count());
        index
    }

    /// Appends `count` vertices and returns their index range.
    pub fn add_vertices(&mut self, count: usize) -> Range<usize> {
        let start = self.vertex_count();
        let end = start.saturating_add(count);
        self.out_adjacency.resize_with(end, Vec::new);
        self.in_adjacency.resize_with(end, Vec::new);
        self.properties.resize_kind(EntityKind::Vertex, end);
        start..end
    }

    /// Appends an edge `source → target` and returns its index.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexOutOfBounds`] when either endpoint is not a
    /// vertex of the graph.
    pub fn add_edge(&mut self, source: usize, target: usize) -> Result<usize> {
        self.check_vertex(source)?;
        self.check_vertex(target)?;
        let index = self.edges.len();
        self.edges.push(EdgeRecord { source, target });
        self.out_adjacency[source].push(index);
        self.in_adjacency[target].push(index);
        self.properties
            .resize_kind(EntityKind::Edge, self.edges.len());
        Ok(index)
    }

    /// Returns the edge stored at `index`.
    #[must_use]
    pub fn edge(&self, index: usize) -> Option<EdgeRef> {
        self.edges.get(index).map(|record| EdgeRef {
            index,
            source: record.source,
            target: record.target,
        })
    }

    /// Returns the `(source, target)` pair of an edge.
    ///
    /// # Errors
    /// Returns [`GraphError::EdgeOutOfBounds`] for an unknown edge.
    pub fn endpoints(&self, index: usize) -> Result<(usize, usize)> {
        self.edge(index)
            .map(|edge| (edge.source, edge.target))
            .ok_or(GraphError::EdgeOutOfBounds {
                edge: index,
                edge_count: self.edges.len(),
            })
    }

    /// Iterates over every stored edge in index order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeRef> + '_ {
        self.edges
            .iter()
            .enumerate()
            .map(|(index, record)| EdgeRef {
                index,
                source: record.source,
                target: record.target,
            })
    }

    /// Returns the indices of edges leaving `vertex`, in insertion order.
    ///
    /// Unknown vertices have no edges.
    #[must_use]
    pub fn out_edges(&self, vertex: usize) -> &[usize] {
        self.out_adjacency.get(vertex).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the indices of edges entering `vertex`, in insertion order.
    ///
    /// Unknown vertices have no edges.
    #[must_use]
    pub fn in_edges(&self, vertex: usize) -> &[usize] {
        self.in_adjacency.get(vertex).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of edges leaving `vertex`.
    #[must_use]
    pub fn out_degree(&self, vertex: usize) -> usize {
        self.out_edges(vertex).len()
    }

    /// Number of edges entering `vertex`.
    #[must_use]
    pub fn in_degree(&self, vertex: usize) -> usize {
        self.in_edges(vertex).len()
    }

    /// Removes an edge. The last edge takes over the freed index.
    ///
    /// # Errors
    /// Returns [`GraphError::EdgeOutOfBounds`] for an unknown edge.
    pub fn remove_edge(&mut self, index: usize) -> Result<()> {
        let (source, target) = self.endpoints(index)?;
        detach(&mut self.out_adjacency[source], index);
        detach(&mut self.in_adjacency[target], index);

        let last = self.edges.len() - 1;
        self.edges.swap_remove(index);
        self.properties.swap_remove_kind(EntityKind::Edge, index);
        if index != last {
            let moved = self.edges[index];
            relabel(&mut self.out_adjacency[moved.source], last, index);
            relabel(&mut self.in_adjacency[moved.target], last, index);
        }
        Ok(())
    }

    /// Removes a vertex together with every incident edge. The last vertex
    /// takes over the freed index.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexOutOfBounds`] for an unknown vertex.
    pub fn remove_vertex(&mut self, vertex: usize) -> Result<()> {
        self.check_vertex(vertex)?;
        while let Some(&edge) = self.out_adjacency[vertex].last() {
            self.remove_edge(edge)?;
        }
        while let Some(&edge) = self.in_adjacency[vertex].last() {
            self.remove_edge(edge)?;
        }

        let last = self.vertex_count() - 1;
        self.out_adjacency.swap_remove(vertex);
        self.in_adjacency.swap_remove(vertex);
        self.properties.swap_remove_kind(EntityKind::Vertex, vertex);
        if vertex != last {
            for &edge in &self.out_adjacency[vertex] {
                self.edges[edge].source = vertex;
            }
            for &edge in &self.in_adjacency[vertex] {
                self.edges[edge].target = vertex;
            }
        }
        Ok(())
    }

    /// Removes every edge, keeping vertices and vertex properties.
    pub fn clear_edges(&mut self) {
        self.edges.clear();
        self.out_adjacency.iter_mut().for_each(Vec::clear);
        self.in_adjacency.iter_mut().for_each(Vec::clear);
        self.properties.resize_kind(EntityKind::Edge, 0);
    }

    /// Removes parallel edges, keeping the lowest-indexed edge of every ordered
    /// `(source, target)` pair. Returns the number of removed edges.
    pub fn remove_parallel_edges(&mut self) -> usize {
        let mut seen = HashSet::with_capacity(self.edges.len());
        let duplicates: Vec<usize> = self
            .edges()
            .filter(|edge| !seen.insert((edge.source, edge.target)))
            .map(|edge| edge.index)
            .collect();

        // Descending order keeps the pending indices valid across swap-removes.
        for &edge in duplicates.iter().rev() {
            if let Err(error) = self.remove_edge(edge) {
                debug!(%error, edge, "parallel edge already gone");
            }
        }
        duplicates.len()
    }

    /// Returns the scalar property registry.
    #[must_use]
    #[rustfmt::skip]
    pub fn properties(&self) -> &PropertyRegistry { &self.properties }

    /// Looks up a vertex property by name.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownProperty`] when no such map exists.
    pub fn vertex_property(&self, name: &str) -> Result<&ScalarMap> {
        self.property(EntityKind::Vertex, name)
    }

    /// Looks up an edge property by name.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownProperty`] when no such map exists.
    pub fn edge_property(&self, name: &str) -> Result<&ScalarMap> {
        self.property(EntityKind::Edge, name)
    }

    /// Looks up a property of either kind by name.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownProperty`] when no such map exists.
    pub fn property(&self, kind: EntityKind, name: &str) -> Result<&ScalarMap> {
        self.properties
            .get(kind, name)
            .ok_or_else(|| GraphError::unknown_property(kind, name))
    }

    /// Assigns a vertex property value, creating the map on first use with
    /// every other vertex at `0.0`.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexOutOfBounds`] for an unknown vertex.
    pub fn set_vertex_property(&mut self, name: &str, vertex: usize, value: f64) -> Result<()> {
        self.check_vertex(vertex)?;
        let len = self.vertex_count();
        self.properties
            .set(EntityKind::Vertex, name, vertex, value, len);
        Ok(())
    }

    /// Assigns an edge property value, creating the map on first use with
    /// every other edge at `0.0`.
    ///
    /// # Errors
    /// Returns [`GraphError::EdgeOutOfBounds`] for an unknown edge.
    pub fn set_edge_property(&mut self, name: &str, edge: usize, value: f64) -> Result<()> {
        self.endpoints(edge)?;
        let len = self.edge_count();
        self.properties.set(EntityKind::Edge, name, edge, value, len);
        Ok(())
    }

    /// Registers a complete vertex map, replacing any map with the same name.
    /// Short maps are padded with `0.0`; long maps are truncated.
    pub fn insert_vertex_property(&mut self, name: &str, values: impl Into<ScalarMap>) {
        let len = self.vertex_count();
        self.properties
            .insert(EntityKind::Vertex, name, values.into(), len);
    }

    /// Registers a complete edge map, replacing any map with the same name.
    /// Short maps are padded with `0.0`; long maps are truncated.
    pub fn insert_edge_property(&mut self, name: &str, values: impl Into<ScalarMap>) {
        let len = self.edge_count();
        self.properties
            .insert(EntityKind::Edge, name, values.into(), len);
    }

    /// Stores every vertex's current index as a vertex property.
    pub fn insert_vertex_index_property(&mut self, name: &str) {
        let values = index_values(self.vertex_count());
        self.insert_vertex_property(name, values);
    }

    /// Stores every edge's current index as an edge property.
    pub fn insert_edge_index_property(&mut self, name: &str) {
        let values = index_values(self.edge_count());
        self.insert_edge_property(name, values);
    }

    /// Removes a vertex property. Returns whether a map was removed.
    pub fn remove_vertex_property(&mut self, name: &str) -> bool {
        self.properties.remove(EntityKind::Vertex, name).is_some()
    }

    /// Removes an edge property. Returns whether a map was removed.
    pub fn remove_edge_property(&mut self, name: &str) -> bool {
        self.properties.remove(EntityKind::Edge, name).is_some()
    }

    fn check_vertex(&self, vertex: usize) -> Result<()> {
        if vertex < self.vertex_count() {
            Ok(())
        } else {
            Err(GraphError::VertexOutOfBounds {
                vertex,
                vertex_count: self.vertex_count(),
            })
        }
    }
}

fn detach(list: &mut Vec<usize>, edge: usize) {
    if let Some(position) = list.iter().position(|&candidate| candidate == edge) {
        list.remove(position);
    }
}

fn relabel(list: &mut [usize], from: usize, to: usize) {
    if let Some(slot) = list.iter_mut().find(|candidate| **candidate == from) {
        *slot = to;
    }
}

fn index_values(count: usize) -> Vec<f64> {
    (0..count).map(|index| index as f64).collect()
}

#[cfg(test)]
mod tests;
