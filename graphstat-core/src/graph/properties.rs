//! Typed registry of scalar property maps keyed by entity kind and name.

use std::{collections::BTreeMap, fmt};

/// The kind of graph entity a property map is attached to.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum EntityKind {
    /// Property indexed by vertex index.
    Vertex,
    /// Property indexed by edge index.
    Edge,
}

impl EntityKind {
    /// Returns the lowercase label used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::Edge => "edge",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dense `f64` values for one entity kind, addressed by entity index.
///
/// # Examples
/// ```
/// use graphstat_core::ScalarMap;
///
/// let map = ScalarMap::from(vec![0.5, 1.5]);
/// assert_eq!(map.get(1), Some(1.5));
/// assert_eq!(map.get(2), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScalarMap {
    values: Vec<f64>,
}

impl ScalarMap {
    /// Returns the value stored for `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Returns every value in index order.
    #[must_use]
    #[rustfmt::skip]
    pub fn values(&self) -> &[f64] { &self.values }

    /// Returns the number of stored values.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.values.len() }

    /// Returns whether the map stores no values.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    fn resize(&mut self, len: usize) {
        self.values.resize(len, 0.0);
    }

    fn set(&mut self, index: usize, value: f64) {
        if let Some(slot) = self.values.get_mut(index) {
            *slot = value;
        }
    }

    fn swap_remove(&mut self, index: usize) {
        if index < self.values.len() {
            self.values.swap_remove(index);
        }
    }
}

impl From<Vec<f64>> for ScalarMap {
    fn from(values: Vec<f64>) -> Self {
        Self { values }
    }
}

/// Registry of scalar property maps, at most one per `(kind, name)`.
///
/// Every map is kept at the length of its entity range: the owning
/// [`crate::Graph`] grows and shrinks the maps as vertices and edges come and
/// go, so a map can always be indexed by any live entity index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyRegistry {
    maps: BTreeMap<(EntityKind, String), ScalarMap>,
}

impl PropertyRegistry {
    /// Looks up the map registered for `(kind, name)`.
    #[must_use]
    pub fn get(&self, kind: EntityKind, name: &str) -> Option<&ScalarMap> {
        self.maps.get(&(kind, name.to_owned()))
    }

    /// Returns whether a map is registered for `(kind, name)`.
    #[must_use]
    pub fn contains(&self, kind: EntityKind, name: &str) -> bool {
        self.get(kind, name).is_some()
    }

    /// Iterates over the registered property names for `kind`.
    pub fn names(&self, kind: EntityKind) -> impl Iterator<Item = &str> {
        self.maps
            .keys()
            .filter(move |(entry_kind, _)| *entry_kind == kind)
            .map(|(_, name)| name.as_str())
    }

    /// Returns the number of registered maps across both kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.maps.len()
    }

    /// Returns whether no maps are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    pub(crate) fn insert(&mut self, kind: EntityKind, name: &str, mut map: ScalarMap, len: usize) {
        map.resize(len);
        self.maps.insert((kind, name.to_owned()), map);
    }

    pub(crate) fn set(
        &mut self,
        kind: EntityKind,
        name: &str,
        index: usize,
        value: f64,
        len: usize,
    ) {
        let map = self.maps.entry((kind, name.to_owned())).or_insert_with(|| {
            let mut fresh = ScalarMap::default();
            fresh.resize(len);
            fresh
        });
        map.set(index, value);
    }

    pub(crate) fn remove(&mut self, kind: EntityKind, name: &str) -> Option<ScalarMap> {
        self.maps.remove(&(kind, name.to_owned()))
    }

    pub(crate) fn resize_kind(&mut self, kind: EntityKind, len: usize) {
        self.maps_of_kind(kind).for_each(|map| map.resize(len));
    }

    pub(crate) fn swap_remove_kind(&mut self, kind: EntityKind, index: usize) {
        self.maps_of_kind(kind)
            .for_each(|map| map.swap_remove(index));
    }

    fn maps_of_kind(&mut self, kind: EntityKind) -> impl Iterator<Item = &mut ScalarMap> {
        self.maps
            .iter_mut()
            .filter(move |((entry_kind, _), _)| *entry_kind == kind)
            .map(|(_, map)| map)
    }
}
