//! Degree selectors: which per-vertex quantity a statistic reads.

use std::{convert::Infallible, fmt, str::FromStr};

use crate::{
    error::Result,
    graph::ScalarMap,
    view::GraphView,
};

/// Chooses the per-vertex quantity a statistic reads.
///
/// Parsing accepts `in`, `out` and `total` (case-insensitive); any other
/// string names a scalar vertex property.
///
/// # Examples
/// ```
/// use graphstat_core::DegreeSpec;
///
/// assert_eq!("OUT".parse::<DegreeSpec>(), Ok(DegreeSpec::Out));
/// assert_eq!(
///     "weight".parse::<DegreeSpec>(),
///     Ok(DegreeSpec::Scalar("weight".into()))
/// );
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum DegreeSpec {
    /// Number of incoming edges.
    In,
    /// Number of outgoing edges.
    Out,
    /// Sum of in- and out-degree in a directed view.
    Total,
    /// Value of a scalar vertex property.
    Scalar(String),
}

impl DegreeSpec {
    /// Resolves the selector against `view`.
    ///
    /// # Errors
    /// Returns [`crate::GraphError::UnknownProperty`] when a scalar selector
    /// names a property that is not registered.
    pub fn resolve<'v, 'g>(&self, view: &'v GraphView<'g>) -> Result<DegreeSelector<'v, 'g>> {
        let source = match self {
            Self::In => Source::In,
            Self::Out => Source::Out,
            Self::Total => Source::Total,
            Self::Scalar(name) => Source::Scalar(view.vertex_property(name)?),
        };
        Ok(DegreeSelector { view, source })
    }
}

impl fmt::Display for DegreeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::In => f.write_str("in"),
            Self::Out => f.write_str("out"),
            Self::Total => f.write_str("total"),
            Self::Scalar(name) => f.write_str(name),
        }
    }
}

impl FromStr for DegreeSpec {
    type Err = Infallible;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "in" => Self::In,
            "out" => Self::Out,
            "total" => Self::Total,
            _ => Self::Scalar(s.to_owned()),
        })
    }
}

#[derive(Clone, Copy, Debug)]
enum Source<'g> {
    In,
    Out,
    Total,
    Scalar(&'g ScalarMap),
}

/// A [`DegreeSpec`] bound to a view, ready to evaluate per vertex.
#[derive(Clone, Copy, Debug)]
pub struct DegreeSelector<'v, 'g> {
    view: &'v GraphView<'g>,
    source: Source<'g>,
}

impl DegreeSelector<'_, '_> {
    /// Returns the selected quantity for `vertex`.
    ///
    /// Degrees are counted on the view, so excluded edges never contribute.
    /// Scalar values are read directly; missing slots read as `0.0`.
    #[must_use]
    pub fn value(&self, vertex: usize) -> f64 {
        match self.source {
            Source::In => self.view.in_degree(vertex) as f64,
            Source::Out => self.view.out_degree(vertex) as f64,
            Source::Total => self.view.total_degree(vertex) as f64,
            Source::Scalar(map) => map.get(vertex).unwrap_or(0.0),
        }
    }
}
