//! Degree and correlation models consumed by the generator.
//!
//! Both models are sampled by rejection: a proposal is drawn from an envelope
//! through its inverse CDF and accepted with probability
//! `target / (bound · envelope)`. The envelope must dominate the target up to
//! the bound for the accepted samples to follow the target distribution.

/// An `(in, out)` degree pair identifying a vertex class.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DegreePair {
    /// Number of incoming stubs.
    pub in_degree: usize,
    /// Number of outgoing stubs.
    pub out_degree: usize,
}

impl DegreePair {
    /// Pairs an in-degree with an out-degree.
    #[must_use]
    pub const fn new(in_degree: usize, out_degree: usize) -> Self {
        Self {
            in_degree,
            out_degree,
        }
    }
}

impl From<(usize, usize)> for DegreePair {
    fn from((in_degree, out_degree): (usize, usize)) -> Self {
        Self::new(in_degree, out_degree)
    }
}

/// Joint in/out degree distribution with a samplable envelope.
pub trait DegreeModel {
    /// Target probability (or weight) of `degrees`.
    fn probability(&self, degrees: DegreePair) -> f64;

    /// Envelope value at `degrees`.
    fn envelope(&self, degrees: DegreePair) -> f64;

    /// Maps two uniform draws in `[0, 1)` to a proposal distributed like the
    /// envelope.
    fn sample_envelope(&self, r1: f64, r2: f64) -> DegreePair;

    /// Constant scaling the envelope so that `bound · envelope ≥ probability`.
    fn envelope_bound(&self) -> f64 {
        1.0
    }
}

/// Conditional distribution of a target class given the source class of an
/// edge.
pub trait CorrelationModel {
    /// Target weight of an edge from a `source` vertex into a `target` vertex.
    fn correlation(&self, target: DegreePair, source: DegreePair) -> f64;

    /// Envelope value for the same pair.
    fn envelope(&self, target: DegreePair, source: DegreePair) -> f64;

    /// Maps two uniform draws to a target class distributed like the
    /// envelope conditioned on `source`.
    fn sample_envelope(&self, r1: f64, r2: f64, source: DegreePair) -> DegreePair;

    /// Constant scaling the envelope so that `bound · envelope ≥ correlation`.
    fn envelope_bound(&self) -> f64 {
        1.0
    }
}

/// [`DegreeModel`] assembled from plain functions.
///
/// # Examples
/// ```
/// use graphstat_core::{DegreeModel, DegreePair, FnDegreeModel};
///
/// let model = FnDegreeModel::new(
///     |d| if d.in_degree == d.out_degree { 0.5 } else { 0.0 },
///     |_| 0.5,
///     |r1, _| if r1 < 0.5 { DegreePair::new(1, 1) } else { DegreePair::new(2, 2) },
/// );
/// assert_eq!(model.sample_envelope(0.7, 0.0), DegreePair::new(2, 2));
/// assert_eq!(model.envelope_bound(), 1.0);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct FnDegreeModel {
    probability: fn(DegreePair) -> f64,
    envelope: fn(DegreePair) -> f64,
    sampler: fn(f64, f64) -> DegreePair,
    bound: f64,
}

impl FnDegreeModel {
    /// Builds the model from its target, envelope and inverse-CDF sampler,
    /// with an envelope bound of one.
    #[must_use]
    pub fn new(
        probability: fn(DegreePair) -> f64,
        envelope: fn(DegreePair) -> f64,
        sampler: fn(f64, f64) -> DegreePair,
    ) -> Self {
        Self {
            probability,
            envelope,
            sampler,
            bound: 1.0,
        }
    }

    /// Overrides the envelope bound.
    #[must_use]
    pub fn with_bound(mut self, bound: f64) -> Self {
        self.bound = bound;
        self
    }
}

impl DegreeModel for FnDegreeModel {
    fn probability(&self, degrees: DegreePair) -> f64 {
        (self.probability)(degrees)
    }

    fn envelope(&self, degrees: DegreePair) -> f64 {
        (self.envelope)(degrees)
    }

    fn sample_envelope(&self, r1: f64, r2: f64) -> DegreePair {
        (self.sampler)(r1, r2)
    }

    fn envelope_bound(&self) -> f64 {
        self.bound
    }
}

/// [`CorrelationModel`] assembled from plain functions.
#[derive(Clone, Copy, Debug)]
pub struct FnCorrelationModel {
    correlation: fn(DegreePair, DegreePair) -> f64,
    envelope: fn(DegreePair, DegreePair) -> f64,
    sampler: fn(f64, f64, DegreePair) -> DegreePair,
    bound: f64,
}

impl FnCorrelationModel {
    /// Builds the model from its target, envelope and inverse-CDF sampler,
    /// with an envelope bound of one.
    #[must_use]
    pub fn new(
        correlation: fn(DegreePair, DegreePair) -> f64,
        envelope: fn(DegreePair, DegreePair) -> f64,
        sampler: fn(f64, f64, DegreePair) -> DegreePair,
    ) -> Self {
        Self {
            correlation,
            envelope,
            sampler,
            bound: 1.0,
        }
    }

    /// Overrides the envelope bound.
    #[must_use]
    pub fn with_bound(mut self, bound: f64) -> Self {
        self.bound = bound;
        self
    }
}

impl CorrelationModel for FnCorrelationModel {
    fn correlation(&self, target: DegreePair, source: DegreePair) -> f64 {
        (self.correlation)(target, source)
    }

    fn envelope(&self, target: DegreePair, source: DegreePair) -> f64 {
        (self.envelope)(target, source)
    }

    fn sample_envelope(&self, r1: f64, r2: f64, source: DegreePair) -> DegreePair {
        (self.sampler)(r1, r2, source)
    }

    fn envelope_bound(&self) -> f64 {
        self.bound
    }
}

/// Every vertex gets the same degrees and every edge joins two such vertices.
///
/// Usable as both the degree and the correlation model; generation succeeds
/// only when `in_degree == out_degree`, since otherwise the stub totals can
/// never balance.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FixedDegree {
    degrees: DegreePair,
}

impl FixedDegree {
    /// Puts all mass on `(in_degree, out_degree)`.
    #[must_use]
    pub const fn new(in_degree: usize, out_degree: usize) -> Self {
        Self {
            degrees: DegreePair::new(in_degree, out_degree),
        }
    }

    /// The single class every vertex belongs to.
    #[must_use]
    #[rustfmt::skip]
    pub const fn degrees(&self) -> DegreePair { self.degrees }

    fn indicator(&self, degrees: DegreePair) -> f64 {
        if degrees == self.degrees { 1.0 } else { 0.0 }
    }
}

impl DegreeModel for FixedDegree {
    fn probability(&self, degrees: DegreePair) -> f64 {
        self.indicator(degrees)
    }

    fn envelope(&self, _degrees: DegreePair) -> f64 {
        1.0
    }

    fn sample_envelope(&self, _r1: f64, _r2: f64) -> DegreePair {
        self.degrees
    }
}

impl CorrelationModel for FixedDegree {
    fn correlation(&self, target: DegreePair, _source: DegreePair) -> f64 {
        self.indicator(target)
    }

    fn envelope(&self, _target: DegreePair, _source: DegreePair) -> f64 {
        1.0
    }

    fn sample_envelope(&self, _r1: f64, _r2: f64, _source: DegreePair) -> DegreePair {
        self.degrees
    }
}
