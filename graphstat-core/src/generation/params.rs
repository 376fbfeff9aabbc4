//! Parameter handling for the configurational-model generator.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use super::error::GenerationError;

/// Default retry cap for a single rejection-sampling draw.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

/// Seed used when none is supplied.
pub const DEFAULT_RNG_SEED: u64 = 0x6EA9_5EED;

/// Configuration for one generation run.
///
/// # Examples
/// ```
/// use graphstat_core::GeneratorParams;
///
/// let params = GeneratorParams::new(100)
///     .with_rng_seed(7)
///     .with_max_attempts(500)
///     .with_undirected_corr(true);
/// assert_eq!(params.vertices(), 100);
/// assert_eq!(params.max_attempts(), 500);
/// ```
#[derive(Clone, Debug)]
pub struct GeneratorParams {
    vertices: usize,
    rng_seed: u64,
    max_attempts: usize,
    undirected_corr: bool,
    cancellation: Option<Arc<AtomicBool>>,
}

impl GeneratorParams {
    /// Creates parameters for a graph of `vertices` vertices.
    #[must_use]
    pub fn new(vertices: usize) -> Self {
        Self {
            vertices,
            rng_seed: DEFAULT_RNG_SEED,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            undirected_corr: false,
            cancellation: None,
        }
    }

    /// Seeds the generator's random stream.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    /// Caps the attempts spent on any single draw or balancing round. Must
    /// be at least one.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Queries the correlation model with degree pairs in sorted order so
    /// that it behaves symmetrically.
    #[must_use]
    pub fn with_undirected_corr(mut self, undirected_corr: bool) -> Self {
        self.undirected_corr = undirected_corr;
        self
    }

    /// Installs a flag that aborts the run once it reads `true`.
    #[must_use]
    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancellation = Some(flag);
        self
    }

    /// Number of vertices to generate.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertices(&self) -> usize { self.vertices }

    /// Seed of the run's random stream.
    #[must_use]
    #[rustfmt::skip]
    pub fn rng_seed(&self) -> u64 { self.rng_seed }

    /// Retry cap for each draw and each balancing round.
    #[must_use]
    #[rustfmt::skip]
    pub fn max_attempts(&self) -> usize { self.max_attempts }

    /// Whether correlation queries use sorted degree pairs.
    #[must_use]
    #[rustfmt::skip]
    pub fn undirected_corr(&self) -> bool { self.undirected_corr }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    pub(crate) fn validate(&self) -> Result<(), GenerationError> {
        if self.max_attempts == 0 {
            return Err(GenerationError::InvalidParameters {
                reason: "max_attempts must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

pub(crate) fn validate_bound(name: &str, bound: f64) -> Result<(), GenerationError> {
    if bound.is_finite() && bound > 0.0 {
        Ok(())
    } else {
        Err(GenerationError::InvalidParameters {
            reason: format!("{name} envelope bound ({bound}) must be finite and positive"),
        })
    }
}
