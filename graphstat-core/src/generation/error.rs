//! Errors produced by the configurational-model generator.

use std::fmt;

use thiserror::Error;

use crate::error::{GraphError, define_error_codes};

/// Phase of a generation run.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum GenerationStage {
    /// Drawing an `(in, out)` degree pair per vertex.
    SamplingDegrees,
    /// Resampling vertices until in- and out-stub totals match.
    BalancingDegrees,
    /// Materialising stubs from the sampled degrees.
    AssigningStubs,
    /// Pairing each out-stub with an in-stub of a correlated class.
    CorrelatedRewiring,
    /// Edges committed to the output graph.
    Done,
}

impl GenerationStage {
    /// Stable `snake_case` name used in messages and log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SamplingDegrees => "sampling_degrees",
            Self::BalancingDegrees => "balancing_degrees",
            Self::AssigningStubs => "assigning_stubs",
            Self::CorrelatedRewiring => "correlated_rewiring",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced while generating a correlated configurational model.
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum GenerationError {
    /// Parameters or model bounds were unusable.
    #[error("invalid generator parameter: {reason}")]
    InvalidParameters {
        /// Why the parameters were rejected.
        reason: String,
    },
    /// Rejection sampling exhausted its retry cap.
    #[error("{stage} did not converge for index {index} after {attempts} attempts")]
    NonConvergence {
        /// Stage whose draw gave up.
        stage: GenerationStage,
        /// Vertex, balancing round or out-stub being drawn.
        index: usize,
        /// Attempts spent before giving up.
        attempts: usize,
    },
    /// The cancellation flag was raised.
    #[error("generation aborted during {stage}")]
    Aborted {
        /// Stage that observed the flag.
        stage: GenerationStage,
    },
    /// Committing edges into the output graph failed.
    #[error("graph assembly failed: {0}")]
    Graph(#[from] GraphError),
}

define_error_codes! {
    /// Stable codes describing [`GenerationError`] variants.
    enum GenerationErrorCode for GenerationError {
        /// Parameters or model bounds were unusable.
        InvalidParameters => InvalidParameters { .. } => "GENERATION_INVALID_PARAMETERS",
        /// Rejection sampling exhausted its retry cap.
        NonConvergence => NonConvergence { .. } => "GENERATION_NON_CONVERGENCE",
        /// The cancellation flag was raised.
        Aborted => Aborted { .. } => "GENERATION_ABORTED",
        /// Committing edges into the output graph failed.
        Graph => Graph { .. } => "GENERATION_GRAPH",
    }
}
