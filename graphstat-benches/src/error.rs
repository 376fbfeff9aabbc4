//! Benchmark setup error type.
//!
//! Lets setup functions propagate failures with `?` instead of panicking
//! inside Criterion closures.

use graphstat_core::{GenerationError, GraphError};

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Building a synthetic graph failed.
    #[error("graph construction failed: {0}")]
    Graph(#[from] GraphError),
    /// Sampling a configurational model failed.
    #[error("model generation failed: {0}")]
    Generation(#[from] GenerationError),
}
