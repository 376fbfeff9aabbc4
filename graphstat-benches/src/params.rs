//! Benchmark parameter labels.

use std::fmt;

/// Shape of a synthetic graph benchmark input.
#[derive(Clone, Copy, Debug)]
pub struct GraphBenchParams {
    /// Number of vertices.
    pub vertices: usize,
    /// Mean out-degree.
    pub mean_degree: usize,
}

impl fmt::Display for GraphBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},k={}", self.vertices, self.mean_degree)
    }
}

/// Shape of a generator benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct GeneratorBenchParams {
    /// Number of vertices.
    pub vertices: usize,
    /// Shared in- and out-degree.
    pub degree: usize,
    /// Whether correlation queries are symmetrised.
    pub undirected_corr: bool,
}

impl fmt::Display for GeneratorBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={},j={},sym={}",
            self.vertices, self.degree, self.undirected_corr
        )
    }
}
