//! Seeded synthetic graphs for benchmarks.

use graphstat_core::Graph;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::{error::BenchSetupError, params::GraphBenchParams};

/// Vertex property holding a uniform value in `[0, 1)`.
pub const VERTEX_SCALAR: &str = "age";
/// Edge property holding a uniform value in `[0, 1)`.
pub const EDGE_SCALAR: &str = "weight";

/// Configuration for [`uniform_multigraph`].
#[derive(Clone, Copy, Debug)]
pub struct SyntheticConfig {
    /// Number of vertices and mean out-degree.
    pub shape: GraphBenchParams,
    /// Seed for the random number generator.
    pub seed: u64,
}

/// Builds a directed multigraph with `vertices * mean_degree` edges whose
/// endpoints are drawn uniformly, so self-loops and parallel edges occur.
///
/// Registers [`VERTEX_SCALAR`] and [`EDGE_SCALAR`] with uniform values.
///
/// # Errors
/// Returns [`BenchSetupError::Graph`] if the edges cannot be committed.
pub fn uniform_multigraph(config: &SyntheticConfig) -> Result<Graph, BenchSetupError> {
    let GraphBenchParams {
        vertices,
        mean_degree,
    } = config.shape;
    let edge_count = vertices * mean_degree;
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let edges: Vec<(usize, usize)> = (0..edge_count)
        .map(|_| (rng.gen_range(0..vertices), rng.gen_range(0..vertices)))
        .collect();
    let mut graph = Graph::from_edges(vertices, &edges)?;
    let ages: Vec<f64> = (0..vertices).map(|_| rng.gen_range(0.0..1.0)).collect();
    let weights: Vec<f64> = (0..edge_count).map(|_| rng.gen_range(0.0..1.0)).collect();
    graph.insert_vertex_property(VERTEX_SCALAR, ages);
    graph.insert_edge_property(EDGE_SCALAR, weights);
    Ok(graph)
}
