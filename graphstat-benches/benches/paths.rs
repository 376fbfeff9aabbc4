//! All-pairs breadth-first distance statistics and component detection.
//!
//! Distances run one traversal per vertex, so sizes stay small.
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use graphstat_benches::{
    error::BenchSetupError,
    params::GraphBenchParams,
    source::{SyntheticConfig, uniform_multigraph},
};
use graphstat_core::{
    FilterSpec, GraphView, average_distance, average_harmonic_distance, component_size_histogram,
};

const SEED: u64 = 7;
const MEAN_DEGREE: usize = 3;
const VERTEX_COUNTS: &[usize] = &[200, 1_000, 2_000];

fn paths_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("paths");
    group.sample_size(10);

    for &vertices in VERTEX_COUNTS {
        let shape = GraphBenchParams {
            vertices,
            mean_degree: MEAN_DEGREE,
        };
        let graph = uniform_multigraph(&SyntheticConfig { shape, seed: SEED })?;
        let directed = GraphView::unfiltered(&graph);
        let undirected = GraphView::new(&graph, &FilterSpec::new().with_directed(false));

        group.bench_with_input(
            BenchmarkId::new("average_distance", shape),
            &directed,
            |b, view| {
                b.iter(|| average_distance(view));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("average_harmonic_distance", shape),
            &undirected,
            |b, view| {
                b.iter(|| average_harmonic_distance(view));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("component_size_histogram", shape),
            &directed,
            |b, view| {
                b.iter(|| component_size_histogram(view));
            },
        );
    }

    group.finish();
    Ok(())
}

fn paths(c: &mut Criterion) {
    if let Err(err) = paths_impl(c) {
        panic!("paths benchmark setup failed: {err}");
    }
}

criterion_group!(benches, paths);
criterion_main!(benches);
