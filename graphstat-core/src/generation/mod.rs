//! Correlated configurational-model generator.
//!
//! A run moves through [`GenerationStage`]s in order. Degrees are drawn per
//! vertex by rejection sampling against the [`DegreeModel`] envelope, then
//! randomly chosen vertices are redrawn until the in- and out-stub totals
//! match, discarding any redraw that would widen the gap. Each out-stub,
//! visited in a seeded random order, then draws a target class from the
//! [`CorrelationModel`] and is joined to a free in-stub of that class chosen
//! uniformly. Self-loops and parallel edges are kept.
//!
//! Every draw, and every round that narrows the stub gap, is bounded by
//! [`GeneratorParams::max_attempts`], and the
//! optional cancellation flag is polled before each attempt. All randomness
//! comes from one [`SmallRng`] seeded from the parameters, so a seed fully
//! determines the output.

mod error;
mod model;
mod params;

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng, rngs::SmallRng, seq::SliceRandom};
use tracing::{debug, info, instrument};

use crate::graph::Graph;

pub use self::{
    error::{GenerationError, GenerationErrorCode, GenerationStage},
    model::{
        CorrelationModel, DegreeModel, DegreePair, FixedDegree, FnCorrelationModel,
        FnDegreeModel,
    },
    params::{DEFAULT_MAX_ATTEMPTS, DEFAULT_RNG_SEED, GeneratorParams},
};

use self::params::validate_bound;

/// Generates a directed multigraph whose joint degree distribution follows
/// `degrees` and whose edge endpoints are paired according to `correlation`.
///
/// # Errors
/// - [`GenerationError::InvalidParameters`] when the retry cap is zero or a
///   model bound is not finite and positive.
/// - [`GenerationError::NonConvergence`] when a draw exhausts the retry cap.
/// - [`GenerationError::Aborted`] when the cancellation flag is raised.
///
/// # Examples
/// ```
/// use graphstat_core::{FixedDegree, GeneratorParams, generate_correlated_configuration_model};
///
/// let model = FixedDegree::new(2, 2);
/// let graph = generate_correlated_configuration_model(
///     &model,
///     &model,
///     &GeneratorParams::new(10).with_rng_seed(3),
/// )?;
/// assert_eq!(graph.vertex_count(), 10);
/// assert_eq!(graph.edge_count(), 20);
/// assert!((0..10).all(|v| graph.in_degree(v) == 2 && graph.out_degree(v) == 2));
/// # Ok::<(), graphstat_core::GenerationError>(())
/// ```
#[instrument(
    name = "generate.correlated_configuration_model",
    err,
    skip_all,
    fields(
        vertices = params.vertices(),
        seed = params.rng_seed(),
        undirected_corr = params.undirected_corr()
    )
)]
pub fn generate_correlated_configuration_model<D, C>(
    degrees: &D,
    correlation: &C,
    params: &GeneratorParams,
) -> Result<Graph, GenerationError>
where
    D: DegreeModel + ?Sized,
    C: CorrelationModel + ?Sized,
{
    params.validate()?;
    validate_bound("degree", degrees.envelope_bound())?;
    validate_bound("correlation", correlation.envelope_bound())?;

    let mut run = Generator {
        degrees,
        correlation,
        params,
        rng: SmallRng::seed_from_u64(params.rng_seed()),
    };
    let mut classes = run.sample_degrees()?;
    run.balance_degrees(&mut classes)?;
    let (out_stubs, pool) = run.assign_stubs(&classes);
    let edges = run.rewire(&classes, &out_stubs, pool)?;

    let graph = Graph::from_edges(classes.len(), &edges)?;
    info!(
        stage = %GenerationStage::Done,
        edges = graph.edge_count(),
        "generation complete"
    );
    Ok(graph)
}

/// Free in-stubs grouped by the class of the vertex that owns them. A vertex
/// appears once per free in-stub, so a uniform pick within a class is a
/// uniform pick over its stubs.
struct StubPool {
    classes: BTreeMap<DegreePair, Vec<usize>>,
}

impl StubPool {
    /// Takes one uniformly chosen free in-stub of `class` and returns its
    /// vertex.
    fn take(&mut self, class: DegreePair, rng: &mut SmallRng) -> Option<usize> {
        let stubs = self.classes.get_mut(&class)?;
        if stubs.is_empty() {
            return None;
        }
        let slot = rng.gen_range(0..stubs.len());
        Some(stubs.swap_remove(slot))
    }
}

struct Generator<'a, D: ?Sized, C: ?Sized> {
    degrees: &'a D,
    correlation: &'a C,
    params: &'a GeneratorParams,
    rng: SmallRng,
}

impl<D, C> Generator<'_, D, C>
where
    D: DegreeModel + ?Sized,
    C: CorrelationModel + ?Sized,
{
    fn check_cancelled(&self, stage: GenerationStage) -> Result<(), GenerationError> {
        if self.params.is_cancelled() {
            Err(GenerationError::Aborted { stage })
        } else {
            Ok(())
        }
    }

    fn uniform_pair(&mut self) -> (f64, f64) {
        (self.rng.gen_range(0.0..1.0), self.rng.gen_range(0.0..1.0))
    }

    /// Accepts with probability `target / (bound · envelope)`. A non-positive
    /// or non-finite envelope rejects.
    fn accept(&mut self, target: f64, envelope: f64, bound: f64) -> bool {
        if !(envelope.is_finite() && envelope > 0.0) {
            return false;
        }
        let draw: f64 = self.rng.gen_range(0.0..1.0);
        draw < target / (bound * envelope)
    }

    /// Repeats `attempt` until it yields a value, polling for cancellation
    /// first. Returns the value and the number of attempts spent.
    fn retry<T>(
        &mut self,
        stage: GenerationStage,
        index: usize,
        mut attempt: impl FnMut(&mut Self) -> Option<T>,
    ) -> Result<(T, usize), GenerationError> {
        let attempts = self.params.max_attempts();
        for used in 1..=attempts {
            self.check_cancelled(stage)?;
            if let Some(value) = attempt(self) {
                return Ok((value, used));
            }
        }
        Err(GenerationError::NonConvergence {
            stage,
            index,
            attempts,
        })
    }

    fn draw_degrees(
        &mut self,
        stage: GenerationStage,
        index: usize,
    ) -> Result<(DegreePair, usize), GenerationError> {
        self.retry(stage, index, |run| {
            let (r1, r2) = run.uniform_pair();
            let proposal = run.degrees.sample_envelope(r1, r2);
            let accepted = run.accept(
                run.degrees.probability(proposal),
                run.degrees.envelope(proposal),
                run.degrees.envelope_bound(),
            );
            accepted.then_some(proposal)
        })
    }

    fn sample_degrees(&mut self) -> Result<Vec<DegreePair>, GenerationError> {
        let stage = GenerationStage::SamplingDegrees;
        let mut classes = Vec::with_capacity(self.params.vertices());
        let mut attempts = 0;
        for vertex in 0..self.params.vertices() {
            let (degrees, used) = self.draw_degrees(stage, vertex)?;
            classes.push(degrees);
            attempts += used;
        }
        info!(stage = %stage, vertices = classes.len(), attempts, "stage complete");
        Ok(classes)
    }

    /// Redraws random vertices until the in- and out-stub totals match. A
    /// redraw that would widen the gap is discarded, so the gap never grows;
    /// each round must narrow it within the retry cap.
    fn balance_degrees(&mut self, classes: &mut [DegreePair]) -> Result<(), GenerationError> {
        let stage = GenerationStage::BalancingDegrees;
        let cap = self.params.max_attempts();
        let mut in_total: usize = classes.iter().map(|d| d.in_degree).sum();
        let mut out_total: usize = classes.iter().map(|d| d.out_degree).sum();
        let mut rounds = 0;
        let mut redraws = 0;
        while in_total != out_total {
            let gap = in_total.abs_diff(out_total);
            let mut attempts = 0;
            loop {
                self.check_cancelled(stage)?;
                if attempts == cap {
                    return Err(GenerationError::NonConvergence {
                        stage,
                        index: rounds,
                        attempts,
                    });
                }
                attempts += 1;
                let vertex = self.rng.gen_range(0..classes.len());
                let (fresh, _) = self.draw_degrees(stage, vertex)?;
                let old = classes[vertex];
                let next_in = in_total - old.in_degree + fresh.in_degree;
                let next_out = out_total - old.out_degree + fresh.out_degree;
                let next_gap = next_in.abs_diff(next_out);
                if next_gap <= gap {
                    classes[vertex] = fresh;
                    in_total = next_in;
                    out_total = next_out;
                }
                if next_gap < gap {
                    break;
                }
            }
            rounds += 1;
            redraws += attempts;
            debug!(stage = %stage, gap = in_total.abs_diff(out_total), "balancing round complete");
        }
        info!(stage = %stage, rounds, redraws, stubs = in_total, "stage complete");
        Ok(())
    }

    fn assign_stubs(&mut self, classes: &[DegreePair]) -> (Vec<usize>, StubPool) {
        let stage = GenerationStage::AssigningStubs;
        let mut out_stubs = Vec::new();
        let mut pool = StubPool {
            classes: BTreeMap::new(),
        };
        for (vertex, degrees) in classes.iter().enumerate() {
            out_stubs.extend(std::iter::repeat_n(vertex, degrees.out_degree));
            if degrees.in_degree > 0 {
                pool.classes
                    .entry(*degrees)
                    .or_default()
                    .extend(std::iter::repeat_n(vertex, degrees.in_degree));
            }
        }
        out_stubs.shuffle(&mut self.rng);
        info!(
            stage = %stage,
            stubs = out_stubs.len(),
            classes = pool.classes.len(),
            "stage complete"
        );
        (out_stubs, pool)
    }

    fn rewire(
        &mut self,
        classes: &[DegreePair],
        out_stubs: &[usize],
        mut pool: StubPool,
    ) -> Result<Vec<(usize, usize)>, GenerationError> {
        let stage = GenerationStage::CorrelatedRewiring;
        let symmetric = self.params.undirected_corr();
        let mut edges = Vec::with_capacity(out_stubs.len());
        let mut attempts = 0;
        for (stub, &source) in out_stubs.iter().enumerate() {
            let origin = classes[source];
            let (target, used) = self.retry(stage, stub, |run| {
                let (r1, r2) = run.uniform_pair();
                let proposal = run.correlation.sample_envelope(r1, r2, origin);
                let (first, second) = if symmetric && proposal > origin {
                    (origin, proposal)
                } else {
                    (proposal, origin)
                };
                let accepted = run.accept(
                    run.correlation.correlation(first, second),
                    run.correlation.envelope(first, second),
                    run.correlation.envelope_bound(),
                );
                if accepted {
                    pool.take(proposal, &mut run.rng)
                } else {
                    None
                }
            })?;
            edges.push((source, target));
            attempts += used;
            if (stub + 1) % 10_000 == 0 {
                debug!(stage = %stage, stubs_done = stub + 1, "rewiring progress");
            }
        }
        info!(stage = %stage, edges = edges.len(), attempts, "stage complete");
        Ok(edges)
    }
}

#[cfg(test)]
mod tests;
