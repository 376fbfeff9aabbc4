//! Tests for the correlated configurational-model generator.

use std::{
    collections::BTreeMap,
    sync::{Arc, atomic::AtomicBool},
};

use rstest::rstest;

use super::*;

const SMALL: DegreePair = DegreePair::new(1, 1);
const LARGE: DegreePair = DegreePair::new(3, 3);

fn two_class_degrees() -> FnDegreeModel {
    FnDegreeModel::new(
        |d| if d == SMALL || d == LARGE { 0.5 } else { 0.0 },
        |_| 0.5,
        |r1, _| if r1 < 0.5 { SMALL } else { LARGE },
    )
}

fn uniform_correlation() -> FnCorrelationModel {
    FnCorrelationModel::new(
        |target, _| if target == SMALL || target == LARGE { 1.0 } else { 0.0 },
        |_, _| 1.0,
        |r1, _, _| if r1 < 0.5 { SMALL } else { LARGE },
    )
}

const IN_HEAVY: DegreePair = DegreePair::new(2, 1);
const OUT_HEAVY: DegreePair = DegreePair::new(1, 2);

/// Two classes that balance only in expectation.
fn skewed_degrees() -> FnDegreeModel {
    FnDegreeModel::new(
        |d| if d == IN_HEAVY || d == OUT_HEAVY { 0.5 } else { 0.0 },
        |_| 0.5,
        |r1, _| if r1 < 0.5 { IN_HEAVY } else { OUT_HEAVY },
    )
}

fn skewed_correlation() -> FnCorrelationModel {
    FnCorrelationModel::new(
        |target, _| if target == IN_HEAVY || target == OUT_HEAVY { 1.0 } else { 0.0 },
        |_, _| 1.0,
        |r1, _, _| if r1 < 0.5 { IN_HEAVY } else { OUT_HEAVY },
    )
}

fn edge_list(graph: &Graph) -> Vec<(usize, usize)> {
    graph.edges().map(|edge| (edge.source, edge.target)).collect()
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(4)]
fn fixed_class_round_trip(#[case] degree: usize) {
    let model = FixedDegree::new(degree, degree);
    let graph = generate_correlated_configuration_model(
        &model,
        &model,
        &GeneratorParams::new(40).with_rng_seed(11),
    )
    .expect("a single balanced class always converges");

    assert_eq!(graph.vertex_count(), 40);
    assert_eq!(graph.edge_count(), 40 * degree);
    for vertex in 0..40 {
        assert_eq!(graph.in_degree(vertex), degree);
        assert_eq!(graph.out_degree(vertex), degree);
    }
}

#[test]
fn two_class_model_respects_sampled_degrees() {
    let graph = generate_correlated_configuration_model(
        &two_class_degrees(),
        &uniform_correlation(),
        &GeneratorParams::new(200).with_rng_seed(5),
    )
    .expect("two balanced classes converge");

    for vertex in 0..graph.vertex_count() {
        let (in_degree, out_degree) = (graph.in_degree(vertex), graph.out_degree(vertex));
        assert_eq!(in_degree, out_degree);
        assert!(in_degree == 1 || in_degree == 3, "degree {in_degree}");
    }
    let stubs: usize = (0..graph.vertex_count()).map(|v| graph.out_degree(v)).sum();
    assert_eq!(graph.edge_count(), stubs);
}

#[test]
fn same_seed_reproduces_graph() {
    let params = GeneratorParams::new(200).with_rng_seed(99);
    let first = generate_correlated_configuration_model(
        &two_class_degrees(),
        &uniform_correlation(),
        &params,
    )
    .expect("converges");
    let second = generate_correlated_configuration_model(
        &two_class_degrees(),
        &uniform_correlation(),
        &params,
    )
    .expect("converges");
    let other = generate_correlated_configuration_model(
        &two_class_degrees(),
        &uniform_correlation(),
        &params.clone().with_rng_seed(100),
    )
    .expect("converges");

    assert_eq!(edge_list(&first), edge_list(&second));
    assert_ne!(edge_list(&first), edge_list(&other));
}

#[test]
fn impossible_degree_model_fails_sampling() {
    let never = FnDegreeModel::new(|_| 0.0, |_| 1.0, |_, _| SMALL);
    let err = generate_correlated_configuration_model(
        &never,
        &uniform_correlation(),
        &GeneratorParams::new(3).with_max_attempts(25),
    )
    .expect_err("p is zero everywhere");

    assert_eq!(
        err,
        GenerationError::NonConvergence {
            stage: GenerationStage::SamplingDegrees,
            index: 0,
            attempts: 25,
        }
    );
    assert_eq!(err.code(), GenerationErrorCode::NonConvergence);
}

#[test]
fn balancing_closes_gap_in_coarse_steps() {
    // Draws yield (3, 1) or (1, 2), so the stub gap moves in steps of three.
    let degrees = FnDegreeModel::new(
        |_| 1.0,
        |_| 1.0,
        |r1, _| if r1 < 0.5 { DegreePair::new(3, 1) } else { OUT_HEAVY },
    );
    let graph = generate_correlated_configuration_model(
        &degrees,
        &FnCorrelationModel::new(|_, _| 1.0, |_, _| 1.0, |r1, _, _| {
            if r1 < 0.5 { DegreePair::new(3, 1) } else { OUT_HEAVY }
        }),
        &GeneratorParams::new(30).with_rng_seed(8),
    )
    .expect("the gap closes in steps of three");
    let in_total: usize = (0..30).map(|v| graph.in_degree(v)).sum();
    let out_total: usize = (0..30).map(|v| graph.out_degree(v)).sum();
    assert_eq!(in_total, out_total);
}

#[test]
fn unbalanced_fixed_degrees_fail_balancing() {
    let model = FixedDegree::new(1, 2);
    let err = generate_correlated_configuration_model(
        &model,
        &model,
        &GeneratorParams::new(4).with_max_attempts(50),
    )
    .expect_err("in and out totals never match");

    assert!(matches!(
        err,
        GenerationError::NonConvergence {
            stage: GenerationStage::BalancingDegrees,
            attempts: 50,
            ..
        }
    ));
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
fn large_skewed_model_balances(#[case] seed: u64) {
    let graph = generate_correlated_configuration_model(
        &skewed_degrees(),
        &skewed_correlation(),
        &GeneratorParams::new(100_000).with_rng_seed(seed),
    )
    .expect("the stub gap closes however large the graph");

    assert_eq!(graph.vertex_count(), 100_000);
    let mut in_total = 0;
    for vertex in 0..graph.vertex_count() {
        let degrees = DegreePair::new(graph.in_degree(vertex), graph.out_degree(vertex));
        assert!(degrees == IN_HEAVY || degrees == OUT_HEAVY, "{degrees:?}");
        in_total += degrees.in_degree;
    }
    assert_eq!(graph.edge_count(), in_total);
}

#[test]
fn stub_pool_picks_in_proportion_to_free_stubs() {
    let mut rng = SmallRng::seed_from_u64(23);
    let trials: u32 = 4_000;
    let mut heavy: u32 = 0;
    for _ in 0..trials {
        let mut pool = StubPool {
            classes: BTreeMap::from([(LARGE, vec![0, 0, 0, 1])]),
        };
        if pool.take(LARGE, &mut rng) == Some(0) {
            heavy += 1;
        }
    }
    let share = f64::from(heavy) / f64::from(trials);
    assert!((0.70..0.80).contains(&share), "share = {share}");
}

#[test]
fn stub_pool_drains_each_stub_once() {
    let mut rng = SmallRng::seed_from_u64(4);
    let mut pool = StubPool {
        classes: BTreeMap::from([(LARGE, vec![0, 0, 0, 1]), (SMALL, vec![2])]),
    };
    let mut taken: Vec<usize> = std::iter::from_fn(|| pool.take(LARGE, &mut rng)).collect();
    taken.sort_unstable();
    assert_eq!(taken, vec![0, 0, 0, 1]);
    assert_eq!(pool.take(SMALL, &mut rng), Some(2));
    assert_eq!(pool.take(SMALL, &mut rng), None);
    assert_eq!(pool.take(DegreePair::new(9, 9), &mut rng), None);
}

#[test]
fn missing_target_class_fails_rewiring() {
    let nowhere = FnCorrelationModel::new(|_, _| 1.0, |_, _| 1.0, |_, _, _| DegreePair::new(5, 5));
    let err = generate_correlated_configuration_model(
        &FixedDegree::new(1, 1),
        &nowhere,
        &GeneratorParams::new(6).with_max_attempts(30),
    )
    .expect_err("no vertex has degrees (5, 5)");

    assert_eq!(
        err,
        GenerationError::NonConvergence {
            stage: GenerationStage::CorrelatedRewiring,
            index: 0,
            attempts: 30,
        }
    );
}

#[test]
fn raised_flag_aborts_before_sampling() {
    let flag = Arc::new(AtomicBool::new(true));
    let model = FixedDegree::new(1, 1);
    let err = generate_correlated_configuration_model(
        &model,
        &model,
        &GeneratorParams::new(10).with_cancellation(Arc::clone(&flag)),
    )
    .expect_err("flag already raised");

    assert_eq!(
        err,
        GenerationError::Aborted {
            stage: GenerationStage::SamplingDegrees
        }
    );
    assert_eq!(err.code().as_str(), "GENERATION_ABORTED");
}

#[rstest]
#[case::zero_attempts(GeneratorParams::new(5).with_max_attempts(0), 1.0)]
#[case::nan_bound(GeneratorParams::new(5), f64::NAN)]
#[case::negative_bound(GeneratorParams::new(5), -1.0)]
fn invalid_parameters_are_rejected(#[case] params: GeneratorParams, #[case] bound: f64) {
    let degrees = FnDegreeModel::new(|_| 1.0, |_| 1.0, |_, _| SMALL).with_bound(bound);
    let err = generate_correlated_configuration_model(&degrees, &FixedDegree::new(1, 1), &params)
        .expect_err("parameters are unusable");
    assert_eq!(err.code(), GenerationErrorCode::InvalidParameters);
}

/// Accepts a pair only when queried with the smaller class first.
struct OrderedOnly;

impl CorrelationModel for OrderedOnly {
    fn correlation(&self, target: DegreePair, source: DegreePair) -> f64 {
        if target <= source { 1.0 } else { 0.0 }
    }

    fn envelope(&self, _target: DegreePair, _source: DegreePair) -> f64 {
        1.0
    }

    fn sample_envelope(&self, r1: f64, _r2: f64, _source: DegreePair) -> DegreePair {
        if r1 < 0.5 { SMALL } else { LARGE }
    }
}

#[test]
fn undirected_correlation_queries_sorted_pairs() {
    let graph = generate_correlated_configuration_model(
        &two_class_degrees(),
        &OrderedOnly,
        &GeneratorParams::new(100)
            .with_rng_seed(17)
            .with_undirected_corr(true),
    )
    .expect("every sorted query is accepted");
    assert!(graph.edge_count() >= 100);
}

#[test]
fn empty_run_yields_empty_graph() {
    let model = FixedDegree::new(2, 2);
    let graph = generate_correlated_configuration_model(&model, &model, &GeneratorParams::new(0))
        .expect("nothing to sample");
    assert!(graph.is_empty());
}
