//! Graphstat core library.
//!
//! Structural statistics over filtered views of a directed multigraph, plus
//! a correlated configurational-model generator.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod degree;
mod error;
mod generation;
mod graph;
pub mod paths;
#[cfg(test)]
mod properties;
pub mod stats;
#[cfg(test)]
mod test_utils;
mod view;

pub use crate::{
    degree::{DegreeSelector, DegreeSpec},
    error::{GraphError, GraphErrorCode, Result},
    generation::{
        CorrelationModel, DEFAULT_MAX_ATTEMPTS, DEFAULT_RNG_SEED, DegreeModel, DegreePair,
        FixedDegree, FnCorrelationModel, FnDegreeModel, GenerationError, GenerationErrorCode,
        GenerationStage, GeneratorParams, generate_correlated_configuration_model,
    },
    graph::{EdgeRef, EntityKind, Graph, PropertyRegistry, ScalarMap},
    paths::{average_distance, average_harmonic_distance, component_size_histogram},
    stats::{
        AverageCorrelation, Bucket, Histogram, RunningMean, assortativity_coefficient,
        average_nearest_neighbor_degree, combined_degree_histogram, degree_correlation_histogram,
        degree_histogram, edge_degree_correlation_histogram, global_clustering,
        local_clustering_coefficients, local_clustering_histogram,
        vertex_degree_scalar_correlation_histogram,
    },
    view::{EdgePredicate, EntityFilter, FilterSpec, FilteredGraph, GraphView, VertexPredicate},
};
