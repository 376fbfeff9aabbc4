//! Benchmark support crate for graphstat.
//!
//! Provides seeded synthetic graphs and parameter labels for the Criterion
//! benchmarks covering histogram passes, clustering, distances and model
//! generation.

pub mod error;
pub mod params;
pub mod source;
