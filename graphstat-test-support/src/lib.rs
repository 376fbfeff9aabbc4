//! Shared test utilities used across graphstat crates.

pub mod ci;
pub mod tracing;
