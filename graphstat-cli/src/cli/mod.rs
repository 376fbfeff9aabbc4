//! Command-line interface for graph statistics and model generation.
//!
//! `stats` loads a plain edge list and reports histograms, clustering and
//! distance summaries; `generate` samples a configurational model with one
//! fixed degree class and prints its edges.

mod commands;
mod edge_list;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, GenerateCommand, GenerateSummary, StatsCommand,
    StatsSummary, render_summary, run_cli,
};
pub use edge_list::{EdgeListError, read_edge_list};
