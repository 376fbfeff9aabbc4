//! Command implementations and argument parsing for the graphstat CLI.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use graphstat_core::{
    DEFAULT_RNG_SEED, DegreeSpec, FilterSpec, FixedDegree, GenerationError, GeneratorParams,
    Graph, GraphError, GraphView, Histogram, assortativity_coefficient, average_distance,
    average_harmonic_distance, component_size_histogram, degree_histogram,
    generate_correlated_configuration_model, global_clustering,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::edge_list::{EdgeListError, read_edge_list};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "graphstat",
    about = "Compute graph statistics and sample configurational models."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Summarise an edge list.
    Stats(StatsCommand),
    /// Generate a configurational model and print its edges.
    Generate(GenerateCommand),
}

/// Options accepted by the `stats` command.
#[derive(Debug, Args, Clone)]
pub struct StatsCommand {
    /// Edge list with one `source target` pair per line.
    pub path: PathBuf,

    /// Ignore edge direction.
    #[arg(long)]
    pub undirected: bool,

    /// Read every edge backwards.
    #[arg(long)]
    pub reversed: bool,

    /// Degree selector: `in`, `out`, `total` or a vertex property name.
    #[arg(long, default_value = "total")]
    pub degree: DegreeSpec,
}

/// Options accepted by the `generate` command.
#[derive(Debug, Args, Clone)]
pub struct GenerateCommand {
    /// Number of vertices to generate.
    #[arg(long)]
    pub vertices: usize,

    /// In-degree shared by every vertex.
    #[arg(long = "in-degree")]
    pub in_degree: usize,

    /// Out-degree shared by every vertex.
    #[arg(long = "out-degree")]
    pub out_degree: usize,

    /// Seed for the random number generator.
    #[arg(long, default_value_t = DEFAULT_RNG_SEED)]
    pub seed: u64,

    /// Retry cap for each rejection-sampling loop.
    #[arg(long = "max-attempts")]
    pub max_attempts: Option<usize>,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while opening an input.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The edge list could not be read.
    #[error("failed to load `{path}`: {source}")]
    EdgeList {
        /// Path of the edge list.
        path: PathBuf,
        /// Parse or read failure.
        #[source]
        source: EdgeListError,
    },
    /// A statistic rejected its inputs.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// Model generation failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl CliError {
    /// Stable code of the wrapped library error, if there is one.
    #[must_use]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Graph(error) => Some(error.code().as_str()),
            Self::Generation(error) => Some(error.code().as_str()),
            Self::EdgeList {
                source: EdgeListError::Graph(error),
                ..
            } => Some(error.code().as_str()),
            Self::Io { .. } | Self::EdgeList { .. } => None,
        }
    }
}

/// Statistics computed by the `stats` command.
#[derive(Debug, Clone)]
pub struct StatsSummary {
    /// Input file stem.
    pub source: String,
    /// Non-excluded vertices.
    pub vertices: usize,
    /// Non-excluded edges.
    pub edges: usize,
    /// Selector used for the degree histogram and assortativity.
    pub degree: DegreeSpec,
    /// Histogram of the selected degree.
    pub degree_histogram: Histogram<1>,
    /// Histogram of weakly connected component sizes.
    pub components: Histogram<1>,
    /// Assortativity of the selected degree; NaN when undefined.
    pub assortativity: f64,
    /// Global clustering coefficient; NaN without connected triplets.
    pub global_clustering: f64,
    /// Mean shortest-path length over reachable ordered pairs.
    pub average_distance: f64,
    /// Mean inverse shortest-path length over distinct ordered pairs.
    pub harmonic_distance: f64,
}

/// Graph produced by the `generate` command.
#[derive(Debug, Clone)]
pub struct GenerateSummary {
    /// Seed the graph was generated with.
    pub seed: u64,
    /// Generated multigraph.
    pub graph: Graph,
}

/// Outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub enum ExecutionSummary {
    /// Result of `stats`.
    Stats(StatsSummary),
    /// Result of `generate`.
    Generate(GenerateSummary),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading, analysis or generation fails.
///
/// # Examples
/// ```
/// use graphstat_cli::cli::{Cli, Command, ExecutionSummary, GenerateCommand, run_cli};
///
/// let cli = Cli {
///     command: Command::Generate(GenerateCommand {
///         vertices: 10,
///         in_degree: 2,
///         out_degree: 2,
///         seed: 1,
///         max_attempts: None,
///     }),
/// };
/// let ExecutionSummary::Generate(summary) = run_cli(cli)? else {
///     unreachable!("generate yields a graph");
/// };
/// assert_eq!(summary.graph.edge_count(), 20);
/// # Ok::<(), graphstat_cli::cli::CliError>(())
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Stats(stats) => {
            span.record("command", field::display("stats"));
            run_stats(stats).map(ExecutionSummary::Stats)
        }
        Command::Generate(generate) => {
            span.record("command", field::display("generate"));
            run_generate(&generate).map(ExecutionSummary::Generate)
        }
    }
}

#[instrument(
    name = "cli.stats",
    err,
    skip(command),
    fields(path = %command.path.display(), degree = %command.degree),
)]
pub(super) fn run_stats(command: StatsCommand) -> Result<StatsSummary, CliError> {
    let StatsCommand {
        path,
        undirected,
        reversed,
        degree,
    } = command;
    let graph = load_graph(&path)?;
    let filter = FilterSpec::new()
        .with_directed(!undirected)
        .with_reversed(reversed);
    let view = GraphView::new(&graph, &filter);

    let summary = StatsSummary {
        source: derive_source_name(&path),
        vertices: view.vertex_count(),
        edges: view.edge_count(),
        degree_histogram: degree_histogram(&view, &degree)?,
        components: component_size_histogram(&view),
        assortativity: assortativity_coefficient(&view, &degree)?,
        global_clustering: global_clustering(&view),
        average_distance: average_distance(&view),
        harmonic_distance: average_harmonic_distance(&view),
        degree,
    };
    info!(
        source = summary.source.as_str(),
        vertices = summary.vertices,
        edges = summary.edges,
        "stats completed"
    );
    Ok(summary)
}

#[instrument(
    name = "cli.generate",
    err,
    skip(command),
    fields(vertices = command.vertices, seed = command.seed),
)]
pub(super) fn run_generate(command: &GenerateCommand) -> Result<GenerateSummary, CliError> {
    let model = FixedDegree::new(command.in_degree, command.out_degree);
    let mut params = GeneratorParams::new(command.vertices).with_rng_seed(command.seed);
    if let Some(cap) = command.max_attempts {
        params = params.with_max_attempts(cap);
    }
    let graph = generate_correlated_configuration_model(&model, &model, &params)?;
    info!(edges = graph.edge_count(), "generate completed");
    Ok(GenerateSummary {
        seed: command.seed,
        graph,
    })
}

fn load_graph(path: &Path) -> Result<Graph, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_edge_list(BufReader::new(file)).map_err(|source| CliError::EdgeList {
        path: path.to_path_buf(),
        source,
    })
}

pub(super) fn derive_source_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "graph".to_owned(), ToOwned::to_owned)
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// Histograms print one `value\tcount` line per bucket. Generated graphs print
/// as an edge list that `stats` can read back.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Stats(stats) => render_stats(stats, &mut writer),
        ExecutionSummary::Generate(generated) => render_edges(generated, &mut writer),
    }
}

fn render_stats(stats: &StatsSummary, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer, "graph: {}", stats.source)?;
    writeln!(writer, "vertices: {}", stats.vertices)?;
    writeln!(writer, "edges: {}", stats.edges)?;
    writeln!(writer, "{} degree histogram:", stats.degree)?;
    render_histogram(&stats.degree_histogram, writer)?;
    writeln!(writer, "component sizes:")?;
    render_histogram(&stats.components, writer)?;
    writeln!(writer, "assortativity: {}", stats.assortativity)?;
    writeln!(writer, "global clustering: {}", stats.global_clustering)?;
    writeln!(writer, "average distance: {}", stats.average_distance)?;
    writeln!(writer, "harmonic distance: {}", stats.harmonic_distance)
}

fn render_histogram(hist: &Histogram<1>, writer: &mut impl Write) -> io::Result<()> {
    for ([value], count) in hist.iter() {
        writeln!(writer, "{value}\t{count}")?;
    }
    Ok(())
}

fn render_edges(generated: &GenerateSummary, writer: &mut impl Write) -> io::Result<()> {
    let graph = &generated.graph;
    writeln!(
        writer,
        "# vertices {} edges {} seed {}",
        graph.vertex_count(),
        graph.edge_count(),
        generated.seed
    )?;
    for edge in graph.edges() {
        writeln!(writer, "{} {}", edge.source, edge.target)?;
    }
    Ok(())
}
