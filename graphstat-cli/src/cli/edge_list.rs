//! Plain edge-list ingestion.
//!
//! One `source target` pair of vertex indices per line. A `#` starts a
//! comment that runs to the end of the line, and blank lines are skipped. The
//! vertex count is one more than the largest index mentioned.

use std::io::{self, BufRead};

use graphstat_core::{Graph, GraphError};
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors raised while reading an edge list.
#[derive(Debug, Error)]
pub enum EdgeListError {
    /// Reading from the underlying source failed.
    #[error("failed to read edge list: {0}")]
    Io(#[from] io::Error),
    /// A line did not contain exactly two vertex indices.
    #[error("line {line}: expected `source target`, found `{content}`")]
    Malformed {
        /// One-based line number.
        line: usize,
        /// Offending line with comments stripped.
        content: String,
    },
    /// Building the graph from the parsed pairs failed.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Reads an edge list into a new [`Graph`].
///
/// # Errors
/// Returns [`EdgeListError::Malformed`] for lines that are not two unsigned
/// integers and [`EdgeListError::Io`] when the reader fails.
///
/// # Examples
/// ```
/// use graphstat_cli::cli::read_edge_list;
///
/// let graph = read_edge_list("# ring\n0 1\n1 2\n2 0 # closes it\n".as_bytes())?;
/// assert_eq!(graph.vertex_count(), 3);
/// assert_eq!(graph.edge_count(), 3);
/// # Ok::<(), graphstat_cli::cli::EdgeListError>(())
/// ```
#[instrument(name = "cli.read_edge_list", err, skip_all)]
pub fn read_edge_list(reader: impl BufRead) -> Result<Graph, EdgeListError> {
    let mut edges = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(pair) = parse_line(index + 1, &line)? {
            edges.push(pair);
        }
    }
    let vertices = edges
        .iter()
        .map(|&(source, target)| source.max(target) + 1)
        .max()
        .unwrap_or(0);
    debug!(vertices, edges = edges.len(), "edge list parsed");
    Ok(Graph::from_edges(vertices, &edges)?)
}

fn parse_line(line: usize, raw: &str) -> Result<Option<(usize, usize)>, EdgeListError> {
    let content = raw.split('#').next().unwrap_or_default().trim();
    if content.is_empty() {
        return Ok(None);
    }
    let malformed = || EdgeListError::Malformed {
        line,
        content: content.to_owned(),
    };
    let mut fields = content.split_whitespace();
    let (Some(source), Some(target), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(malformed());
    };
    let source: usize = source.parse().map_err(|_| malformed())?;
    let target: usize = target.parse().map_err(|_| malformed())?;
    // The vertex count is one past the largest index, so it must fit too.
    source.max(target).checked_add(1).ok_or_else(malformed)?;
    Ok(Some((source, target)))
}
