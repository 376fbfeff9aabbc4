//! Structured logging for the graphstat CLI.
//!
//! Diagnostics go to `stderr` so edge lists and summaries on `stdout` stay
//! machine-readable. `RUST_LOG` controls verbosity (default `info`) and
//! `GRAPHSTAT_LOG_FORMAT` picks between human and JSON output. Crates logging
//! through the `log` facade are bridged into `tracing`.

use std::{env, str::FromStr, sync::OnceLock};

use thiserror::Error;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, Layer, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Environment variable selecting `human` (default) or `json` output.
pub const LOG_FORMAT_ENV: &str = "GRAPHSTAT_LOG_FORMAT";

const DEFAULT_DIRECTIVE: &str = "info";

static INSTALLED: OnceLock<LogFormat> = OnceLock::new();

/// Output format for diagnostics.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LogFormat {
    /// Multi-line text for terminals.
    #[default]
    Human,
    /// One JSON object per event, including the active span list.
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(LoggingError::UnsupportedFormat {
                provided: other.to_owned(),
            }),
        }
    }
}

impl LogFormat {
    /// Reads the format from [`LOG_FORMAT_ENV`], defaulting to
    /// [`LogFormat::Human`] when the variable is unset.
    ///
    /// # Errors
    /// Returns [`LoggingError`] when the value is not valid Unicode or names
    /// an unknown format.
    pub fn from_env() -> Result<Self, LoggingError> {
        match env::var(LOG_FORMAT_ENV) {
            Ok(raw) => raw.parse(),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(source @ env::VarError::NotUnicode(_)) => Err(LoggingError::InvalidUnicode {
                name: LOG_FORMAT_ENV,
                source,
            }),
        }
    }
}

/// Errors raised while initialising structured logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Environment variable contained invalid UTF-8 data.
    #[error("environment variable `{name}` contained invalid UTF-8: {source}")]
    InvalidUnicode {
        /// Name of the offending environment variable.
        name: &'static str,
        /// Underlying parse failure.
        #[source]
        source: env::VarError,
    },
    /// Unsupported log format requested via `GRAPHSTAT_LOG_FORMAT`.
    #[error("unsupported log format `{provided}`; expected `human` or `json`")]
    UnsupportedFormat {
        /// Raw value supplied by the user.
        provided: String,
    },
    /// Another global subscriber was already installed.
    #[error("failed to install tracing subscriber: {source}")]
    InstallFailed {
        /// Error raised by `tracing_subscriber`.
        #[source]
        source: tracing_subscriber::util::TryInitError,
    },
}

/// Installs the global subscriber once and returns the format in use.
///
/// Later calls return the format chosen by the first call. When another
/// subscriber already owns the global slot, that subscriber is kept and a
/// notice is written to `stderr`.
///
/// # Errors
/// Returns [`LoggingError`] when [`LOG_FORMAT_ENV`] is malformed.
pub fn init_logging() -> Result<LogFormat, LoggingError> {
    if let Some(format) = INSTALLED.get() {
        return Ok(*format);
    }
    let format = LogFormat::from_env()?;
    if let Err(err) = install(format) {
        eprintln!("structured logging already configured elsewhere: {err}");
    }
    Ok(*INSTALLED.get_or_init(|| format))
}

fn install(format: LogFormat) -> Result<(), LoggingError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    let base = tracing_subscriber::fmt::layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    let output = match format {
        LogFormat::Human => base.boxed(),
        LogFormat::Json => base
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
    };

    // The `log` bridge is best-effort; an embedding host may already own it.
    let _ = LogTracer::init();
    tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .try_init()
        .map_err(|source| LoggingError::InstallFailed { source })
}
