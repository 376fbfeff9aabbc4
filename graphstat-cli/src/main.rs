//! `graphstat` binary.
//!
//! Initialises logging, runs the parsed command, writes the summary to stdout
//! and maps failures to a non-zero exit code with the error's stable code
//! attached to the final log event.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use graphstat_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("failed to execute command")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_summary(&summary, &mut writer).context("failed to render summary")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let code = err.downcast_ref::<CliError>().and_then(CliError::code);
        let chain = format!("{err:#}");
        error!(
            error = %chain,
            code = code.map(field::display),
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialise logging: {err}");
}
