mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;

use crate::cli::Cli;
use crate::error::CliError;

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(error.exit_code());
    }
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let envelope = commands::run(&cli)?;
    output::render(&envelope, cli.format, cli.pretty)?;

    let warning_count = envelope.meta.warnings.len();
    let error_count = envelope.errors.len();
    if cli.strict && (warning_count > 0 || error_count > 0) {
        return Err(CliError::StrictModeViolation {
            warning_count,
            error_count,
        });
    }
    if error_count > 0 {
        return Err(CliError::EnvelopeErrors { error_count });
    }

    Ok(())
}
