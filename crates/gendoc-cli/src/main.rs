//! gendoc CLI - markdown API documentation from request/response samples
//!
//! Entry point of the `gendoc` binary: parses arguments, sets up logging
//! on stderr and dispatches to the command handlers.

mod cli;
mod error;
mod handlers;
mod logging;
mod manifest;
mod output;

use cli::{Cli, Commands};
use colored::control;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

fn main() {
    let cli = Cli::parse_args();

    control::set_override(cli.use_color());

    if let Err(e) = init_logging(&cli) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli) {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("{}", error::format_error(&e, control::SHOULD_COLORIZE.should_colorize()));

            if e.should_show_help() {
                eprintln!("\nFor more information, try '--help'");
            }

            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
#[instrument(skip(cli), fields(command = ?cli.command))]
fn run(cli: Cli) -> Result<()> {
    let _timer = Timer::new("cli_execution");
    let mut output = OutputWriter::new(cli.output, cli.use_color(), cli.quiet);

    tracing::info!(verbosity = cli.verbosity_level(), "Executing command");

    match cli.command {
        Commands::Generate(args) => handlers::handle_generate(args, &mut output),
        Commands::Fields(args) => handlers::handle_fields(args, &mut output),
        Commands::Preview(args) => handlers::handle_preview(args, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args, &mut std::io::stdout()),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli) -> Result<()> {
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());
    logging_config.merge_with_env();

    if let Some(format) = cli.log_format {
        logging_config.format = format;
    }

    // Quiet mode only logs errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}
