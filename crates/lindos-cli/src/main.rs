//! Lindos CLI - command-line front end for the Lindos native bridge
//!
//! This is the main entry point for the `lindos` binary, providing commands
//! for processing and validating messages through the native library and
//! for describing its status codes.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use is_terminal::IsTerminal;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::io;
use std::process;
use tracing::instrument;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Configuration decides logging and color, so it is loaded first
    let config = match Config::load_with_file(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", error::format_error(&e, false));
            process::exit(e.exit_code());
        }
    };

    let use_color = cli.use_color() && config.output.color;
    control::set_override(use_color);

    if let Err(e) = init_logging(&cli, &config) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli, config, use_color) {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("{}", error::format_error(&e, use_color));

            if e.is_missing_library() {
                eprintln!("\nTo use another build, pass --library <PATH> or set LINDOS_LIBRARY");
            }

            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
#[instrument(skip_all, fields(command = ?cli.command))]
fn run(cli: Cli, config: Config, use_color: bool) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let mut output = OutputWriter::new(
        config.output_format(cli.output),
        use_color,
        cli.quiet,
        cli.verbosity_level(),
    );
    let bridge_config = config.bridge_config(cli.library.as_deref());
    let bridge_debug = config.debug_enabled(cli.debug);
    let open_bridge = || handlers::open_bridge(bridge_config, bridge_debug);

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        debug = bridge_debug,
        "Executing command"
    );

    match cli.command {
        Commands::Process(args) => handlers::handle_process(args, &open_bridge()?, &mut output),
        Commands::Validate(args) => handlers::handle_validate(args, &open_bridge()?, &mut output),
        Commands::Describe(args) => handlers::handle_describe(args, &open_bridge()?, &mut output),
        Commands::Interactive(args) => {
            let stdin = io::stdin();
            let prompt = stdin.is_terminal() && output.is_human();
            handlers::handle_interactive(args, &open_bridge()?, stdin.lock(), prompt, &mut output)
        }
        Commands::Completions(args) => handlers::handle_completions(args, &mut io::stdout()),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    let verbosity = cli.verbosity_level();

    let mut logging_config = LoggingConfig::from_verbosity(verbosity);
    logging_config.apply_settings(&config.logging, verbosity);

    if config.debug_enabled(cli.debug) {
        logging_config.with_bridge_debug();
    }

    // Apply environment overrides
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}
