//! Smoltalk CLI Binary
//!
//! Evaluates Smoltalk message expressions from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Evaluate one expression
//! terp eval '"hello" reversedString'
//!
//! # Expand an alias first
//! terp eval --aliased 'today year'
//!
//! # List what a value understands
//! terp selectors Date
//!
//! # Start an interactive REPL (the default)
//! terp
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use smol_cli::{
    cli::CliConfig,
    commands::{self, eval::EvalArgs, repl::ReplArgs, selectors::SelectorsArgs},
    diagnostics::{render_cli_error, setup_error_reporting},
    Result,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "terp",
    version = env!("CARGO_PKG_VERSION"),
    about = "Smoltalk: evaluate message expressions such as `\"hello\" reversedString`",
    long_about = r#"
Smoltalk evaluates small message expressions: an initial object followed by
messages, each sent to the result of the previous one.

EXAMPLES:
    terp eval 'Int adding: [9 squareRoot]'   # Evaluate an expression
    terp eval --aliased today               # Expand an alias, then evaluate
    terp selectors String                   # List the messages a value understands
    terp                                    # Start the REPL
    "#
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging (use multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Set log level (overrides --verbose/--quiet)
    #[arg(long, global = true, value_enum)]
    log: Option<LogLevel>,

    /// Set log output format
    #[arg(long, global = true, value_enum, default_value = "pretty")]
    log_format: LogFormat,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an expression and print the result
    Eval(EvalArgs),

    /// List the selectors understood by an object or an expression's result
    Selectors(SelectorsArgs),

    /// Start an interactive session
    Repl(ReplArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up error reporting
    setup_error_reporting()?;

    // Configure logging
    setup_logging(cli.verbose, cli.quiet, cli.log, cli.log_format)?;

    // Load configuration
    let config = CliConfig::load(cli.config.as_deref())?;

    // Execute command
    let result = match cli.command.unwrap_or(Commands::Repl(ReplArgs::default())) {
        Commands::Eval(args) => commands::eval_command(args, &config),
        Commands::Selectors(args) => commands::selectors_command(args, &config),
        Commands::Repl(args) => commands::repl_command(args, &config),
    };

    match result {
        Ok(_) => {
            if cli.verbose > 0 {
                info!("Command completed successfully");
            }
            Ok(())
        }
        Err(e) => {
            use tracing::error;
            if !render_cli_error(&e) {
                error!("{}", e);
            }
            if cli.verbose > 0 {
                error!(?e, "detailed error context");
            }
            std::process::exit(1);
        }
    }
}

fn setup_logging(
    verbose: u8,
    quiet: bool,
    log_level: Option<LogLevel>,
    log_format: LogFormat,
) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if let Some(level) = log_level {
        EnvFilter::new(match level {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        })
    } else if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let formatter = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_level(true);

    match log_format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(formatter)
                .with(filter)
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(formatter.json())
                .with(filter)
                .init();
        }
    }

    Ok(())
}
