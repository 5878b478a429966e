//! Ecosystem CLI - Inspect and validate process launch descriptors
//!
//! This CLI gives operators a terminal view of what an external process
//! manager will receive from a descriptor file:
//! - Validate a descriptor and list every problem in it
//! - List the declared apps
//! - Show an app's launch plan for a deployment mode
//! - Print an app's resolved environment
//! - Convert a descriptor between JSON, YAML and TOML

use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod output;

use commands::{apps, convert, validate};
use config::{CliConfig, EffectiveConfig};
pub use error::{CliError, CliResult};
pub use output::report_error;

/// Ecosystem CLI application
#[derive(Parser)]
#[command(name = "ecosystem")]
#[command(about = "Ecosystem - Inspect and validate process launch descriptors", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "ECOSYSTEM_CONFIG")]
    config: Option<String>,

    /// Descriptor file (.json, .yaml, .yml or .toml)
    #[arg(short, long, env = "ECOSYSTEM_FILE")]
    file: Option<PathBuf>,

    /// Output format (table, json, yaml)
    #[arg(short, long, default_value = "table")]
    output: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Validate the descriptor and report every problem
    Validate,

    /// List declared apps
    #[command(alias = "ls")]
    List,

    /// Show an app's launch plan
    Show {
        /// App name
        name: String,

        /// Deployment mode
        #[arg(short = 'e', long = "env")]
        mode: Option<String>,
    },

    /// Print an app's resolved environment as KEY=VALUE lines
    Env {
        /// App name
        name: String,

        /// Deployment mode
        #[arg(short = 'e', long = "env")]
        mode: Option<String>,
    },

    /// Re-serialize the descriptor in another format
    Convert {
        /// Target format
        #[arg(short, long)]
        to: convert::TargetFormat,
    },

    /// Show configuration
    Config,
}

/// Run using the current process arguments.
pub fn run() -> CliResult<()> {
    run_with_args(std::env::args_os())
}

/// Run using the provided argument iterator.
pub fn run_with_args<I, T>(args: I) -> CliResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    // Logs go to stderr so stdout stays machine-readable
    let filter = if cli.verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init();

    // Load config
    let config = CliConfig::load(cli.config.as_deref())?;
    let file = config.descriptor_path(cli.file);

    // Execute command
    match cli.command {
        Commands::Validate => validate::execute(&file, cli.output),
        Commands::List => apps::list(&file, cli.output),
        Commands::Show { name, mode } => apps::show(&file, &name, config.mode(mode), cli.output),
        Commands::Env { name, mode } => apps::env(&file, &name, config.mode(mode), cli.output),
        Commands::Convert { to } => convert::execute(&file, to),
        Commands::Config => {
            let effective = EffectiveConfig {
                descriptor: file,
                mode: config.default_mode.clone(),
                config,
            };
            output::print_single(&effective, cli.output)
        }
    }
}
