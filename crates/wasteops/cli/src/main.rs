//! WasteOps CLI - Access checks and termination audits
//!
//! Support and audit staff use this tool to:
//! - See what a session role may do on the dashboard
//! - Review an auto-termination batch returned by the backend
//! - Validate an institution reference list

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod output;

use commands::{access, audit, institutions};
use config::CliConfig;
use error::CliResult;

/// WasteOps CLI application
#[derive(Parser)]
#[command(name = "wasteops")]
#[command(about = "WasteOps - access checks and contract termination audits", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "WASTEOPS_CONFIG", global = true)]
    config: Option<String>,

    /// Session role (any string; unknown roles are denied everything)
    #[arg(short, long, env = "WASTEOPS_ROLE", global = true)]
    role: Option<String>,

    /// Output format (table, json, yaml)
    #[arg(short, long, global = true)]
    output: Option<output::OutputFormat>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Show every capability for the session role
    Access,

    /// Show how dashboard surfaces render for the session role
    Surfaces,

    /// Review a termination batch
    Audit {
        /// Batch JSON file, or `-` for stdin
        batch: String,

        /// Contract snapshots (JSON array) used to check closing dates
        #[arg(long)]
        contracts: Option<String>,

        /// Flag records whose new end date is not a readable date
        #[arg(long)]
        strict_dates: bool,
    },

    /// Validate an institution reference list
    Institutions {
        /// Directory JSON file (array or paginated page)
        file: String,
    },

    /// Show configuration
    Config,
}

fn main() {
    if let Err(e) = run(Cli::parse()) {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CliResult<()> {
    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    // Load config
    let config = CliConfig::load(cli.config.as_deref())?;
    let role = cli.role.or_else(|| config.default_role.clone());
    let format = cli.output.or(config.output).unwrap_or_default();

    // Execute command
    match cli.command {
        Commands::Access => access::execute(role, format),
        Commands::Surfaces => access::execute_surfaces(role, format),
        Commands::Audit {
            batch,
            contracts,
            strict_dates,
        } => audit::execute(
            audit::AuditArgs {
                batch,
                contracts,
                strict_dates: strict_dates || config.strict_dates,
            },
            format,
        ),
        Commands::Institutions { file } => institutions::execute(&file, format),
        Commands::Config => {
            println!("Role: {:?}", role);
            println!("Output: {:?}", format);
            println!("Config: {:?}", config);
            Ok(())
        }
    }
}
