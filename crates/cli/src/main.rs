//! RFP Analyzer CLI
//!
//! Searches an RFP index and asks a hosted model for an answer grounded in
//! the retrieved documents.

mod commands;

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use commands::{AskCommand, GenerateCommand, SearchCommand};
use rfp_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// RFP Analyzer - grounded answers over an RFP search index
#[derive(Parser, Debug)]
#[command(name = "rfp")]
#[command(about = "Grounded answers over an RFP search index", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to YAML config file (default: ./rfp.yaml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Search index name
    #[arg(long, global = true)]
    index: Option<String>,

    /// Model deployment name
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Run the default analysis once, non-interactively
    #[arg(long)]
    cli: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search the index without calling the model
    Search(SearchCommand),

    /// Search, then answer from the results
    Ask(AskCommand),

    /// Answer from supplied records and documents without searching
    Generate(GenerateCommand),
}

/// Pick the command to run: exactly one of `--cli` or a subcommand.
fn resolve_command(command: Option<Commands>, cli: bool) -> Result<Commands, clap::Error> {
    match (command, cli) {
        (Some(command), false) => Ok(command),
        (None, true) => Ok(Commands::Ask(AskCommand::default())),
        (Some(_), true) => Err(Cli::command().error(
            ErrorKind::ArgumentConflict,
            "--cli cannot be used with a subcommand",
        )),
        (None, false) => Err(Cli::command().error(
            ErrorKind::MissingSubcommand,
            "a subcommand or --cli is required",
        )),
    }
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let command = resolve_command(cli.command, cli.cli).unwrap_or_else(|e| e.exit());

    let config = AppConfig::load(cli.config.as_deref())?.with_overrides(
        cli.index,
        cli.model,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("RFP Analyzer starting");
    tracing::debug!("Config: {:?}", config);

    let command_name = match &command {
        Commands::Search(_) => "search",
        Commands::Ask(_) => "ask",
        Commands::Generate(_) => "generate",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match command {
        Commands::Search(cmd) => cmd.execute(&config).await,
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Generate(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
