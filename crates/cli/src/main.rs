//! Almliebe CLI - alm command

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

mod cmd;
mod util;

/// Almliebe - storefront theme behavior from the command line
#[derive(Parser)]
#[command(name = "alm")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/almliebe/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override http.base_url
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a predictive search and print the matches
    Search {
        /// Search query
        query: String,
    },
    /// Inspect and edit the cart
    #[command(subcommand)]
    Cart(CartCommands),
    /// Replay a file of UI events (one JSON object per line) and print the final page
    Replay {
        /// Event file
        file: PathBuf,
        /// Modal ids present on the page
        #[arg(long = "modal")]
        modals: Vec<String>,
        /// Page has no cart drawer
        #[arg(long)]
        no_drawer: bool,
    },
    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum CartCommands {
    /// Show the cart lines and total
    Show,
    /// Add a variant to the cart
    Add {
        /// Variant id
        variant_id: String,
        /// Quantity to add
        #[arg(short, long, default_value = "1")]
        quantity: u32,
        /// Line item property (key=value), repeatable
        #[arg(short, long = "property")]
        properties: Vec<String>,
    },
    /// Set the quantity of a cart line (1-based)
    Change {
        line: u32,
        quantity: String,
    },
    /// Remove a cart line (1-based)
    Remove {
        line: u32,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// List all configuration values
    List,
    /// Get a single configuration value
    Get {
        /// Dotted key, e.g. timing.search_debounce_ms
        key: String,
    },
    /// Show the config file path
    Path {
        /// Create the file with defaults if it does not exist
        #[arg(long)]
        create: bool,
    },
    /// Print an annotated example configuration
    Example,
}

/// Logs go to stderr (or `--log-file`) so stdout stays machine-readable
fn init_tracing(log_file: Option<&PathBuf>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_env("ALM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
            Ok(None)
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Held until exit so buffered log lines are flushed
    let _guard = init_tracing(cli.log_file.as_ref())?;

    let session = util::Session::new(cli.config, cli.base_url);

    match cli.command {
        Commands::Search { query } => cmd::search::run(&session, &query).await,
        Commands::Cart(cart) => match cart {
            CartCommands::Show => cmd::cart::run_show(&session).await,
            CartCommands::Add {
                variant_id,
                quantity,
                properties,
            } => cmd::cart::run_add(&session, &variant_id, quantity, &properties).await,
            CartCommands::Change { line, quantity } => cmd::cart::run_change(&session, line, &quantity).await,
            CartCommands::Remove { line } => cmd::cart::run_remove(&session, line).await,
        },
        Commands::Replay {
            file,
            modals,
            no_drawer,
        } => cmd::replay::run(&session, &file, modals, no_drawer).await,
        Commands::Config(config) => match config {
            ConfigCommands::List => cmd::config::run_list(&session),
            ConfigCommands::Get { key } => cmd::config::run_get(&session, &key),
            ConfigCommands::Path { create } => cmd::config::run_path(&session, create),
            ConfigCommands::Example => cmd::config::run_example(),
        },
    }
}
