use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use wrapped_core::{AppConfig, ShareTarget};

mod commands;

#[derive(Parser)]
#[command(name = "wrapped")]
#[command(author, version, about = "Your year in review, in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (defaults to ~/.config/wrapped/config.toml)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Args, Clone, Debug, Default)]
pub struct RunArgs {
    /// Skip decorative animation
    #[arg(long)]
    pub reduced_motion: bool,

    /// Read the summary from a JSON file instead of the configured source
    #[arg(short = 'd', long, value_name = "FILE")]
    pub data: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the presentation (default)
    Run(RunArgs),
    /// Share the summary without opening the presentation
    Share {
        /// twitter, whatsapp, copy or native
        target: ShareTarget,
        /// Print the link or text instead of opening it
        #[arg(long)]
        print: bool,
        #[arg(short = 'd', long, value_name = "FILE")]
        data: Option<PathBuf>,
    },
    /// Print the summary as JSON
    Export {
        #[arg(short = 'd', long, value_name = "FILE")]
        data: Option<PathBuf>,
    },
}

/// Log to a file while the TUI owns the terminal, to stderr otherwise
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    if to_file {
        let path = config.log_path();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    let config = Arc::new(config);

    let is_tui = matches!(cli.command, None | Some(Commands::Run(_)));
    init_logging(&config, is_tui)?;

    // Handle commands
    match cli.command {
        Some(Commands::Run(args)) => commands::run::run(config, args).await,
        None => commands::run::run(config, cli.run).await,
        Some(Commands::Share {
            target,
            print,
            data,
        }) => commands::share::run(&config, target, print, data).await,
        Some(Commands::Export { data }) => commands::export::run(&config, data).await,
    }
}
