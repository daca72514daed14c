//! CLI application for resume extraction and portfolio generation.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use commands::{batch, config, extract, portfolio, templates};

/// Folio - Turn resumes into structured profiles and portfolio sites
#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a profile from a single resume
    Extract(extract::ExtractArgs),

    /// Extract profiles from multiple resumes
    Batch(batch::BatchArgs),

    /// Render a portfolio site from a profile or resume
    Portfolio(portfolio::PortfolioArgs),

    /// List portfolio templates
    Templates,

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Extract(args) => extract::run(args, config_path).await,
        Commands::Batch(args) => batch::run(args, config_path).await,
        Commands::Portfolio(args) => portfolio::run(args, config_path).await,
        Commands::Templates => templates::run().await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}

/// Logs go to stderr so extracted records can be piped from stdout.
/// `RUST_LOG` wins over the `-v` count when set.
fn init_logging(verbose: u8) -> anyhow::Result<()> {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("folio_core={level},folio={level}")));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
