//! Structure Binary
//!
//! Run with: `unifout-structure [OPTIONS] [FILE]`

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use unifout_structure::{render_reader, Config, TreeStyle};

#[derive(Parser)]
#[command(name = "unifout-structure")]
#[command(about = "Render an indented outline as a directory tree")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Outline file (reads from stdin if not provided)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Write the tree to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Depth marker character
    #[arg(short, long)]
    marker: Option<char>,

    /// Draw connectors with ASCII characters
    #[arg(long)]
    ascii: bool,

    /// Configuration file path
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the default configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    if let Some(Commands::Config) = &cli.command {
        let config = Config::default();
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let config = build_config(&cli)?;

    let tree = match &cli.file {
        Some(path) => {
            debug!("Reading: {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("Failed to open file: {}", path.display()))?;
            render_reader(BufReader::new(file), &config)
                .with_context(|| format!("Failed to read file: {}", path.display()))?
        }
        None => render_reader(io::stdin().lock(), &config).context("Failed to read from stdin")?,
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, format!("{tree}\n"))
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{}", tree),
    }

    Ok(())
}

fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?
    } else {
        Config::default()
    };

    // Override with CLI options
    if let Some(marker) = cli.marker {
        config.marker = marker;
    }
    if cli.ascii {
        config.style = TreeStyle::Ascii;
    }

    Ok(config)
}
