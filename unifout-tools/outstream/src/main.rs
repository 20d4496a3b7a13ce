//! Outstream Binary
//!
//! Run with: `unifout-outstream [OPTIONS] [TEXT]`

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use unifout_outstream::{gradient_text, write_color, AnsiEncoder, Config};

#[derive(Parser)]
#[command(name = "unifout-outstream")]
#[command(about = "Print text with a 24-bit color gradient")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Text to color (reads from stdin if not provided)
    #[arg(value_name = "TEXT")]
    text: Option<String>,

    /// Start color as #rrggbb
    #[arg(long)]
    start: Option<String>,

    /// End color as #rrggbb
    #[arg(long)]
    end: Option<String>,

    /// Number of characters to emit (0 = length of the text)
    #[arg(long)]
    steps: Option<usize>,

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
    debug!(?config, "using configuration");

    let text = match &cli.text {
        Some(text) => text.clone(),
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read from stdin")?;
            source.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    let encoder = AnsiEncoder::new().context("Failed to build color encoder")?;
    let colored = gradient_text(&encoder, &text, config.start_rgb(), config.end_rgb(), config.steps)
        .context("Failed to render gradient")?;

    let mut stdout = io::stdout().lock();
    write_color(&mut stdout, &colored)?;
    writeln!(stdout)?;
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
    if let Some(start) = &cli.start {
        config.start = start.clone();
    }
    if let Some(end) = &cli.end {
        config.end = Some(end.clone());
    }
    if let Some(steps) = cli.steps {
        config.steps = steps;
    }

    Ok(config)
}
