//! yrg - gamut-boundary chroma from the command line
//!
//! Solves, tabulates and prints the Yrg boundary chroma formula.

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "yrg")]
#[command(author, version, about = "Yrg gamut-boundary chroma solver")]
#[command(long_about = "
Computes the chroma at which a Yrg colour of given luminance and hue
reaches the black or white point of a display channel.

Examples:
  yrg solve -l 0.5 --hue 0 --channel red          # red reaches white
  yrg solve -l 0.5 --hue 0 --extreme black        # all channels, black
  yrg solve -l 0.5 --hue 0 --row 4.97,-4.92,0.32  # explicit matrix row
  yrg max-chroma -l 0.5 --hue 120 -p rec2020      # in-gamut limit
  yrg max-chroma -l 0.5 --hue 40 -e 0.05,0.95     # keep a margin from the extremes
  yrg table -l 0.18 --steps 72                    # limit around the hue circle
  yrg formula --style c                           # closed form for C source
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Machine-readable output (JSON)
    #[arg(long, global = true)]
    json: bool,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Chroma at which one channel reaches an extreme
    #[command(visible_alias = "s")]
    Solve(SolveArgs),

    /// Print the closed-form boundary chroma formula
    #[command(visible_alias = "f")]
    Formula(FormulaArgs),

    /// Largest in-gamut chroma at one luminance and hue
    #[command(name = "max-chroma", visible_alias = "m")]
    MaxChroma(MaxChromaArgs),

    /// Largest in-gamut chroma around the hue circle
    #[command(visible_alias = "t")]
    Table(TableArgs),
}

/// Arguments for the `solve` command.
#[derive(Args)]
struct SolveArgs {
    /// Luminance Y
    #[arg(short, long)]
    luminance: f64,

    /// Hue angle (degrees unless --radians)
    #[arg(long, allow_negative_numbers = true)]
    hue: f64,

    /// Interpret --hue in radians
    #[arg(long)]
    radians: bool,

    /// Output channel: red, green, blue (default: all)
    #[arg(short, long, conflicts_with = "row")]
    channel: Option<String>,

    /// Explicit LMS -> RGB row "a1,a2,a3"
    #[arg(long, allow_hyphen_values = true)]
    row: Option<String>,

    /// Display primaries: srgb, p3, adobergb, rec2020
    #[arg(short, long, default_value = "srgb")]
    primaries: String,

    /// Target: black, white or a number
    #[arg(short, long, default_value = "white", allow_hyphen_values = true)]
    extreme: String,

    /// Solve by bisection instead of the closed form
    #[arg(long)]
    numeric: bool,

    /// Upper chroma of the numeric scan
    #[arg(long, default_value = "1.0")]
    max_chroma: f64,

    /// Scan intervals of the numeric solve
    #[arg(long, default_value = "256")]
    samples: usize,
}

/// Arguments for the `formula` command.
#[derive(Args)]
struct FormulaArgs {
    /// Output style: math, c
    #[arg(short, long, default_value = "math")]
    style: String,
}

/// Arguments for the `max-chroma` command.
#[derive(Args)]
struct MaxChromaArgs {
    /// Luminance Y
    #[arg(short, long)]
    luminance: f64,

    /// Hue angle (degrees unless --radians)
    #[arg(long, allow_negative_numbers = true)]
    hue: f64,

    /// Interpret --hue in radians
    #[arg(long)]
    radians: bool,

    /// Display primaries: srgb, p3, adobergb, rec2020
    #[arg(short, long, default_value = "srgb")]
    primaries: String,

    /// List every candidate, not only the limiting one
    #[arg(short, long)]
    all: bool,

    /// Boundary targets: comma-separated black, white or numbers
    #[arg(short, long = "extreme", value_delimiter = ',', default_values = ["black", "white"], allow_hyphen_values = true)]
    extremes: Vec<String>,
}

/// Arguments for the `table` command.
#[derive(Args)]
struct TableArgs {
    /// Luminance Y
    #[arg(short, long)]
    luminance: f64,

    /// Number of hues over the full circle
    #[arg(short, long, default_value = "36")]
    steps: usize,

    /// Display primaries: srgb, p3, adobergb, rec2020
    #[arg(short, long, default_value = "srgb")]
    primaries: String,

    /// Boundary targets: comma-separated black, white or numbers
    #[arg(short, long = "extreme", value_delimiter = ',', default_values = ["black", "white"], allow_hyphen_values = true)]
    extremes: Vec<String>,
}

/// Installs the tracing subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match log_file {
        Some(path) => {
            let name = path
                .file_name()
                .with_context(|| format!("Invalid log file: {}", path.display()))?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .try_init()
                .map_err(|e| anyhow!("Failed to install logger: {e}"))?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| anyhow!("Failed to install logger: {e}"))?;
            Ok(None)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Solve(args) => commands::solve::run(args, cli.verbose, cli.json),
        Commands::Formula(args) => commands::formula::run(args, cli.verbose, cli.json),
        Commands::MaxChroma(args) => commands::max_chroma::run(args, cli.verbose, cli.json),
        Commands::Table(args) => commands::table::run(args, cli.verbose, cli.json),
    }
}
