/// Sentiments - correlate tweet sentiment with the ether price
///
/// The main entry point. Reads the tweet corpus and the price series, passes
/// them to the native correlation library and prints the coefficient.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use colored::Colorize;
use log::{error, info, LevelFilter};

use sentiments::config::{load_config, FileConfig};
use sentiments::{run, RunOptions, SentimentError};

/// Command line argument structure
#[derive(Parser, Debug)]
#[command(
    name = "sentiments",
    version,
    about = "Correlate tweet sentiment with the ether price",
    long_about = "Reads a tweet corpus and a price series, hands both to the native
correlation library and prints the resulting coefficient.

With no arguments the inputs are read from data/ether-tweets and
data/eth-price.csv."
)]
struct Args {
    /// Tweet corpus (default: data/ether-tweets)
    #[arg(long = "tweets")]
    tweets: Option<PathBuf>,

    /// Price series (default: data/eth-price.csv)
    #[arg(long = "prices")]
    prices: Option<PathBuf>,

    /// Path to JSON configuration file
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Summarize both inputs before correlating
    #[arg(long = "check", action = ArgAction::SetTrue)]
    check: bool,

    /// Set logging level (default: warn)
    #[arg(long = "log-level")]
    log_level: Option<LevelFilter>,

    /// Write logs to this file instead of stderr
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Any other arguments are accepted and ignored
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    _ignored: Vec<String>,
}

/// Main entry point function
fn main() {
    let args = Args::parse();

    let code = match execute(&args) {
        Ok(_) => 0,
        Err(e) => {
            error!("{}", e);
            eprintln!("{} {}", "Error:".red().bold(), e);
            e.exit_code()
        }
    };

    process::exit(code);
}

/// Resolve configuration, set up logging and run the pipeline
fn execute(args: &Args) -> std::result::Result<f64, SentimentError> {
    let config = load_config(args.config.as_deref())?;

    let log_level = resolve_log_level(args, &config)?;
    let log_file = args.log_file.clone().or_else(|| config.log_file.clone());
    if let Err(e) = setup_logging(log_level, log_file.as_deref()) {
        eprintln!("{} {:#}", "Warning:".yellow(), e);
    }
    if let Some(path) = &args.config {
        info!("Loaded configuration from {}", path.display());
    }

    let options = RunOptions {
        paths: config.input_paths(args.tweets.clone(), args.prices.clone()),
        check_inputs: args.check || config.check.unwrap_or(false),
    };
    info!(
        "Correlating {} with {}",
        options.paths.prices.display(),
        options.paths.tweets.display()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&runtime(), &options, &mut out)
}

/// Log level: command line, then configuration file, then warn
fn resolve_log_level(args: &Args, config: &FileConfig) -> std::result::Result<LevelFilter, SentimentError> {
    if let Some(level) = args.log_level {
        return Ok(level);
    }

    match &config.log_level {
        Some(level) => level.parse().map_err(|_| SentimentError::Config {
            path: args.config.clone().unwrap_or_default(),
            reason: format!("unknown log level {:?}", level),
        }),
        None => Ok(LevelFilter::Warn),
    }
}

/// Set up logging to stderr or to a file
fn setup_logging(level: LevelFilter, log_file: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::Builder::new();

    builder.filter_level(level);

    builder.format(|buf, record| {
        use chrono::Local;
        use std::io::Write;
        writeln!(
            buf,
            "{} - {} - {} - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init().context("Failed to initialize logger")?;

    Ok(())
}

#[cfg(feature = "native")]
fn runtime() -> sentiments::NativeRuntime {
    sentiments::NativeRuntime
}

#[cfg(not(feature = "native"))]
fn runtime() -> sentiments::UnavailableRuntime {
    sentiments::UnavailableRuntime
}
