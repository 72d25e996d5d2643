/// Load-and-invoke pipeline
///
/// Start the runtime, load the tweet corpus, load the price series, call the
/// correlation function with prices first, print the result. The runtime is
/// started before anything is read so that an initialization failure leaves
/// the inputs untouched.

use std::io::Write;
use std::path::PathBuf;

use log::info;

use crate::core::bridge::{Correlator, Runtime};
use crate::core::loader::load_corpus;
use crate::error::{Result, SentimentError};
use crate::utils::input_summary::{summarize_prices, summarize_tweets};
use crate::utils::output_formatter::{format_correlation, format_summary};

/// Default tweet corpus, relative to the working directory
pub const DEFAULT_TWEETS_PATH: &str = "data/ether-tweets";

/// Default price series, relative to the working directory
pub const DEFAULT_PRICES_PATH: &str = "data/eth-price.csv";

/// Locations of the two inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPaths {
    pub tweets: PathBuf,
    pub prices: PathBuf,
}

impl Default for InputPaths {
    fn default() -> Self {
        Self {
            tweets: PathBuf::from(DEFAULT_TWEETS_PATH),
            prices: PathBuf::from(DEFAULT_PRICES_PATH),
        }
    }
}

/// Options for one pipeline run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub paths: InputPaths,
    /// Summarize both inputs before correlating
    pub check_inputs: bool,
}

fn write_output<W: Write>(out: &mut W, text: &str) -> Result<()> {
    out.write_all(text.as_bytes())
        .and_then(|_| out.flush())
        .map_err(|source| SentimentError::Io {
            path: PathBuf::from("<stdout>"),
            source,
        })
}

/// Run the pipeline once and write the result line to `out`.
///
/// # Arguments
///
/// * `runtime` - Correlation backend
/// * `options` - Input paths and flags
/// * `out` - Destination of the result line
///
/// # Returns
///
/// The correlation coefficient returned by the backend
pub fn run<R: Runtime, W: Write>(runtime: &R, options: &RunOptions, out: &mut W) -> Result<f64> {
    let mut session = runtime.start()?;

    let tweets = load_corpus(&options.paths.tweets)?;
    let prices = load_corpus(&options.paths.prices)?;
    info!(
        "Loaded {} tweet bytes and {} price bytes",
        tweets.len(),
        prices.len()
    );

    if options.check_inputs {
        let tweet_summary = summarize_tweets(&tweets)?;
        let price_summary = summarize_prices(&prices)?;
        info!(
            "Input check passed: {} tweets, {} price points",
            tweet_summary.count, price_summary.count
        );
        write_output(out, &format_summary(&tweet_summary, &price_summary))?;
    }

    let correlation = session.correlate(&prices, &tweets);
    drop(tweets);
    drop(prices);

    info!("Correlation computed: {}", correlation);
    write_output(out, &format!("{}\n", format_correlation(correlation)))?;

    Ok(correlation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bridge::FnRuntime;

    #[test]
    fn test_default_paths() {
        let paths = InputPaths::default();
        assert_eq!(paths.tweets, PathBuf::from("data/ether-tweets"));
        assert_eq!(paths.prices, PathBuf::from("data/eth-price.csv"));
    }

    #[test]
    fn test_missing_tweets_stops_before_prices() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let options = RunOptions {
            paths: InputPaths {
                tweets: dir.path().join("missing-tweets"),
                prices: dir.path().join("missing-prices"),
            },
            check_inputs: false,
        };

        let runtime = FnRuntime::new(|_: &[u8], _: &[u8]| panic!("must not be called"));
        let mut out = Vec::new();
        match run(&runtime, &options, &mut out) {
            Err(SentimentError::FileNotFound { path }) => {
                assert_eq!(path, dir.path().join("missing-tweets"))
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(out.is_empty());
    }
}
