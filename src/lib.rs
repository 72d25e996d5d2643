/// Sentiments - correlate a tweet corpus with a price series
///
/// This library loads the two input files into NUL-terminated buffers and
/// hands them to an external correlation library. The correlation itself is
/// supplied through the `Runtime` and `Correlator` traits.

pub mod config;
pub mod core;
pub mod error;
pub mod utils;

// Re-export the main types for convenience
pub use crate::core::bridge::{Correlator, FnRuntime, Runtime, UnavailableRuntime};
pub use crate::core::loader::{load_corpus, Corpus};
#[cfg(feature = "native")]
pub use crate::core::native::NativeRuntime;
pub use crate::core::pipeline::{run, InputPaths, RunOptions};
pub use crate::error::{Result, SentimentError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Correlate two files with a plain function and return the coefficient
///
/// This is a convenience function for simple use cases; nothing is printed.
///
/// # Arguments
///
/// * `tweets` - Path to the tweet corpus
/// * `prices` - Path to the price series
/// * `correlate` - Function receiving the price bytes, then the tweet bytes
pub fn correlate_files<P, Q, F>(tweets: P, prices: Q, correlate: F) -> Result<f64>
where
    P: AsRef<std::path::Path>,
    Q: AsRef<std::path::Path>,
    F: Fn(&[u8], &[u8]) -> f64,
{
    let tweets = load_corpus(tweets)?;
    let prices = load_corpus(prices)?;
    Ok(correlate(prices.as_bytes(), tweets.as_bytes()))
}
