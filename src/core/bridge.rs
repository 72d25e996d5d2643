/// Boundary to the external correlation library
///
/// The correlation algorithm lives outside this crate. A `Runtime` performs
/// the one-time initialization (creating an isolate for the native library)
/// and hands back a session that owns whatever handle the call needs.

use std::cell::Cell;
use std::convert::Infallible;

use crate::core::loader::Corpus;
use crate::error::{Result, SentimentError};

/// Something that can correlate a price series with a tweet corpus
pub trait Correlator {
    /// Compute the correlation coefficient. Prices come first.
    fn correlate(&mut self, prices: &Corpus, tweets: &Corpus) -> f64;
}

/// One-time setup of the correlation backend
pub trait Runtime {
    type Session: Correlator;

    /// Initialize the backend. Called once, before any file is read.
    fn start(&self) -> Result<Self::Session>;
}

/// Runtime backed by a plain function over the raw file bytes.
///
/// This is the boundary without an isolate; the function receives the price
/// bytes followed by the tweet bytes. The function moves into the session on
/// the first `start`, so a second start fails.
pub struct FnRuntime<F> {
    func: Cell<Option<F>>,
}

impl<F> FnRuntime<F>
where
    F: FnMut(&[u8], &[u8]) -> f64,
{
    pub fn new(func: F) -> Self {
        Self {
            func: Cell::new(Some(func)),
        }
    }
}

impl<F> Runtime for FnRuntime<F>
where
    F: FnMut(&[u8], &[u8]) -> f64,
{
    type Session = FnSession<F>;

    fn start(&self) -> Result<Self::Session> {
        match self.func.take() {
            Some(func) => Ok(FnSession { func }),
            None => Err(SentimentError::RuntimeInit(
                "correlation function already started".to_string(),
            )),
        }
    }
}

/// Session produced by `FnRuntime`
pub struct FnSession<F> {
    func: F,
}

impl<F> Correlator for FnSession<F>
where
    F: FnMut(&[u8], &[u8]) -> f64,
{
    fn correlate(&mut self, prices: &Corpus, tweets: &Corpus) -> f64 {
        (self.func)(prices.as_bytes(), tweets.as_bytes())
    }
}

/// Stand-in used when the binary is built without a native library
#[derive(Debug, Clone, Default)]
pub struct UnavailableRuntime;

impl Runtime for UnavailableRuntime {
    type Session = Infallible;

    fn start(&self) -> Result<Self::Session> {
        Err(SentimentError::RuntimeInit(
            "no correlation library linked (rebuild with --features native)".to_string(),
        ))
    }
}

impl Correlator for Infallible {
    fn correlate(&mut self, _prices: &Corpus, _tweets: &Corpus) -> f64 {
        match *self {}
    }
}
