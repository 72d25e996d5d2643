/// Pre-flight inspection of the input corpora
///
/// The correlation library parses the inputs itself. This module only reads
/// enough of them to report what is about to be correlated, and to fail early
/// with a readable message when a file has the wrong shape:
///
/// - tweets: one JSON object per line with `text` (string) and `time`
///   (epoch milliseconds). Trailing empty lines are dropped; any other blank
///   line is an error, as it is for the library.
/// - prices: a JSON document `{"data": [{"time": "...Z", "usd": ...}]}`

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::core::loader::Corpus;
use crate::error::{Result, SentimentError};

/// Timestamp layout of price points, up to the millisecond fraction
const PRICE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Deserialize)]
struct TweetRecord {
    #[serde(rename = "text")]
    _text: String,
    time: i64,
}

#[derive(Debug, Deserialize)]
struct PriceDocument {
    data: Vec<PriceRecord>,
}

#[derive(Debug, Deserialize)]
struct PriceRecord {
    time: String,
    usd: Value,
}

/// What the tweet corpus contains
#[derive(Debug, Clone, PartialEq)]
pub struct TweetSummary {
    pub count: usize,
    pub earliest: Option<DateTime<Utc>>,
    pub latest: Option<DateTime<Utc>>,
}

/// What the price series contains
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSummary {
    pub count: usize,
    pub first: Option<NaiveDateTime>,
    pub last: Option<NaiveDateTime>,
    pub min_usd: Option<f64>,
    pub max_usd: Option<f64>,
}

fn malformed(corpus: &Corpus, reason: impl Into<String>) -> SentimentError {
    SentimentError::MalformedInput {
        path: corpus.path().to_path_buf(),
        reason: reason.into(),
    }
}

fn as_text(corpus: &Corpus) -> Result<&str> {
    std::str::from_utf8(corpus.as_bytes())
        .map_err(|e| malformed(corpus, format!("not valid UTF-8: {}", e)))
}

/// Split the corpus into tweet lines.
///
/// Text without a newline is a single line, even when empty. Otherwise the
/// empty lines at the end are dropped and all others are kept.
fn tweet_lines(text: &str) -> Vec<&str> {
    if !text.contains('\n') {
        return vec![text];
    }

    let mut lines: Vec<&str> = text.split('\n').collect();
    while lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

/// Count the tweets in a newline-delimited JSON corpus.
pub fn summarize_tweets(corpus: &Corpus) -> Result<TweetSummary> {
    let text = as_text(corpus)?;

    let mut count = 0;
    let mut earliest: Option<i64> = None;
    let mut latest: Option<i64> = None;

    for (index, line) in tweet_lines(text).into_iter().enumerate() {
        let record: TweetRecord = serde_json::from_str(line)
            .map_err(|e| malformed(corpus, format!("line {}: {}", index + 1, e)))?;

        count += 1;
        earliest = Some(earliest.map_or(record.time, |t| t.min(record.time)));
        latest = Some(latest.map_or(record.time, |t| t.max(record.time)));
    }

    Ok(TweetSummary {
        count,
        earliest: earliest.and_then(DateTime::from_timestamp_millis),
        latest: latest.and_then(DateTime::from_timestamp_millis),
    })
}

/// Parse a price timestamp such as `2018-01-01T00:00:00.000Z`.
///
/// The `Z` and the fraction are required. The fraction is read as a count of
/// milliseconds, so `.5` is 5 ms.
fn parse_price_time(raw: &str) -> Option<NaiveDateTime> {
    let (stamp, _) = raw.split_once('Z')?;
    let (seconds, fraction) = stamp.rsplit_once('.')?;
    if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let millis: u32 = fraction.parse().ok()?;
    let time = NaiveDateTime::parse_from_str(seconds, PRICE_TIME_FORMAT).ok()?;
    time.checked_add_signed(Duration::milliseconds(i64::from(millis)))
}

/// The price may be given as a JSON number or as a numeric string
fn parse_usd(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Summarize the price series document.
pub fn summarize_prices(corpus: &Corpus) -> Result<PriceSummary> {
    let text = as_text(corpus)?;

    let document: PriceDocument = serde_json::from_str(text)
        .map_err(|e| malformed(corpus, format!("invalid price document: {}", e)))?;

    let mut summary = PriceSummary {
        count: 0,
        first: None,
        last: None,
        min_usd: None,
        max_usd: None,
    };

    for (index, record) in document.data.iter().enumerate() {
        let time = parse_price_time(&record.time).ok_or_else(|| {
            malformed(corpus, format!("entry {}: bad time {:?}", index, record.time))
        })?;
        let usd = parse_usd(&record.usd).ok_or_else(|| {
            malformed(corpus, format!("entry {}: bad usd value {}", index, record.usd))
        })?;

        summary.count += 1;
        summary.first.get_or_insert(time);
        summary.last = Some(time);
        summary.min_usd = Some(summary.min_usd.map_or(usd, |m| m.min(usd)));
        summary.max_usd = Some(summary.max_usd.map_or(usd, |m| m.max(usd)));
    }

    Ok(summary)
}
