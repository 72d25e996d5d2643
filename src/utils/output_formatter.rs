/// Output formatting for the correlation result
///
/// The result line mirrors the native launcher's `printf("Correlation %f\n")`,
/// so finite values carry six fractional digits and non-finite ones use C's
/// `nan`/`inf` spellings.

use crate::utils::input_summary::{PriceSummary, TweetSummary};

/// Format the single result line, without the trailing newline
pub fn format_correlation(value: f64) -> String {
    format!("Correlation {}", format_c_double(value))
}

/// `%f` rendering, including C's spelling of non-finite values
fn format_c_double(value: f64) -> String {
    if value.is_nan() {
        let spelling = if value.is_sign_negative() { "-nan" } else { "nan" };
        spelling.to_string()
    } else if value.is_infinite() {
        let spelling = if value.is_sign_negative() { "-inf" } else { "inf" };
        spelling.to_string()
    } else {
        format!("{:.6}", value)
    }
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Format the --check report for both inputs
pub fn format_summary(tweets: &TweetSummary, prices: &PriceSummary) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Tweets: {} (from {} to {})\n",
        tweets.count,
        or_dash(tweets.earliest.map(|t| t.format("%Y-%m-%d %H:%M:%S"))),
        or_dash(tweets.latest.map(|t| t.format("%Y-%m-%d %H:%M:%S"))),
    ));
    output.push_str(&format!(
        "Prices: {} (from {} to {}, usd {} .. {})\n",
        prices.count,
        or_dash(prices.first),
        or_dash(prices.last),
        or_dash(prices.min_usd.map(|v| format!("{:.2}", v))),
        or_dash(prices.max_usd.map(|v| format!("{:.2}", v))),
    ));

    output
}
