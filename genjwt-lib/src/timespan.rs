use regex::Regex;
use std::sync::LazyLock;

const SECOND: f64 = 1000.0;
const MINUTE: f64 = SECOND * 60.0;
const HOUR: f64 = MINUTE * 60.0;
const DAY: f64 = HOUR * 24.0;
const WEEK: f64 = DAY * 7.0;
const YEAR: f64 = DAY * 365.25;

/// Longest input considered, anything above is rejected without matching.
const MAX_LENGTH: usize = 100;

static TIMESPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i-u)^(-?(?:[0-9]+)?\.?[0-9]+) *(milliseconds?|msecs?|ms|seconds?|secs?|s|minutes?|mins?|m|hours?|hrs?|h|days?|d|weeks?|w|years?|yrs?|y)?$",
    )
    .expect("timespan pattern is valid")
});

/// Parses a human readable timespan into milliseconds.
///
/// Accepts a (possibly negative or fractional) number followed by an optional
/// unit, e.g. `"1h"`, `"30m"`, `"2 days"`, `"1.5h"`, `"-10s"`. A bare number is
/// a count of milliseconds.
///
/// # Returns
///
/// * `Some(f64)` - The timespan in milliseconds.
/// * `None` - The input is empty, too long or does not match the grammar.
pub fn parse(value: &str) -> Option<f64> {
    if value.is_empty() || value.len() > MAX_LENGTH {
        return None;
    }

    let captures = TIMESPAN.captures(value)?;
    let amount: f64 = captures.get(1)?.as_str().parse().ok()?;
    let unit = captures
        .get(2)
        .map(|unit| unit.as_str().to_ascii_lowercase())
        .unwrap_or_else(|| "ms".to_string());

    let factor = match unit.as_str() {
        "years" | "year" | "yrs" | "yr" | "y" => YEAR,
        "weeks" | "week" | "w" => WEEK,
        "days" | "day" | "d" => DAY,
        "hours" | "hour" | "hrs" | "hr" | "h" => HOUR,
        "minutes" | "minute" | "mins" | "min" | "m" => MINUTE,
        "seconds" | "second" | "secs" | "sec" | "s" => SECOND,
        "milliseconds" | "millisecond" | "msecs" | "msec" | "ms" => 1.0,
        _ => return None,
    };

    Some(amount * factor)
}

/// Resolves a timespan against a UNIX timestamp, in seconds.
///
/// The result is floored, so `"1500ms"` from `100` gives `101`. A result
/// that doesn't fit an `i64` is rejected rather than clamped.
pub fn resolve(value: &str, timestamp: f64) -> Option<i64> {
    let milliseconds = parse(value)?;
    let seconds = (timestamp + milliseconds / SECOND).floor();
    (seconds.is_finite() && (i64::MIN as f64..i64::MAX as f64).contains(&seconds))
        .then_some(seconds as i64)
}
