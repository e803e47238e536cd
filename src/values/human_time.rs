//! Human-friendly relative time parsing ("2 hours", "tomorrow", "1d 12h").
//!
//! The parser consumes as many time expressions as it can from the start of
//! the input. Whatever is left over is reported, because a caller storing a
//! duration has no use for trailing free text.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;
use time::{Duration, OffsetDateTime};

static UNIT_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)^\s*(?:and\s+|,\s*)?
        (?P<amount>\d+(?:\.\d+)?|an?)\s*
        (?P<unit>years?|y|months?|mo|weeks?|w|days?|d|hours?|hrs?|h|minutes?|mins?|m|seconds?|secs?|s)
        \b",
    )
    .expect("time unit pattern is valid")
});

static KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?P<word>now|today|tomorrow)\b").expect("time keyword pattern is valid")
});

static LEADING_IN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*in\s+").expect("leading 'in' pattern is valid"));

/// Error reported by [`parse`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HumanTimeError {
    /// Nothing at the start of the input looked like a time
    #[error("Invalid time provided.")]
    Unrecognized,
    /// A time was found but unconsumed text followed it
    #[error("Unexpected text after the time: \"{0}\".")]
    TrailingInput(String),
}

/// A successfully parsed time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTime {
    /// Absolute time the expression resolves to
    pub dt: OffsetDateTime,
    /// Unconsumed remainder of the input (trimmed)
    pub arg: String,
}

/// Parse a relative time expression anchored at `now`.
///
/// Returns the resolved absolute time along with any text left after the
/// last recognized expression.
///
/// # Errors
///
/// Returns [`HumanTimeError::Unrecognized`] if the input does not start with
/// a time expression.
pub fn parse(input: &str, now: OffsetDateTime) -> Result<ParsedTime, HumanTimeError> {
    let mut rest = LEADING_IN
        .find(input)
        .map_or(input, |m| &input[m.end()..]);
    let mut offset = Duration::ZERO;
    let mut consumed = false;

    loop {
        if let Some(caps) = KEYWORD.captures(rest) {
            if caps["word"].eq_ignore_ascii_case("tomorrow") {
                offset = offset
                    .checked_add(Duration::days(1))
                    .ok_or(HumanTimeError::Unrecognized)?;
            }
            consumed = true;
            rest = &rest[caps.get(0).map_or(0, |m| m.end())..];
            continue;
        }

        let Some(caps) = UNIT_TOKEN.captures(rest) else {
            break;
        };
        let amount = match caps["amount"].to_lowercase().as_str() {
            "a" | "an" => 1.0,
            n => n.parse::<f64>().map_err(|_| HumanTimeError::Unrecognized)?,
        };
        let seconds = unit_length(&caps["unit"]).as_seconds_f64() * amount;
        let step = Duration::checked_seconds_f64(seconds).ok_or(HumanTimeError::Unrecognized)?;
        offset = offset
            .checked_add(step)
            .ok_or(HumanTimeError::Unrecognized)?;
        consumed = true;
        rest = &rest[caps.get(0).map_or(0, |m| m.end())..];
    }

    if !consumed {
        return Err(HumanTimeError::Unrecognized);
    }

    let dt = now
        .checked_add(offset)
        .ok_or(HumanTimeError::Unrecognized)?;
    Ok(ParsedTime {
        dt,
        arg: rest.trim().to_string(),
    })
}

/// Parse a relative time and require that all input was consumed.
///
/// # Errors
///
/// Returns [`HumanTimeError::TrailingInput`] when text follows the time, or
/// [`HumanTimeError::Unrecognized`] when no time was found.
pub fn parse_exact(input: &str, now: OffsetDateTime) -> Result<OffsetDateTime, HumanTimeError> {
    let parsed = parse(input, now)?;
    if parsed.arg.is_empty() {
        Ok(parsed.dt)
    } else {
        Err(HumanTimeError::TrailingInput(parsed.arg))
    }
}

fn unit_length(unit: &str) -> Duration {
    let unit = unit.to_lowercase();
    match unit.as_str() {
        "y" | "year" | "years" => Duration::days(365),
        "mo" | "month" | "months" => Duration::days(30),
        "w" | "week" | "weeks" => Duration::weeks(1),
        "d" | "day" | "days" => Duration::days(1),
        "h" | "hr" | "hrs" | "hour" | "hours" => Duration::hours(1),
        "m" | "min" | "mins" | "minute" | "minutes" => Duration::minutes(1),
        _ => Duration::seconds(1),
    }
}
