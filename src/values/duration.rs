//! ISO-8601 durations
//!
//! Calendar components (years, months) are kept apart from the exact part
//! so `P1M` never silently turns into 30 days on a round-trip.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

static ISO_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<sign>[+-])?P(?:(?P<years>\d+)Y)?(?:(?P<months>\d+)M)?(?:(?P<weeks>\d+(?:[.,]\d+)?)W)?(?:(?P<days>\d+(?:[.,]\d+)?)D)?(?:(?P<t>T)(?:(?P<hours>\d+(?:[.,]\d+)?)H)?(?:(?P<minutes>\d+(?:[.,]\d+)?)M)?(?:(?P<seconds>\d+(?:[.,]\d+)?)S)?)?$",
    )
    .expect("duration pattern is valid")
});

const SECONDS_PER_DAY: i64 = 86_400;
// Larger magnitudes cannot be represented by `time::Duration` in f64 seconds.
const MAX_SECONDS: f64 = 1.0e15;

/// Error returned when a string is not an ISO-8601 duration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unable to parse duration string \"{0}\"")]
pub struct DurationParseError(pub String);

/// An ISO-8601 duration such as `P1Y2M3DT4H5M6S`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IsoDuration {
    /// Calendar years
    pub years: i64,
    /// Calendar months
    pub months: i64,
    /// Exact part (weeks, days, hours, minutes, seconds)
    pub time: time::Duration,
}

impl IsoDuration {
    /// Duration with only an exact part
    pub fn from_time(time: time::Duration) -> Self {
        Self {
            years: 0,
            months: 0,
            time,
        }
    }

    /// Parse an ISO-8601 duration string
    ///
    /// # Errors
    ///
    /// Returns [`DurationParseError`] if `input` is not a valid duration.
    pub fn parse(input: &str) -> Result<Self, DurationParseError> {
        let fail = || DurationParseError(input.to_string());
        let caps = ISO_DURATION.captures(input).ok_or_else(fail)?;

        let date_parts = ["years", "months", "weeks", "days"];
        let time_parts = ["hours", "minutes", "seconds"];
        let has_date = date_parts.iter().any(|n| caps.name(n).is_some());
        let has_time = time_parts.iter().any(|n| caps.name(n).is_some());
        if caps.name("t").is_some() && !has_time {
            return Err(fail());
        }
        if !has_date && !has_time {
            return Err(fail());
        }

        let int = |name: &str| -> Result<i64, DurationParseError> {
            caps.name(name)
                .map_or(Ok(0), |m| m.as_str().parse().map_err(|_| fail()))
        };
        let float = |name: &str| -> Result<f64, DurationParseError> {
            caps.name(name).map_or(Ok(0.0), |m| {
                m.as_str().replace(',', ".").parse().map_err(|_| fail())
            })
        };

        let seconds = float("weeks")? * 7.0 * SECONDS_PER_DAY as f64
            + float("days")? * SECONDS_PER_DAY as f64
            + float("hours")? * 3_600.0
            + float("minutes")? * 60.0
            + float("seconds")?;
        if !seconds.is_finite() || seconds > MAX_SECONDS {
            return Err(fail());
        }

        let mut duration = Self {
            years: int("years")?,
            months: int("months")?,
            time: time::Duration::seconds_f64(seconds),
        };
        if caps.name("sign").is_some_and(|m| m.as_str() == "-") {
            duration = -duration;
        }
        Ok(duration)
    }

    /// Check if every component is zero
    pub fn is_zero(&self) -> bool {
        self.years == 0 && self.months == 0 && self.time.is_zero()
    }
}

impl std::ops::Neg for IsoDuration {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            years: -self.years,
            months: -self.months,
            time: -self.time,
        }
    }
}

impl FromStr for IsoDuration {
    type Err = DurationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for IsoDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("P0D");
        }

        let negative = self.years < 0
            || self.months < 0
            || (self.years == 0 && self.months == 0 && self.time.is_negative());
        if negative {
            f.write_str("-")?;
        }
        f.write_str("P")?;

        if self.years != 0 {
            write!(f, "{}Y", self.years.abs())?;
        }
        if self.months != 0 {
            write!(f, "{}M", self.months.abs())?;
        }

        let exact = self.time.abs();
        let days = exact.whole_days();
        if days != 0 {
            write!(f, "{days}D")?;
        }

        let rest = exact - time::Duration::days(days);
        if !rest.is_zero() {
            f.write_str("T")?;
            let hours = rest.whole_hours();
            let minutes = rest.whole_minutes() % 60;
            let seconds = rest.whole_seconds() % 60;
            let nanos = rest.subsec_nanoseconds();
            if hours != 0 {
                write!(f, "{hours}H")?;
            }
            if minutes != 0 {
                write!(f, "{minutes}M")?;
            }
            if nanos != 0 {
                let fraction = format!("{nanos:09}");
                write!(f, "{seconds}.{}S", fraction.trim_end_matches('0'))?;
            } else if seconds != 0 {
                write!(f, "{seconds}S")?;
            }
        }
        Ok(())
    }
}
