//! Calendar-day values: parsing, formatting, and day arithmetic.
//!
//! A [`DateValue`] is a plain calendar day with no time-of-day and no
//! timezone, backed by a day count rather than any formatted string.
//! Patterns use the chrono strftime tokens (`%d`, `%m`, `%y`, `%Y`, `%B`,
//! `%A`, ...), and both the pattern and the two-digit-year pivot are
//! explicit, never ambient locale defaults.
//!
//! Two-digit-year policy, fixed for reproducibility: `%y` values 00-68
//! parse as 2000-2068 and 69-99 as 1969-1999. Callers needing a different
//! pivot pre-process their input.

use std::fmt::{self, Display, Write};

use chrono::format::ParseErrorKind;
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A calendar day, stored as a day count for arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DateValue(NaiveDate);

impl DateValue {
    /// Build a date from calendar components.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(DateValue)
            .ok_or_else(|| {
                Error::OutOfRange(format!("no such calendar day: {}-{}-{}", year, month, day))
            })
    }

    /// Build a date from a day count (days since the Common Era epoch).
    pub fn from_days(days: i32) -> Result<Self> {
        NaiveDate::from_num_days_from_ce_opt(days)
            .map(DateValue)
            .ok_or_else(|| Error::OutOfRange(format!("day count {} outside calendar range", days)))
    }

    /// The day count backing this date (days since the Common Era epoch).
    pub fn days(&self) -> i32 {
        self.0.num_days_from_ce()
    }

    /// Calendar year.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Calendar month, 1-12.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day of month, 1-31.
    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for DateValue {
    fn from(date: NaiveDate) -> Self {
        DateValue(date)
    }
}

/// Units for expressing the distance between two dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
}

impl TimeUnit {
    /// Fixed conversion ratio: how many of this unit make up one day.
    fn per_day(&self) -> f64 {
        match self {
            TimeUnit::Seconds => 86_400.0,
            TimeUnit::Minutes => 1_440.0,
            TimeUnit::Hours => 24.0,
            TimeUnit::Days => 1.0,
            TimeUnit::Weeks => 1.0 / 7.0,
        }
    }
}

/// Current-day provider, injectable for deterministic tests.
pub trait Clock {
    /// The current calendar day.
    fn today(&self) -> DateValue;
}

/// Clock reading the local civil date from the system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> DateValue {
        DateValue(Local::now().date_naive())
    }
}

/// Today's date from the system clock. Inject a [`Clock`] instead where
/// tests need a fixed day.
pub fn today() -> DateValue {
    SystemClock.today()
}

/// Parse `text` against a strftime-style `pattern`.
///
/// Text that does not match the pattern is a `Format` error; text that
/// matches but names an impossible calendar component (month 13, day 32)
/// is `OutOfRange`.
pub fn parse_date(text: &str, pattern: &str) -> Result<DateValue> {
    NaiveDate::parse_from_str(text, pattern)
        .map(DateValue)
        .map_err(|e| match e.kind() {
            ParseErrorKind::OutOfRange | ParseErrorKind::Impossible => {
                Error::OutOfRange(format!("'{}' with pattern '{}': {}", text, pattern, e))
            }
            _ => Error::Format(format!(
                "cannot parse '{}' with pattern '{}': {}",
                text, pattern, e
            )),
        })
}

/// Format a date under a strftime-style `pattern`.
///
/// A single-token pattern such as `"%A"` or `"%B"` extracts just the
/// weekday or month name. A malformed pattern is a `Format` error, never
/// a panic.
pub fn format_date(date: DateValue, pattern: &str) -> Result<String> {
    let mut out = String::new();
    write!(out, "{}", date.0.format(pattern))
        .map_err(|_| Error::Format(format!("invalid format pattern '{}'", pattern)))?;
    Ok(out)
}

/// Full weekday name ("Monday", ...).
pub fn weekday_name(date: DateValue) -> String {
    date.0.format("%A").to_string()
}

/// Full month name ("January", ...).
pub fn month_name(date: DateValue) -> String {
    date.0.format("%B").to_string()
}

/// Signed whole-day difference `a - b`; positive when `a` is later.
pub fn subtract(a: DateValue, b: DateValue) -> i64 {
    a.0.signed_duration_since(b.0).num_days()
}

/// Day-count difference converted to `unit` via fixed ratios
/// (1 day = 86 400 seconds, 7 days = 1 week).
///
/// Inputs are pure dates, so results for sub-day units are whole multiples
/// of a day; weeks may be fractional.
pub fn difference_in_units(a: DateValue, b: DateValue, unit: TimeUnit) -> f64 {
    subtract(a, b) as f64 * unit.per_day()
}
