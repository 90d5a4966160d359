//! Short human-written durations.
//!
//! Two grammars are recognized:
//!
//! | Kind | Grammar | Unit |
//! |------|---------|------|
//! | Date duration | `<int>d`, `<int>w` (case-insensitive) | days |
//! | Time duration | `<int>h <int>m`, `<int>m`, `<float>h` | minutes |
//!
//! Minute counts render back through [`build_time_duration`], and
//! `parse_time_duration(&build_time_duration(m)) == Ok(m)` for every `m`.

use std::fmt;
use std::sync::LazyLock;

use chrono::{Days, NaiveDate};
use regex::Regex;

use crate::error::ParseError;

static RE_DAYS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+)d$").expect("valid days regex"));
static RE_WEEKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+)w$").expect("valid weeks regex"));
static RE_HOURS_MINUTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+h) (\d+m)$").expect("valid composite regex"));
static RE_MINUTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)m$").expect("valid minutes regex"));
static RE_HOURS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d*)?)h$").expect("valid hours regex"));

/// Parses a date duration into a day count.
///
/// `"10d"` → 10, `"2W"` → 14. Anything else is a [`ParseError::DateDuration`].
pub fn parse_date_duration(s: &str) -> Result<u32, ParseError> {
    let err = || ParseError::DateDuration(s.to_string());
    let trimmed = s.trim();

    if let Some(caps) = RE_DAYS.captures(trimmed) {
        return caps[1].parse::<u32>().map_err(|_| err());
    }
    if let Some(caps) = RE_WEEKS.captures(trimmed) {
        let weeks = caps[1].parse::<u32>().map_err(|_| err())?;
        return weeks.checked_mul(7).ok_or_else(err);
    }

    Err(err())
}

/// Parses a time duration into a minute count.
///
/// Fractional hours are truncated toward zero after conversion
/// (`"1.5h"` → 90, `"0.01h"` → 0).
pub fn parse_time_duration(s: &str) -> Result<u32, ParseError> {
    let err = || ParseError::TimeDuration(s.to_string());
    let trimmed = s.trim();

    if let Some(caps) = RE_HOURS_MINUTES.captures(trimmed) {
        let hours = parse_time_duration(&caps[1])?;
        let minutes = parse_time_duration(&caps[2])?;
        return hours.checked_add(minutes).ok_or_else(err);
    }
    if let Some(caps) = RE_MINUTES.captures(trimmed) {
        return caps[1].parse::<u32>().map_err(|_| err());
    }
    if let Some(caps) = RE_HOURS.captures(trimmed) {
        let hours = caps[1].parse::<f64>().map_err(|_| err())?;
        let minutes = hours * 60.0;
        if !minutes.is_finite() || minutes > f64::from(u32::MAX) {
            return Err(err());
        }
        return Ok(minutes.trunc() as u32);
    }

    Err(err())
}

/// Renders a minute count in canonical form: `"45m"`, `"2h"`, `"2h 30m"`.
pub fn build_time_duration(minutes: u32) -> String {
    if minutes < 60 {
        format!("{minutes}m")
    } else if minutes % 60 == 0 {
        format!("{}h", minutes / 60)
    } else {
        format!("{}h {}m", minutes / 60, minutes % 60)
    }
}

/// A date duration as written, with its parsed day count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySpan {
    text: String,
    days: u32,
}

impl DaySpan {
    /// Parses a date duration, keeping the original text.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        Ok(Self {
            days: parse_date_duration(s)?,
            text: s.to_string(),
        })
    }

    /// Day count.
    #[inline]
    pub fn days(&self) -> u32 {
        self.days
    }

    /// `date` moved forward by this span.
    ///
    /// # Errors
    /// [`ParseError::DateOutOfRange`] when the result is past the calendar limit.
    pub fn after(&self, date: NaiveDate) -> Result<NaiveDate, ParseError> {
        date.checked_add_days(Days::new(u64::from(self.days)))
            .ok_or_else(|| ParseError::DateOutOfRange(self.text.clone()))
    }

    /// `date` moved back by this span.
    ///
    /// # Errors
    /// [`ParseError::DateOutOfRange`] when the result is before the calendar limit.
    pub fn before(&self, date: NaiveDate) -> Result<NaiveDate, ParseError> {
        date.checked_sub_days(Days::new(u64::from(self.days)))
            .ok_or_else(|| ParseError::DateOutOfRange(self.text.clone()))
    }

    /// The text as written.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for DaySpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A time duration as written, with its parsed minute count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSpan {
    text: String,
    minutes: u32,
}

impl TimeSpan {
    /// Parses a time duration, keeping the original text.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        Ok(Self {
            minutes: parse_time_duration(s)?,
            text: s.to_string(),
        })
    }

    /// Builds a span in canonical form.
    pub fn from_minutes(minutes: u32) -> Self {
        Self {
            text: build_time_duration(minutes),
            minutes,
        }
    }

    /// Re-renders the span in canonical form (`"60m"` → `"1h"`).
    pub fn normalized(&self) -> Self {
        Self::from_minutes(self.minutes)
    }

    /// Minute count.
    #[inline]
    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// The text as written.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
