//! Evaluation context shared by resolution and ranking.

use chrono::{Datelike, Days, Local, NaiveDate, Weekday};

use crate::error::ParseError;

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// The "now" every derived field is computed against.
///
/// Resolving the same record under two contexts may give different
/// status, due, and defer values. Tests build contexts with [`PlanContext::on`];
/// hosts usually call [`PlanContext::today`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanContext {
    today: NaiveDate,
    /// Next date on or after `today` for each weekday, indexed Monday-first.
    next_weekdays: [NaiveDate; 7],
}

impl PlanContext {
    /// Creates a context anchored at the given date.
    pub fn on(today: NaiveDate) -> Self {
        let next_weekdays = WEEK.map(|weekday| {
            let ahead = (7 + weekday.num_days_from_monday()
                - today.weekday().num_days_from_monday())
                % 7;
            today
                .checked_add_days(Days::new(u64::from(ahead)))
                .unwrap_or(NaiveDate::MAX)
        });
        Self {
            today,
            next_weekdays,
        }
    }

    /// Creates a context anchored at the local calendar date.
    pub fn today() -> Self {
        Self::on(Local::now().date_naive())
    }

    /// The anchor date.
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.today
    }

    /// The first date on or after today that falls on `weekday`.
    pub fn next_weekday(&self, weekday: Weekday) -> NaiveDate {
        self.next_weekdays[weekday.num_days_from_monday() as usize]
    }

    /// Today shifted by a signed number of days.
    ///
    /// Saturates at [`NaiveDate::MIN`] / [`NaiveDate::MAX`].
    pub fn offset(&self, days: i64) -> NaiveDate {
        let shift = Days::new(days.unsigned_abs());
        if days >= 0 {
            self.today.checked_add_days(shift).unwrap_or(NaiveDate::MAX)
        } else {
            self.today.checked_sub_days(shift).unwrap_or(NaiveDate::MIN)
        }
    }

    /// Replaces absent or past dates with today.
    pub fn clamp_to_today(&self, date: Option<NaiveDate>) -> NaiveDate {
        match date {
            Some(d) if d > self.today => d,
            _ => self.today,
        }
    }
}

/// Parses a weekday name (`"Monday"`, `"mon"`, case-insensitive).
pub fn parse_weekday(s: &str) -> Result<Weekday, ParseError> {
    s.trim()
        .parse::<Weekday>()
        .map_err(|_| ParseError::Weekday(s.to_string()))
}

/// Full English weekday name, as written in project records.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
