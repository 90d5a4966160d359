//! Resolved project model.
//!
//! A [`Project`] is built once from a [`ProjectRecord`] by
//! [`crate::resolve::resolve`] and never mutated afterwards; ranking only
//! reorders collections of projects.

use std::fmt;

use chrono::{NaiveDate, Weekday};

use super::{Priority, ProjectRecord, Resolved, Status};
use crate::context::weekday_name;
use crate::duration::{DaySpan, TimeSpan};

/// Recurrence descriptors of a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recurrence {
    /// Re-arm interval counted from the last completion; drives `due`.
    pub frequency: Option<DaySpan>,
    /// Weekday the project comes due on.
    pub day_of_week: Option<Weekday>,
    /// Date of the last completion.
    pub last_done: Option<NaiveDate>,
    /// How long a completion stays satisfied; drives `defer`.
    pub last_for: Option<DaySpan>,
    /// How far before `due` the project becomes actionable.
    pub lead_time: Option<DaySpan>,
}

impl Recurrence {
    /// Whether any recurrence trigger is present.
    ///
    /// `lead_time` alone does not make a project recurring.
    pub fn is_recurring(&self) -> bool {
        self.frequency.is_some()
            || self.day_of_week.is_some()
            || self.last_done.is_some()
            || self.last_for.is_some()
    }

    /// Whether the due date regenerates on a schedule.
    pub fn has_recurring_due(&self) -> bool {
        self.frequency.is_some() || self.day_of_week.is_some()
    }
}

/// Time value unlocked by finishing a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeRoi {
    /// Minutes saved per day.
    pub daily: Option<TimeSpan>,
    /// Minutes saved per week.
    pub weekly: Option<TimeSpan>,
    /// Minutes saved per year.
    pub yearly: Option<TimeSpan>,
}

impl TimeRoi {
    /// Annualized minutes saved, from the first present field
    /// (daily × 365, weekly × 52, yearly).
    pub fn yearly_minutes(&self) -> Option<u64> {
        if let Some(daily) = &self.daily {
            Some(u64::from(daily.minutes()) * 365)
        } else if let Some(weekly) = &self.weekly {
            Some(u64::from(weekly.minutes()) * 52)
        } else {
            self.yearly.as_ref().map(|y| u64::from(y.minutes()))
        }
    }
}

/// A resolved project.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub(crate) name: String,
    pub(crate) namespace: Option<String>,
    pub(crate) priority: Priority,
    pub(crate) status: Resolved<Status>,
    pub(crate) location: Option<String>,
    pub(crate) notes: Option<String>,
    pub(crate) tasks: Vec<String>,
    pub(crate) done: Vec<String>,
    pub(crate) dependencies: Vec<String>,
    pub(crate) externals: Vec<String>,
    pub(crate) urls: Vec<String>,
    pub(crate) tags: Vec<String>,
    pub(crate) due: Option<Resolved<NaiveDate>>,
    pub(crate) defer: Option<Resolved<NaiveDate>>,
    pub(crate) recurrence: Recurrence,
    pub(crate) created_on: NaiveDate,
    pub(crate) completed_on: Option<NaiveDate>,
    pub(crate) dropped_on: Option<NaiveDate>,
    pub(crate) paused_on: Option<NaiveDate>,
    pub(crate) starts_on: Option<NaiveDate>,
    pub(crate) last_reviewed: Option<NaiveDate>,
    pub(crate) time_estimate: Option<TimeSpan>,
    pub(crate) time_roi: TimeRoi,
    pub(crate) time_roi_payoff: Option<f64>,
}

impl Project {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Resolved status.
    pub fn status(&self) -> Status {
        self.status.value
    }

    /// Resolved status with its origin.
    pub fn status_resolution(&self) -> Resolved<Status> {
        self.status
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Outstanding tasks.
    pub fn tasks(&self) -> &[String] {
        &self.tasks
    }

    /// Completed tasks.
    pub fn done(&self) -> &[String] {
        &self.done
    }

    /// Names of projects this one depends on, as written.
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub fn externals(&self) -> &[String] {
        &self.externals
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Resolved due date.
    pub fn due(&self) -> Option<NaiveDate> {
        self.due.map(|d| d.value)
    }

    /// Resolved due date with its origin.
    pub fn due_resolution(&self) -> Option<Resolved<NaiveDate>> {
        self.due
    }

    /// Resolved defer date. Stale explicit defers are already dropped.
    pub fn defer(&self) -> Option<NaiveDate> {
        self.defer.map(|d| d.value)
    }

    /// Resolved defer date with its origin.
    pub fn defer_resolution(&self) -> Option<Resolved<NaiveDate>> {
        self.defer
    }

    pub fn recurrence(&self) -> &Recurrence {
        &self.recurrence
    }

    pub fn frequency(&self) -> Option<&DaySpan> {
        self.recurrence.frequency.as_ref()
    }

    pub fn day_of_week(&self) -> Option<Weekday> {
        self.recurrence.day_of_week
    }

    pub fn last_done(&self) -> Option<NaiveDate> {
        self.recurrence.last_done
    }

    pub fn last_for(&self) -> Option<&DaySpan> {
        self.recurrence.last_for.as_ref()
    }

    pub fn lead_time(&self) -> Option<&DaySpan> {
        self.recurrence.lead_time.as_ref()
    }

    /// Creation date; defaults to the resolution date when absent.
    pub fn created_on(&self) -> NaiveDate {
        self.created_on
    }

    pub fn completed_on(&self) -> Option<NaiveDate> {
        self.completed_on
    }

    pub fn dropped_on(&self) -> Option<NaiveDate> {
        self.dropped_on
    }

    pub fn paused_on(&self) -> Option<NaiveDate> {
        self.paused_on
    }

    pub fn starts_on(&self) -> Option<NaiveDate> {
        self.starts_on
    }

    pub fn last_reviewed(&self) -> Option<NaiveDate> {
        self.last_reviewed
    }

    /// Normalized time estimate (`"1h 30m"`).
    pub fn time_estimate(&self) -> Option<&str> {
        self.time_estimate.as_ref().map(TimeSpan::as_str)
    }

    pub fn time_estimate_minutes(&self) -> Option<u32> {
        self.time_estimate.as_ref().map(TimeSpan::minutes)
    }

    pub fn time_roi(&self) -> &TimeRoi {
        &self.time_roi
    }

    /// Annualized minutes saved per minute invested; 0 when unknown.
    pub fn time_roi_payoff(&self) -> f64 {
        self.time_roi_payoff.unwrap_or(0.0)
    }

    /// Whether the project is `done` or `dropped`.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.status.value.is_terminal()
    }

    #[inline]
    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_recurring()
    }

    /// Whether this project lists `other` as a dependency (case-insensitive).
    pub fn depends_on(&self, other: &Project) -> bool {
        self.depends_on_name(&other.name)
    }

    /// Whether this project lists `name` as a dependency (case-insensitive).
    pub fn depends_on_name(&self, name: &str) -> bool {
        self.dependencies
            .iter()
            .any(|dep| dep.to_lowercase() == name.to_lowercase())
    }

    /// Converts back to a record holding only explicit values.
    ///
    /// Derived status, due, and defer are left out so they regenerate on
    /// the next load; the time estimate is written in normalized form.
    pub fn to_record(&self) -> ProjectRecord {
        ProjectRecord {
            project: self.name.clone(),
            namespace: self.namespace.clone(),
            priority: Some(self.priority),
            status: self.status.explicit_value().copied(),
            location: self.location.clone(),
            notes: self.notes.clone(),
            time_estimate: self.time_estimate.as_ref().map(ToString::to_string),
            daily_time_roi: self.time_roi.daily.as_ref().map(ToString::to_string),
            weekly_time_roi: self.time_roi.weekly.as_ref().map(ToString::to_string),
            yearly_time_roi: self.time_roi.yearly.as_ref().map(ToString::to_string),
            day_of_week: self
                .recurrence
                .day_of_week
                .map(|d| weekday_name(d).to_string()),
            frequency: self.recurrence.frequency.as_ref().map(ToString::to_string),
            last_for: self.recurrence.last_for.as_ref().map(ToString::to_string),
            lead_time: self.recurrence.lead_time.as_ref().map(ToString::to_string),
            due: self.due.and_then(|d| d.explicit_value().copied()),
            defer: self.defer.and_then(|d| d.explicit_value().copied()),
            completed_on: self.completed_on,
            dropped_on: self.dropped_on,
            paused_on: self.paused_on,
            created_on: Some(self.created_on),
            starts_on: self.starts_on,
            last_reviewed: self.last_reviewed,
            last_done: self.recurrence.last_done,
            dependencies: self.dependencies.clone(),
            externals: self.externals.clone(),
            urls: self.urls.clone(),
            tasks: self.tasks.clone(),
            done: self.done.clone(),
            tags: self.tags.clone(),
        }
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => writeln!(f, "# {ns} - {}", self.name)?,
            None => writeln!(f, "# {}", self.name)?,
        }

        let strings = [
            ("priority", Some(self.priority.to_string())),
            ("status", Some(self.status.value.to_string())),
            ("location", self.location.clone()),
            ("notes", self.notes.clone()),
            ("time_estimate", self.time_estimate.as_ref().map(ToString::to_string)),
            ("frequency", self.recurrence.frequency.as_ref().map(ToString::to_string)),
            (
                "day_of_week",
                self.recurrence.day_of_week.map(|d| weekday_name(d).to_string()),
            ),
            ("last_for", self.recurrence.last_for.as_ref().map(ToString::to_string)),
            ("lead_time", self.recurrence.lead_time.as_ref().map(ToString::to_string)),
        ];
        for (field, value) in strings {
            if let Some(value) = value {
                writeln!(f, "{field}: {value}")?;
            }
        }

        let dates = [
            ("due", self.due()),
            ("defer", self.defer()),
            ("last_done", self.recurrence.last_done),
            ("completed_on", self.completed_on),
            ("dropped_on", self.dropped_on),
            ("paused_on", self.paused_on),
        ];
        for (field, value) in dates {
            if let Some(value) = value {
                writeln!(f, "{field}: {value}")?;
            }
        }

        let lists = [
            ("dependencies", &self.dependencies),
            ("externals", &self.externals),
            ("urls", &self.urls),
            ("tasks", &self.tasks),
            ("done", &self.done),
            ("tags", &self.tags),
        ];
        for (field, items) in lists {
            if items.is_empty() {
                continue;
            }
            writeln!(f, "{field}:")?;
            for item in items {
                writeln!(f, "- {item}")?;
            }
        }
        Ok(())
    }
}
