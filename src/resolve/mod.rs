//! Temporal field resolution.
//!
//! Turns a [`ProjectRecord`] into an immutable [`Project`] by deriving
//! status, due, defer, the normalized time estimate, and the ROI payoff
//! against a [`PlanContext`].
//!
//! # Order of derivation
//! 1. Parse duration and weekday fields.
//! 2. `due` (explicit or recurrence schedule).
//! 3. `defer` (explicit, lead time, or last-for), using the resolved `due`.
//! 4. `status` via the rule table in `rules`.
//! 5. Time estimate and ROI payoff.
//! 6. Completion: a `done` non-recurring project gets `completed_on` and
//!    loses its scheduling fields.
//!
//! # Usage
//!
//! ```
//! use chrono::NaiveDate;
//! use u_plansheet::context::PlanContext;
//! use u_plansheet::models::{ProjectRecord, Status};
//! use u_plansheet::resolve::resolve;
//!
//! let ctx = PlanContext::on(NaiveDate::from_ymd_opt(2024, 5, 15).unwrap());
//! let project = resolve(ProjectRecord::new("taxes").with_tasks(["gather forms"]), &ctx)?;
//! assert_eq!(project.status(), Status::Ready);
//! # Ok::<(), u_plansheet::error::ResolveError>(())
//! ```

mod estimate;
mod rules;
mod schedule;

use tracing::trace;

use crate::context::{parse_weekday, PlanContext};
use crate::duration::{DaySpan, TimeSpan};
use crate::error::{ParseError, ResolveError};
use crate::models::{Project, ProjectRecord, Recurrence, Resolved, Status, TimeRoi};

pub use estimate::{aggregate_time_estimate, task_minutes, time_roi_payoff};

use rules::{derive_status, StatusFacts};
use schedule::{resolve_defer, resolve_due};

/// Resolves one record against `ctx`.
///
/// # Errors
/// Returns a [`ResolveError`] naming the field when a duration or weekday
/// field does not parse, or when a recurrence span moves a date past the
/// calendar limits.
pub fn resolve(record: ProjectRecord, ctx: &PlanContext) -> Result<Project, ResolveError> {
    let field_err = |field: &'static str| {
        let project = record.project.clone();
        move |source: ParseError| ResolveError {
            project,
            field,
            source,
        }
    };

    let recurrence = Recurrence {
        frequency: parse_opt(&record.frequency, DaySpan::parse).map_err(field_err("frequency"))?,
        day_of_week: parse_opt(&record.day_of_week, parse_weekday)
            .map_err(field_err("day_of_week"))?,
        last_done: record.last_done,
        last_for: parse_opt(&record.last_for, DaySpan::parse).map_err(field_err("last_for"))?,
        lead_time: parse_opt(&record.lead_time, DaySpan::parse).map_err(field_err("lead_time"))?,
    };
    let time_roi = TimeRoi {
        daily: parse_opt(&record.daily_time_roi, TimeSpan::parse)
            .map_err(field_err("daily_time_roi"))?,
        weekly: parse_opt(&record.weekly_time_roi, TimeSpan::parse)
            .map_err(field_err("weekly_time_roi"))?,
        yearly: parse_opt(&record.yearly_time_roi, TimeSpan::parse)
            .map_err(field_err("yearly_time_roi"))?,
    };
    let explicit_estimate =
        parse_opt(&record.time_estimate, TimeSpan::parse).map_err(field_err("time_estimate"))?;
    let mut time_estimate = aggregate_time_estimate(&record.tasks, explicit_estimate.as_ref())
        .map_err(field_err("tasks"))?;

    let due = resolve_due(record.due, &recurrence, ctx)
        .map_err(|e| field_err(e.field)(e.source))?;
    let defer = resolve_defer(record.defer, due.map(|d| d.value), &recurrence, ctx)
        .map_err(|e| field_err(e.field)(e.source))?;

    let mut facts = StatusFacts {
        explicit: record.status,
        dropped_on: record.dropped_on,
        paused_on: record.paused_on,
        completed_on: record.completed_on,
        recurring: recurrence.is_recurring(),
        last_done: recurrence.last_done,
        has_lead_time: recurrence.lead_time.is_some(),
        has_last_for: recurrence.last_for.is_some(),
        due: due.map(|d| d.value),
        defer: defer.map(|d| d.value),
        tasks: &record.tasks,
        done: &record.done,
        today: ctx.date(),
    };
    let (mut status, rule) = derive_status(&facts);

    let mut completed_on = record.completed_on;
    let mut time_roi_payoff = Some(estimate::time_roi_payoff(&time_roi, time_estimate.as_ref()));

    if status.value == Status::Done && !facts.recurring {
        let completed = *completed_on.get_or_insert(ctx.date());
        if status.is_explicit() {
            // Keep the explicit status only if the record would not reload as done.
            facts.explicit = None;
            facts.completed_on = Some(completed);
            if derive_status(&facts).0.value == Status::Done {
                status = Resolved::derived(Status::Done);
            }
        }
        time_estimate = None;
        time_roi_payoff = None;
    }

    trace!(
        project = %record.project,
        status = %status.value,
        rule,
        due = ?due.map(|d| d.value),
        defer = ?defer.map(|d| d.value),
        "resolved project"
    );

    Ok(Project {
        name: record.project,
        namespace: record.namespace,
        priority: record.priority.unwrap_or_default(),
        status,
        location: record.location,
        notes: record.notes,
        tasks: record.tasks,
        done: record.done,
        dependencies: record.dependencies,
        externals: record.externals,
        urls: record.urls,
        tags: record.tags,
        due,
        defer,
        recurrence,
        created_on: record.created_on.unwrap_or(ctx.date()),
        completed_on,
        dropped_on: record.dropped_on,
        paused_on: record.paused_on,
        starts_on: record.starts_on,
        last_reviewed: record.last_reviewed,
        time_estimate,
        time_roi,
        time_roi_payoff,
    })
}

/// Resolves a batch of records, stopping at the first failure.
pub fn resolve_all<I>(records: I, ctx: &PlanContext) -> Result<Vec<Project>, ResolveError>
where
    I: IntoIterator<Item = ProjectRecord>,
{
    records.into_iter().map(|r| resolve(r, ctx)).collect()
}

fn parse_opt<T>(
    value: &Option<String>,
    parse: impl Fn(&str) -> Result<T, ParseError>,
) -> Result<Option<T>, ParseError> {
    value.as_deref().map(parse).transpose()
}
