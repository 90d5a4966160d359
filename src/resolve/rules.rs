//! Status derivation rule table.
//!
//! Rules are evaluated top-down; the first rule that yields a status wins.
//!
//! | # | Rule | Yields |
//! |---|------|--------|
//! | 1 | explicit | the record's `status` |
//! | 2 | dropped_on | `dropped` |
//! | 3 | paused_on | `paused` |
//! | 4 | recurring | recurring status (always yields for recurring projects) |
//! | 5 | tasks | task-based status, if `tasks` or `done` is non-empty |
//! | 6 | completed_on | `done` when no tasks are outstanding |
//! | 7 | fallback | `idea` |
//!
//! An empty `tasks` or `done` list counts as absent: a record written as
//! `tasks: []` falls through rule 5 exactly like one without the key.

use chrono::NaiveDate;

use crate::models::{Resolved, Status};

/// Inputs the status rules look at.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StatusFacts<'a> {
    pub explicit: Option<Status>,
    pub dropped_on: Option<NaiveDate>,
    pub paused_on: Option<NaiveDate>,
    pub completed_on: Option<NaiveDate>,
    pub recurring: bool,
    pub last_done: Option<NaiveDate>,
    pub has_lead_time: bool,
    pub has_last_for: bool,
    pub due: Option<NaiveDate>,
    pub defer: Option<NaiveDate>,
    pub tasks: &'a [String],
    pub done: &'a [String],
    pub today: NaiveDate,
}

type StatusRule = fn(&StatusFacts<'_>) -> Option<Status>;

const STATUS_RULES: [(&str, StatusRule); 7] = [
    ("explicit", |f| f.explicit),
    ("dropped_on", |f| f.dropped_on.map(|_| Status::Dropped)),
    ("paused_on", |f| f.paused_on.map(|_| Status::Paused)),
    ("recurring", recurring_status),
    ("tasks", |f| task_based_status(f.tasks, f.done)),
    ("completed_on", |f| {
        (f.completed_on.is_some() && f.tasks.is_empty()).then_some(Status::Done)
    }),
    ("fallback", |_| Some(Status::Idea)),
];

/// Runs the rule table.
///
/// Returns the status (explicit for rule 1, derived otherwise) and the
/// name of the rule that produced it.
pub(crate) fn derive_status(facts: &StatusFacts<'_>) -> (Resolved<Status>, &'static str) {
    for (i, (name, rule)) in STATUS_RULES.iter().enumerate() {
        if let Some(status) = rule(facts) {
            let resolved = if i == 0 {
                Resolved::explicit(status)
            } else {
                Resolved::derived(status)
            };
            return (resolved, *name);
        }
    }
    (Resolved::derived(Status::Idea), "fallback")
}

/// `wip` with both lists non-empty, `ready` with only tasks, `done` with
/// only completed tasks; `None` when both are empty.
pub(crate) fn task_based_status(tasks: &[String], done: &[String]) -> Option<Status> {
    match (tasks.is_empty(), done.is_empty()) {
        (false, false) => Some(Status::Wip),
        (false, true) => Some(Status::Ready),
        (true, false) => Some(Status::Done),
        (true, true) => None,
    }
}

fn recurring_status(f: &StatusFacts<'_>) -> Option<Status> {
    if !f.recurring {
        return None;
    }
    let fallback = task_based_status(f.tasks, f.done).unwrap_or(Status::Idea);

    // First occurrence: nothing has been completed yet.
    if f.last_done.is_none() {
        return Some(fallback);
    }

    let deferred = f.defer.is_some_and(|d| d > f.today);
    let satisfied = (f.has_lead_time && deferred)
        || (f.has_last_for && deferred)
        || f.due.is_some_and(|d| d > f.today);

    Some(if satisfied { Status::Done } else { fallback })
}
