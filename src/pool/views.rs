//! Planning views over a pool.
//!
//! Each view selects from the ranked pool and keeps ranked order. Finished
//! work never appears in a view: dropped projects, and done projects unless
//! they recur.
//!
//! | View | Selection |
//! |------|-----------|
//! | `works_in_progress` | status `wip` |
//! | `past_due` | due before today |
//! | `upcoming_due` | due within `upcoming_days` from today |
//! | `recurring_defer` | `last_done + last_for` falls within the window |
//! | `with_externals` | has external commitments |
//! | `tagged` | carries a tag |
//! | `namespace_budgets` / `tag_budgets` | greedy fill of the configured time budget |

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{Project, Status};

use super::Pool;

/// Minutes assumed for a project without a time estimate.
pub const DEFAULT_PROJECT_TIME_ESTIMATE_MIN: u32 = 120;

/// Greedily fills a time budget in the given order.
///
/// Each project that still fits is taken and its estimate subtracted; a
/// project that does not fit is skipped, and later, smaller ones may still
/// be taken.
pub fn projects_in_time<'a, I>(projects: I, budget_minutes: u32) -> Vec<&'a Project>
where
    I: IntoIterator<Item = &'a Project>,
{
    let mut remaining = budget_minutes;
    let mut selected = Vec::new();
    for p in projects {
        let estimate = p
            .time_estimate_minutes()
            .unwrap_or(DEFAULT_PROJECT_TIME_ESTIMATE_MIN);
        if estimate <= remaining {
            remaining -= estimate;
            selected.push(p);
        }
    }
    selected
}

impl Pool {
    fn plannable(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|p| {
            !p.is_terminal() || (p.is_recurring() && p.status() == Status::Done)
        })
    }

    fn window_end(&self) -> NaiveDate {
        self.context.offset(i64::from(self.config.upcoming_days()))
    }

    /// Projects being worked on.
    pub fn works_in_progress(&self) -> Vec<&Project> {
        self.plannable().filter(|p| p.status() == Status::Wip).collect()
    }

    /// Projects whose due date has passed.
    pub fn past_due(&self) -> Vec<&Project> {
        let today = self.context.date();
        self.plannable()
            .filter(|p| p.due().is_some_and(|due| due < today))
            .collect()
    }

    /// Projects due today or within the upcoming window.
    pub fn upcoming_due(&self) -> Vec<&Project> {
        let today = self.context.date();
        let end = self.window_end();
        self.plannable()
            .filter(|p| p.due().is_some_and(|due| today <= due && due <= end))
            .collect()
    }

    /// Recurring "last for" projects whose last completion runs out within
    /// the upcoming window.
    ///
    /// Counts from `last_done` (today if never done) plus `last_for`,
    /// regardless of any explicit defer on the project.
    pub fn recurring_defer(&self) -> Vec<&Project> {
        let today = self.context.date();
        let end = self.window_end();
        self.plannable()
            .filter(|p| {
                p.last_for().is_some_and(|span| {
                    span.after(p.last_done().unwrap_or(today))
                        .is_ok_and(|lapse| lapse <= end)
                })
            })
            .collect()
    }

    /// Projects with external commitments.
    pub fn with_externals(&self) -> Vec<&Project> {
        self.plannable().filter(|p| !p.externals().is_empty()).collect()
    }

    /// Projects carrying `tag`.
    pub fn tagged(&self, tag: &str) -> Vec<&Project> {
        self.plannable()
            .filter(|p| p.tags().iter().any(|t| t == tag))
            .collect()
    }

    /// Per configured namespace, the projects that fit its time budget.
    pub fn namespace_budgets(&self) -> BTreeMap<&str, Vec<&Project>> {
        self.config
            .namespace_budgets()
            .iter()
            .map(|(ns, budget)| {
                let candidates = self
                    .plannable()
                    .filter(|p| p.namespace() == Some(ns.as_str()));
                (ns.as_str(), projects_in_time(candidates, budget.minutes()))
            })
            .collect()
    }

    /// Per configured tag, the projects that fit its time budget.
    pub fn tag_budgets(&self) -> BTreeMap<&str, Vec<&Project>> {
        self.config
            .tag_budgets()
            .iter()
            .map(|(tag, budget)| {
                (tag.as_str(), projects_in_time(self.tagged(tag), budget.minutes()))
            })
            .collect()
    }
}
