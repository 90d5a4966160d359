//! Pool summary metrics.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Status counts | Projects per status |
//! | Active / terminal | Not done or dropped / done or dropped |
//! | Overdue | Active projects due before today |
//! | Estimated minutes | Sum of time estimates of active projects |
//! | Best ROI | Largest time ROI payoff |

use std::collections::BTreeMap;

use crate::context::PlanContext;
use crate::models::{Project, Status};

use super::views::DEFAULT_PROJECT_TIME_ESTIMATE_MIN;

/// Counts and totals over a project set.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolSummary {
    /// Number of projects per status.
    pub by_status: BTreeMap<Status, usize>,
    /// Projects that are neither done nor dropped.
    pub active: usize,
    /// Done or dropped projects.
    pub terminal: usize,
    /// Active projects past their due date.
    pub overdue: usize,
    /// Sum of active time estimates (minutes); unestimated projects excluded.
    pub estimated_minutes: u64,
    /// Active projects without a time estimate.
    pub unestimated: usize,
    /// Largest ROI payoff among active projects (0 if none).
    pub best_time_roi_payoff: f64,
}

impl PoolSummary {
    /// Computes the summary.
    pub fn calculate(projects: &[Project], ctx: &PlanContext) -> Self {
        let today = ctx.date();
        let mut by_status = BTreeMap::new();
        let mut active = 0;
        let mut overdue = 0;
        let mut estimated_minutes: u64 = 0;
        let mut unestimated = 0;
        let mut best_time_roi_payoff: f64 = 0.0;

        for p in projects {
            *by_status.entry(p.status()).or_insert(0) += 1;
            if p.is_terminal() {
                continue;
            }
            active += 1;

            if p.due().is_some_and(|due| due < today) {
                overdue += 1;
            }
            match p.time_estimate_minutes() {
                Some(minutes) => estimated_minutes += u64::from(minutes),
                None => unestimated += 1,
            }
            best_time_roi_payoff = best_time_roi_payoff.max(p.time_roi_payoff());
        }

        Self {
            by_status,
            active,
            terminal: projects.len() - active,
            overdue,
            estimated_minutes,
            unestimated,
            best_time_roi_payoff,
        }
    }

    /// Number of projects with `status`.
    pub fn count(&self, status: Status) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }

    /// Active workload in minutes, counting unestimated projects at the
    /// default estimate.
    pub fn planned_minutes(&self) -> u64 {
        self.estimated_minutes
            + self.unestimated as u64 * u64::from(DEFAULT_PROJECT_TIME_ESTIMATE_MIN)
    }
}
