//! Built-in comparison keys.
//!
//! # Categories
//!
//! - **State**: completeness, status
//! - **Structure**: dependency
//! - **Importance**: priority, time ROI
//! - **Calendar**: defer, due
//! - **Tie-break**: name
//!
//! All keys follow the chain convention: `Less` ranks `a` first.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{ComparisonKey, SortKey};
use crate::context::PlanContext;
use crate::models::Project;

// ======================== State keys ========================

/// Terminal projects (`done`, `dropped`) rank after all others.
///
/// Two terminal or two active projects compare equal.
#[derive(Debug, Clone, Copy)]
pub struct CompletenessKey;

impl ComparisonKey for CompletenessKey {
    fn name(&self) -> &'static str {
        "completeness"
    }

    fn compare(&self, a: &Project, b: &Project, _ctx: &PlanContext) -> Ordering {
        a.is_terminal().cmp(&b.is_terminal())
    }

    fn description(&self) -> &'static str {
        "Active before done or dropped"
    }
}

/// Status ranking table: wip, ready, blocked, waiting, planning, idea,
/// paused, dropped, done.
#[derive(Debug, Clone, Copy)]
pub struct StatusKey;

impl ComparisonKey for StatusKey {
    fn name(&self) -> &'static str {
        "status"
    }

    fn compare(&self, a: &Project, b: &Project, _ctx: &PlanContext) -> Ordering {
        a.status().cmp(&b.status())
    }

    fn description(&self) -> &'static str {
        "Status ordinal"
    }
}

// ======================== Structure keys ========================

/// A project ranks before the projects that depend on it.
///
/// Mutual dependencies compare equal so the key never contradicts itself.
/// Names match case-insensitively.
///
/// This key only sees direct references and is not transitive; the
/// dependency orderer enforces the full partial order.
#[derive(Debug, Clone, Copy)]
pub struct DependencyKey;

impl ComparisonKey for DependencyKey {
    fn name(&self) -> &'static str {
        "dependency"
    }

    fn compare(&self, a: &Project, b: &Project, _ctx: &PlanContext) -> Ordering {
        match (a.depends_on(b), b.depends_on(a)) {
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            _ => Ordering::Equal,
        }
    }

    fn description(&self) -> &'static str {
        "Dependencies first"
    }
}

// ======================== Importance keys ========================

/// High before medium before low.
#[derive(Debug, Clone, Copy)]
pub struct PriorityKey;

impl ComparisonKey for PriorityKey {
    fn name(&self) -> &'static str {
        "priority"
    }

    fn compare(&self, a: &Project, b: &Project, _ctx: &PlanContext) -> Ordering {
        a.priority().cmp(&b.priority())
    }
}

/// Higher ROI payoff first. Projects without a payoff count as 0.
#[derive(Debug, Clone, Copy)]
pub struct TimeRoiKey;

impl ComparisonKey for TimeRoiKey {
    fn name(&self) -> &'static str {
        "time_roi"
    }

    fn compare(&self, a: &Project, b: &Project, _ctx: &PlanContext) -> Ordering {
        b.time_roi_payoff().total_cmp(&a.time_roi_payoff())
    }

    fn description(&self) -> &'static str {
        "Highest time ROI payoff"
    }
}

// ======================== Calendar keys ========================

/// Sooner actionable first.
///
/// Absent or past defer dates count as today, so only future deferrals
/// push a project down.
#[derive(Debug, Clone, Copy)]
pub struct DeferKey;

impl ComparisonKey for DeferKey {
    fn name(&self) -> &'static str {
        "defer"
    }

    fn compare(&self, a: &Project, b: &Project, ctx: &PlanContext) -> Ordering {
        ctx.clamp_to_today(a.defer())
            .cmp(&ctx.clamp_to_today(b.defer()))
    }

    fn description(&self) -> &'static str {
        "Earliest actionable date"
    }
}

/// Earliest due date first. Projects without a due date go last.
#[derive(Debug, Clone, Copy)]
pub struct DueKey;

impl ComparisonKey for DueKey {
    fn name(&self) -> &'static str {
        "due"
    }

    fn compare(&self, a: &Project, b: &Project, _ctx: &PlanContext) -> Ordering {
        match (a.due(), b.due()) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }

    fn description(&self) -> &'static str {
        "Earliest Due Date"
    }
}

// ======================== Tie-break ========================

/// Lexicographic by name, then by namespace.
#[derive(Debug, Clone, Copy)]
pub struct NameKey;

impl ComparisonKey for NameKey {
    fn name(&self) -> &'static str {
        "name"
    }

    fn compare(&self, a: &Project, b: &Project, _ctx: &PlanContext) -> Ordering {
        a.name()
            .cmp(b.name())
            .then_with(|| a.namespace().cmp(&b.namespace()))
    }
}

/// The built-in key for a configuration name.
pub fn for_sort_key(key: SortKey) -> Arc<dyn ComparisonKey> {
    match key {
        SortKey::Completeness => Arc::new(CompletenessKey),
        SortKey::Dependency => Arc::new(DependencyKey),
        SortKey::Priority => Arc::new(PriorityKey),
        SortKey::Defer => Arc::new(DeferKey),
        SortKey::Due => Arc::new(DueKey),
        SortKey::TimeRoi => Arc::new(TimeRoiKey),
        SortKey::Status => Arc::new(StatusKey),
        SortKey::Name => Arc::new(NameKey),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, ProjectRecord, Status};
    use crate::resolve::resolve;
    use chrono::NaiveDate;

    fn ctx() -> PlanContext {
        PlanContext::on(NaiveDate::from_ymd_opt(2024, 5, 15).unwrap())
    }

    fn project(record: ProjectRecord) -> Project {
        resolve(record, &ctx()).unwrap()
    }

    fn p(name: &str) -> ProjectRecord {
        ProjectRecord::new(name)
    }

    /// Checks `key(a, b) == expected` and `key(b, a) == expected.reverse()`.
    fn check(key: &dyn ComparisonKey, cases: Vec<(ProjectRecord, ProjectRecord, Ordering)>) {
        let ctx = ctx();
        for (a, b, expected) in cases {
            let (a, b) = (project(a), project(b));
            assert_eq!(
                key.compare(&a, &b, &ctx),
                expected,
                "{}({}, {})",
                key.name(),
                a.name(),
                b.name()
            );
            assert_eq!(key.compare(&b, &a, &ctx), expected.reverse());
        }
    }

    #[test]
    fn test_priority_key() {
        use Ordering::*;
        check(
            &PriorityKey,
            vec![
                (p("a"), p("b"), Equal),
                (p("a"), p("b").with_priority(Priority::Low), Equal),
                (
                    p("a").with_priority(Priority::High),
                    p("b").with_priority(Priority::High),
                    Equal,
                ),
                (p("a"), p("b").with_priority(Priority::High), Greater),
                (p("a"), p("b").with_priority(Priority::Medium), Greater),
                (
                    p("a").with_priority(Priority::Medium),
                    p("b").with_priority(Priority::High),
                    Greater,
                ),
            ],
        );
    }

    #[test]
    fn test_completeness_key() {
        use Ordering::*;
        check(
            &CompletenessKey,
            vec![
                (p("a"), p("b"), Equal),
                (
                    p("a").with_status(Status::Done),
                    p("b").with_status(Status::Done),
                    Equal,
                ),
                (
                    p("a").with_status(Status::Done),
                    p("b").with_status(Status::Dropped),
                    Equal,
                ),
                (p("a"), p("b").with_status(Status::Done), Less),
                (p("a"), p("b").with_status(Status::Dropped), Less),
                (p("a").with_status(Status::Paused), p("b").with_done(["x"]), Less),
            ],
        );
    }

    #[test]
    fn test_status_key() {
        use Ordering::*;
        check(
            &StatusKey,
            vec![
                (p("a"), p("b"), Equal),
                (p("a"), p("b").with_status(Status::Idea), Equal),
                (p("a"), p("b").with_status(Status::Dropped), Less),
                (p("a"), p("b").with_status(Status::Done), Less),
                (p("a"), p("b").with_status(Status::Wip), Greater),
                (p("a"), p("b").with_status(Status::Ready), Greater),
                (p("a"), p("b").with_status(Status::Blocked), Greater),
                (p("a"), p("b").with_status(Status::Planning), Greater),
                (p("a").with_status(Status::Ready), p("b").with_status(Status::Wip), Greater),
                (p("a").with_status(Status::Ready), p("b").with_tasks(["foo"]), Equal),
                (
                    p("a").with_status(Status::Wip),
                    p("b").with_tasks(["foo"]).with_done(["bar"]),
                    Equal,
                ),
            ],
        );
    }

    #[test]
    fn test_due_key() {
        use Ordering::*;
        let ctx = ctx();
        check(
            &DueKey,
            vec![
                (p("a"), p("b"), Equal),
                (p("a"), p("b").with_due(ctx.date()), Greater),
                (p("a").with_due(ctx.date()), p("b").with_due(ctx.date()), Equal),
                (p("a").with_due(ctx.offset(1)), p("b").with_due(ctx.date()), Greater),
                (p("a").with_due(ctx.offset(-5)), p("b").with_due(ctx.date()), Less),
            ],
        );
    }

    #[test]
    fn test_defer_key() {
        use Ordering::*;
        let ctx = ctx();
        check(
            &DeferKey,
            vec![
                (p("a"), p("b"), Equal),
                (p("a"), p("b").with_defer(ctx.date()), Equal),
                (p("a").with_defer(ctx.date()), p("b").with_defer(ctx.date()), Equal),
                (p("a"), p("b").with_defer(ctx.offset(-1)), Equal),
                (p("a"), p("b").with_defer(ctx.offset(1)), Less),
                (
                    p("a").with_defer(ctx.offset(3)),
                    p("b").with_defer(ctx.offset(1)),
                    Greater,
                ),
            ],
        );
    }

    #[test]
    fn test_dependency_key() {
        use Ordering::*;
        check(
            &DependencyKey,
            vec![
                (p("a"), p("b"), Equal),
                (p("a"), p("foo"), Equal),
                (p("a").with_dependencies(["foo"]), p("b"), Equal),
                (p("a").with_dependencies(["bar"]), p("foo"), Equal),
                // Circular references cancel out.
                (
                    p("foo").with_dependencies(["bar"]),
                    p("bar").with_dependencies(["foo"]),
                    Equal,
                ),
                (p("a").with_dependencies(["foo"]), p("foo"), Greater),
                (p("a").with_dependencies(["foo"]), p("Foo"), Greater),
                (p("a").with_dependencies(["bar", "foo"]), p("foo"), Greater),
            ],
        );
    }

    #[test]
    fn test_time_roi_key() {
        use Ordering::*;
        let roi = |name: &str, daily: &str, estimate: &str| ProjectRecord {
            daily_time_roi: Some(daily.into()),
            time_estimate: Some(estimate.into()),
            ..p(name)
        };
        check(
            &TimeRoiKey,
            vec![
                (p("a"), p("b"), Equal),
                (roi("a", "10m", "1h"), p("b"), Less),
                (roi("a", "10m", "1h"), roi("b", "1m", "1h"), Less),
                (roi("a", "1m", "2h"), roi("b", "1m", "1h"), Greater),
            ],
        );
    }

    #[test]
    fn test_name_key() {
        use Ordering::*;
        check(
            &NameKey,
            vec![
                (p("a"), p("b"), Less),
                (p("same"), p("same"), Equal),
                (p("same").in_namespace("home"), p("same").in_namespace("work"), Less),
            ],
        );
    }

    #[test]
    fn test_for_sort_key_names_match() {
        for key in SortKey::DEFAULT_ORDER.into_iter().chain([SortKey::TimeRoi]) {
            assert_eq!(for_sort_key(key).name(), key.as_str());
        }
    }
}
