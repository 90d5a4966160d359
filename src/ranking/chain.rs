//! Lexicographic composition of comparison keys.

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::debug;

use super::keys::for_sort_key;
use super::{ComparisonKey, SortKey};
use crate::context::PlanContext;
use crate::models::Project;

/// An ordered list of comparison keys.
///
/// Keys are evaluated in sequence; the next key is consulted only on ties.
/// With [`SortKey::Name`] as the last key, distinct projects never compare
/// equal.
///
/// # Example
/// ```
/// use u_plansheet::ranking::{ComparatorChain, SortKey};
/// use u_plansheet::ranking::keys::{DueKey, NameKey};
///
/// let chain = ComparatorChain::new().with_key(DueKey).with_key(NameKey);
/// assert_eq!(chain.key_names(), vec!["due", "name"]);
///
/// let default_chain = ComparatorChain::default();
/// assert_eq!(default_chain.len(), SortKey::DEFAULT_ORDER.len());
/// ```
#[derive(Clone)]
pub struct ComparatorChain {
    keys: Vec<Arc<dyn ComparisonKey>>,
}

impl ComparatorChain {
    /// Creates an empty chain (every pair compares equal).
    pub fn new() -> Self {
        Self { keys: Vec::new() }
    }

    /// Builds a chain from configuration names.
    pub fn from_order(order: &[SortKey]) -> Self {
        Self {
            keys: order.iter().map(|&key| for_sort_key(key)).collect(),
        }
    }

    /// Appends a key.
    pub fn with_key<K: ComparisonKey + 'static>(mut self, key: K) -> Self {
        self.keys.push(Arc::new(key));
        self
    }

    /// A copy of this chain with every key named `name` removed.
    pub fn without(&self, name: &str) -> Self {
        Self {
            keys: self
                .keys
                .iter()
                .filter(|k| k.name() != name)
                .cloned()
                .collect(),
        }
    }

    /// Key names in evaluation order.
    pub fn key_names(&self) -> Vec<&'static str> {
        self.keys.iter().map(|k| k.name()).collect()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the chain has no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Compares two projects; the first non-equal key decides.
    pub fn compare(&self, a: &Project, b: &Project, ctx: &PlanContext) -> Ordering {
        for key in &self.keys {
            let ord = key.compare(a, b, ctx);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }

    /// Sorts projects, returning indices into the input slice.
    pub fn sort_indices(&self, projects: &[Project], ctx: &PlanContext) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..projects.len()).collect();
        stable_sort_by(&mut indices, &mut |&a, &b| {
            self.compare(&projects[a], &projects[b], ctx)
        });
        indices
    }

    /// Sorts projects by the chain.
    pub fn sort(&self, projects: Vec<Project>, ctx: &PlanContext) -> Vec<Project> {
        debug!(count = projects.len(), keys = ?self.key_names(), "ranking projects");
        let order = self.sort_indices(&projects, ctx);
        take_in_order(projects, &order)
    }
}

impl Default for ComparatorChain {
    fn default() -> Self {
        Self::from_order(&SortKey::DEFAULT_ORDER)
    }
}

impl std::fmt::Debug for ComparatorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComparatorChain")
            .field("keys", &self.key_names())
            .finish()
    }
}

/// Stable top-down merge sort.
///
/// The dependency key is not transitive, and std's sorts may panic when
/// the comparator is not a total order; this one always terminates with a
/// deterministic result.
pub(crate) fn stable_sort_by<T, F>(items: &mut [T], cmp: &mut F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = items.len();
    if len < 2 {
        return;
    }
    let mid = len / 2;
    stable_sort_by(&mut items[..mid], cmp);
    stable_sort_by(&mut items[mid..], cmp);

    let mut merged = Vec::with_capacity(len);
    let (mut i, mut j) = (0, mid);
    while i < mid && j < len {
        // Take from the right only when strictly smaller.
        if cmp(&items[j], &items[i]) == Ordering::Less {
            merged.push(items[j]);
            j += 1;
        } else {
            merged.push(items[i]);
            i += 1;
        }
    }
    merged.extend_from_slice(&items[i..mid]);
    merged.extend_from_slice(&items[j..]);
    items.copy_from_slice(&merged);
}

/// Moves projects out of `projects` in the order given by `order`.
///
/// `order` must be a permutation of `0..projects.len()`.
pub(crate) fn take_in_order(projects: Vec<Project>, order: &[usize]) -> Vec<Project> {
    let mut slots: Vec<Option<Project>> = projects.into_iter().map(Some).collect();
    order.iter().filter_map(|&i| slots[i].take()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, ProjectRecord, Status};
    use crate::ranking::keys::{DueKey, NameKey, PriorityKey};
    use crate::ranking::rank;
    use crate::resolve::resolve_all;
    use chrono::NaiveDate;

    fn ctx() -> PlanContext {
        PlanContext::on(NaiveDate::from_ymd_opt(2024, 5, 15).unwrap())
    }

    fn names(projects: &[Project]) -> Vec<&str> {
        projects.iter().map(|p| p.name()).collect()
    }

    fn projects(records: Vec<ProjectRecord>) -> Vec<Project> {
        resolve_all(records, &ctx()).unwrap()
    }

    #[test]
    fn test_priority_ordering() {
        let ps = projects(vec![
            ProjectRecord::new("a").with_priority(Priority::Low),
            ProjectRecord::new("b").with_priority(Priority::High),
            ProjectRecord::new("c").with_priority(Priority::Medium),
        ]);
        let ranked = rank(ps, &SortKey::DEFAULT_ORDER, &ctx());
        assert_eq!(names(&ranked), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_terminal_projects_last() {
        let ps = projects(vec![
            ProjectRecord::new("finished")
                .with_priority(Priority::High)
                .with_status(Status::Done),
            ProjectRecord::new("open"),
            ProjectRecord::new("abandoned").with_status(Status::Dropped),
        ]);
        let ranked = rank(ps, &SortKey::DEFAULT_ORDER, &ctx());
        assert_eq!(names(&ranked), vec!["open", "finished", "abandoned"]);
    }

    #[test]
    fn test_simple_dependency() {
        let ps = projects(vec![
            ProjectRecord::new("a").with_dependencies(["b"]),
            ProjectRecord::new("b"),
        ]);
        let ranked = rank(ps, &SortKey::DEFAULT_ORDER, &ctx());
        assert_eq!(names(&ranked), vec!["b", "a"]);
    }

    #[test]
    fn test_custom_order_changes_ranking() {
        let ctx = ctx();
        let records = vec![
            ProjectRecord::new("urgent").with_due(ctx.offset(1)),
            ProjectRecord::new("important").with_priority(Priority::High),
        ];
        let by_priority = rank(projects(records.clone()), &SortKey::DEFAULT_ORDER, &ctx);
        assert_eq!(names(&by_priority), vec!["important", "urgent"]);

        let by_due = rank(
            projects(records),
            &[SortKey::Due, SortKey::Priority, SortKey::Name],
            &ctx,
        );
        assert_eq!(names(&by_due), vec!["urgent", "important"]);
    }

    #[test]
    fn test_time_roi_in_custom_order() {
        let ps = projects(vec![
            ProjectRecord {
                weekly_time_roi: Some("10m".into()),
                time_estimate: Some("1h".into()),
                ..ProjectRecord::new("small win")
            },
            ProjectRecord {
                daily_time_roi: Some("10m".into()),
                time_estimate: Some("1h".into()),
                ..ProjectRecord::new("big win")
            },
            ProjectRecord::new("no roi"),
        ]);
        let ranked = rank(ps, &[SortKey::TimeRoi, SortKey::Name], &ctx());
        assert_eq!(names(&ranked), vec!["big win", "small win", "no roi"]);
    }

    #[test]
    fn test_rank_is_deterministic() {
        let ctx = ctx();
        let records = vec![
            ProjectRecord::new("x").with_dependencies(["z"]),
            ProjectRecord::new("y").with_priority(Priority::Medium),
            ProjectRecord::new("z").with_priority(Priority::High),
            ProjectRecord::new("w").with_due(ctx.offset(2)),
            ProjectRecord::new("v").with_tasks(["t"]),
        ];
        let first = rank(projects(records.clone()), &SortKey::DEFAULT_ORDER, &ctx);
        let second = rank(projects(records), &SortKey::DEFAULT_ORDER, &ctx);
        assert_eq!(first, second);
    }

    #[test]
    fn test_name_makes_chain_total() {
        let ctx = ctx();
        let ps = projects(vec![
            ProjectRecord::new("a"),
            ProjectRecord::new("b"),
            ProjectRecord::new("c").with_tasks(["x"]),
        ]);
        let chain = ComparatorChain::default();
        for (i, a) in ps.iter().enumerate() {
            for (j, b) in ps.iter().enumerate() {
                let ord = chain.compare(a, b, &ctx);
                assert_eq!(ord == Ordering::Equal, i == j);
            }
        }
    }

    #[test]
    fn test_builder_and_without() {
        let chain = ComparatorChain::new()
            .with_key(PriorityKey)
            .with_key(DueKey)
            .with_key(NameKey);
        assert_eq!(chain.without("due").key_names(), vec!["priority", "name"]);
        assert_eq!(
            ComparatorChain::default().without("dependency").len(),
            SortKey::DEFAULT_ORDER.len() - 1
        );
    }

    #[test]
    fn test_empty_chain_keeps_input_order() {
        let ps = projects(vec![
            ProjectRecord::new("c"),
            ProjectRecord::new("a"),
            ProjectRecord::new("b"),
        ]);
        let ranked = ComparatorChain::new().sort(ps, &ctx());
        assert_eq!(names(&ranked), vec!["c", "a", "b"]);
        assert!(ComparatorChain::new().is_empty());
    }

    #[test]
    fn test_merge_sort_survives_inconsistent_comparator() {
        // Rock-paper-scissors: no total order exists.
        let mut items = vec![0usize, 1, 2, 0, 1, 2, 2, 1, 0];
        stable_sort_by(&mut items, &mut |a, b| match (a, b) {
            (0, 1) | (1, 2) | (2, 0) => Ordering::Less,
            (1, 0) | (2, 1) | (0, 2) => Ordering::Greater,
            _ => Ordering::Equal,
        });
        assert_eq!(items.len(), 9);
    }

    #[test]
    fn test_merge_sort_is_stable() {
        let mut items = vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')];
        stable_sort_by(&mut items, &mut |a, b| a.0.cmp(&b.0));
        assert_eq!(items, vec![(0, 'b'), (0, 'd'), (1, 'a'), (1, 'c')]);
    }
}
