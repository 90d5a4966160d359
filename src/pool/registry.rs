//! Pool construction, ordering, and namespace grouping.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::PoolConfig;
use crate::context::PlanContext;
use crate::dependency::DependencyOrderer;
use crate::error::{OrderError, PlanError};
use crate::models::{Project, ProjectRecord};
use crate::ranking::chain::take_in_order;
use crate::ranking::ComparatorChain;
use crate::resolve::resolve_all;
use crate::validation::{validate_projects, ValidationResult};

use super::PoolSummary;

/// Resolved projects in dependency-aware ranked order.
#[derive(Debug, Clone)]
pub struct Pool {
    pub(super) config: PoolConfig,
    pub(super) context: PlanContext,
    pub(super) projects: Vec<Project>,
}

impl Pool {
    /// Creates an empty pool.
    pub fn new(config: PoolConfig, context: PlanContext) -> Self {
        Self {
            config,
            context,
            projects: Vec::new(),
        }
    }

    /// Resolves and orders records.
    ///
    /// # Errors
    /// A record that does not resolve, or a dependency cycle.
    pub fn from_records<I>(
        records: I,
        config: PoolConfig,
        context: PlanContext,
    ) -> Result<Self, PlanError>
    where
        I: IntoIterator<Item = ProjectRecord>,
    {
        let projects = resolve_all(records, &context)?;
        Ok(Self::from_projects(projects, config, context)?)
    }

    /// Orders already resolved projects.
    ///
    /// # Errors
    /// [`OrderError::DependencyCycle`] when active projects depend on each
    /// other in a loop.
    pub fn from_projects(
        projects: Vec<Project>,
        config: PoolConfig,
        context: PlanContext,
    ) -> Result<Self, OrderError> {
        let mut pool = Self {
            config,
            context,
            projects,
        };
        pool.sort_projects()?;
        Ok(pool)
    }

    /// Resolves and appends records. The pool is re-sorted afterwards.
    ///
    /// # Errors
    /// Nothing is added when any record fails to resolve. On a cycle the new
    /// projects stay in the pool, ranked without dependency ordering.
    pub fn extend_records<I>(&mut self, records: I) -> Result<(), PlanError>
    where
        I: IntoIterator<Item = ProjectRecord>,
    {
        let added = resolve_all(records, &self.context)?;
        self.projects.extend(added);
        self.sort_projects()?;
        Ok(())
    }

    /// Re-ranks the pool with the configured chain and dependency ordering.
    ///
    /// # Errors
    /// [`OrderError::DependencyCycle`]; the pool is then left in plain
    /// comparator order.
    pub fn sort_projects(&mut self) -> Result<(), OrderError> {
        let chain = ComparatorChain::from_order(self.config.sort_order());
        let projects = std::mem::take(&mut self.projects);
        let ranked = chain.sort(projects, &self.context);

        let orderer = DependencyOrderer::new(chain);
        match orderer.order_indices(&ranked, &self.context) {
            Ok(order) => {
                self.projects = take_in_order(ranked, &order);
                debug!(count = self.projects.len(), "pool sorted");
                Ok(())
            }
            Err(err) => {
                self.projects = ranked;
                Err(err)
            }
        }
    }

    /// Projects in ranked order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Consumes the pool, returning the ranked projects.
    pub fn into_projects(self) -> Vec<Project> {
        self.projects
    }

    /// Configuration in effect.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Evaluation context ("today").
    pub fn context(&self) -> &PlanContext {
        &self.context
    }

    /// Number of projects.
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Whether the pool has no projects.
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Finds a project by name, case-insensitively.
    pub fn get(&self, name: &str) -> Option<&Project> {
        let name = name.to_lowercase();
        self.projects.iter().find(|p| p.name().to_lowercase() == name)
    }

    /// Distinct namespaces, sorted.
    pub fn namespaces(&self) -> Vec<&str> {
        let mut namespaces: Vec<&str> =
            self.projects.iter().filter_map(|p| p.namespace()).collect();
        namespaces.sort_unstable();
        namespaces.dedup();
        namespaces
    }

    /// Projects of one namespace, in ranked order.
    pub fn projects_in_namespace(&self, namespace: &str) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|p| p.namespace() == Some(namespace))
            .collect()
    }

    /// Projects grouped by namespace, each group in ranked order.
    ///
    /// Projects without a namespace are grouped under `""`.
    pub fn grouped_by_namespace(&self) -> BTreeMap<&str, Vec<&Project>> {
        let mut groups: BTreeMap<&str, Vec<&Project>> = BTreeMap::new();
        for p in &self.projects {
            groups.entry(p.namespace().unwrap_or_default()).or_default().push(p);
        }
        groups
    }

    /// Writable records grouped by namespace, for saving one file per
    /// namespace.
    pub fn records_by_namespace(&self) -> BTreeMap<String, Vec<ProjectRecord>> {
        self.grouped_by_namespace()
            .into_iter()
            .map(|(ns, projects)| {
                (
                    ns.to_string(),
                    projects.into_iter().map(Project::to_record).collect(),
                )
            })
            .collect()
    }

    /// Structural checks over the pool.
    pub fn validate(&self) -> ValidationResult {
        validate_projects(&self.projects)
    }

    /// Counts and totals over the pool.
    pub fn summary(&self) -> PoolSummary {
        PoolSummary::calculate(&self.projects, &self.context)
    }
}
