//! Comparator chain for ranking projects.
//!
//! A [`ComparatorChain`] evaluates an ordered list of comparison keys and
//! stops at the first key that tells two projects apart. The key order is
//! configuration ([`SortKey`] names), so the ranking changes without code
//! changes.
//!
//! # Usage
//!
//! ```
//! use chrono::NaiveDate;
//! use u_plansheet::context::PlanContext;
//! use u_plansheet::models::{Priority, ProjectRecord};
//! use u_plansheet::ranking::{rank, SortKey};
//! use u_plansheet::resolve::resolve_all;
//!
//! let ctx = PlanContext::on(NaiveDate::from_ymd_opt(2024, 5, 15).unwrap());
//! let projects = resolve_all(
//!     vec![
//!         ProjectRecord::new("later"),
//!         ProjectRecord::new("now").with_priority(Priority::High),
//!     ],
//!     &ctx,
//! )?;
//! let ranked = rank(projects, &SortKey::DEFAULT_ORDER, &ctx);
//! assert_eq!(ranked[0].name(), "now");
//! # Ok::<(), u_plansheet::error::ResolveError>(())
//! ```

pub(crate) mod chain;
pub mod keys;

pub use chain::ComparatorChain;

use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::context::PlanContext;
use crate::error::ConfigError;
use crate::models::Project;

/// One key of the comparator chain.
///
/// # Convention
/// `Less` means `a` ranks before `b`.
pub trait ComparisonKey: Send + Sync + Debug {
    /// Key name as used in configuration (e.g., `"priority"`).
    fn name(&self) -> &'static str;

    /// Three-way comparison of two resolved projects.
    fn compare(&self, a: &Project, b: &Project, ctx: &PlanContext) -> Ordering;

    /// Key description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Built-in comparison keys, by configuration name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Completeness,
    Dependency,
    Priority,
    Defer,
    Due,
    TimeRoi,
    Status,
    Name,
}

impl SortKey {
    /// The default ranking: terminal projects last, then dependencies,
    /// priority, defer, due, status, and name as the final tie-break.
    pub const DEFAULT_ORDER: [SortKey; 7] = [
        SortKey::Completeness,
        SortKey::Dependency,
        SortKey::Priority,
        SortKey::Defer,
        SortKey::Due,
        SortKey::Status,
        SortKey::Name,
    ];

    /// Configuration name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completeness => "completeness",
            Self::Dependency => "dependency",
            Self::Priority => "priority",
            Self::Defer => "defer",
            Self::Due => "due",
            Self::TimeRoi => "time_roi",
            Self::Status => "status",
            Self::Name => "name",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.trim() {
            "completeness" => Self::Completeness,
            "dependency" => Self::Dependency,
            "priority" => Self::Priority,
            "defer" => Self::Defer,
            "due" => Self::Due,
            "time_roi" => Self::TimeRoi,
            "status" => Self::Status,
            "name" => Self::Name,
            other => return Err(ConfigError::UnknownSortKey(other.to_string())),
        };
        Ok(key)
    }
}

/// Ranks projects with the comparator chain built from `order`.
///
/// Stable: projects the chain cannot tell apart keep their input order.
pub fn rank(projects: Vec<Project>, order: &[SortKey], ctx: &PlanContext) -> Vec<Project> {
    ComparatorChain::from_order(order).sort(projects, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_names_roundtrip() {
        for key in [
            SortKey::Completeness,
            SortKey::Dependency,
            SortKey::Priority,
            SortKey::Defer,
            SortKey::Due,
            SortKey::TimeRoi,
            SortKey::Status,
            SortKey::Name,
        ] {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{key}\""));
        }
    }

    #[test]
    fn test_unknown_sort_key() {
        let err = "urgency".parse::<SortKey>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownSortKey(k) if k == "urgency"));
    }
}
