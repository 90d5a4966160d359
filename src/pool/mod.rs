//! Project registry.
//!
//! The [`Pool`] owns a resolved project set and keeps it in dependency-aware
//! ranked order:
//!
//! ```text
//! records ─ resolve ─▶ projects ─ rank ─▶ ranked ─ dependency order ─▶ pool
//! ```
//!
//! On top of the ordered set it exposes namespace grouping, the planning
//! views used for printed sheets, and a [`PoolSummary`].
//!
//! # Usage
//!
//! ```
//! use chrono::NaiveDate;
//! use u_plansheet::config::PoolConfig;
//! use u_plansheet::context::PlanContext;
//! use u_plansheet::models::{Priority, ProjectRecord};
//! use u_plansheet::pool::Pool;
//!
//! let ctx = PlanContext::on(NaiveDate::from_ymd_opt(2024, 5, 15).unwrap());
//! let pool = Pool::from_records(
//!     vec![
//!         ProjectRecord::new("ship").with_priority(Priority::High).with_dependencies(["test"]),
//!         ProjectRecord::new("test").in_namespace("work"),
//!     ],
//!     PoolConfig::default(),
//!     ctx,
//! )?;
//! let names: Vec<&str> = pool.projects().iter().map(|p| p.name()).collect();
//! assert_eq!(names, vec!["test", "ship"]);
//! # Ok::<(), u_plansheet::error::PlanError>(())
//! ```

mod registry;
mod summary;
mod views;

pub use registry::Pool;
pub use summary::PoolSummary;
pub use views::{projects_in_time, DEFAULT_PROJECT_TIME_ESTIMATE_MIN};
