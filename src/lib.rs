//! Personal project ranking engine.
//!
//! Derives temporal and status facts for a collection of projects, ranks
//! them with a configurable comparator chain, and merges that ranking with
//! the dependency constraints between projects.
//!
//! # Modules
//!
//! - **`duration`**: Short durations (`"3d"`, `"2w"`, `"1h 30m"`, `"1.5h"`)
//! - **`context`**: Injectable "today" for deterministic evaluation
//! - **`models`**: `ProjectRecord` (stored form), `Project` (resolved form),
//!   `Status`, `Priority`, explicit/derived `Resolved` values
//! - **`resolve`**: Status rule table, due/defer derivation, time estimates
//! - **`ranking`**: `ComparisonKey` trait, built-in keys, `ComparatorChain`
//! - **`dependency`**: Dependency graph and topological re-ranking
//! - **`validation`**: Structural checks (duplicate names, self references, cycles)
//! - **`pool`**: Registry orchestrating the pipeline, with planning views
//! - **`config`**: Sort order, upcoming window, and time budgets (TOML)
//!
//! # Pipeline
//!
//! ```text
//! ProjectRecord ─ resolve ─▶ Project ─ rank ─▶ ranked ─ order_with_dependencies ─▶ Pool
//! ```
//!
//! Reading and writing record files, document rendering, and locating
//! configuration on disk belong to the host application.
//!
//! # References
//!
//! - Kahn (1962), "Topological sorting of large networks"
//! - Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4

pub mod config;
pub mod context;
pub mod dependency;
pub mod duration;
pub mod error;
pub mod models;
pub mod pool;
pub mod ranking;
pub mod resolve;
pub mod validation;

pub use dependency::order_with_dependencies;
pub use error::PlanError;
pub use ranking::rank;
pub use resolve::resolve;
