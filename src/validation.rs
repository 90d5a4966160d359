//! Structural validation for a project set.
//!
//! Checks a resolved project set before ranking. Detects:
//! - Empty project names
//! - Duplicate names within a namespace
//! - Projects that depend on themselves
//! - Circular dependencies among active projects
//!
//! Unknown dependency names are not errors; the orderer ignores them.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use std::collections::HashSet;

use crate::dependency::DependencyGraph;
use crate::models::Project;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two projects in one namespace share a name.
    DuplicateName,
    /// A project has a blank name.
    EmptyName,
    /// A project lists itself as a dependency.
    SelfDependency,
    /// Active projects depend on each other in a loop.
    CyclicDependency,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a project set.
///
/// Checks:
/// 1. Every project has a non-blank name
/// 2. No two projects share a name within a namespace (case-insensitive)
/// 3. No project depends on itself
/// 4. No circular dependencies among non-terminal projects
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_projects(projects: &[Project]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut seen = HashSet::new();
    for p in projects {
        if p.name().trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                format!(
                    "Project with empty name in namespace '{}'",
                    p.namespace().unwrap_or_default()
                ),
            ));
            continue;
        }

        if !seen.insert((p.namespace(), p.name().to_lowercase())) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                match p.namespace() {
                    Some(ns) => format!("Duplicate project name '{}' in namespace '{ns}'", p.name()),
                    None => format!("Duplicate project name '{}'", p.name()),
                },
            ));
        }

        if p.depends_on_name(p.name()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::SelfDependency,
                format!("Project '{}' depends on itself", p.name()),
            ));
        }
    }

    if let Some(cycle_err) = detect_cycles(projects) {
        errors.push(cycle_err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Reports the first dependency cycle of two or more projects.
///
/// Self-dependencies are reported separately and skipped here.
fn detect_cycles(projects: &[Project]) -> Option<ValidationError> {
    let graph = DependencyGraph::build(projects).without_self_edges();
    let order: Vec<usize> = (0..projects.len()).collect();
    let cycle = graph.find_cycle(&order)?;

    let names: Vec<&str> = cycle.iter().map(|&i| projects[i].name()).collect();
    Some(ValidationError::new(
        ValidationErrorKind::CyclicDependency,
        format!("Circular dependency detected: {}", names.join(" -> ")),
    ))
}
