//! Project record schema.
//!
//! A [`ProjectRecord`] is the unresolved, on-disk shape of a project.
//! Loaders deserialize records, stamp the namespace, and hand them to
//! [`crate::resolve::resolve`]. Writers serialize records produced by
//! [`crate::models::Project::to_record`].
//!
//! # Serialization
//! Output omits low-value defaults so files stay small:
//! - `namespace` (reconstructed from the source grouping)
//! - `priority: low` and `status: idea`
//! - absent optional fields and empty sequences

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Priority, Status};

/// Raw project record, one entry of a project file.
///
/// Duration and weekday fields stay as written; they are parsed during
/// resolution so a malformed value is reported against its field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Project name.
    pub project: String,
    #[serde(default, skip_serializing)]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "is_default_priority")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "is_default_status")]
    pub status: Option<Status>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_estimate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_time_roi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_time_roi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yearly_time_roi: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_for: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defer: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_on: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropped_on: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paused_on: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_on: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_done: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub externals: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub done: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

fn is_default_priority(priority: &Option<Priority>) -> bool {
    matches!(priority, None | Some(Priority::Low))
}

fn is_default_status(status: &Option<Status>) -> bool {
    matches!(status, None | Some(Status::Idea))
}

impl ProjectRecord {
    /// Creates a record with only a name.
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            ..Default::default()
        }
    }

    /// Stamps the namespace of the source the record was loaded from.
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets an explicit status.
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Replaces the outstanding tasks.
    pub fn with_tasks<I, S>(mut self, tasks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tasks = tasks.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the completed tasks.
    pub fn with_done<I, S>(mut self, done: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.done = done.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the dependency names.
    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    /// Sets an explicit due date.
    pub fn with_due(mut self, due: NaiveDate) -> Self {
        self.due = Some(due);
        self
    }

    /// Sets an explicit defer date.
    pub fn with_defer(mut self, defer: NaiveDate) -> Self {
        self.defer = Some(defer);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal() {
        let rec: ProjectRecord = serde_json::from_str(r#"{"project": "taxes"}"#).unwrap();
        assert_eq!(rec, ProjectRecord::new("taxes"));
    }

    #[test]
    fn test_deserialize_full_fields() {
        let rec: ProjectRecord = serde_json::from_str(
            r#"{
                "project": "bike",
                "priority": "high",
                "status": "wip",
                "frequency": "2w",
                "due": "2024-05-20",
                "tasks": ["pump tire (5m)"],
                "tags": ["outside"]
            }"#,
        )
        .unwrap();
        assert_eq!(rec.priority, Some(Priority::High));
        assert_eq!(rec.status, Some(Status::Wip));
        assert_eq!(rec.frequency.as_deref(), Some("2w"));
        assert_eq!(rec.due, NaiveDate::from_ymd_opt(2024, 5, 20));
        assert_eq!(rec.tasks, vec!["pump tire (5m)"]);
    }

    #[test]
    fn test_project_name_required() {
        assert!(serde_json::from_str::<ProjectRecord>(r#"{"status": "wip"}"#).is_err());
    }

    #[test]
    fn test_serialize_omits_defaults() {
        let rec = ProjectRecord::new("quiet")
            .in_namespace("home")
            .with_priority(Priority::Low)
            .with_status(Status::Idea);
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json, serde_json::json!({"project": "quiet"}));
    }

    #[test]
    fn test_serialize_keeps_non_defaults() {
        let rec = ProjectRecord::new("loud")
            .with_priority(Priority::High)
            .with_status(Status::Blocked)
            .with_tasks(["a"]);
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "project": "loud",
                "priority": "high",
                "status": "blocked",
                "tasks": ["a"]
            })
        );
    }
}
