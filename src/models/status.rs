//! Status, priority, and field provenance.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Project status.
///
/// Variant order is the ranking order used by the `status` sort key:
/// work in progress first, terminal states last.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Work has started.
    Wip,
    /// Tasks are listed and nothing is done yet.
    Ready,
    /// Waiting on another project.
    Blocked,
    /// Waiting on an external person or event.
    Waiting,
    /// Being scoped.
    Planning,
    /// Little more than an idea.
    #[default]
    Idea,
    /// Set aside for now.
    Paused,
    /// Explicitly abandoned, kept for reference.
    Dropped,
    /// Finished, kept for reference.
    Done,
}

impl Status {
    /// Ordinal in the status ranking table (1 = wip ... 9 = done).
    pub fn ordinal(self) -> u8 {
        self as u8 + 1
    }

    /// Whether the status is `done` or `dropped`.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Dropped)
    }

    /// Record spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wip => "wip",
            Self::Ready => "ready",
            Self::Blocked => "blocked",
            Self::Waiting => "waiting",
            Self::Planning => "planning",
            Self::Idea => "idea",
            Self::Paused => "paused",
            Self::Dropped => "dropped",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Project priority. Absent input means [`Priority::Low`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High = 1,
    Medium = 2,
    #[default]
    Low = 3,
}

impl Priority {
    /// Ordinal: high = 1, medium = 2, low = 3.
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Record spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Written in the record.
    Explicit,
    /// Computed from other fields and today's date.
    Derived,
}

/// A resolved value tagged with its origin.
///
/// Only explicit values are written back to records; derived values are
/// recomputed on every load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolved<T> {
    /// The value.
    pub value: T,
    /// Explicit or derived.
    pub origin: Origin,
}

impl<T> Resolved<T> {
    /// Wraps a value taken from the record.
    pub fn explicit(value: T) -> Self {
        Self {
            value,
            origin: Origin::Explicit,
        }
    }

    /// Wraps a computed value.
    pub fn derived(value: T) -> Self {
        Self {
            value,
            origin: Origin::Derived,
        }
    }

    /// Whether the value came from the record.
    #[inline]
    pub fn is_explicit(&self) -> bool {
        self.origin == Origin::Explicit
    }

    /// The value, if it came from the record.
    pub fn explicit_value(&self) -> Option<&T> {
        self.is_explicit().then_some(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_order() {
        let ordered = [
            Status::Wip,
            Status::Ready,
            Status::Blocked,
            Status::Waiting,
            Status::Planning,
            Status::Idea,
            Status::Paused,
            Status::Dropped,
            Status::Done,
        ];
        for (i, pair) in ordered.windows(2).enumerate() {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].ordinal() as usize, i + 1);
        }
        assert_eq!(Status::Done.ordinal(), 9);
    }

    #[test]
    fn test_terminal_states() {
        assert!(Status::Done.is_terminal());
        assert!(Status::Dropped.is_terminal());
        assert!(!Status::Paused.is_terminal());
        assert!(!Status::Wip.is_terminal());
    }

    #[test]
    fn test_priority_defaults_low() {
        assert_eq!(Priority::default(), Priority::Low);
        assert!(Priority::High < Priority::Medium);
        assert!(Priority::Medium < Priority::Low);
        assert_eq!(Priority::Medium.ordinal(), 2);
    }

    #[test]
    fn test_serde_spelling() {
        assert_eq!(serde_json::to_string(&Status::Wip).unwrap(), "\"wip\"");
        let p: Priority = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(p, Priority::Medium);
        assert!(serde_json::from_str::<Status>("\"someday\"").is_err());
    }

    #[test]
    fn test_resolved_origin() {
        let e = Resolved::explicit(Status::Wip);
        let d = Resolved::derived(Status::Idea);
        assert_eq!(e.explicit_value(), Some(&Status::Wip));
        assert_eq!(d.explicit_value(), None);
        assert!(!d.is_explicit());
    }
}
