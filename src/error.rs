//! Error types for project resolution, ordering, and configuration.
//!
//! Each stage owns its error type; [`PlanError`] wraps them for callers
//! that drive the whole pipeline and want a single type.

use thiserror::Error;

/// A duration or weekday string did not match its grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Expected `<int>d` or `<int>w`.
    #[error("can't parse date duration string `{0}`")]
    DateDuration(String),
    /// Expected `<int>h <int>m`, `<int>m`, or `<float>h`.
    #[error("can't parse time duration string `{0}`")]
    TimeDuration(String),
    /// Expected a weekday name such as `Monday`.
    #[error("unknown day of week `{0}`")]
    Weekday(String),
    /// A date duration moves a date past the calendar limits.
    #[error("date duration `{0}` is out of range")]
    DateOutOfRange(String),
}

impl ParseError {
    /// The text that failed to parse.
    pub fn input(&self) -> &str {
        match self {
            Self::DateDuration(s)
            | Self::TimeDuration(s)
            | Self::Weekday(s)
            | Self::DateOutOfRange(s) => s,
        }
    }
}

/// One field of a project record could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("project `{project}`: invalid `{field}`")]
pub struct ResolveError {
    /// Name of the project being resolved.
    pub project: String,
    /// Record field that failed.
    pub field: &'static str,
    /// Underlying parse failure.
    #[source]
    pub source: ParseError,
}

/// Failure while merging the ranking with dependency constraints.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Non-terminal projects depend on each other in a loop.
    ///
    /// `participants` lists the project names in cycle order; the first
    /// name depends (transitively) on the last.
    #[error("dependency cycle: {}", participants.join(" -> "))]
    DependencyCycle {
        /// Project names forming the cycle.
        participants: Vec<String>,
    },
}

/// Invalid pool configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),
    /// A sort key name is not one of the built-in keys.
    #[error("unknown sort key `{0}`")]
    UnknownSortKey(String),
    /// The sort order is empty.
    #[error("sort order must name at least one key")]
    EmptySortOrder,
    /// A namespace or tag budget is not a time duration.
    #[error("invalid time budget for `{name}`")]
    Budget {
        /// Namespace or tag the budget belongs to.
        name: String,
        /// Underlying parse failure.
        #[source]
        source: ParseError,
    },
}

/// Umbrella error for the full load → rank → order pipeline.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
