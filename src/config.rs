//! Pool configuration.
//!
//! Loaded from TOML or built in code:
//!
//! ```
//! use u_plansheet::config::PoolConfig;
//! use u_plansheet::ranking::SortKey;
//!
//! let config = PoolConfig::from_toml_str(
//!     r#"
//!     sort_order = ["completeness", "dependency", "due", "priority", "name"]
//!     upcoming_days = 14
//!
//!     [namespaces]
//!     work = "8h"
//!
//!     [tags]
//!     errand = "1h 30m"
//!     "#,
//! )?;
//! assert_eq!(config.sort_order()[2], SortKey::Due);
//! assert_eq!(config.namespace_budget("work"), Some(480));
//! assert_eq!(config.tag_budget("errand"), Some(90));
//! # Ok::<(), u_plansheet::error::ConfigError>(())
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::duration::TimeSpan;
use crate::error::ConfigError;
use crate::ranking::SortKey;

/// Default window for upcoming due dates, in days.
pub const DEFAULT_UPCOMING_DAYS: u32 = 7;

/// Ranking and view settings for a [`Pool`](crate::pool::Pool).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPoolConfig", into = "RawPoolConfig")]
pub struct PoolConfig {
    sort_order: Vec<SortKey>,
    upcoming_days: u32,
    namespaces: BTreeMap<String, TimeSpan>,
    tags: BTreeMap<String, TimeSpan>,
}

impl PoolConfig {
    /// Parses a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    /// TOML syntax errors, unknown sort keys, an empty sort order, and
    /// budgets that are not time durations.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let raw: RawPoolConfig = toml::from_str(s)?;
        Self::try_from(raw)
    }

    /// Serializes to TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Replaces the sort order.
    ///
    /// # Errors
    /// [`ConfigError::EmptySortOrder`] when `order` is empty.
    pub fn with_sort_order(mut self, order: impl Into<Vec<SortKey>>) -> Result<Self, ConfigError> {
        let order = order.into();
        if order.is_empty() {
            return Err(ConfigError::EmptySortOrder);
        }
        self.sort_order = order;
        Ok(self)
    }

    /// Sets the upcoming-due window.
    pub fn with_upcoming_days(mut self, days: u32) -> Self {
        self.upcoming_days = days;
        self
    }

    /// Adds a per-namespace time budget.
    pub fn with_namespace_budget(mut self, namespace: impl Into<String>, budget: TimeSpan) -> Self {
        self.namespaces.insert(namespace.into(), budget);
        self
    }

    /// Adds a per-tag time budget.
    pub fn with_tag_budget(mut self, tag: impl Into<String>, budget: TimeSpan) -> Self {
        self.tags.insert(tag.into(), budget);
        self
    }

    /// Comparator chain key order.
    pub fn sort_order(&self) -> &[SortKey] {
        &self.sort_order
    }

    /// Days after today still counted as upcoming.
    pub fn upcoming_days(&self) -> u32 {
        self.upcoming_days
    }

    /// Budget in minutes for a namespace.
    pub fn namespace_budget(&self, namespace: &str) -> Option<u32> {
        self.namespaces.get(namespace).map(TimeSpan::minutes)
    }

    /// Budget in minutes for a tag.
    pub fn tag_budget(&self, tag: &str) -> Option<u32> {
        self.tags.get(tag).map(TimeSpan::minutes)
    }

    /// All namespace budgets.
    pub fn namespace_budgets(&self) -> &BTreeMap<String, TimeSpan> {
        &self.namespaces
    }

    /// All tag budgets.
    pub fn tag_budgets(&self) -> &BTreeMap<String, TimeSpan> {
        &self.tags
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            sort_order: SortKey::DEFAULT_ORDER.to_vec(),
            upcoming_days: DEFAULT_UPCOMING_DAYS,
            namespaces: BTreeMap::new(),
            tags: BTreeMap::new(),
        }
    }
}

/// On-disk shape: sort keys and budgets as plain strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct RawPoolConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    sort_order: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    upcoming_days: Option<u32>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    namespaces: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    tags: BTreeMap<String, String>,
}

impl TryFrom<RawPoolConfig> for PoolConfig {
    type Error = ConfigError;

    fn try_from(raw: RawPoolConfig) -> Result<Self, Self::Error> {
        let mut config = PoolConfig::default();

        if let Some(names) = raw.sort_order {
            let order = names
                .iter()
                .map(|name| name.parse::<SortKey>())
                .collect::<Result<Vec<_>, _>>()?;
            config = config.with_sort_order(order)?;
        }
        if let Some(days) = raw.upcoming_days {
            config.upcoming_days = days;
        }
        config.namespaces = parse_budgets(raw.namespaces)?;
        config.tags = parse_budgets(raw.tags)?;
        Ok(config)
    }
}

impl From<PoolConfig> for RawPoolConfig {
    fn from(config: PoolConfig) -> Self {
        let render = |budgets: BTreeMap<String, TimeSpan>| {
            budgets
                .into_iter()
                .map(|(name, span)| (name, span.as_str().to_string()))
                .collect()
        };
        Self {
            sort_order: Some(
                config
                    .sort_order
                    .iter()
                    .map(|key| key.as_str().to_string())
                    .collect(),
            ),
            upcoming_days: Some(config.upcoming_days),
            namespaces: render(config.namespaces),
            tags: render(config.tags),
        }
    }
}

fn parse_budgets(raw: BTreeMap<String, String>) -> Result<BTreeMap<String, TimeSpan>, ConfigError> {
    raw.into_iter()
        .map(|(name, text)| match TimeSpan::parse(&text) {
            Ok(span) => Ok((name, span)),
            Err(source) => Err(ConfigError::Budget { name, source }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PoolConfig::default();
        assert_eq!(config.sort_order(), &SortKey::DEFAULT_ORDER);
        assert_eq!(config.upcoming_days(), 7);
        assert!(config.namespace_budgets().is_empty());
        assert_eq!(PoolConfig::from_toml_str("").unwrap(), config);
    }

    #[test]
    fn test_partial_document() {
        let config = PoolConfig::from_toml_str("upcoming_days = 3").unwrap();
        assert_eq!(config.upcoming_days(), 3);
        assert_eq!(config.sort_order(), &SortKey::DEFAULT_ORDER);
    }

    #[test]
    fn test_time_roi_key_name() {
        let config = PoolConfig::from_toml_str(r#"sort_order = ["time_roi", "name"]"#).unwrap();
        assert_eq!(config.sort_order(), &[SortKey::TimeRoi, SortKey::Name]);
    }

    #[test]
    fn test_unknown_sort_key() {
        let err = PoolConfig::from_toml_str(r#"sort_order = ["urgency"]"#).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownSortKey(ref k) if k == "urgency"));
    }

    #[test]
    fn test_empty_sort_order_rejected() {
        let err = PoolConfig::from_toml_str("sort_order = []").unwrap_err();
        assert!(matches!(err, ConfigError::EmptySortOrder));
        assert!(PoolConfig::default().with_sort_order(Vec::new()).is_err());
    }

    #[test]
    fn test_bad_budget() {
        let err = PoolConfig::from_toml_str("[tags]\nerrand = \"soon\"").unwrap_err();
        match err {
            ConfigError::Budget { name, source } => {
                assert_eq!(name, "errand");
                assert_eq!(source.input(), "soon");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_toml() {
        let err = PoolConfig::from_toml_str("sort_order = [").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_builder_and_toml_roundtrip() {
        let config = PoolConfig::default()
            .with_sort_order([SortKey::Due, SortKey::Name])
            .unwrap()
            .with_upcoming_days(10)
            .with_namespace_budget("home", TimeSpan::parse("2h").unwrap())
            .with_tag_budget("phone", TimeSpan::parse("30m").unwrap());

        let text = config.to_toml_string().unwrap();
        let reloaded = PoolConfig::from_toml_str(&text).unwrap();
        assert_eq!(reloaded, config);
        assert_eq!(reloaded.namespace_budget("home"), Some(120));
        assert_eq!(reloaded.tag_budget("phone"), Some(30));
        assert_eq!(reloaded.tag_budget("missing"), None);
    }
}
