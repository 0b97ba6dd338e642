//! Engine configuration.

use crate::deadline::Deadline;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Largest edit distance at which an unknown name still gets suggestions.
///
/// `com.google.CatsFactories` (three edits) suggests `com.google.CatsFactory`;
/// `com.google.com.CatsFactory` (four edits) suggests nothing.
pub const DEFAULT_MAX_EDIT_DISTANCE: usize = 3;

/// Tunables for query execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct EngineConfig {
    /// Suggestions further than this from the requested name are dropped.
    pub max_edit_distance: usize,

    /// Upper bound on suggestions per unknown name. `None` keeps every tie.
    pub max_suggestions: Option<usize>,

    /// Wall-clock limit per query, in milliseconds. `None` means unbounded.
    pub timeout_ms: Option<u64>,
}

impl EngineConfig {
    /// The per-query limit as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Start a fresh deadline from the configured timeout.
    #[must_use]
    pub fn deadline(&self) -> Deadline {
        self.timeout().map_or_else(Deadline::none, Deadline::after)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_edit_distance: DEFAULT_MAX_EDIT_DISTANCE,
            max_suggestions: None,
            timeout_ms: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.max_edit_distance, 3);
        assert_eq!(config.max_suggestions, None);
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_partial_config_fills_in_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"timeout-ms": 1500}"#).unwrap();

        assert_eq!(config.max_edit_distance, DEFAULT_MAX_EDIT_DISTANCE);
        assert_eq!(config.timeout(), Some(Duration::from_millis(1500)));
    }
}
