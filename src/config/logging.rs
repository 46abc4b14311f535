//! Logging section

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Levels accepted for `level` and for each component override.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Multi-line, colored output for terminals
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("pretty") {
            Ok(LogFormat::Pretty)
        } else if s.eq_ignore_ascii_case("json") {
            Ok(LogFormat::Json)
        } else {
            Err(format!("unknown log format '{}', expected pretty or json", s))
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    /// Per-module overrides keyed by module path below `brick::`,
    /// e.g. `{ routing = "debug", agent = "trace" }`
    #[serde(alias = "component_levels", skip_serializing_if = "BTreeMap::is_empty")]
    pub components: BTreeMap<String, String>,
    /// Log a short preview of customer messages. Chat text can carry names,
    /// addresses and allergies, so this stays off outside debugging.
    pub enable_content_logging: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            components: BTreeMap::new(),
            enable_content_logging: false,
        }
    }
}

impl LoggingConfig {
    /// First level (base or component) that is not a known level name.
    pub fn unknown_level(&self) -> Option<&str> {
        std::iter::once(self.level.as_str())
            .chain(self.components.values().map(String::as_str))
            .find(|level| !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()))
    }
}
