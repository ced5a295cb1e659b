use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::ConfigError;
use crate::matching::DEFAULT_MAX_DISTANCE;

/// Spreadsheet column positions, 1-based as a user would count them.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ColumnConfig {
    pub name_column: usize,
    pub mark_column: usize,
    /// `None` disables observation write-back.
    pub observation_column: Option<usize>,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            name_column: 1,
            mark_column: 2,
            observation_column: Some(3),
        }
    }
}

impl ColumnConfig {
    /// 0-based (name, mark, observation) indices for row lookup.
    pub fn zero_based(&self) -> (usize, usize, Option<usize>) {
        (
            self.name_column.saturating_sub(1),
            self.mark_column.saturating_sub(1),
            self.observation_column.map(|c| c.saturating_sub(1)),
        )
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct MatchingConfig {
    /// Largest accepted edit distance between a formatted name and a roster name.
    pub max_distance: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            max_distance: DEFAULT_MAX_DISTANCE,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ImportConfig {
    /// Resolve and report without touching the roster.
    pub dry_run: bool,
    /// Emit a progress update every N processed rows.
    pub progress_every: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            dry_run: false,
            progress_every: 10,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub columns: ColumnConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub import: ImportConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns.name_column == 0 {
            return Err(ConfigError::InvalidValue {
                field: "columns.name_column",
                reason: "columns are 1-based".into(),
            });
        }
        if self.columns.mark_column == 0 {
            return Err(ConfigError::InvalidValue {
                field: "columns.mark_column",
                reason: "columns are 1-based".into(),
            });
        }
        if self.columns.observation_column == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "columns.observation_column",
                reason: "columns are 1-based".into(),
            });
        }
        if self.columns.name_column == self.columns.mark_column {
            return Err(ConfigError::InvalidValue {
                field: "columns.mark_column",
                reason: format!(
                    "same column as name ({})",
                    self.columns.name_column
                ),
            });
        }
        if self.import.progress_every == 0 {
            return Err(ConfigError::InvalidValue {
                field: "import.progress_every",
                reason: "must be > 0".into(),
            });
        }
        Ok(())
    }

    /// Build a configuration from `ROSTER_*` variables. The process environment
    /// takes precedence over `env_map` (typically a parsed `.env` file); unset
    /// variables keep their defaults.
    pub fn from_env(env_map: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let lookup = |key: &str| -> Option<String> {
            std::env::var(key)
                .ok()
                .or_else(|| env_map.get(key).cloned())
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut cfg = AppConfig::default();
        if let Some(v) = lookup("ROSTER_NAME_COLUMN") {
            cfg.columns.name_column = parse_usize("ROSTER_NAME_COLUMN", &v)?;
        }
        if let Some(v) = lookup("ROSTER_MARK_COLUMN") {
            cfg.columns.mark_column = parse_usize("ROSTER_MARK_COLUMN", &v)?;
        }
        if let Some(v) = lookup("ROSTER_OBSERVATION_COLUMN") {
            cfg.columns.observation_column = if v == "0" || v.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(parse_usize("ROSTER_OBSERVATION_COLUMN", &v)?)
            };
        }
        if let Some(v) = lookup("ROSTER_MAX_DISTANCE") {
            cfg.matching.max_distance = parse_usize("ROSTER_MAX_DISTANCE", &v)?;
        }
        if let Some(v) = lookup("ROSTER_DRY_RUN") {
            cfg.import.dry_run = parse_bool("ROSTER_DRY_RUN", &v)?;
        }
        if let Some(v) = lookup("ROSTER_PROGRESS_EVERY") {
            cfg.import.progress_every = parse_usize("ROSTER_PROGRESS_EVERY", &v)?;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn parse_usize(field: &'static str, value: &str) -> Result<usize, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        field,
        reason: format!("{:?} is not a non-negative integer", value),
    })
}

fn parse_bool(field: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            field,
            reason: format!("{:?} is not a boolean", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_validate() {
        let cfg = AppConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.matching.max_distance, 15);
        assert_eq!(cfg.columns.zero_based(), (0, 1, Some(2)));
    }

    #[test]
    fn rejects_zero_and_clashing_columns() {
        let mut cfg = AppConfig::default();
        cfg.columns.name_column = 0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidValue { field: "columns.name_column", .. })
        ));

        let mut cfg = AppConfig::default();
        cfg.columns.mark_column = 1;
        assert!(cfg.validate().is_err());

        let mut cfg = AppConfig::default();
        cfg.import.progress_every = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn from_env_map_overrides_defaults() {
        let env = map(&[
            ("ROSTER_NAME_COLUMN", "2"),
            ("ROSTER_MARK_COLUMN", "4"),
            ("ROSTER_OBSERVATION_COLUMN", "none"),
            ("ROSTER_MAX_DISTANCE", "8"),
            ("ROSTER_DRY_RUN", "yes"),
        ]);
        let cfg = AppConfig::from_env(&env).unwrap();
        assert_eq!(cfg.columns.name_column, 2);
        assert_eq!(cfg.columns.mark_column, 4);
        assert_eq!(cfg.columns.observation_column, None);
        assert_eq!(cfg.matching.max_distance, 8);
        assert!(cfg.import.dry_run);
    }

    #[test]
    fn from_env_reports_bad_numbers() {
        let env = map(&[("ROSTER_PROGRESS_EVERY", "often")]);
        let err = AppConfig::from_env(&env).unwrap_err();
        assert!(err.to_string().contains("ROSTER_PROGRESS_EVERY"));
    }
}
