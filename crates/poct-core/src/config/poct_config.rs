//! Top-level engine configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{AnalytePolicy, DetectionConfig, StatsConfig, UsageRulesConfig};
use crate::constants::PROJECT_CONFIG_FILE;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`POCT_*`)
/// 3. Project config (`poct.toml` in the analysis root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PoctConfig {
    pub detection: DetectionConfig,
    pub stats: StatsConfig,
    pub usage: UsageRulesConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub window_minutes: Option<u32>,
    pub rarity_threshold: Option<f64>,
    pub analyte_policy: Option<AnalytePolicy>,
}

impl PoctConfig {
    /// Load configuration for an analysis rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        tracing::debug!(
            window_minutes = config.detection.effective_window_minutes(),
            rarity_threshold = config.detection.effective_rarity_threshold(),
            analyte_policy = %config.stats.effective_analyte_policy(),
            "configuration resolved"
        );
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &PoctConfig) -> Result<(), ConfigError> {
        if let Some(threshold) = config.detection.rarity_threshold {
            if !(threshold > 0.0 && threshold <= 1.0) {
                return Err(ConfigError::ValidationFailed {
                    field: "detection.rarity_threshold".to_string(),
                    message: "must be greater than 0.0 and at most 1.0".to_string(),
                });
            }
        }

        let warn = config.stats.effective_cv_warning_percent();
        let fail = config.stats.effective_cv_fail_percent();
        if !warn.is_finite() || warn < 0.0 {
            return Err(ConfigError::ValidationFailed {
                field: "stats.cv_warning_percent".to_string(),
                message: "must be a non-negative number".to_string(),
            });
        }
        if !fail.is_finite() || fail < warn {
            return Err(ConfigError::ValidationFailed {
                field: "stats.cv_fail_percent".to_string(),
                message: "must be a number no lower than stats.cv_warning_percent".to_string(),
            });
        }

        if config.usage.hop_threshold == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "usage.hop_threshold".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut PoctConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: PoctConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    fn merge(base: &mut PoctConfig, other: &PoctConfig) {
        // Detection
        if other.detection.window_minutes.is_some() {
            base.detection.window_minutes = other.detection.window_minutes;
        }
        if other.detection.rarity_threshold.is_some() {
            base.detection.rarity_threshold = other.detection.rarity_threshold;
        }
        if other.detection.min_pattern_events.is_some() {
            base.detection.min_pattern_events = other.detection.min_pattern_events;
        }

        // Stats
        if other.stats.analyte_policy.is_some() {
            base.stats.analyte_policy = other.stats.analyte_policy;
        }
        if other.stats.cv_warning_percent.is_some() {
            base.stats.cv_warning_percent = other.stats.cv_warning_percent;
        }
        if other.stats.cv_fail_percent.is_some() {
            base.stats.cv_fail_percent = other.stats.cv_fail_percent;
        }

        // Usage rules
        if other.usage.rapid_threshold_secs.is_some() {
            base.usage.rapid_threshold_secs = other.usage.rapid_threshold_secs;
        }
        if other.usage.hop_threshold.is_some() {
            base.usage.hop_threshold = other.usage.hop_threshold;
        }
        if other.usage.hop_window_minutes.is_some() {
            base.usage.hop_window_minutes = other.usage.hop_window_minutes;
        }
        if other.usage.conflict_window_minutes.is_some() {
            base.usage.conflict_window_minutes = other.usage.conflict_window_minutes;
        }
    }

    /// Apply environment variable overrides. Unparsable values are ignored.
    fn apply_env_overrides(config: &mut PoctConfig) {
        if let Some(v) = env_parse::<u32>("POCT_WINDOW_MINUTES") {
            config.detection.window_minutes = Some(v);
        }
        if let Some(v) = env_parse::<f64>("POCT_RARITY_THRESHOLD") {
            config.detection.rarity_threshold = Some(v);
        }
        if let Some(v) = env_parse::<usize>("POCT_MIN_PATTERN_EVENTS") {
            config.detection.min_pattern_events = Some(v);
        }
        if let Some(v) = env_parse::<AnalytePolicy>("POCT_ANALYTE_POLICY") {
            config.stats.analyte_policy = Some(v);
        }
        if let Some(v) = env_parse::<u32>("POCT_RAPID_THRESHOLD_SECS") {
            config.usage.rapid_threshold_secs = Some(v);
        }
        if let Some(v) = env_parse::<usize>("POCT_HOP_THRESHOLD") {
            config.usage.hop_threshold = Some(v);
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut PoctConfig, cli: &CliOverrides) {
        if let Some(v) = cli.window_minutes {
            config.detection.window_minutes = Some(v);
        }
        if let Some(v) = cli.rarity_threshold {
            config.detection.rarity_threshold = Some(v);
        }
        if let Some(v) = cli.analyte_policy {
            config.stats.analyte_policy = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn env_parse<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(key, value = %raw, error = %e, "ignoring unparsable environment override");
            None
        }
    }
}
