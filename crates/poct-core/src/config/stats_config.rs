//! QC statistics configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CV_FAIL_PERCENT, DEFAULT_CV_WARNING_PERCENT};
use crate::errors::ConfigError;

/// What to do when one dataset holds readings for more than one analyte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalytePolicy {
    /// Label the dataset with the first reading's analyte and log a warning.
    #[default]
    First,
    /// Fail with `InputError::MixedAnalytes`.
    Reject,
}

impl AnalytePolicy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for AnalytePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AnalytePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(Self::First),
            "reject" => Ok(Self::Reject),
            other => Err(ConfigError::InvalidValue {
                field: "stats.analyte_policy".to_string(),
                message: format!("unknown analyte policy `{other}`, expected `first` or `reject`"),
            }),
        }
    }
}

/// Configuration for the statistics aggregators.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StatsConfig {
    pub analyte_policy: Option<AnalytePolicy>,
    /// CV% at which precision becomes a warning. Default: 5.0.
    pub cv_warning_percent: Option<f64>,
    /// CV% at which precision becomes unacceptable. Default: 10.0.
    pub cv_fail_percent: Option<f64>,
}

impl StatsConfig {
    pub fn effective_analyte_policy(&self) -> AnalytePolicy {
        self.analyte_policy.unwrap_or_default()
    }

    pub fn effective_cv_warning_percent(&self) -> f64 {
        self.cv_warning_percent.unwrap_or(DEFAULT_CV_WARNING_PERCENT)
    }

    pub fn effective_cv_fail_percent(&self) -> f64 {
        self.cv_fail_percent.unwrap_or(DEFAULT_CV_FAIL_PERCENT)
    }
}
