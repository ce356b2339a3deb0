//! Report types returned by the engine.

use serde::Serialize;

use crate::detectors::Flag;
use crate::stats::{AgreementPoint, DeviceRow, GlobalStats};
use crate::summary::{DeviceUsage, HourBoxStats};
use crate::usage::{OperatorScore, UsageRuleHit};

/// Everything derived from one usage log. Borrows the events it was built
/// from.
#[derive(Debug, Clone, Serialize)]
pub struct UsageReport<'a> {
    pub flags: Vec<Flag<'a>>,
    pub rule_hits: Vec<UsageRuleHit<'a>>,
    pub operator_scores: Vec<OperatorScore>,
    pub hourly_counts: [u32; 24],
    pub device_location_matrix: Vec<DeviceUsage>,
    pub hour_box_stats: Vec<HourBoxStats>,
}

impl<'a> UsageReport<'a> {
    /// Rule hits where at least one rule fired.
    pub fn flagged_hits(&self) -> impl Iterator<Item = &UsageRuleHit<'a>> + '_ {
        self.rule_hits.iter().filter(|h| h.flagged())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Quality-control summary of one batch of readings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QcReport {
    pub global: GlobalStats,
    pub devices: Vec<DeviceRow>,
    pub agreement: Vec<AgreementPoint>,
    pub mean_bias: f64,
    /// Global CV% above the warning limit (`stats.cv_warning_percent`).
    pub global_cv_warning: bool,
    /// Global CV% above the failure limit (`stats.cv_fail_percent`).
    pub global_cv_failed: bool,
}

impl QcReport {
    /// Non-finite CV% sentinels are written as `"NaN"`, `"Infinity"` or
    /// `"-Infinity"`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
