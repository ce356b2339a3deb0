//! Dataset-wide statistics.

use poct_core::config::AnalytePolicy;
use poct_core::errors::InputError;
use poct_core::types::Reading;
use serde::{Deserialize, Serialize};

use super::device::{group_by_device, DeviceStats};

/// Statistics across every reading in one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalStats {
    #[serde(rename = "devices")]
    pub device_count: usize,
    pub mean: f64,
    pub sd: f64,
    #[serde(with = "super::cv_serde")]
    pub cv: f64,
    pub count: usize,
    pub analyte: String,
}

impl GlobalStats {
    pub fn empty() -> Self {
        Self {
            device_count: 0,
            mean: 0.0,
            sd: 0.0,
            cv: 0.0,
            count: 0,
            analyte: String::new(),
        }
    }

    /// True when CV% is above `limit_percent`. A NaN CV is never above.
    pub fn exceeds_cv_limit(&self, limit_percent: f64) -> bool {
        self.cv > limit_percent
    }
}

/// Compute global statistics, labelling the dataset with the first reading's
/// analyte.
///
/// Mixed-analyte input is not rejected here; it is logged as a warning.
/// Use [`compute_stats_with_policy`] to reject it.
pub fn compute_stats(readings: &[Reading]) -> GlobalStats {
    if readings.is_empty() {
        return GlobalStats::empty();
    }

    if let Some(other) = first_foreign_analyte(readings) {
        tracing::warn!(
            analyte = %readings[0].analyte,
            other = %other,
            "dataset mixes analytes; labelling with the first"
        );
    }

    let values: Vec<f64> = readings.iter().map(|r| r.measured_value).collect();
    let summary = DeviceStats::from_values(&values);

    GlobalStats {
        device_count: group_by_device(readings).len(),
        mean: summary.mean,
        sd: summary.sd,
        cv: summary.cv,
        count: summary.count,
        analyte: readings[0].analyte.clone(),
    }
}

/// Compute global statistics under an explicit analyte policy.
pub fn compute_stats_with_policy(
    readings: &[Reading],
    policy: AnalytePolicy,
) -> Result<GlobalStats, InputError> {
    if policy == AnalytePolicy::Reject {
        if let Some(other) = first_foreign_analyte(readings) {
            return Err(InputError::MixedAnalytes {
                first: readings[0].analyte.clone(),
                other: other.to_string(),
            });
        }
    }
    Ok(compute_stats(readings))
}

fn first_foreign_analyte(readings: &[Reading]) -> Option<&str> {
    let first = readings.first()?.analyte.as_str();
    readings
        .iter()
        .map(|r| r.analyte.as_str())
        .find(|a| *a != first)
}
