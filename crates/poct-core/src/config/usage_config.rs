//! Usage-log rule configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CONFLICT_WINDOW_MINUTES, DEFAULT_HOP_THRESHOLD, DEFAULT_HOP_WINDOW_MINUTES,
    DEFAULT_RAPID_THRESHOLD_SECS,
};

/// Thresholds for the RAPID, LOC_CONFLICT, and DEVICE_HOP rules.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct UsageRulesConfig {
    /// Default: 60 seconds.
    pub rapid_threshold_secs: Option<u32>,
    /// Default: 3 distinct devices.
    pub hop_threshold: Option<usize>,
    /// Default: 5 minutes either side of the event.
    pub hop_window_minutes: Option<u32>,
    /// Default: 5 minutes.
    pub conflict_window_minutes: Option<u32>,
}

impl UsageRulesConfig {
    pub fn effective_rapid_threshold_secs(&self) -> u32 {
        self.rapid_threshold_secs
            .unwrap_or(DEFAULT_RAPID_THRESHOLD_SECS)
    }

    pub fn effective_hop_threshold(&self) -> usize {
        self.hop_threshold.unwrap_or(DEFAULT_HOP_THRESHOLD)
    }

    pub fn effective_hop_window_minutes(&self) -> u32 {
        self.hop_window_minutes.unwrap_or(DEFAULT_HOP_WINDOW_MINUTES)
    }

    pub fn effective_conflict_window_minutes(&self) -> u32 {
        self.conflict_window_minutes
            .unwrap_or(DEFAULT_CONFLICT_WINDOW_MINUTES)
    }
}
