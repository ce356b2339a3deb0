//! Anomaly detector configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_MIN_PATTERN_EVENTS, DEFAULT_RARITY_THRESHOLD, DEFAULT_WINDOW_MINUTES,
};

/// Configuration for the collision, pattern, and rare-pairing detectors.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DetectionConfig {
    /// Collision window in minutes. Default: 15. Zero disables collisions.
    pub window_minutes: Option<u32>,
    /// Rare-pairing ratio threshold in (0, 1]. Default: 0.10.
    pub rarity_threshold: Option<f64>,
    /// Operators with fewer events are skipped by the pattern detector.
    /// Default: 0 (every operator is evaluated).
    pub min_pattern_events: Option<usize>,
}

impl DetectionConfig {
    /// Returns the effective collision window, defaulting to 15.
    pub fn effective_window_minutes(&self) -> u32 {
        self.window_minutes.unwrap_or(DEFAULT_WINDOW_MINUTES)
    }

    /// Returns the effective rarity threshold, defaulting to 0.10.
    pub fn effective_rarity_threshold(&self) -> f64 {
        self.rarity_threshold.unwrap_or(DEFAULT_RARITY_THRESHOLD)
    }

    /// Returns the effective minimum pattern partition size, defaulting to 0.
    pub fn effective_min_pattern_events(&self) -> usize {
        self.min_pattern_events.unwrap_or(DEFAULT_MIN_PATTERN_EVENTS)
    }
}
