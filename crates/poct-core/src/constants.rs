//! Shared constants for the POCT analysis engine.

/// Default collision window in minutes.
pub const DEFAULT_WINDOW_MINUTES: u32 = 15;

/// Default rare-pairing ratio threshold.
pub const DEFAULT_RARITY_THRESHOLD: f64 = 0.1;

/// Fixed deviation multiplier for time-of-day pattern detection.
/// Not configurable.
pub const PATTERN_DEVIATION_MULTIPLIER: f64 = 2.0;

/// Default minimum partition size for pattern detection (0 = no minimum).
pub const DEFAULT_MIN_PATTERN_EVENTS: usize = 0;

/// Default CV% above which a device's precision is a warning.
pub const DEFAULT_CV_WARNING_PERCENT: f64 = 5.0;

/// Default CV% above which a device's precision is unacceptable.
pub const DEFAULT_CV_FAIL_PERCENT: f64 = 10.0;

// ---- Usage rules ----

/// Seconds between consecutive events of one operator below which the
/// later event is RAPID.
pub const DEFAULT_RAPID_THRESHOLD_SECS: u32 = 60;

/// Distinct devices within the hop window that make a DEVICE_HOP.
pub const DEFAULT_HOP_THRESHOLD: usize = 3;

/// Half-width of the device hop window in minutes.
pub const DEFAULT_HOP_WINDOW_MINUTES: u32 = 5;

/// Maximum gap in minutes for a LOC_CONFLICT with the previous event.
pub const DEFAULT_CONFLICT_WINDOW_MINUTES: u32 = 5;

// ---- Operator scoring ----

pub const SCORE_WEIGHT_FLAGGED: f64 = 2.0;
pub const SCORE_WEIGHT_RAPID: f64 = 1.5;
pub const SCORE_WEIGHT_LOC_CONFLICT: f64 = 1.25;
pub const SCORE_WEIGHT_DEVICE_HOP: f64 = 1.0;

/// Suspicion score at or above which an operator is high risk.
pub const RISK_HIGH_SCORE: f64 = 75.0;

/// Suspicion score at or above which an operator is medium risk.
pub const RISK_MEDIUM_SCORE: f64 = 40.0;

/// Project config file name looked up in the analysis root.
pub const PROJECT_CONFIG_FILE: &str = "poct.toml";

/// Environment variable holding the tracing filter.
pub const LOG_ENV_VAR: &str = "POCT_LOG";
