//! # poct-analysis
//!
//! Pure, synchronous analysis over fully materialized record sequences.
//!
//! - `detectors`: collision, time-of-day pattern, and rare-pairing flags
//! - `stats`: per-device and global QC statistics, agreement points
//! - `usage`: RAPID / LOC_CONFLICT / DEVICE_HOP rules and operator scoring
//! - `summary`: hourly counts, device/location matrix, hour box stats
//! - `engine`: orchestrator tying the above to a `PoctConfig`
//!
//! Nothing here performs I/O or holds state between calls.

pub mod detectors;
pub mod engine;
pub mod stats;
pub mod summary;
pub mod usage;

pub use detectors::{
    detect_collisions, detect_device_ward_violations, detect_unusual_patterns, Flag, FlagKind,
};
pub use engine::{AnalysisEngine, QcReport, UsageReport};
pub use stats::{compute_stats, device_stats, DeviceStats, GlobalStats};
