//! Aggregates over usage events that feed review charts.
//! Computation only; no rendering.

pub mod hourly;
pub mod matrix;

pub use hourly::{hour_box_stats, hourly_counts, HourBoxStats};
pub use matrix::{device_location_matrix, DeviceUsage, LocationCount};
