//! Quality-control statistics over readings.

pub mod agreement;
mod cv_serde;
pub mod descriptive;
pub mod device;
pub mod global;
pub mod precision;

pub use agreement::{agreement_points, mean_bias, AgreementPoint};
pub use device::{device_stats, group_by_device, DeviceStats};
pub use global::{compute_stats, compute_stats_with_policy, GlobalStats};
pub use precision::{device_table, DeviceRow, PrecisionBand};
