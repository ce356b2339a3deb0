//! Configuration system.
//! TOML-based, layered resolution: CLI > env > project > defaults.

pub mod detection_config;
pub mod poct_config;
pub mod stats_config;
pub mod usage_config;

pub use detection_config::DetectionConfig;
pub use poct_config::{CliOverrides, PoctConfig};
pub use stats_config::{AnalytePolicy, StatsConfig};
pub use usage_config::UsageRulesConfig;
