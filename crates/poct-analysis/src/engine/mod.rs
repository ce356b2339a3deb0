//! Orchestration of detectors, rules and statistics under one configuration.

pub mod orchestrator;
pub mod reports;

pub use orchestrator::AnalysisEngine;
pub use reports::{QcReport, UsageReport};
