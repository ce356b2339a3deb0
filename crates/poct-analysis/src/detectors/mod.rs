//! Anomaly detectors over usage-log events.
//!
//! Each detector is a pure function of its input slice. Flags borrow the
//! events they annotate, so they cannot outlive or alter them.

pub mod collision;
pub mod flag;
pub mod partition;
pub mod pattern;
pub mod ward;

pub use collision::detect_collisions;
pub use flag::{CollisionFlag, Flag, FlagKind, PatternFlag, WardViolationFlag};
pub use partition::partition_by_operator;
pub use pattern::{detect_unusual_patterns, detect_unusual_patterns_with_min};
pub use ward::detect_device_ward_violations;
