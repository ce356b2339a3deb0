//! Record model and collection types.

pub mod collections;
pub mod records;

pub use collections::FxHashMap;
pub use records::{validate_events, validate_readings, Event, Reading};
