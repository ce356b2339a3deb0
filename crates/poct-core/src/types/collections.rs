//! Re-export of the hash map used for grouping.
//!
//! Keys are exact, case-sensitive string matches.

pub use rustc_hash::FxHashMap;
