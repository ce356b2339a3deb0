//! Grouping events by operator.

use poct_core::types::{Event, FxHashMap};

/// Partition events by operator, keeping first-appearance order of operators
/// and input order within each partition.
pub fn partition_by_operator(events: &[Event]) -> Vec<(&str, Vec<&Event>)> {
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut partitions: Vec<(&str, Vec<&Event>)> = Vec::new();

    for event in events {
        let slot = *index.entry(event.operator.as_str()).or_insert_with(|| {
            partitions.push((event.operator.as_str(), Vec::new()));
            partitions.len() - 1
        });
        partitions[slot].1.push(event);
    }

    partitions
}
