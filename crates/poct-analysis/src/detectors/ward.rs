//! Rare device/location pairings.
//!
//! A pairing is rare when `count(device, location) / count(device)` is below
//! the threshold. Rarity is relative to each device's own observed usage: a
//! device seen at a single location has ratio 1.0 there and is never flagged.

use poct_core::types::{Event, FxHashMap};

/// Return every event whose own device/location pairing is rare, in input
/// order.
pub fn detect_device_ward_violations(events: &[Event], threshold: f64) -> Vec<&Event> {
    let mut pair_counts: FxHashMap<(&str, &str), usize> = FxHashMap::default();
    let mut device_totals: FxHashMap<&str, usize> = FxHashMap::default();

    for e in events {
        *pair_counts
            .entry((e.device.as_str(), e.location.as_str()))
            .or_default() += 1;
        *device_totals.entry(e.device.as_str()).or_default() += 1;
    }

    let is_rare = |e: &Event| -> bool {
        let key = (e.device.as_str(), e.location.as_str());
        let pair = pair_counts.get(&key).copied().unwrap_or(0) as f64;
        let total = device_totals.get(e.device.as_str()).copied().unwrap_or(0) as f64;
        total > 0.0 && pair / total < threshold
    };

    let flagged: Vec<&Event> = events.iter().filter(|e| is_rare(e)).collect();

    tracing::debug!(
        events = events.len(),
        devices = device_totals.len(),
        pairings = pair_counts.len(),
        threshold,
        flagged = flagged.len(),
        "rare pairing detection complete"
    );
    flagged
}
