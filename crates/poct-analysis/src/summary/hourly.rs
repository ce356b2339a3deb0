//! Hour-of-day distributions.

use poct_core::types::Event;
use serde::{Deserialize, Serialize};

use crate::detectors::partition_by_operator;

/// Event counts per hour of day, across all operators.
pub fn hourly_counts(events: &[Event]) -> [u32; 24] {
    let mut counts = [0u32; 24];
    for e in events {
        counts[e.hour() as usize] += 1;
    }
    counts
}

/// Five-number summary of one operator's hours of day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourBoxStats {
    pub operator: String,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Box-plot statistics per operator, in first-appearance order.
pub fn hour_box_stats(events: &[Event]) -> Vec<HourBoxStats> {
    partition_by_operator(events)
        .into_iter()
        .map(|(operator, ops)| {
            let mut hours: Vec<f64> = ops.iter().map(|e| f64::from(e.hour())).collect();
            hours.sort_by(f64::total_cmp);
            HourBoxStats {
                operator: operator.to_string(),
                min: hours[0],
                q1: quantile(&hours, 0.25),
                median: quantile(&hours, 0.5),
                q3: quantile(&hours, 0.75),
                max: hours[hours.len() - 1],
            }
        })
        .collect()
}

/// Linear interpolation at position `(n - 1) * q` of a sorted, non-empty
/// slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * q;
    let base = pos.floor() as usize;
    let rest = pos - base as f64;
    match sorted.get(base + 1) {
        Some(next) => sorted[base] + rest * (next - sorted[base]),
        None => sorted[base],
    }
}
