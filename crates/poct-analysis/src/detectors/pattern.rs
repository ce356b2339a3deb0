//! Time-of-day outliers against each operator's own habits.
//!
//! Per operator: hour of day of every event, population mean and standard
//! deviation of those hours, and a flag for every event more than
//! `PATTERN_DEVIATION_MULTIPLIER` (2) standard deviations from the mean.
//!
//! With population sd, no point can sit more than √(n − 1) sd from the
//! mean, so operators with four or fewer events are never flagged and a
//! zero-variance partition never flags.

use poct_core::constants::PATTERN_DEVIATION_MULTIPLIER;
use poct_core::types::Event;

use super::flag::PatternFlag;
use super::partition::partition_by_operator;
use crate::stats::descriptive::mean_and_population_sd;

/// Flag unusual hours, evaluating every operator.
pub fn detect_unusual_patterns(events: &[Event]) -> Vec<PatternFlag<'_>> {
    detect_unusual_patterns_with_min(events, 0)
}

/// Flag unusual hours, skipping operators with fewer than `min_events`.
pub fn detect_unusual_patterns_with_min(
    events: &[Event],
    min_events: usize,
) -> Vec<PatternFlag<'_>> {
    let mut flagged = Vec::new();
    let mut skipped = 0usize;

    for (operator, ops) in partition_by_operator(events) {
        if ops.len() < min_events {
            skipped += 1;
            continue;
        }
        let hours: Vec<f64> = ops.iter().map(|e| f64::from(e.hour())).collect();
        let (mean, std_dev) = mean_and_population_sd(&hours);
        let limit = PATTERN_DEVIATION_MULTIPLIER * std_dev;

        for (&event, &hour) in ops.iter().zip(&hours) {
            if (hour - mean).abs() > limit {
                flagged.push(PatternFlag {
                    operator,
                    event,
                    mean,
                    std_dev,
                });
            }
        }
    }

    tracing::debug!(
        events = events.len(),
        skipped_operators = skipped,
        flagged = flagged.len(),
        "time-of-day pattern detection complete"
    );
    flagged
}
