//! Per-event misuse rules, evaluated per operator in timestamp order.
//!
//! - RAPID: the operator's previous event is less than
//!   `rapid_threshold_secs` earlier.
//! - LOC_CONFLICT: the previous event is at another location and no more
//!   than `conflict_window_minutes` earlier.
//! - DEVICE_HOP: within `±hop_window_minutes` of the event the operator used
//!   at least `hop_threshold` distinct devices.

use chrono::TimeDelta;
use poct_core::config::UsageRulesConfig;
use poct_core::types::{Event, FxHashMap};
use serde::Serialize;

/// Rule outcome for one event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageRuleHit<'a> {
    pub event: &'a Event,
    pub rapid: bool,
    pub loc_conflict: bool,
    pub device_hop: bool,
}

impl UsageRuleHit<'_> {
    /// True when any rule fired.
    pub fn flagged(&self) -> bool {
        self.rapid || self.loc_conflict || self.device_hop
    }
}

/// Evaluate every rule for every event. One hit per input event, input order.
pub fn evaluate_usage_rules<'a>(
    events: &'a [Event],
    config: &UsageRulesConfig,
) -> Vec<UsageRuleHit<'a>> {
    let rapid_threshold = TimeDelta::seconds(i64::from(config.effective_rapid_threshold_secs()));
    let conflict_window = TimeDelta::minutes(i64::from(config.effective_conflict_window_minutes()));
    let hop_window = TimeDelta::minutes(i64::from(config.effective_hop_window_minutes()));
    let hop_threshold = config.effective_hop_threshold();

    let mut hits: Vec<UsageRuleHit<'a>> = events
        .iter()
        .map(|event| UsageRuleHit {
            event,
            rapid: false,
            loc_conflict: false,
            device_hop: false,
        })
        .collect();

    let mut by_operator: FxHashMap<&str, Vec<usize>> = FxHashMap::default();
    for (idx, e) in events.iter().enumerate() {
        by_operator.entry(e.operator.as_str()).or_default().push(idx);
    }

    for mut order in by_operator.into_values() {
        order.sort_by_key(|&i| events[i].timestamp);

        for pair in order.windows(2) {
            let (prev, cur) = (&events[pair[0]], &events[pair[1]]);
            let delta = cur.timestamp - prev.timestamp;
            let hit = &mut hits[pair[1]];
            hit.rapid = delta < rapid_threshold;
            hit.loc_conflict = prev.location != cur.location && delta <= conflict_window;
        }

        mark_device_hops(events, &order, hop_window, hop_threshold, &mut hits);
    }

    tracing::debug!(
        events = events.len(),
        flagged = hits.iter().filter(|h| h.flagged()).count(),
        "usage rules evaluated"
    );
    hits
}

/// Sliding window over one operator's time-ordered events, tracking
/// distinct devices in `[t - window, t + window]`. Bounds are compared as
/// differences so timestamps at the ends of the calendar cannot overflow.
fn mark_device_hops(
    events: &[Event],
    order: &[usize],
    window: TimeDelta,
    threshold: usize,
    hits: &mut [UsageRuleHit<'_>],
) {
    let mut device_counts: FxHashMap<&str, usize> = FxHashMap::default();
    let (mut lo, mut hi) = (0usize, 0usize);

    for &idx in order {
        let t = events[idx].timestamp;

        while hi < order.len() && events[order[hi]].timestamp - t <= window {
            *device_counts.entry(events[order[hi]].device.as_str()).or_default() += 1;
            hi += 1;
        }
        while t - events[order[lo]].timestamp > window {
            let device = events[order[lo]].device.as_str();
            if let Some(count) = device_counts.get_mut(device) {
                *count -= 1;
                if *count == 0 {
                    device_counts.remove(device);
                }
            }
            lo += 1;
        }

        if device_counts.len() >= threshold {
            hits[idx].device_hop = true;
        }
    }
}
