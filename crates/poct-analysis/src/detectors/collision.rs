//! Same-operator collisions: one operator at two devices or locations
//! within a short time window.
//!
//! Per operator the events are sorted by timestamp, then every event scans
//! forward until the first event outside the window. Sorting gives a
//! monotonic time axis, so the scan is O(n log n + k) per operator for k
//! colliding pairs. Every pair in the window is reported, not just nearest
//! neighbours.

use chrono::TimeDelta;
use poct_core::types::Event;

use super::flag::CollisionFlag;
use super::partition::partition_by_operator;

/// Detect collisions within `window_minutes` (inclusive).
///
/// A window of 0 disables detection.
pub fn detect_collisions(events: &[Event], window_minutes: u32) -> Vec<CollisionFlag<'_>> {
    if window_minutes == 0 {
        return Vec::new();
    }
    let window = TimeDelta::minutes(i64::from(window_minutes));

    let mut flagged = Vec::new();
    let mut partitions = 0usize;
    for (operator, mut ops) in partition_by_operator(events) {
        partitions += 1;
        // Stable: equal timestamps keep input order.
        ops.sort_by_key(|e| e.timestamp);

        for (i, &current) in ops.iter().enumerate() {
            for &compare in &ops[i + 1..] {
                if compare.timestamp - current.timestamp > window {
                    break;
                }
                if current.device != compare.device || current.location != compare.location {
                    flagged.push(CollisionFlag {
                        operator,
                        current,
                        compare,
                    });
                }
            }
        }
    }

    tracing::debug!(
        events = events.len(),
        operators = partitions,
        window_minutes,
        collisions = flagged.len(),
        "collision detection complete"
    );
    flagged
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(op: &str, device: &str, location: &str, h: u32, m: u32, s: u32) -> Event {
        let ts = NaiveDate::from_ymd_opt(2024, 2, 10)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap();
        Event::new(op, device, location, "", ts)
    }

    #[test]
    fn two_sites_ten_minutes_apart() {
        let events = vec![
            at("OP1", "device1", "locA", 8, 0, 0),
            at("OP1", "device2", "locB", 8, 10, 0),
        ];
        let flags = detect_collisions(&events, 15);
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].operator, "OP1");
        assert_eq!(flags[0].current.device, "device1");
        assert_eq!(flags[0].compare.device, "device2");
    }

    #[test]
    fn window_boundary_is_inclusive() {
        let events = vec![
            at("OP1", "d1", "A", 8, 0, 0),
            at("OP1", "d2", "A", 8, 15, 0),
        ];
        assert_eq!(detect_collisions(&events, 15).len(), 1);

        let events = vec![
            at("OP1", "d1", "A", 8, 0, 0),
            at("OP1", "d2", "A", 8, 15, 1),
        ];
        assert!(detect_collisions(&events, 15).is_empty());
    }

    #[test]
    fn same_device_and_location_is_not_a_collision() {
        let events = vec![
            at("OP1", "d1", "A", 8, 0, 0),
            at("OP1", "d1", "A", 8, 1, 0),
        ];
        assert!(detect_collisions(&events, 15).is_empty());
    }

    #[test]
    fn different_operators_never_collide() {
        let events = vec![
            at("OP1", "d1", "A", 8, 0, 0),
            at("OP2", "d2", "B", 8, 1, 0),
        ];
        assert!(detect_collisions(&events, 15).is_empty());
    }

    #[test]
    fn reports_every_pair_in_window() {
        let events = vec![
            at("OP1", "d1", "A", 8, 0, 0),
            at("OP1", "d2", "B", 8, 5, 0),
            at("OP1", "d3", "C", 8, 10, 0),
        ];
        // (0,1), (0,2), (1,2)
        assert_eq!(detect_collisions(&events, 15).len(), 3);
    }

    #[test]
    fn sorts_unordered_input() {
        let events = vec![
            at("OP1", "d2", "B", 9, 10, 0),
            at("OP1", "d1", "A", 9, 0, 0),
            at("OP1", "d1", "A", 7, 0, 0),
        ];
        let flags = detect_collisions(&events, 15);
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].current.timestamp, events[1].timestamp);
        assert_eq!(flags[0].compare.timestamp, events[0].timestamp);
    }

    #[test]
    fn zero_window_disables_detection() {
        let events = vec![
            at("OP1", "d1", "A", 8, 0, 0),
            at("OP1", "d2", "B", 8, 0, 0),
        ];
        assert!(detect_collisions(&events, 0).is_empty());
    }

    #[test]
    fn empty_and_singleton_inputs() {
        assert!(detect_collisions(&[], 15).is_empty());
        let one = vec![at("OP1", "d1", "A", 8, 0, 0)];
        assert!(detect_collisions(&one, 15).is_empty());
    }
}
