//! Per-device statistics.

use std::borrow::Borrow;

use poct_core::types::{FxHashMap, Reading};
use serde::{Deserialize, Serialize};

use super::descriptive::{coefficient_of_variation, mean_and_population_sd};

/// Mean, population SD, CV%, and sample count of `measured_value`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceStats {
    pub mean: f64,
    pub sd: f64,
    #[serde(with = "super::cv_serde")]
    pub cv: f64,
    pub count: usize,
}

impl DeviceStats {
    /// Statistics of an empty series: all zero.
    pub fn empty() -> Self {
        Self {
            mean: 0.0,
            sd: 0.0,
            cv: 0.0,
            count: 0,
        }
    }

    pub(crate) fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::empty();
        }
        let (mean, sd) = mean_and_population_sd(values);
        Self {
            mean,
            sd,
            cv: coefficient_of_variation(sd, mean),
            count: values.len(),
        }
    }
}

/// Partition readings by `device_id` (exact, case-sensitive match).
///
/// Devices appear in first-appearance order and readings keep input order
/// within each group; the order is for display only.
pub fn group_by_device(readings: &[Reading]) -> Vec<(&str, Vec<&Reading>)> {
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut groups: Vec<(&str, Vec<&Reading>)> = Vec::new();

    for reading in readings {
        let slot = *index.entry(reading.device_id.as_str()).or_insert_with(|| {
            groups.push((reading.device_id.as_str(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(reading);
    }

    groups
}

/// Statistics for the readings of one device.
///
/// An empty slice yields [`DeviceStats::empty`]. A zero mean yields a
/// non-finite `cv` rather than an error.
pub fn device_stats<R: Borrow<Reading>>(readings: &[R]) -> DeviceStats {
    let values: Vec<f64> = readings.iter().map(|r| r.borrow().measured_value).collect();
    DeviceStats::from_values(&values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_readings_on_device_a() {
        let readings = vec![
            Reading::new("A", "glucose", 10.0, 9.0),
            Reading::new("A", "glucose", 12.0, 9.0),
        ];
        let stats = device_stats(&readings);
        assert_eq!(stats.mean, 11.0);
        assert_eq!(stats.sd, 1.0);
        assert!((stats.cv - 9.0909).abs() < 1e-3);
        assert_eq!(stats.count, 2);
    }

    #[test]
    fn works_on_grouped_references() {
        let readings = vec![
            Reading::new("A", "glucose", 10.0, 9.0),
            Reading::new("B", "glucose", 4.0, 4.0),
            Reading::new("A", "glucose", 12.0, 9.0),
        ];
        let groups = group_by_device(&readings);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "A");
        assert_eq!(groups[1].0, "B");
        let a = device_stats(&groups[0].1);
        assert_eq!(a.count, 2);
        assert_eq!(a.mean, 11.0);
    }

    #[test]
    fn zero_mean_gives_nan_cv() {
        let readings = vec![
            Reading::new("Z", "control", 0.0, 0.0),
            Reading::new("Z", "control", 0.0, 0.0),
        ];
        let stats = device_stats(&readings);
        assert_eq!(stats.mean, 0.0);
        assert!(stats.cv.is_nan());
    }

    #[test]
    fn symmetric_around_zero_gives_infinite_cv() {
        let readings = vec![
            Reading::new("Z", "control", -1.0, 0.0),
            Reading::new("Z", "control", 1.0, 0.0),
        ];
        let stats = device_stats(&readings);
        assert!(stats.cv.is_infinite());
    }

    #[test]
    fn empty_series() {
        let none: Vec<Reading> = Vec::new();
        assert_eq!(device_stats(&none), DeviceStats::empty());
    }
}
