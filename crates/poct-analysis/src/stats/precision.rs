//! Precision bands for device CV%.

use std::fmt;

use poct_core::types::Reading;
use serde::{Deserialize, Serialize};

use super::device::{device_stats, group_by_device, DeviceStats};

/// Precision classification of a CV%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrecisionBand {
    Acceptable,
    Warning,
    Unacceptable,
}

impl PrecisionBand {
    /// `cv < warn` is acceptable, `cv < fail` a warning, anything else
    /// (including NaN) unacceptable.
    pub fn classify(cv: f64, warn_percent: f64, fail_percent: f64) -> Self {
        if cv < warn_percent {
            Self::Acceptable
        } else if cv < fail_percent {
            Self::Warning
        } else {
            Self::Unacceptable
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Acceptable => "acceptable",
            Self::Warning => "warning",
            Self::Unacceptable => "unacceptable",
        }
    }
}

impl fmt::Display for PrecisionBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the per-device statistics table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceRow {
    pub device: String,
    #[serde(flatten)]
    pub stats: DeviceStats,
    pub band: PrecisionBand,
}

/// Per-device statistics in first-appearance order.
pub fn device_table(readings: &[Reading], warn_percent: f64, fail_percent: f64) -> Vec<DeviceRow> {
    group_by_device(readings)
        .into_iter()
        .map(|(device, group)| {
            let stats = device_stats(&group);
            DeviceRow {
                device: device.to_string(),
                band: PrecisionBand::classify(stats.cv, warn_percent, fail_percent),
                stats,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_edges() {
        assert_eq!(PrecisionBand::classify(4.99, 5.0, 10.0), PrecisionBand::Acceptable);
        assert_eq!(PrecisionBand::classify(5.0, 5.0, 10.0), PrecisionBand::Warning);
        assert_eq!(PrecisionBand::classify(10.0, 5.0, 10.0), PrecisionBand::Unacceptable);
        assert_eq!(PrecisionBand::classify(f64::NAN, 5.0, 10.0), PrecisionBand::Unacceptable);
    }

    #[test]
    fn table_rows_per_device() {
        let readings = vec![
            Reading::new("A", "glucose", 10.0, 9.0),
            Reading::new("B", "glucose", 5.0, 5.0),
            Reading::new("A", "glucose", 12.0, 9.0),
            Reading::new("B", "glucose", 5.0, 5.0),
        ];
        let rows = device_table(&readings, 5.0, 10.0);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].device, "A");
        assert_eq!(rows[0].band, PrecisionBand::Warning);
        assert_eq!(rows[1].device, "B");
        assert_eq!(rows[1].stats.cv, 0.0);
        assert_eq!(rows[1].band, PrecisionBand::Acceptable);
    }
}
