//! Device-by-location usage counts.

use poct_core::types::{Event, FxHashMap};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationCount {
    pub location: String,
    pub count: usize,
}

/// Locations a device was used at, with counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceUsage {
    pub device: String,
    pub total: usize,
    pub locations: Vec<LocationCount>,
}

/// Usage counts per device and location. Devices, and locations within a
/// device, appear in first-appearance order.
pub fn device_location_matrix(events: &[Event]) -> Vec<DeviceUsage> {
    let mut device_index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut cell_index: FxHashMap<(&str, &str), usize> = FxHashMap::default();
    let mut rows: Vec<DeviceUsage> = Vec::new();

    for e in events {
        let row = *device_index.entry(e.device.as_str()).or_insert_with(|| {
            rows.push(DeviceUsage {
                device: e.device.clone(),
                total: 0,
                locations: Vec::new(),
            });
            rows.len() - 1
        });
        let usage = &mut rows[row];
        usage.total += 1;

        let cell = *cell_index
            .entry((e.device.as_str(), e.location.as_str()))
            .or_insert_with(|| {
                usage.locations.push(LocationCount {
                    location: e.location.clone(),
                    count: 0,
                });
                usage.locations.len() - 1
            });
        usage.locations[cell].count += 1;
    }

    rows
}
