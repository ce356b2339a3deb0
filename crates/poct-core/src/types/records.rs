//! Normalized in-memory records handed to the engine by the parsing layer.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::errors::InputError;

/// One row of a device usage log.
///
/// Immutable once parsed. `timestamp` is the wall-clock time as logged; the
/// engine reorders events per operator but never touches the timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    pub operator: String,
    pub device: String,
    pub location: String,
    pub test: String,
    pub timestamp: NaiveDateTime,
}

impl Event {
    pub fn new(
        operator: impl Into<String>,
        device: impl Into<String>,
        location: impl Into<String>,
        test: impl Into<String>,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            operator: operator.into(),
            device: device.into(),
            location: location.into(),
            test: test.into(),
            timestamp,
        }
    }

    /// Hour of day, 0-23.
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }

    /// First required field that is empty, if any.
    ///
    /// `test` is carried for display only and is not required.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.operator.is_empty() {
            Some("operator")
        } else if self.device.is_empty() {
            Some("device")
        } else if self.location.is_empty() {
            Some("location")
        } else {
            None
        }
    }
}

/// One quality-control reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub device_id: String,
    pub analyte: String,
    #[serde(default)]
    pub test_date: Option<NaiveDate>,
    pub measured_value: f64,
    pub target_value: f64,
}

impl Reading {
    pub fn new(
        device_id: impl Into<String>,
        analyte: impl Into<String>,
        measured_value: f64,
        target_value: f64,
    ) -> Self {
        Self {
            device_id: device_id.into(),
            analyte: analyte.into(),
            test_date: None,
            measured_value,
            target_value,
        }
    }

    /// `measured_value - target_value`.
    pub fn bias(&self) -> f64 {
        self.measured_value - self.target_value
    }

    /// `(measured_value + target_value) / 2`.
    pub fn midpoint(&self) -> f64 {
        (self.measured_value + self.target_value) / 2.0
    }

    /// First invalid field and the reason, if any.
    pub fn invalid_field(&self) -> Option<(&'static str, &'static str)> {
        if self.device_id.is_empty() {
            Some(("device_id", "must not be empty"))
        } else if !self.measured_value.is_finite() {
            Some(("measured_value", "must be a finite number"))
        } else if !self.target_value.is_finite() {
            Some(("target_value", "must be a finite number"))
        } else {
            None
        }
    }
}

/// Reject the first event with an empty required field.
pub fn validate_events(events: &[Event]) -> Result<(), InputError> {
    for (index, event) in events.iter().enumerate() {
        if let Some(field) = event.missing_field() {
            return Err(InputError::ContractViolation {
                record: "event",
                index,
                field,
                message: "required field is empty".to_string(),
            });
        }
    }
    Ok(())
}

/// Reject the first reading with an empty device id or non-finite value.
pub fn validate_readings(readings: &[Reading]) -> Result<(), InputError> {
    for (index, reading) in readings.iter().enumerate() {
        if let Some((field, reason)) = reading.invalid_field() {
            return Err(InputError::ContractViolation {
                record: "reading",
                index,
                field,
                message: reason.to_string(),
            });
        }
    }
    Ok(())
}
