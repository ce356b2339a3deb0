//! Measured-versus-target agreement (Altman-Bland).
//!
//! Only the points and the mean difference are computed here. Limits of
//! agreement and plotting belong to the consumer.

use poct_core::types::Reading;
use serde::{Deserialize, Serialize};

use super::descriptive::mean;

/// One point of an agreement plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgreementPoint {
    /// `(measured + target) / 2`
    pub midpoint: f64,
    /// `measured - target`
    pub bias: f64,
}

/// One point per reading, in input order.
pub fn agreement_points(readings: &[Reading]) -> Vec<AgreementPoint> {
    readings
        .iter()
        .map(|r| AgreementPoint {
            midpoint: r.midpoint(),
            bias: r.bias(),
        })
        .collect()
}

/// Mean of `measured - target`. 0.0 for no readings.
pub fn mean_bias(readings: &[Reading]) -> f64 {
    let biases: Vec<f64> = readings.iter().map(Reading::bias).collect();
    mean(&biases)
}
