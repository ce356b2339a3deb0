//! Per-operator suspicion scores from usage rule hits.

use std::fmt;

use poct_core::constants::{
    RISK_HIGH_SCORE, RISK_MEDIUM_SCORE, SCORE_WEIGHT_DEVICE_HOP, SCORE_WEIGHT_FLAGGED,
    SCORE_WEIGHT_LOC_CONFLICT, SCORE_WEIGHT_RAPID,
};
use poct_core::types::FxHashMap;
use serde::{Deserialize, Serialize};

use super::rules::UsageRuleHit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= RISK_HIGH_SCORE {
            Self::High
        } else if score >= RISK_MEDIUM_SCORE {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rule hit totals and the weighted suspicion score of one operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorScore {
    pub operator: String,
    pub events: usize,
    pub flagged: usize,
    pub rapid: usize,
    pub loc_conflict: usize,
    pub device_hop: usize,
    pub suspicion_score: f64,
    pub risk: RiskLevel,
}

impl OperatorScore {
    fn new(operator: &str) -> Self {
        Self {
            operator: operator.to_string(),
            events: 0,
            flagged: 0,
            rapid: 0,
            loc_conflict: 0,
            device_hop: 0,
            suspicion_score: 0.0,
            risk: RiskLevel::Low,
        }
    }

    fn finish(mut self) -> Self {
        self.suspicion_score = self.flagged as f64 * SCORE_WEIGHT_FLAGGED
            + self.rapid as f64 * SCORE_WEIGHT_RAPID
            + self.loc_conflict as f64 * SCORE_WEIGHT_LOC_CONFLICT
            + self.device_hop as f64 * SCORE_WEIGHT_DEVICE_HOP;
        self.risk = RiskLevel::from_score(self.suspicion_score);
        self
    }
}

/// Score every operator seen in `hits`, highest score first, ties by
/// operator id.
pub fn score_operators(hits: &[UsageRuleHit<'_>]) -> Vec<OperatorScore> {
    let mut totals: FxHashMap<&str, OperatorScore> = FxHashMap::default();

    for hit in hits {
        let operator = hit.event.operator.as_str();
        let entry = totals
            .entry(operator)
            .or_insert_with(|| OperatorScore::new(operator));
        entry.events += 1;
        entry.flagged += usize::from(hit.flagged());
        entry.rapid += usize::from(hit.rapid);
        entry.loc_conflict += usize::from(hit.loc_conflict);
        entry.device_hop += usize::from(hit.device_hop);
    }

    let mut scores: Vec<OperatorScore> = totals.into_values().map(OperatorScore::finish).collect();
    scores.sort_by(|a, b| {
        b.suspicion_score
            .total_cmp(&a.suspicion_score)
            .then_with(|| a.operator.cmp(&b.operator))
    });
    scores
}
