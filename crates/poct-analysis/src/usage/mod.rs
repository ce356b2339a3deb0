//! Usage-log misuse rules and per-operator suspicion scoring.

pub mod rules;
pub mod scoring;

pub use rules::{evaluate_usage_rules, UsageRuleHit};
pub use scoring::{score_operators, OperatorScore, RiskLevel};
