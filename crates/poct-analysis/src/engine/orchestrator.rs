//! The analysis engine: validates input, then runs each stage in order.

use poct_core::config::PoctConfig;
use poct_core::errors::{AnalysisError, ConfigError};
use poct_core::traits::Cancellable;
use poct_core::types::{validate_events, validate_readings, Event, Reading};
use tracing::{debug, info, info_span};

use super::reports::{QcReport, UsageReport};
use crate::detectors::{
    detect_collisions, detect_device_ward_violations, detect_unusual_patterns_with_min, Flag,
};
use crate::stats::{agreement_points, compute_stats_with_policy, device_table, mean_bias};
use crate::summary::{device_location_matrix, hour_box_stats, hourly_counts};
use crate::usage::{evaluate_usage_rules, score_operators};

/// Stateless between calls; holds only a validated configuration.
#[derive(Debug, Clone, Default)]
pub struct AnalysisEngine {
    config: PoctConfig,
}

/// Token used by the non-cancellable entry points.
struct NeverCancelled;

impl Cancellable for NeverCancelled {
    fn is_cancelled(&self) -> bool {
        false
    }

    fn cancel(&self) {}
}

fn checkpoint(cancel: &dyn Cancellable, stage: &str) -> Result<(), AnalysisError> {
    if cancel.is_cancelled() {
        info!(stage, "analysis cancelled");
        return Err(AnalysisError::Cancelled);
    }
    Ok(())
}

impl AnalysisEngine {
    /// Fails with the first invalid setting. Configs built in code get the
    /// same checks as those loaded from `poct.toml`.
    pub fn new(config: PoctConfig) -> Result<Self, ConfigError> {
        PoctConfig::validate(&config)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PoctConfig {
        &self.config
    }

    /// Collision, pattern and rare-pairing flags, concatenated in that order.
    pub fn detect_anomalies<'a>(&self, events: &'a [Event]) -> Result<Vec<Flag<'a>>, AnalysisError> {
        self.detect_anomalies_with_cancellation(events, &NeverCancelled)
    }

    pub fn detect_anomalies_with_cancellation<'a>(
        &self,
        events: &'a [Event],
        cancel: &dyn Cancellable,
    ) -> Result<Vec<Flag<'a>>, AnalysisError> {
        let _span = info_span!("detect_anomalies", events = events.len()).entered();
        validate_events(events)?;

        let detection = &self.config.detection;
        let mut flags: Vec<Flag<'a>> = Vec::new();

        checkpoint(cancel, "collisions")?;
        flags.extend(
            detect_collisions(events, detection.effective_window_minutes())
                .into_iter()
                .map(Flag::from),
        );

        checkpoint(cancel, "patterns")?;
        flags.extend(
            detect_unusual_patterns_with_min(events, detection.effective_min_pattern_events())
                .into_iter()
                .map(Flag::from),
        );

        checkpoint(cancel, "ward_violations")?;
        flags.extend(
            detect_device_ward_violations(events, detection.effective_rarity_threshold())
                .into_iter()
                .map(Flag::from),
        );

        info!(flags = flags.len(), "anomaly detection complete");
        Ok(flags)
    }

    /// Anomaly flags, per-event rule hits, operator scores and chart
    /// summaries for one usage log.
    pub fn analyze_usage<'a>(&self, events: &'a [Event]) -> Result<UsageReport<'a>, AnalysisError> {
        self.analyze_usage_with_cancellation(events, &NeverCancelled)
    }

    pub fn analyze_usage_with_cancellation<'a>(
        &self,
        events: &'a [Event],
        cancel: &dyn Cancellable,
    ) -> Result<UsageReport<'a>, AnalysisError> {
        let _span = info_span!("analyze_usage", events = events.len()).entered();
        let flags = self.detect_anomalies_with_cancellation(events, cancel)?;

        checkpoint(cancel, "usage_rules")?;
        let rule_hits = evaluate_usage_rules(events, &self.config.usage);
        let operator_scores = score_operators(&rule_hits);
        debug!(
            flagged = rule_hits.iter().filter(|h| h.flagged()).count(),
            operators = operator_scores.len(),
            "usage rules evaluated"
        );

        checkpoint(cancel, "summaries")?;
        Ok(UsageReport {
            flags,
            rule_hits,
            operator_scores,
            hourly_counts: hourly_counts(events),
            device_location_matrix: device_location_matrix(events),
            hour_box_stats: hour_box_stats(events),
        })
    }

    /// Global and per-device statistics plus agreement data for one batch
    /// of readings, under the configured analyte policy.
    pub fn analyze_readings(&self, readings: &[Reading]) -> Result<QcReport, AnalysisError> {
        self.analyze_readings_with_cancellation(readings, &NeverCancelled)
    }

    pub fn analyze_readings_with_cancellation(
        &self,
        readings: &[Reading],
        cancel: &dyn Cancellable,
    ) -> Result<QcReport, AnalysisError> {
        let _span = info_span!("analyze_readings", readings = readings.len()).entered();
        validate_readings(readings)?;

        let stats = &self.config.stats;
        let warn = stats.effective_cv_warning_percent();
        let fail = stats.effective_cv_fail_percent();

        checkpoint(cancel, "global_stats")?;
        let global = compute_stats_with_policy(readings, stats.effective_analyte_policy())?;

        checkpoint(cancel, "device_stats")?;
        let devices = device_table(readings, warn, fail);

        checkpoint(cancel, "agreement")?;
        let agreement = agreement_points(readings);
        let bias = mean_bias(readings);

        info!(devices = devices.len(), cv = global.cv, "readings analyzed");
        Ok(QcReport {
            global_cv_warning: global.exceeds_cv_limit(warn),
            global_cv_failed: global.exceeds_cv_limit(fail),
            global,
            devices,
            agreement,
            mean_bias: bias,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use poct_core::config::AnalytePolicy;
    use poct_core::errors::InputError;
    use poct_core::traits::CancellationToken;

    use crate::detectors::FlagKind;

    fn ev(op: &str, device: &str, location: &str, h: u32, m: u32) -> Event {
        let ts = NaiveDate::from_ymd_opt(2024, 6, 3)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap();
        Event::new(op, device, location, "glucose", ts)
    }

    #[test]
    fn flags_are_ordered_by_detector() {
        let events = vec![
            ev("C", "D1", "ER", 18, 0),
            ev("A", "D1", "ICU", 8, 0),
            ev("A", "D2", "ER", 8, 10),
            ev("B", "D1", "ICU", 12, 0),
            ev("B", "D1", "ICU", 13, 0),
        ];
        let mut config = PoctConfig::default();
        config.detection.rarity_threshold = Some(0.3);
        let flags = AnalysisEngine::new(config).unwrap().detect_anomalies(&events).unwrap();

        let kinds: Vec<FlagKind> = flags.iter().map(Flag::kind).collect();
        assert_eq!(kinds, vec![FlagKind::Collision, FlagKind::WardViolation]);
        assert_eq!(flags[1].operator(), "C");
    }

    #[test]
    fn invalid_event_is_rejected() {
        let events = vec![ev("", "D1", "ICU", 8, 0)];
        let err = AnalysisEngine::default().detect_anomalies(&events).unwrap_err();
        assert!(matches!(err, AnalysisError::Input(InputError::ContractViolation { .. })));
    }

    #[test]
    fn cancelled_token_stops_analysis() {
        let token = CancellationToken::new();
        token.cancel();
        let events = vec![ev("A", "D1", "ICU", 8, 0)];
        let err = AnalysisEngine::default()
            .analyze_usage_with_cancellation(&events, &token)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Cancelled));
    }

    #[test]
    fn reject_policy_surfaces_mixed_analytes() {
        let readings = vec![
            Reading::new("D1", "glucose", 5.0, 5.0),
            Reading::new("D1", "lactate", 2.0, 2.0),
        ];
        let mut config = PoctConfig::default();
        config.stats.analyte_policy = Some(AnalytePolicy::Reject);
        let err = AnalysisEngine::new(config)
            .unwrap()
            .analyze_readings(&readings)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Input(InputError::MixedAnalytes { .. })));

        let report = AnalysisEngine::default().analyze_readings(&readings).unwrap();
        assert_eq!(report.global.analyte, "glucose");
    }

    #[test]
    fn empty_inputs_produce_empty_reports() {
        let engine = AnalysisEngine::default();
        let usage = engine.analyze_usage(&[]).unwrap();
        assert!(usage.flags.is_empty());
        assert!(usage.operator_scores.is_empty());
        assert_eq!(usage.hourly_counts, [0; 24]);

        let qc = engine.analyze_readings(&[]).unwrap();
        assert_eq!(qc.global.count, 0);
        assert!(qc.devices.is_empty());
        assert!(!qc.global_cv_warning);
        assert!(!qc.global_cv_failed);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = PoctConfig::default();
        config.usage.hop_threshold = Some(0);
        match AnalysisEngine::new(config).unwrap_err() {
            ConfigError::ValidationFailed { field, .. } => assert_eq!(field, "usage.hop_threshold"),
            other => panic!("unexpected error: {other:?}"),
        }

        let mut config = PoctConfig::default();
        config.detection.rarity_threshold = Some(5.0);
        assert!(AnalysisEngine::new(config).is_err());
    }

    #[test]
    fn global_cv_between_limits_warns_without_failing() {
        let readings = vec![
            Reading::new("A", "glucose", 10.0, 9.0),
            Reading::new("A", "glucose", 12.0, 9.0),
        ];
        let report = AnalysisEngine::default().analyze_readings(&readings).unwrap();
        assert!((report.global.cv - 9.090_909).abs() < 1e-5);
        assert!(report.global_cv_warning);
        assert!(!report.global_cv_failed);
    }
}
