//! Tests for configuration loading and layering.

use std::sync::Mutex;

use poct_core::config::{AnalytePolicy, CliOverrides, PoctConfig};
use poct_core::errors::ConfigError;

/// Serializes tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

fn clear_poct_env_vars() {
    for key in [
        "POCT_WINDOW_MINUTES",
        "POCT_RARITY_THRESHOLD",
        "POCT_MIN_PATTERN_EVENTS",
        "POCT_ANALYTE_POLICY",
        "POCT_RAPID_THRESHOLD_SECS",
        "POCT_HOP_THRESHOLD",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn defaults_without_project_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_poct_env_vars();

    let dir = tempdir();
    let config = PoctConfig::load(dir.path(), None).unwrap();

    assert_eq!(config.detection.effective_window_minutes(), 15);
    assert_eq!(config.detection.effective_rarity_threshold(), 0.1);
    assert_eq!(config.detection.effective_min_pattern_events(), 0);
    assert_eq!(config.stats.effective_analyte_policy(), AnalytePolicy::First);
    assert_eq!(config.stats.effective_cv_warning_percent(), 5.0);
    assert_eq!(config.stats.effective_cv_fail_percent(), 10.0);
    assert_eq!(config.usage.effective_rapid_threshold_secs(), 60);
    assert_eq!(config.usage.effective_hop_threshold(), 3);
    assert_eq!(config.usage.effective_hop_window_minutes(), 5);
    assert_eq!(config.usage.effective_conflict_window_minutes(), 5);
}

#[test]
fn cli_beats_env_beats_project() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_poct_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("poct.toml"),
        r#"
[detection]
window_minutes = 30
rarity_threshold = 0.2

[usage]
rapid_threshold_secs = 90
"#,
    )
    .unwrap();

    std::env::set_var("POCT_WINDOW_MINUTES", "20");
    std::env::set_var("POCT_RARITY_THRESHOLD", "0.3");

    let cli = CliOverrides {
        rarity_threshold: Some(0.05),
        ..Default::default()
    };
    let config = PoctConfig::load(dir.path(), Some(&cli)).unwrap();

    assert_eq!(config.detection.window_minutes, Some(20));
    assert_eq!(config.detection.rarity_threshold, Some(0.05));
    assert_eq!(config.usage.rapid_threshold_secs, Some(90));

    clear_poct_env_vars();
}

#[test]
fn unparsable_env_value_is_ignored() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_poct_env_vars();

    let dir = tempdir();
    std::env::set_var("POCT_WINDOW_MINUTES", "fifteen");
    std::env::set_var("POCT_ANALYTE_POLICY", "Reject");

    let config = PoctConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.detection.window_minutes, None);
    assert_eq!(config.stats.effective_analyte_policy(), AnalytePolicy::Reject);

    clear_poct_env_vars();
}

#[test]
fn invalid_toml_syntax_is_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_poct_env_vars();

    let dir = tempdir();
    std::fs::write(dir.path().join("poct.toml"), "this is not valid toml {{{{").unwrap();

    match PoctConfig::load(dir.path(), None).unwrap_err() {
        ConfigError::ParseError { .. } => {}
        other => panic!("Expected ParseError, got: {:?}", other),
    }
}

#[test]
fn rarity_threshold_out_of_range_fails_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_poct_env_vars();

    for bad in ["0.0", "1.5", "-0.1"] {
        let toml = format!("[detection]\nrarity_threshold = {bad}\n");
        match PoctConfig::from_toml(&toml).unwrap_err() {
            ConfigError::ValidationFailed { field, .. } => {
                assert_eq!(field, "detection.rarity_threshold");
            }
            other => panic!("Expected ValidationFailed for {bad}, got: {:?}", other),
        }
    }

    assert!(PoctConfig::from_toml("[detection]\nrarity_threshold = 1.0\n").is_ok());
}

#[test]
fn cv_bands_must_be_ordered() {
    let err = PoctConfig::from_toml(
        r#"
[stats]
cv_warning_percent = 12.0
cv_fail_percent = 8.0
"#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::ValidationFailed { ref field, .. } if field == "stats.cv_fail_percent"
    ));
}

#[test]
fn zero_hop_threshold_is_rejected() {
    let err = PoctConfig::from_toml("[usage]\nhop_threshold = 0\n").unwrap_err();
    assert!(err.to_string().contains("usage.hop_threshold"));
}

#[test]
fn unknown_keys_are_accepted() {
    let config = PoctConfig::from_toml(
        r#"
[detection]
window_minutes = 10
future_key = "hello"

[export]
format = "pdf"
"#,
    )
    .unwrap();
    assert_eq!(config.detection.effective_window_minutes(), 10);
}

#[test]
fn round_trip_through_toml() {
    let original = PoctConfig::from_toml(
        r#"
[detection]
window_minutes = 0
rarity_threshold = 0.25
min_pattern_events = 6

[stats]
analyte_policy = "reject"
"#,
    )
    .unwrap();

    let text = original.to_toml().unwrap();
    let reloaded = PoctConfig::from_toml(&text).unwrap();

    assert_eq!(reloaded.detection.window_minutes, Some(0));
    assert_eq!(reloaded.detection.rarity_threshold, Some(0.25));
    assert_eq!(reloaded.detection.min_pattern_events, Some(6));
    assert_eq!(reloaded.stats.analyte_policy, Some(AnalytePolicy::Reject));
}
