use std::path::PathBuf;

use drill_core::CorrectIncrement;
use drill_session::{DrillConfig, Environment};

fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_defaults() {
    let config = DrillConfig::from_vars(vars(&[("HOME", "/home/drill")])).unwrap();

    assert_eq!(config.score_file, PathBuf::from("score_tracker.json"));
    assert_eq!(config.catalog_file, PathBuf::from("pinyin_paths.json"));
    assert_eq!(config.sounds_dir, PathBuf::from("sounds"));
    assert_eq!(config.log_dir, PathBuf::from("logs"));
    assert_eq!(config.env, Environment::Development);
    assert!(config.autosave);
    assert_eq!(config.correct_increment, CorrectIncrement::Compounding);
    assert_eq!(config.score_factor_cap, None);
    assert_eq!(config.max_round_size, 2);

    // Unbounded by default
    assert_eq!(config.weight_model().score_factor(-995), 1_000);
}

#[test]
fn test_overrides() {
    let config = DrillConfig::from_vars(vars(&[
        ("DRILL_SCORE_FILE", "/var/lib/drill/scores.json"),
        ("DRILL_SOUNDS_DIR", "/var/cache/drill"),
        ("DRILL_ENV", "production"),
        ("DRILL_AUTOSAVE", "false"),
        ("DRILL_CORRECT_INCREMENT", "unit"),
        ("DRILL_SCORE_FACTOR_CAP", "20"),
        ("DRILL_MAX_ROUND_SIZE", "1"),
    ]))
    .unwrap();

    assert_eq!(config.score_file, PathBuf::from("/var/lib/drill/scores.json"));
    assert_eq!(config.sounds_dir, PathBuf::from("/var/cache/drill"));
    assert_eq!(config.env, Environment::Production);
    assert!(!config.env.is_development());
    assert!(!config.autosave);
    assert_eq!(config.correct_increment, CorrectIncrement::Unit);
    assert_eq!(config.weight_model().score_factor(-100), 20);
    assert_eq!(config.selector().max_round_size(), 1);
}

#[test]
fn test_invalid_values_are_rejected() {
    assert!(DrillConfig::from_vars(vars(&[("DRILL_CORRECT_INCREMENT", "double")])).is_err());
    assert!(DrillConfig::from_vars(vars(&[("DRILL_AUTOSAVE", "maybe")])).is_err());
    assert!(DrillConfig::from_vars(vars(&[("DRILL_MAX_ROUND_SIZE", "-1")])).is_err());
}
