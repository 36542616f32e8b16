/*!
 * Tests for application configuration functionality
 */

use paremia::app_config::{Config, LogLevel};
use log::LevelFilter;

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert!(config.database_path.is_none());
    assert_eq!(config.ingest.synonym_marker, "Синонім.");
    assert_eq!(config.ingest.synonym_separator, "; ");
    assert_eq!(config.quiz.decoy_count, 3);
    assert_eq!(config.quiz.group_separator, ", ");
    assert_eq!(config.quiz.blank_marker, "──────");
    assert_eq!(config.category_page_size, 7);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.ingest.synonym_marker = "  ".to_string();
    assert!(config.validate().is_err());
    config.ingest.synonym_marker = "Синонім.".to_string();

    config.ingest.synonym_separator = String::new();
    assert!(config.validate().is_err());
    config.ingest.synonym_separator = "; ".to_string();

    config.quiz.decoy_count = 0;
    assert!(config.validate().is_err());
    config.quiz.decoy_count = 3;

    config.category_page_size = 0;
    assert!(config.validate().is_err());
    config.category_page_size = 7;

    assert!(config.validate().is_ok());
}

#[test]
fn test_config_fromPartialJson_shouldFillDefaults() {
    let json = r#"{ "database_path": "/tmp/p.db", "quiz": { "decoy_count": 2 }, "log_level": "debug" }"#;
    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.database_path.as_deref(), Some(std::path::Path::new("/tmp/p.db")));
    assert_eq!(config.quiz.decoy_count, 2);
    assert_eq!(config.quiz.blank_marker, "──────");
    assert_eq!(config.ingest.synonym_marker, "Синонім.");
    assert_eq!(config.log_level, LogLevel::Debug);
}

#[test]
fn test_config_saveThenLoad_shouldRoundTrip() {
    let dir = common::create_temp_dir().unwrap();
    let path = dir.path().join("conf.json");

    let mut config = Config::default();
    config.category_page_size = 4;
    config.save(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    assert_eq!(loaded.category_page_size, 4);
    assert_eq!(loaded.quiz, config.quiz);
}

#[test]
fn test_config_fromFile_withInvalidJson_shouldFail() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(dir.path(), "conf.json", "{ not json").unwrap();

    let err = Config::from_file(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn test_resolvedDatabasePath_withExplicitPath_shouldUseIt() {
    let config = Config {
        database_path: Some("custom.db".into()),
        ..Config::default()
    };
    assert_eq!(config.resolved_database_path().unwrap(), std::path::PathBuf::from("custom.db"));
}

#[test]
fn test_logLevel_toLevelFilter_shouldMapEveryLevel() {
    assert_eq!(LogLevel::Error.to_level_filter(), LevelFilter::Error);
    assert_eq!(LogLevel::Warn.to_level_filter(), LevelFilter::Warn);
    assert_eq!(LogLevel::Info.to_level_filter(), LevelFilter::Info);
    assert_eq!(LogLevel::Debug.to_level_filter(), LevelFilter::Debug);
    assert_eq!(LogLevel::Trace.to_level_filter(), LevelFilter::Trace);
}
