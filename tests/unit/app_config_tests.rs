/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use cdlidb::app_config::{Config, LogLevel};
use log::LevelFilter;
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.database_path, None);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(!config.reset_on_import);
    assert!(config.validate().is_ok());
}

/// Test that load_or_create writes a default file on first use
#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefault() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("cdlidb.json");

    let config = Config::load_or_create(&path)?;

    assert_eq!(config, Config::default());
    assert!(path.exists());
    assert_eq!(Config::load(&path)?, config);

    Ok(())
}

/// Test that a saved configuration is read back unchanged
#[test]
fn test_save_withCustomValues_shouldLoadSameConfig() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("custom.json");

    let config = Config {
        database_path: Some("/tmp/artifacts.db".to_string()),
        log_level: LogLevel::Trace,
        reset_on_import: true,
    };
    config.save(&path)?;

    let loaded = Config::load(&path)?;
    assert_eq!(loaded, config);
    assert_eq!(loaded.resolved_database_path()?, std::path::PathBuf::from("/tmp/artifacts.db"));

    Ok(())
}

/// Test configuration validation
#[test]
fn test_config_validation_withBlankDatabasePath_shouldFail() {
    let config = Config {
        database_path: Some("  ".to_string()),
        ..Config::default()
    };
    assert!(config.validate().is_err());
}

/// Test that a broken file is reported
#[test]
fn test_load_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "broken.json", "{ not json")?;

    assert!(Config::load(&path).is_err());

    Ok(())
}

/// Test log level mapping
#[test]
fn test_log_level_toLevelFilter_shouldMapEveryLevel() {
    assert_eq!(LogLevel::Error.to_level_filter(), LevelFilter::Error);
    assert_eq!(LogLevel::Warn.to_level_filter(), LevelFilter::Warn);
    assert_eq!(LogLevel::Info.to_level_filter(), LevelFilter::Info);
    assert_eq!(LogLevel::Debug.to_level_filter(), LevelFilter::Debug);
    assert_eq!(LogLevel::Trace.to_level_filter(), LevelFilter::Trace);
}
