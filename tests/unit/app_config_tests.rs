/*!
 * Tests for converter configuration functionality
 */

use log::LevelFilter;
use serde_json::json;

use onlineconv::app_config::{ConverterConfig, LogLevel, default_load_properties};
use crate::common::{create_temp_dir, create_test_file};

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = ConverterConfig::default();

    assert!(config.format_registry.is_none());
    assert!(config.apply_default_load_properties);
    assert!(config.load_properties.is_empty());
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.effective_load_properties(), default_load_properties());
}

#[test]
fn test_defaultLoadProperties_shouldOpenHiddenReadOnlyQuietly() {
    let properties = default_load_properties();
    assert_eq!(properties.get("Hidden"), Some(&json!(true)));
    assert_eq!(properties.get("ReadOnly"), Some(&json!(true)));
    assert_eq!(properties.get("UpdateDocMode"), Some(&json!(1)));
}

#[test]
fn test_fromFile_withValidJson_shouldParseAllFields() -> anyhow::Result<()> {
    let dir = create_temp_dir()?;
    let content = json!({
        "apply_default_load_properties": false,
        "load_properties": { "Password": "secret" },
        "log_level": "debug"
    })
    .to_string();
    let path = create_test_file(dir.path(), "conf.json", content.as_bytes())?;

    let config = ConverterConfig::from_file(&path)?;

    assert!(!config.apply_default_load_properties);
    assert_eq!(config.log_level_filter(), LevelFilter::Debug);
    assert_eq!(config.effective_load_properties().len(), 1);
    assert!(config.validate().is_ok());
    Ok(())
}

#[test]
fn test_fromFile_withInvalidJson_shouldReportPath() -> anyhow::Result<()> {
    let dir = create_temp_dir()?;
    let path = create_test_file(dir.path(), "broken.json", b"{ not json")?;

    let error = ConverterConfig::from_file(&path).unwrap_err();

    assert!(error.to_string().contains("broken.json"));
    Ok(())
}

#[test]
fn test_fromFile_withMissingFile_shouldFail() {
    assert!(ConverterConfig::from_file("/nonexistent/conf.json").is_err());
}

#[test]
fn test_validate_withMissingRegistryFile_shouldFail() {
    let config = ConverterConfig {
        format_registry: Some("/nonexistent/formats.json".into()),
        ..Default::default()
    };
    let error = config.validate().unwrap_err();
    assert!(error.to_string().contains("Format registry file not found"));
}
