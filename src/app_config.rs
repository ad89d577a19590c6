use anyhow::{Context, Result, anyhow};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::document::PropertyMap;

/// Converter configuration module
/// This module handles loading and validating the settings a converter is
/// built from.
/// Represents the converter configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ConverterConfig {
    /// Custom format registry file (JSON array of formats)
    #[serde(default)]
    pub format_registry: Option<PathBuf>,

    /// Whether the stock load properties are applied to every conversion
    #[serde(default = "default_true")]
    pub apply_default_load_properties: bool,

    /// Extra load properties applied to every conversion
    #[serde(default)]
    pub load_properties: PropertyMap,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<&LogLevel> for LevelFilter {
    fn from(level: &LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Load properties applied to every conversion unless disabled
///
/// Documents open hidden and read-only, and linked content is updated
/// without prompting (`UpdateDocMode` QUIET_UPDATE).
pub fn default_load_properties() -> PropertyMap {
    let mut properties = PropertyMap::new();
    properties.insert("Hidden".to_string(), json!(true));
    properties.insert("ReadOnly".to_string(), json!(true));
    properties.insert("UpdateDocMode".to_string(), json!(1));
    properties
}

impl ConverterConfig {
    /// Load a configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .context(format!("Failed to open config file: {}", path.display()))?;
        let config: Self = serde_json::from_reader(BufReader::new(file))
            .context(format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.format_registry {
            if !path.is_file() {
                return Err(anyhow!("Format registry file not found: {}", path.display()));
            }
        }

        if self.load_properties.keys().any(|k| k.trim().is_empty()) {
            return Err(anyhow!("Load property names must not be empty"));
        }

        Ok(())
    }

    /// Load properties a converter built from this configuration applies
    pub fn effective_load_properties(&self) -> PropertyMap {
        let mut properties = if self.apply_default_load_properties {
            default_load_properties()
        } else {
            PropertyMap::new()
        };
        properties.extend(self.load_properties.clone());
        properties
    }

    pub fn log_level_filter(&self) -> LevelFilter {
        (&self.log_level).into()
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            format_registry: None,
            apply_default_load_properties: true,
            load_properties: PropertyMap::new(),
            log_level: LogLevel::default(),
        }
    }
}
