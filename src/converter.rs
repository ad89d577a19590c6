/*!
 * The converter facade.
 *
 * An `OnlineConverter` sends conversion tasks to an office manager, normally
 * one talking to a LibreOffice Online server. It holds the office manager,
 * the format registry and the default load properties, and hands all three
 * to every job it creates. A built converter never changes, so it can be
 * cloned and shared between tasks freely.
 */

use anyhow::{Context, Result};
use log::debug;
use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::app_config::{ConverterConfig, default_load_properties};
use crate::document::{FormatRegistry, PropertyMap};
use crate::errors::ConfigurationError;
use crate::job::conversion::JobContext;
use crate::job::{ConversionJobWithSourceFormatUnspecified, SourceDocumentSpecs};
use crate::office::{OfficeManager, holder};

static DEFAULT_REGISTRY: Lazy<Arc<FormatRegistry>> = Lazy::new(|| Arc::new(FormatRegistry::default()));

/// Converter sending conversion tasks to an office manager
#[derive(Debug, Clone)]
pub struct OnlineConverter {
    office_manager: Arc<dyn OfficeManager>,
    format_registry: Arc<FormatRegistry>,
    load_properties: PropertyMap,
}

impl OnlineConverter {
    /// Creates a new builder
    pub fn builder() -> ConverterBuilder {
        ConverterBuilder::default()
    }

    /// Creates a converter with the installed office manager and default settings
    ///
    /// # Errors
    /// * `ConfigurationError::MissingOfficeManager` if no office manager is installed
    pub fn make() -> Result<Self, ConfigurationError> {
        Self::builder().build()
    }

    /// Creates a converter with the given office manager and default settings
    pub fn make_with(office_manager: Arc<dyn OfficeManager>) -> Self {
        Self {
            office_manager,
            format_registry: Arc::clone(&DEFAULT_REGISTRY),
            load_properties: default_load_properties(),
        }
    }

    /// Start a conversion of `source`
    ///
    /// Nothing is read or sent until the returned job is given a target and
    /// executed. When the source is a file without an explicit format, the
    /// format is looked up from its extension.
    pub fn convert(&self, source: impl Into<SourceDocumentSpecs>) -> ConversionJobWithSourceFormatUnspecified {
        let context = JobContext {
            office_manager: Arc::clone(&self.office_manager),
            format_registry: Arc::clone(&self.format_registry),
            load_properties: self.load_properties.clone(),
        };
        ConversionJobWithSourceFormatUnspecified::new(source.into(), context)
    }

    pub fn office_manager(&self) -> &Arc<dyn OfficeManager> {
        &self.office_manager
    }

    pub fn format_registry(&self) -> &FormatRegistry {
        &self.format_registry
    }

    /// Load properties applied to every conversion
    pub fn load_properties(&self) -> &PropertyMap {
        &self.load_properties
    }
}

/// Builder for an `OnlineConverter`
///
/// Setters consume and return the builder. `build` borrows it, so one
/// builder can produce any number of equivalent converters.
#[derive(Debug, Clone, Default)]
pub struct ConverterBuilder {
    office_manager: Option<Arc<dyn OfficeManager>>,
    format_registry: Option<Arc<FormatRegistry>>,
    load_properties: Option<PropertyMap>,
}

impl ConverterBuilder {
    /// Builder preset from a configuration file's settings
    pub fn from_config(config: &ConverterConfig) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        let mut builder = Self::default().load_properties(config.effective_load_properties());
        if let Some(path) = &config.format_registry {
            let registry = FormatRegistry::load(path)
                .context(format!("Failed to load format registry: {}", path.display()))?;
            builder = builder.format_registry(registry);
        }
        Ok(builder)
    }

    /// Office manager executing the conversions
    pub fn office_manager(mut self, office_manager: Arc<dyn OfficeManager>) -> Self {
        self.office_manager = Some(office_manager);
        self
    }

    /// Registry used to resolve document formats
    pub fn format_registry(mut self, format_registry: impl Into<Arc<FormatRegistry>>) -> Self {
        self.format_registry = Some(format_registry.into());
        self
    }

    /// Load properties applied to every conversion, replacing the defaults
    pub fn load_properties(mut self, load_properties: PropertyMap) -> Self {
        self.load_properties = Some(load_properties);
        self
    }

    /// Build the converter
    ///
    /// Unset values fall back to the installed office manager, the stock
    /// format registry and the default load properties.
    ///
    /// # Errors
    /// * `ConfigurationError::MissingOfficeManager` if no office manager was
    ///   given and none is installed
    pub fn build(&self) -> Result<OnlineConverter, ConfigurationError> {
        let office_manager = match &self.office_manager {
            Some(office_manager) => Arc::clone(office_manager),
            None => {
                debug!("No office manager given, using the installed one");
                holder::instance().ok_or(ConfigurationError::MissingOfficeManager)?
            }
        };

        Ok(OnlineConverter {
            office_manager,
            format_registry: self
                .format_registry
                .clone()
                .unwrap_or_else(|| Arc::clone(&DEFAULT_REGISTRY)),
            load_properties: self
                .load_properties
                .clone()
                .unwrap_or_else(default_load_properties),
        })
    }
}
