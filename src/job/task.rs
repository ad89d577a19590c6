/*!
 * The unit of work handed to an office manager.
 *
 * A `ConversionTask` pairs one source spec with one target spec and works out
 * the effective load and store properties. It also gives office managers
 * helpers to read the source and write the converted result.
 */

use bytes::Bytes;
use uuid::Uuid;

use super::specs::{SourceDocumentSpecs, TargetDocumentSpecs};
use crate::document::{DocumentFormat, PropertyMap};
use crate::errors::OfficeError;

/// A single conversion handed to an office manager
///
/// Every task gets a fresh id, so two executions of equal specs are still
/// told apart in logs and by office managers.
#[derive(Debug, Clone)]
pub struct ConversionTask {
    id: Uuid,
    source: SourceDocumentSpecs,
    target: TargetDocumentSpecs,
    default_load_properties: PropertyMap,
}

impl ConversionTask {
    /// Create a task converting `source` into `target`
    pub fn new(source: SourceDocumentSpecs, target: TargetDocumentSpecs) -> Self {
        Self {
            id: Uuid::new_v4(),
            source,
            target,
            default_load_properties: PropertyMap::new(),
        }
    }

    /// Load properties applied before any format or source specific ones
    pub fn with_load_properties(mut self, properties: PropertyMap) -> Self {
        self.default_load_properties.extend(properties);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn source(&self) -> &SourceDocumentSpecs {
        &self.source
    }

    pub fn target(&self) -> &TargetDocumentSpecs {
        &self.target
    }

    pub fn source_format(&self) -> Option<&DocumentFormat> {
        self.source.format()
    }

    pub fn target_format(&self) -> Option<&DocumentFormat> {
        self.target.format()
    }

    /// Effective load properties
    ///
    /// Converter defaults, then the source format's, then the source's custom
    /// properties; later entries win.
    pub fn load_properties(&self) -> PropertyMap {
        let mut properties = self.default_load_properties.clone();
        if let Some(format) = self.source.format() {
            properties.extend(format.load_properties.clone());
        }
        properties.extend(self.source.load_properties().clone());
        properties
    }

    /// Effective store properties
    ///
    /// The target format's properties for the source family, then the
    /// target's custom properties; later entries win.
    pub fn store_properties(&self) -> PropertyMap {
        let mut properties = PropertyMap::new();
        let family = self.source.format().and_then(|f| f.input_family);
        if let (Some(format), Some(family)) = (self.target.format(), family) {
            if let Some(format_properties) = format.store_properties_for(family) {
                properties.extend(format_properties.clone());
            }
        }
        properties.extend(self.target.store_properties().clone());
        properties
    }

    /// Read the source document content
    pub async fn read_source(&self) -> Result<Bytes, OfficeError> {
        self.source.read().await
    }

    /// Write the converted content to the target
    pub async fn write_target(&self, content: Bytes) -> Result<(), OfficeError> {
        self.target.write(content).await
    }
}
