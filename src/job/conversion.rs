/*!
 * Two-phase conversion jobs.
 *
 * `OnlineConverter::convert` yields a job that only knows its source; `to`
 * consumes it and yields a `ConversionJob` that knows both ends. Executing a
 * `ConversionJob` consumes it too, so a job runs at most once.
 */

use log::{debug, error, info, warn};
use std::sync::Arc;

use super::specs::{SourceDocumentSpecs, TargetDocumentSpecs};
use super::task::ConversionTask;
use crate::document::{DocumentFormat, FormatRegistry, PropertyMap};
use crate::errors::{ConversionError, FormatError};
use crate::office::OfficeManager;

/// Dependencies a job carries from the converter that created it
#[derive(Debug, Clone)]
pub(crate) struct JobContext {
    pub(crate) office_manager: Arc<dyn OfficeManager>,
    pub(crate) format_registry: Arc<FormatRegistry>,
    pub(crate) load_properties: PropertyMap,
}

/// A conversion whose target has not been given yet
#[derive(Debug)]
#[must_use = "a conversion does nothing until a target is given and the job is executed"]
pub struct ConversionJobWithSourceFormatUnspecified {
    source: SourceDocumentSpecs,
    context: JobContext,
}

impl ConversionJobWithSourceFormatUnspecified {
    pub(crate) fn new(source: SourceDocumentSpecs, context: JobContext) -> Self {
        let source = source.resolve_format(&context.format_registry);
        debug!(
            "Conversion requested for {} ({})",
            source.file_name(),
            source.format().map_or("unknown format", |f| f.extension())
        );
        Self { source, context }
    }

    /// Override the source format
    pub fn as_format(mut self, format: DocumentFormat) -> Self {
        self.source = self.source.with_format(format);
        self
    }

    /// Add custom load properties to the source
    pub fn with_load_properties(mut self, properties: PropertyMap) -> Self {
        self.source = self.source.with_load_properties(properties);
        self
    }

    pub fn source(&self) -> &SourceDocumentSpecs {
        &self.source
    }

    /// Complete the job with its target
    pub fn to(self, target: impl Into<TargetDocumentSpecs>) -> ConversionJob {
        let target = target.into().resolve_format(&self.context.format_registry);
        ConversionJob {
            source: self.source,
            target,
            context: self.context,
        }
    }
}

/// A fully specified conversion, ready to execute
#[derive(Debug)]
#[must_use = "a conversion job does nothing until executed"]
pub struct ConversionJob {
    source: SourceDocumentSpecs,
    target: TargetDocumentSpecs,
    context: JobContext,
}

impl ConversionJob {
    /// Override the target format
    pub fn as_format(mut self, format: DocumentFormat) -> Self {
        self.target = self.target.with_format(format);
        self
    }

    /// Add custom store properties to the target
    pub fn with_store_properties(mut self, properties: PropertyMap) -> Self {
        self.target = self.target.with_store_properties(properties);
        self
    }

    pub fn source(&self) -> &SourceDocumentSpecs {
        &self.source
    }

    pub fn target(&self) -> &TargetDocumentSpecs {
        &self.target
    }

    /// Run the conversion
    ///
    /// Builds exactly one task and hands it to the office manager. Whether
    /// the pair of formats can be converted is for the office manager to
    /// decide; its errors are returned as `ConversionError::Office` without
    /// retry.
    ///
    /// # Errors
    /// * `ConversionError::Format` if the source or target format could not be
    ///   resolved; the office manager is not called
    /// * `ConversionError::Office` if the office manager fails
    pub async fn execute(self) -> Result<(), ConversionError> {
        let description = self.check_formats()?;

        let task = ConversionTask::new(self.source, self.target)
            .with_load_properties(self.context.load_properties);
        let task_id = task.id();
        info!("Converting {} (task {})", description, task_id);

        match self.context.office_manager.execute(task).await {
            Ok(()) => {
                info!("Conversion complete (task {})", task_id);
                Ok(())
            }
            Err(e) => {
                error!("Conversion failed (task {}): {}", task_id, e);
                Err(e.into())
            }
        }
    }

    // Returns a "source -> target" description for logging
    fn check_formats(&self) -> Result<String, FormatError> {
        let source_format = self.source.format().ok_or_else(|| FormatError::Unresolved {
            role: "source",
            document: self.source.file_name(),
        })?;
        let target_format = self.target.format().ok_or_else(|| FormatError::Unresolved {
            role: "target",
            document: self.target.file_name(),
        })?;

        let registered = source_format
            .input_family
            .is_some_and(|family| target_format.is_output_for(family));
        if !registered {
            warn!(
                "No registered export from {} to {}, leaving it to the office manager",
                source_format.extension(),
                target_format.extension()
            );
        }

        Ok(format!(
            "{} [{}] -> {} [{}]",
            self.source.file_name(),
            source_format.extension(),
            self.target.file_name(),
            target_format.extension()
        ))
    }
}
