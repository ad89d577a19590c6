/*!
 * Source and target document specifications.
 *
 * A spec says where a document lives (a file or an in-memory buffer), which
 * format it is in, and which office properties should accompany it. Specs are
 * immutable values built by the caller; the fluent `with_*` functions return
 * new values.
 */

use bytes::Bytes;
use log::debug;
use parking_lot::Mutex;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;

use crate::document::{DocumentFormat, FormatRegistry, PropertyMap};
use crate::errors::OfficeError;

const MEMORY_DOCUMENT_NAME: &str = "<memory>";

/// Where the source document content comes from
#[derive(Debug, Clone, PartialEq)]
pub enum SourceInput {
    File(PathBuf),
    Memory(Bytes),
}

/// Description of the document to convert
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDocumentSpecs {
    input: SourceInput,
    format: Option<DocumentFormat>,
    load_properties: PropertyMap,
}

impl SourceDocumentSpecs {
    /// Source read from a file
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self::new(SourceInput::File(path.into()))
    }

    /// Source held in memory
    ///
    /// The format cannot be guessed from a buffer, so callers normally follow
    /// with `with_format` or `as_format` on the job.
    pub fn from_bytes(content: impl Into<Bytes>) -> Self {
        Self::new(SourceInput::Memory(content.into()))
    }

    fn new(input: SourceInput) -> Self {
        Self {
            input,
            format: None,
            load_properties: PropertyMap::new(),
        }
    }

    /// Override the input format
    pub fn with_format(mut self, format: DocumentFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Add custom load properties, replacing existing keys
    pub fn with_load_properties(mut self, properties: PropertyMap) -> Self {
        self.load_properties.extend(properties);
        self
    }

    pub fn input(&self) -> &SourceInput {
        &self.input
    }

    pub fn format(&self) -> Option<&DocumentFormat> {
        self.format.as_ref()
    }

    pub fn load_properties(&self) -> &PropertyMap {
        &self.load_properties
    }

    /// Name used in logs and error messages
    pub fn file_name(&self) -> String {
        match &self.input {
            SourceInput::File(path) => display_name(path),
            SourceInput::Memory(_) => MEMORY_DOCUMENT_NAME.to_string(),
        }
    }

    /// Fill in the format from the file extension when none was given
    pub(crate) fn resolve_format(mut self, registry: &FormatRegistry) -> Self {
        if self.format.is_none() {
            if let SourceInput::File(path) = &self.input {
                self.format = registry.get_format_for_path(path).cloned();
                if self.format.is_none() {
                    debug!("No registered format matches source {}", path.display());
                }
            }
        }
        self
    }

    pub(crate) async fn read(&self) -> Result<Bytes, OfficeError> {
        match &self.input {
            SourceInput::File(path) => {
                let content = tokio::fs::read(path)
                    .await
                    .map_err(|e| OfficeError::Io(format!("{}: {}", path.display(), e)))?;
                Ok(Bytes::from(content))
            }
            SourceInput::Memory(content) => Ok(content.clone()),
        }
    }
}

impl From<PathBuf> for SourceDocumentSpecs {
    fn from(path: PathBuf) -> Self {
        Self::from_file(path)
    }
}

impl From<&Path> for SourceDocumentSpecs {
    fn from(path: &Path) -> Self {
        Self::from_file(path)
    }
}

impl From<Bytes> for SourceDocumentSpecs {
    fn from(content: Bytes) -> Self {
        Self::from_bytes(content)
    }
}

impl From<Vec<u8>> for SourceDocumentSpecs {
    fn from(content: Vec<u8>) -> Self {
        Self::from_bytes(content)
    }
}

/// Shared handle to a document converted in memory
///
/// The handle is created together with its target spec and filled when the
/// office manager writes the target. Clones observe the same slot.
#[derive(Debug, Clone, Default)]
pub struct ConvertedDocument {
    slot: Arc<Mutex<Option<Bytes>>>,
}

impl ConvertedDocument {
    /// Take the converted content, leaving the handle empty
    pub fn take(&self) -> Option<Bytes> {
        self.slot.lock().take()
    }

    /// Copy of the converted content, if written
    pub fn get(&self) -> Option<Bytes> {
        self.slot.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.slot.lock().as_ref().map_or(0, Bytes::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn store(&self, content: Bytes) {
        *self.slot.lock() = Some(content);
    }
}

impl PartialEq for ConvertedDocument {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.slot, &other.slot)
    }
}

/// Where the converted document goes
#[derive(Debug, Clone, PartialEq)]
pub enum TargetOutput {
    File(PathBuf),
    Memory(ConvertedDocument),
}

/// Description of the document to produce
#[derive(Debug, Clone, PartialEq)]
pub struct TargetDocumentSpecs {
    output: TargetOutput,
    format: Option<DocumentFormat>,
    store_properties: PropertyMap,
    overwrite: bool,
}

impl TargetDocumentSpecs {
    /// Target written to a file
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self::new(TargetOutput::File(path.into()))
    }

    /// Target kept in memory, along with the handle to read it back
    pub fn in_memory() -> (Self, ConvertedDocument) {
        let document = ConvertedDocument::default();
        (Self::new(TargetOutput::Memory(document.clone())), document)
    }

    fn new(output: TargetOutput) -> Self {
        Self {
            output,
            format: None,
            store_properties: PropertyMap::new(),
            overwrite: true,
        }
    }

    /// Set the output format
    pub fn with_format(mut self, format: DocumentFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Add custom store properties, replacing existing keys
    pub fn with_store_properties(mut self, properties: PropertyMap) -> Self {
        self.store_properties.extend(properties);
        self
    }

    /// Whether an existing target file may be replaced (default: true)
    pub fn allow_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn output(&self) -> &TargetOutput {
        &self.output
    }

    pub fn format(&self) -> Option<&DocumentFormat> {
        self.format.as_ref()
    }

    pub fn store_properties(&self) -> &PropertyMap {
        &self.store_properties
    }

    pub fn overwrite_allowed(&self) -> bool {
        self.overwrite
    }

    /// Name used in logs and error messages
    pub fn file_name(&self) -> String {
        match &self.output {
            TargetOutput::File(path) => display_name(path),
            TargetOutput::Memory(_) => MEMORY_DOCUMENT_NAME.to_string(),
        }
    }

    /// Fill in the format from the file extension when none was given
    pub(crate) fn resolve_format(mut self, registry: &FormatRegistry) -> Self {
        if self.format.is_none() {
            if let TargetOutput::File(path) = &self.output {
                self.format = registry.get_format_for_path(path).cloned();
                if self.format.is_none() {
                    debug!("No registered format matches target {}", path.display());
                }
            }
        }
        self
    }

    pub(crate) async fn write(&self, content: Bytes) -> Result<(), OfficeError> {
        match &self.output {
            TargetOutput::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await?;
                }
                let io_error = |e: std::io::Error| OfficeError::Io(format!("{}: {}", path.display(), e));
                if self.overwrite {
                    return tokio::fs::write(path, &content).await.map_err(io_error);
                }

                // create_new refuses an existing file in the same call that creates it
                let mut file = tokio::fs::OpenOptions::new()
                    .write(true)
                    .create_new(true)
                    .open(path)
                    .await
                    .map_err(|e| match e.kind() {
                        ErrorKind::AlreadyExists => OfficeError::Io(format!(
                            "Target file already exists: {}",
                            path.display()
                        )),
                        _ => io_error(e),
                    })?;
                file.write_all(&content).await.map_err(io_error)?;
                file.flush().await.map_err(io_error)
            }
            TargetOutput::Memory(document) => {
                document.store(content);
                Ok(())
            }
        }
    }
}

impl From<PathBuf> for TargetDocumentSpecs {
    fn from(path: PathBuf) -> Self {
        Self::to_file(path)
    }
}

impl From<&Path> for TargetDocumentSpecs {
    fn from(path: &Path) -> Self {
        Self::to_file(path)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
