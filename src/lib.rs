/*!
 * # onlineconv - document conversion through an office manager
 *
 * A Rust library that turns "convert this document into that format" into
 * tasks for an office manager, typically one backed by a LibreOffice
 * Online-compatible conversion server.
 *
 * ## Usage
 *
 * ```no_run
 * use std::path::PathBuf;
 * use std::sync::Arc;
 * use onlineconv::OnlineConverter;
 * use onlineconv::office::mock::MockOfficeManager;
 *
 * # async fn run() -> Result<(), onlineconv::ConversionError> {
 * let converter = OnlineConverter::make_with(Arc::new(MockOfficeManager::working()));
 * converter
 *     .convert(PathBuf::from("report.docx"))
 *     .to(PathBuf::from("report.pdf"))
 *     .execute()
 *     .await?;
 * # Ok(())
 * # }
 * ```
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `converter`: the `OnlineConverter` facade and its builder
 * - `job`: two-phase conversion jobs, document specs and tasks
 * - `document`: document formats and the format registry
 * - `office`: the `OfficeManager` trait, the installed default and a mock
 * - `app_config`: configuration loading
 * - `errors`: custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

#![allow(clippy::uninlined_format_args)]

pub mod app_config;
pub mod converter;
pub mod document;
pub mod errors;
pub mod job;
pub mod office;

// Re-export main types for easier usage
pub use app_config::ConverterConfig;
pub use converter::{ConverterBuilder, OnlineConverter};
pub use document::{DocumentFamily, DocumentFormat, FormatRegistry, PropertyMap};
pub use errors::{ConfigurationError, ConversionError, FormatError, OfficeError};
pub use job::{ConversionJob, ConversionTask, ConvertedDocument, SourceDocumentSpecs, TargetDocumentSpecs};
pub use office::OfficeManager;
