/*!
 * Error types for the onlineconv library.
 *
 * Each layer of a conversion has its own error enum, defined with the
 * thiserror crate. `ConversionError` is what callers of a job see; it wraps
 * the other kinds without altering them.
 */

use thiserror::Error;

/// Errors raised while assembling a converter
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// No office manager was given and none is installed process-wide
    #[error("An office manager is required in order to build a converter")]
    MissingOfficeManager,

    /// The format registry could not be loaded
    #[error("Invalid format registry: {0}")]
    InvalidRegistry(String),
}

/// Errors raised by an office manager while executing a task
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OfficeError {
    /// The office manager cannot accept tasks right now
    #[error("Office manager unavailable: {0}")]
    Unavailable(String),

    /// The conversion itself failed
    #[error("Conversion failed: {0}")]
    ConversionFailed(String),

    /// The remote service answered with an error status
    #[error("Office service responded with error: {status_code} - {message}")]
    ServiceError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the service
        message: String,
    },

    /// Reading the source or writing the target failed
    #[error("I/O error: {0}")]
    Io(String),
}

/// Errors raised while resolving document formats
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    /// The format of the named document could not be determined
    #[error("Cannot resolve {role} document format for '{document}'")]
    Unresolved {
        /// "source" or "target"
        role: &'static str,
        /// Document name used in the lookup
        document: String,
    },

    /// Two formats in a registry claim the same extension
    #[error("Duplicate format extension: {0}")]
    Duplicate(String),
}

/// Errors surfaced to the caller of a conversion job
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// Error from converter configuration
    ///
    /// Jobs never return this. It lets callers that build a converter and run
    /// jobs in one function use `?` on `build()` and `execute()` alike.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Error resolving formats before dispatch
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Error from the office manager
    #[error("Office error: {0}")]
    Office(#[from] OfficeError),
}

impl From<std::io::Error> for OfficeError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<FormatError> for ConfigurationError {
    fn from(error: FormatError) -> Self {
        Self::InvalidRegistry(error.to_string())
    }
}
