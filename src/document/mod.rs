/*!
 * Document formats and the registry used to resolve them.
 *
 * - `format`: format metadata (extensions, MIME type, filter properties)
 * - `registry`: read-only lookup of known formats
 */

pub mod format;
pub mod registry;

pub use format::{DocumentFamily, DocumentFormat, DocumentFormatBuilder, PropertyMap};
pub use registry::FormatRegistry;
