/*!
 * Conversion jobs and the values they are built from.
 *
 * - `specs`: source and target document descriptions
 * - `conversion`: the two-phase job returned by `OnlineConverter::convert`
 * - `task`: the unit of work handed to an office manager
 */

pub mod conversion;
pub mod specs;
pub mod task;

pub use conversion::{ConversionJob, ConversionJobWithSourceFormatUnspecified};
pub use specs::{ConvertedDocument, SourceDocumentSpecs, SourceInput, TargetDocumentSpecs, TargetOutput};
pub use task::ConversionTask;
