/*!
 * Office managers: the executors that actually run conversion tasks.
 *
 * How a task is carried out (a local office process pool, a LibreOffice
 * Online server over HTTP, ...) is up to the implementation. This crate only
 * depends on the `OfficeManager` trait.
 *
 * - `holder`: process-wide default office manager
 * - `mock`: in-memory office manager for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::OfficeError;
use crate::job::ConversionTask;

/// Common trait for everything able to execute a conversion task
///
/// Implementations own their concurrency limits, timeouts, retries and the
/// cleanup of any resources a task used.
#[async_trait]
pub trait OfficeManager: Send + Sync + Debug {
    /// Execute a task to completion
    ///
    /// # Arguments
    /// * `task` - The task to execute
    ///
    /// # Returns
    /// * `Result<(), OfficeError>` - Ok once the target has been written, or the failure
    async fn execute(&self, task: ConversionTask) -> Result<(), OfficeError>;
}

pub mod holder;
pub mod mock;
