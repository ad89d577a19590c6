/*!
 * Mock office manager for testing.
 *
 * The mock records every task it receives and simulates different behaviors:
 * - `MockOfficeManager::working()` - Copies the source content to the target
 * - `MockOfficeManager::intermittent(n)` - Fails every nth task
 * - `MockOfficeManager::failing()` - Always fails with an error
 */

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::OfficeError;
use crate::job::ConversionTask;
use crate::office::OfficeManager;

/// Behavior mode for the mock office manager
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds, writing the source bytes to the target
    Working,
    /// Fails intermittently (every Nth task); 0 never fails
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Succeeds after a delay (for concurrency testing)
    Slow { delay_ms: u64 },
}

/// Mock office manager recording the tasks it executes
#[derive(Debug)]
pub struct MockOfficeManager {
    /// Behavior mode
    behavior: MockBehavior,
    /// Task counter for intermittent failures
    execute_count: Arc<AtomicUsize>,
    /// Every task received, in order
    tasks: Arc<Mutex<Vec<ConversionTask>>>,
    /// Custom content generator (optional)
    custom_output: Option<fn(&ConversionTask, &Bytes) -> Bytes>,
}

impl MockOfficeManager {
    /// Create a new mock with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            execute_count: Arc::new(AtomicUsize::new(0)),
            tasks: Arc::new(Mutex::new(Vec::new())),
            custom_output: None,
        }
    }

    /// Create a working mock that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create an intermittently failing mock
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a failing mock that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that waits before converting
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Set a custom generator for the converted content
    pub fn with_custom_output(mut self, generator: fn(&ConversionTask, &Bytes) -> Bytes) -> Self {
        self.custom_output = Some(generator);
        self
    }

    /// Number of `execute` calls so far
    pub fn execute_count(&self) -> usize {
        self.execute_count.load(Ordering::SeqCst)
    }

    /// Copies of all tasks received so far
    pub fn tasks(&self) -> Vec<ConversionTask> {
        self.tasks.lock().clone()
    }

    /// The most recent task
    pub fn last_task(&self) -> Option<ConversionTask> {
        self.tasks.lock().last().cloned()
    }

    async fn convert(&self, task: &ConversionTask) -> Result<(), OfficeError> {
        let content = task.read_source().await?;
        let output = match self.custom_output {
            Some(generator) => generator(task, &content),
            None => content,
        };
        task.write_target(output).await
    }
}

impl Clone for MockOfficeManager {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            execute_count: Arc::clone(&self.execute_count),
            tasks: Arc::clone(&self.tasks),
            custom_output: self.custom_output,
        }
    }
}

#[async_trait]
impl OfficeManager for MockOfficeManager {
    async fn execute(&self, task: ConversionTask) -> Result<(), OfficeError> {
        let count = self.execute_count.fetch_add(1, Ordering::SeqCst);
        self.tasks.lock().push(task.clone());

        match self.behavior {
            MockBehavior::Working => self.convert(&task).await,

            MockBehavior::Intermittent { fail_every } => {
                if fail_every > 0 && count % fail_every == fail_every - 1 {
                    Err(OfficeError::ServiceError {
                        status_code: 503,
                        message: format!("Simulated intermittent failure (task #{})", count + 1),
                    })
                } else {
                    self.convert(&task).await
                }
            }

            MockBehavior::Failing => Err(OfficeError::ServiceError {
                status_code: 500,
                message: "Simulated office failure".to_string(),
            }),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay_ms)).await;
                self.convert(&task).await
            }
        }
    }
}
