// manager/manager.rs
use std::future::Future;
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Arc;

use code_runner::{SubmissionGrade, grade_submission};
use tokio::sync::Semaphore;
use util::execution_config::ExecutionConfig;

/// Runs grading jobs with at most `max_concurrent` in flight.
///
/// Cloning is cheap and every clone shares the same slots. Waiting jobs are
/// admitted in FIFO order, and a slot is released when its job finishes or
/// panics.
#[derive(Clone)]
pub struct GradingManager {
    slots: Arc<Semaphore>,
    config: Arc<ExecutionConfig>,
    max_concurrent: usize,
}

impl GradingManager {
    /// A `max_concurrent` of 0 is treated as 1 so the pool can always make progress.
    pub fn new(max_concurrent: usize, config: ExecutionConfig) -> Self {
        let max_concurrent = max_concurrent.max(1);
        Self {
            slots: Arc::new(Semaphore::new(max_concurrent)),
            config: Arc::new(config),
            max_concurrent,
        }
    }

    /// One slot per available processor.
    pub fn with_available_parallelism(config: ExecutionConfig) -> Self {
        let workers = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        Self::new(workers, config)
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Runs `job` once a slot is free.
    pub async fn run<F, T>(&self, job: F) -> T
    where
        F: Future<Output = T>,
    {
        // The semaphore is never closed, so acquiring only waits.
        let _permit = Arc::clone(&self.slots).acquire_owned().await.ok();
        job.await
    }

    /// Grades one submission directory inside a slot.
    pub async fn grade(&self, submission_dir: &Path) -> SubmissionGrade {
        self.run(async {
            if let Some(name) = submission_dir.file_name() {
                println!("\tGrading: {}", name.to_string_lossy());
            }
            grade_submission(submission_dir, &self.config).await
        })
        .await
    }
}
