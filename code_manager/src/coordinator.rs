//! Fans grading out over a [`GradingManager`] and merges the scores back.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use code_runner::SubmissionGrade;
use futures::future::join_all;
use util::paths::absolutize;
use util::registry::SubmissionRegistry;

use crate::manager::manager::GradingManager;

/// Outcome of one grading batch.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// One entry per registered submission, in identifier order.
    pub grades: Vec<SubmissionGrade>,
    /// Wall-clock time from first dispatch to last completion.
    pub elapsed: Duration,
}

/// Grades every submission in `registry` and stores each score on its entry.
///
/// Blocks until every job has finished; there is no cancellation. A job that
/// panics is logged and scored 0.
pub async fn grade_all(manager: &GradingManager, registry: &mut SubmissionRegistry) -> BatchReport {
    let start = Instant::now();

    let jobs: Vec<(String, PathBuf)> = registry
        .iter()
        .map(|(identifier, record)| (identifier.clone(), absolutize(&record.path)))
        .collect();

    tracing::info!(
        submissions = jobs.len(),
        workers = manager.max_concurrent(),
        "Dispatching grading batch"
    );

    let handles: Vec<_> = jobs
        .iter()
        .map(|(_, path)| {
            let mgr = manager.clone();
            let path = path.clone();
            tokio::spawn(async move { mgr.grade(&path).await })
        })
        .collect();

    let results = join_all(handles).await;

    let mut grades = Vec::with_capacity(jobs.len());
    for ((identifier, _), result) in jobs.into_iter().zip(results) {
        let score = match result {
            Ok(grade) => grade.score,
            Err(err) => {
                tracing::error!(submission = %identifier, error = %err, "Grading task aborted");
                0.0
            }
        };

        registry.record_score(&identifier, score);
        grades.push(SubmissionGrade { identifier, score });
    }

    let elapsed = start.elapsed();
    tracing::info!(
        graded = grades.len(),
        seconds = elapsed.as_secs_f64(),
        "Grading batch complete"
    );

    BatchReport { grades, elapsed }
}
