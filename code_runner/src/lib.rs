use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use marker::mark_report_file;
use marker::scorer::format_score;
use util::execution_config::ExecutionConfig;
use util::paths::{absolutize, build_log_path, grade_path, report_path};

pub mod build;
pub mod execute;
pub mod outcome;

use crate::build::run_build;
use crate::execute::run_tests;
use crate::outcome::StepFailure;

/// Score produced for one submission directory.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionGrade {
    /// Directory name of the submission, i.e. its student-track identifier.
    pub identifier: String,
    /// Percentage in `[0, 100]`; 0 on any failure.
    pub score: f64,
}

/// Grades one prepared submission directory by:
/// 1. Running the build program inside it (output to `compilation.txt`)
/// 2. Running the build artifact with a timeout to produce `<identifier>.xml`
/// 3. Scoring the report's aggregate successes and failures
/// 4. Writing the score to `grade.txt`
///
/// Never fails: every failure is recorded in the build log and scored as 0.
pub async fn grade_submission(submission_dir: &Path, config: &ExecutionConfig) -> SubmissionGrade {
    let dir = absolutize(submission_dir);
    let identifier = dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    tracing::info!(submission = %identifier, "Grading submission");

    let score = match build_and_mark(&dir, &identifier, config).await {
        Ok(score) => score,
        Err(failure) => {
            tracing::warn!(submission = %identifier, error = %failure, "Submission scored 0");
            append_to_build_log(&dir, &failure);
            0.0
        }
    };

    if let Err(err) = fs::write(grade_path(&dir), format_score(score)) {
        tracing::error!(submission = %identifier, error = %err, "Failed to write grade file");
    }

    SubmissionGrade { identifier, score }
}

async fn build_and_mark(
    dir: &Path,
    identifier: &str,
    config: &ExecutionConfig,
) -> Result<f64, StepFailure> {
    let status = run_build(dir, config).await?;
    tracing::debug!(submission = %identifier, %status, "Build finished");

    let artifact = dir.join(&config.build_artifact);
    if !artifact.is_file() {
        return Err(StepFailure::MissingArtifact(artifact));
    }

    // A report shipped inside the submission must not be mistaken for a fresh one.
    let report = report_path(dir, identifier);
    if report.exists() {
        fs::remove_file(&report)?;
    }

    // A run that times out may still have flushed its report, so keep going.
    if let Err(failure) = run_tests(dir, &artifact, &report, config.run_timeout()).await {
        tracing::warn!(submission = %identifier, error = %failure, "Test run failed");
        append_to_build_log(dir, &failure);
    }

    if !report.is_file() {
        return Err(StepFailure::MissingReport(report));
    }

    Ok(mark_report_file(&report)?.score)
}

fn append_to_build_log(dir: &Path, failure: &StepFailure) {
    let result = OpenOptions::new()
        .create(true)
        .append(true)
        .open(build_log_path(dir))
        .and_then(|mut log| writeln!(log, "\n[grader] {failure}"));

    if let Err(err) = result {
        tracing::error!(dir = %dir.display(), error = %err, "Failed to append to build log");
    }
}
