use std::io;
use std::path::PathBuf;
use std::time::Duration;

use marker::error::MarkerError;
use thiserror::Error;

/// Why a grading step did not produce a score.
///
/// Every variant degrades to a score of 0; the message is appended to the
/// submission's build log so the failure can be diagnosed afterwards.
#[derive(Debug, Error)]
pub enum StepFailure {
    #[error("could not start build program '{program}': {source}")]
    BuildSpawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("build did not finish within {0:?} and was killed")]
    BuildTimedOut(Duration),
    #[error("build artifact {} was not produced", .0.display())]
    MissingArtifact(PathBuf),
    #[error("could not run test binary: {0}")]
    RunSpawn(#[source] io::Error),
    #[error("test binary did not finish within {0:?} and was killed")]
    RunTimedOut(Duration),
    #[error("test binary did not write a results report at {}", .0.display())]
    MissingReport(PathBuf),
    #[error("results report rejected: {0}")]
    Report(#[from] MarkerError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
