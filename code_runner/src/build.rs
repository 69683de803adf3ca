use std::fs::File;
use std::path::Path;
use std::process::{ExitStatus, Stdio};

use tokio::process::Command;
use tokio::time::timeout;
use util::execution_config::ExecutionConfig;
use util::paths::build_log_path;

use crate::outcome::StepFailure;

/// Runs the build program with no arguments inside `dir`, sending stdout and
/// stderr to the build log.
///
/// The exit status is returned as-is: a failing build is not an error here,
/// the caller checks for the artifact instead.
pub async fn run_build(dir: &Path, config: &ExecutionConfig) -> Result<ExitStatus, StepFailure> {
    let log = File::create(build_log_path(dir))?;
    let err_log = log.try_clone()?;

    let mut child = Command::new(&config.build_program)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::from(log))
        .stderr(Stdio::from(err_log))
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| StepFailure::BuildSpawn {
            program: config.build_program.clone(),
            source,
        })?;

    let status = match config.build_timeout() {
        Some(limit) => match timeout(limit, child.wait()).await {
            Ok(status) => status?,
            Err(_) => {
                child.kill().await.ok();
                return Err(StepFailure::BuildTimedOut(limit));
            }
        },
        None => child.wait().await?,
    };

    Ok(status)
}
