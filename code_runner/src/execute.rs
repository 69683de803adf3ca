use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;

use crate::outcome::StepFailure;

/// Runs the built test binary, asking it for an XML report at `report`.
///
/// The child is killed once `limit` elapses. A non-zero exit status is normal
/// (failing tests) and not reported.
pub async fn run_tests(
    dir: &Path,
    artifact: &Path,
    report: &Path,
    limit: Duration,
) -> Result<(), StepFailure> {
    let mut child = Command::new(artifact)
        .args(["-r", "xml", "-o"])
        .arg(report)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(StepFailure::RunSpawn)?;

    match timeout(limit, child.wait()).await {
        Ok(status) => {
            let status = status.map_err(StepFailure::RunSpawn)?;
            tracing::debug!(artifact = %artifact.display(), %status, "Test binary exited");
            Ok(())
        }
        Err(_) => {
            child.kill().await.ok();
            Err(StepFailure::RunTimedOut(limit))
        }
    }
}
