use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Build tool output for one submission (stdout and stderr interleaved).
pub const BUILD_LOG_FILE: &str = "compilation.txt";
/// Final numeric score for one submission, as plain text.
pub const GRADE_FILE: &str = "grade.txt";

/// Create a directory (and all parents) if it doesn't exist, and return the path.
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> io::Result<PathBuf> {
    let p = path.as_ref();
    fs::create_dir_all(p)?;
    Ok(p.to_path_buf())
}

/// Delete a directory tree if present and recreate it empty.
pub fn reset_dir<P: AsRef<Path>>(path: P) -> io::Result<PathBuf> {
    let p = path.as_ref();
    if p.exists() {
        fs::remove_dir_all(p)?;
    }
    ensure_dir(p)
}

/// Resolve a possibly relative path against the current working directory.
pub fn absolutize<P: AsRef<Path>>(path: P) -> PathBuf {
    let p = path.as_ref();
    std::path::absolute(p).unwrap_or_else(|_| p.to_path_buf())
}

// ─── Submission working tree ────────────────────────────────────────

/// {SUBMISSIONS_DIR}/{identifier}
pub fn submission_dir(root: &Path, identifier: &str) -> PathBuf {
    root.join(identifier)
}

/// {SUBMISSIONS_DIR}/{identifier}.zip, the renamed inner archive before unpacking.
pub fn submission_archive_path(root: &Path, identifier: &str) -> PathBuf {
    root.join(format!("{identifier}.zip"))
}

/// {SUBMISSIONS_DIR}/.{identifier}.partial, where a submission is assembled
/// before it is moved into place. The leading dot keeps it apart from every
/// valid identifier.
pub fn submission_staging_dir(root: &Path, identifier: &str) -> PathBuf {
    root.join(format!(".{identifier}.partial"))
}

pub fn build_log_path(submission_dir: &Path) -> PathBuf {
    submission_dir.join(BUILD_LOG_FILE)
}

pub fn grade_path(submission_dir: &Path) -> PathBuf {
    submission_dir.join(GRADE_FILE)
}

/// {submission_dir}/{identifier}.xml, where the test binary writes its results.
pub fn report_path(submission_dir: &Path, identifier: &str) -> PathBuf {
    submission_dir.join(format!("{identifier}.xml"))
}

// ─── Outputs ────────────────────────────────────────────────────────

pub fn gradebook_path(output_dir: &Path, assignment_id: &str) -> PathBuf {
    output_dir.join(format!("grades-{assignment_id}.csv"))
}
