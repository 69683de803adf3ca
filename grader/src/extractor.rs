//! Unpacks a submission bundle into one working directory per student.
//!
//! The bundle is a zip of per-student zips. Each inner archive whose name follows
//! the [`naming`](crate::naming) convention is renamed to `<identifier>.zip`,
//! unpacked into `<submissions_dir>/<identifier>/`, overlaid with the scaffold
//! files, and registered. Anything else is reported and skipped.

use std::fs;
use std::io::{self, Read, Seek};
use std::path::{Path, PathBuf};

use colored::Colorize;
use thiserror::Error;
use util::archive::{ArchiveError, extract_entry_to, extract_zip, open_zip};
use util::config::AppConfig;
use util::paths::{reset_dir, submission_archive_path, submission_dir, submission_staging_dir};
use util::registry::{SubmissionRecord, SubmissionRegistry};
use walkdir::WalkDir;
use zip::ZipArchive;

use crate::naming::SubmissionName;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("could not open submission bundle {}: {source}", path.display())]
    Bundle {
        path: PathBuf,
        #[source]
        source: ArchiveError,
    },
    #[error("could not reset working directory {}: {source}", path.display())]
    WorkingTree {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not read scaffold directory {}: {source}", path.display())]
    Scaffold {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub submissions_dir: PathBuf,
    pub scaffold_dir: PathBuf,
    pub max_uncompressed_size: u64,
}

impl ExtractOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            submissions_dir: config.submissions_dir.clone(),
            scaffold_dir: config.scaffold_dir.clone(),
            max_uncompressed_size: config.max_uncompressed_size,
        }
    }
}

/// What happened to one `.zip` entry of the bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// Name matched and the archive unpacked cleanly.
    Extracted { entry: String, identifier: String },
    /// Name matched but the archive could not be unpacked.
    Corrupt {
        entry: String,
        identifier: String,
        reason: String,
    },
    /// Name did not follow the convention.
    Rejected { entry: String },
    /// Name and archive were fine but the working directory could not be set up.
    Unprepared {
        entry: String,
        identifier: String,
        reason: String,
    },
}

impl EntryOutcome {
    fn print(&self) {
        let ok = "✔".green();
        let bad = "✘".red();
        match self {
            EntryOutcome::Extracted { entry, .. } => println!("\t[{ok}][{ok}]\tFile:  {entry}"),
            EntryOutcome::Corrupt { entry, .. } => println!("\t[{ok}][{bad}]\tFile:  {entry}"),
            EntryOutcome::Rejected { entry } => println!("\t[{bad}]\tFile:  {entry}"),
            EntryOutcome::Unprepared { entry, reason, .. } => {
                println!("\t[{ok}][{ok}][{bad}]\tFile:  {entry} ({reason})")
            }
        }
    }
}

/// Registry of extracted submissions plus a per-entry account of the run.
#[derive(Debug)]
pub struct Extraction {
    pub registry: SubmissionRegistry,
    pub outcomes: Vec<EntryOutcome>,
}

impl Extraction {
    pub fn count_extracted(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, EntryOutcome::Extracted { .. }))
            .count()
    }
}

fn print_legend() {
    let ok = "✔".green();
    let bad = "✘".red();
    println!("1) Running Pre-Checks");
    println!("\t[{ok}][{ok}] --> Correct submission name and valid zip file");
    println!("\t[{ok}][{bad}] --> Correct submission name but invalid zip file");
    println!("\t[{bad}] -----> Incorrect submission name");
    println!("\t[{ok}][{ok}][{bad}] --> Valid submission but its working directory could not be prepared");
    println!();
}

/// Extracts every submission in `bundle`.
///
/// The submissions directory is wiped first. Per-entry problems are reported
/// and skipped; only an unreadable bundle, scaffold directory, or working tree
/// fails the whole run.
pub fn extract_all(bundle: &Path, options: &ExtractOptions) -> Result<Extraction, ExtractError> {
    let scaffold = scaffold_files(&options.scaffold_dir)?;
    let mut archive = open_zip(bundle).map_err(|source| ExtractError::Bundle {
        path: bundle.to_path_buf(),
        source,
    })?;

    print_legend();

    reset_dir(&options.submissions_dir).map_err(|source| ExtractError::WorkingTree {
        path: options.submissions_dir.clone(),
        source,
    })?;

    let mut registry = SubmissionRegistry::new();
    let mut outcomes = Vec::new();

    for index in 0..archive.len() {
        let entry_name = match archive.by_index(index) {
            Ok(entry) => entry.name().to_string(),
            Err(err) => {
                tracing::warn!(index, error = %err, "Skipping unreadable bundle entry");
                continue;
            }
        };

        if !entry_name.ends_with(".zip") {
            continue;
        }

        let outcome = extract_entry(
            &mut archive,
            index,
            &entry_name,
            options,
            &scaffold,
            &mut registry,
        );
        outcome.print();
        outcomes.push(outcome);
    }
    println!();

    tracing::info!(
        bundle = %bundle.display(),
        entries = outcomes.len(),
        registered = registry.len(),
        "Extraction complete"
    );

    Ok(Extraction { registry, outcomes })
}

fn extract_entry<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    index: usize,
    entry_name: &str,
    options: &ExtractOptions,
    scaffold: &[PathBuf],
    registry: &mut SubmissionRegistry,
) -> EntryOutcome {
    let Some(name) = SubmissionName::parse(entry_name) else {
        tracing::info!(entry = entry_name, "Rejected submission with malformed name");
        return EntryOutcome::Rejected {
            entry: entry_name.to_string(),
        };
    };
    let identifier = name.identifier();

    match unpack_submission(archive, index, &identifier, options, scaffold) {
        Ok(dir) => {
            let record = SubmissionRecord::new(name.student_name, name.external_id, dir);
            if let Some(previous) = registry.insert(identifier.clone(), record) {
                tracing::warn!(
                    submission = %identifier,
                    replaced = %previous.name,
                    entry = entry_name,
                    "Duplicate identifier, keeping the later submission"
                );
            }
            EntryOutcome::Extracted {
                entry: entry_name.to_string(),
                identifier,
            }
        }
        Err(UnpackError::Archive(err)) => {
            tracing::warn!(entry = entry_name, error = %err, "Submission archive is unusable");
            EntryOutcome::Corrupt {
                entry: entry_name.to_string(),
                identifier,
                reason: err.to_string(),
            }
        }
        Err(UnpackError::Setup(err)) => {
            tracing::error!(
                entry = entry_name,
                error = %err,
                "Could not prepare submission working directory"
            );
            EntryOutcome::Unprepared {
                entry: entry_name.to_string(),
                identifier,
                reason: err.to_string(),
            }
        }
    }
}

/// Why a well-named submission did not make it into the working tree.
enum UnpackError {
    /// The inner archive itself is unusable.
    Archive(ArchiveError),
    /// The archive was fine but the grader's own file operations failed.
    Setup(io::Error),
}

/// Unpacks into a staging directory and only moves it to
/// `<submissions_dir>/<identifier>/` once every step succeeded, so a failed
/// entry never leaves files behind or touches an earlier submission with the
/// same identifier.
fn unpack_submission<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    index: usize,
    identifier: &str,
    options: &ExtractOptions,
    scaffold: &[PathBuf],
) -> Result<PathBuf, UnpackError> {
    let root = &options.submissions_dir;
    let archive_path = submission_archive_path(root, identifier);
    let staging = submission_staging_dir(root, identifier);
    let dir = submission_dir(root, identifier);

    let result = stage_submission(archive, index, &archive_path, &staging, options, scaffold)
        .and_then(|()| install(&staging, &dir).map_err(UnpackError::Setup));

    if archive_path.exists() {
        if let Err(err) = fs::remove_file(&archive_path) {
            tracing::warn!(path = %archive_path.display(), error = %err, "Could not remove intermediate archive");
        }
    }
    if staging.exists() {
        if let Err(err) = fs::remove_dir_all(&staging) {
            tracing::warn!(path = %staging.display(), error = %err, "Could not remove staging directory");
        }
    }

    result.map(|()| dir)
}

fn stage_submission<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    index: usize,
    archive_path: &Path,
    staging: &Path,
    options: &ExtractOptions,
    scaffold: &[PathBuf],
) -> Result<(), UnpackError> {
    let limit = options.max_uncompressed_size;
    extract_entry_to(archive, index, limit, archive_path).map_err(UnpackError::Archive)?;

    if staging.exists() {
        fs::remove_dir_all(staging).map_err(UnpackError::Setup)?;
    }
    extract_zip(archive_path, limit, staging).map_err(UnpackError::Archive)?;

    for file in scaffold {
        if let Some(file_name) = file.file_name() {
            fs::copy(file, staging.join(file_name)).map_err(UnpackError::Setup)?;
        }
    }
    Ok(())
}

/// Replaces `dir` with `staging`.
fn install(staging: &Path, dir: &Path) -> io::Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir)?;
    }
    fs::rename(staging, dir)
}

/// Every regular file under `dir`, recursively, in a stable order. A missing
/// directory yields no files.
pub fn scaffold_files(dir: &Path) -> Result<Vec<PathBuf>, ExtractError> {
    if !dir.exists() {
        tracing::warn!(dir = %dir.display(), "Scaffold directory not found, nothing to overlay");
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|source| ExtractError::Scaffold {
            path: dir.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
