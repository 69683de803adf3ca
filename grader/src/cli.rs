use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;
use util::paths::absolutize;

pub const DEFAULT_SUBMISSION: &str = "submissions.zip";
pub const DEFAULT_TEMPLATE: &str = "template.csv";

#[derive(Parser, Debug)]
#[command(version, about = "Grade students' homework based on unit testing.")]
pub struct Args {
    /// The path of the submission bundle (defaults to "submissions.zip")
    #[arg(long)]
    pub submission: Option<PathBuf>,
    /// The path of the roster template (defaults to "template.csv")
    #[arg(long)]
    pub template: Option<PathBuf>,
}

/// An explicitly named input file that does not exist.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Submission does not exist!")]
    MissingSubmission(PathBuf),
    #[error("Template file does not exist!")]
    MissingTemplate(PathBuf),
}

/// Absolute paths of the two input files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inputs {
    pub submission: PathBuf,
    pub template: PathBuf,
}

impl Args {
    /// Checks explicitly given paths for existence. Defaults are not checked
    /// here; they fail later when opened.
    pub fn resolve(&self) -> Result<Inputs, InputError> {
        let submission = match &self.submission {
            None => PathBuf::from(DEFAULT_SUBMISSION),
            Some(path) if path.exists() => path.clone(),
            Some(path) => return Err(InputError::MissingSubmission(path.clone())),
        };

        let template = match &self.template {
            None => PathBuf::from(DEFAULT_TEMPLATE),
            Some(path) if path.exists() => path.clone(),
            Some(path) => return Err(InputError::MissingTemplate(path.clone())),
        };

        Ok(Inputs {
            submission: absolutize(submission),
            template: absolutize(template),
        })
    }
}
