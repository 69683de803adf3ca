//! Merges computed scores into the instructor's roster template.
//!
//! Roster layout: `name, external id, student-track identifier, section, score`.
//! The first row is a header whose score column holds `Assignment Name (id)`.

use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use marker::scorer::format_score;
use thiserror::Error;
use util::paths::{ensure_dir, gradebook_path};
use util::registry::SubmissionRegistry;

pub const IDENTIFIER_COLUMN: usize = 2;
pub const SCORE_COLUMN: usize = 4;
const ROSTER_COLUMNS: usize = 5;

#[derive(Debug, Error)]
pub enum GradebookError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("roster {} is empty", .0.display())]
    EmptyRoster(PathBuf),
    #[error("roster header {0:?} does not contain an assignment id in parentheses")]
    MissingAssignmentId(String),
    #[error("roster row {row} has {columns} columns, expected at least 5")]
    MalformedRow { row: usize, columns: usize },
}

/// Name and id parsed from a header such as `Homework 3 (1234)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentHeader {
    pub name: String,
    pub id: String,
}

impl AssignmentHeader {
    pub fn parse(field: &str) -> Result<Self, GradebookError> {
        let missing = || GradebookError::MissingAssignmentId(field.to_string());
        let open = field.find('(').ok_or_else(missing)?;
        let close = field[open + 1..]
            .find(')')
            .map(|offset| open + 1 + offset)
            .ok_or_else(missing)?;

        let id = field[open + 1..close].trim();
        if id.is_empty() {
            return Err(missing());
        }

        Ok(Self {
            name: field[..open].trim().to_string(),
            id: id.to_string(),
        })
    }
}

/// Result of writing one gradebook.
#[derive(Debug, Clone)]
pub struct Gradebook {
    pub assignment: AssignmentHeader,
    pub path: PathBuf,
    /// Data rows written, excluding the header.
    pub rows: usize,
}

/// Score for one roster row.
///
/// `computed` is `None` when the student has no submission, which always yields 0.
/// Otherwise the higher of the roster's prior score (blank or unparseable counts
/// as 0) and the computed score wins.
pub fn merge_score(existing: &str, computed: Option<f64>) -> f64 {
    let Some(computed) = computed else {
        return 0.0;
    };

    let prior = existing
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0);

    prior.max(computed)
}

/// Reads `template`, fills in every row's score from `registry`, and writes
/// `grades-<assignment id>.csv` into `output_dir`.
pub fn generate_gradebook(
    template: &Path,
    registry: &SubmissionRegistry,
    output_dir: &Path,
) -> Result<Gradebook, GradebookError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(template)?;

    let mut records = reader.records();
    let header = records
        .next()
        .transpose()?
        .ok_or_else(|| GradebookError::EmptyRoster(template.to_path_buf()))?;
    if header.len() < ROSTER_COLUMNS {
        return Err(GradebookError::MalformedRow {
            row: 1,
            columns: header.len(),
        });
    }
    let assignment = AssignmentHeader::parse(&header[SCORE_COLUMN])?;

    let mut merged = Vec::new();
    for (offset, record) in records.enumerate() {
        let record = record?;
        if record.len() < ROSTER_COLUMNS {
            return Err(GradebookError::MalformedRow {
                row: offset + 2,
                columns: record.len(),
            });
        }

        let computed = registry.score_for(&record[IDENTIFIER_COLUMN]);
        let score = merge_score(&record[SCORE_COLUMN], computed);
        merged.push(with_score(&record, score));
    }

    ensure_dir(output_dir)?;
    let path = gradebook_path(output_dir, &assignment.id);
    let mut writer = WriterBuilder::new().flexible(true).from_path(&path)?;
    writer.write_record(&header)?;
    for record in &merged {
        writer.write_record(record)?;
    }
    writer.flush()?;

    tracing::info!(
        gradebook = %path.display(),
        assignment = %assignment.name,
        rows = merged.len(),
        "Gradebook written"
    );

    Ok(Gradebook {
        assignment,
        path,
        rows: merged.len(),
    })
}

fn with_score(record: &StringRecord, score: f64) -> StringRecord {
    let score = format_score(score);
    record
        .iter()
        .enumerate()
        .map(|(i, field)| if i == SCORE_COLUMN { score.as_str() } else { field })
        .collect()
}
