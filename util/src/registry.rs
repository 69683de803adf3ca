//! Submission registry shared by extraction, grading and the gradebook.
//!
//! The registry is built once by the extractor, receives at most one score per
//! entry from the grading coordinator, and is then only read.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// One extracted submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRecord {
    /// Student name as it appears in the archive file name.
    pub name: String,
    /// External (LMS) roster id from the archive file name.
    pub external_id: String,
    /// Directory the submission was unpacked into.
    pub path: PathBuf,
    /// Percentage in `[0, 100]`, set after grading.
    pub score: Option<f64>,
}

impl SubmissionRecord {
    pub fn new(name: impl Into<String>, external_id: impl Into<String>, path: PathBuf) -> Self {
        Self {
            name: name.into(),
            external_id: external_id.into(),
            path,
            score: None,
        }
    }
}

/// Submissions keyed by student-track identifier, iterated in identifier order.
#[derive(Debug, Clone, Default)]
pub struct SubmissionRegistry {
    entries: BTreeMap<String, SubmissionRecord>,
}

impl SubmissionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a submission. A second submission with the same identifier
    /// replaces the first, which is returned.
    pub fn insert(
        &mut self,
        identifier: impl Into<String>,
        record: SubmissionRecord,
    ) -> Option<SubmissionRecord> {
        self.entries.insert(identifier.into(), record)
    }

    pub fn get(&self, identifier: &str) -> Option<&SubmissionRecord> {
        self.entries.get(identifier)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SubmissionRecord)> {
        self.entries.iter()
    }

    /// Stores a computed score, clamped to `[0, 100]`. Returns `false` when the
    /// identifier is unknown.
    pub fn record_score(&mut self, identifier: &str, score: f64) -> bool {
        match self.entries.get_mut(identifier) {
            Some(record) => {
                let score = if score.is_finite() { score.clamp(0.0, 100.0) } else { 0.0 };
                record.score = Some(score);
                true
            }
            None => false,
        }
    }

    /// Score to merge into the gradebook: `None` when nothing was submitted,
    /// `Some(0.0)` for a registered but ungraded submission.
    pub fn score_for(&self, identifier: &str) -> Option<f64> {
        self.entries
            .get(identifier)
            .map(|record| record.score.unwrap_or(0.0))
    }
}
