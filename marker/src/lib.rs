//! # Marker Library
//!
//! Reads the results report a submission's test binary leaves behind and turns it into a
//! percentage score.
//!
//! ## Key Concepts
//! - **ReportParser**: converts raw report text into [`OverallResults`](types::OverallResults).
//! - **Scorer**: converts aggregate counts into a score in `[0, 100]`.
//! - **MarkReport**: the combined result for one report file.

pub mod error;
pub mod parsers;
pub mod scorer;
pub mod traits;
pub mod types;

use std::path::Path;

use crate::error::MarkerError;
use crate::parsers::xml_results_parser::XmlResultsParser;
use crate::scorer::compute_score;
use crate::traits::report_parser::ReportParser;
use crate::types::OverallResults;

/// Counts and score for one results report.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkReport {
    pub results: OverallResults,
    /// Percentage in `[0, 100]`.
    pub score: f64,
}

/// Parses the XML report at `path` and scores it.
///
/// # Errors
///
/// Propagates any read, parse, or scoring failure as a [`MarkerError`].
pub fn mark_report_file(path: &Path) -> Result<MarkReport, MarkerError> {
    mark_report_with(&XmlResultsParser::new(), path)
}

/// Same as [`mark_report_file`] with a caller-supplied parser.
pub fn mark_report_with<P: ReportParser<OverallResults>>(
    parser: &P,
    path: &Path,
) -> Result<MarkReport, MarkerError> {
    let results = parser.parse_file(path)?;
    let score = compute_score(&results)?;
    tracing::debug!(
        report = %path.display(),
        successes = results.successes,
        failures = results.failures,
        score,
        "Marked results report"
    );
    Ok(MarkReport { results, score })
}
