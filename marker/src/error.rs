//! Marker Error Types
//!
//! This module defines the [`MarkerError`] enum, which covers everything that can go wrong
//! while loading a test-results report and turning it into a score.
//!
//! # Usage
//!
//! ```rust
//! use marker::error::MarkerError;
//!
//! fn require_counts(total: u64) -> Result<(), MarkerError> {
//!     if total == 0 {
//!         return Err(MarkerError::NoAssertions);
//!     }
//!     Ok(())
//! }
//!
//! assert!(require_counts(0).is_err());
//! ```

use thiserror::Error;

/// Represents all error types that can occur in the marker system.
#[derive(Debug, Error)]
pub enum MarkerError {
    /// The report file could not be read.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// The report is not well-formed XML.
    #[error("malformed results report: {0}")]
    InvalidXml(String),
    /// The aggregate results element is absent.
    #[error("missing <{0}> element under the report root")]
    MissingElement(String),
    /// A required attribute is missing from the aggregate element.
    #[error("missing '{0}' attribute")]
    MissingField(String),
    /// An attribute is present but not a non-negative integer.
    #[error("'{field}' is not a non-negative integer: {value:?}")]
    InvalidCount { field: String, value: String },
    /// The counts are too large to add up.
    #[error("assertion counts overflow: {successes} successes + {failures} failures")]
    CountOverflow { successes: u64, failures: u64 },
    /// The report has zero successes and zero failures, so no percentage exists.
    #[error("report contains no passed or failed assertions")]
    NoAssertions,
}
