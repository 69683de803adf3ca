//! Report Parser Trait
//!
//! This module defines the [`ReportParser`] trait, which provides a generic interface for parsing
//! the text of a test-results report into strongly-typed Rust structures.
//!
//! # Example
//!
//! ```rust
//! use marker::error::MarkerError;
//! use marker::traits::report_parser::ReportParser;
//!
//! struct LineCountParser;
//!
//! impl ReportParser<usize> for LineCountParser {
//!     fn parse(&self, raw: &str) -> Result<usize, MarkerError> {
//!         Ok(raw.lines().count())
//!     }
//! }
//!
//! assert_eq!(LineCountParser.parse("a\nb").unwrap(), 2);
//! ```

use std::fs;
use std::path::Path;

use crate::error::MarkerError;

/// A trait for parsing report text into a strongly-typed Rust structure.
///
/// # Type Parameters
///
/// * `T` - The output type produced by the parser.
pub trait ReportParser<T> {
    /// Parse raw report text into the target type.
    ///
    /// # Errors
    ///
    /// Returns a [`MarkerError`] if the input does not conform to the expected schema.
    fn parse(&self, raw: &str) -> Result<T, MarkerError>;

    /// Read `path` and parse its contents.
    fn parse_file(&self, path: &Path) -> Result<T, MarkerError> {
        let raw = fs::read_to_string(path)?;
        self.parse(&raw)
    }
}
