//! XML Results Parser
//!
//! This module provides the [`XmlResultsParser`] for reading the aggregate pass/fail counts
//! out of an XML test report.
//!
//! # XML Shape
//!
//! ```xml
//! <Catch name="a.out">
//!   <Group name="a.out">
//!     ...
//!     <OverallResults successes="7" failures="3" expectedFailures="0"/>
//!   </Group>
//!   <OverallResults successes="7" failures="3" expectedFailures="0"/>
//! </Catch>
//! ```
//!
//! Only the aggregate element that is a direct child of the document root is read; per-group
//! and per-test-case elements deeper in the tree are ignored. Only `successes` and `failures`
//! are read; any other attribute, `expectedFailures` included, is ignored.

use roxmltree::{Document, Node};

use crate::error::MarkerError;
use crate::traits::report_parser::ReportParser;
use crate::types::OverallResults;

/// Element name used by Catch-style reporters for the run summary.
pub const OVERALL_RESULTS_TAG: &str = "OverallResults";

/// Parser for XML results reports.
#[derive(Debug, Default, Clone, Copy)]
pub struct XmlResultsParser;

impl XmlResultsParser {
    pub fn new() -> Self {
        Self
    }
}

impl ReportParser<OverallResults> for XmlResultsParser {
    fn parse(&self, raw: &str) -> Result<OverallResults, MarkerError> {
        let doc = Document::parse(raw).map_err(|e| MarkerError::InvalidXml(e.to_string()))?;

        let overall = doc
            .root_element()
            .children()
            .find(|n| n.is_element() && n.has_tag_name(OVERALL_RESULTS_TAG))
            .ok_or_else(|| MarkerError::MissingElement(OVERALL_RESULTS_TAG.to_string()))?;

        let successes = required_count(&overall, "successes")?;
        let failures = required_count(&overall, "failures")?;

        Ok(OverallResults::new(successes, failures))
    }
}

fn required_count(node: &Node, field: &str) -> Result<u64, MarkerError> {
    let value = node
        .attribute(field)
        .ok_or_else(|| MarkerError::MissingField(field.to_string()))?;
    parse_count(field, value)
}

fn parse_count(field: &str, value: &str) -> Result<u64, MarkerError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| MarkerError::InvalidCount {
            field: field.to_string(),
            value: value.to_string(),
        })
}
