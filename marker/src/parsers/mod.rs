//! # Parsers
//!
//! Parsers for the reports a submission's test binary can emit. Each parser
//! implements [`ReportParser`](crate::traits::report_parser::ReportParser).
//!
//! - [`xml_results_parser`]: Catch-style XML reports with an aggregate `OverallResults` element.

pub mod xml_results_parser;
