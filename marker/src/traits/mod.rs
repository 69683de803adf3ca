//!
//! Traits Module
//!
//! - [`report_parser`]: Defines the trait for turning a raw results report into Rust types.

pub mod report_parser;
