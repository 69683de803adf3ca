pub mod cli;
pub mod extractor;
pub mod gradebook;
pub mod logging;
pub mod naming;
pub mod pipeline;
