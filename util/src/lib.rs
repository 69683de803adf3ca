pub mod archive;
pub mod config;
pub mod execution_config;
pub mod paths;
pub mod registry;
