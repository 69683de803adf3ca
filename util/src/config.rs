//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! the grader's runtime settings loaded from environment variables (a `.env`
//! file in the working directory is honoured). Library crates never read it
//! directly; the binary derives an [`ExecutionConfig`] and passes it down.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{OnceLock, RwLock};

use crate::execution_config::{
    ExecutionConfig, default_build_artifact, default_build_program, default_run_timeout_secs,
};

/// Represents the complete grader configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    /// Working tree that extraction wipes and repopulates on every run.
    pub submissions_dir: PathBuf,
    /// Instructor scaffolding copied over every extracted submission.
    pub scaffold_dir: PathBuf,
    /// Where `grades-<id>.csv` is written.
    pub output_dir: PathBuf,
    pub build_program: String,
    pub build_artifact: String,
    pub run_timeout_secs: u64,
    pub build_timeout_secs: Option<u64>,
    pub max_uncompressed_size: u64,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Unparseable numeric values fall back to their defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "grader.log".into()),
            log_to_stdout: env::var("LOG_TO_STDOUT").unwrap_or_else(|_| "false".into()) == "true",
            submissions_dir: env::var("SUBMISSIONS_DIR")
                .unwrap_or_else(|_| "submissions".into())
                .into(),
            scaffold_dir: env::var("SCAFFOLD_DIR").unwrap_or_else(|_| "given".into()).into(),
            output_dir: env::var("OUTPUT_DIR").unwrap_or_else(|_| ".".into()).into(),
            build_program: env::var("BUILD_PROGRAM").unwrap_or_else(|_| default_build_program()),
            build_artifact: env::var("BUILD_ARTIFACT")
                .unwrap_or_else(|_| default_build_artifact()),
            run_timeout_secs: parse_var("RUN_TIMEOUT_SECS").unwrap_or_else(default_run_timeout_secs),
            build_timeout_secs: parse_var("BUILD_TIMEOUT_SECS"),
            max_uncompressed_size: parse_var("MAX_UNCOMPRESSED_SIZE")
                .unwrap_or_else(default_max_uncompressed_size),
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock is poisoned.
    pub fn global() -> std::sync::RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// The subset of settings a grading worker needs.
    pub fn execution_config(&self) -> ExecutionConfig {
        ExecutionConfig {
            build_program: self.build_program.clone(),
            build_artifact: self.build_artifact.clone(),
            run_timeout_secs: self.run_timeout_secs,
            build_timeout_secs: self.build_timeout_secs,
        }
    }
}

/// Ceiling on the decompressed size of one submission archive.
pub fn default_max_uncompressed_size() -> u64 {
    100 * 1024 * 1024
}

fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
