use std::time::Duration;

/// Limits and collaborator names used while building and running one submission.
///
/// Built from [`AppConfig`](crate::config::AppConfig) by the binary and handed to
/// the grading workers by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionConfig {
    /// Build tool invoked with no arguments inside the submission directory.
    pub build_program: String,
    /// Executable the build is expected to leave behind, relative to the submission directory.
    pub build_artifact: String,
    /// Wall-clock ceiling for the test run.
    pub run_timeout_secs: u64,
    /// Optional wall-clock ceiling for the build. `None` lets a build run forever.
    pub build_timeout_secs: Option<u64>,
}

impl ExecutionConfig {
    pub fn default_config() -> Self {
        Self {
            build_program: default_build_program(),
            build_artifact: default_build_artifact(),
            run_timeout_secs: default_run_timeout_secs(),
            build_timeout_secs: None,
        }
    }

    pub fn run_timeout(&self) -> Duration {
        Duration::from_secs(self.run_timeout_secs)
    }

    pub fn build_timeout(&self) -> Option<Duration> {
        self.build_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

pub fn default_build_program() -> String {
    "make".into()
}

pub fn default_build_artifact() -> String {
    "a.out".into()
}

pub fn default_run_timeout_secs() -> u64 {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_make_workflow() {
        let cfg = ExecutionConfig::default();
        assert_eq!(cfg.build_program, "make");
        assert_eq!(cfg.build_artifact, "a.out");
        assert_eq!(cfg.run_timeout(), Duration::from_secs(3));
        assert!(cfg.build_timeout().is_none());
    }

    #[test]
    fn test_build_timeout_is_optional() {
        let cfg = ExecutionConfig {
            build_timeout_secs: Some(120),
            ..ExecutionConfig::default()
        };
        assert_eq!(cfg.build_timeout(), Some(Duration::from_secs(120)));
    }
}
