//! Submission archive naming convention.
//!
//! LMS bulk downloads name each inner archive
//! `<name>_<external id>_<attachment id>_<track letters><track year>[suffix].zip`,
//! e.g. `doejane_48213_9931021_abc2024.zip` or `doejane_48213_9931021_abc2024-1.zip`
//! for a resubmission.

use once_cell::sync::Lazy;
use regex::Regex;

static SUBMISSION_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-zA-Z]+)_(\d+)_\d+_([a-zA-Z]+)([0-9]+)[(-?\[a-f0-9]*\]*\.zip$")
        .expect("submission name pattern is valid")
});

/// The parts of a well-formed inner archive name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionName {
    pub student_name: String,
    pub external_id: String,
    pub track_label: String,
    pub track_year: String,
}

impl SubmissionName {
    /// Returns `None` when `file_name` does not follow the convention.
    pub fn parse(file_name: &str) -> Option<Self> {
        let caps = SUBMISSION_NAME.captures(file_name)?;
        Some(Self {
            student_name: caps[1].to_string(),
            external_id: caps[2].to_string(),
            track_label: caps[3].to_string(),
            track_year: caps[4].to_string(),
        })
    }

    /// Student-track identifier: lowercased track label followed by the track year.
    pub fn identifier(&self) -> String {
        format!("{}{}", self.track_label.to_lowercase(), self.track_year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_plain_submission() {
        let name = SubmissionName::parse("doejane_48213_9931021_ABC2024.zip").unwrap();
        assert_eq!(name.student_name, "doejane");
        assert_eq!(name.external_id, "48213");
        assert_eq!(name.track_label, "ABC");
        assert_eq!(name.track_year, "2024");
        assert_eq!(name.identifier(), "abc2024");
    }

    #[test]
    fn test_identifier_ignores_name_and_ids() {
        let a = SubmissionName::parse("smith_1_2_Xyz2023.zip").unwrap();
        let b = SubmissionName::parse("jones_99999_12345678_xYZ2023.zip").unwrap();
        assert_eq!(a.identifier(), "xyz2023");
        assert_eq!(a.identifier(), b.identifier());
    }

    #[test]
    fn test_accepts_resubmission_suffixes() {
        for file in [
            "doejane_48213_9931021_abc2024-1.zip",
            "doejane_48213_9931021_abc2024-2.zip",
            "doejane_48213_9931021_abc2024(1).zip",
            "doejane_48213_9931021_abc2024-3f9a.zip",
        ] {
            let name = SubmissionName::parse(file).unwrap_or_else(|| panic!("{file}"));
            assert_eq!(name.identifier(), "abc2024", "{file}");
        }
    }

    #[test]
    fn test_rejects_malformed_names() {
        for file in [
            "doejane_48213_abc2024.zip",
            "doe jane_48213_9931021_abc2024.zip",
            "doejane_48213_9931021_2024.zip",
            "doejane_48213_9931021_abc.zip",
            "doejane_late_48213_9931021_abc2024.zip",
            "doejane_48213_9931021_abc2024.tar.gz",
            "nested/doejane_48213_9931021_abc2024.zip",
        ] {
            assert!(SubmissionName::parse(file).is_none(), "{file} should not match");
        }
    }
}
