//! # Scorer Module
//!
//! Turns aggregate pass/fail counts into a percentage score.

use crate::error::MarkerError;
use crate::types::OverallResults;

/// Computes `successes / (successes + failures) × 100`.
///
/// The multiplication happens before the division so that whole percentages such as
/// 7 of 10 come out exact.
///
/// # Errors
///
/// Returns [`MarkerError::NoAssertions`] when both counts are zero, and
/// [`MarkerError::CountOverflow`] when their sum does not fit in a `u64`.
///
/// # Example
///
/// ```
/// use marker::scorer::compute_score;
/// use marker::types::OverallResults;
///
/// assert_eq!(compute_score(&OverallResults::new(7, 3)).unwrap(), 70.0);
/// assert!(compute_score(&OverallResults::new(0, 0)).is_err());
/// ```
pub fn compute_score(results: &OverallResults) -> Result<f64, MarkerError> {
    let total = results.total().ok_or(MarkerError::CountOverflow {
        successes: results.successes,
        failures: results.failures,
    })?;
    if total == 0 {
        return Err(MarkerError::NoAssertions);
    }

    Ok(results.successes as f64 * 100.0 / total as f64)
}

/// Renders a score the way it is stored in grade files and gradebooks: whole
/// numbers without a fractional part (`70`, `0`), everything else in full.
pub fn format_score(score: f64) -> String {
    format!("{score}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seventy_percent_is_exact() {
        assert_eq!(compute_score(&OverallResults::new(7, 3)).unwrap(), 70.0);
    }

    #[test]
    fn test_all_passed_and_all_failed() {
        assert_eq!(compute_score(&OverallResults::new(12, 0)).unwrap(), 100.0);
        assert_eq!(compute_score(&OverallResults::new(0, 5)).unwrap(), 0.0);
    }

    #[test]
    fn test_empty_run_is_an_error_not_a_panic() {
        let err = compute_score(&OverallResults::new(0, 0)).unwrap_err();
        assert!(matches!(err, MarkerError::NoAssertions));
    }

    #[test]
    fn test_overflowing_counts_are_an_error() {
        let err = compute_score(&OverallResults::new(u64::MAX, 1)).unwrap_err();
        assert!(matches!(
            err,
            MarkerError::CountOverflow { successes: u64::MAX, failures: 1 }
        ));

        // Largest representable total still scores inside [0, 100].
        let score = compute_score(&OverallResults::new(u64::MAX - 2, 2)).unwrap();
        assert!((0.0..=100.0).contains(&score));
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(70.0), "70");
        assert_eq!(format_score(0.0), "0");
        assert_eq!(format_score(87.5), "87.5");
    }

    #[test]
    fn test_fractional_score() {
        let score = compute_score(&OverallResults::new(1, 2)).unwrap();
        assert!((score - 33.333_333).abs() < 1e-4);
    }
}
