//! Error types for the crew pay engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while calculating or reconciling pay.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the crew pay engine.
///
/// [`EngineError::SubjectNotFound`], [`EngineError::InvalidPeriod`] and
/// [`EngineError::AmountOverflow`] originate in the calculation core. The
/// remaining variants belong to the configuration and roster loaders that feed it.
///
/// # Example
///
/// ```
/// use crew_pay_engine::error::EngineError;
///
/// let error = EngineError::SubjectNotFound {
///     subject_id: "AVL1001".to_string(),
/// };
/// assert_eq!(error.to_string(), "Subject not found: AVL1001");
/// assert_eq!(error.kind(), "subject_not_found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The subject is absent from the supplied subject source.
    #[error("Subject not found: {subject_id}")]
    SubjectNotFound {
        /// The identifier that could not be resolved.
        subject_id: String,
    },

    /// The pay period ends before it starts.
    #[error("Invalid pay period: end {end} is before start {start}")]
    InvalidPeriod {
        /// The start date of the rejected period.
        start: NaiveDate,
        /// The end date of the rejected period.
        end: NaiveDate,
    },

    /// A pay rule produced an amount outside the decimal range.
    ///
    /// Only reachable with hours, rates or rule constants far beyond any real payroll.
    #[error("Pay amount out of range for subject {subject_id} in rule '{rule}'")]
    AmountOverflow {
        /// The subject being calculated.
        subject_id: String,
        /// The audit rule id of the step that overflowed.
        rule: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A roster document could not be parsed.
    #[error("Failed to parse roster: {message}")]
    RosterParseError {
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Returns a stable, machine-readable code for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::SubjectNotFound { .. } => "subject_not_found",
            EngineError::InvalidPeriod { .. } => "invalid_period",
            EngineError::AmountOverflow { .. } => "amount_overflow",
            EngineError::ConfigNotFound { .. } => "config_not_found",
            EngineError::ConfigParseError { .. } => "config_parse_error",
            EngineError::RosterParseError { .. } => "roster_parse_error",
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_not_found_displays_id() {
        let error = EngineError::SubjectNotFound {
            subject_id: "AVL1007".to_string(),
        };
        assert_eq!(error.to_string(), "Subject not found: AVL1007");
    }

    #[test]
    fn test_invalid_period_displays_both_dates() {
        let error = EngineError::InvalidPeriod {
            start: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
            end: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid pay period: end 2026-03-01 is before start 2026-03-31"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_amount_overflow_displays_subject_and_rule() {
        let error = EngineError::AmountOverflow {
            subject_id: "AVL1000".to_string(),
            rule: "base_pay".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Pay amount out of range for subject AVL1000 in rule 'base_pay'"
        );
        assert_eq!(error.kind(), "amount_overflow");
    }

    #[test]
    fn test_kind_codes_are_distinct() {
        let errors = [
            EngineError::SubjectNotFound {
                subject_id: "x".to_string(),
            },
            EngineError::InvalidPeriod {
                start: NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
                end: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            },
            EngineError::AmountOverflow {
                subject_id: "x".to_string(),
                rule: "base_pay".to_string(),
            },
            EngineError::ConfigNotFound {
                path: "p".to_string(),
            },
            EngineError::ConfigParseError {
                path: "p".to_string(),
                message: "m".to_string(),
            },
            EngineError::RosterParseError {
                message: "m".to_string(),
            },
        ];

        let mut kinds: Vec<&str> = errors.iter().map(EngineError::kind).collect();
        kinds.sort_unstable();
        kinds.dedup();
        assert_eq!(kinds.len(), errors.len());
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::SubjectNotFound {
                subject_id: "AVL1000".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
