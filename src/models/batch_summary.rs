//! Batch run output models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PayPath, PayResult};

/// Aggregate statistics over one batch run.
///
/// `processed + errors <= total_subjects` always holds, and `total_pay` only
/// includes subjects that were processed successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Correlation id of the run.
    pub run_id: Uuid,
    /// The calculation path the run used.
    pub path: PayPath,
    /// Number of subjects the run considered.
    pub total_subjects: usize,
    /// Number of subjects processed successfully.
    pub processed: usize,
    /// Number of subjects that failed.
    pub errors: usize,
    /// Sum of gross pay over successfully processed subjects.
    pub total_pay: Decimal,
    /// Wall-clock duration of the whole run, in microseconds.
    pub processing_time_us: u64,
    /// `processing_time_us / max(processed, 1)`.
    pub average_time_per_subject_us: u64,
}

/// A subject that could not be processed during a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    /// The subject that failed.
    pub subject_id: String,
    /// Machine-readable error kind (see [`EngineError::kind`](crate::error::EngineError::kind)).
    pub kind: String,
    /// Human-readable error message.
    pub message: String,
}

/// Everything a batch run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Aggregate statistics.
    pub summary: BatchSummary,
    /// Successful results, in the order subjects were supplied.
    pub results: Vec<PayResult>,
    /// Failures, in the order subjects were supplied.
    pub failures: Vec<BatchFailure>,
}
