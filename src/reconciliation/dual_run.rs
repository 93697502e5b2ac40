//! Running two calculation paths side by side and reconciling them.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculation::PayCalculator;
use crate::error::{EngineError, EngineResult};
use crate::models::{Comparison, DutyRecord, PayPeriod, PayResult, Subject};
use crate::source::{RecordSource, SubjectSource};

use super::ReconciliationAnalyzer;

/// Both results of a side-by-side run and their comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// The result of the first path.
    pub result_a: PayResult,
    /// The result of the second path.
    pub result_b: PayResult,
    /// The comparison of `result_a` against `result_b`.
    pub comparison: Comparison,
}

impl ReconciliationAnalyzer {
    /// Calculates `subject`'s pay on both paths and compares the results.
    ///
    /// Each calculation is timed separately and the measured durations feed
    /// the comparison. `path_a` runs first.
    ///
    /// # Errors
    ///
    /// Returns the first error either calculator reports, such as
    /// [`EngineError::InvalidPeriod`].
    pub fn reconcile<A, B>(
        &self,
        subject: &Subject,
        period: &PayPeriod,
        records: &[DutyRecord],
        path_a: &A,
        path_b: &B,
    ) -> EngineResult<Reconciliation>
    where
        A: PayCalculator,
        B: PayCalculator,
    {
        period.validate()?;

        let (result_a, duration_a) = timed(path_a, subject, period, records)?;
        let (result_b, duration_b) = timed(path_b, subject, period, records)?;
        let comparison = self.compare(&result_a, &result_b, duration_a, duration_b);

        debug!(
            subject_id = %subject.id,
            path_a = %result_a.path,
            path_b = %result_b.path,
            differences = comparison.differences.len(),
            winner = ?comparison.winner,
            "Reconciliation completed"
        );

        Ok(Reconciliation {
            result_a,
            result_b,
            comparison,
        })
    }

    /// Resolves the subject and its records from the given sources, then reconciles.
    ///
    /// The subject and its records are fetched once and shared by both paths.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidPeriod`] if the period ends before it starts;
    ///   checked before the sources are consulted.
    /// - [`EngineError::SubjectNotFound`] if `subjects` has no such subject.
    /// - Any error either calculator reports.
    pub fn reconcile_for<A, B, S, R>(
        &self,
        subject_id: &str,
        period: &PayPeriod,
        subjects: &S,
        records: &R,
        path_a: &A,
        path_b: &B,
    ) -> EngineResult<Reconciliation>
    where
        A: PayCalculator,
        B: PayCalculator,
        S: SubjectSource + ?Sized,
        R: RecordSource + ?Sized,
    {
        period.validate()?;
        let subject = subjects
            .subject(subject_id)
            .ok_or_else(|| EngineError::SubjectNotFound {
                subject_id: subject_id.to_string(),
            })?;
        let duty_records = records.records_for(&subject.id, period);
        self.reconcile(&subject, period, &duty_records, path_a, path_b)
    }
}

fn timed<C: PayCalculator>(
    calculator: &C,
    subject: &Subject,
    period: &PayPeriod,
    records: &[DutyRecord],
) -> EngineResult<(PayResult, Duration)> {
    let start_time = Instant::now();
    let result = calculator.calculate(subject, period, records)?;
    Ok((result, start_time.elapsed()))
}
