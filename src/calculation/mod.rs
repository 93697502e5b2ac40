//! Calculation logic for the crew pay engine.
//!
//! This module contains the shared pay rule primitives (credit hours, the
//! minimum guarantee, base pay, overtime, per-diem and premium pay) and the
//! two calculation paths built on them: the [`LegacyCalculator`] and the
//! [`IntelligentCalculator`].

mod audit;
mod intelligent;
mod legacy;
mod narrative;
mod rules;

pub use audit::{
    FOREIGN_RECORD_WARNING, INCOMPLETE_DUTY_WINDOW_WARNING, INVERTED_DUTY_WINDOW_WARNING,
};
pub use intelligent::IntelligentCalculator;
pub use legacy::{LEGACY_EXPLANATION, LegacyCalculator};
pub use narrative::{format_currency, format_fixed};
pub use rules::{
    CreditHoursBasis, DEFAULT_GUARANTEED_HOURS, DEFAULT_OVERTIME_MULTIPLIER,
    DOMESTIC_PER_DIEM_DAYS, GuaranteedPay, INTELLIGENT_PER_DIEM_DAY_RATE,
    INTELLIGENT_RED_EYE_PREMIUM, INTERNATIONAL_PER_DIEM_DAYS, LEGACY_PER_DIEM_HOURLY_RATE,
    LEGACY_RED_EYE_PREMIUM, base_pay, credit_hours, credit_hours_basis, daily_per_diem,
    guaranteed_paid_hours, hourly_per_diem, overtime_hours, overtime_pay, per_diem_days,
    red_eye_count, red_eye_premium_pay,
};

use crate::error::{EngineError, EngineResult};
use crate::models::{DutyRecord, PayPath, PayPeriod, PayResult, Subject};
use crate::source::{RecordSource, SubjectSource};

/// A calculation path that turns a subject's duty records into a [`PayResult`].
///
/// Implementations hold no cross-call state, so one calculator can serve any
/// number of subjects, including from several threads at once.
pub trait PayCalculator {
    /// The path tag stamped on every result.
    fn path(&self) -> PayPath;

    /// Calculates pay for `subject` over `period`.
    ///
    /// Records belonging to another subject are ignored with an audit warning.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidPeriod`] if the period ends before it starts.
    /// - [`EngineError::AmountOverflow`] if an amount leaves the decimal range.
    fn calculate(
        &self,
        subject: &Subject,
        period: &PayPeriod,
        records: &[DutyRecord],
    ) -> EngineResult<PayResult>;

    /// Resolves the subject and its records from the given sources, then calculates.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidPeriod`] if the period ends before it starts;
    ///   checked before the sources are consulted.
    /// - [`EngineError::SubjectNotFound`] if `subjects` has no such subject.
    /// - [`EngineError::AmountOverflow`] as for [`PayCalculator::calculate`].
    fn calculate_for<S, R>(
        &self,
        subject_id: &str,
        period: &PayPeriod,
        subjects: &S,
        records: &R,
    ) -> EngineResult<PayResult>
    where
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
        self.calculate(&subject, period, &duty_records)
    }
}
