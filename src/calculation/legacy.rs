//! The legacy calculation path (path A).
//!
//! Applies the fixed, conservative rule set: per-diem is a flat rate per credit
//! hour and the only premium trigger is a red-eye flight.

use std::time::Instant;

use rust_decimal::Decimal;
use serde_json::json;
use tracing::debug;

use crate::config::LegacyRules;
use crate::error::EngineResult;
use crate::models::{DutyRecord, PayPath, PayPeriod, PayResult, Subject};

use super::PayCalculator;
use super::audit::{
    StepRecorder, amount_overflow, audit_value, record_credit_hours, record_gross_pay,
    record_guarantee, select_subject_records,
};
use super::rules::{hourly_per_diem, red_eye_count, red_eye_premium_pay};

/// Explanation attached to every legacy result.
pub const LEGACY_EXPLANATION: &str = "Legacy batch calculation";

/// Calculates pay with the legacy rule set.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use crew_pay_engine::calculation::{LegacyCalculator, PayCalculator};
/// use crew_pay_engine::models::{PayPeriod, Subject, SubjectStatus};
/// use rust_decimal::Decimal;
///
/// let subject = Subject {
///     id: "AVL1000".to_string(),
///     first_name: "Sarah".to_string(),
///     last_name: "Jones".to_string(),
///     position: "Captain".to_string(),
///     base: "FLL".to_string(),
///     hourly_rate: Decimal::new(50, 0),
///     status: SubjectStatus::Active,
/// };
/// let period = PayPeriod::new(
///     NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
/// )?;
///
/// let result = LegacyCalculator::default().calculate(&subject, &period, &[])?;
/// assert_eq!(result.gross_pay, Decimal::new(3750, 0));
/// # Ok::<(), crew_pay_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyCalculator {
    rules: LegacyRules,
}

impl LegacyCalculator {
    /// Creates a calculator with the given rules.
    pub fn new(rules: LegacyRules) -> Self {
        Self { rules }
    }

    /// Returns the rules in use.
    pub fn rules(&self) -> &LegacyRules {
        &self.rules
    }

    fn per_diem_pay(
        &self,
        subject: &Subject,
        credit_hours: Decimal,
        recorder: &mut StepRecorder,
    ) -> EngineResult<Decimal> {
        let pay = hourly_per_diem(credit_hours, self.rules.per_diem_hourly_rate)
            .ok_or_else(|| amount_overflow(subject, "per_diem"))?;
        recorder.record(
            "per_diem",
            "Per Diem (Hourly)",
            json!({
                "credit_hours": audit_value(credit_hours),
                "hourly_rate": audit_value(self.rules.per_diem_hourly_rate)
            }),
            json!({
                "per_diem_pay": audit_value(pay)
            }),
            format!(
                "{} credit hours x ${} = ${}",
                audit_value(credit_hours),
                audit_value(self.rules.per_diem_hourly_rate),
                audit_value(pay)
            ),
        );
        Ok(pay)
    }

    fn premium_pay(
        &self,
        subject: &Subject,
        records: &[&DutyRecord],
        recorder: &mut StepRecorder,
    ) -> EngineResult<Decimal> {
        let red_eyes = red_eye_count(records.iter().copied());
        let pay = red_eye_premium_pay(records.iter().copied(), self.rules.red_eye_premium)
            .ok_or_else(|| amount_overflow(subject, "premium"))?;
        recorder.record(
            "premium",
            "Red-Eye Premium",
            json!({
                "red_eye_records": red_eyes,
                "premium_per_record": audit_value(self.rules.red_eye_premium)
            }),
            json!({
                "premium_pay": audit_value(pay)
            }),
            format!(
                "{} red-eye duties x ${} = ${}",
                red_eyes,
                audit_value(self.rules.red_eye_premium),
                audit_value(pay)
            ),
        );
        Ok(pay)
    }
}

impl PayCalculator for LegacyCalculator {
    fn path(&self) -> PayPath {
        PayPath::Legacy
    }

    fn calculate(
        &self,
        subject: &Subject,
        period: &PayPeriod,
        records: &[DutyRecord],
    ) -> EngineResult<PayResult> {
        period.validate()?;

        let start_time = Instant::now();
        let mut recorder = StepRecorder::new();

        let own = select_subject_records(subject, records, &mut recorder);
        let credit_hours = record_credit_hours(subject, &own, &mut recorder)?;
        let guaranteed = record_guarantee(
            subject,
            credit_hours,
            &self.rules.guarantee,
            &mut recorder,
        )?;
        let per_diem_pay = self.per_diem_pay(subject, credit_hours, &mut recorder)?;
        let premium_pay = self.premium_pay(subject, &own, &mut recorder)?;
        let gross_pay = record_gross_pay(
            subject,
            &guaranteed,
            per_diem_pay,
            premium_pay,
            &mut recorder,
        )?;

        let processing_time_us = start_time.elapsed().as_micros() as u64;
        debug!(
            subject_id = %subject.id,
            path = %PayPath::Legacy,
            gross_pay = %gross_pay,
            duration_us = processing_time_us,
            "Calculation completed"
        );

        Ok(PayResult {
            subject_id: subject.id.clone(),
            period: *period,
            path: PayPath::Legacy,
            credit_hours,
            paid_hours: guaranteed.paid_hours,
            base_pay: guaranteed.base_pay,
            per_diem_pay,
            overtime_pay: guaranteed.overtime_pay,
            premium_pay,
            gross_pay,
            record_count: own.len(),
            processing_time_us,
            explanation: LEGACY_EXPLANATION.to_string(),
            audit_trace: recorder.finish(),
        })
    }
}
