//! The intelligent calculation path (path B).
//!
//! Shares credit hours, the guarantee and overtime with the legacy path. Per-diem
//! is paid per day, with international flight duties earning more days, and the
//! red-eye premium is higher. The explanation is a narrative generated from the
//! computed figures.

use std::time::Instant;

use rust_decimal::Decimal;
use serde_json::json;
use tracing::debug;

use crate::config::IntelligentRules;
use crate::error::EngineResult;
use crate::models::{DutyRecord, PayPath, PayPeriod, PayResult, Subject};

use super::PayCalculator;
use super::audit::{
    StepRecorder, amount_overflow, audit_value, record_credit_hours, record_gross_pay,
    record_guarantee, select_subject_records,
};
use super::narrative::{NarrativeFigures, intelligent_explanation};
use super::rules::{daily_per_diem, per_diem_days, red_eye_count, red_eye_premium_pay};

/// Calculates pay with the extended rule set.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntelligentCalculator {
    rules: IntelligentRules,
}

impl IntelligentCalculator {
    /// Creates a calculator with the given rules.
    pub fn new(rules: IntelligentRules) -> Self {
        Self { rules }
    }

    /// Returns the rules in use.
    pub fn rules(&self) -> &IntelligentRules {
        &self.rules
    }

    /// Returns `(days, pay)`.
    fn per_diem(
        &self,
        subject: &Subject,
        records: &[&DutyRecord],
        recorder: &mut StepRecorder,
    ) -> EngineResult<(Decimal, Decimal)> {
        let flights = records.iter().filter(|r| r.has_flight()).count();
        let international = records.iter().filter(|r| r.is_international()).count();
        let days = per_diem_days(
            records.iter().copied(),
            self.rules.domestic_per_diem_days,
            self.rules.international_per_diem_days,
        )
        .ok_or_else(|| amount_overflow(subject, "per_diem"))?;
        let pay = daily_per_diem(days, self.rules.per_diem_day_rate)
            .ok_or_else(|| amount_overflow(subject, "per_diem"))?;

        recorder.record(
            "per_diem",
            "Per Diem (Daily)",
            json!({
                "flight_records": flights,
                "international_records": international,
                "domestic_days": audit_value(self.rules.domestic_per_diem_days),
                "international_days": audit_value(self.rules.international_per_diem_days),
                "day_rate": audit_value(self.rules.per_diem_day_rate)
            }),
            json!({
                "per_diem_days": audit_value(days),
                "per_diem_pay": audit_value(pay)
            }),
            format!(
                "{} per diem days across {} flight duties ({} international) x ${} = ${}",
                audit_value(days),
                flights,
                international,
                audit_value(self.rules.per_diem_day_rate),
                audit_value(pay)
            ),
        );

        Ok((days, pay))
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

impl PayCalculator for IntelligentCalculator {
    fn path(&self) -> PayPath {
        PayPath::Intelligent
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
        let (per_diem_days, per_diem_pay) = self.per_diem(subject, &own, &mut recorder)?;
        let premium_pay = self.premium_pay(subject, &own, &mut recorder)?;
        let gross_pay = record_gross_pay(
            subject,
            &guaranteed,
            per_diem_pay,
            premium_pay,
            &mut recorder,
        )?;

        let explanation = intelligent_explanation(
            subject,
            &NarrativeFigures {
                credit_hours,
                record_count: own.len(),
                per_diem_days,
                premium_pay,
                gross_pay,
            },
        );

        let processing_time_us = start_time.elapsed().as_micros() as u64;
        debug!(
            subject_id = %subject.id,
            path = %PayPath::Intelligent,
            gross_pay = %gross_pay,
            duration_us = processing_time_us,
            "Calculation completed"
        );

        Ok(PayResult {
            subject_id: subject.id.clone(),
            period: *period,
            path: PayPath::Intelligent,
            credit_hours,
            paid_hours: guaranteed.paid_hours,
            base_pay: guaranteed.base_pay,
            per_diem_pay,
            overtime_pay: guaranteed.overtime_pay,
            premium_pay,
            gross_pay,
            record_count: own.len(),
            processing_time_us,
            explanation,
            audit_trace: recorder.finish(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{FlightAttributes, SubjectStatus};
    use chrono::{NaiveDate, NaiveDateTime};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_subject(rate: &str) -> Subject {
        Subject {
            id: "AVL1042".to_string(),
            first_name: "Miguel".to_string(),
            last_name: "Rivera".to_string(),
            position: "Flight Attendant".to_string(),
            base: "MCO".to_string(),
            hourly_rate: dec(rate),
            status: SubjectStatus::Active,
        }
    }

    fn make_period() -> PayPeriod {
        PayPeriod {
            start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
        }
    }

    fn flight_record(
        id: &str,
        credit: Option<&str>,
        international: bool,
        red_eye: bool,
    ) -> DutyRecord {
        DutyRecord {
            id: id.to_string(),
            subject_id: "AVL1042".to_string(),
            position: "Flight Attendant".to_string(),
            flight: Some(FlightAttributes {
                flight_number: "AV220".to_string(),
                origin: "MCO".to_string(),
                destination: if international { "CUN" } else { "BWI" }.to_string(),
                international,
                red_eye,
            }),
            duty_start: None,
            duty_end: None,
            credit_hours: credit.map(dec),
        }
    }

    /// IC-001: domestic red-eye with overtime
    #[test]
    fn test_domestic_red_eye_with_overtime() {
        let result = IntelligentCalculator::default()
            .calculate(
                &make_subject("60"),
                &make_period(),
                &[flight_record("dr_1", Some("80"), false, true)],
            )
            .unwrap();

        assert_eq!(result.path, PayPath::Intelligent);
        assert_eq!(result.base_pay, dec("4800"));
        assert_eq!(result.overtime_pay, dec("450"));
        assert_eq!(result.per_diem_pay, dec("50"));
        assert_eq!(result.premium_pay, dec("75"));
        assert_eq!(result.gross_pay, dec("5375"));
        assert!(result.is_balanced());
    }

    /// IC-002: international duties earn 1.5 per-diem days
    #[test]
    fn test_international_per_diem_days() {
        let records = vec![
            flight_record("dr_1", Some("6"), true, false),
            flight_record("dr_2", Some("6"), true, false),
            flight_record("dr_3", Some("4"), false, false),
        ];
        let result = IntelligentCalculator::default()
            .calculate(&make_subject("50"), &make_period(), &records)
            .unwrap();

        assert_eq!(result.per_diem_pay, dec("200"));
        assert_eq!(result.premium_pay, Decimal::ZERO);
        assert_eq!(result.gross_pay, dec("3950"));
    }

    #[test]
    fn test_records_without_flight_earn_no_per_diem() {
        let mut record = flight_record("dr_1", Some("8"), true, true);
        record.flight = None;
        let result = IntelligentCalculator::default()
            .calculate(&make_subject("50"), &make_period(), &[record])
            .unwrap();

        assert_eq!(result.per_diem_pay, Decimal::ZERO);
        assert_eq!(result.premium_pay, Decimal::ZERO);
    }

    #[test]
    fn test_explanation_narrative() {
        let result = IntelligentCalculator::default()
            .calculate(
                &make_subject("60"),
                &make_period(),
                &[flight_record("dr_1", Some("80"), false, true)],
            )
            .unwrap();

        assert_eq!(
            result.explanation,
            "Processed payroll for Miguel Rivera (AVL1042). Calculated 80.00 credit hours \
             from 1 assignments. Applied 1.0 per diem days. Detected premium pay \
             opportunities totaling $75.00. Final gross pay: $5,375.00."
        );
    }

    #[test]
    fn test_out_of_range_premium_is_an_error() {
        let mut rules = IntelligentRules::default();
        rules.red_eye_premium = Decimal::MAX;
        let records = vec![
            flight_record("dr_1", Some("4"), false, true),
            flight_record("dr_2", Some("4"), false, true),
        ];

        let result = IntelligentCalculator::new(rules).calculate(
            &make_subject("50"),
            &make_period(),
            &records,
        );

        assert!(matches!(
            result,
            Err(EngineError::AmountOverflow { ref rule, .. }) if rule == "premium"
        ));
    }

    #[test]
    fn test_inverted_window_warns_and_counts_zero() {
        let parse = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
        let mut record = flight_record("dr_1", None, false, false);
        record.duty_start = Some(parse("2026-03-05 18:00:00"));
        record.duty_end = Some(parse("2026-03-05 09:00:00"));

        let result = IntelligentCalculator::default()
            .calculate(&make_subject("50"), &make_period(), &[record])
            .unwrap();

        assert_eq!(result.credit_hours, Decimal::ZERO);
        assert_eq!(result.paid_hours, dec("75"));
        assert_eq!(result.audit_trace.warnings.len(), 1);
        assert_eq!(result.audit_trace.warnings[0].code, "INVERTED_DUTY_WINDOW");
    }

    #[test]
    fn test_per_diem_audit_step_reports_days() {
        let records = vec![
            flight_record("dr_1", Some("6"), true, false),
            flight_record("dr_2", Some("4"), false, false),
        ];
        let result = IntelligentCalculator::default()
            .calculate(&make_subject("50"), &make_period(), &records)
            .unwrap();

        let step = result
            .audit_trace
            .steps
            .iter()
            .find(|s| s.rule_id == "per_diem")
            .unwrap();
        assert_eq!(step.output["per_diem_days"], "2.5");
        assert_eq!(step.input["international_records"], 1);
    }
}
