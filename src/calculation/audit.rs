//! Audit trace recording shared by both calculation paths.
//!
//! Both calculators record the same record-selection, credit-hours, guarantee
//! and gross-pay steps; only the per-diem and premium steps differ.

use rust_decimal::Decimal;
use serde_json::{Value, json};

use crate::config::GuaranteeRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditTrace, AuditWarning, DutyRecord, DutyWindow, Subject};

use super::rules::{
    CreditHoursBasis, GuaranteedPay, base_pay, credit_hours, credit_hours_basis,
    guaranteed_paid_hours, overtime_hours, overtime_pay,
};

/// Warning code for records that belong to a different subject.
pub const FOREIGN_RECORD_WARNING: &str = "FOREIGN_RECORD";

/// Warning code for records whose duty window is missing a timestamp.
pub const INCOMPLETE_DUTY_WINDOW_WARNING: &str = "INCOMPLETE_DUTY_WINDOW";

/// Warning code for records whose duty end precedes their duty start.
pub const INVERTED_DUTY_WINDOW_WARNING: &str = "INVERTED_DUTY_WINDOW";

/// Accumulates audit steps with sequential numbering.
#[derive(Debug, Default)]
pub(crate) struct StepRecorder {
    steps: Vec<AuditStep>,
    warnings: Vec<AuditWarning>,
}

impl StepRecorder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(
        &mut self,
        rule_id: &str,
        rule_name: &str,
        input: Value,
        output: Value,
        reasoning: String,
    ) {
        let step_number = self.steps.len() as u32 + 1;
        self.steps.push(AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            input,
            output,
            reasoning,
        });
    }

    pub(crate) fn warn(&mut self, code: &str, message: String, severity: &str) {
        self.warnings.push(AuditWarning {
            code: code.to_string(),
            message,
            severity: severity.to_string(),
        });
    }

    pub(crate) fn finish(self) -> AuditTrace {
        AuditTrace {
            steps: self.steps,
            warnings: self.warnings,
        }
    }
}

/// The error for a rule whose amount left the decimal range.
pub(crate) fn amount_overflow(subject: &Subject, rule: &str) -> EngineError {
    EngineError::AmountOverflow {
        subject_id: subject.id.clone(),
        rule: rule.to_string(),
    }
}

/// Renders a decimal for audit JSON without trailing zeros.
pub(crate) fn audit_value(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Keeps only the records that belong to `subject`, warning about the rest.
pub(crate) fn select_subject_records<'a>(
    subject: &Subject,
    records: &'a [DutyRecord],
    recorder: &mut StepRecorder,
) -> Vec<&'a DutyRecord> {
    let (own, foreign): (Vec<&DutyRecord>, Vec<&DutyRecord>) =
        records.iter().partition(|r| r.subject_id == subject.id);

    for record in &foreign {
        recorder.warn(
            FOREIGN_RECORD_WARNING,
            format!(
                "Record '{}' belongs to subject '{}' and was ignored",
                record.id, record.subject_id
            ),
            "medium",
        );
    }

    recorder.record(
        "record_selection",
        "Record Selection",
        json!({
            "subject_id": subject.id,
            "records_supplied": records.len()
        }),
        json!({
            "records_used": own.len(),
            "records_ignored": foreign.len()
        }),
        format!(
            "Using {} of {} supplied duty records for subject '{}'",
            own.len(),
            records.len(),
            subject.id
        ),
    );

    own
}

/// Computes credit hours, recording the policy used and any window warnings.
pub(crate) fn record_credit_hours(
    subject: &Subject,
    records: &[&DutyRecord],
    recorder: &mut StepRecorder,
) -> EngineResult<Decimal> {
    let basis = credit_hours_basis(records.iter().copied());
    let hours = credit_hours(records.iter().copied())
        .ok_or_else(|| amount_overflow(subject, "credit_hours"))?;

    if basis == CreditHoursBasis::DutyWindow {
        for record in records {
            match record.duty_window() {
                DutyWindow::Complete(_) => {}
                DutyWindow::Incomplete => recorder.warn(
                    INCOMPLETE_DUTY_WINDOW_WARNING,
                    format!(
                        "Record '{}' is missing a duty start or end; counted as 0 hours",
                        record.id
                    ),
                    "low",
                ),
                DutyWindow::Inverted => recorder.warn(
                    INVERTED_DUTY_WINDOW_WARNING,
                    format!(
                        "Record '{}' ends before it starts; counted as 0 hours",
                        record.id
                    ),
                    "high",
                ),
            }
        }
    }

    let reasoning = match basis {
        CreditHoursBasis::Precomputed => format!(
            "Summed pre-computed credit hours across {} records: {}",
            records.len(),
            audit_value(hours)
        ),
        CreditHoursBasis::DutyWindow => format!(
            "No pre-computed credit hours; derived {} hours from {} duty windows",
            audit_value(hours),
            records.len()
        ),
    };

    recorder.record(
        "credit_hours",
        "Credit Hours",
        json!({
            "records": records.len(),
            "basis": basis
        }),
        json!({
            "credit_hours": audit_value(hours)
        }),
        reasoning,
    );

    Ok(hours)
}

/// Applies the guarantee, recording the paid-hours, base-pay and overtime steps.
pub(crate) fn record_guarantee(
    subject: &Subject,
    credit_hours: Decimal,
    rules: &GuaranteeRules,
    recorder: &mut StepRecorder,
) -> EngineResult<GuaranteedPay> {
    let hourly_rate = subject.hourly_rate;
    let paid_hours = guaranteed_paid_hours(credit_hours, rules.minimum_hours);
    let guaranteed = GuaranteedPay {
        paid_hours,
        base_pay: base_pay(paid_hours, hourly_rate)
            .ok_or_else(|| amount_overflow(subject, "base_pay"))?,
        overtime_hours: overtime_hours(credit_hours, rules.minimum_hours)
            .ok_or_else(|| amount_overflow(subject, "overtime"))?,
        overtime_pay: overtime_pay(
            credit_hours,
            rules.minimum_hours,
            hourly_rate,
            rules.overtime_multiplier,
        )
        .ok_or_else(|| amount_overflow(subject, "overtime"))?,
    };

    recorder.record(
        "minimum_guarantee",
        "Minimum Guarantee",
        json!({
            "credit_hours": audit_value(credit_hours),
            "minimum_hours": audit_value(rules.minimum_hours)
        }),
        json!({
            "paid_hours": audit_value(guaranteed.paid_hours),
            "guarantee_applied": credit_hours < rules.minimum_hours
        }),
        format!(
            "max({}, {}) = {} paid hours",
            audit_value(credit_hours),
            audit_value(rules.minimum_hours),
            audit_value(guaranteed.paid_hours)
        ),
    );

    recorder.record(
        "base_pay",
        "Base Pay",
        json!({
            "paid_hours": audit_value(guaranteed.paid_hours),
            "hourly_rate": audit_value(hourly_rate)
        }),
        json!({
            "base_pay": audit_value(guaranteed.base_pay)
        }),
        format!(
            "{} hours x ${} = ${}",
            audit_value(guaranteed.paid_hours),
            audit_value(hourly_rate),
            audit_value(guaranteed.base_pay)
        ),
    );

    recorder.record(
        "overtime",
        "Overtime",
        json!({
            "credit_hours": audit_value(credit_hours),
            "minimum_hours": audit_value(rules.minimum_hours),
            "hourly_rate": audit_value(hourly_rate),
            "multiplier": audit_value(rules.overtime_multiplier)
        }),
        json!({
            "overtime_hours": audit_value(guaranteed.overtime_hours),
            "overtime_pay": audit_value(guaranteed.overtime_pay)
        }),
        format!(
            "{} hours over the guarantee x ${} x {} = ${}",
            audit_value(guaranteed.overtime_hours),
            audit_value(hourly_rate),
            audit_value(rules.overtime_multiplier),
            audit_value(guaranteed.overtime_pay)
        ),
    );

    Ok(guaranteed)
}

/// Sums the four pay components and records the total.
pub(crate) fn record_gross_pay(
    subject: &Subject,
    guaranteed: &GuaranteedPay,
    per_diem_pay: Decimal,
    premium_pay: Decimal,
    recorder: &mut StepRecorder,
) -> EngineResult<Decimal> {
    let gross_pay = guaranteed
        .base_pay
        .checked_add(per_diem_pay)
        .and_then(|sum| sum.checked_add(guaranteed.overtime_pay))
        .and_then(|sum| sum.checked_add(premium_pay))
        .ok_or_else(|| amount_overflow(subject, "gross_pay"))?;

    recorder.record(
        "gross_pay",
        "Gross Pay",
        json!({
            "base_pay": audit_value(guaranteed.base_pay),
            "per_diem_pay": audit_value(per_diem_pay),
            "overtime_pay": audit_value(guaranteed.overtime_pay),
            "premium_pay": audit_value(premium_pay)
        }),
        json!({
            "gross_pay": audit_value(gross_pay)
        }),
        format!(
            "${} + ${} + ${} + ${} = ${}",
            audit_value(guaranteed.base_pay),
            audit_value(per_diem_pay),
            audit_value(guaranteed.overtime_pay),
            audit_value(premium_pay),
            audit_value(gross_pay)
        ),
    );

    Ok(gross_pay)
}
