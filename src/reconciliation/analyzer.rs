//! Field-by-field comparison and winner selection.

use std::time::Duration;

use rust_decimal::Decimal;

use crate::calculation::{format_currency, format_fixed};
use crate::config::ReconciliationRules;
use crate::models::{
    Comparison, ComparisonMetrics, FieldDifference, PayField, PayPath, PayResult, Winner,
};

/// Differences at or below one cent are ignored.
pub const DIFFERENCE_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Summed differences below one dollar are declared a tie.
pub const TIE_THRESHOLD: Decimal = Decimal::from_parts(100, 0, 0, false, 2);

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Compares two pay results with the default thresholds.
///
/// Shorthand for `ReconciliationAnalyzer::default().compare(..)`.
pub fn compare(
    result_a: &PayResult,
    result_b: &PayResult,
    duration_a: Duration,
    duration_b: Duration,
) -> Comparison {
    ReconciliationAnalyzer::default().compare(result_a, result_b, duration_a, duration_b)
}

/// Diffs two pay results and decides which is more trustworthy.
///
/// The winner is positional. When the results disagree by at least the tie
/// threshold, the second result wins: the richer rule set is expected in that
/// position and is assumed to have caught something the simpler one missed.
/// This is a fixed policy, not a numerical judgement.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use chrono::NaiveDate;
/// use crew_pay_engine::calculation::{IntelligentCalculator, LegacyCalculator, PayCalculator};
/// use crew_pay_engine::models::{PayPeriod, Subject, SubjectStatus, Winner};
/// use crew_pay_engine::reconciliation::ReconciliationAnalyzer;
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
/// let legacy = LegacyCalculator::default().calculate(&subject, &period, &[])?;
/// let intelligent = IntelligentCalculator::default().calculate(&subject, &period, &[])?;
///
/// let comparison = ReconciliationAnalyzer::default().compare(
///     &legacy,
///     &intelligent,
///     Duration::from_micros(200),
///     Duration::from_micros(50),
/// );
/// assert!(comparison.metrics.accuracy_match);
/// assert_eq!(comparison.winner, Winner::PathB);
/// # Ok::<(), crew_pay_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconciliationAnalyzer {
    rules: ReconciliationRules,
}

impl ReconciliationAnalyzer {
    /// Creates an analyzer with the given thresholds.
    pub fn new(rules: ReconciliationRules) -> Self {
        Self { rules }
    }

    /// Returns the thresholds in use.
    pub fn rules(&self) -> &ReconciliationRules {
        &self.rules
    }

    /// Compares `result_a` against `result_b`.
    ///
    /// Neither input is modified. `duration_a` and `duration_b` are the
    /// wall-clock times the caller measured for each result.
    pub fn compare(
        &self,
        result_a: &PayResult,
        result_b: &PayResult,
        duration_a: Duration,
        duration_b: Duration,
    ) -> Comparison {
        let differences = self.differences(result_a, result_b);

        let speed_improvement_percent = speed_improvement(duration_a, duration_b);

        let metrics = ComparisonMetrics {
            accuracy_match: differences.is_empty(),
            total_differences: differences.len(),
            max_difference: differences
                .iter()
                .map(|d| d.difference)
                .max()
                .unwrap_or(Decimal::ZERO),
            processing_time_a_us: whole_micros(duration_a),
            processing_time_b_us: whole_micros(duration_b),
            speed_improvement_percent,
        };

        let winner = self.winner(&differences, duration_a, duration_b);
        let recommendation = self.recommendation(
            winner,
            &differences,
            speed_improvement_percent,
            result_a.path,
            result_b.path,
        );

        Comparison {
            path_a: result_a.path,
            path_b: result_b.path,
            differences,
            metrics,
            winner,
            recommendation,
        }
    }

    fn differences(&self, result_a: &PayResult, result_b: &PayResult) -> Vec<FieldDifference> {
        PayField::ALL
            .iter()
            .filter_map(|&field| {
                let value_a = field_value(result_a, field);
                let value_b = field_value(result_b, field);
                let difference = value_a.saturating_sub(value_b).abs();
                if difference <= self.rules.difference_epsilon {
                    return None;
                }

                let percentage = match field {
                    PayField::GrossPay if value_a > Decimal::ZERO => Some(
                        difference
                            .checked_div(value_a)
                            .and_then(|ratio| ratio.checked_mul(ONE_HUNDRED))
                            .unwrap_or(Decimal::MAX),
                    ),
                    PayField::GrossPay => Some(Decimal::ZERO),
                    _ => None,
                };

                Some(FieldDifference {
                    field,
                    value_a,
                    value_b,
                    difference,
                    percentage,
                })
            })
            .collect()
    }

    fn winner(
        &self,
        differences: &[FieldDifference],
        duration_a: Duration,
        duration_b: Duration,
    ) -> Winner {
        if differences.is_empty() {
            return if duration_b < duration_a {
                Winner::PathB
            } else {
                Winner::Tie
            };
        }

        let total = differences
            .iter()
            .fold(Decimal::ZERO, |sum, d| sum.saturating_add(d.difference));
        if total < self.rules.tie_threshold {
            Winner::Tie
        } else {
            Winner::PathB
        }
    }

    fn recommendation(
        &self,
        winner: Winner,
        differences: &[FieldDifference],
        speed_improvement_percent: Decimal,
        path_a: PayPath,
        path_b: PayPath,
    ) -> String {
        let speed = format_fixed(speed_improvement_percent, 1);
        match (winner, differences.is_empty()) {
            (Winner::PathB, true) => format!(
                "{} path produced identical results {}% faster. Recommended for production.",
                path_b.name(),
                speed
            ),
            (Winner::PathB, false) => format!(
                "{} path detected {} calculation difference(s) that the {} path missed \
                 and was {}% faster. Strongly recommended.",
                path_b.name(),
                differences.len(),
                path_a.name(),
                speed
            ),
            (Winner::PathA, _) => {
                format!("{} path performed better in this case.", path_a.name())
            }
            (Winner::Tie, true) => format!(
                "Both paths produced identical results. {} path was {}% faster.",
                path_b.name(),
                speed
            ),
            (Winner::Tie, false) => format!(
                "Both paths agree within ${}: {} minor difference(s) below the tie threshold. \
                 {} path was {}% faster.",
                format_currency(self.rules.tie_threshold),
                differences.len(),
                path_b.name(),
                speed
            ),
        }
    }
}

fn field_value(result: &PayResult, field: PayField) -> Decimal {
    match field {
        PayField::GrossPay => result.gross_pay,
        PayField::CreditHours => result.credit_hours,
        PayField::PerDiemPay => result.per_diem_pay,
        PayField::PremiumPay => result.premium_pay,
    }
}

/// `(a - b) / a * 100` over nanoseconds, or zero when `a` is zero.
fn speed_improvement(duration_a: Duration, duration_b: Duration) -> Decimal {
    let a = Decimal::from(whole_nanos(duration_a));
    let b = Decimal::from(whole_nanos(duration_b));
    if a.is_zero() {
        return Decimal::ZERO;
    }
    (a - b) / a * ONE_HUNDRED
}

fn whole_nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}

fn whole_micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}
