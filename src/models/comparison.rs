//! Reconciliation output models.
//!
//! A [`Comparison`] is derived from two [`PayResult`](super::PayResult)s and is
//! never persisted by the engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PayPath;

/// A pay field that the reconciliation analyzer diffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayField {
    /// Total gross pay.
    GrossPay,
    /// Credit hours.
    CreditHours,
    /// Per-diem pay.
    PerDiemPay,
    /// Premium pay.
    PremiumPay,
}

impl PayField {
    /// All compared fields, in the order they are checked.
    pub const ALL: [PayField; 4] = [
        PayField::GrossPay,
        PayField::CreditHours,
        PayField::PerDiemPay,
        PayField::PremiumPay,
    ];
}

/// One field on which the two results disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDifference {
    /// The field that differs.
    pub field: PayField,
    /// The value from the first result.
    pub value_a: Decimal,
    /// The value from the second result.
    pub value_b: Decimal,
    /// Absolute difference between the two values.
    pub difference: Decimal,
    /// Difference relative to `value_a`, as a percentage. Only set for gross pay.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<Decimal>,
}

/// Aggregate metrics over a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonMetrics {
    /// True when no differences were recorded.
    pub accuracy_match: bool,
    /// Number of recorded differences.
    pub total_differences: usize,
    /// Largest recorded absolute difference, or zero.
    pub max_difference: Decimal,
    /// Processing time of the first result, in whole microseconds.
    ///
    /// Reported for display; the winner and speed figures use the exact durations.
    pub processing_time_a_us: u64,
    /// Processing time of the second result, in whole microseconds.
    pub processing_time_b_us: u64,
    /// `(a - b) / a * 100`; positive when the second result was faster.
    pub speed_improvement_percent: Decimal,
}

/// Which argument of a comparison is considered more trustworthy.
///
/// The winner is positional: `PathA` is the first result passed to the
/// analyzer and `PathB` the second, whatever paths produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    /// The first result.
    PathA,
    /// The second result.
    PathB,
    /// Neither result is preferred.
    Tie,
}

/// The structured diff of two pay results with a verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    /// Path tag of the first result.
    pub path_a: PayPath,
    /// Path tag of the second result.
    pub path_b: PayPath,
    /// Per-field differences above the epsilon.
    pub differences: Vec<FieldDifference>,
    /// Aggregate metrics.
    pub metrics: ComparisonMetrics,
    /// The positional winner.
    pub winner: Winner,
    /// A templated recommendation sentence.
    pub recommendation: String,
}

impl Comparison {
    /// Maps the positional winner back to the path tag of the winning result.
    ///
    /// Returns `None` for a tie.
    pub fn winning_path(&self) -> Option<PayPath> {
        match self.winner {
            Winner::PathA => Some(self.path_a),
            Winner::PathB => Some(self.path_b),
            Winner::Tie => None,
        }
    }

    /// Returns the recorded difference for `field`, if any.
    pub fn difference(&self, field: PayField) -> Option<&FieldDifference> {
        self.differences.iter().find(|d| d.field == field)
    }
}
