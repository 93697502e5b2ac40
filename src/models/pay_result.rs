//! Pay result models for the crew pay engine.
//!
//! This module contains the [`PayResult`] type and its associated structures
//! that capture all outputs from one calculation path, including the pay
//! components, the explanation, and an audit trace.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PayPeriod;

/// Identifies which calculation path produced a result.
///
/// # Example
///
/// ```
/// use crew_pay_engine::models::PayPath;
///
/// assert_eq!(PayPath::Legacy.to_string(), "legacy");
/// assert_eq!(PayPath::Intelligent.name(), "Intelligent");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayPath {
    /// The fixed, conservative rule set (path A).
    Legacy,
    /// The extended rule set with richer per-diem and premium rules (path B).
    Intelligent,
}

impl PayPath {
    /// Returns the capitalised name used in recommendations.
    pub fn name(&self) -> &'static str {
        match self {
            PayPath::Legacy => "Legacy",
            PayPath::Intelligent => "Intelligent",
        }
    }
}

impl fmt::Display for PayPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayPath::Legacy => f.write_str("legacy"),
            PayPath::Intelligent => f.write_str("intelligent"),
        }
    }
}

/// A single step in the audit trace recording a rule application.
///
/// Each step captures the input, output, and reasoning for a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number, starting at 1.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag input oddities that were tolerated rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level ("low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The output of one calculation path for one subject and period.
///
/// A `PayResult` is created once per calculation and never mutated afterwards.
/// `gross_pay` always equals the sum of the four pay components, and
/// `paid_hours` never falls below the guaranteed minimum the path applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayResult {
    /// The subject the result is for.
    pub subject_id: String,
    /// The pay period the result covers.
    pub period: PayPeriod,
    /// The path that produced the result.
    pub path: PayPath,
    /// Credit hours counted toward pay.
    pub credit_hours: Decimal,
    /// Hours paid after the minimum guarantee.
    pub paid_hours: Decimal,
    /// `paid_hours * hourly_rate`.
    pub base_pay: Decimal,
    /// Per-diem allowance.
    pub per_diem_pay: Decimal,
    /// Pay for credit hours beyond the guarantee.
    pub overtime_pay: Decimal,
    /// Premium pay for qualifying duty.
    pub premium_pay: Decimal,
    /// Sum of the four pay components.
    pub gross_pay: Decimal,
    /// Number of duty records that contributed.
    pub record_count: usize,
    /// Wall-clock processing time in microseconds.
    pub processing_time_us: u64,
    /// Human-readable explanation of the result.
    pub explanation: String,
    /// Step-by-step record of the rules applied.
    pub audit_trace: AuditTrace,
}

impl PayResult {
    /// Returns the sum of base, per-diem, overtime and premium pay, or `None`
    /// if it leaves the decimal range.
    pub fn components_total(&self) -> Option<Decimal> {
        self.base_pay
            .checked_add(self.per_diem_pay)?
            .checked_add(self.overtime_pay)?
            .checked_add(self.premium_pay)
    }

    /// Returns true if `gross_pay` reconciles with its components.
    pub fn is_balanced(&self) -> bool {
        self.components_total() == Some(self.gross_pay)
    }
}
