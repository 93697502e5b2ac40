//! Configuration types for pay rules.
//!
//! This module contains the strongly-typed rule structures that are
//! deserialized from `rules.yaml`. Every field has a default, so a partial
//! file only overrides what it names.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::{
    DEFAULT_GUARANTEED_HOURS, DEFAULT_OVERTIME_MULTIPLIER, DOMESTIC_PER_DIEM_DAYS,
    INTELLIGENT_PER_DIEM_DAY_RATE, INTELLIGENT_RED_EYE_PREMIUM, INTERNATIONAL_PER_DIEM_DAYS,
    LEGACY_PER_DIEM_HOURLY_RATE, LEGACY_RED_EYE_PREMIUM,
};
use crate::reconciliation::{DIFFERENCE_EPSILON, TIE_THRESHOLD};

/// Default delay inserted per subject by a throttled batch run.
pub const DEFAULT_THROTTLE_DELAY_MS: u64 = 1000;

/// Minimum guarantee and overtime settings shared by both paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GuaranteeRules {
    /// Floor on paid hours per period.
    pub minimum_hours: Decimal,
    /// Multiplier applied to the hourly rate for hours beyond the minimum.
    pub overtime_multiplier: Decimal,
}

impl Default for GuaranteeRules {
    fn default() -> Self {
        Self {
            minimum_hours: DEFAULT_GUARANTEED_HOURS,
            overtime_multiplier: DEFAULT_OVERTIME_MULTIPLIER,
        }
    }
}

/// Rule constants for the legacy path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LegacyRules {
    /// Guarantee and overtime settings.
    pub guarantee: GuaranteeRules,
    /// Per-diem paid per credit hour.
    pub per_diem_hourly_rate: Decimal,
    /// Premium paid per red-eye duty.
    pub red_eye_premium: Decimal,
}

impl Default for LegacyRules {
    fn default() -> Self {
        Self {
            guarantee: GuaranteeRules::default(),
            per_diem_hourly_rate: LEGACY_PER_DIEM_HOURLY_RATE,
            red_eye_premium: LEGACY_RED_EYE_PREMIUM,
        }
    }
}

/// Rule constants for the intelligent path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IntelligentRules {
    /// Guarantee and overtime settings.
    pub guarantee: GuaranteeRules,
    /// Per-diem paid per per-diem day.
    pub per_diem_day_rate: Decimal,
    /// Per-diem days credited for a domestic flight duty.
    pub domestic_per_diem_days: Decimal,
    /// Per-diem days credited for an international flight duty.
    pub international_per_diem_days: Decimal,
    /// Premium paid per red-eye duty.
    pub red_eye_premium: Decimal,
}

impl Default for IntelligentRules {
    fn default() -> Self {
        Self {
            guarantee: GuaranteeRules::default(),
            per_diem_day_rate: INTELLIGENT_PER_DIEM_DAY_RATE,
            domestic_per_diem_days: DOMESTIC_PER_DIEM_DAYS,
            international_per_diem_days: INTERNATIONAL_PER_DIEM_DAYS,
            red_eye_premium: INTELLIGENT_RED_EYE_PREMIUM,
        }
    }
}

/// Thresholds used by the reconciliation analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReconciliationRules {
    /// Differences at or below this value are ignored.
    pub difference_epsilon: Decimal,
    /// Summed differences below this value are declared a tie.
    pub tie_threshold: Decimal,
}

impl Default for ReconciliationRules {
    fn default() -> Self {
        Self {
            difference_epsilon: DIFFERENCE_EPSILON,
            tie_threshold: TIE_THRESHOLD,
        }
    }
}

/// Batch runner settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BatchRules {
    /// Delay inserted after each subject when throttling is requested.
    pub throttle_delay_ms: u64,
}

impl Default for BatchRules {
    fn default() -> Self {
        Self {
            throttle_delay_ms: DEFAULT_THROTTLE_DELAY_MS,
        }
    }
}

/// The complete rule configuration loaded from `rules.yaml`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Legacy path rules.
    pub legacy: LegacyRules,
    /// Intelligent path rules.
    pub intelligent: IntelligentRules,
    /// Reconciliation thresholds.
    pub reconciliation: ReconciliationRules,
    /// Batch runner settings.
    pub batch: BatchRules,
}
