//! Subject model and related types.
//!
//! This module defines the Subject struct and SubjectStatus enum
//! for representing crew members who are paid for a period.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a subject is currently eligible for pay runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectStatus {
    /// The subject is included in batch runs.
    #[default]
    Active,
    /// The subject is skipped by batch runs.
    Inactive,
}

/// Represents a pay-eligible crew member.
///
/// Subjects are owned by an external record source and are never mutated
/// by a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique employee identifier (e.g., "AVL1000").
    pub id: String,
    /// The subject's first name.
    pub first_name: String,
    /// The subject's last name.
    pub last_name: String,
    /// The crew position (e.g., "Captain", "Flight Attendant").
    #[serde(default)]
    pub position: String,
    /// The home base station code (e.g., "BUR").
    #[serde(default)]
    pub base: String,
    /// The hourly pay rate. Expected to be non-negative.
    pub hourly_rate: Decimal,
    /// The subject's employment status.
    #[serde(default)]
    pub status: SubjectStatus,
}

impl Subject {
    /// Returns the subject's name for display, as "first last".
    ///
    /// # Examples
    ///
    /// ```
    /// use crew_pay_engine::models::{Subject, SubjectStatus};
    /// use rust_decimal::Decimal;
    ///
    /// let subject = Subject {
    ///     id: "AVL1000".to_string(),
    ///     first_name: "Jane".to_string(),
    ///     last_name: "Smith".to_string(),
    ///     position: "Captain".to_string(),
    ///     base: "BUR".to_string(),
    ///     hourly_rate: Decimal::new(50, 0),
    ///     status: SubjectStatus::Active,
    /// };
    /// assert_eq!(subject.display_name(), "Jane Smith");
    /// ```
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns true if the subject is included in batch runs.
    pub fn is_active(&self) -> bool {
        self.status == SubjectStatus::Active
    }
}
