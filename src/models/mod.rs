//! Core data models for the crew pay engine.
//!
//! This module contains all the domain models used throughout the engine.

mod batch_summary;
mod comparison;
mod duty_record;
mod pay_period;
mod pay_result;
mod subject;

pub use batch_summary::{BatchFailure, BatchReport, BatchSummary};
pub use comparison::{Comparison, ComparisonMetrics, FieldDifference, PayField, Winner};
pub use duty_record::{DutyRecord, DutyWindow, FlightAttributes};
pub use pay_period::PayPeriod;
pub use pay_result::{AuditStep, AuditTrace, AuditWarning, PayPath, PayResult};
pub use subject::{Subject, SubjectStatus};
