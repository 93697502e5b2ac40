//! Read-only access to subjects and duty records.
//!
//! The engine never owns the system of record. Calculators and the batch runner
//! read through [`SubjectSource`] and [`RecordSource`]; [`InMemoryRoster`] is a
//! ready-made implementation for tests, benches and embedding callers.

mod roster;

pub use roster::InMemoryRoster;

use crate::models::{DutyRecord, PayPeriod, Subject};

/// Supplies subject attributes.
pub trait SubjectSource {
    /// Looks up a subject by identifier.
    fn subject(&self, id: &str) -> Option<Subject>;

    /// Returns the identifiers of all active subjects, in source order.
    fn active_subject_ids(&self) -> Vec<String>;
}

/// Supplies duty records per subject and period.
pub trait RecordSource {
    /// Returns the subject's records whose duty starts within `period`.
    fn records_for(&self, subject_id: &str, period: &PayPeriod) -> Vec<DutyRecord>;
}
