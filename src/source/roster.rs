//! An in-memory subject and record source.

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::{DutyRecord, PayPeriod, Subject};

use super::{RecordSource, SubjectSource};

/// Subjects and duty records held in memory, in insertion order.
///
/// # Example
///
/// ```
/// use crew_pay_engine::source::{InMemoryRoster, SubjectSource};
///
/// let roster = InMemoryRoster::from_json(r#"{
///     "subjects": [
///         {"id": "AVL1000", "first_name": "Sarah", "last_name": "Jones", "hourly_rate": "60"},
///         {"id": "AVL1001", "first_name": "Omar", "last_name": "Haddad", "hourly_rate": "55",
///          "status": "inactive"}
///     ]
/// }"#)?;
///
/// assert_eq!(roster.active_subject_ids(), vec!["AVL1000".to_string()]);
/// # Ok::<(), crew_pay_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InMemoryRoster {
    #[serde(default)]
    subjects: Vec<Subject>,
    #[serde(default)]
    records: Vec<DutyRecord>,
}

impl InMemoryRoster {
    /// Creates a roster from owned subjects and records.
    pub fn new(subjects: Vec<Subject>, records: Vec<DutyRecord>) -> Self {
        Self { subjects, records }
    }

    /// Parses a roster from a JSON document with `subjects` and `records` arrays.
    ///
    /// Timestamps use the ISO 8601 form `2026-03-02T06:00:00`; money and hours
    /// may be strings or numbers.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::RosterParseError`] if the document is malformed.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        serde_json::from_str(json).map_err(|e| EngineError::RosterParseError {
            message: e.to_string(),
        })
    }

    /// Returns every subject, active or not.
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    /// Returns every duty record.
    pub fn records(&self) -> &[DutyRecord] {
        &self.records
    }
}

impl SubjectSource for InMemoryRoster {
    fn subject(&self, id: &str) -> Option<Subject> {
        self.subjects.iter().find(|s| s.id == id).cloned()
    }

    fn active_subject_ids(&self) -> Vec<String> {
        self.subjects
            .iter()
            .filter(|s| s.is_active())
            .map(|s| s.id.clone())
            .collect()
    }
}

impl RecordSource for InMemoryRoster {
    fn records_for(&self, subject_id: &str, period: &PayPeriod) -> Vec<DutyRecord> {
        self.records
            .iter()
            .filter(|r| r.subject_id == subject_id)
            .filter(|r| {
                r.duty_start
                    .is_some_and(|start| period.contains_date(start.date()))
            })
            .cloned()
            .collect()
    }
}
