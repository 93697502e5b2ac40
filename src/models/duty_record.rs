//! Duty record model and related types.
//!
//! This module defines the DutyRecord and FlightAttributes structs for
//! representing duty assignments and the flights they are linked to.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const SECONDS_PER_HOUR: i64 = 3600;

/// Attributes of the flight a duty record is linked to.
///
/// Only `international` and `red_eye` influence pay; the remaining fields
/// identify the flight for audit purposes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlightAttributes {
    /// The flight number (e.g., "AV412").
    #[serde(default)]
    pub flight_number: String,
    /// Origin station code.
    #[serde(default)]
    pub origin: String,
    /// Destination station code.
    #[serde(default)]
    pub destination: String,
    /// Whether the flight is international.
    #[serde(default)]
    pub international: bool,
    /// Whether the flight departs overnight.
    #[serde(default)]
    pub red_eye: bool,
}

/// The shape of a record's duty window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DutyWindow {
    /// Both timestamps are present and in order; carries the hours between them.
    Complete(Decimal),
    /// One or both timestamps are missing.
    Incomplete,
    /// The duty end precedes the duty start.
    Inverted,
}

/// Represents one duty assignment within a pay period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DutyRecord {
    /// Unique identifier for the record.
    pub id: String,
    /// The subject this record belongs to.
    pub subject_id: String,
    /// The position worked on this duty (e.g., "Captain").
    #[serde(default)]
    pub position: String,
    /// The linked flight, if any.
    #[serde(default)]
    pub flight: Option<FlightAttributes>,
    /// When the duty started.
    #[serde(default)]
    pub duty_start: Option<NaiveDateTime>,
    /// When the duty ended.
    #[serde(default)]
    pub duty_end: Option<NaiveDateTime>,
    /// Pre-computed credit hours. Zero or absent means "derive from the duty window".
    #[serde(default)]
    pub credit_hours: Option<Decimal>,
}

impl DutyRecord {
    /// Classifies the record's duty window.
    ///
    /// # Examples
    ///
    /// ```
    /// use crew_pay_engine::models::{DutyRecord, DutyWindow};
    /// use chrono::NaiveDateTime;
    /// use rust_decimal::Decimal;
    ///
    /// const FORMAT: &str = "%Y-%m-%d %H:%M:%S";
    /// let record = DutyRecord {
    ///     id: "dr_001".to_string(),
    ///     subject_id: "AVL1000".to_string(),
    ///     position: "Captain".to_string(),
    ///     flight: None,
    ///     duty_start: NaiveDateTime::parse_from_str("2026-03-02 06:00:00", FORMAT).ok(),
    ///     duty_end: NaiveDateTime::parse_from_str("2026-03-02 13:30:00", FORMAT).ok(),
    ///     credit_hours: None,
    /// };
    /// assert_eq!(record.duty_window(), DutyWindow::Complete(Decimal::new(75, 1)));
    /// ```
    pub fn duty_window(&self) -> DutyWindow {
        match (self.duty_start, self.duty_end) {
            (Some(start), Some(end)) if end >= start => {
                let seconds = (end - start).num_seconds();
                DutyWindow::Complete(
                    Decimal::new(seconds, 0) / Decimal::new(SECONDS_PER_HOUR, 0),
                )
            }
            (Some(_), Some(_)) => DutyWindow::Inverted,
            _ => DutyWindow::Incomplete,
        }
    }

    /// Returns the hours between duty start and end, or zero when the window
    /// is incomplete or inverted.
    pub fn derived_hours(&self) -> Decimal {
        match self.duty_window() {
            DutyWindow::Complete(hours) => hours,
            DutyWindow::Incomplete | DutyWindow::Inverted => Decimal::ZERO,
        }
    }

    /// Returns the pre-computed credit hours, treating an absent value as zero.
    pub fn precomputed_credit(&self) -> Decimal {
        self.credit_hours.unwrap_or(Decimal::ZERO)
    }

    /// Returns true if the record is linked to a flight.
    pub fn has_flight(&self) -> bool {
        self.flight.is_some()
    }

    /// Returns true if the linked flight is a red-eye.
    pub fn is_red_eye(&self) -> bool {
        self.flight.as_ref().is_some_and(|f| f.red_eye)
    }

    /// Returns true if the linked flight is international.
    pub fn is_international(&self) -> bool {
        self.flight.as_ref().is_some_and(|f| f.international)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn create_record(start: Option<&str>, end: Option<&str>) -> DutyRecord {
        DutyRecord {
            id: "dr_001".to_string(),
            subject_id: "AVL1000".to_string(),
            position: "Captain".to_string(),
            flight: None,
            duty_start: start.map(make_datetime),
            duty_end: end.map(make_datetime),
            credit_hours: None,
        }
    }

    #[test]
    fn test_complete_window_yields_fractional_hours() {
        let record = create_record(Some("2026-03-02 06:00:00"), Some("2026-03-02 10:45:00"));
        assert_eq!(record.duty_window(), DutyWindow::Complete(Decimal::new(475, 2)));
        assert_eq!(record.derived_hours(), Decimal::new(475, 2));
    }

    #[test]
    fn test_overnight_window() {
        let record = create_record(Some("2026-03-02 22:00:00"), Some("2026-03-03 05:00:00"));
        assert_eq!(record.derived_hours(), Decimal::new(7, 0));
    }

    #[test]
    fn test_missing_end_contributes_zero() {
        let record = create_record(Some("2026-03-02 06:00:00"), None);
        assert_eq!(record.duty_window(), DutyWindow::Incomplete);
        assert_eq!(record.derived_hours(), Decimal::ZERO);
    }

    #[test]
    fn test_missing_start_contributes_zero() {
        let record = create_record(None, Some("2026-03-02 06:00:00"));
        assert_eq!(record.duty_window(), DutyWindow::Incomplete);
        assert_eq!(record.derived_hours(), Decimal::ZERO);
    }

    #[test]
    fn test_inverted_window_contributes_zero() {
        let record = create_record(Some("2026-03-02 10:00:00"), Some("2026-03-02 06:00:00"));
        assert_eq!(record.duty_window(), DutyWindow::Inverted);
        assert_eq!(record.derived_hours(), Decimal::ZERO);
    }

    #[test]
    fn test_flight_flags_without_flight() {
        let record = create_record(None, None);
        assert!(!record.has_flight());
        assert!(!record.is_red_eye());
        assert!(!record.is_international());
    }

    #[test]
    fn test_flight_flags_with_flight() {
        let mut record = create_record(None, None);
        record.flight = Some(FlightAttributes {
            flight_number: "AV712".to_string(),
            origin: "JFK".to_string(),
            destination: "LHR".to_string(),
            international: true,
            red_eye: true,
        });
        assert!(record.has_flight());
        assert!(record.is_red_eye());
        assert!(record.is_international());
    }

    #[test]
    fn test_deserialization_with_defaults() {
        let json = r#"{
            "id": "dr_009",
            "subject_id": "AVL1002",
            "duty_start": "2026-03-04T21:00:00",
            "duty_end": "2026-03-05T04:00:00",
            "credit_hours": "5.5",
            "flight": { "flight_number": "AV301", "red_eye": true }
        }"#;

        let record: DutyRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.precomputed_credit(), Decimal::new(55, 1));
        assert!(record.is_red_eye());
        assert!(!record.is_international());
        assert!(record.position.is_empty());
    }
}
