//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type that bounds every calculation
//! and batch run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Represents a pay period as an inclusive date range.
///
/// Fields are public so periods can be deserialized from external requests;
/// every calculation calls [`PayPeriod::validate`] before doing any work.
///
/// # Example
///
/// ```
/// use crew_pay_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::new(
///     NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
/// )
/// .unwrap();
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The start date of the pay period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the pay period (inclusive).
    pub end_date: NaiveDate,
}

impl PayPeriod {
    /// Creates a validated pay period.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPeriod`] if `end_date` is before `start_date`.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> EngineResult<Self> {
        let period = Self {
            start_date,
            end_date,
        };
        period.validate()?;
        Ok(period)
    }

    /// Checks that the period does not end before it starts.
    ///
    /// A single-day period (start equals end) is valid.
    pub fn validate(&self) -> EngineResult<()> {
        if self.end_date < self.start_date {
            return Err(EngineError::InvalidPeriod {
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }

    /// Checks if a given date falls within this pay period, inclusive of both ends.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns the number of calendar days covered by the period.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}
