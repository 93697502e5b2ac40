//! Pay rule primitives shared by both calculation paths.
//!
//! Everything here is a pure function of its arguments. The paths differ only
//! in the per-diem and premium rules layered on top.
//!
//! Functions that add or multiply amounts return `None` when the result falls
//! outside the range of [`Decimal`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::DutyRecord;

/// Guaranteed paid hours per period (monthly guarantee policy).
///
/// Not derived from the period length; callers supply the minimum that
/// matches their rate and period convention.
pub const DEFAULT_GUARANTEED_HOURS: Decimal = Decimal::from_parts(75, 0, 0, false, 0);

/// Multiplier applied to the hourly rate for credit hours beyond the guarantee.
pub const DEFAULT_OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Legacy per-diem, paid per credit hour.
pub const LEGACY_PER_DIEM_HOURLY_RATE: Decimal = Decimal::from_parts(250, 0, 0, false, 2);

/// Legacy premium per red-eye duty.
pub const LEGACY_RED_EYE_PREMIUM: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Intelligent per-diem, paid per per-diem day.
pub const INTELLIGENT_PER_DIEM_DAY_RATE: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Per-diem days credited for a domestic flight duty.
pub const DOMESTIC_PER_DIEM_DAYS: Decimal = Decimal::from_parts(1, 0, 0, false, 0);

/// Per-diem days credited for an international flight duty.
pub const INTERNATIONAL_PER_DIEM_DAYS: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Intelligent premium per red-eye duty.
pub const INTELLIGENT_RED_EYE_PREMIUM: Decimal = Decimal::from_parts(75, 0, 0, false, 0);

/// Where a set of records' credit hours come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditHoursBasis {
    /// At least one record carries a non-zero pre-computed credit value.
    Precomputed,
    /// No record carries a credit value; hours come from duty windows.
    DutyWindow,
}

/// The guarantee, base and overtime figures for one calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuaranteedPay {
    /// Hours paid after applying the guarantee.
    pub paid_hours: Decimal,
    /// `paid_hours * hourly_rate`.
    pub base_pay: Decimal,
    /// Credit hours beyond the guarantee.
    pub overtime_hours: Decimal,
    /// `overtime_hours * hourly_rate * multiplier`.
    pub overtime_pay: Decimal,
}

/// Decides which credit-hours policy applies to a set of records.
pub fn credit_hours_basis<'a, I>(records: I) -> CreditHoursBasis
where
    I: IntoIterator<Item = &'a DutyRecord>,
{
    if records
        .into_iter()
        .any(|r| !r.precomputed_credit().is_zero())
    {
        CreditHoursBasis::Precomputed
    } else {
        CreditHoursBasis::DutyWindow
    }
}

/// Computes the credit hours for a set of duty records.
///
/// If any record carries a non-zero pre-computed credit value, those values
/// are summed (records without one contribute nothing). Otherwise each
/// record's duty window is converted to fractional hours and summed; a record
/// with a missing or inverted window contributes zero. The result is never
/// negative.
///
/// # Examples
///
/// ```
/// use crew_pay_engine::calculation::credit_hours;
/// use crew_pay_engine::models::DutyRecord;
/// use rust_decimal::Decimal;
///
/// let records: Vec<DutyRecord> = vec![];
/// assert_eq!(credit_hours(&records), Some(Decimal::ZERO));
/// ```
pub fn credit_hours<'a, I>(records: I) -> Option<Decimal>
where
    I: IntoIterator<Item = &'a DutyRecord> + Clone,
{
    match credit_hours_basis(records.clone()) {
        CreditHoursBasis::Precomputed => records
            .into_iter()
            .map(DutyRecord::precomputed_credit)
            .try_fold(Decimal::ZERO, Decimal::checked_add)
            .map(|total| total.max(Decimal::ZERO)),
        CreditHoursBasis::DutyWindow => records
            .into_iter()
            .map(DutyRecord::derived_hours)
            .try_fold(Decimal::ZERO, Decimal::checked_add),
    }
}

/// Returns `max(credit_hours, minimum)`.
pub fn guaranteed_paid_hours(credit_hours: Decimal, minimum: Decimal) -> Decimal {
    credit_hours.max(minimum)
}

/// Returns `paid_hours * hourly_rate`.
pub fn base_pay(paid_hours: Decimal, hourly_rate: Decimal) -> Option<Decimal> {
    paid_hours.checked_mul(hourly_rate)
}

/// Returns the credit hours beyond the guarantee, or zero.
pub fn overtime_hours(credit_hours: Decimal, minimum: Decimal) -> Option<Decimal> {
    credit_hours
        .checked_sub(minimum)
        .map(|hours| hours.max(Decimal::ZERO))
}

/// Returns `max(0, credit_hours - minimum) * hourly_rate * multiplier`.
///
/// # Examples
///
/// ```
/// use crew_pay_engine::calculation::overtime_pay;
/// use rust_decimal::Decimal;
///
/// let pay = overtime_pay(
///     Decimal::new(80, 0),
///     Decimal::new(75, 0),
///     Decimal::new(60, 0),
///     Decimal::new(15, 1),
/// );
/// assert_eq!(pay, Some(Decimal::new(450, 0)));
/// ```
pub fn overtime_pay(
    credit_hours: Decimal,
    minimum: Decimal,
    hourly_rate: Decimal,
    multiplier: Decimal,
) -> Option<Decimal> {
    overtime_hours(credit_hours, minimum)?
        .checked_mul(hourly_rate)?
        .checked_mul(multiplier)
}

/// Returns `credit_hours * hourly_rate`, the per-credit-hour per-diem basis.
pub fn hourly_per_diem(credit_hours: Decimal, hourly_rate: Decimal) -> Option<Decimal> {
    credit_hours.checked_mul(hourly_rate)
}

/// Counts per-diem days over the records that carry a flight.
///
/// International flight duties earn `international` days, other flight duties
/// earn `domestic` days. Records without a flight earn nothing.
pub fn per_diem_days<'a, I>(
    records: I,
    domestic: Decimal,
    international: Decimal,
) -> Option<Decimal>
where
    I: IntoIterator<Item = &'a DutyRecord>,
{
    records
        .into_iter()
        .filter(|r| r.has_flight())
        .map(|r| if r.is_international() { international } else { domestic })
        .try_fold(Decimal::ZERO, Decimal::checked_add)
}

/// Returns `days * day_rate`, the per-day per-diem basis.
pub fn daily_per_diem(days: Decimal, day_rate: Decimal) -> Option<Decimal> {
    days.checked_mul(day_rate)
}

/// Counts the records whose linked flight is a red-eye.
pub fn red_eye_count<'a, I>(records: I) -> usize
where
    I: IntoIterator<Item = &'a DutyRecord>,
{
    records.into_iter().filter(|r| r.is_red_eye()).count()
}

/// Returns `premium` for every red-eye record.
pub fn red_eye_premium_pay<'a, I>(records: I, premium: Decimal) -> Option<Decimal>
where
    I: IntoIterator<Item = &'a DutyRecord>,
{
    Decimal::from(red_eye_count(records)).checked_mul(premium)
}
