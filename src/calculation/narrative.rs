//! Deterministic explanation text for the intelligent path.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::Subject;

/// Rounds half away from zero to `dp` places and pads with trailing zeros.
///
/// # Examples
///
/// ```
/// use crew_pay_engine::calculation::format_fixed;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_fixed(Decimal::new(15, 1), 2), "1.50");
/// assert_eq!(format_fixed(Decimal::new(125, 3), 2), "0.13");
/// ```
pub fn format_fixed(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", dp as usize, rounded)
}

/// Formats a money amount with two decimals and thousands separators.
///
/// # Examples
///
/// ```
/// use crew_pay_engine::calculation::format_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_currency(Decimal::new(5375, 0)), "5,375.00");
/// ```
pub fn format_currency(value: Decimal) -> String {
    let fixed = format_fixed(value.abs(), 2);
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let negative =
        value.is_sign_negative() && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}

/// The figures an intelligent-path explanation summarises.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NarrativeFigures {
    pub credit_hours: Decimal,
    pub record_count: usize,
    pub per_diem_days: Decimal,
    pub premium_pay: Decimal,
    pub gross_pay: Decimal,
}

/// Builds the explanation sentence from already-computed figures.
pub(crate) fn intelligent_explanation(subject: &Subject, figures: &NarrativeFigures) -> String {
    format!(
        "Processed payroll for {} ({}). Calculated {} credit hours from {} assignments. \
         Applied {} per diem days. Detected premium pay opportunities totaling ${}. \
         Final gross pay: ${}.",
        subject.display_name(),
        subject.id,
        format_fixed(figures.credit_hours, 2),
        figures.record_count,
        format_fixed(figures.per_diem_days, 1),
        format_fixed(figures.premium_pay, 2),
        format_currency(figures.gross_pay),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubjectStatus;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format_fixed_pads_and_rounds() {
        assert_eq!(format_fixed(dec("80"), 2), "80.00");
        assert_eq!(format_fixed(dec("2.25"), 1), "2.3");
        assert_eq!(format_fixed(dec("-2.25"), 1), "-2.3");
        assert_eq!(format_fixed(dec("9.5"), 2), "9.50");
    }

    #[test]
    fn test_format_currency_groups_thousands() {
        assert_eq!(format_currency(dec("0")), "0.00");
        assert_eq!(format_currency(dec("999.995")), "1,000.00");
        assert_eq!(format_currency(dec("1234567.8")), "1,234,567.80");
        assert_eq!(format_currency(dec("-4800")), "-4,800.00");
        assert_eq!(format_currency(dec("-0.001")), "0.00");
    }

    #[test]
    fn test_intelligent_explanation_text() {
        let subject = Subject {
            id: "AVL1000".to_string(),
            first_name: "Sarah".to_string(),
            last_name: "Jones".to_string(),
            position: "Captain".to_string(),
            base: "FLL".to_string(),
            hourly_rate: dec("60"),
            status: SubjectStatus::Active,
        };
        let figures = NarrativeFigures {
            credit_hours: dec("80"),
            record_count: 1,
            per_diem_days: dec("1"),
            premium_pay: dec("75"),
            gross_pay: dec("5375"),
        };

        assert_eq!(
            intelligent_explanation(&subject, &figures),
            "Processed payroll for Sarah Jones (AVL1000). Calculated 80.00 credit hours \
             from 1 assignments. Applied 1.0 per diem days. Detected premium pay \
             opportunities totaling $75.00. Final gross pay: $5,375.00."
        );
    }
}
