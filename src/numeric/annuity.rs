use rust_decimal::Decimal;

use crate::decimal::Money;
use crate::errors::{CalcError, Result};

use super::compound_factor;

/// equated monthly installment for an ordinary annuity
///
/// EMI = P * r * (1 + r)^n / ((1 + r)^n - 1), or P / n when r is zero.
pub fn emi_annuity(principal: Money, r: Decimal, n: u32) -> Result<Money> {
    if principal.is_negative() {
        return Err(CalcError::invalid("principal", "cannot be negative"));
    }
    if n < 1 {
        return Err(CalcError::invalid("periods", "must be at least 1"));
    }
    if r < Decimal::ZERO {
        return Err(CalcError::invalid("rate", "cannot be negative"));
    }

    if r.is_zero() {
        return Ok(principal / Decimal::from(n));
    }

    let compound = compound_factor(r, n)?;
    let denominator = compound - Decimal::ONE;

    principal
        .as_decimal()
        .checked_mul(r)
        .and_then(|v| v.checked_mul(compound))
        .and_then(|v| v.checked_div(denominator))
        .map(Money::from_decimal)
        .ok_or_else(|| CalcError::overflow("emi"))
}

/// future value of an annuity-due: each contribution grows for one extra period
///
/// FV = C * ((1 + r)^n - 1) / r * (1 + r). Non-positive inputs give zero.
pub fn future_value_annuity_due(contribution: Money, r: Decimal, n: u32) -> Result<Money> {
    if !contribution.is_positive() || r <= Decimal::ZERO || n == 0 {
        return Ok(Money::ZERO);
    }

    let compound = compound_factor(r, n)?;
    let growth = (compound - Decimal::ONE) / r * (Decimal::ONE + r);
    contribution
        .as_decimal()
        .checked_mul(growth)
        .map(Money::from_decimal)
        .ok_or_else(|| CalcError::overflow("future value"))
}

/// present value of n payments, the inverse of `emi_annuity`
///
/// PV = PMT * ((1 + r)^n - 1) / (r * (1 + r)^n). Requires r > 0.
pub fn present_value_annuity(payment: Money, r: Decimal, n: u32) -> Result<Money> {
    if r <= Decimal::ZERO {
        return Err(CalcError::invalid("rate", "must be positive"));
    }
    if n < 1 {
        return Err(CalcError::invalid("periods", "must be at least 1"));
    }

    let compound = compound_factor(r, n)?;
    let factor = (compound - Decimal::ONE) / (r * compound);
    payment
        .as_decimal()
        .checked_mul(factor)
        .map(Money::from_decimal)
        .ok_or_else(|| CalcError::overflow("present value"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_emi_reference_loan() {
        // 840,000 at 8.8% over 84 months
        let r = dec!(8.8) / dec!(12) / dec!(100);
        let emi = emi_annuity(Money::from_major(840_000), r, 84).unwrap();
        assert_eq!(emi.round_whole(), Money::from_major(13_430));
    }

    #[test]
    fn test_emi_zero_rate_is_linear() {
        let emi = emi_annuity(Money::from_major(120_000), Decimal::ZERO, 12).unwrap();
        assert_eq!(emi, Money::from_major(10_000));
    }

    #[test]
    fn test_emi_rejects_invalid_input() {
        assert!(emi_annuity(Money::from_major(-1), dec!(0.01), 12).is_err());
        assert!(emi_annuity(Money::from_major(1000), dec!(0.01), 0).is_err());
        assert!(emi_annuity(Money::from_major(1000), dec!(-0.01), 12).is_err());
    }

    #[test]
    fn test_emi_overflow_is_an_error() {
        // 10^18 at 100% a year over 360 months
        let principal = Money::from_major(1_000_000_000_000_000_000);
        let r = dec!(100) / dec!(12) / dec!(100);
        assert!(matches!(
            emi_annuity(principal, r, 360),
            Err(CalcError::CalculationError { .. })
        ));
    }

    #[test]
    fn test_present_value_overflow_is_an_error() {
        let payment = Money::from_decimal(dec!(70000000000000000000000000000));
        assert!(matches!(
            present_value_annuity(payment, dec!(0.0075), 360),
            Err(CalcError::CalculationError { .. })
        ));
    }

    #[test]
    fn test_annuity_due_has_extra_period_of_growth() {
        let r = dec!(0.01);
        let due = future_value_annuity_due(Money::from_major(5_000), r, 120).unwrap();
        let compound = compound_factor(r, 120).unwrap();
        let ordinary = Money::from_major(5_000) * ((compound - Decimal::ONE) / r);

        assert_eq!(due.round_whole(), Money::from_major(1_161_695));
        assert_eq!((ordinary * (Decimal::ONE + r)).round_whole(), due.round_whole());
    }

    #[test]
    fn test_annuity_due_degrades_to_zero() {
        assert_eq!(future_value_annuity_due(Money::ZERO, dec!(0.01), 12).unwrap(), Money::ZERO);
        assert_eq!(future_value_annuity_due(Money::from_major(-5), dec!(0.01), 12).unwrap(), Money::ZERO);
        assert_eq!(future_value_annuity_due(Money::from_major(100), Decimal::ZERO, 12).unwrap(), Money::ZERO);
        assert_eq!(future_value_annuity_due(Money::from_major(100), dec!(0.01), 0).unwrap(), Money::ZERO);
    }

    #[test]
    fn test_present_value_inverts_emi() {
        let r = dec!(0.0075);
        let principal = Money::from_major(2_500_000);
        let emi = emi_annuity(principal, r, 240).unwrap();
        let pv = present_value_annuity(emi, r, 240).unwrap();
        assert!((pv - principal).abs() < Money::from_decimal(dec!(0.0001)));
    }
}
