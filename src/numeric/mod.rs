pub mod annuity;
pub mod slabs;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::decimal::Rate;
use crate::errors::{CalcError, Result};
use crate::types::TenureUnit;

pub use annuity::{emi_annuity, future_value_annuity_due, present_value_annuity};
pub use slabs::{evaluate_progressive_slabs, Slab};

/// monthly rate r = annual percent / 12 / 100
pub fn monthly_rate(annual_rate: Rate) -> Decimal {
    annual_rate.as_percentage() / dec!(12) / dec!(100)
}

/// number of monthly periods in a tenure
pub fn periods(tenure_value: u32, tenure_unit: TenureUnit) -> u32 {
    match tenure_unit {
        TenureUnit::Years => tenure_value.saturating_mul(12),
        TenureUnit::Months => tenure_value,
    }
}

/// (1 + r)^n by repeated multiplication
pub fn compound_factor(r: Decimal, n: u32) -> Result<Decimal> {
    let base = Decimal::ONE + r;
    let mut factor = Decimal::ONE;
    for _ in 0..n {
        factor = factor.checked_mul(base).ok_or_else(|| CalcError::CalculationError {
            message: format!("(1 + {})^{} overflows", r, n),
        })?;
    }
    Ok(factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_rate() {
        assert_eq!(monthly_rate(Rate::from_percentage(12)), dec!(0.01));
        assert_eq!(monthly_rate(Rate::ZERO), Decimal::ZERO);
        assert_eq!(monthly_rate(Rate::from_percent(dec!(6))), dec!(0.005));
    }

    #[test]
    fn test_periods() {
        assert_eq!(periods(7, TenureUnit::Years), 84);
        assert_eq!(periods(18, TenureUnit::Months), 18);
    }

    #[test]
    fn test_compound_factor() {
        assert_eq!(compound_factor(dec!(0.1), 2).unwrap(), dec!(1.21));
        assert_eq!(compound_factor(dec!(0.5), 0).unwrap(), Decimal::ONE);
        assert!(matches!(
            compound_factor(dec!(9), 100),
            Err(CalcError::CalculationError { .. })
        ));
    }
}
