use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{CalcError, Result};
use crate::types::{FinancialYear, Regime};

use super::rules::TaxYearRules;

/// tax payable under both regimes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TaxResult {
    pub old_regime_tax: Money,
    pub new_regime_tax: Money,
}

impl TaxResult {
    /// regime with the lower tax; the new regime wins ties as the default regime
    pub fn recommended_regime(&self) -> Regime {
        if self.old_regime_tax < self.new_regime_tax {
            Regime::Old
        } else {
            Regime::New
        }
    }

    /// difference between the two regimes
    pub fn savings(&self) -> Money {
        (self.old_regime_tax - self.new_regime_tax).abs()
    }

    pub fn tax_for(&self, regime: Regime) -> Money {
        match regime {
            Regime::Old => self.old_regime_tax,
            Regime::New => self.new_regime_tax,
        }
    }
}

/// evaluates both regimes for one financial year
#[derive(Debug, Clone)]
pub struct TaxEngine {
    rules: TaxYearRules,
}

impl TaxEngine {
    pub fn for_year(financial_year: FinancialYear) -> Self {
        Self {
            rules: TaxYearRules::for_year(financial_year),
        }
    }

    /// old regime tax after the standard deduction and the given deductions
    pub fn compute_old(&self, annual_income: Money, deductions: Money) -> Result<Money> {
        if deductions.is_negative() {
            return Err(CalcError::invalid("deductions", "cannot be negative"));
        }
        Ok(self.rules.old.tax_on(annual_income, deductions, self.rules.cess_rate))
    }

    /// new regime tax; only the standard deduction applies
    pub fn compute_new(&self, annual_income: Money) -> Result<Money> {
        Ok(self.rules.new.tax_on(annual_income, Money::ZERO, self.rules.cess_rate))
    }

    pub fn compute(&self, annual_income: Money, deductions: Money) -> Result<TaxResult> {
        let result = TaxResult {
            old_regime_tax: self.compute_old(annual_income, deductions)?,
            new_regime_tax: self.compute_new(annual_income)?,
        };

        log::debug!(
            "tax on {} for {}: old {}, new {}",
            annual_income,
            self.rules.financial_year,
            result.old_regime_tax,
            result.new_regime_tax
        );

        Ok(result)
    }
}

/// old regime tax (identical in every supported year)
pub fn compute_old(annual_income: Money, deductions: Money) -> Result<Money> {
    TaxEngine::for_year(FinancialYear::Fy2024_25).compute_old(annual_income, deductions)
}

/// new regime tax for the given financial year
pub fn compute_new(annual_income: Money, financial_year: FinancialYear) -> Result<Money> {
    TaxEngine::for_year(financial_year).compute_new(annual_income)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(v: i64) -> Money {
        Money::from_major(v)
    }

    #[test]
    fn test_old_regime() {
        assert_eq!(compute_old(m(1_000_000), m(150_000)).unwrap(), m(75_400));
        assert_eq!(compute_old(m(1_000_000), Money::ZERO).unwrap(), m(106_600));
        assert_eq!(compute_old(m(2_000_000), m(150_000)).unwrap(), m(366_600));
        assert_eq!(compute_old(m(800_000), Money::ZERO).unwrap(), m(65_000));
    }

    #[test]
    fn test_old_regime_rebate() {
        assert_eq!(compute_old(m(550_000), Money::ZERO).unwrap(), Money::ZERO);
        assert_eq!(compute_old(m(700_000), m(150_000)).unwrap(), Money::ZERO);
        assert_eq!(compute_old(m(550_001), Money::ZERO).unwrap(), m(13_000));
        assert_eq!(compute_old(m(-5_000), Money::ZERO).unwrap(), Money::ZERO);
    }

    #[test]
    fn test_old_regime_is_monotonic() {
        let deductions = m(150_000);
        let mut previous = Money::ZERO;
        let mut income = 0;
        while income <= 5_000_000 {
            let tax = compute_old(m(income), deductions).unwrap();
            assert!(tax >= previous, "tax fell at income {}", income);
            previous = tax;
            income += 12_500;
        }
    }

    #[test]
    fn test_new_regime_2024() {
        let fy = FinancialYear::Fy2024_25;
        assert_eq!(compute_new(m(775_000), fy).unwrap(), Money::ZERO);
        assert_eq!(compute_new(m(775_001), fy).unwrap(), m(20_800));
        assert_eq!(compute_new(m(1_000_000), fy).unwrap(), m(44_200));
        assert_eq!(compute_new(m(1_500_000), fy).unwrap(), m(130_000));
        assert_eq!(compute_new(m(3_000_000), fy).unwrap(), m(590_200));
    }

    #[test]
    fn test_new_regime_2025_rebate_boundary() {
        let fy = FinancialYear::Fy2025_26;
        let mut income = 1_200_000;
        while income <= 1_275_000 {
            assert_eq!(compute_new(m(income), fy).unwrap(), Money::ZERO, "income {}", income);
            income += 5_000;
        }
        assert_eq!(compute_new(m(1_275_000), fy).unwrap(), Money::ZERO);

        let just_over = compute_new(m(1_275_001), fy).unwrap();
        assert!(just_over.is_positive());
        assert_eq!(just_over, m(62_400));
    }

    #[test]
    fn test_new_regime_2025_slabs() {
        for fy in [FinancialYear::Fy2025_26, FinancialYear::Fy2026_27] {
            assert_eq!(compute_new(m(1_500_000), fy).unwrap(), m(97_500));
            assert_eq!(compute_new(m(2_000_000), fy).unwrap(), m(192_400));
            assert_eq!(compute_new(m(3_000_000), fy).unwrap(), m(475_800));
        }
    }

    #[test]
    fn test_compute_both_regimes() {
        let engine = TaxEngine::for_year(FinancialYear::Fy2025_26);
        let result = engine.compute(m(1_500_000), m(150_000)).unwrap();

        assert_eq!(result.old_regime_tax, m(210_600));
        assert_eq!(result.new_regime_tax, m(97_500));
        assert_eq!(result.recommended_regime(), Regime::New);
        assert_eq!(result.savings(), m(113_100));
        assert_eq!(result.tax_for(Regime::Old), m(210_600));

        assert!(matches!(
            engine.compute(m(1_500_000), m(-1)),
            Err(CalcError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_tie_recommends_new_regime() {
        let result = TaxResult::default();
        assert_eq!(result.recommended_regime(), Regime::New);
        assert_eq!(result.savings(), Money::ZERO);
    }
}
