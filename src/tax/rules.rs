use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::numeric::{evaluate_progressive_slabs, Slab};
use crate::types::{FinancialYear, Regime};

/// deduction, rebate and slab rules for one regime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeRules {
    pub regime: Regime,
    pub standard_deduction: Money,
    /// taxable income at or below this pays nothing
    pub rebate_ceiling: Money,
    pub slabs: Vec<Slab>,
}

impl RegimeRules {
    /// old regime, identical in every supported year
    pub fn old() -> Self {
        Self {
            regime: Regime::Old,
            standard_deduction: Money::from_major(50_000),
            rebate_ceiling: Money::from_major(500_000),
            slabs: vec![
                Slab::new(250_000, Some(500_000), 5),
                Slab::new(500_000, Some(1_000_000), 20),
                Slab::new(1_000_000, None, 30),
            ],
        }
    }

    /// new regime as notified for financial year 2024-2025
    pub fn new_2024() -> Self {
        Self {
            regime: Regime::New,
            standard_deduction: Money::from_major(75_000),
            rebate_ceiling: Money::from_major(700_000),
            slabs: vec![
                Slab::new(300_000, Some(700_000), 5),
                Slab::new(700_000, Some(1_000_000), 10),
                Slab::new(1_000_000, Some(1_200_000), 15),
                Slab::new(1_200_000, Some(1_500_000), 20),
                Slab::new(1_500_000, None, 30),
            ],
        }
    }

    /// new regime from financial year 2025-2026 onwards
    pub fn new_2025() -> Self {
        Self {
            regime: Regime::New,
            standard_deduction: Money::from_major(75_000),
            rebate_ceiling: Money::from_major(1_200_000),
            slabs: vec![
                Slab::new(400_000, Some(800_000), 5),
                Slab::new(800_000, Some(1_200_000), 10),
                Slab::new(1_200_000, Some(1_600_000), 15),
                Slab::new(1_600_000, Some(2_000_000), 20),
                Slab::new(2_000_000, Some(2_400_000), 25),
                Slab::new(2_400_000, None, 30),
            ],
        }
    }

    /// income left after the standard and additional deductions, floored at zero
    pub fn taxable_income(&self, income: Money, deductions: Money) -> Money {
        (income - self.standard_deduction - deductions).max(Money::ZERO)
    }

    /// tax including cess, rounded once at the end
    pub fn tax_on(&self, income: Money, deductions: Money, cess_rate: Rate) -> Money {
        let taxable = self.taxable_income(income, deductions);
        if taxable <= self.rebate_ceiling {
            return Money::ZERO;
        }

        let slab_tax = evaluate_progressive_slabs(taxable, &self.slabs);
        let cess = slab_tax * cess_rate.as_decimal();
        (slab_tax + cess).round_whole()
    }
}

/// complete rule set for one financial year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxYearRules {
    pub financial_year: FinancialYear,
    pub old: RegimeRules,
    pub new: RegimeRules,
    pub cess_rate: Rate,
}

impl TaxYearRules {
    pub fn for_year(financial_year: FinancialYear) -> Self {
        let new = match financial_year {
            FinancialYear::Fy2024_25 => RegimeRules::new_2024(),
            FinancialYear::Fy2025_26 | FinancialYear::Fy2026_27 => RegimeRules::new_2025(),
        };

        Self {
            financial_year,
            old: RegimeRules::old(),
            new,
            cess_rate: Rate::from_percentage(4),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_selection() {
        assert_eq!(TaxYearRules::for_year(FinancialYear::Fy2024_25).new.rebate_ceiling, Money::from_major(700_000));
        assert_eq!(TaxYearRules::for_year(FinancialYear::Fy2025_26).new, RegimeRules::new_2025());
        assert_eq!(
            TaxYearRules::for_year(FinancialYear::Fy2026_27).new,
            TaxYearRules::for_year(FinancialYear::Fy2025_26).new
        );
        for fy in FinancialYear::ALL {
            let rules = TaxYearRules::for_year(fy);
            assert_eq!(rules.old, RegimeRules::old());
            assert_eq!(rules.cess_rate, Rate::from_percentage(4));
        }
    }

    #[test]
    fn test_taxable_income_floors_at_zero() {
        let old = RegimeRules::old();
        assert_eq!(old.taxable_income(Money::from_major(40_000), Money::ZERO), Money::ZERO);
        assert_eq!(
            old.taxable_income(Money::from_major(1_000_000), Money::from_major(150_000)),
            Money::from_major(800_000)
        );
    }

    #[test]
    fn test_slabs_are_contiguous() {
        for rules in [RegimeRules::old(), RegimeRules::new_2024(), RegimeRules::new_2025()] {
            for pair in rules.slabs.windows(2) {
                assert_eq!(pair[0].to, Some(pair[1].from));
            }
            assert_eq!(rules.slabs.last().unwrap().to, None);
        }
    }
}
