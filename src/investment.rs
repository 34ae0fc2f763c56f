use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::InputLimits;
use crate::decimal::{Money, Rate};
use crate::errors::{CalcError, Result};
use crate::numeric::{self, future_value_annuity_due};

/// recurring monthly investment (sip)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvestmentPlan {
    pub monthly_contribution: Money,
    pub annual_rate: Rate,
    pub years: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InvestmentResult {
    pub future_value: Money,
    pub total_invested: Money,
    pub estimated_returns: Money,
}

/// value of a plan at the end of one year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentYear {
    pub year: u32,
    pub invested: Money,
    pub value: Money,
}

/// projects compound growth of contributions made at the start of each month
#[derive(Debug, Clone, Default)]
pub struct InvestmentProjector {
    limits: InputLimits,
}

impl InvestmentProjector {
    pub fn new(limits: InputLimits) -> Self {
        Self { limits }
    }

    pub fn project(&self, plan: &InvestmentPlan) -> Result<InvestmentResult> {
        self.validate(plan)?;

        if Self::is_empty(plan) {
            return Ok(InvestmentResult::default());
        }

        let r = numeric::monthly_rate(plan.annual_rate);
        let n = plan.years * 12;
        let result = Self::value_after(plan.monthly_contribution, r, n)?;

        log::debug!(
            "projected {} monthly at {} for {} years: value {}, invested {}",
            plan.monthly_contribution,
            plan.annual_rate,
            plan.years,
            result.future_value,
            result.total_invested
        );

        Ok(result)
    }

    /// value and amount invested at the end of every year of the plan
    pub fn yearly_growth(&self, plan: &InvestmentPlan) -> Result<Vec<InvestmentYear>> {
        self.validate(plan)?;

        if Self::is_empty(plan) {
            return Ok(Vec::new());
        }

        let r = numeric::monthly_rate(plan.annual_rate);
        (1..=plan.years)
            .map(|year| {
                let point = Self::value_after(plan.monthly_contribution, r, year * 12)?;
                Ok(InvestmentYear {
                    year,
                    invested: point.total_invested,
                    value: point.future_value,
                })
            })
            .collect()
    }

    fn validate(&self, plan: &InvestmentPlan) -> Result<()> {
        let rate_percent = plan.annual_rate.as_percentage();
        if rate_percent > self.limits.max_annual_rate_percent {
            return Err(CalcError::out_of_range(
                "annual_rate",
                rate_percent,
                Decimal::ZERO,
                self.limits.max_annual_rate_percent,
            ));
        }
        if plan.years > self.limits.max_investment_years {
            return Err(CalcError::out_of_range(
                "years",
                plan.years.into(),
                Decimal::ONE,
                self.limits.max_investment_years.into(),
            ));
        }
        Ok(())
    }

    fn is_empty(plan: &InvestmentPlan) -> bool {
        !plan.monthly_contribution.is_positive() || !plan.annual_rate.is_positive() || plan.years == 0
    }

    fn value_after(contribution: Money, r: Decimal, n: u32) -> Result<InvestmentResult> {
        let future_value = future_value_annuity_due(contribution, r, n)?.round_whole();
        let total_invested = contribution
            .as_decimal()
            .checked_mul(Decimal::from(n))
            .map(|total| Money::from_decimal(total).round_whole())
            .ok_or_else(|| CalcError::overflow("total invested"))?;

        Ok(InvestmentResult {
            future_value,
            total_invested,
            estimated_returns: future_value - total_invested,
        })
    }
}
