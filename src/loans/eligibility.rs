use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{EligibilityConfig, InputLimits};
use crate::decimal::{Money, Rate};
use crate::errors::{CalcError, Result};
use crate::numeric::{self, present_value_annuity};

/// income and loan parameters for eligibility sizing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EligibilityInput {
    pub gross_monthly_income: Money,
    pub other_monthly_obligations: Money,
    pub annual_rate: Rate,
    pub tenure_years: u32,
}

/// largest affordable emi and the loan it services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EligibilityResult {
    pub max_monthly_emi: Money,
    pub max_loan_amount: Money,
}

/// sizes the maximum loan under a FOIR cap
#[derive(Debug, Clone, Default)]
pub struct EligibilitySizer {
    config: EligibilityConfig,
    limits: InputLimits,
}

impl EligibilitySizer {
    pub fn new(config: EligibilityConfig, limits: InputLimits) -> Self {
        Self { config, limits }
    }

    pub fn size(&self, input: &EligibilityInput) -> Result<EligibilityResult> {
        if input.other_monthly_obligations.is_negative() {
            return Err(CalcError::invalid("other_monthly_obligations", "cannot be negative"));
        }

        let rate_percent = input.annual_rate.as_percentage();
        if rate_percent > self.limits.max_annual_rate_percent {
            return Err(CalcError::out_of_range(
                "annual_rate",
                rate_percent,
                Decimal::ZERO,
                self.limits.max_annual_rate_percent,
            ));
        }

        let n = numeric::periods(input.tenure_years, crate::types::TenureUnit::Years);
        if n > self.limits.max_tenure_months {
            return Err(CalcError::out_of_range(
                "tenure_years",
                input.tenure_years.into(),
                Decimal::ONE,
                Decimal::from(self.limits.max_tenure_months / 12),
            ));
        }

        let max_emi = input.gross_monthly_income * self.config.foir.as_decimal()
            - input.other_monthly_obligations;

        if !max_emi.is_positive() || !input.annual_rate.is_positive() || n == 0 {
            log::debug!("no eligible emi headroom, returning zero eligibility");
            return Ok(EligibilityResult::default());
        }

        let r = numeric::monthly_rate(input.annual_rate);
        let max_loan = present_value_annuity(max_emi, r, n)?;

        Ok(EligibilityResult {
            max_monthly_emi: max_emi.round_whole(),
            max_loan_amount: max_loan.round_whole(),
        })
    }
}
