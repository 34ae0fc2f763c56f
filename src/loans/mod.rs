pub mod amortization;
pub mod eligibility;

use serde::{Deserialize, Serialize};

use crate::config::InputLimits;
use crate::decimal::{Money, Rate};
use crate::errors::{CalcError, Result};
use crate::numeric;
use crate::types::TenureUnit;

pub use amortization::{
    AmortizationResult, AmortizationRow, AmortizationScheduler, PaymentBreakdown,
    YearlyAmortization,
};
pub use eligibility::{EligibilityInput, EligibilityResult, EligibilitySizer};

/// loan terms as entered by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    pub annual_rate: Rate,
    pub tenure_value: u32,
    pub tenure_unit: TenureUnit,
}

impl LoanTerms {
    pub fn new(principal: Money, annual_rate: Rate, tenure_value: u32, tenure_unit: TenureUnit) -> Self {
        Self {
            principal,
            annual_rate,
            tenure_value,
            tenure_unit,
        }
    }

    /// builder for loan terms
    pub fn builder() -> LoanTermsBuilder {
        LoanTermsBuilder::new()
    }

    /// total number of monthly periods
    pub fn periods(&self) -> u32 {
        numeric::periods(self.tenure_value, self.tenure_unit)
    }

    /// check terms before any arithmetic
    pub fn validate(&self, limits: &InputLimits) -> Result<()> {
        if !self.principal.is_positive() {
            return Err(CalcError::invalid("principal", "must be greater than zero"));
        }
        if self.tenure_value == 0 {
            return Err(CalcError::invalid("tenure", "must be at least 1"));
        }
        if self.annual_rate.is_negative() {
            return Err(CalcError::invalid("annual_rate", "cannot be negative"));
        }

        let rate_percent = self.annual_rate.as_percentage();
        if rate_percent > limits.max_annual_rate_percent {
            return Err(CalcError::out_of_range(
                "annual_rate",
                rate_percent,
                rust_decimal::Decimal::ZERO,
                limits.max_annual_rate_percent,
            ));
        }

        let periods = self.periods();
        if periods > limits.max_tenure_months {
            return Err(CalcError::out_of_range(
                "tenure",
                periods.into(),
                rust_decimal::Decimal::ONE,
                limits.max_tenure_months.into(),
            ));
        }

        Ok(())
    }
}

/// builder for loan terms
#[derive(Debug, Default)]
pub struct LoanTermsBuilder {
    principal: Option<Money>,
    annual_rate: Option<Rate>,
    tenure: Option<(u32, TenureUnit)>,
}

impl LoanTermsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn principal(mut self, principal: Money) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn rate(mut self, rate: Rate) -> Self {
        self.annual_rate = Some(rate);
        self
    }

    pub fn tenure_years(mut self, years: u32) -> Self {
        self.tenure = Some((years, TenureUnit::Years));
        self
    }

    pub fn tenure_months(mut self, months: u32) -> Self {
        self.tenure = Some((months, TenureUnit::Months));
        self
    }

    pub fn build(self) -> Result<LoanTerms> {
        let principal = self.principal.ok_or_else(|| CalcError::invalid("principal", "required"))?;
        let annual_rate = self.annual_rate.ok_or_else(|| CalcError::invalid("annual_rate", "required"))?;
        let (tenure_value, tenure_unit) = self.tenure.ok_or_else(|| CalcError::invalid("tenure", "required"))?;

        Ok(LoanTerms::new(principal, annual_rate, tenure_value, tenure_unit))
    }
}
