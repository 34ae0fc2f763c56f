use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{CalcError, Result};

/// calculator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CalculatorConfig {
    pub limits: InputLimits,
    pub purchase: PurchaseConfig,
    pub salary: SalaryConfig,
    pub eligibility: EligibilityConfig,
}

/// upper bounds on host input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputLimits {
    pub max_tenure_months: u32,
    pub max_annual_rate_percent: Decimal,
    pub max_investment_years: u32,
}

/// asset purchase screen rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PurchaseConfig {
    pub max_down_payment_percent: Decimal,
}

/// salary structure rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalaryConfig {
    /// basic as a share of ctc
    pub basic_share: Rate,
    /// hra as a share of basic
    pub hra_share: Rate,
    /// employee pf contribution as a share of monthly basic
    pub pf_rate: Rate,
    pub default_professional_tax_monthly: Money,
}

/// loan eligibility rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityConfig {
    /// fixed obligation to income ratio
    pub foir: Rate,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            max_tenure_months: 360,
            max_annual_rate_percent: dec!(100),
            max_investment_years: 50,
        }
    }
}

impl Default for PurchaseConfig {
    fn default() -> Self {
        Self {
            max_down_payment_percent: dec!(90),
        }
    }
}

impl Default for SalaryConfig {
    fn default() -> Self {
        Self {
            basic_share: Rate::from_percentage(50),
            hra_share: Rate::from_percentage(50),
            pf_rate: Rate::from_percentage(12),
            default_professional_tax_monthly: Money::from_major(200),
        }
    }
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            foir: Rate::from_percentage(50),
        }
    }
}

impl CalculatorConfig {
    /// parse and validate a json configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CalculatorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("JSON error: {}", e))
    }

    pub fn validate(&self) -> Result<()> {
        if self.limits.max_tenure_months == 0 {
            return Err(invalid("limits.max_tenure_months must be at least 1"));
        }
        if self.limits.max_annual_rate_percent <= Decimal::ZERO {
            return Err(invalid("limits.max_annual_rate_percent must be positive"));
        }
        if self.limits.max_investment_years == 0 {
            return Err(invalid("limits.max_investment_years must be at least 1"));
        }

        let max_pct = self.purchase.max_down_payment_percent;
        if max_pct <= Decimal::ZERO || max_pct > dec!(100) {
            return Err(invalid("purchase.max_down_payment_percent must be within (0, 100]"));
        }

        for (name, rate) in [
            ("salary.basic_share", self.salary.basic_share),
            ("salary.hra_share", self.salary.hra_share),
            ("salary.pf_rate", self.salary.pf_rate),
            ("eligibility.foir", self.eligibility.foir),
        ] {
            if !rate.is_positive() || rate > Rate::ONE {
                return Err(invalid(&format!("{} must be within (0, 1]", name)));
            }
        }

        if self.salary.default_professional_tax_monthly.is_negative() {
            return Err(invalid("salary.default_professional_tax_monthly cannot be negative"));
        }

        Ok(())
    }
}

fn invalid(message: &str) -> CalcError {
    CalcError::InvalidConfiguration {
        message: message.to_string(),
    }
}
