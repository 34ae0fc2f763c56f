use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::SalaryConfig;
use crate::decimal::Money;
use crate::errors::{CalcError, Result};

/// monthly take-home view of an annual ctc
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    pub annual_ctc: Money,
    pub basic_annual: Money,
    pub hra_annual: Money,
    pub pf_monthly: Money,
    pub professional_tax_monthly: Money,
    pub income_tax_annual: Money,
    pub monthly_in_hand: Money,
}

/// unrounded basic pay
pub fn basic_annual(ctc: Money, config: &SalaryConfig) -> Money {
    ctc * config.basic_share.as_decimal()
}

/// unrounded hra, a share of basic
pub fn hra_annual(ctc: Money, config: &SalaryConfig) -> Money {
    basic_annual(ctc, config) * config.hra_share.as_decimal()
}

/// employee pf on monthly basic
pub fn default_pf_monthly(ctc: Money, config: &SalaryConfig) -> Money {
    (basic_annual(ctc, config) / dec!(12) * config.pf_rate.as_decimal()).round_whole()
}

/// ctc/12 less pf, professional tax and a twelfth of the income tax; may be negative
pub fn monthly_in_hand(
    ctc: Money,
    pf_monthly: Money,
    professional_tax_monthly: Money,
    income_tax_annual: Money,
) -> Money {
    (ctc / dec!(12) - pf_monthly - professional_tax_monthly - income_tax_annual / dec!(12))
        .round_whole()
}

pub fn compute_salary_breakdown(
    annual_ctc: Money,
    professional_tax_monthly: Money,
    pf_override: Option<Money>,
    income_tax_annual: Money,
    config: &SalaryConfig,
) -> Result<SalaryBreakdown> {
    if annual_ctc.is_negative() {
        return Err(CalcError::invalid("annual_ctc", "cannot be negative"));
    }
    if professional_tax_monthly.is_negative() {
        return Err(CalcError::invalid("professional_tax_monthly", "cannot be negative"));
    }
    if income_tax_annual.is_negative() {
        return Err(CalcError::invalid("income_tax_annual", "cannot be negative"));
    }

    let pf_monthly = match pf_override {
        Some(pf) if pf.is_negative() => {
            return Err(CalcError::invalid("pf_monthly", "cannot be negative"));
        }
        Some(pf) => pf,
        None => default_pf_monthly(annual_ctc, config),
    };

    let in_hand = monthly_in_hand(annual_ctc, pf_monthly, professional_tax_monthly, income_tax_annual);
    if in_hand.is_negative() {
        return Err(CalcError::out_of_range(
            "monthly_in_hand",
            in_hand.as_decimal(),
            rust_decimal::Decimal::ZERO,
            (annual_ctc / dec!(12)).round_whole().as_decimal(),
        ));
    }

    Ok(SalaryBreakdown {
        annual_ctc,
        basic_annual: basic_annual(annual_ctc, config).round_whole(),
        hra_annual: hra_annual(annual_ctc, config).round_whole(),
        pf_monthly,
        professional_tax_monthly,
        income_tax_annual,
        monthly_in_hand: in_hand,
    })
}
