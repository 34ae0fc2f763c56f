use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{CalcError, Result};
use crate::tax::SalaryBreakdown;
use crate::types::{AssetField, FinancialYear, SalaryField};

/// asset purchase screen: price, down payment and the financed remainder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetPurchaseState {
    pub asset_price: Money,
    /// whole percent of the price paid up front
    pub down_payment_percent: Decimal,
    pub down_payment_amount: Money,
    pub loan_amount: Money,
}

impl AssetPurchaseState {
    /// derive amount and loan from price and percent; bounds are checked by the reconciler
    pub fn new(asset_price: Money, down_payment_percent: Decimal) -> Result<Self> {
        let down_payment_amount = asset_price
            .percentage(down_payment_percent)
            .ok_or_else(|| CalcError::overflow("down payment amount"))?
            .round_whole();
        Ok(Self {
            asset_price,
            down_payment_percent,
            down_payment_amount,
            loan_amount: asset_price - down_payment_amount,
        })
    }

    pub fn value(&self, field: AssetField) -> Decimal {
        match field {
            AssetField::AssetPrice => self.asset_price.as_decimal(),
            AssetField::DownPaymentPercent => self.down_payment_percent,
            AssetField::DownPaymentAmount => self.down_payment_amount.as_decimal(),
            AssetField::LoanAmount => self.loan_amount.as_decimal(),
        }
    }

    pub(crate) fn set(&mut self, field: AssetField, value: Decimal) {
        match field {
            AssetField::AssetPrice => self.asset_price = Money::from_decimal(value),
            AssetField::DownPaymentPercent => self.down_payment_percent = value,
            AssetField::DownPaymentAmount => self.down_payment_amount = Money::from_decimal(value),
            AssetField::LoanAmount => self.loan_amount = Money::from_decimal(value),
        }
    }
}

/// a derived amount the user may replace by hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OverridableAmount {
    pub value: Money,
    pub is_overridden: bool,
}

impl OverridableAmount {
    pub fn derived(value: Money) -> Self {
        Self {
            value,
            is_overridden: false,
        }
    }

    pub fn overridden(value: Money) -> Self {
        Self {
            value,
            is_overridden: true,
        }
    }
}

/// salary screen after reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryState {
    pub financial_year: FinancialYear,
    pub annual_ctc: Money,
    pub basic_annual: Money,
    pub hra_annual: Money,
    pub pf_monthly: OverridableAmount,
    pub professional_tax_monthly: Money,
    /// new regime tax on `annual_ctc` for `financial_year`
    pub income_tax_annual: Money,
    pub monthly_in_hand: Money,
}

impl SalaryState {
    /// all-zero screen; reconcile a ctc edit to populate it
    pub fn empty(financial_year: FinancialYear, professional_tax_monthly: Money) -> Self {
        Self {
            financial_year,
            annual_ctc: Money::ZERO,
            basic_annual: Money::ZERO,
            hra_annual: Money::ZERO,
            pf_monthly: OverridableAmount::default(),
            professional_tax_monthly,
            income_tax_annual: Money::ZERO,
            monthly_in_hand: Money::ZERO,
        }
    }

    pub fn value(&self, field: SalaryField) -> Money {
        match field {
            SalaryField::AnnualCtc => self.annual_ctc,
            SalaryField::BasicAnnual => self.basic_annual,
            SalaryField::HraAnnual => self.hra_annual,
            SalaryField::PfMonthly => self.pf_monthly.value,
            SalaryField::ProfessionalTaxMonthly => self.professional_tax_monthly,
            SalaryField::IncomeTaxAnnual => self.income_tax_annual,
            SalaryField::MonthlyInHand => self.monthly_in_hand,
        }
    }

    pub fn breakdown(&self) -> SalaryBreakdown {
        SalaryBreakdown {
            annual_ctc: self.annual_ctc,
            basic_annual: self.basic_annual,
            hra_annual: self.hra_annual,
            pf_monthly: self.pf_monthly.value,
            professional_tax_monthly: self.professional_tax_monthly,
            income_tax_annual: self.income_tax_annual,
            monthly_in_hand: self.monthly_in_hand,
        }
    }
}
