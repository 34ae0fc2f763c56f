//! serializable views of calculator results

use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::investment::{InvestmentPlan, InvestmentResult, InvestmentYear};
use crate::loans::{
    AmortizationResult, AmortizationRow, EligibilityResult, LoanTerms, PaymentBreakdown,
    YearlyAmortization,
};
use crate::state::{AssetPurchaseState, SalaryState};
use crate::tax::{SalaryBreakdown, TaxResult};
use crate::types::{FinancialYear, Regime};

/// pretty json for any serializable result
pub trait JsonView: Serialize {
    fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    fn json(&self) -> String {
        self.to_json_pretty()
            .unwrap_or_else(|e| format!("JSON error: {}", e))
    }
}

impl JsonView for AmortizationResult {}
impl JsonView for TaxResult {}
impl JsonView for SalaryBreakdown {}
impl JsonView for InvestmentResult {}
impl JsonView for EligibilityResult {}
impl JsonView for AssetPurchaseState {}
impl JsonView for SalaryState {}

/// loan result with chart data, schedule optional
#[derive(Debug, Serialize, Deserialize)]
pub struct LoanView {
    pub principal: Money,
    pub annual_rate: Rate,
    pub periods: u32,
    pub emi: Money,
    pub total_interest: Money,
    pub total_payment: Money,
    pub breakdown: PaymentBreakdown,
    pub yearly: Vec<YearlyAmortization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<AmortizationRow>>,
}

impl LoanView {
    pub fn from_result(terms: &LoanTerms, result: &AmortizationResult, include_schedule: bool) -> Self {
        LoanView {
            principal: terms.principal,
            annual_rate: terms.annual_rate,
            periods: result.periods(),
            emi: result.emi,
            total_interest: result.total_interest,
            total_payment: result.total_payment,
            breakdown: result.breakdown(),
            yearly: result.yearly_summary(),
            schedule: include_schedule.then(|| result.schedule.clone()),
        }
    }
}

impl JsonView for LoanView {}

/// regime comparison for one income
#[derive(Debug, Serialize, Deserialize)]
pub struct TaxView {
    pub financial_year: FinancialYear,
    pub annual_income: Money,
    pub deductions: Money,
    pub old_regime_tax: Money,
    pub new_regime_tax: Money,
    pub recommended_regime: Regime,
    pub savings: Money,
}

impl TaxView {
    pub fn from_result(
        financial_year: FinancialYear,
        annual_income: Money,
        deductions: Money,
        result: &TaxResult,
    ) -> Self {
        TaxView {
            financial_year,
            annual_income,
            deductions,
            old_regime_tax: result.old_regime_tax,
            new_regime_tax: result.new_regime_tax,
            recommended_regime: result.recommended_regime(),
            savings: result.savings(),
        }
    }
}

impl JsonView for TaxView {}

/// projection totals with the yearly growth curve
#[derive(Debug, Serialize, Deserialize)]
pub struct InvestmentView {
    pub plan: InvestmentPlan,
    pub future_value: Money,
    pub total_invested: Money,
    pub estimated_returns: Money,
    pub yearly_growth: Vec<InvestmentYear>,
}

impl InvestmentView {
    pub fn from_result(plan: &InvestmentPlan, result: &InvestmentResult, yearly_growth: Vec<InvestmentYear>) -> Self {
        InvestmentView {
            plan: *plan,
            future_value: result.future_value,
            total_invested: result.total_invested,
            estimated_returns: result.estimated_returns,
            yearly_growth,
        }
    }
}

impl JsonView for InvestmentView {}
