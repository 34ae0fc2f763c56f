use hourglass_rs::{SafeTimeProvider, TimeSource};
use rust_decimal::Decimal;

use crate::config::CalculatorConfig;
use crate::decimal::Money;
use crate::errors::Result;
use crate::events::EventStore;
use crate::investment::{InvestmentPlan, InvestmentProjector, InvestmentResult, InvestmentYear};
use crate::loans::{
    AmortizationResult, AmortizationScheduler, EligibilityInput, EligibilityResult,
    EligibilitySizer, LoanTerms,
};
use crate::reconcile::{AssetPurchaseReconciler, FieldReconciler, SalaryReconciler};
use crate::state::{AssetPurchaseState, SalaryState};
use crate::tax::{self, SalaryBreakdown, TaxEngine, TaxResult};
use crate::types::{AssetField, FinancialYear, SalaryField};

/// every calculator bound to one configuration
#[derive(Debug, Clone)]
pub struct FinanceCalculator {
    config: CalculatorConfig,
    scheduler: AmortizationScheduler,
    sizer: EligibilitySizer,
    projector: InvestmentProjector,
    asset: AssetPurchaseReconciler,
    salary: SalaryReconciler,
}

impl Default for FinanceCalculator {
    fn default() -> Self {
        Self::build(CalculatorConfig::default())
    }
}

impl FinanceCalculator {
    /// create a calculator after validating the configuration
    pub fn new(config: CalculatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: CalculatorConfig) -> Self {
        Self {
            scheduler: AmortizationScheduler::new(config.limits.clone()),
            sizer: EligibilitySizer::new(config.eligibility.clone(), config.limits.clone()),
            projector: InvestmentProjector::new(config.limits.clone()),
            asset: AssetPurchaseReconciler::new(config.purchase.clone()),
            salary: SalaryReconciler::new(config.salary.clone()),
            config,
        }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn compute_emi(&self, terms: &LoanTerms) -> Result<AmortizationResult> {
        self.scheduler.generate(terms)
    }

    pub fn compute_tax(
        &self,
        annual_income: Money,
        deductions: Money,
        financial_year: FinancialYear,
    ) -> Result<TaxResult> {
        TaxEngine::for_year(financial_year).compute(annual_income, deductions)
    }

    pub fn compute_salary_breakdown(
        &self,
        annual_ctc: Money,
        professional_tax_monthly: Money,
        pf_override: Option<Money>,
        new_regime_tax_annual: Money,
    ) -> Result<SalaryBreakdown> {
        tax::compute_salary_breakdown(
            annual_ctc,
            professional_tax_monthly,
            pf_override,
            new_regime_tax_annual,
            &self.config.salary,
        )
    }

    pub fn compute_investment(&self, plan: &InvestmentPlan) -> Result<InvestmentResult> {
        self.projector.project(plan)
    }

    pub fn investment_growth(&self, plan: &InvestmentPlan) -> Result<Vec<InvestmentYear>> {
        self.projector.yearly_growth(plan)
    }

    pub fn compute_eligibility(&self, input: &EligibilityInput) -> Result<EligibilityResult> {
        self.sizer.size(input)
    }

    pub fn asset_purchase(&self, asset_price: Money, down_payment_percent: Decimal) -> Result<AssetPurchaseState> {
        self.asset.initial(asset_price, down_payment_percent)
    }

    pub fn reconcile_asset_purchase(
        &self,
        state: &AssetPurchaseState,
        field: AssetField,
        value: Decimal,
    ) -> Result<AssetPurchaseState> {
        self.asset.reconcile(state, field, value)
    }

    pub fn salary_state(&self, annual_ctc: Money, financial_year: FinancialYear) -> Result<SalaryState> {
        self.salary.initial(annual_ctc, financial_year)
    }

    pub fn reconcile_salary(&self, state: &SalaryState, field: SalaryField, value: Money) -> Result<SalaryState> {
        self.salary.reconcile(state, field, value)
    }

    pub fn change_financial_year(
        &self,
        state: &SalaryState,
        financial_year: FinancialYear,
        events: &mut EventStore,
    ) -> Result<SalaryState> {
        self.salary.change_financial_year(state, financial_year, events)
    }

    pub fn asset_reconciler(&self) -> &AssetPurchaseReconciler {
        &self.asset
    }

    pub fn salary_reconciler(&self) -> &SalaryReconciler {
        &self.salary
    }

    /// financial year with system time
    pub fn current_financial_year_now(&self) -> FinancialYear {
        let time = SafeTimeProvider::new(TimeSource::System);
        self.current_financial_year(&time)
    }

    pub fn current_financial_year(&self, time_provider: &SafeTimeProvider) -> FinancialYear {
        FinancialYear::current(time_provider)
    }
}

pub fn compute_emi(terms: &LoanTerms) -> Result<AmortizationResult> {
    FinanceCalculator::default().compute_emi(terms)
}

pub fn compute_tax(annual_income: Money, deductions: Money, financial_year: FinancialYear) -> Result<TaxResult> {
    FinanceCalculator::default().compute_tax(annual_income, deductions, financial_year)
}

pub fn compute_salary_breakdown(
    annual_ctc: Money,
    professional_tax_monthly: Money,
    pf_override: Option<Money>,
    new_regime_tax_annual: Money,
) -> Result<SalaryBreakdown> {
    FinanceCalculator::default().compute_salary_breakdown(
        annual_ctc,
        professional_tax_monthly,
        pf_override,
        new_regime_tax_annual,
    )
}

pub fn compute_investment(plan: &InvestmentPlan) -> Result<InvestmentResult> {
    FinanceCalculator::default().compute_investment(plan)
}

pub fn compute_eligibility(input: &EligibilityInput) -> Result<EligibilityResult> {
    FinanceCalculator::default().compute_eligibility(input)
}

pub fn reconcile_asset_purchase(
    state: &AssetPurchaseState,
    field: AssetField,
    value: Decimal,
) -> Result<AssetPurchaseState> {
    FinanceCalculator::default().reconcile_asset_purchase(state, field, value)
}

pub fn reconcile_salary(state: &SalaryState, field: SalaryField, value: Money) -> Result<SalaryState> {
    FinanceCalculator::default().reconcile_salary(state, field, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::errors::CalcError;
    use crate::types::TenureUnit;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal_macros::dec;

    #[test]
    fn test_free_functions_use_defaults() {
        let terms = LoanTerms::new(Money::from_major(840_000), Rate::from_percent(dec!(8.8)), 7, TenureUnit::Years);
        assert_eq!(compute_emi(&terms).unwrap().emi, Money::from_major(13_430));

        let tax = compute_tax(Money::from_major(1_500_000), Money::from_major(150_000), FinancialYear::Fy2024_25).unwrap();
        assert_eq!(tax.old_regime_tax, Money::from_major(210_600));
        assert_eq!(tax.new_regime_tax, Money::from_major(130_000));

        let salary = compute_salary_breakdown(Money::from_major(1_200_000), Money::from_major(200), None, Money::ZERO).unwrap();
        assert_eq!(salary.monthly_in_hand, Money::from_major(93_800));
    }

    #[test]
    fn test_custom_config() {
        let config = CalculatorConfig::from_json(r#"{ "limits": { "max_tenure_months": 120 }, "eligibility": { "foir": "0.4" } }"#).unwrap();
        let calculator = FinanceCalculator::new(config).unwrap();

        let terms = LoanTerms::new(Money::from_major(500_000), Rate::from_percentage(9), 15, TenureUnit::Years);
        assert!(matches!(calculator.compute_emi(&terms), Err(CalcError::OutOfRange { .. })));

        let eligibility = calculator
            .compute_eligibility(&EligibilityInput {
                gross_monthly_income: Money::from_major(100_000),
                other_monthly_obligations: Money::ZERO,
                annual_rate: Rate::from_percentage(9),
                tenure_years: 10,
            })
            .unwrap();
        assert_eq!(eligibility.max_monthly_emi, Money::from_major(40_000));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = CalculatorConfig::default();
        config.limits.max_tenure_months = 0;
        assert!(matches!(
            FinanceCalculator::new(config),
            Err(CalcError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_reconcile_through_facade() {
        let calculator = FinanceCalculator::default();
        let state = calculator.asset_purchase(Money::from_major(1_200_000), dec!(30)).unwrap();
        let state = reconcile_asset_purchase(&state, AssetField::DownPaymentAmount, dec!(500000)).unwrap();
        assert_eq!(state.down_payment_percent, dec!(42));

        let salary = calculator.salary_state(Money::from_major(1_800_000), FinancialYear::Fy2025_26).unwrap();
        let salary = reconcile_salary(&salary, SalaryField::PfMonthly, Money::from_major(1_800)).unwrap();
        assert_eq!(salary.monthly_in_hand, Money::from_major(135_433));
    }

    #[test]
    fn test_current_financial_year_follows_clock() {
        let time = SafeTimeProvider::new(TimeSource::Test(Utc.with_ymd_and_hms(2025, 3, 31, 12, 0, 0).unwrap()));
        let calculator = FinanceCalculator::default();
        assert_eq!(calculator.current_financial_year(&time), FinancialYear::Fy2024_25);

        time.test_control().unwrap().advance(Duration::days(1));
        assert_eq!(calculator.current_financial_year(&time), FinancialYear::Fy2025_26);

        time.test_control().unwrap().advance(Duration::days(365 * 5));
        assert_eq!(calculator.current_financial_year(&time), FinancialYear::Fy2026_27);
    }
}
