/// investment and eligibility - sip growth and the loan a salary supports
use finance_calc_rs::{
    EligibilityInput, FinanceCalculator, InvestmentPlan, InvestmentView, JsonView, LoanTerms,
    Money, Rate, TenureUnit,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("=== investment and eligibility example ===\n");

    let calculator = FinanceCalculator::default();

    let plan = InvestmentPlan {
        monthly_contribution: Money::from_major(5_000),
        annual_rate: Rate::from_percentage(12),
        years: 10,
    };
    let result = calculator.compute_investment(&plan)?;
    let growth = calculator.investment_growth(&plan)?;
    for year in &growth {
        println!("year {:>2}: invested {:>8} value {:>8}", year.year, year.invested, year.value);
    }
    println!("{}", InvestmentView::from_result(&plan, &result, growth).json());

    let input = EligibilityInput {
        gross_monthly_income: Money::from_major(100_000),
        other_monthly_obligations: Money::from_major(10_000),
        annual_rate: Rate::from_percent(dec!(8.5)),
        tenure_years: 20,
    };
    let eligibility = calculator.compute_eligibility(&input)?;
    println!("\n{}", eligibility.json());

    // the sized loan fits under the emi cap
    let terms = LoanTerms::new(eligibility.max_loan_amount, input.annual_rate, input.tenure_years, TenureUnit::Years);
    let loan = calculator.compute_emi(&terms)?;
    println!("emi on max loan: {} (cap {})", loan.emi, eligibility.max_monthly_emi);

    Ok(())
}
