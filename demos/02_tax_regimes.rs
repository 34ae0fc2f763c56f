/// tax regimes - old vs new regime across financial years
use chrono::{TimeZone, Utc};
use finance_calc_rs::{
    FinanceCalculator, FinancialYear, JsonView, Money, SafeTimeProvider, TaxView, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("=== tax regime example ===\n");

    let calculator = FinanceCalculator::default();
    let deductions = Money::from_major(150_000);

    for income in [800_000, 1_275_000, 1_500_000, 3_000_000] {
        let income = Money::from_major(income);
        for fy in FinancialYear::ALL {
            let result = calculator.compute_tax(income, deductions, fy)?;
            println!(
                "{} income {:>8}: old {:>7} new {:>7} -> {:?} saves {}",
                fy,
                income,
                result.old_regime_tax,
                result.new_regime_tax,
                result.recommended_regime(),
                result.savings()
            );
        }
    }

    // pick the financial year from a controlled clock
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2025, 11, 1, 0, 0, 0).unwrap()
    ));
    let fy = calculator.current_financial_year(&time);
    println!("\ncurrent financial year on {}: {}", time.now().format("%Y-%m-%d"), fy);

    let income = Money::from_major(1_800_000);
    let result = calculator.compute_tax(income, deductions, fy)?;
    println!("{}", TaxView::from_result(fy, income, deductions, &result).json());

    Ok(())
}
