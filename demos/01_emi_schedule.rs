/// emi schedule - yearly chart data and the first and last months
use finance_calc_rs::{FinanceCalculator, JsonView, LoanTerms, LoanView, Money, Rate};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("=== emi schedule example ===\n");

    let calculator = FinanceCalculator::default();
    let terms = LoanTerms::builder()
        .principal(Money::from_major(5_000_000))
        .rate(Rate::from_percent(dec!(8.5)))
        .tenure_years(20)
        .build()?;

    let result = calculator.compute_emi(&terms)?;
    println!("emi {} over {} months\n", result.emi, result.periods());

    println!("{:>5} {:>12} {:>12} {:>14}", "month", "interest", "principal", "balance");
    let first = result.schedule.iter().take(3);
    let last = result.schedule.iter().skip(result.schedule.len() - 3);
    for row in first.chain(last) {
        println!(
            "{:>5} {:>12} {:>12} {:>14}",
            row.period, row.interest_portion, row.principal_portion, row.remaining_balance
        );
    }

    println!("\nyearly summary:");
    for year in result.yearly_summary().iter().step_by(5) {
        println!(
            "  year {:>2}: principal {} interest {} closing {}",
            year.year, year.principal_paid, year.interest_paid, year.closing_balance
        );
    }

    // chart-ready view without the month-by-month rows
    let view = LoanView::from_result(&terms, &result, false);
    println!("\n{}", view.json());

    Ok(())
}
