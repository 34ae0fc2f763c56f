/// quick start - minimal example to get started
use finance_calc_rs::{compute_emi, JsonView, LoanTerms, Money, Rate, TenureUnit};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 8.4 lakh car loan at 8.8% for 7 years
    let terms = LoanTerms::new(
        Money::from_major(840_000),
        Rate::from_percent(dec!(8.8)),
        7,
        TenureUnit::Years,
    );

    let result = compute_emi(&terms)?;

    println!("emi: {}", result.emi);
    println!("total interest: {}", result.total_interest);
    println!("total payment: {}", result.total_payment);
    println!("principal share: {}%", result.breakdown().principal_percent);

    // print the whole result, schedule included
    println!("{}", result.json());

    Ok(())
}
