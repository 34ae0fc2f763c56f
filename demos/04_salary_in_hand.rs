/// salary in hand - ctc breakdown with a pf override
use finance_calc_rs::{
    EventStore, FieldReconciler, FinanceCalculator, FinancialYear, JsonView, Money, SalaryField,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== salary in hand example ===\n");

    let calculator = FinanceCalculator::default();
    let reconciler = calculator.salary_reconciler();
    let mut events = EventStore::new();

    let state = calculator.salary_state(Money::from_major(1_800_000), FinancialYear::Fy2024_25)?;
    println!("ctc {} in {}: in hand {}", state.annual_ctc, state.financial_year, state.monthly_in_hand);

    // cap pf at the statutory minimum
    let state = reconciler.reconcile_with_events(&state, SalaryField::PfMonthly, Money::from_major(1_800), &mut events)?;
    println!("pf overridden to {}: in hand {}", state.pf_monthly.value, state.monthly_in_hand);

    // new year rules keep the override
    let state = calculator.change_financial_year(&state, FinancialYear::Fy2025_26, &mut events)?;
    println!("moved to {}: tax {} in hand {}", state.financial_year, state.income_tax_annual, state.monthly_in_hand);

    // a ctc change restores the derived pf
    let state = reconciler.reconcile_with_events(&state, SalaryField::AnnualCtc, Money::from_major(2_400_000), &mut events)?;
    println!("ctc -> {}: pf {} (overridden: {})", state.annual_ctc, state.pf_monthly.value, state.pf_monthly.is_overridden);

    println!("\n{} events recorded", events.len());
    println!("{}", state.breakdown().json());

    // the stateless form takes the tax directly
    let breakdown = calculator.compute_salary_breakdown(
        Money::from_major(1_200_000),
        Money::from_major(200),
        None,
        Money::ZERO,
    )?;
    println!("\n{}", breakdown.json());

    Ok(())
}
