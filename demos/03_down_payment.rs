/// down payment - percent and amount fields kept in sync
use finance_calc_rs::{
    AssetField, AssetPurchaseState, EventStore, FieldReconciler, FinanceCalculator, JsonView,
    Money,
};
use rust_decimal_macros::dec;

fn show(label: &str, state: &AssetPurchaseState) {
    println!(
        "{:<22} price {} | {}% = {} | loan {}",
        label,
        state.asset_price,
        state.down_payment_percent,
        state.down_payment_amount,
        state.loan_amount
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== down payment example ===\n");

    let calculator = FinanceCalculator::default();
    let mut events = EventStore::new();
    let reconciler = calculator.asset_reconciler();

    let state = calculator.asset_purchase(Money::from_major(1_200_000), dec!(30))?;
    show("start", &state);

    let state = reconciler.reconcile_with_events(&state, AssetField::DownPaymentAmount, dec!(500000), &mut events)?;
    show("amount -> 500000", &state);

    let state = reconciler.reconcile_with_events(&state, AssetField::AssetPrice, dec!(1500000), &mut events)?;
    show("price -> 1500000", &state);

    let state = reconciler.reconcile_with_events(&state, AssetField::DownPaymentPercent, dec!(25), &mut events)?;
    show("percent -> 25", &state);

    // rejected edits leave the state alone
    if let Err(e) = reconciler.reconcile(&state, AssetField::DownPaymentPercent, dec!(95)) {
        println!("\nrejected: {}", e);
    }
    if let Err(e) = reconciler.reconcile(&state, AssetField::LoanAmount, dec!(100000)) {
        println!("rejected: {}", e);
    }

    println!("\nevents:");
    for event in events.take_events() {
        println!("  {:?}", event);
    }

    println!("\n{}", state.json());

    Ok(())
}
