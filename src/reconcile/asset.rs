use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::PurchaseConfig;
use crate::decimal::Money;
use crate::errors::{CalcError, Result};
use crate::events::{Event, EventStore};
use crate::state::AssetPurchaseState;
use crate::types::AssetField;

use super::graph::DependencyGraph;
use super::FieldReconciler;

/// keeps price, down payment percent, down payment amount and loan amount consistent
#[derive(Debug, Clone)]
pub struct AssetPurchaseReconciler {
    config: PurchaseConfig,
    graph: DependencyGraph<AssetField>,
}

impl Default for AssetPurchaseReconciler {
    fn default() -> Self {
        Self::new(PurchaseConfig::default())
    }
}

impl AssetPurchaseReconciler {
    pub fn new(config: PurchaseConfig) -> Self {
        let graph = DependencyGraph::new()
            .link(AssetField::AssetPrice, AssetField::DownPaymentAmount)
            .link(AssetField::DownPaymentPercent, AssetField::DownPaymentAmount)
            .link(AssetField::DownPaymentAmount, AssetField::LoanAmount)
            .invert(AssetField::DownPaymentAmount, AssetField::DownPaymentPercent);

        Self { config, graph }
    }

    /// validated starting state
    pub fn initial(&self, asset_price: Money, down_payment_percent: Decimal) -> Result<AssetPurchaseState> {
        if asset_price.is_negative() {
            return Err(CalcError::invalid("asset_price", "cannot be negative"));
        }
        self.check_percent(down_payment_percent)?;
        AssetPurchaseState::new(asset_price.round_whole(), down_payment_percent)
    }

    fn check_percent(&self, percent: Decimal) -> Result<()> {
        let max = self.config.max_down_payment_percent;
        if percent < Decimal::ZERO || percent > max {
            return Err(CalcError::out_of_range("down_payment_percent", percent, Decimal::ZERO, max));
        }
        Ok(())
    }

    fn check_edit(&self, state: &AssetPurchaseState, field: AssetField, value: Decimal) -> Result<()> {
        match field {
            AssetField::AssetPrice if value < Decimal::ZERO => {
                Err(CalcError::invalid("asset_price", "cannot be negative"))
            }
            AssetField::AssetPrice => Ok(()),
            AssetField::DownPaymentPercent => self.check_percent(value),
            AssetField::DownPaymentAmount => {
                let price = state.asset_price.as_decimal();
                if value < Decimal::ZERO || value > price {
                    return Err(CalcError::out_of_range("down_payment_amount", value, Decimal::ZERO, price));
                }
                Ok(())
            }
            AssetField::LoanAmount => Err(CalcError::invalid(
                "loan_amount",
                "derived from price and down payment, edit those instead",
            )),
        }
    }

    fn derive(&self, working: &AssetPurchaseState, field: AssetField) -> Result<Decimal> {
        match field {
            AssetField::DownPaymentAmount => working
                .asset_price
                .percentage(working.down_payment_percent)
                .map(|amount| amount.round_whole().as_decimal())
                .ok_or_else(|| CalcError::overflow("down payment amount")),
            AssetField::DownPaymentPercent => {
                let percent = working
                    .down_payment_amount
                    .percent_of(working.asset_price)
                    .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
                self.check_percent(percent)?;
                Ok(percent)
            }
            AssetField::LoanAmount => Ok((working.asset_price - working.down_payment_amount).as_decimal()),
            AssetField::AssetPrice => Err(CalcError::CalculationError {
                message: "asset price is never derived".to_string(),
            }),
        }
    }
}

impl FieldReconciler for AssetPurchaseReconciler {
    type Field = AssetField;
    type State = AssetPurchaseState;
    type Value = Decimal;

    fn graph(&self) -> &DependencyGraph<AssetField> {
        &self.graph
    }

    fn reconcile_with_events(
        &self,
        state: &AssetPurchaseState,
        field: AssetField,
        value: Decimal,
        events: &mut EventStore,
    ) -> Result<AssetPurchaseState> {
        // amounts are kept in whole units
        let value = match field {
            AssetField::AssetPrice | AssetField::DownPaymentAmount => {
                value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            }
            AssetField::DownPaymentPercent | AssetField::LoanAmount => value,
        };
        self.check_edit(state, field, value)?;

        let plan = self.graph.plan(field)?;
        log::debug!("asset edit {:?} = {}, recomputing {:?}", field, value, plan);

        let mut working = *state;
        let mut pending = vec![Event::FieldEdited {
            field: field.into(),
            old_value: state.value(field),
            new_value: value,
        }];
        working.set(field, value);

        for derived in plan {
            let old_value = working.value(derived);
            let new_value = self.derive(&working, derived)?;
            working.set(derived, new_value);
            if old_value != new_value {
                pending.push(Event::FieldDerived {
                    field: derived.into(),
                    old_value,
                    new_value,
                });
            }
        }

        events.extend(pending);
        Ok(working)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldId;
    use rust_decimal_macros::dec;

    fn start() -> (AssetPurchaseReconciler, AssetPurchaseState) {
        let reconciler = AssetPurchaseReconciler::default();
        let state = reconciler.initial(Money::from_major(1_200_000), dec!(30)).unwrap();
        (reconciler, state)
    }

    #[test]
    fn test_percent_edit() {
        let (reconciler, state) = start();
        let next = reconciler.reconcile(&state, AssetField::DownPaymentPercent, dec!(20)).unwrap();

        assert_eq!(next.down_payment_percent, dec!(20));
        assert_eq!(next.down_payment_amount, Money::from_major(240_000));
        assert_eq!(next.loan_amount, Money::from_major(960_000));
    }

    #[test]
    fn test_amount_edit_inverts_percent() {
        let (reconciler, state) = start();
        let next = reconciler.reconcile(&state, AssetField::DownPaymentAmount, dec!(500000)).unwrap();

        assert_eq!(next.down_payment_percent, dec!(42));
        assert_eq!(next.down_payment_amount, Money::from_major(500_000));
        assert_eq!(next.loan_amount, Money::from_major(700_000));
    }

    #[test]
    fn test_fractional_amounts_are_rounded() {
        let (reconciler, state) = start();

        let next = reconciler.reconcile(&state, AssetField::DownPaymentAmount, dec!(500000.4)).unwrap();
        assert_eq!(next.down_payment_amount, Money::from_major(500_000));
        assert_eq!(next.loan_amount, Money::from_major(700_000));
        assert_eq!(next.down_payment_percent, dec!(42));

        let next = reconciler.reconcile(&state, AssetField::DownPaymentAmount, dec!(500000.5)).unwrap();
        assert_eq!(next.down_payment_amount, Money::from_major(500_001));
        assert_eq!(next.loan_amount, Money::from_major(699_999));

        let next = reconciler.reconcile(&state, AssetField::AssetPrice, dec!(1000000.75)).unwrap();
        assert_eq!(next.asset_price, Money::from_major(1_000_001));
        assert_eq!(next.loan_amount + next.down_payment_amount, next.asset_price);

        let initial = reconciler.initial(Money::from_decimal(dec!(999999.6)), dec!(20)).unwrap();
        assert_eq!(initial.asset_price, Money::from_major(1_000_000));
        assert_eq!(initial.loan_amount, Money::from_major(800_000));
    }

    #[test]
    fn test_near_maximum_price_does_not_overflow() {
        let (reconciler, state) = start();
        let price = dec!(70000000000000000000000000000);

        let next = reconciler.reconcile(&state, AssetField::AssetPrice, price).unwrap();
        assert_eq!(next.down_payment_amount, Money::from_decimal(dec!(21000000000000000000000000000)));
        assert_eq!(next.loan_amount, Money::from_decimal(dec!(49000000000000000000000000000)));

        let initial = reconciler.initial(Money::from_decimal(price), dec!(90)).unwrap();
        assert_eq!(initial.loan_amount, Money::from_decimal(dec!(7000000000000000000000000000)));
    }

    #[test]
    fn test_edit_order_converges() {
        let (reconciler, state) = start();

        let forward = reconciler.reconcile(&state, AssetField::DownPaymentAmount, dec!(500000)).unwrap();

        let reverse = reconciler.reconcile(&state, AssetField::DownPaymentPercent, dec!(42)).unwrap();
        assert_eq!(reverse.down_payment_amount, Money::from_major(504_000));
        let reverse = reconciler.reconcile(&reverse, AssetField::DownPaymentAmount, dec!(500000)).unwrap();

        assert_eq!(forward, reverse);
    }

    #[test]
    fn test_price_edit_keeps_percent() {
        let (reconciler, state) = start();
        let next = reconciler.reconcile(&state, AssetField::AssetPrice, dec!(2000000)).unwrap();

        assert_eq!(next.down_payment_percent, dec!(30));
        assert_eq!(next.down_payment_amount, Money::from_major(600_000));
        assert_eq!(next.loan_amount, Money::from_major(1_400_000));
        assert_eq!(next.loan_amount + next.down_payment_amount, next.asset_price);
    }

    #[test]
    fn test_rejected_edits() {
        let (reconciler, state) = start();

        assert!(matches!(
            reconciler.reconcile(&state, AssetField::DownPaymentPercent, dec!(91)),
            Err(CalcError::OutOfRange { .. })
        ));
        assert!(matches!(
            reconciler.reconcile(&state, AssetField::DownPaymentPercent, dec!(-1)),
            Err(CalcError::OutOfRange { .. })
        ));
        assert!(matches!(
            reconciler.reconcile(&state, AssetField::DownPaymentAmount, dec!(1200001)),
            Err(CalcError::OutOfRange { .. })
        ));
        // 95% of the price derives a percent above the cap
        assert!(matches!(
            reconciler.reconcile(&state, AssetField::DownPaymentAmount, dec!(1140000)),
            Err(CalcError::OutOfRange { .. })
        ));
        assert!(matches!(
            reconciler.reconcile(&state, AssetField::AssetPrice, dec!(-10)),
            Err(CalcError::InvalidInput { .. })
        ));
        assert!(matches!(
            reconciler.reconcile(&state, AssetField::LoanAmount, dec!(100)),
            Err(CalcError::InvalidInput { .. })
        ));
        assert!(matches!(
            reconciler.initial(Money::from_major(100), dec!(95)),
            Err(CalcError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_zero_price() {
        let reconciler = AssetPurchaseReconciler::default();
        let state = reconciler.initial(Money::ZERO, dec!(20)).unwrap();
        let next = reconciler.reconcile(&state, AssetField::DownPaymentAmount, Decimal::ZERO).unwrap();

        assert_eq!(next.down_payment_percent, Decimal::ZERO);
        assert_eq!(next.loan_amount, Money::ZERO);
    }

    #[test]
    fn test_events_recorded() {
        let (reconciler, state) = start();
        let mut events = EventStore::new();

        reconciler
            .reconcile_with_events(&state, AssetField::DownPaymentAmount, dec!(500000), &mut events)
            .unwrap();

        let recorded = events.take_events();
        assert_eq!(recorded.len(), 3);
        assert!(matches!(
            recorded[0],
            Event::FieldEdited { field: FieldId::Asset(AssetField::DownPaymentAmount), .. }
        ));
        assert!(matches!(
            recorded[1],
            Event::FieldDerived { field: FieldId::Asset(AssetField::DownPaymentPercent), .. }
        ));

        // a rejected edit records nothing
        let _ = reconciler.reconcile_with_events(&state, AssetField::DownPaymentPercent, dec!(99), &mut events);
        assert!(events.is_empty());
    }
}
