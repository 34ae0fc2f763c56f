use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};

/// one bracket of a progressive schedule: income in [from, to) taxed at `rate`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slab {
    pub from: Money,
    /// `None` for the open top bracket
    pub to: Option<Money>,
    pub rate: Rate,
}

impl Slab {
    pub fn new(from: i64, to: Option<i64>, rate_percent: u32) -> Self {
        Self {
            from: Money::from_major(from),
            to: to.map(Money::from_major),
            rate: Rate::from_percentage(rate_percent),
        }
    }

    /// portion of `amount` falling inside this slab
    pub fn portion(&self, amount: Money) -> Money {
        let upper = match self.to {
            Some(to) => to.min(amount),
            None => amount,
        };
        (upper - self.from).max(Money::ZERO)
    }
}

/// sum of each slab's portion times its rate; income below the first slab is untaxed
pub fn evaluate_progressive_slabs(taxable: Money, slabs: &[Slab]) -> Money {
    if !taxable.is_positive() {
        return Money::ZERO;
    }

    slabs
        .iter()
        .map(|slab| slab.portion(taxable) * slab.rate.as_decimal())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn old_regime() -> Vec<Slab> {
        vec![
            Slab::new(250_000, Some(500_000), 5),
            Slab::new(500_000, Some(1_000_000), 20),
            Slab::new(1_000_000, None, 30),
        ]
    }

    #[test]
    fn test_progressive_evaluation() {
        let slabs = old_regime();
        assert_eq!(evaluate_progressive_slabs(Money::from_major(400_000), &slabs), Money::from_major(7_500));
        assert_eq!(evaluate_progressive_slabs(Money::from_major(800_000), &slabs), Money::from_major(72_500));
        assert_eq!(evaluate_progressive_slabs(Money::from_major(1_200_000), &slabs), Money::from_major(172_500));
    }

    #[test]
    fn test_below_first_threshold_is_untaxed() {
        let slabs = old_regime();
        assert_eq!(evaluate_progressive_slabs(Money::from_major(250_000), &slabs), Money::ZERO);
        assert_eq!(evaluate_progressive_slabs(Money::ZERO, &slabs), Money::ZERO);
        assert_eq!(evaluate_progressive_slabs(Money::from_major(-10), &slabs), Money::ZERO);
    }

    #[test]
    fn test_slab_portion() {
        let slab = Slab::new(100, Some(200), 10);
        assert_eq!(slab.portion(Money::from_major(50)), Money::ZERO);
        assert_eq!(slab.portion(Money::from_major(150)), Money::from_major(50));
        assert_eq!(slab.portion(Money::from_major(500)), Money::from_major(100));
    }
}
