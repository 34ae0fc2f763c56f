use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::InputLimits;
use crate::decimal::Money;
use crate::errors::{CalcError, Result};
use crate::numeric::{self, emi_annuity};

use super::LoanTerms;

/// one month of the amortization table, every figure rounded independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub period: u32,
    pub emi_amount: Money,
    pub interest_portion: Money,
    pub principal_portion: Money,
    pub remaining_balance: Money,
}

/// emi, totals and the full schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub emi: Money,
    pub total_interest: Money,
    pub total_payment: Money,
    pub schedule: Vec<AmortizationRow>,
}

/// schedule rows aggregated per loan year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyAmortization {
    pub year: u32,
    pub principal_paid: Money,
    pub interest_paid: Money,
    pub closing_balance: Money,
}

/// principal vs interest share of the total payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    pub principal: Money,
    pub interest: Money,
    pub principal_percent: Decimal,
    pub interest_percent: Decimal,
}

impl AmortizationResult {
    /// number of periods in the schedule
    pub fn periods(&self) -> u32 {
        self.schedule.len() as u32
    }

    /// get row for specific period (1-based)
    pub fn row(&self, period: u32) -> Option<&AmortizationRow> {
        period
            .checked_sub(1)
            .and_then(|idx| self.schedule.get(idx as usize))
    }

    /// aggregate rows into 12-month loan years
    pub fn yearly_summary(&self) -> Vec<YearlyAmortization> {
        self.schedule
            .chunks(12)
            .enumerate()
            .map(|(idx, rows)| YearlyAmortization {
                year: idx as u32 + 1,
                principal_paid: rows.iter().map(|r| r.principal_portion).sum(),
                interest_paid: rows.iter().map(|r| r.interest_portion).sum(),
                closing_balance: rows.last().map(|r| r.remaining_balance).unwrap_or(Money::ZERO),
            })
            .collect()
    }

    /// split of the total payment into principal and interest
    pub fn breakdown(&self) -> PaymentBreakdown {
        let principal = self.total_payment - self.total_interest;
        PaymentBreakdown {
            principal,
            interest: self.total_interest,
            principal_percent: principal.percent_of(self.total_payment).round_dp(2),
            interest_percent: self.total_interest.percent_of(self.total_payment).round_dp(2),
        }
    }
}

/// amortization scheduler
#[derive(Debug, Clone, Default)]
pub struct AmortizationScheduler {
    limits: InputLimits,
}

impl AmortizationScheduler {
    pub fn new(limits: InputLimits) -> Self {
        Self { limits }
    }

    /// build the full schedule and totals for a loan
    pub fn generate(&self, terms: &LoanTerms) -> Result<AmortizationResult> {
        terms.validate(&self.limits)?;

        let r = numeric::monthly_rate(terms.annual_rate);
        let n = terms.periods();
        let emi = emi_annuity(terms.principal, r, n)?;

        let mut schedule = Vec::with_capacity(n as usize);
        let mut balance = terms.principal;

        for period in 1..=n {
            let interest = balance * r;
            let principal_portion = emi - interest;
            balance = (balance - principal_portion).max(Money::ZERO);

            schedule.push(AmortizationRow {
                period,
                emi_amount: emi.round_whole(),
                interest_portion: interest.round_whole(),
                principal_portion: principal_portion.round_whole(),
                remaining_balance: balance.round_whole(),
            });
        }

        if let Some(last) = schedule.last_mut() {
            last.remaining_balance = Money::ZERO;
        }

        let total_exact = emi
            .as_decimal()
            .checked_mul(Decimal::from(n))
            .map(Money::from_decimal)
            .ok_or_else(|| CalcError::overflow("total payment"))?;
        let result = AmortizationResult {
            emi: emi.round_whole(),
            total_interest: (total_exact - terms.principal).round_whole(),
            total_payment: total_exact.round_whole(),
            schedule,
        };

        log::debug!(
            "amortized {} at {} over {} months: emi {}, interest {}",
            terms.principal,
            terms.annual_rate,
            n,
            result.emi,
            result.total_interest
        );

        Ok(result)
    }
}
