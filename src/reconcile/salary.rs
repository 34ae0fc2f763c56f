use crate::config::SalaryConfig;
use crate::decimal::Money;
use crate::errors::{CalcError, Result};
use crate::events::{Event, EventStore};
use crate::state::{OverridableAmount, SalaryState};
use crate::tax::{compute_new, salary};
use crate::types::{FinancialYear, SalaryField};

use super::graph::DependencyGraph;
use super::FieldReconciler;

/// keeps the salary screen consistent with its ctc, pf and professional tax inputs
#[derive(Debug, Clone)]
pub struct SalaryReconciler {
    config: SalaryConfig,
    graph: DependencyGraph<SalaryField>,
}

impl Default for SalaryReconciler {
    fn default() -> Self {
        Self::new(SalaryConfig::default())
    }
}

impl SalaryReconciler {
    pub fn new(config: SalaryConfig) -> Self {
        let graph = DependencyGraph::new()
            .link(SalaryField::AnnualCtc, SalaryField::BasicAnnual)
            .link(SalaryField::BasicAnnual, SalaryField::HraAnnual)
            .link(SalaryField::BasicAnnual, SalaryField::PfMonthly)
            .link(SalaryField::AnnualCtc, SalaryField::IncomeTaxAnnual)
            .link(SalaryField::AnnualCtc, SalaryField::MonthlyInHand)
            .link(SalaryField::PfMonthly, SalaryField::MonthlyInHand)
            .link(SalaryField::ProfessionalTaxMonthly, SalaryField::MonthlyInHand)
            .link(SalaryField::IncomeTaxAnnual, SalaryField::MonthlyInHand);

        Self { config, graph }
    }

    /// state for a ctc with the configured professional tax and default pf
    pub fn initial(&self, annual_ctc: Money, financial_year: FinancialYear) -> Result<SalaryState> {
        let empty = SalaryState::empty(financial_year, self.config.default_professional_tax_monthly);
        self.reconcile(&empty, SalaryField::AnnualCtc, annual_ctc)
    }

    /// recompute income tax and in-hand pay under another year's rules; a pf override survives
    pub fn change_financial_year(
        &self,
        state: &SalaryState,
        financial_year: FinancialYear,
        events: &mut EventStore,
    ) -> Result<SalaryState> {
        if state.financial_year == financial_year {
            return Ok(*state);
        }

        let mut working = *state;
        working.financial_year = financial_year;

        let mut pending = vec![Event::FinancialYearChanged {
            from: state.financial_year,
            to: financial_year,
        }];

        let mut plan = vec![SalaryField::IncomeTaxAnnual];
        plan.extend(self.graph.plan(SalaryField::IncomeTaxAnnual)?);
        self.apply_plan(&mut working, SalaryField::IncomeTaxAnnual, plan, &mut pending)?;

        events.extend(pending);
        Ok(working)
    }

    fn check_edit(field: SalaryField, value: Money) -> Result<()> {
        match field {
            SalaryField::AnnualCtc | SalaryField::PfMonthly | SalaryField::ProfessionalTaxMonthly => {
                if value.is_negative() {
                    return Err(CalcError::invalid(field_name(field), "cannot be negative"));
                }
                Ok(())
            }
            _ => Err(CalcError::invalid(
                field_name(field),
                "derived field, edit ctc, pf or professional tax instead",
            )),
        }
    }

    fn derive(&self, working: &SalaryState, field: SalaryField) -> Result<Money> {
        let ctc = working.annual_ctc;
        match field {
            SalaryField::BasicAnnual => Ok(salary::basic_annual(ctc, &self.config).round_whole()),
            SalaryField::HraAnnual => Ok(salary::hra_annual(ctc, &self.config).round_whole()),
            SalaryField::PfMonthly => Ok(salary::default_pf_monthly(ctc, &self.config)),
            SalaryField::IncomeTaxAnnual => compute_new(ctc, working.financial_year),
            SalaryField::MonthlyInHand => {
                let in_hand = salary::monthly_in_hand(
                    ctc,
                    working.pf_monthly.value,
                    working.professional_tax_monthly,
                    working.income_tax_annual,
                );
                if in_hand.is_negative() {
                    return Err(CalcError::out_of_range(
                        "monthly_in_hand",
                        in_hand.as_decimal(),
                        rust_decimal::Decimal::ZERO,
                        (ctc / rust_decimal::Decimal::from(12)).round_whole().as_decimal(),
                    ));
                }
                Ok(in_hand)
            }
            SalaryField::AnnualCtc | SalaryField::ProfessionalTaxMonthly => Err(CalcError::CalculationError {
                message: format!("{} is an input, never derived", field_name(field)),
            }),
        }
    }

    fn apply_plan(
        &self,
        working: &mut SalaryState,
        trigger: SalaryField,
        plan: Vec<SalaryField>,
        pending: &mut Vec<Event>,
    ) -> Result<()> {
        log::debug!("salary edit {:?}, recomputing {:?}", trigger, plan);

        for field in plan {
            let old_value = working.value(field);
            let new_value = self.derive(working, field)?;

            match field {
                SalaryField::BasicAnnual => working.basic_annual = new_value,
                SalaryField::HraAnnual => working.hra_annual = new_value,
                SalaryField::PfMonthly => {
                    if working.pf_monthly.is_overridden {
                        pending.push(Event::OverrideCleared {
                            field: field.into(),
                            previous: old_value,
                            restored: new_value,
                        });
                    }
                    working.pf_monthly = OverridableAmount::derived(new_value);
                }
                SalaryField::IncomeTaxAnnual => working.income_tax_annual = new_value,
                SalaryField::MonthlyInHand => working.monthly_in_hand = new_value,
                SalaryField::AnnualCtc | SalaryField::ProfessionalTaxMonthly => {}
            }

            if old_value != new_value {
                pending.push(Event::FieldDerived {
                    field: field.into(),
                    old_value: old_value.as_decimal(),
                    new_value: new_value.as_decimal(),
                });
            }
        }

        Ok(())
    }
}

fn field_name(field: SalaryField) -> &'static str {
    match field {
        SalaryField::AnnualCtc => "annual_ctc",
        SalaryField::BasicAnnual => "basic_annual",
        SalaryField::HraAnnual => "hra_annual",
        SalaryField::PfMonthly => "pf_monthly",
        SalaryField::ProfessionalTaxMonthly => "professional_tax_monthly",
        SalaryField::IncomeTaxAnnual => "income_tax_annual",
        SalaryField::MonthlyInHand => "monthly_in_hand",
    }
}

impl FieldReconciler for SalaryReconciler {
    type Field = SalaryField;
    type State = SalaryState;
    type Value = Money;

    fn graph(&self) -> &DependencyGraph<SalaryField> {
        &self.graph
    }

    fn reconcile_with_events(
        &self,
        state: &SalaryState,
        field: SalaryField,
        value: Money,
        events: &mut EventStore,
    ) -> Result<SalaryState> {
        Self::check_edit(field, value)?;

        let mut working = *state;
        let mut pending = vec![Event::FieldEdited {
            field: field.into(),
            old_value: state.value(field).as_decimal(),
            new_value: value.as_decimal(),
        }];

        match field {
            SalaryField::AnnualCtc => working.annual_ctc = value,
            SalaryField::ProfessionalTaxMonthly => working.professional_tax_monthly = value,
            SalaryField::PfMonthly => {
                working.pf_monthly = OverridableAmount::overridden(value);
                pending.push(Event::OverrideApplied {
                    field: field.into(),
                    value,
                });
            }
            _ => {}
        }

        let plan = self.graph.plan(field)?;
        self.apply_plan(&mut working, field, plan, &mut pending)?;

        events.extend(pending);
        Ok(working)
    }
}
