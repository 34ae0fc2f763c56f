//! Command-line host for the finance calculators
//!
//! Every subcommand prints its result as pretty JSON. Set `RUST_LOG=debug`
//! to see the computation log.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use serde_json::Value;

use finance_calc_rs::{
    AssetField, CalculatorConfig, EligibilityInput, FinanceCalculator, FinancialYear,
    InvestmentPlan, InvestmentView, LoanTerms, LoanView, Money, Rate, SalaryField, TaxView,
    TenureUnit,
};

/// Loan, tax, salary and investment calculators
#[derive(Parser)]
#[command(name = "fincalc", version, about = "Loan, tax, salary and investment calculators")]
struct Cli {
    /// Path to a JSON calculator configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// EMI, totals and amortization schedule of a loan
    Emi(EmiArgs),
    /// Income tax under the old and new regimes
    Tax(TaxArgs),
    /// Monthly in-hand pay for an annual CTC
    Salary(SalaryArgs),
    /// Future value of a monthly SIP
    Invest(InvestArgs),
    /// Largest loan serviceable under the FOIR cap
    Eligibility(EligibilityArgs),
    /// Split an asset price into down payment and loan
    DownPayment(DownPaymentArgs),
}

#[derive(Args)]
struct EmiArgs {
    /// Loan principal
    #[arg(long)]
    principal: Money,
    /// Annual interest rate in percent
    #[arg(long)]
    rate: Decimal,
    /// Tenure, in `--unit`s
    #[arg(long)]
    tenure: u32,
    /// years or months
    #[arg(long, default_value = "years")]
    unit: TenureUnit,
    /// Include the month-by-month schedule
    #[arg(long)]
    schedule: bool,
}

#[derive(Args)]
struct TaxArgs {
    /// Gross annual income
    #[arg(long)]
    income: Money,
    /// Old regime deductions beyond the standard deduction
    #[arg(long, default_value = "0")]
    deductions: Money,
    /// Financial year, e.g. 2025-2026 (defaults to the current one)
    #[arg(long)]
    fy: Option<FinancialYear>,
}

#[derive(Args)]
struct SalaryArgs {
    /// Annual cost to company
    #[arg(long)]
    ctc: Money,
    /// Monthly professional tax (defaults to the configured amount)
    #[arg(long)]
    professional_tax: Option<Money>,
    /// Monthly PF, replacing the derived default
    #[arg(long)]
    pf: Option<Money>,
    /// Financial year, e.g. 2025-2026 (defaults to the current one)
    #[arg(long)]
    fy: Option<FinancialYear>,
}

#[derive(Args)]
struct InvestArgs {
    /// Monthly contribution
    #[arg(long)]
    monthly: Money,
    /// Expected annual return in percent
    #[arg(long)]
    rate: Decimal,
    /// Investment horizon in years
    #[arg(long)]
    years: u32,
}

#[derive(Args)]
struct EligibilityArgs {
    /// Gross monthly income
    #[arg(long)]
    income: Money,
    /// Existing monthly EMIs and obligations
    #[arg(long, default_value = "0")]
    obligations: Money,
    /// Annual interest rate in percent
    #[arg(long)]
    rate: Decimal,
    /// Loan tenure in years
    #[arg(long)]
    years: u32,
}

#[derive(Args)]
struct DownPaymentArgs {
    /// Asset price
    #[arg(long)]
    price: Money,
    /// Down payment in percent of the price
    #[arg(long, default_value = "20")]
    percent: Decimal,
    /// Down payment amount; overrides the percent
    #[arg(long)]
    amount: Option<Decimal>,
}

fn load_calculator(path: Option<&PathBuf>) -> Result<FinanceCalculator> {
    let config = match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            CalculatorConfig::from_json(&json)
                .with_context(|| format!("loading config {}", path.display()))?
        }
        None => CalculatorConfig::default(),
    };
    Ok(FinanceCalculator::new(config)?)
}

fn run(calculator: &FinanceCalculator, command: Commands) -> Result<Value> {
    let value = match command {
        Commands::Emi(args) => {
            let terms = LoanTerms::new(args.principal, Rate::from_percent(args.rate), args.tenure, args.unit);
            let result = calculator.compute_emi(&terms)?;
            serde_json::to_value(LoanView::from_result(&terms, &result, args.schedule))?
        }
        Commands::Tax(args) => {
            let fy = args.fy.unwrap_or_else(|| calculator.current_financial_year_now());
            let result = calculator.compute_tax(args.income, args.deductions, fy)?;
            serde_json::to_value(TaxView::from_result(fy, args.income, args.deductions, &result))?
        }
        Commands::Salary(args) => {
            let fy = args.fy.unwrap_or_else(|| calculator.current_financial_year_now());
            let mut state = calculator.salary_state(args.ctc, fy)?;
            if let Some(pt) = args.professional_tax {
                state = calculator.reconcile_salary(&state, SalaryField::ProfessionalTaxMonthly, pt)?;
            }
            if let Some(pf) = args.pf {
                state = calculator.reconcile_salary(&state, SalaryField::PfMonthly, pf)?;
            }
            serde_json::to_value(state)?
        }
        Commands::Invest(args) => {
            let plan = InvestmentPlan {
                monthly_contribution: args.monthly,
                annual_rate: Rate::from_percent(args.rate),
                years: args.years,
            };
            let result = calculator.compute_investment(&plan)?;
            let growth = calculator.investment_growth(&plan)?;
            serde_json::to_value(InvestmentView::from_result(&plan, &result, growth))?
        }
        Commands::Eligibility(args) => {
            let input = EligibilityInput {
                gross_monthly_income: args.income,
                other_monthly_obligations: args.obligations,
                annual_rate: Rate::from_percent(args.rate),
                tenure_years: args.years,
            };
            serde_json::to_value(calculator.compute_eligibility(&input)?)?
        }
        Commands::DownPayment(args) => {
            let mut state = calculator.asset_purchase(args.price, args.percent)?;
            if let Some(amount) = args.amount {
                state = calculator.reconcile_asset_purchase(&state, AssetField::DownPaymentAmount, amount)?;
            }
            serde_json::to_value(state)?
        }
    };
    Ok(value)
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let calculator = load_calculator(cli.config.as_ref())?;
    let value = run(&calculator, cli.command)?;

    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
