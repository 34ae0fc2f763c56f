pub mod calculator;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod investment;
pub mod loans;
pub mod numeric;
pub mod reconcile;
pub mod state;
pub mod tax;
pub mod types;
pub mod views;

// re-export key types
pub use calculator::{
    compute_eligibility, compute_emi, compute_investment, compute_salary_breakdown, compute_tax,
    reconcile_asset_purchase, reconcile_salary, FinanceCalculator,
};
pub use config::{CalculatorConfig, EligibilityConfig, InputLimits, PurchaseConfig, SalaryConfig};
pub use decimal::{Money, Rate};
pub use errors::{CalcError, Result};
pub use events::{Event, EventStore};
pub use investment::{InvestmentPlan, InvestmentProjector, InvestmentResult, InvestmentYear};
pub use loans::{
    AmortizationResult, AmortizationRow, AmortizationScheduler, EligibilityInput,
    EligibilityResult, EligibilitySizer, LoanTerms, PaymentBreakdown, YearlyAmortization,
};
pub use reconcile::{AssetPurchaseReconciler, DependencyGraph, FieldReconciler, SalaryReconciler};
pub use state::{AssetPurchaseState, OverridableAmount, SalaryState};
pub use tax::{SalaryBreakdown, TaxEngine, TaxResult, TaxYearRules};
pub use types::{AssetField, FieldId, FinancialYear, Regime, SalaryField, TenureUnit};
pub use views::{InvestmentView, JsonView, LoanView, TaxView};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
