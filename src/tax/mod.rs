pub mod engine;
pub mod rules;
pub mod salary;

pub use engine::{compute_new, compute_old, TaxEngine, TaxResult};
pub use rules::{RegimeRules, TaxYearRules};
pub use salary::{compute_salary_breakdown, SalaryBreakdown};
