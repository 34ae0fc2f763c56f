use chrono::{Datelike, NaiveDate};
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{CalcError, Result};

/// unit a loan tenure is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TenureUnit {
    Years,
    Months,
}

impl FromStr for TenureUnit {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "years" | "year" | "y" => Ok(TenureUnit::Years),
            "months" | "month" | "m" => Ok(TenureUnit::Months),
            other => Err(CalcError::invalid(
                "tenure_unit",
                format!("expected years or months, got '{}'", other),
            )),
        }
    }
}

/// supported financial years (1 april - 31 march)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FinancialYear {
    #[serde(rename = "2024-2025")]
    Fy2024_25,
    #[serde(rename = "2025-2026")]
    Fy2025_26,
    #[serde(rename = "2026-2027")]
    Fy2026_27,
}

impl FinancialYear {
    pub const ALL: [FinancialYear; 3] = [
        FinancialYear::Fy2024_25,
        FinancialYear::Fy2025_26,
        FinancialYear::Fy2026_27,
    ];

    /// calendar year the financial year starts in
    pub fn start_year(&self) -> i32 {
        match self {
            FinancialYear::Fy2024_25 => 2024,
            FinancialYear::Fy2025_26 => 2025,
            FinancialYear::Fy2026_27 => 2026,
        }
    }

    fn from_start_year(year: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|fy| fy.start_year() == year)
    }

    /// financial year containing the given date
    pub fn for_date(date: NaiveDate) -> Result<Self> {
        let start_year = if date.month() >= 4 {
            date.year()
        } else {
            date.year() - 1
        };

        Self::from_start_year(start_year).ok_or_else(|| {
            CalcError::out_of_range(
                "financial_year",
                Decimal::from(start_year),
                Decimal::from(Self::ALL[0].start_year()),
                Decimal::from(Self::ALL[Self::ALL.len() - 1].start_year()),
            )
        })
    }

    /// financial year for the provider's current date, clamped to the supported table
    pub fn current(time: &SafeTimeProvider) -> Self {
        let today = time.now().date_naive();
        match Self::for_date(today) {
            Ok(fy) => fy,
            Err(_) => {
                let earliest = Self::ALL[0];
                let latest = Self::ALL[Self::ALL.len() - 1];
                let clamped = if today.year() < earliest.start_year() {
                    earliest
                } else {
                    latest
                };
                log::warn!(
                    "no tax rules for {}, falling back to financial year {}",
                    today,
                    clamped
                );
                clamped
            }
        }
    }
}

impl fmt::Display for FinancialYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = self.start_year();
        write!(f, "{}-{}", start, start + 1)
    }
}

impl FromStr for FinancialYear {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|fy| fy.to_string() == s.trim())
            .ok_or_else(|| {
                CalcError::invalid(
                    "financial_year",
                    format!("unsupported financial year '{}'", s),
                )
            })
    }
}

/// income tax regime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Regime {
    Old,
    New,
}

/// linked fields of the asset purchase screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetField {
    AssetPrice,
    DownPaymentPercent,
    DownPaymentAmount,
    LoanAmount,
}

/// linked fields of the salary screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SalaryField {
    AnnualCtc,
    BasicAnnual,
    HraAnnual,
    PfMonthly,
    ProfessionalTaxMonthly,
    IncomeTaxAnnual,
    MonthlyInHand,
}

/// field identifier used in reconciliation events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldId {
    Asset(AssetField),
    Salary(SalaryField),
}

impl From<AssetField> for FieldId {
    fn from(field: AssetField) -> Self {
        FieldId::Asset(field)
    }
}

impl From<SalaryField> for FieldId {
    fn from(field: SalaryField) -> Self {
        FieldId::Salary(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use hourglass_rs::TimeSource;

    #[test]
    fn test_financial_year_boundaries() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();

        assert_eq!(FinancialYear::for_date(d(2024, 4, 1)).unwrap(), FinancialYear::Fy2024_25);
        assert_eq!(FinancialYear::for_date(d(2025, 3, 31)).unwrap(), FinancialYear::Fy2024_25);
        assert_eq!(FinancialYear::for_date(d(2025, 4, 1)).unwrap(), FinancialYear::Fy2025_26);
        assert_eq!(FinancialYear::for_date(d(2027, 3, 31)).unwrap(), FinancialYear::Fy2026_27);
        assert!(matches!(
            FinancialYear::for_date(d(2024, 3, 31)),
            Err(CalcError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_current_year_uses_time_provider() {
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 0).unwrap()
        ));
        assert_eq!(FinancialYear::current(&time), FinancialYear::Fy2025_26);

        let control = time.test_control().unwrap();
        control.advance(chrono::Duration::days(365 * 3));
        assert_eq!(FinancialYear::current(&time), FinancialYear::Fy2026_27);

        let early = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
        ));
        assert_eq!(FinancialYear::current(&early), FinancialYear::Fy2024_25);
    }

    #[test]
    fn test_financial_year_text_round_trip() {
        for fy in FinancialYear::ALL {
            assert_eq!(fy.to_string().parse::<FinancialYear>().unwrap(), fy);
        }
        assert_eq!(FinancialYear::Fy2025_26.to_string(), "2025-2026");
        assert!("2023-2024".parse::<FinancialYear>().is_err());
        assert_eq!(
            serde_json::to_string(&FinancialYear::Fy2026_27).unwrap(),
            "\"2026-2027\""
        );
    }

    #[test]
    fn test_tenure_unit_parse() {
        assert_eq!("Years".parse::<TenureUnit>().unwrap(), TenureUnit::Years);
        assert_eq!("m".parse::<TenureUnit>().unwrap(), TenureUnit::Months);
        assert!("weeks".parse::<TenureUnit>().is_err());
    }
}
