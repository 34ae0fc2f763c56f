use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("invalid input: {field} - {reason}")]
    InvalidInput {
        field: String,
        reason: String,
    },

    #[error("{field} out of range: {value} not within [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: Decimal,
        min: Decimal,
        max: Decimal,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },
}

impl CalcError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn out_of_range(field: &str, value: Decimal, min: Decimal, max: Decimal) -> Self {
        CalcError::OutOfRange {
            field: field.to_string(),
            value,
            min,
            max,
        }
    }

    pub(crate) fn overflow(what: &str) -> Self {
        CalcError::CalculationError {
            message: format!("{} overflows", what),
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::InvalidConfiguration {
            message: e.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
