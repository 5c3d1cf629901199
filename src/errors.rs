use thiserror::Error;

use crate::decimal::{Money, Rate};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("invalid term: {months} months")]
    InvalidTerm {
        months: u32,
    },

    #[error("invalid duration: {years} years")]
    InvalidDuration {
        years: u32,
    },

    #[error("invalid interest rate: {rate}")]
    InvalidInterestRate {
        rate: Rate,
    },

    #[error("invalid {field}: {amount}")]
    InvalidAmount {
        field: &'static str,
        amount: Money,
    },

    #[error("unsupported compounding frequency: {periods} periods per year")]
    UnsupportedCompounding {
        periods: u32,
    },

    #[error("debts not paid off after {months} months, {remaining} remaining")]
    NonConvergentPayoff {
        months: u32,
        remaining: Money,
    },

    #[error("invalid share parameter {key}: {message}")]
    InvalidShareParameter {
        key: String,
        message: String,
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

pub type Result<T> = std::result::Result<T, CalcError>;
