pub mod compound;

use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::{CalcError, Result};

pub use compound::{
    compound_growth, CompoundGrowthEngine, CompoundGrowthResult, CompoundingFrequency,
    YearlySnapshot,
};

/// interest accrued on a balance for one monthly period
pub fn monthly_interest(balance: Money, monthly_rate: Rate) -> Result<Money> {
    balance
        .checked_mul(monthly_rate.as_decimal())
        .ok_or_else(|| overflow("monthly interest"))
}

/// balance plus one period's interest
pub fn accrue_monthly(balance: Money, monthly_rate: Rate) -> Result<Money> {
    let interest = monthly_interest(balance, monthly_rate)?;
    balance
        .checked_add(interest)
        .ok_or_else(|| overflow("accrued balance"))
}

pub(crate) fn overflow(what: &str) -> CalcError {
    CalcError::CalculationError {
        message: format!("{what} overflow"),
    }
}

/// calculate base^periods, failing instead of overflowing
pub fn compound_factor(base: Decimal, periods: u32) -> Result<Decimal> {
    let mut factor = Decimal::ONE;
    for _ in 0..periods {
        factor = factor.checked_mul(base).ok_or_else(|| CalcError::CalculationError {
            message: format!("compound factor overflow after {periods} periods"),
        })?;
    }
    Ok(factor)
}
