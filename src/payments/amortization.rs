use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AmortizationConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{CalcError, Result};
use crate::interest::{compound_factor, monthly_interest, overflow};

/// one period of an amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based period number
    pub period: u32,
    pub payment: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub remaining_balance: Money,
}

/// loan summary with its full schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    /// first period's payment
    pub monthly_payment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
    pub schedule: Vec<AmortizationRow>,
}

impl LoanResult {
    /// summarize a schedule for the given original principal
    pub fn from_schedule(principal: Money, schedule: Vec<AmortizationRow>) -> Self {
        let monthly_payment = schedule.first().map(|r| r.payment).unwrap_or(Money::ZERO);
        let total_payment: Money = schedule.iter().map(|r| r.payment).sum();

        Self {
            monthly_payment,
            total_payment,
            total_interest: (total_payment - principal).non_negative(),
            schedule,
        }
    }

    /// get row for specific period
    pub fn row(&self, period: u32) -> Option<&AmortizationRow> {
        period
            .checked_sub(1)
            .and_then(|index| self.schedule.get(index as usize))
    }

    /// remaining balance after the given period
    pub fn balance_after(&self, period: u32) -> Option<Money> {
        self.row(period).map(|r| r.remaining_balance)
    }

    pub fn total_principal(&self) -> Money {
        self.schedule.iter().map(|r| r.principal_portion).sum()
    }

    pub fn term_months(&self) -> u32 {
        self.schedule.len() as u32
    }

    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// fixed-payment amortization calculator
#[derive(Debug, Clone, Default)]
pub struct AmortizationCalculator {
    config: AmortizationConfig,
}

impl AmortizationCalculator {
    pub fn new(config: AmortizationConfig) -> Self {
        Self { config }
    }

    /// level monthly payment that fully amortizes the loan
    pub fn level_payment(&self, principal: Money, annual_rate: Rate, term_months: u32) -> Result<Money> {
        self.validate(annual_rate, term_months)?;
        level_payment(principal, annual_rate.monthly_rate(), term_months)
    }

    /// calculate full amortization schedule
    pub fn calculate(&self, principal: Money, annual_rate: Rate, term_months: u32) -> Result<LoanResult> {
        self.validate(annual_rate, term_months)?;

        let monthly_rate = annual_rate.monthly_rate();
        let payment = level_payment(principal, monthly_rate, term_months)?;

        let mut schedule = Vec::with_capacity(term_months as usize);
        let mut balance = principal;

        for period in 1..=term_months {
            let interest_portion = monthly_interest(balance, monthly_rate)?;
            let principal_portion = payment - interest_portion;
            balance = (balance - principal_portion).non_negative();

            schedule.push(AmortizationRow {
                period,
                payment,
                principal_portion,
                interest_portion,
                remaining_balance: balance,
            });
        }

        debug!(
            %principal,
            rate = %annual_rate,
            term_months,
            %payment,
            "amortization schedule generated"
        );

        Ok(LoanResult::from_schedule(principal, schedule))
    }

    pub(crate) fn validate(&self, annual_rate: Rate, term_months: u32) -> Result<()> {
        validate_terms(annual_rate, term_months, self.config.max_term_months)
    }
}

pub(crate) fn validate_terms(annual_rate: Rate, term_months: u32, max_term_months: u32) -> Result<()> {
    if term_months == 0 || term_months > max_term_months {
        return Err(CalcError::InvalidTerm { months: term_months });
    }
    if annual_rate.is_negative() {
        return Err(CalcError::InvalidInterestRate { rate: annual_rate });
    }
    Ok(())
}

/// annuity payment P * r(1+r)^n / ((1+r)^n - 1), or P / n without interest
pub(crate) fn level_payment(principal: Money, monthly_rate: Rate, months: u32) -> Result<Money> {
    if months == 0 {
        return Err(CalcError::InvalidTerm { months });
    }

    if monthly_rate.is_zero() {
        return Ok(principal / Decimal::from(months));
    }

    let r = monthly_rate.as_decimal();
    let compound = compound_factor(Decimal::ONE + r, months)?;

    let numerator = principal
        .as_decimal()
        .checked_mul(r)
        .and_then(|v| v.checked_mul(compound))
        .ok_or_else(|| overflow("level payment"))?;
    let denominator = compound - Decimal::ONE;

    numerator
        .checked_div(denominator)
        .map(Money::from_decimal)
        .ok_or_else(|| overflow("level payment"))
}

/// amortize a loan with default limits
pub fn amortize(principal: Money, annual_rate: Rate, term_months: u32) -> Result<LoanResult> {
    AmortizationCalculator::default().calculate(principal, annual_rate, term_months)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn tolerance() -> Money {
        Money::from_decimal(dec!(0.000001))
    }

    #[test]
    fn test_thirty_year_mortgage_reference() {
        let result = amortize(Money::from_major(200_000), Rate::from_percentage(6), 360).unwrap();

        assert_eq!(result.monthly_payment.round_currency(), Money::from_decimal(dec!(1199.10)));
        assert_eq!(result.schedule.len(), 360);
        assert!(result.schedule[359].remaining_balance < tolerance());
    }

    #[test]
    fn test_rows_split_payment_exactly() {
        let result = amortize(Money::from_major(25_000), Rate::from_percent(dec!(7.25)), 60).unwrap();

        for (i, row) in result.schedule.iter().enumerate() {
            assert_eq!(row.period, i as u32 + 1);
            let split = row.principal_portion + row.interest_portion;
            assert!((split - row.payment).abs() < tolerance());
            assert!(!row.remaining_balance.is_negative());
        }
        assert!(result.schedule.last().unwrap().remaining_balance < tolerance());
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let result = amortize(Money::from_major(10_000), Rate::ZERO, 12).unwrap();

        assert_eq!(result.monthly_payment.round_currency(), Money::from_decimal(dec!(833.33)));
        assert_eq!(result.total_interest, Money::ZERO);
        for row in &result.schedule {
            assert_eq!(row.payment, Money::from_major(10_000) / dec!(12));
            assert_eq!(row.interest_portion, Money::ZERO);
        }
    }

    #[test]
    fn test_interest_increases_with_rate() {
        let principal = Money::from_major(100_000);
        let mut previous = Money::ZERO;
        for percent in [0u32, 3, 6, 9] {
            let result = amortize(principal, Rate::from_percentage(percent), 120).unwrap();
            if percent > 0 {
                assert!(result.total_interest > previous);
            }
            previous = result.total_interest;
        }
    }

    #[test]
    fn test_totals() {
        let result = amortize(Money::from_major(100_000), Rate::from_percentage(6), 120).unwrap();

        assert!((result.total_payment - result.monthly_payment * dec!(120)).abs() < tolerance());
        assert_eq!(result.total_interest.round_currency(), Money::from_decimal(dec!(33224.60)));
        assert!((result.total_principal() - Money::from_major(100_000)).abs() < tolerance());
    }

    #[test]
    fn test_row_lookup() {
        let result = amortize(Money::from_major(12_000), Rate::ZERO, 12).unwrap();

        assert!(result.row(0).is_none());
        assert_eq!(result.row(1).unwrap().period, 1);
        assert_eq!(result.balance_after(6), Some(Money::from_major(6_000)));
        assert!(result.row(13).is_none());
        assert_eq!(result.term_months(), 12);
    }

    #[test]
    fn test_invalid_term() {
        assert_eq!(
            amortize(Money::from_major(1_000), Rate::from_percentage(5), 0),
            Err(CalcError::InvalidTerm { months: 0 })
        );
        assert_eq!(
            amortize(Money::from_major(1_000), Rate::from_percentage(5), 1201),
            Err(CalcError::InvalidTerm { months: 1201 })
        );
    }

    #[test]
    fn test_negative_rate_rejected() {
        let rate = Rate::from_decimal(dec!(-0.05));
        assert_eq!(
            amortize(Money::from_major(1_000), rate, 12),
            Err(CalcError::InvalidInterestRate { rate })
        );
    }

    #[test]
    fn test_payment_overflow_is_an_error() {
        let err = amortize(Money::from_decimal(Decimal::MAX), Rate::from_percentage(24), 360).unwrap_err();
        assert!(matches!(err, CalcError::CalculationError { .. }));
    }

    #[test]
    fn test_zero_principal() {
        let result = amortize(Money::ZERO, Rate::from_percentage(5), 24).unwrap();
        assert_eq!(result.monthly_payment, Money::ZERO);
        assert_eq!(result.total_interest, Money::ZERO);
        assert_eq!(result.schedule.len(), 24);
    }

    #[test]
    fn test_level_payment_matches_schedule() {
        let calculator = AmortizationCalculator::default();
        let payment = calculator
            .level_payment(Money::from_major(35_000), Rate::from_percent(dec!(5.5)), 120)
            .unwrap();
        assert_eq!(payment.round_currency(), Money::from_decimal(dec!(379.84)));
    }
}
