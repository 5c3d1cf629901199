use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::payments::{AmortizationCalculator, LoanResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalLoanInput {
    pub loan_amount: Money,
    pub loan_term_months: u32,
    pub interest_rate: Rate,
}

impl Default for PersonalLoanInput {
    fn default() -> Self {
        Self {
            loan_amount: Money::from_major(15_000),
            loan_term_months: 36,
            interest_rate: Rate::from_percent(dec!(8.5)),
        }
    }
}

impl PersonalLoanInput {
    pub fn calculate(&self) -> Result<LoanResult> {
        self.calculate_with(&EngineConfig::default())
    }

    pub fn calculate_with(&self, config: &EngineConfig) -> Result<LoanResult> {
        AmortizationCalculator::new(config.amortization.clone()).calculate(
            self.loan_amount,
            self.interest_rate,
            self.loan_term_months,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;

    #[test]
    fn test_default_personal_loan() {
        let result = PersonalLoanInput::default().calculate().unwrap();
        assert_eq!(result.monthly_payment.round_currency(), Money::from_decimal(dec!(473.51)));
        assert_eq!(result.schedule.len(), 36);
        assert!(result.total_interest > Money::from_major(2_000));
    }

    #[test]
    fn test_term_ceiling_from_config() {
        let mut config = EngineConfig::default();
        config.amortization.max_term_months = 24;

        let err = PersonalLoanInput::default().calculate_with(&config).unwrap_err();
        assert_eq!(err, CalcError::InvalidTerm { months: 36 });
    }
}
