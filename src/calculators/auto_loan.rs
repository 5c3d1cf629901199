use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::payments::{AmortizationCalculator, LoanResult};

/// loan terms offered by the auto loan calculator, in months
pub const LOAN_TERMS: [u32; 5] = [36, 48, 60, 72, 84];

/// vehicle purchase inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoLoanInput {
    pub vehicle_price: Money,
    pub down_payment: Money,
    pub trade_in_value: Money,
    pub loan_term_months: u32,
    pub interest_rate: Rate,
}

impl Default for AutoLoanInput {
    fn default() -> Self {
        Self {
            vehicle_price: Money::from_major(35_000),
            down_payment: Money::from_major(5_000),
            trade_in_value: Money::ZERO,
            loan_term_months: 60,
            interest_rate: Rate::from_percent(dec!(5.5)),
        }
    }
}

impl AutoLoanInput {
    /// amount financed after down payment and trade-in
    pub fn principal(&self) -> Money {
        (self.vehicle_price - self.down_payment - self.trade_in_value).non_negative()
    }

    pub fn calculate(&self) -> Result<LoanResult> {
        self.calculate_with(&EngineConfig::default())
    }

    pub fn calculate_with(&self, config: &EngineConfig) -> Result<LoanResult> {
        AmortizationCalculator::new(config.amortization.clone()).calculate(
            self.principal(),
            self.interest_rate,
            self.loan_term_months,
        )
    }
}
