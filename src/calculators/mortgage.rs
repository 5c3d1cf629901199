use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{CalcError, Result};
use crate::payments::{AmortizationCalculator, AmortizationRow};

/// home purchase inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageInput {
    pub home_price: Money,
    pub down_payment: Money,
    pub loan_term_years: u32,
    pub interest_rate: Rate,
    pub property_tax_annual: Money,
    pub home_insurance_annual: Money,
}

impl Default for MortgageInput {
    fn default() -> Self {
        Self {
            home_price: Money::from_major(350_000),
            down_payment: Money::from_major(70_000),
            loan_term_years: 30,
            interest_rate: Rate::from_percent(dec!(6.5)),
            property_tax_annual: Money::from_major(3_600),
            home_insurance_annual: Money::from_major(1_200),
        }
    }
}

/// mortgage breakdown; the schedule covers principal and interest only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageResult {
    pub principal: Money,
    pub monthly_principal_interest: Money,
    pub monthly_tax: Money,
    pub monthly_insurance: Money,
    /// principal and interest plus escrow
    pub monthly_payment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
    pub down_payment_percent: Decimal,
    pub schedule: Vec<AmortizationRow>,
}

impl MortgageInput {
    pub fn principal(&self) -> Money {
        (self.home_price - self.down_payment).non_negative()
    }

    pub fn term_months(&self) -> Result<u32> {
        self.loan_term_years
            .checked_mul(12)
            .ok_or(CalcError::InvalidDuration { years: self.loan_term_years })
    }

    /// down payment as a percentage of the home price
    pub fn down_payment_percent(&self) -> Decimal {
        if self.home_price.is_positive() {
            self.down_payment.as_decimal() / self.home_price.as_decimal() * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        }
    }

    pub fn calculate(&self) -> Result<MortgageResult> {
        self.calculate_with(&EngineConfig::default())
    }

    pub fn calculate_with(&self, config: &EngineConfig) -> Result<MortgageResult> {
        let principal = self.principal();
        let months = self.term_months()?;
        let loan = AmortizationCalculator::new(config.amortization.clone())
            .calculate(principal, self.interest_rate, months)?;

        let monthly_tax = self.property_tax_annual / dec!(12);
        let monthly_insurance = self.home_insurance_annual / dec!(12);
        let monthly_payment = loan.monthly_payment + monthly_tax + monthly_insurance;

        debug!(%principal, months, %monthly_payment, "mortgage calculated");

        Ok(MortgageResult {
            principal,
            monthly_principal_interest: loan.monthly_payment,
            monthly_tax,
            monthly_insurance,
            monthly_payment,
            total_payment: monthly_payment * Decimal::from(months),
            total_interest: loan.total_interest,
            down_payment_percent: self.down_payment_percent(),
            schedule: loan.schedule,
        })
    }
}
