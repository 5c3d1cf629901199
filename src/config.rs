use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{CalcError, Result};

/// engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub amortization: AmortizationConfig,
    pub growth: GrowthConfig,
    pub graduated: GraduatedConfig,
    pub payoff: PayoffConfig,
}

/// fixed-payment amortization limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmortizationConfig {
    pub max_term_months: u32,
}

/// compound growth settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthConfig {
    /// month length used for daily compounding
    pub days_per_month: Decimal,
    pub max_years: u32,
}

/// graduated repayment plan shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraduatedConfig {
    pub term_months: u32,
    pub step_months: u32,
    /// payment increase per step, as a fraction of the base payment
    pub step_increase: Decimal,
    /// share of the level payment paid during the first step
    pub base_payment_factor: Decimal,
}

/// debt payoff simulation bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayoffConfig {
    /// safety bound on simulated months
    pub month_cap: u32,
    /// balances at or below this are treated as paid off
    pub paid_off_threshold: Money,
}

impl Default for AmortizationConfig {
    fn default() -> Self {
        Self { max_term_months: 1200 }
    }
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            days_per_month: dec!(30.44),
            max_years: 100,
        }
    }
}

impl Default for GraduatedConfig {
    fn default() -> Self {
        Self {
            term_months: 120,
            step_months: 24,
            step_increase: dec!(0.2),
            base_payment_factor: dec!(0.6),
        }
    }
}

impl Default for PayoffConfig {
    fn default() -> Self {
        Self {
            month_cap: 360,
            paid_off_threshold: Money::CENT,
        }
    }
}

impl EngineConfig {
    /// load from json, missing sections fall back to defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json).map_err(|e| {
            CalcError::InvalidConfiguration {
                message: e.to_string(),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.amortization.max_term_months == 0 {
            return Err(invalid("amortization.max_term_months must be positive"));
        }
        if self.growth.days_per_month <= Decimal::ZERO {
            return Err(invalid("growth.days_per_month must be positive"));
        }
        self.graduated.validate()?;
        if self.payoff.month_cap == 0 {
            return Err(invalid("payoff.month_cap must be positive"));
        }
        if self.payoff.paid_off_threshold.is_negative() {
            return Err(invalid("payoff.paid_off_threshold cannot be negative"));
        }
        Ok(())
    }
}

impl GraduatedConfig {
    pub fn validate(&self) -> Result<()> {
        if self.term_months == 0 || self.step_months == 0 {
            return Err(invalid("graduated term and step must be positive"));
        }
        if self.base_payment_factor <= Decimal::ZERO || self.step_increase < Decimal::ZERO {
            return Err(invalid("graduated payment factors must be positive"));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> CalcError {
    CalcError::InvalidConfiguration {
        message: message.to_string(),
    }
}
