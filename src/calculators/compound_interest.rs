use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::interest::{CompoundGrowthEngine, CompoundGrowthResult, CompoundingFrequency};

/// savings growth inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundInterestInput {
    pub initial_investment: Money,
    pub monthly_contribution: Money,
    pub annual_rate: Rate,
    pub years: u32,
    pub frequency: CompoundingFrequency,
}

impl Default for CompoundInterestInput {
    fn default() -> Self {
        Self {
            initial_investment: Money::from_major(10_000),
            monthly_contribution: Money::from_major(500),
            annual_rate: Rate::from_percent(dec!(7)),
            years: 20,
            frequency: CompoundingFrequency::Monthly,
        }
    }
}

impl CompoundInterestInput {
    pub fn calculate(&self) -> Result<CompoundGrowthResult> {
        self.calculate_with(&EngineConfig::default())
    }

    pub fn calculate_with(&self, config: &EngineConfig) -> Result<CompoundGrowthResult> {
        CompoundGrowthEngine::new(config.growth.clone()).project(
            self.initial_investment,
            self.monthly_contribution,
            self.annual_rate,
            self.years,
            self.frequency,
        )
    }
}
