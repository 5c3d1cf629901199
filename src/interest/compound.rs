use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GrowthConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{CalcError, Result};

/// compounding frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CompoundingFrequency {
    Annual,
    Quarterly,
    #[default]
    Monthly,
    Daily,
}

impl CompoundingFrequency {
    /// get number of compounding periods per year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            CompoundingFrequency::Annual => 1,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Monthly => 12,
            CompoundingFrequency::Daily => 365,
        }
    }

    pub fn from_periods_per_year(periods: u32) -> Result<Self> {
        match periods {
            1 => Ok(CompoundingFrequency::Annual),
            4 => Ok(CompoundingFrequency::Quarterly),
            12 => Ok(CompoundingFrequency::Monthly),
            365 => Ok(CompoundingFrequency::Daily),
            _ => Err(CalcError::UnsupportedCompounding { periods }),
        }
    }
}

/// balance snapshot at the end of a year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlySnapshot {
    pub year: u32,
    pub balance: Money,
    pub cumulative_contributions: Money,
    pub cumulative_interest: Money,
}

/// compound growth projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundGrowthResult {
    pub final_balance: Money,
    pub total_contributions: Money,
    pub total_interest: Money,
    pub yearly_breakdown: Vec<YearlySnapshot>,
}

impl CompoundGrowthResult {
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// engine for month-by-month compound growth
///
/// Contributions always land monthly; only the cadence at which growth is
/// applied follows the nominal compounding frequency.
#[derive(Debug, Clone, Default)]
pub struct CompoundGrowthEngine {
    config: GrowthConfig,
}

impl CompoundGrowthEngine {
    pub fn new(config: GrowthConfig) -> Self {
        Self { config }
    }

    /// project balance growth over `years`
    pub fn project(
        &self,
        initial: Money,
        monthly_contribution: Money,
        annual_rate: Rate,
        years: u32,
        frequency: CompoundingFrequency,
    ) -> Result<CompoundGrowthResult> {
        if annual_rate.is_negative() {
            return Err(CalcError::InvalidInterestRate { rate: annual_rate });
        }
        if years > self.config.max_years {
            return Err(CalcError::InvalidDuration { years });
        }

        let cadence = GrowthCadence::new(frequency, annual_rate, self.config.days_per_month)?;

        let mut balance = initial;
        let mut total_contributions = initial;
        let mut yearly_breakdown = Vec::with_capacity(years as usize);

        for year in 1..=years {
            for month in 1..=12 {
                balance += monthly_contribution;
                total_contributions += monthly_contribution;

                if let Some(factor) = cadence.factor_for(month) {
                    balance = balance.checked_mul(factor).ok_or_else(|| {
                        CalcError::CalculationError {
                            message: format!("balance overflow in year {year}"),
                        }
                    })?;
                }
            }

            yearly_breakdown.push(YearlySnapshot {
                year,
                balance,
                cumulative_contributions: total_contributions,
                cumulative_interest: balance - total_contributions,
            });
        }

        debug!(
            years,
            frequency = ?frequency,
            final_balance = %balance,
            "compound growth projected"
        );

        Ok(CompoundGrowthResult {
            final_balance: balance,
            total_contributions,
            total_interest: balance - total_contributions,
            yearly_breakdown,
        })
    }
}

/// growth factor and the months of the year it applies to
struct GrowthCadence {
    factor: Decimal,
    frequency: CompoundingFrequency,
}

impl GrowthCadence {
    fn new(frequency: CompoundingFrequency, annual_rate: Rate, days_per_month: Decimal) -> Result<Self> {
        let periodic = annual_rate.periodic_rate(frequency.periods_per_year()).as_decimal();
        let base = Decimal::ONE + periodic;

        let factor = match frequency {
            CompoundingFrequency::Daily if annual_rate.is_zero() => Decimal::ONE,
            CompoundingFrequency::Daily => {
                base.checked_powd(days_per_month)
                    .ok_or_else(|| CalcError::CalculationError {
                        message: "daily growth factor overflow".to_string(),
                    })?
            }
            _ => base,
        };

        Ok(Self { factor, frequency })
    }

    /// factor to apply after the contribution in `month` (1-12)
    fn factor_for(&self, month: u32) -> Option<Decimal> {
        let applies = match self.frequency {
            CompoundingFrequency::Monthly | CompoundingFrequency::Daily => true,
            CompoundingFrequency::Quarterly => month % 3 == 0,
            CompoundingFrequency::Annual => month == 12,
        };
        applies.then_some(self.factor)
    }
}

/// project compound growth with default engine settings
pub fn compound_growth(
    initial: Money,
    monthly_contribution: Money,
    annual_rate: Rate,
    years: u32,
    frequency: CompoundingFrequency,
) -> Result<CompoundGrowthResult> {
    CompoundGrowthEngine::default().project(initial, monthly_contribution, annual_rate, years, frequency)
}
