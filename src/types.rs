use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// unique identifier for a debt in a payoff plan
pub type DebtId = Uuid;

/// debt targeting order for the payoff simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PayoffStrategy {
    /// smallest balance first
    Snowball,
    /// highest interest rate first
    #[default]
    Avalanche,
}

impl PayoffStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayoffStrategy::Snowball => "snowball",
            PayoffStrategy::Avalanche => "avalanche",
        }
    }

    /// the other strategy, for side-by-side comparison
    pub fn other(&self) -> PayoffStrategy {
        match self {
            PayoffStrategy::Snowball => PayoffStrategy::Avalanche,
            PayoffStrategy::Avalanche => PayoffStrategy::Snowball,
        }
    }
}

impl fmt::Display for PayoffStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayoffStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "snowball" => Ok(PayoffStrategy::Snowball),
            "avalanche" => Ok(PayoffStrategy::Avalanche),
            other => Err(format!("unknown payoff strategy: {other}")),
        }
    }
}

/// student loan repayment plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RepaymentPlan {
    /// level payments over 10 years
    #[default]
    Standard,
    /// level payments over 25 years
    Extended,
    /// payments stepping up every 2 years over 10 years
    Graduated,
}

impl RepaymentPlan {
    pub const ALL: [RepaymentPlan; 3] = [
        RepaymentPlan::Standard,
        RepaymentPlan::Extended,
        RepaymentPlan::Graduated,
    ];

    pub fn term_months(&self) -> u32 {
        match self {
            RepaymentPlan::Standard => 120,
            RepaymentPlan::Extended => 300,
            RepaymentPlan::Graduated => 120,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RepaymentPlan::Standard => "standard",
            RepaymentPlan::Extended => "extended",
            RepaymentPlan::Graduated => "graduated",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RepaymentPlan::Standard => "Standard (10 years)",
            RepaymentPlan::Extended => "Extended (25 years)",
            RepaymentPlan::Graduated => "Graduated (10 years)",
        }
    }
}

impl FromStr for RepaymentPlan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(RepaymentPlan::Standard),
            "extended" => Ok(RepaymentPlan::Extended),
            "graduated" => Ok(RepaymentPlan::Graduated),
            other => Err(format!("unknown repayment plan: {other}")),
        }
    }
}
