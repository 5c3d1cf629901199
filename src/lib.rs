pub mod calculators;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod interest;
pub mod payments;
pub mod share;
pub mod types;

// re-export key types
pub use calculators::{
    compare_student_loan_plans, AutoLoanInput, CompoundInterestInput, DebtPayoffInput,
    MortgageInput, MortgageResult, PersonalLoanInput, StudentLoanCalculator, StudentLoanInput,
    StudentLoanResult, TipInput, TipResult,
};
pub use config::{AmortizationConfig, EngineConfig, GraduatedConfig, GrowthConfig, PayoffConfig};
pub use decimal::{Money, Rate};
pub use errors::{CalcError, Result};
pub use interest::{
    compound_growth, CompoundGrowthEngine, CompoundGrowthResult, CompoundingFrequency,
    YearlySnapshot,
};
pub use payments::{
    amortize, graduated_schedule, simulate_debt_payoff, AmortizationCalculator, AmortizationRow,
    DebtItem, DebtMonthEntry, DebtPayoffResult, DebtPayoffSimulator, GraduatedScheduleGenerator,
    LoanResult, PayoffMilestone, PayoffMonth, PayoffOutcome, StrategyComparison,
};
pub use share::{ShareQuery, Shareable, DEFAULT_SITE_URL};
pub use types::{DebtId, PayoffStrategy, RepaymentPlan};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
