pub mod amortization;
pub mod debt_payoff;
pub mod graduated;

pub use amortization::{amortize, AmortizationCalculator, AmortizationRow, LoanResult};
pub use debt_payoff::{
    simulate_debt_payoff, DebtItem, DebtMonthEntry, DebtPayoffResult, DebtPayoffSimulator,
    PayoffMilestone, PayoffMonth, PayoffOutcome, StrategyComparison,
};
pub use graduated::{graduated_schedule, GraduatedScheduleGenerator};
