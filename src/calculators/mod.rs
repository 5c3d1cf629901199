//! input-level calculators layered over the engines
//!
//! Each input carries the defaults a fresh calculator starts from and
//! converts itself into an engine call. Rates are carried as `Rate`
//! fractions; share links encode them as percentages.

pub mod auto_loan;
pub mod compound_interest;
pub mod debt_payoff;
pub mod mortgage;
pub mod personal_loan;
pub mod student_loan;
pub mod tip;

pub use auto_loan::{AutoLoanInput, LOAN_TERMS};
pub use compound_interest::CompoundInterestInput;
pub use debt_payoff::DebtPayoffInput;
pub use mortgage::{MortgageInput, MortgageResult};
pub use personal_loan::PersonalLoanInput;
pub use student_loan::{
    calculate_student_loan, compare_student_loan_plans, StudentLoanCalculator, StudentLoanInput,
    StudentLoanResult,
};
pub use tip::{TipInput, TipResult, TIP_PRESETS};
