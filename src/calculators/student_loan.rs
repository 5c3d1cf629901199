use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::payments::{AmortizationCalculator, AmortizationRow, GraduatedScheduleGenerator, LoanResult};
use crate::types::RepaymentPlan;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentLoanInput {
    pub loan_amount: Money,
    pub interest_rate: Rate,
    pub plan: RepaymentPlan,
}

impl Default for StudentLoanInput {
    fn default() -> Self {
        Self {
            loan_amount: Money::from_major(35_000),
            interest_rate: Rate::from_percent(dec!(5.5)),
            plan: RepaymentPlan::Standard,
        }
    }
}

/// outcome of one repayment plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentLoanResult {
    pub plan: RepaymentPlan,
    pub plan_label: String,
    /// first month's payment
    pub monthly_payment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
    pub schedule: Vec<AmortizationRow>,
}

/// runs repayment plans against the level and graduated engines
#[derive(Debug, Clone, Default)]
pub struct StudentLoanCalculator {
    amortization: AmortizationCalculator,
    graduated: GraduatedScheduleGenerator,
}

impl StudentLoanCalculator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            amortization: AmortizationCalculator::new(config.amortization.clone()),
            graduated: GraduatedScheduleGenerator::new(
                config.graduated.clone(),
                config.amortization.clone(),
            ),
        }
    }

    pub fn calculate(&self, input: &StudentLoanInput) -> Result<StudentLoanResult> {
        let loan = match input.plan {
            RepaymentPlan::Standard | RepaymentPlan::Extended => self.amortization.calculate(
                input.loan_amount,
                input.interest_rate,
                input.plan.term_months(),
            )?,
            // term comes from the graduated config
            RepaymentPlan::Graduated => {
                let schedule = self.graduated.generate(input.loan_amount, input.interest_rate)?;
                LoanResult::from_schedule(input.loan_amount, schedule)
            }
        };

        debug!(
            plan = input.plan.as_str(),
            monthly_payment = %loan.monthly_payment,
            total_interest = %loan.total_interest,
            "student loan plan calculated"
        );

        Ok(StudentLoanResult {
            plan: input.plan,
            plan_label: input.plan.label().to_string(),
            monthly_payment: loan.monthly_payment,
            total_payment: loan.total_payment,
            total_interest: loan.total_interest,
            schedule: loan.schedule,
        })
    }

    /// every plan for the same loan, in `RepaymentPlan::ALL` order
    pub fn compare(&self, loan_amount: Money, interest_rate: Rate) -> Result<Vec<StudentLoanResult>> {
        RepaymentPlan::ALL
            .iter()
            .map(|&plan| {
                self.calculate(&StudentLoanInput {
                    loan_amount,
                    interest_rate,
                    plan,
                })
            })
            .collect()
    }
}

impl StudentLoanInput {
    pub fn calculate(&self) -> Result<StudentLoanResult> {
        calculate_student_loan(self)
    }
}

pub fn calculate_student_loan(input: &StudentLoanInput) -> Result<StudentLoanResult> {
    StudentLoanCalculator::default().calculate(input)
}

pub fn compare_student_loan_plans(loan_amount: Money, interest_rate: Rate) -> Result<Vec<StudentLoanResult>> {
    StudentLoanCalculator::default().compare(loan_amount, interest_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_plan() {
        let result = StudentLoanInput::default().calculate().unwrap();

        assert_eq!(result.plan, RepaymentPlan::Standard);
        assert_eq!(result.plan_label, "Standard (10 years)");
        assert_eq!(result.monthly_payment.round_currency(), Money::from_decimal(dec!(379.84)));
        assert_eq!(result.schedule.len(), 120);
    }

    #[test]
    fn test_compare_all_plans() {
        let results = compare_student_loan_plans(Money::from_major(35_000), Rate::from_percent(dec!(5.5))).unwrap();
        assert_eq!(results.len(), 3);

        let standard = &results[0];
        let extended = &results[1];
        let graduated = &results[2];

        assert_eq!(extended.plan_label, "Extended (25 years)");
        assert_eq!(extended.schedule.len(), 300);
        assert_eq!(extended.monthly_payment.round_currency(), Money::from_decimal(dec!(214.93)));

        // lower payments now cost more interest overall
        assert!(extended.monthly_payment < standard.monthly_payment);
        assert!(extended.total_interest > standard.total_interest);
        assert!(graduated.monthly_payment < standard.monthly_payment);
        assert!(graduated.total_interest > standard.total_interest);
    }

    #[test]
    fn test_graduated_plan_totals() {
        let input = StudentLoanInput {
            plan: RepaymentPlan::Graduated,
            ..StudentLoanInput::default()
        };
        let result = input.calculate().unwrap();

        assert_eq!(result.plan_label, "Graduated (10 years)");
        assert_eq!(result.total_payment.round_currency(), Money::from_decimal(dec!(49569.69)));
        assert_eq!(result.total_interest, result.total_payment - Money::from_major(35_000));
        assert_eq!(result.schedule.last().unwrap().remaining_balance, Money::ZERO);
    }

    #[test]
    fn test_graduated_follows_config() {
        let mut config = EngineConfig::default();
        config.graduated.step_months = 12;

        let calculator = StudentLoanCalculator::new(&config);
        let input = StudentLoanInput {
            plan: RepaymentPlan::Graduated,
            ..StudentLoanInput::default()
        };
        let result = calculator.calculate(&input).unwrap();
        assert!(result.schedule[12].payment > result.schedule[11].payment);
    }

    #[test]
    fn test_graduated_term_from_config() {
        let mut config = EngineConfig::default();
        config.graduated.term_months = 60;

        let input = StudentLoanInput {
            plan: RepaymentPlan::Graduated,
            ..StudentLoanInput::default()
        };
        let result = StudentLoanCalculator::new(&config).calculate(&input).unwrap();
        assert_eq!(result.schedule.len(), 60);
        assert_eq!(result.schedule.last().unwrap().remaining_balance, Money::ZERO);
    }
}
