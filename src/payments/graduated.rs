use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{AmortizationConfig, GraduatedConfig};
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::interest::monthly_interest;

use super::amortization::{level_payment, validate_terms, AmortizationRow};

/// stepped-payment schedule generator
///
/// The first step pays a fraction of the level payment; each later step
/// raises it by a fixed share of that base. The last period always pays the
/// remaining balance plus its interest so the schedule closes at zero.
#[derive(Debug, Clone, Default)]
pub struct GraduatedScheduleGenerator {
    config: GraduatedConfig,
    limits: AmortizationConfig,
}

impl GraduatedScheduleGenerator {
    pub fn new(config: GraduatedConfig, limits: AmortizationConfig) -> Self {
        Self { config, limits }
    }

    /// generate over the configured term
    pub fn generate(&self, principal: Money, annual_rate: Rate) -> Result<Vec<AmortizationRow>> {
        self.generate_for_term(principal, annual_rate, self.config.term_months)
    }

    pub fn generate_for_term(
        &self,
        principal: Money,
        annual_rate: Rate,
        term_months: u32,
    ) -> Result<Vec<AmortizationRow>> {
        self.config.validate()?;
        validate_terms(annual_rate, term_months, self.limits.max_term_months)?;

        let monthly_rate = annual_rate.monthly_rate();
        let base_payment =
            level_payment(principal, monthly_rate, term_months)? * self.config.base_payment_factor;

        let mut schedule = Vec::with_capacity(term_months as usize);
        let mut balance = principal;

        for period in 1..=term_months {
            let interest_portion = monthly_interest(balance, monthly_rate)?;

            let principal_portion = if period == term_months {
                // closing payment covers the balance plus this period's interest
                balance
            } else {
                (base_payment * self.step_multiplier(period) - interest_portion).min(balance)
            };
            balance = (balance - principal_portion).non_negative();

            schedule.push(AmortizationRow {
                period,
                payment: principal_portion + interest_portion,
                principal_portion,
                interest_portion,
                remaining_balance: balance,
            });
        }

        debug!(
            %principal,
            rate = %annual_rate,
            term_months,
            %base_payment,
            "graduated schedule generated"
        );

        Ok(schedule)
    }

    /// 1 + increase * step index for a 1-based period
    fn step_multiplier(&self, period: u32) -> Decimal {
        let step = (period - 1) / self.config.step_months;
        Decimal::ONE + self.config.step_increase * Decimal::from(step)
    }
}

/// graduated schedule with the default 24-month steps
pub fn graduated_schedule(principal: Money, annual_rate: Rate, term_months: u32) -> Result<Vec<AmortizationRow>> {
    GraduatedScheduleGenerator::default().generate_for_term(principal, annual_rate, term_months)
}
