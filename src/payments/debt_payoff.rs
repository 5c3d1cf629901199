use chrono::{DateTime, Months, Utc};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::PayoffConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{CalcError, Result};
use crate::interest::{accrue_monthly, overflow};
use crate::types::{DebtId, PayoffStrategy};

/// a debt in a payoff plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtItem {
    pub id: DebtId,
    pub name: String,
    pub balance: Money,
    pub annual_rate: Rate,
    pub min_payment: Money,
}

impl DebtItem {
    /// create with a freshly generated id
    pub fn new(name: impl Into<String>, balance: Money, annual_rate: Rate, min_payment: Money) -> Self {
        Self::with_id(Uuid::new_v4(), name, balance, annual_rate, min_payment)
    }

    pub fn with_id(
        id: DebtId,
        name: impl Into<String>,
        balance: Money,
        annual_rate: Rate,
        min_payment: Money,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            balance,
            annual_rate,
            min_payment,
        }
    }
}

/// one debt's activity within a simulated month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtMonthEntry {
    pub debt_id: DebtId,
    pub name: String,
    pub payment: Money,
    pub balance: Money,
}

/// all debts for one simulated month, in strategy order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffMonth {
    pub month: u32,
    pub debts: Vec<DebtMonthEntry>,
    pub total_payment: Money,
}

impl PayoffMonth {
    pub fn remaining_balance(&self) -> Money {
        self.debts.iter().map(|d| d.balance).sum()
    }
}

/// month in which a debt was cleared
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffMilestone {
    pub debt_id: DebtId,
    pub name: String,
    pub month: u32,
}

/// how a simulation ended
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PayoffOutcome {
    /// every balance cleared
    PaidOff { months: u32 },
    /// month cap hit with balances outstanding
    CapReached { months: u32, remaining_balance: Money },
}

/// debt payoff simulation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtPayoffResult {
    pub strategy: PayoffStrategy,
    pub total_interest: Money,
    pub total_payment: Money,
    /// months simulated; only a real payoff duration when `outcome` is `PaidOff`
    pub payoff_months: u32,
    pub outcome: PayoffOutcome,
    pub original_balance: Money,
    pub payoff_order: Vec<PayoffMilestone>,
    pub schedule: Vec<PayoffMonth>,
}

impl DebtPayoffResult {
    pub fn is_paid_off(&self) -> bool {
        matches!(self.outcome, PayoffOutcome::PaidOff { .. })
    }

    /// payoff duration, or `NonConvergentPayoff` if the cap was hit
    pub fn require_paid_off(&self) -> Result<u32> {
        match self.outcome {
            PayoffOutcome::PaidOff { months } => Ok(months),
            PayoffOutcome::CapReached { months, remaining_balance } => {
                Err(CalcError::NonConvergentPayoff {
                    months,
                    remaining: remaining_balance,
                })
            }
        }
    }

    /// now + payoff months; `None` when the debts never clear
    pub fn payoff_date(&self, time_provider: &SafeTimeProvider) -> Option<DateTime<Utc>> {
        if !self.is_paid_off() {
            return None;
        }
        time_provider
            .now()
            .checked_add_months(Months::new(self.payoff_months))
    }

    /// payoff month formatted like "March 2027"
    pub fn payoff_date_label(&self, time_provider: &SafeTimeProvider) -> Option<String> {
        self.payoff_date(time_provider)
            .map(|date| date.format("%B %Y").to_string())
    }

    /// total remaining balance per month, starting with month 0
    pub fn balance_series(&self) -> Vec<Money> {
        std::iter::once(self.original_balance)
            .chain(self.schedule.iter().map(|m| m.remaining_balance().non_negative()))
            .collect()
    }

    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// snowball and avalanche results for the same inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyComparison {
    pub snowball: DebtPayoffResult,
    pub avalanche: DebtPayoffResult,
}

impl StrategyComparison {
    pub fn result(&self, strategy: PayoffStrategy) -> &DebtPayoffResult {
        match strategy {
            PayoffStrategy::Snowball => &self.snowball,
            PayoffStrategy::Avalanche => &self.avalanche,
        }
    }

    /// interest avoided by avalanche relative to snowball
    pub fn interest_savings(&self) -> Money {
        self.snowball.total_interest - self.avalanche.total_interest
    }

    /// months avalanche finishes ahead of snowball (negative if behind)
    pub fn months_saved(&self) -> i64 {
        i64::from(self.snowball.payoff_months) - i64::from(self.avalanche.payoff_months)
    }

    /// strategy with the lower total interest, snowball on ties
    pub fn recommended(&self) -> PayoffStrategy {
        match (self.snowball.is_paid_off(), self.avalanche.is_paid_off()) {
            (true, false) => PayoffStrategy::Snowball,
            (false, true) => PayoffStrategy::Avalanche,
            _ if self.avalanche.total_interest < self.snowball.total_interest => {
                PayoffStrategy::Avalanche
            }
            _ => PayoffStrategy::Snowball,
        }
    }
}

/// month-by-month debt payoff simulator
///
/// The target order is fixed when the simulation starts and is not
/// re-evaluated as balances change.
#[derive(Debug, Clone, Default)]
pub struct DebtPayoffSimulator {
    config: PayoffConfig,
}

/// simulator-owned copy of a debt
struct WorkingDebt {
    id: DebtId,
    name: String,
    balance: Money,
    monthly_rate: Rate,
    min_payment: Money,
    cleared_in: Option<u32>,
}

impl DebtPayoffSimulator {
    pub fn new(config: PayoffConfig) -> Self {
        Self { config }
    }

    pub fn simulate(
        &self,
        debts: &[DebtItem],
        extra_payment: Money,
        strategy: PayoffStrategy,
    ) -> Result<DebtPayoffResult> {
        validate_inputs(debts, extra_payment)?;

        let threshold = self.config.paid_off_threshold;
        let mut working = ordered_working_copies(debts, strategy);
        for debt in working.iter_mut().filter(|d| d.balance <= threshold) {
            debt.cleared_in = Some(0);
        }

        let mut schedule = Vec::new();
        let mut month = 0;

        while working.iter().any(|d| d.balance > threshold) && month < self.config.month_cap {
            month += 1;
            let mut pool = extra_payment;
            let mut entries = Vec::with_capacity(working.len());

            // interest and minimum payments; cleared debts free their minimum
            for debt in working.iter_mut() {
                if debt.balance <= threshold {
                    pool = pool
                        .checked_add(debt.min_payment)
                        .ok_or_else(|| overflow("extra payment pool"))?;
                    entries.push(DebtMonthEntry {
                        debt_id: debt.id,
                        name: debt.name.clone(),
                        payment: Money::ZERO,
                        balance: Money::ZERO,
                    });
                    continue;
                }

                debt.balance = accrue_monthly(debt.balance, debt.monthly_rate)?;
                let payment = debt.min_payment.min(debt.balance);
                debt.balance -= payment;

                entries.push(DebtMonthEntry {
                    debt_id: debt.id,
                    name: debt.name.clone(),
                    payment,
                    balance: debt.balance,
                });
            }

            // extra pool cascades down the locked order
            for (debt, entry) in working.iter_mut().zip(entries.iter_mut()) {
                if !pool.is_positive() {
                    break;
                }
                if debt.balance > threshold {
                    let extra = pool.min(debt.balance);
                    debt.balance -= extra;
                    entry.payment += extra;
                    entry.balance = debt.balance;
                    pool -= extra;
                }
            }

            for debt in working.iter_mut() {
                if debt.cleared_in.is_none() && debt.balance <= threshold {
                    debt.cleared_in = Some(month);
                }
            }

            let total_payment = checked_total(entries.iter().map(|e| e.payment))?;
            schedule.push(PayoffMonth {
                month,
                debts: entries,
                total_payment,
            });
        }

        let original_balance = checked_total(debts.iter().map(|d| d.balance))?;
        let total_payment = checked_total(schedule.iter().map(|m: &PayoffMonth| m.total_payment))?;
        let total_interest = (total_payment - original_balance).non_negative();

        let outcome = if working.iter().all(|d| d.balance <= threshold) {
            PayoffOutcome::PaidOff { months: month }
        } else {
            let remaining_balance = checked_total(working.iter().map(|d| d.balance))?;
            warn!(
                strategy = %strategy,
                months = month,
                remaining = %remaining_balance,
                "debt payoff did not converge before the month cap"
            );
            PayoffOutcome::CapReached {
                months: month,
                remaining_balance,
            }
        };

        let mut payoff_order: Vec<PayoffMilestone> = working
            .iter()
            .filter_map(|d| {
                d.cleared_in.map(|month| PayoffMilestone {
                    debt_id: d.id,
                    name: d.name.clone(),
                    month,
                })
            })
            .collect();
        payoff_order.sort_by_key(|m| m.month);

        debug!(
            strategy = %strategy,
            debts = debts.len(),
            months = month,
            %total_interest,
            "debt payoff simulated"
        );

        Ok(DebtPayoffResult {
            strategy,
            total_interest,
            total_payment,
            payoff_months: month,
            outcome,
            original_balance,
            payoff_order,
            schedule,
        })
    }

    /// run both strategies on the same inputs
    pub fn compare(&self, debts: &[DebtItem], extra_payment: Money) -> Result<StrategyComparison> {
        Ok(StrategyComparison {
            snowball: self.simulate(debts, extra_payment, PayoffStrategy::Snowball)?,
            avalanche: self.simulate(debts, extra_payment, PayoffStrategy::Avalanche)?,
        })
    }
}

fn checked_total(mut amounts: impl Iterator<Item = Money>) -> Result<Money> {
    amounts.try_fold(Money::ZERO, |acc, amount| {
        acc.checked_add(amount).ok_or_else(|| overflow("payoff total"))
    })
}

fn validate_inputs(debts: &[DebtItem], extra_payment: Money) -> Result<()> {
    if extra_payment.is_negative() {
        return Err(CalcError::InvalidAmount {
            field: "extra payment",
            amount: extra_payment,
        });
    }
    for debt in debts {
        if debt.annual_rate.is_negative() {
            return Err(CalcError::InvalidInterestRate { rate: debt.annual_rate });
        }
        if debt.balance.is_negative() {
            return Err(CalcError::InvalidAmount {
                field: "debt balance",
                amount: debt.balance,
            });
        }
        if debt.min_payment.is_negative() {
            return Err(CalcError::InvalidAmount {
                field: "minimum payment",
                amount: debt.min_payment,
            });
        }
    }
    Ok(())
}

/// copy debts into strategy order; stable so ties keep input order
fn ordered_working_copies(debts: &[DebtItem], strategy: PayoffStrategy) -> Vec<WorkingDebt> {
    let mut sorted: Vec<&DebtItem> = debts.iter().collect();
    match strategy {
        PayoffStrategy::Snowball => sorted.sort_by(|a, b| a.balance.cmp(&b.balance)),
        PayoffStrategy::Avalanche => sorted.sort_by(|a, b| b.annual_rate.cmp(&a.annual_rate)),
    }

    sorted
        .into_iter()
        .map(|d| WorkingDebt {
            id: d.id,
            name: d.name.clone(),
            balance: d.balance,
            monthly_rate: d.annual_rate.monthly_rate(),
            min_payment: d.min_payment,
            cleared_in: None,
        })
        .collect()
}

/// simulate with default bounds
pub fn simulate_debt_payoff(
    debts: &[DebtItem],
    extra_payment: Money,
    strategy: PayoffStrategy,
) -> Result<DebtPayoffResult> {
    DebtPayoffSimulator::default().simulate(debts, extra_payment, strategy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use hourglass_rs::TimeSource;
    use rust_decimal_macros::dec;

    fn debt(name: &str, balance: i64, percent: rust_decimal::Decimal, min: i64) -> DebtItem {
        DebtItem::new(name, Money::from_major(balance), Rate::from_percent(percent), Money::from_major(min))
    }

    fn default_debts() -> Vec<DebtItem> {
        vec![
            debt("Credit Card", 5_000, dec!(18.99), 100),
            debt("Personal Loan", 10_000, dec!(8.5), 250),
        ]
    }

    #[test]
    fn test_avalanche_targets_highest_rate_first() {
        let debts = default_debts();
        let result = simulate_debt_payoff(&debts, Money::from_major(200), PayoffStrategy::Avalanche).unwrap();

        let first = &result.schedule[0];
        assert_eq!(first.debts[0].name, "Credit Card");
        assert_eq!(first.debts[0].payment, Money::from_major(300));
        assert_eq!(first.debts[1].payment, Money::from_major(250));
        assert_eq!(first.total_payment, Money::from_major(550));

        assert!(result.is_paid_off());
        assert_eq!(result.payoff_months, 32);
        assert_eq!(result.require_paid_off(), Ok(32));
        assert_eq!(result.total_interest.round_currency(), Money::from_decimal(dec!(2284.29)));
    }

    #[test]
    fn test_snowball_targets_smallest_balance_first() {
        let debts = vec![
            debt("Store Card", 2_000, dec!(5), 50),
            debt("Credit Card", 8_000, dec!(22), 160),
        ];
        let result = simulate_debt_payoff(&debts, Money::from_major(300), PayoffStrategy::Snowball).unwrap();

        let first = &result.schedule[0];
        assert_eq!(first.debts[0].name, "Store Card");
        assert_eq!(first.debts[0].payment, Money::from_major(350));
        assert_eq!(first.debts[1].payment, Money::from_major(160));
        assert_eq!(result.payoff_order[0].name, "Store Card");
        assert_eq!(result.payoff_order[0].month, 6);
        assert_eq!(result.payoff_months, 25);
    }

    #[test]
    fn test_avalanche_saves_interest_when_rates_differ() {
        let debts = vec![
            debt("Store Card", 2_000, dec!(5), 50),
            debt("Credit Card", 8_000, dec!(22), 160),
        ];
        let comparison = DebtPayoffSimulator::default()
            .compare(&debts, Money::from_major(300))
            .unwrap();

        assert!(comparison.avalanche.total_interest < comparison.snowball.total_interest);
        assert!(comparison.avalanche.payoff_months <= comparison.snowball.payoff_months);
        assert_eq!(comparison.avalanche.payoff_months, 24);
        assert_eq!(comparison.months_saved(), 1);
        let savings = comparison.interest_savings();
        assert!(savings > Money::from_decimal(dec!(492.29)) && savings < Money::from_decimal(dec!(492.33)));
        assert_eq!(comparison.recommended(), PayoffStrategy::Avalanche);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let debts = vec![
            debt("First", 1_000, dec!(10), 50),
            debt("Second", 1_000, dec!(10), 50),
            debt("Third", 500, dec!(10), 50),
        ];

        let snowball = simulate_debt_payoff(&debts, Money::ZERO, PayoffStrategy::Snowball).unwrap();
        let names: Vec<&str> = snowball.schedule[0].debts.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Third", "First", "Second"]);

        let avalanche = simulate_debt_payoff(&debts, Money::ZERO, PayoffStrategy::Avalanche).unwrap();
        let names: Vec<&str> = avalanche.schedule[0].debts.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_target_stays_locked_when_balances_cross() {
        let debts = vec![
            debt("Growing", 1_000, dec!(30), 0),
            debt("Flat", 1_100, dec!(0), 100),
        ];
        let result = simulate_debt_payoff(&debts, Money::from_major(10), PayoffStrategy::Snowball).unwrap();

        // after month 1 the first target is already the larger balance
        let first = &result.schedule[0];
        assert!(first.debts[0].balance > first.debts[1].balance);

        for month in &result.schedule[..11] {
            assert_eq!(month.debts[0].name, "Growing");
            assert_eq!(month.debts[0].payment, Money::from_major(10));
            assert_eq!(month.debts[1].payment, Money::from_major(100));
        }
        assert_eq!(result.payoff_order[0].name, "Flat");
        assert_eq!(result.payoff_order[0].month, 11);

        // once Flat clears, its minimum joins the extra on Growing
        assert_eq!(result.schedule[11].debts[0].payment, Money::from_major(110));
        assert!(result.is_paid_off());
    }

    #[test]
    fn test_balance_overflow_is_an_error() {
        let debts = vec![debt("Runaway", 100_000_000_000_000_000, dec!(100), 0)];
        let err = simulate_debt_payoff(&debts, Money::ZERO, PayoffStrategy::Snowball).unwrap_err();
        assert!(matches!(err, CalcError::CalculationError { .. }));
    }

    #[test]
    fn test_large_extra_clears_several_debts_in_one_month() {
        let debts = vec![
            debt("A", 1_000, dec!(10), 25),
            debt("B", 500, dec!(10), 25),
            debt("C", 300, dec!(12), 20),
        ];
        let result = simulate_debt_payoff(&debts, Money::from_major(5_000), PayoffStrategy::Snowball).unwrap();

        assert_eq!(result.payoff_months, 1);
        assert_eq!(result.payoff_order.len(), 3);
        assert!(result.payoff_order.iter().all(|m| m.month == 1));
        assert_eq!(result.total_interest.round_currency(), Money::from_decimal(dec!(15.50)));
    }

    #[test]
    fn test_freed_minimum_rolls_into_same_month() {
        let debts = vec![
            debt("Small", 100, dec!(0), 100),
            debt("Large", 1_000, dec!(0), 100),
        ];
        let result = simulate_debt_payoff(&debts, Money::ZERO, PayoffStrategy::Snowball).unwrap();

        // month 1 clears Small; from month 2 its minimum goes to Large
        assert_eq!(result.schedule[0].debts[0].payment, Money::from_major(100));
        assert_eq!(result.schedule[1].debts[0].payment, Money::ZERO);
        assert_eq!(result.schedule[1].debts[1].payment, Money::from_major(200));
        assert_eq!(result.payoff_months, 6);
        assert_eq!(result.total_interest, Money::ZERO);
    }

    #[test]
    fn test_minimums_alone_terminate_before_cap() {
        let debts = vec![debt("Card", 3_000, dec!(15), 100)];
        let result = simulate_debt_payoff(&debts, Money::ZERO, PayoffStrategy::Avalanche).unwrap();

        assert!(result.is_paid_off());
        assert_eq!(result.payoff_months, 38);
    }

    #[test]
    fn test_cap_is_reported_as_non_convergent() {
        // minimum payment below monthly interest, balance grows forever
        let debts = vec![debt("Card", 10_000, dec!(24), 100)];
        let result = simulate_debt_payoff(&debts, Money::ZERO, PayoffStrategy::Snowball).unwrap();

        assert!(!result.is_paid_off());
        assert_eq!(result.payoff_months, 360);
        assert_eq!(result.schedule.len(), 360);
        match result.outcome {
            PayoffOutcome::CapReached { months, remaining_balance } => {
                assert_eq!(months, 360);
                assert!(remaining_balance > Money::from_major(10_000));
            }
            other => panic!("expected cap, got {other:?}"),
        }
        assert!(matches!(
            result.require_paid_off(),
            Err(CalcError::NonConvergentPayoff { months: 360, .. })
        ));

        let time = SafeTimeProvider::new(TimeSource::Test(Utc::now()));
        assert!(result.payoff_date(&time).is_none());
    }

    #[test]
    fn test_configured_cap() {
        let simulator = DebtPayoffSimulator::new(PayoffConfig {
            month_cap: 12,
            ..PayoffConfig::default()
        });
        let result = simulator
            .simulate(&[debt("Card", 3_000, dec!(15), 100)], Money::ZERO, PayoffStrategy::Snowball)
            .unwrap();
        assert_eq!(result.payoff_months, 12);
        assert!(!result.is_paid_off());
    }

    #[test]
    fn test_caller_debts_are_not_mutated() {
        let debts = default_debts();
        let snapshot = debts.clone();
        simulate_debt_payoff(&debts, Money::from_major(200), PayoffStrategy::Snowball).unwrap();
        assert_eq!(debts, snapshot);
    }

    #[test]
    fn test_empty_debt_list() {
        let result = simulate_debt_payoff(&[], Money::from_major(200), PayoffStrategy::Avalanche).unwrap();
        assert_eq!(result.outcome, PayoffOutcome::PaidOff { months: 0 });
        assert!(result.schedule.is_empty());
        assert_eq!(result.total_payment, Money::ZERO);
        assert_eq!(result.balance_series(), vec![Money::ZERO]);
    }

    #[test]
    fn test_invalid_inputs() {
        let debts = default_debts();
        assert!(matches!(
            simulate_debt_payoff(&debts, Money::from_major(-1), PayoffStrategy::Avalanche),
            Err(CalcError::InvalidAmount { field: "extra payment", .. })
        ));

        let negative_rate = vec![DebtItem::new("Bad", Money::from_major(100), Rate::from_decimal(dec!(-0.1)), Money::ONE)];
        assert!(matches!(
            simulate_debt_payoff(&negative_rate, Money::ZERO, PayoffStrategy::Avalanche),
            Err(CalcError::InvalidInterestRate { .. })
        ));
    }

    #[test]
    fn test_balance_series_and_payoff_date() {
        let debts = default_debts();
        let result = simulate_debt_payoff(&debts, Money::from_major(200), PayoffStrategy::Avalanche).unwrap();

        let series = result.balance_series();
        assert_eq!(series.len(), 33);
        assert_eq!(series[0], Money::from_major(15_000));
        assert!(series.windows(2).all(|w| w[1] <= w[0]));
        assert!(series[32] <= Money::CENT);

        let start = Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).unwrap();
        let time = SafeTimeProvider::new(TimeSource::Test(start));
        let date = result.payoff_date(&time).unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2028, 9, 15, 0, 0, 0).unwrap());
        assert_eq!(result.payoff_date_label(&time).as_deref(), Some("September 2028"));
    }

    #[test]
    fn test_entries_reference_debt_ids() {
        let debts = default_debts();
        let result = simulate_debt_payoff(&debts, Money::from_major(200), PayoffStrategy::Snowball).unwrap();

        let ids: Vec<DebtId> = result.schedule[0].debts.iter().map(|d| d.debt_id).collect();
        assert_eq!(ids, vec![debts[0].id, debts[1].id]);
    }
}
