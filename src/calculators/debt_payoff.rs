use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::payments::{DebtItem, DebtPayoffResult, DebtPayoffSimulator, StrategyComparison};
use crate::types::{DebtId, PayoffStrategy};

/// editable debt list with the chosen strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtPayoffInput {
    pub debts: Vec<DebtItem>,
    pub extra_payment: Money,
    pub strategy: PayoffStrategy,
}

impl Default for DebtPayoffInput {
    fn default() -> Self {
        Self {
            debts: vec![
                DebtItem::new(
                    "Credit Card",
                    Money::from_major(5_000),
                    Rate::from_percent(dec!(18.99)),
                    Money::from_major(100),
                ),
                DebtItem::new(
                    "Personal Loan",
                    Money::from_major(10_000),
                    Rate::from_percent(dec!(8.5)),
                    Money::from_major(250),
                ),
            ],
            extra_payment: Money::from_major(200),
            strategy: PayoffStrategy::Avalanche,
        }
    }
}

impl DebtPayoffInput {
    /// append a debt, returning its id
    pub fn add_debt(&mut self, debt: DebtItem) -> DebtId {
        let id = debt.id;
        self.debts.push(debt);
        id
    }

    /// append an empty debt row for the caller to fill in
    pub fn add_blank_debt(&mut self) -> DebtId {
        self.add_debt(DebtItem::new("", Money::ZERO, Rate::ZERO, Money::ZERO))
    }

    /// edit a debt in place; false if the id is unknown
    pub fn update_debt(&mut self, id: DebtId, update: impl FnOnce(&mut DebtItem)) -> bool {
        match self.debts.iter_mut().find(|d| d.id == id) {
            Some(debt) => {
                update(debt);
                true
            }
            None => false,
        }
    }

    pub fn remove_debt(&mut self, id: DebtId) -> Option<DebtItem> {
        let index = self.debts.iter().position(|d| d.id == id)?;
        Some(self.debts.remove(index))
    }

    pub fn total_balance(&self) -> Money {
        self.debts.iter().map(|d| d.balance).sum()
    }

    /// simulate the selected strategy
    pub fn calculate(&self) -> Result<DebtPayoffResult> {
        self.calculate_with(&EngineConfig::default())
    }

    pub fn calculate_with(&self, config: &EngineConfig) -> Result<DebtPayoffResult> {
        DebtPayoffSimulator::new(config.payoff.clone()).simulate(&self.debts, self.extra_payment, self.strategy)
    }

    pub fn compare(&self) -> Result<StrategyComparison> {
        self.compare_with(&EngineConfig::default())
    }

    pub fn compare_with(&self, config: &EngineConfig) -> Result<StrategyComparison> {
        DebtPayoffSimulator::new(config.payoff.clone()).compare(&self.debts, self.extra_payment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_plan_converges() {
        let input = DebtPayoffInput::default();
        assert_eq!(input.total_balance(), Money::from_major(15_000));

        let result = input.calculate().unwrap();
        assert_eq!(result.strategy, PayoffStrategy::Avalanche);
        assert!(result.is_paid_off());
        assert_eq!(result.payoff_months, 32);
    }

    #[test]
    fn test_edit_debts_by_id() {
        let mut input = DebtPayoffInput::default();
        let id = input.add_blank_debt();
        assert_eq!(input.debts.len(), 3);

        assert!(input.update_debt(id, |debt| {
            debt.name = "Car Loan".to_string();
            debt.balance = Money::from_major(7_500);
            debt.annual_rate = Rate::from_percent(dec!(6.9));
            debt.min_payment = Money::from_major(180);
        }));
        assert_eq!(input.total_balance(), Money::from_major(22_500));

        let removed = input.remove_debt(id).unwrap();
        assert_eq!(removed.name, "Car Loan");
        assert_eq!(input.debts.len(), 2);

        assert!(input.remove_debt(id).is_none());
        assert!(!input.update_debt(id, |debt| debt.balance = Money::ZERO));
    }

    #[test]
    fn test_blank_debt_does_not_block_payoff() {
        let mut input = DebtPayoffInput::default();
        input.add_blank_debt();

        let result = input.calculate().unwrap();
        assert!(result.is_paid_off());
        assert_eq!(result.payoff_months, 32);
    }

    #[test]
    fn test_compare_matches_individual_runs() {
        let input = DebtPayoffInput::default();
        let comparison = input.compare().unwrap();

        let snowball = DebtPayoffInput {
            strategy: PayoffStrategy::Snowball,
            ..input.clone()
        }
        .calculate()
        .unwrap();

        assert_eq!(comparison.snowball, snowball);
        assert_eq!(comparison.result(PayoffStrategy::Avalanche), &input.calculate().unwrap());
    }
}
