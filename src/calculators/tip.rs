use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;

/// tip percentages offered as one-tap presets
pub const TIP_PRESETS: [u32; 5] = [10, 15, 18, 20, 25];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipInput {
    pub bill_amount: Money,
    /// percent of the bill, 18 = 18%
    pub tip_percent: Decimal,
    pub split_count: u32,
}

impl Default for TipInput {
    fn default() -> Self {
        Self {
            bill_amount: Money::from_major(85),
            tip_percent: Decimal::from(18),
            split_count: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TipResult {
    pub tip_amount: Money,
    pub total: Money,
    pub per_person: Money,
    pub tip_per_person: Money,
}

impl TipInput {
    pub fn calculate(&self) -> TipResult {
        let tip_amount = self.bill_amount.percentage(self.tip_percent);
        let total = self.bill_amount + tip_amount;
        let people = Decimal::from(self.split_count.max(1));

        TipResult {
            tip_amount,
            total,
            per_person: total / people,
            tip_per_person: tip_amount / people,
        }
    }

    /// the same bill at every preset percentage
    pub fn preset_table(&self) -> Vec<(u32, TipResult)> {
        TIP_PRESETS
            .iter()
            .map(|&percent| {
                let input = TipInput {
                    tip_percent: Decimal::from(percent),
                    ..self.clone()
                };
                (percent, input.calculate())
            })
            .collect()
    }
}
