use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};
use std::str::FromStr;

/// Money type carried at full decimal precision.
///
/// Simulations never round intermediate balances; rounding to cents happens
/// only through [`Money::round_currency`] or `Display`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);
    pub const ONE: Money = Money(Decimal::ONE);
    pub const CENT: Money = Money(Decimal::from_parts(1, 0, 0, false, 2));

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d)
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Money(Decimal::from_str_exact(s)?))
    }

    /// create from integer amount (dollars, euros, etc)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// create from minor amount (cents with scale 2)
    pub fn from_minor(amount: i64, scale: u32) -> Self {
        Money(Decimal::from(amount) / Decimal::from(10_u64.pow(scale)))
    }

    /// create from a float, `None` for NaN or infinity
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        Decimal::from_f64(value).map(Money)
    }

    /// lossy conversion for charting
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// round to specified decimal places
    pub fn round_dp(&self, dp: u32) -> Self {
        Money(self.0.round_dp(dp))
    }

    /// round to whole cents for presentation
    pub fn round_currency(&self) -> Self {
        Money(self.0.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }

    /// check if zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// strictly less than zero
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// absolute value
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// minimum of two values
    pub fn min(self, other: Self) -> Self {
        Money(self.0.min(other.0))
    }

    /// maximum of two values
    pub fn max(self, other: Self) -> Self {
        Money(self.0.max(other.0))
    }

    /// clamp at zero
    pub fn non_negative(self) -> Self {
        self.max(Money::ZERO)
    }

    /// calculate percentage (e.g., 18% of $85)
    pub fn percentage(&self, percent: Decimal) -> Self {
        Money(self.0 * percent / Decimal::ONE_HUNDRED)
    }

    /// checked multiplication, `None` on decimal overflow
    pub fn checked_mul(&self, factor: Decimal) -> Option<Self> {
        self.0.checked_mul(factor).map(Money)
    }

    /// checked addition, `None` on decimal overflow
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{:.2}", self.round_currency().0))
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money::from_decimal(d)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        self.0 -= other.0;
    }
}

impl Mul<Decimal> for Money {
    type Output = Money;

    fn mul(self, other: Decimal) -> Money {
        Money(self.0 * other)
    }
}

impl Div<Decimal> for Money {
    type Output = Money;

    fn div(self, other: Decimal) -> Money {
        Money(self.0 / other)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, x| acc + *x)
    }
}

/// rate type for interest rates, stored as a fraction (0.05 for 5%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    /// create from decimal (e.g., 0.05 for 5%)
    pub fn from_decimal(d: Decimal) -> Self {
        Rate(d)
    }

    /// create from an annual percentage (e.g., 18.99 for 18.99%)
    pub fn from_percent(p: Decimal) -> Self {
        Rate(p / Decimal::ONE_HUNDRED)
    }

    /// create from whole percentage (e.g., 5 for 5%)
    pub fn from_percentage(p: u32) -> Self {
        Rate(Decimal::from(p) / Decimal::ONE_HUNDRED)
    }

    /// create from basis points (e.g., 500 for 5%)
    pub fn from_bps(bps: u32) -> Self {
        Rate(Decimal::from(bps) / Decimal::from(10000))
    }

    /// get as decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// get as percentage
    pub fn as_percentage(&self) -> Decimal {
        self.0 * Decimal::ONE_HUNDRED
    }

    /// daily rate from annual rate
    pub fn daily_rate(&self) -> Rate {
        self.periodic_rate(365)
    }

    /// monthly rate from annual rate
    pub fn monthly_rate(&self) -> Rate {
        self.periodic_rate(12)
    }

    /// nominal annual rate split evenly over `periods_per_year`
    pub fn periodic_rate(&self, periods_per_year: u32) -> Rate {
        Rate(self.0 / Decimal::from(periods_per_year))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().normalize())
    }
}

impl From<Decimal> for Rate {
    fn from(d: Decimal) -> Self {
        Rate::from_decimal(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_keeps_full_precision() {
        let m = Money::from_str_exact("100.123456789").unwrap();
        assert_eq!(m.as_decimal(), dec!(100.123456789));

        let third = Money::from_major(10) / dec!(3);
        assert!(third.as_decimal().scale() > 8);
    }

    #[test]
    fn test_round_currency() {
        assert_eq!(Money::from_decimal(dec!(1.005)).round_currency(), Money::from_decimal(dec!(1.01)));
        assert_eq!(Money::from_decimal(dec!(833.3333333)).round_currency(), Money::from_decimal(dec!(833.33)));
        assert_eq!(Money::from_decimal(dec!(-2.675)).round_currency(), Money::from_decimal(dec!(-2.68)));
    }

    #[test]
    fn test_display_is_two_decimals() {
        assert_eq!(Money::from_major(5).to_string(), "5.00");
        assert_eq!(Money::from_decimal(dec!(1199.101050305)).to_string(), "1199.10");
    }

    #[test]
    fn test_from_minor() {
        assert_eq!(Money::from_minor(12_345, 2), Money::from_decimal(dec!(123.45)));
        assert_eq!(Money::from_minor(1, 2), Money::CENT);
    }

    #[test]
    fn test_from_f64_rejects_non_finite() {
        assert!(Money::from_f64(f64::NAN).is_none());
        assert!(Money::from_f64(f64::INFINITY).is_none());
        assert_eq!(Money::from_f64(250.5), Some(Money::from_decimal(dec!(250.5))));
    }

    #[test]
    fn test_sum_and_clamp() {
        let amounts = vec![Money::from_major(10), Money::from_major(-25), Money::from_major(5)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total, Money::from_major(-10));
        assert_eq!(total.non_negative(), Money::ZERO);
    }

    #[test]
    fn test_rate_conversions() {
        let rate = Rate::from_percent(dec!(6));
        assert_eq!(rate.as_decimal(), dec!(0.06));
        assert_eq!(rate.monthly_rate().as_decimal(), dec!(0.005));
        assert_eq!(Rate::from_bps(500), Rate::from_percentage(5));
        assert_eq!(Rate::from_percent(dec!(18.99)).to_string(), "18.99%");
    }

    #[test]
    fn test_percentage() {
        let bill = Money::from_major(85);
        assert_eq!(bill.percentage(dec!(18)), Money::from_decimal(dec!(15.3)));
    }
}
