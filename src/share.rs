//! share-link query codec
//!
//! Calculator inputs round-trip through a URL query string so a result can
//! be linked. Decoding never fails: a parameter that is missing, malformed
//! or out of range is skipped with a warning and the default is kept.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculators::{
    AutoLoanInput, CompoundInterestInput, DebtPayoffInput, StudentLoanInput, TipInput, LOAN_TERMS,
};
use crate::config::GrowthConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{CalcError, Result};
use crate::interest::CompoundingFrequency;
use crate::payments::DebtItem;
use crate::types::{PayoffStrategy, RepaymentPlan};

pub const DEFAULT_SITE_URL: &str = "https://www.calcpick.com";

/// ordered query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareQuery {
    pairs: Vec<(String, String)>,
}

impl ShareQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// parse a query string, with or without the leading `?`
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self {
            pairs: form_urlencoded::parse(query.as_bytes()).into_owned().collect(),
        }
    }

    /// set a key, replacing an earlier value
    fn set(&mut self, key: &str, value: String) {
        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    pub fn push_number(&mut self, key: &str, value: Decimal) -> &mut Self {
        self.set(key, value.normalize().to_string());
        self
    }

    /// empty values are left out
    pub fn push_str(&mut self, key: &str, value: &str) -> &mut Self {
        if !value.is_empty() {
            self.set(key, value.to_string());
        }
        self
    }

    pub fn push_json<T: Serialize>(&mut self, key: &str, value: &T) -> Result<&mut Self> {
        let json = serde_json::to_string(value).map_err(|e| CalcError::InvalidShareParameter {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.set(key, json);
        Ok(self)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key)
    }

    /// numeric parameter, `Err` when present but not a number
    pub fn parse_number(&self, key: &str) -> Result<Option<Decimal>> {
        let Some(raw) = self.get(key) else {
            return Ok(None);
        };
        let raw = raw.trim();
        Decimal::from_str(raw)
            .or_else(|_| Decimal::from_scientific(raw))
            .map(Some)
            .map_err(|_| CalcError::InvalidShareParameter {
                key: key.to_string(),
                message: format!("not a number: {raw:?}"),
            })
    }

    /// numeric parameter; malformed values are logged and dropped
    pub fn get_number(&self, key: &str) -> Option<Decimal> {
        self.parse_number(key).unwrap_or_else(|err| {
            warn!(%err, "ignoring share parameter");
            None
        })
    }

    pub fn parse_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.get(key) else {
            return Ok(None);
        };
        serde_json::from_str(raw)
            .map(Some)
            .map_err(|e| CalcError::InvalidShareParameter {
                key: key.to_string(),
                message: e.to_string(),
            })
    }

    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.parse_json(key).unwrap_or_else(|err| {
            warn!(%err, "ignoring share parameter");
            None
        })
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }

    /// full link, e.g. `https://www.calcpick.com/calculator/tip?b=85&t=18&s=1`
    pub fn to_url(&self, base: &str, path: &str) -> String {
        format!("{}{}?{}", base.trim_end_matches('/'), path, self.to_query_string())
    }
}

/// calculator input that can be encoded into a share link
pub trait Shareable: Default {
    /// page path the link opens
    const PATH: &'static str;

    fn to_query(&self) -> Result<ShareQuery>;

    /// overwrite fields present and valid in `query`
    fn apply_query(&mut self, query: &ShareQuery);

    fn from_query_or_default(query: &ShareQuery) -> Self {
        let mut input = Self::default();
        input.apply_query(query);
        input
    }

    fn share_url(&self, base: &str) -> Result<String> {
        Ok(self.to_query()?.to_url(base, Self::PATH))
    }
}

fn ignore(key: &str, value: impl std::fmt::Display, reason: &str) {
    warn!(key, %value, reason, "ignoring share parameter");
}

/// non-negative amount
fn money_param(query: &ShareQuery, key: &str) -> Option<Money> {
    let value = query.get_number(key)?;
    if value.is_sign_negative() && !value.is_zero() {
        ignore(key, value, "negative amount");
        return None;
    }
    Some(Money::from_decimal(value))
}

/// non-negative percentage, returned as a rate fraction
fn rate_param(query: &ShareQuery, key: &str) -> Option<Rate> {
    let value = query.get_number(key)?;
    if value.is_sign_negative() && !value.is_zero() {
        ignore(key, value, "negative rate");
        return None;
    }
    Some(Rate::from_percent(value))
}

fn whole_param(query: &ShareQuery, key: &str) -> Option<u32> {
    let value = query.get_number(key)?;
    match value.fract().is_zero().then(|| value.to_u32()).flatten() {
        Some(whole) => Some(whole),
        None => {
            ignore(key, value, "not a whole number");
            None
        }
    }
}

fn percent(rate: Rate) -> Decimal {
    rate.as_percentage()
}

impl Shareable for AutoLoanInput {
    const PATH: &'static str = "/calculator/auto-loan";

    fn to_query(&self) -> Result<ShareQuery> {
        let mut query = ShareQuery::new();
        query
            .push_number("vp", self.vehicle_price.as_decimal())
            .push_number("dp", self.down_payment.as_decimal())
            .push_number("tv", self.trade_in_value.as_decimal())
            .push_number("lt", Decimal::from(self.loan_term_months))
            .push_number("ir", percent(self.interest_rate));
        Ok(query)
    }

    fn apply_query(&mut self, query: &ShareQuery) {
        if let Some(v) = money_param(query, "vp") {
            self.vehicle_price = v;
        }
        if let Some(v) = money_param(query, "dp") {
            self.down_payment = v;
        }
        if let Some(v) = money_param(query, "tv") {
            self.trade_in_value = v;
        }
        if let Some(term) = whole_param(query, "lt") {
            if LOAN_TERMS.contains(&term) {
                self.loan_term_months = term;
            } else {
                ignore("lt", term, "unsupported loan term");
            }
        }
        if let Some(v) = rate_param(query, "ir") {
            self.interest_rate = v;
        }
    }
}

impl Shareable for CompoundInterestInput {
    const PATH: &'static str = "/calculator/compound-interest";

    fn to_query(&self) -> Result<ShareQuery> {
        let mut query = ShareQuery::new();
        query
            .push_number("ii", self.initial_investment.as_decimal())
            .push_number("mc", self.monthly_contribution.as_decimal())
            .push_number("ar", percent(self.annual_rate))
            .push_number("y", Decimal::from(self.years))
            .push_number("cf", Decimal::from(self.frequency.periods_per_year()));
        Ok(query)
    }

    fn apply_query(&mut self, query: &ShareQuery) {
        if let Some(v) = money_param(query, "ii") {
            self.initial_investment = v;
        }
        if let Some(v) = money_param(query, "mc") {
            self.monthly_contribution = v;
        }
        if let Some(v) = rate_param(query, "ar") {
            self.annual_rate = v;
        }
        if let Some(years) = whole_param(query, "y") {
            if years <= GrowthConfig::default().max_years {
                self.years = years;
            } else {
                ignore("y", years, "duration above the projection limit");
            }
        }
        if let Some(periods) = whole_param(query, "cf") {
            match CompoundingFrequency::from_periods_per_year(periods) {
                Ok(frequency) => self.frequency = frequency,
                Err(err) => warn!(%err, "ignoring share parameter"),
            }
        }
    }
}

/// debt as carried in a share link; `r` is a percentage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CompactDebt {
    #[serde(default)]
    n: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    b: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    r: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    m: Option<Decimal>,
}

impl CompactDebt {
    fn from_debt(debt: &DebtItem) -> Self {
        Self {
            n: Some(debt.name.clone()),
            b: Some(debt.balance.as_decimal()),
            r: Some(debt.annual_rate.as_percentage()),
            m: Some(debt.min_payment.as_decimal()),
        }
    }

    fn has_negative_field(&self) -> bool {
        [self.b, self.r, self.m]
            .iter()
            .flatten()
            .any(|v| v.is_sign_negative() && !v.is_zero())
    }

    /// decoded debts get fresh ids
    fn into_debt(self) -> DebtItem {
        DebtItem::new(
            self.n.unwrap_or_default(),
            Money::from_decimal(self.b.unwrap_or_default()),
            Rate::from_percent(self.r.unwrap_or_default()),
            Money::from_decimal(self.m.unwrap_or_default()),
        )
    }
}

impl Shareable for DebtPayoffInput {
    const PATH: &'static str = "/calculator/debt-payoff";

    fn to_query(&self) -> Result<ShareQuery> {
        let compact: Vec<CompactDebt> = self.debts.iter().map(CompactDebt::from_debt).collect();
        let mut query = ShareQuery::new();
        query
            .push_json("debts", &compact)?
            .push_number("ep", self.extra_payment.as_decimal())
            .push_str("s", self.strategy.as_str());
        Ok(query)
    }

    fn apply_query(&mut self, query: &ShareQuery) {
        if let Some(v) = money_param(query, "ep") {
            self.extra_payment = v;
        }
        if let Some(raw) = query.get_string("s") {
            match raw.parse::<PayoffStrategy>() {
                Ok(strategy) => self.strategy = strategy,
                Err(reason) => ignore("s", raw, &reason),
            }
        }
        if let Some(compact) = query.get_json::<Vec<CompactDebt>>("debts") {
            if compact.is_empty() {
                ignore("debts", "[]", "empty debt list");
            } else if compact.iter().any(CompactDebt::has_negative_field) {
                ignore("debts", compact.len(), "negative debt values");
            } else {
                self.debts = compact.into_iter().map(CompactDebt::into_debt).collect();
            }
        }
    }
}

impl Shareable for StudentLoanInput {
    const PATH: &'static str = "/calculator/student-loan";

    fn to_query(&self) -> Result<ShareQuery> {
        let mut query = ShareQuery::new();
        query
            .push_number("la", self.loan_amount.as_decimal())
            .push_number("ir", percent(self.interest_rate))
            .push_str("plan", self.plan.as_str());
        Ok(query)
    }

    fn apply_query(&mut self, query: &ShareQuery) {
        if let Some(v) = money_param(query, "la") {
            self.loan_amount = v;
        }
        if let Some(v) = rate_param(query, "ir") {
            self.interest_rate = v;
        }
        if let Some(raw) = query.get_string("plan") {
            match raw.parse::<RepaymentPlan>() {
                Ok(plan) => self.plan = plan,
                Err(reason) => ignore("plan", raw, &reason),
            }
        }
    }
}

impl Shareable for TipInput {
    const PATH: &'static str = "/calculator/tip";

    fn to_query(&self) -> Result<ShareQuery> {
        let mut query = ShareQuery::new();
        query
            .push_number("b", self.bill_amount.as_decimal())
            .push_number("t", self.tip_percent)
            .push_number("s", Decimal::from(self.split_count));
        Ok(query)
    }

    fn apply_query(&mut self, query: &ShareQuery) {
        if let Some(v) = money_param(query, "b") {
            self.bill_amount = v;
        }
        if let Some(v) = query.get_number("t") {
            if v.is_sign_negative() && !v.is_zero() {
                ignore("t", v, "negative tip");
            } else {
                self.tip_percent = v;
            }
        }
        if let Some(split) = whole_param(query, "s") {
            if split >= 1 {
                self.split_count = split;
            } else {
                ignore("s", split, "split must be at least 1");
            }
        }
    }
}
