//! Claim amounts with precise decimal arithmetic
//!
//! Receipt totals are carried as `rust_decimal` values so that subtotals and
//! grand totals add up exactly. Amounts are never negative; only display is
//! rounded (two decimal places).

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during amount operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(Decimal),

    #[error("Overflow during calculation")]
    Overflow,
}

/// Largest amount a single claim can carry; larger input reads as zero
pub const MAX_CLAIM_AMOUNT: Decimal = dec!(1000000000000);

/// A non-negative monetary amount
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Creates a new amount, rejecting negative values
    pub fn new(value: Decimal) -> Result<Self, MoneyError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(MoneyError::NegativeAmount(value));
        }
        Ok(Self(value))
    }

    /// Zero amount
    pub fn zero() -> Self {
        Self(dec!(0))
    }

    /// Creates an amount from minor units (cents)
    pub fn from_minor(minor_units: u64) -> Self {
        Self(Decimal::new(minor_units as i64, 2))
    }

    /// Parses user-entered text without ever failing.
    ///
    /// Grouping commas are ignored. When the whole text is not a number the
    /// longest numeric prefix is used (`"12.50 RM"` is 12.50). Anything else,
    /// including negative input or more than [`MAX_CLAIM_AMOUNT`], becomes zero.
    pub fn parse_lenient(text: &str) -> Self {
        let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();

        let parsed = Decimal::from_str(&cleaned)
            .ok()
            .or_else(|| Decimal::from_scientific(&cleaned).ok())
            .or_else(|| numeric_prefix(&cleaned).and_then(|p| Decimal::from_str(p).ok()));

        parsed
            .filter(|value| *value <= MAX_CLAIM_AMOUNT)
            .and_then(|value| Self::new(value).ok())
            .unwrap_or_default()
    }

    /// Returns the underlying decimal
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checked addition
    pub fn checked_add(&self, other: &Amount) -> Result<Amount, MoneyError> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(MoneyError::Overflow)
    }

    /// Lossy conversion for spreadsheet numeric cells
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }

    /// Rounds half away from zero to two decimal places for display
    pub fn rounded(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
    }
}

/// Longest prefix of `text` that reads as a decimal number, e.g. `"7.5kg"` -> `"7.5"`
fn numeric_prefix(text: &str) -> Option<&str> {
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    for (idx, ch) in text.char_indices() {
        match ch {
            '+' | '-' if idx == 0 => {}
            '0'..='9' => {
                seen_digit = true;
                end = idx + 1;
            }
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
    }

    seen_digit.then(|| &text[..end])
}

impl TryFrom<Decimal> for Amount {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Decimal {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.rounded())
    }
}

/// Saturates at `Decimal::MAX`
impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, a| acc + a)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
