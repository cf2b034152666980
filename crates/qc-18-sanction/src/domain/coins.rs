//! Multi-denomination coin amounts
//!
//! Normalized text form: `"<amount><denom>"` entries joined by `,`, sorted by
//! denom, no zero amounts, no duplicate denoms (e.g. `"5atom,10stake"`).
//! The empty string is the empty (zero) amount.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

const MIN_DENOM_LEN: usize = 3;
const MAX_DENOM_LEN: usize = 128;

/// Coin parsing and validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoinsError {
    #[error("invalid coin expression: {0:?}")]
    InvalidExpression(String),

    #[error("invalid denom: {0:?}")]
    InvalidDenom(String),

    #[error("duplicate denomination {0}")]
    DuplicateDenom(String),

    #[error("coin {0} amount is not positive")]
    NotPositive(String),

    #[error("denomination {0} is not sorted")]
    Unsorted(String),
}

/// Single denomination amount
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: u128,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: u128) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }

    /// Parse `"<amount><denom>"`. A decimal amount is truncated to its
    /// integer part, so `"1.5stake"` is one `stake`.
    fn parse(expr: &str) -> Result<Self, CoinsError> {
        let expr = expr.trim();
        let invalid = || CoinsError::InvalidExpression(expr.to_string());
        let split = expr
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .ok_or_else(invalid)?;
        let (amount, denom) = expr.split_at(split);
        let (whole, fraction) = match amount.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (amount, None),
        };
        let fraction_ok = match fraction {
            Some(f) => !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit()),
            None => true,
        };
        if !fraction_ok || (whole.is_empty() && fraction.is_none()) {
            return Err(invalid());
        }
        let amount = if whole.is_empty() {
            0
        } else {
            whole.parse::<u128>().map_err(|_| invalid())?
        };
        let denom = denom.trim_start();
        validate_denom(denom)?;
        Ok(Self::new(denom, amount))
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Denoms start with a letter, followed by 2-127 of `[a-zA-Z0-9/:._-]`.
pub fn validate_denom(denom: &str) -> Result<(), CoinsError> {
    let mut chars = denom.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || "/:._-".contains(c));
    if !starts_with_letter
        || !rest_ok
        || denom.len() < MIN_DENOM_LEN
        || denom.len() > MAX_DENOM_LEN
    {
        return Err(CoinsError::InvalidDenom(denom.to_string()));
    }
    Ok(())
}

/// Ordered set of coins
///
/// `From<Vec<Coin>>` wraps the list as-is; [`Coins::validate`] reports
/// whether it is normalized. [`Coins::new`] and [`Coins::parse_normalized`]
/// always produce normalized values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Coins(Vec<Coin>);

impl Coins {
    /// Sort, drop zero amounts and reject duplicate or invalid denoms.
    pub fn new(mut coins: Vec<Coin>) -> Result<Self, CoinsError> {
        coins.retain(|c| c.amount > 0);
        coins.sort_by(|a, b| a.denom.cmp(&b.denom));
        let coins = Self(coins);
        coins.validate()?;
        Ok(coins)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Parse the normalized text form. Empty input yields empty coins.
    pub fn parse_normalized(s: &str) -> Result<Self, CoinsError> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::empty());
        }
        let coins = s
            .split(',')
            .map(Coin::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(coins)
    }

    pub fn validate(&self) -> Result<(), CoinsError> {
        let mut prev: Option<&str> = None;
        for coin in &self.0 {
            validate_denom(&coin.denom)?;
            if coin.amount == 0 {
                return Err(CoinsError::NotPositive(coin.to_string()));
            }
            if let Some(prev) = prev {
                if prev == coin.denom {
                    return Err(CoinsError::DuplicateDenom(coin.denom.clone()));
                }
                if prev > coin.denom.as_str() {
                    return Err(CoinsError::Unsorted(coin.denom.clone()));
                }
            }
            prev = Some(&coin.denom);
        }
        Ok(())
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|c| c.amount == 0)
    }

    pub fn amount_of(&self, denom: &str) -> u128 {
        self.0
            .iter()
            .filter(|c| c.denom == denom)
            .map(|c| c.amount)
            .sum()
    }

    /// True when, for every denom in `other`, this holds at least as much.
    pub fn is_all_gte(&self, other: &Coins) -> bool {
        other
            .0
            .iter()
            .all(|c| self.amount_of(&c.denom) >= c.amount)
    }

    /// Sum of both sets, normalized.
    pub fn add(&self, other: &Coins) -> Coins {
        let mut coins = self.0.clone();
        for c in &other.0 {
            match coins.iter_mut().find(|x| x.denom == c.denom) {
                Some(existing) => existing.amount = existing.amount.saturating_add(c.amount),
                None => coins.push(c.clone()),
            }
        }
        coins.retain(|c| c.amount > 0);
        coins.sort_by(|a, b| a.denom.cmp(&b.denom));
        Coins(coins)
    }

    /// `self - other`, or `None` if any denom would go negative.
    pub fn checked_sub(&self, other: &Coins) -> Option<Coins> {
        let mut coins = self.0.clone();
        for c in &other.0 {
            if c.amount == 0 {
                continue;
            }
            let existing = coins.iter_mut().find(|x| x.denom == c.denom)?;
            existing.amount = existing.amount.checked_sub(c.amount)?;
        }
        coins.retain(|c| c.amount > 0);
        Some(Coins(coins))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coin> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Coin>> for Coins {
    fn from(coins: Vec<Coin>) -> Self {
        Self(coins)
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, coin) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{coin}")?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Coins {
    type Error = CoinsError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse_normalized(&s)
    }
}

impl From<Coins> for String {
    fn from(coins: Coins) -> Self {
        coins.to_string()
    }
}
