//! Monetary amounts.
//!
//! Amounts are non-negative decimals with at most two fractional digits,
//! held exactly as integer cents. Input arrives either as a JSON number or
//! as a decimal string; both go through the same textual parser so `2500`,
//! `2500.5` and `"2500.50"` all land on the same value.

use serde::{Deserialize, Serialize, Serializer};

use crate::error::CoreError;

/// Maximum number of fractional digits accepted.
const MAX_FRACTION_DIGITS: usize = 2;

/// A non-negative amount in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Build from a stored cents value. Negative values are rejected.
    pub fn from_cents(cents: i64) -> Result<Self, CoreError> {
        if cents < 0 {
            return Err(CoreError::Validation(
                "Amount must not be negative".to_string(),
            ));
        }
        Ok(Self(cents))
    }

    pub fn cents(self) -> i64 {
        self.0
    }

    /// Parse a decimal string such as `2500`, `2500.5` or `2500.50`.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let text = input.trim();
        if text.is_empty() {
            return Err(CoreError::Validation("Amount is required".to_string()));
        }
        if text.starts_with('-') {
            return Err(CoreError::Validation(
                "Amount must not be negative".to_string(),
            ));
        }

        let invalid = || CoreError::Validation(format!("'{input}' is not a valid amount"));

        let (whole, fraction) = match text.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (text, ""),
        };
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if text.contains('.') && fraction.is_empty() {
            return Err(invalid());
        }
        if !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if fraction.len() > MAX_FRACTION_DIGITS {
            return Err(CoreError::Validation(format!(
                "Amount supports at most {MAX_FRACTION_DIGITS} decimal places"
            )));
        }

        let whole: i64 = whole.parse().map_err(|_| invalid())?;
        let fraction_cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction_cents))
            .map(Self)
            .ok_or_else(|| CoreError::Validation("Amount is too large".to_string()))
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Raw amount as received on the wire.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(serde_json::Number),
    Text(String),
}

impl AmountInput {
    pub fn parse(&self) -> Result<Amount, CoreError> {
        match self {
            Self::Number(n) => Amount::parse(&n.to_string()),
            Self::Text(s) => Amount::parse(s),
        }
    }

    /// Whether the input carries no value at all (blank string).
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }
}
