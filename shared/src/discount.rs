//! Discounts attached to product rows and their variants

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{SharedError, SharedResult};

/// Kind picked in the discount selector of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    Flat,
    Percent,
}

impl std::str::FromStr for DiscountKind {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flat" | "flat off" => Ok(DiscountKind::Flat),
            "percent" | "%" | "% off" => Ok(DiscountKind::Percent),
            other => Err(SharedError::InvalidDiscount {
                reason: format!("unknown discount type '{other}'"),
            }),
        }
    }
}

/// Non-negative, finite discount amount. Only the `Discount` constructors
/// build one.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Amount(f64);

impl Amount {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated discount. Amounts are finite and non-negative; percentages
/// never exceed 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "amount", rename_all = "lowercase")]
#[serde(try_from = "RawDiscount")]
pub enum Discount {
    Flat(Amount),
    Percent(Amount),
}

/// Wire shape of a discount before validation
#[derive(Deserialize)]
#[serde(tag = "type", content = "amount", rename_all = "lowercase")]
enum RawDiscount {
    Flat(f64),
    Percent(f64),
}

impl TryFrom<RawDiscount> for Discount {
    type Error = SharedError;

    fn try_from(raw: RawDiscount) -> Result<Self, Self::Error> {
        match raw {
            RawDiscount::Flat(amount) => Discount::flat(amount),
            RawDiscount::Percent(amount) => Discount::percent(amount),
        }
    }
}

impl Discount {
    pub fn flat(amount: f64) -> SharedResult<Self> {
        Ok(Discount::Flat(check_amount(amount)?))
    }

    pub fn percent(amount: f64) -> SharedResult<Self> {
        let amount = check_amount(amount)?;
        if amount.value() > 100.0 {
            return Err(SharedError::InvalidDiscount {
                reason: format!("{amount}% is more than 100%"),
            });
        }
        Ok(Discount::Percent(amount))
    }

    /// Build a discount from raw form input. Blank input clears the discount.
    pub fn parse(raw: &str, kind: DiscountKind) -> SharedResult<Option<Self>> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        let amount: f64 = raw.parse().map_err(|_| SharedError::InvalidDiscount {
            reason: format!("'{raw}' is not a number"),
        })?;
        let discount = match kind {
            DiscountKind::Flat => Self::flat(amount)?,
            DiscountKind::Percent => Self::percent(amount)?,
        };
        Ok(Some(discount))
    }

    pub fn kind(&self) -> DiscountKind {
        match self {
            Discount::Flat(_) => DiscountKind::Flat,
            Discount::Percent(_) => DiscountKind::Percent,
        }
    }

    pub fn amount(&self) -> f64 {
        match self {
            Discount::Flat(amount) | Discount::Percent(amount) => amount.value(),
        }
    }
}

impl fmt::Display for Discount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discount::Flat(amount) => write!(f, "{amount} flat off"),
            Discount::Percent(amount) => write!(f, "{amount}% off"),
        }
    }
}

fn check_amount(amount: f64) -> SharedResult<Amount> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(SharedError::InvalidDiscount {
            reason: format!("amount {amount} must be a non-negative number"),
        });
    }
    Ok(Amount(amount))
}
