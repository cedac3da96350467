//! # Price Module
//!
//! Provides the `Price` type for handling catalog prices safely.
//!
//! ## Why Integer Cents?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Market price $12.50 is stored as 1250 cents (i64)                    │
//! │    The wire representation is a two-place decimal, converted exactly    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cardfolio_core::price::Price;
//! use rust_decimal::Decimal;
//!
//! // Create from cents (storage representation)
//! let price = Price::from_cents(1250); // $12.50
//!
//! // Create from a wire decimal (validated: non-negative, max 2 places)
//! let parsed = Price::try_from_decimal("12.50".parse::<Decimal>().unwrap()).unwrap();
//! assert_eq!(parsed, price);
//! ```

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors produced when converting a wire decimal into a [`Price`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PriceError {
    /// Prices are never negative.
    #[error("price must not be negative")]
    Negative,

    /// Prices carry exactly two decimal places; a third place would be
    /// silently lost on the way into storage, so it is rejected instead.
    #[error("price must have at most two decimal places")]
    Precision,

    /// Value does not fit the cent range of an i64.
    #[error("price is out of range")]
    OutOfRange,
}

/// A catalog price in integer cents.
///
/// Serializes as a two-place decimal number (`1250` cents → `12.5`), which is
/// the shape API clients send and receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(i64);

impl Price {
    /// Creates a price from cents (the storage representation).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Price(cents)
    }

    /// Returns the price in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Converts a wire decimal into a price.
    ///
    /// ## Rules
    /// - Must be non-negative (zero is allowed)
    /// - Must have at most two decimal places
    pub fn try_from_decimal(value: Decimal) -> Result<Self, PriceError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(PriceError::Negative);
        }

        let cents = value
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or(PriceError::OutOfRange)?;
        if !cents.fract().is_zero() {
            return Err(PriceError::Precision);
        }

        cents.trunc().to_i64().map(Price).ok_or(PriceError::OutOfRange)
    }

    /// Returns the price as a two-place decimal.
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Serialize::serialize(&self.to_decimal(), serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = <Decimal as Deserialize>::deserialize(deserializer)?;
        Price::try_from_decimal(value).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
