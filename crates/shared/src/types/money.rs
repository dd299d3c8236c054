//! Money type with integer minor-unit precision and currency.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are stored as an integer count of minor units (cents);
//! `rust_decimal::Decimal` appears only at the parse/format boundary,
//! which is the single place rounding happens (always half-up).

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced by monetary arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// Input is not a finite, parseable decimal amount.
    #[error("Invalid monetary amount: {0}")]
    InvalidAmount(String),

    /// Arithmetic between two different currencies without conversion.
    #[error("Currency mismatch: {left} vs {right}")]
    CurrencyMismatch {
        /// Currency of the left operand.
        left: Currency,
        /// Currency of the right operand.
        right: Currency,
    },

    /// Amount exceeds the representable minor-unit range.
    #[error("Monetary amount out of range")]
    Overflow,
}

/// Represents a monetary amount with currency.
///
/// The amount is an integer number of minor units (e.g., cents), so
/// addition and subtraction are exact. Values are immutable; every
/// operation produces a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// The amount in the smallest currency unit (e.g., cents).
    pub minor: i64,
    /// ISO 4217 currency code (e.g., "USD", "EUR").
    pub currency: Currency,
}

/// ISO 4217 currency codes supported by the system.
///
/// All supported currencies are treated as having two minor-unit
/// digits; generalizing per-currency exponents is out of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US Dollar
    Usd,
    /// Euro
    Eur,
    /// British Pound
    Gbp,
    /// Singapore Dollar
    Sgd,
    /// Indonesian Rupiah
    Idr,
}

/// Minor units per major unit (two decimal digits).
const MINOR_PER_MAJOR: Decimal = Decimal::ONE_HUNDRED;

impl Money {
    /// Creates a Money value from a raw minor-unit count.
    #[must_use]
    pub const fn from_minor(minor: i64, currency: Currency) -> Self {
        Self { minor, currency }
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self {
            minor: 0,
            currency,
        }
    }

    /// Converts a decimal amount to minor units, rounding half-up.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::InvalidAmount`] if the scaled value does
    /// not fit the minor-unit range.
    pub fn from_decimal(value: Decimal, currency: Currency) -> Result<Self, MoneyError> {
        let scaled = (value * MINOR_PER_MAJOR)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let minor = scaled
            .to_i64()
            .ok_or_else(|| MoneyError::InvalidAmount(value.to_string()))?;
        Ok(Self { minor, currency })
    }

    /// Parses a decimal string (e.g., `"19.99"`) into a Money value.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::InvalidAmount`] if the string is not a
    /// parseable decimal number.
    pub fn parse(value: &str, currency: Currency) -> Result<Self, MoneyError> {
        let decimal = value
            .trim()
            .parse::<Decimal>()
            .map_err(|_| MoneyError::InvalidAmount(value.to_string()))?;
        Self::from_decimal(decimal, currency)
    }

    /// Adds two amounts of the same currency.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::CurrencyMismatch`] if the currencies
    /// differ, [`MoneyError::Overflow`] on minor-unit overflow.
    pub fn checked_add(self, other: Self) -> Result<Self, MoneyError> {
        self.require_same_currency(other)?;
        let minor = self
            .minor
            .checked_add(other.minor)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self {
            minor,
            currency: self.currency,
        })
    }

    /// Subtracts an amount of the same currency.
    ///
    /// The result may be negative (e.g., outstanding balance after
    /// overpayment).
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::CurrencyMismatch`] if the currencies
    /// differ, [`MoneyError::Overflow`] on minor-unit overflow.
    pub fn checked_sub(self, other: Self) -> Result<Self, MoneyError> {
        self.require_same_currency(other)?;
        let minor = self
            .minor
            .checked_sub(other.minor)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self {
            minor,
            currency: self.currency,
        })
    }

    /// Scales the amount by a decimal factor, rounding half-up to the
    /// nearest minor unit.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Overflow`] if the scaled value does not
    /// fit the minor-unit range.
    pub fn multiply(self, factor: Decimal) -> Result<Self, MoneyError> {
        let scaled = (Decimal::from(self.minor) * factor)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let minor = scaled.to_i64().ok_or(MoneyError::Overflow)?;
        Ok(Self {
            minor,
            currency: self.currency,
        })
    }

    /// Computes a plain percentage of the amount (8.25 means 8.25%).
    ///
    /// Used for tax computation.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Overflow`] if the result does not fit
    /// the minor-unit range.
    pub fn percentage_of(self, percent: Decimal) -> Result<Self, MoneyError> {
        self.multiply(percent / MINOR_PER_MAJOR)
    }

    /// Returns the amount as an exact decimal (scale 2).
    #[must_use]
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.minor, 2)
    }

    /// Renders the amount with exactly two fractional digits.
    #[must_use]
    pub fn to_decimal_string(self) -> String {
        self.to_decimal().to_string()
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.minor == 0
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.minor < 0
    }

    fn require_same_currency(self, other: Self) -> Result<(), MoneyError> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(MoneyError::CurrencyMismatch {
                left: self.currency,
                right: other.currency,
            })
        }
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.to_decimal_string(), self.currency)
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Usd => write!(f, "USD"),
            Self::Eur => write!(f, "EUR"),
            Self::Gbp => write!(f, "GBP"),
            Self::Sgd => write!(f, "SGD"),
            Self::Idr => write!(f, "IDR"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            "GBP" => Ok(Self::Gbp),
            "SGD" => Ok(Self::Sgd),
            "IDR" => Ok(Self::Idr),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}
