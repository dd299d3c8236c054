//! Currency conversion service.
//!
//! CRITICAL: Rounding happens exactly once per conversion, half-up to
//! the nearest minor unit, via `Money::from_decimal`. Converting
//! A -> B -> A is therefore not guaranteed to be an identity.

use invo_shared::types::money::{Currency, Money};

use super::error::CurrencyError;
use super::rates::RateTable;

/// Converts monetary amounts between supported currencies.
///
/// The converter is cheap to clone and safe to share: the underlying
/// rate table has no writer after construction.
#[derive(Debug, Clone)]
pub struct CurrencyConverter {
    table: RateTable,
}

impl CurrencyConverter {
    /// Creates a converter over the given rate table.
    #[must_use]
    pub const fn new(table: RateTable) -> Self {
        Self { table }
    }

    /// The rate table backing this converter.
    #[must_use]
    pub const fn table(&self) -> &RateTable {
        &self.table
    }

    /// Converts an amount to the target currency.
    ///
    /// A same-currency conversion is an exact no-op. Otherwise the
    /// amount is taken to the base currency and on to the target
    /// (amount -> base -> target), with a single half-up rounding to
    /// minor units at the end.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError::UnsupportedCurrency`] if either
    /// currency is absent from the rate table.
    pub fn convert(&self, amount: Money, to: Currency) -> Result<Money, CurrencyError> {
        if amount.currency == to {
            return Ok(amount);
        }

        let from_rate = self.table.rate_to_base(amount.currency)?;
        let to_rate = self.table.rate_to_base(to)?;

        let in_base = amount.to_decimal() * from_rate;
        Ok(Money::from_decimal(in_base / to_rate, to)?)
    }

    /// Sums amounts into the target currency, converting each one
    /// first. Minor-unit addition keeps the accumulation exact.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError::UnsupportedCurrency`] if any amount's
    /// currency is absent from the rate table.
    pub fn sum(
        &self,
        currency: Currency,
        amounts: impl IntoIterator<Item = Money>,
    ) -> Result<Money, CurrencyError> {
        let mut total = Money::zero(currency);
        for amount in amounts {
            total = total.checked_add(self.convert(amount, currency)?)?;
        }
        Ok(total)
    }
}
