//! Static exchange-rate table.

use std::collections::HashMap;

use invo_shared::config::CurrencyConfig;
use invo_shared::types::money::Currency;
use rust_decimal::Decimal;

use super::error::CurrencyError;

/// Immutable exchange-rate table keyed by currency code.
///
/// Each rate expresses how many base-currency units one unit of the
/// keyed currency is worth. The base currency always carries an
/// implicit rate of 1.
#[derive(Debug, Clone)]
pub struct RateTable {
    base: Currency,
    rates: HashMap<Currency, Decimal>,
}

impl RateTable {
    /// Builds a rate table, validating every rate is positive.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError::InvalidRate`] for a zero or negative
    /// rate.
    pub fn new(
        base: Currency,
        rates: HashMap<Currency, Decimal>,
    ) -> Result<Self, CurrencyError> {
        for (currency, rate) in &rates {
            if *rate <= Decimal::ZERO {
                return Err(CurrencyError::InvalidRate {
                    currency: *currency,
                    rate: *rate,
                });
            }
        }
        let mut rates = rates;
        rates.entry(base).or_insert(Decimal::ONE);
        Ok(Self { base, rates })
    }

    /// Builds a rate table from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError::UnknownCurrencyCode`] for a code the
    /// system does not know, [`CurrencyError::InvalidRate`] for a
    /// non-positive rate.
    pub fn from_config(config: &CurrencyConfig) -> Result<Self, CurrencyError> {
        let base = config
            .base
            .parse::<Currency>()
            .map_err(|_| CurrencyError::UnknownCurrencyCode(config.base.clone()))?;

        let mut rates = HashMap::with_capacity(config.rates.len());
        for (code, rate) in &config.rates {
            let currency = code
                .parse::<Currency>()
                .map_err(|_| CurrencyError::UnknownCurrencyCode(code.clone()))?;
            rates.insert(currency, *rate);
        }
        Self::new(base, rates)
    }

    /// The base currency used for cross-rates.
    #[must_use]
    pub const fn base(&self) -> Currency {
        self.base
    }

    /// Returns true if the table carries a rate for the currency.
    #[must_use]
    pub fn supports(&self, currency: Currency) -> bool {
        self.rates.contains_key(&currency)
    }

    /// Looks up the rate from the given currency to the base currency.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError::UnsupportedCurrency`] if the currency
    /// is absent from the table.
    pub fn rate_to_base(&self, currency: Currency) -> Result<Decimal, CurrencyError> {
        self.rates
            .get(&currency)
            .copied()
            .ok_or(CurrencyError::UnsupportedCurrency(currency))
    }
}
