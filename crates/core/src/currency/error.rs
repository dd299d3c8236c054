//! Currency conversion error types.

use invo_shared::error::AppError;
use invo_shared::types::money::{Currency, MoneyError};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during currency conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    /// Conversion requested for a currency absent from the rate table.
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(Currency),

    /// Configured currency code is not a known ISO code.
    #[error("Unknown currency code in configuration: {0}")]
    UnknownCurrencyCode(String),

    /// Configured exchange rate is zero or negative.
    #[error("Invalid exchange rate for {currency}: {rate}")]
    InvalidRate {
        /// Currency the rate was configured for.
        currency: Currency,
        /// The offending rate.
        rate: Decimal,
    },

    /// Monetary arithmetic failed during conversion.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

impl CurrencyError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedCurrency(_) => "UNSUPPORTED_CURRENCY",
            Self::UnknownCurrencyCode(_) => "UNKNOWN_CURRENCY_CODE",
            Self::InvalidRate { .. } => "INVALID_EXCHANGE_RATE",
            Self::Money(_) => "MONEY_ERROR",
        }
    }
}

impl From<CurrencyError> for AppError {
    fn from(err: CurrencyError) -> Self {
        match err {
            CurrencyError::UnsupportedCurrency(_)
            | CurrencyError::UnknownCurrencyCode(_)
            | CurrencyError::InvalidRate { .. } => Self::Validation(err.to_string()),
            CurrencyError::Money(inner) => inner.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CurrencyError::UnsupportedCurrency(Currency::Idr).error_code(),
            "UNSUPPORTED_CURRENCY"
        );
        assert_eq!(
            CurrencyError::InvalidRate {
                currency: Currency::Eur,
                rate: Decimal::ZERO,
            }
            .error_code(),
            "INVALID_EXCHANGE_RATE"
        );
    }

    #[test]
    fn test_app_error_conversion() {
        let err: AppError = CurrencyError::UnsupportedCurrency(Currency::Gbp).into();
        assert_eq!(err.status_code(), 400);

        let err: AppError = CurrencyError::Money(MoneyError::CurrencyMismatch {
            left: Currency::Usd,
            right: Currency::Eur,
        })
        .into();
        assert_eq!(err.status_code(), 422);
    }
}
