//! Exchange-rate table and currency conversion.
//!
//! Rates are injected, read-only configuration: loaded once at
//! startup, immutable for the process lifetime. Cross-currency
//! conversion always goes through the configured base currency.

pub mod error;
pub mod rates;
pub mod service;

pub use error::CurrencyError;
pub use rates::RateTable;
pub use service::CurrencyConverter;
