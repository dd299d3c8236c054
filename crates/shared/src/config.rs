//! Application configuration management.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Currency configuration (base currency and exchange rates).
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Report and dashboard configuration.
    #[serde(default)]
    pub reports: ReportConfig,
}

/// Currency configuration.
///
/// Exchange rates are process-wide static configuration: loaded once
/// at startup and immutable thereafter. There is no live-rate
/// fetching.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyConfig {
    /// Base currency code used for cross-rates.
    #[serde(default = "default_base_currency")]
    pub base: String,
    /// Exchange rates keyed by currency code: 1 unit of the keyed
    /// currency equals `rate` units of the base currency.
    #[serde(default = "default_rates")]
    pub rates: HashMap<String, Decimal>,
}

fn default_base_currency() -> String {
    "USD".to_string()
}

fn default_rates() -> HashMap<String, Decimal> {
    HashMap::from([
        ("USD".to_string(), Decimal::ONE),
        ("EUR".to_string(), Decimal::new(108, 2)),
        ("GBP".to_string(), Decimal::new(127, 2)),
        ("SGD".to_string(), Decimal::new(74, 2)),
        ("IDR".to_string(), Decimal::new(6, 5)),
    ])
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            base: default_base_currency(),
            rates: default_rates(),
        }
    }
}

/// Report and dashboard configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Number of trailing months shown in dashboard charts.
    #[serde(default = "default_chart_months")]
    pub chart_months: u32,
    /// Synthetic expense estimate as a percentage of bucket revenue.
    /// Visualization-only; no real expense records exist.
    #[serde(default = "default_expense_estimate_percent")]
    pub expense_estimate_percent: Decimal,
}

fn default_chart_months() -> u32 {
    6
}

fn default_expense_estimate_percent() -> Decimal {
    Decimal::new(625, 1) // 62.5%
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            chart_months: default_chart_months(),
            expense_estimate_percent: default_expense_estimate_percent(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("INVO").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
