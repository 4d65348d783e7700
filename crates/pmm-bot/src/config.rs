//! Application configuration.

use crate::error::{AppError, AppResult};
use pmm_strategy::StrategyConfig;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Candle feed configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandleFeedConfig {
    /// Exchange the candles come from (may differ from the trading venue).
    #[serde(default = "default_candle_connector")]
    pub connector: String,

    /// Candle interval, e.g. "1m".
    #[serde(default = "default_candle_interval")]
    pub interval: String,

    /// Maximum candles retained in the rolling window.
    #[serde(default = "default_max_records")]
    pub max_records: usize,
}

impl Default for CandleFeedConfig {
    fn default() -> Self {
        Self {
            connector: default_candle_connector(),
            interval: default_candle_interval(),
            max_records: default_max_records(),
        }
    }
}

/// Paper venue settings for dry runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperConfig {
    /// Starting base-asset balance.
    #[serde(default = "default_base_balance")]
    pub base_balance: Decimal,

    /// Starting quote-asset balance.
    #[serde(default = "default_quote_balance")]
    pub quote_balance: Decimal,

    /// Synthetic top-of-book width around the candle close, in bps.
    #[serde(default = "default_book_spread_bps")]
    pub book_spread_bps: Decimal,
}

impl Default for PaperConfig {
    fn default() -> Self {
        Self {
            base_balance: default_base_balance(),
            quote_balance: default_quote_balance(),
            book_spread_bps: default_book_spread_bps(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Traded pair, "BASE-QUOTE".
    #[serde(default = "default_trading_pair")]
    pub trading_pair: String,

    /// Venue identifier, informational.
    #[serde(default = "default_exchange")]
    pub exchange: String,

    /// Order size per leg, in base units.
    #[serde(default = "default_order_amount")]
    pub order_amount: Decimal,

    /// Minimum seconds between quoting cycles.
    #[serde(default = "default_order_refresh_secs")]
    pub order_refresh_secs: u64,

    /// Candle feed configuration.
    #[serde(default)]
    pub candles: CandleFeedConfig,

    /// Quote-derivation parameters.
    #[serde(default)]
    pub strategy: StrategyConfig,

    /// Paper venue configuration (replay binary and tests).
    #[serde(default)]
    pub paper: PaperConfig,
}

impl AppConfig {
    /// Load configuration from the path in `PMM_CONFIG`, falling back to
    /// `config/default.toml`, falling back to defaults.
    pub fn load() -> AppResult<Self> {
        let config_path =
            std::env::var("PMM_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());

        if Path::new(&config_path).exists() {
            Self::from_file(&config_path)
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine cannot trade from.
    pub fn validate(&self) -> AppResult<()> {
        if self.base_asset().is_empty() || self.quote_asset().is_empty() {
            return Err(AppError::Config(format!(
                "trading_pair '{}' must be BASE-QUOTE",
                self.trading_pair
            )));
        }
        if !self.order_amount.is_sign_positive() || self.order_amount.is_zero() {
            return Err(AppError::Config("order_amount must be positive".to_string()));
        }
        if self.order_refresh_secs == 0 {
            return Err(AppError::Config(
                "order_refresh_secs must be at least 1".to_string(),
            ));
        }
        self.strategy.validate()?;
        Ok(())
    }

    /// Base asset of the pair ("ETH-USDT" → "ETH").
    pub fn base_asset(&self) -> &str {
        self.trading_pair.split('-').next().unwrap_or_default()
    }

    /// Quote asset of the pair ("ETH-USDT" → "USDT").
    pub fn quote_asset(&self) -> &str {
        self.trading_pair.split('-').nth(1).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            trading_pair: default_trading_pair(),
            exchange: default_exchange(),
            order_amount: default_order_amount(),
            order_refresh_secs: default_order_refresh_secs(),
            candles: CandleFeedConfig::default(),
            strategy: StrategyConfig::default(),
            paper: PaperConfig::default(),
        }
    }
}

fn default_trading_pair() -> String {
    "ETH-USDT".to_string()
}
fn default_exchange() -> String {
    "binance_paper_trade".to_string()
}
fn default_order_amount() -> Decimal {
    Decimal::new(1, 2) // 0.01
}
fn default_order_refresh_secs() -> u64 {
    15
}
fn default_candle_connector() -> String {
    "binance".to_string()
}
fn default_candle_interval() -> String {
    "1m".to_string()
}
fn default_max_records() -> usize {
    1000
}
fn default_base_balance() -> Decimal {
    Decimal::new(5, 1) // 0.5
}
fn default_quote_balance() -> Decimal {
    Decimal::from(10_000)
}
fn default_book_spread_bps() -> Decimal {
    Decimal::TWO
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.trading_pair, "ETH-USDT");
        assert_eq!(config.base_asset(), "ETH");
        assert_eq!(config.quote_asset(), "USDT");
        assert_eq!(config.order_amount, dec!(0.01));
        assert_eq!(config.order_refresh_secs, 15);
        assert_eq!(config.candles.interval, "1m");
        assert_eq!(config.candles.max_records, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let toml_str = r#"
trading_pair = "BTC-USDT"
order_refresh_secs = 30

[strategy]
natr_length = 14
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.base_asset(), "BTC");
        assert_eq!(config.order_refresh_secs, 30);
        assert_eq!(config.strategy.natr_length, 14);
        assert_eq!(config.strategy.macd_slow, 26);
        assert_eq!(config.order_amount, dec!(0.01));
    }

    #[test]
    fn test_validate_rejects_bad_pair() {
        let config = AppConfig {
            trading_pair: "ETHUSDT".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_amount() {
        let config = AppConfig {
            order_amount: Decimal::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
