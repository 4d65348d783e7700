//! Strategy configuration.

use pmm_core::{CoreError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Quote-derivation parameters.
///
/// Spreads are fractions of reference price (0.001 = 10 bps).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// NATR lookback in candles.
    #[serde(default = "default_natr_length")]
    pub natr_length: usize,

    /// MACD fast EMA period.
    #[serde(default = "default_macd_fast")]
    pub macd_fast: usize,

    /// MACD slow EMA period.
    #[serde(default = "default_macd_slow")]
    pub macd_slow: usize,

    /// MACD signal EMA period.
    #[serde(default = "default_macd_signal")]
    pub macd_signal: usize,

    /// Bid spread per unit NATR. Typically wider than the ask scalar.
    #[serde(default = "default_bid_natr_scalar")]
    pub bid_natr_scalar: Decimal,

    /// Ask spread per unit NATR.
    #[serde(default = "default_ask_natr_scalar")]
    pub ask_natr_scalar: Decimal,

    /// Spread shift per unit MACD histogram. A bullish histogram narrows
    /// the bid and widens the ask by this weight.
    #[serde(default = "default_macd_weight")]
    pub macd_weight: Decimal,

    /// Spread penalty per unit normalized inventory.
    #[serde(default = "default_inventory_phi")]
    pub inventory_phi: Decimal,

    /// Inventory cap used to normalize the base-asset balance to [-1, 1].
    #[serde(default = "default_max_inventory")]
    pub max_inventory: Decimal,

    /// Minimum spread floor per side.
    #[serde(default = "default_min_spread")]
    pub min_spread: Decimal,
}

impl StrategyConfig {
    /// Reject parameter sets the pipeline cannot quote from.
    pub fn validate(&self) -> Result<()> {
        if self.natr_length == 0 {
            return Err(CoreError::InvalidConfig(
                "natr_length must be at least 1".to_string(),
            ));
        }
        if self.macd_fast == 0 || self.macd_signal == 0 {
            return Err(CoreError::InvalidConfig(
                "MACD periods must be at least 1".to_string(),
            ));
        }
        if self.macd_slow <= self.macd_fast {
            return Err(CoreError::InvalidConfig(format!(
                "macd_slow ({}) must exceed macd_fast ({})",
                self.macd_slow, self.macd_fast
            )));
        }
        if !self.max_inventory.is_sign_positive() || self.max_inventory.is_zero() {
            return Err(CoreError::InvalidConfig(
                "max_inventory must be positive".to_string(),
            ));
        }
        if self.min_spread.is_sign_negative() {
            return Err(CoreError::InvalidConfig(
                "min_spread must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            natr_length: default_natr_length(),
            macd_fast: default_macd_fast(),
            macd_slow: default_macd_slow(),
            macd_signal: default_macd_signal(),
            bid_natr_scalar: default_bid_natr_scalar(),
            ask_natr_scalar: default_ask_natr_scalar(),
            macd_weight: default_macd_weight(),
            inventory_phi: default_inventory_phi(),
            max_inventory: default_max_inventory(),
            min_spread: default_min_spread(),
        }
    }
}

fn default_natr_length() -> usize {
    30
}
fn default_macd_fast() -> usize {
    12
}
fn default_macd_slow() -> usize {
    26
}
fn default_macd_signal() -> usize {
    9
}
fn default_bid_natr_scalar() -> Decimal {
    Decimal::new(120, 4) // 0.0120
}
fn default_ask_natr_scalar() -> Decimal {
    Decimal::new(60, 4) // 0.0060
}
fn default_macd_weight() -> Decimal {
    Decimal::new(5, 1) // 0.5
}
fn default_inventory_phi() -> Decimal {
    Decimal::new(1, 2) // 0.01
}
fn default_max_inventory() -> Decimal {
    Decimal::ONE
}
fn default_min_spread() -> Decimal {
    Decimal::new(1, 5) // 0.00001
}
