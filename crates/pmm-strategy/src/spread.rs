//! Spread composition.
//!
//! Builds the bid/ask spreads in four ordered stages: volatility base,
//! trend skew, inventory penalty, floor. Each stage additively adjusts
//! the previous one, so the order is part of the contract.

use rust_decimal::Decimal;

use crate::config::StrategyConfig;
use crate::indicators::IndicatorSnapshot;

/// Bid/ask spreads as fractions of reference price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpreadPair {
    pub bid: Decimal,
    pub ask: Decimal,
}

/// Composes spreads from indicators, inventory and the configured scalars.
#[derive(Debug, Clone)]
pub struct SpreadModel {
    bid_natr_scalar: Decimal,
    ask_natr_scalar: Decimal,
    macd_weight: Decimal,
    inventory_phi: Decimal,
    max_inventory: Decimal,
    min_spread: Decimal,
}

impl SpreadModel {
    pub fn new(config: &StrategyConfig) -> Self {
        Self {
            bid_natr_scalar: config.bid_natr_scalar,
            ask_natr_scalar: config.ask_natr_scalar,
            macd_weight: config.macd_weight,
            inventory_phi: config.inventory_phi,
            max_inventory: config.max_inventory,
            min_spread: config.min_spread,
        }
    }

    /// Normalize the base-asset balance to [-1, 1] against the cap.
    pub fn inventory_norm(&self, balance: Decimal) -> Decimal {
        if self.max_inventory.is_zero() {
            return Decimal::ZERO;
        }
        (balance / self.max_inventory)
            .max(Decimal::NEGATIVE_ONE)
            .min(Decimal::ONE)
    }

    /// Stages 1–3: volatility base, trend skew, inventory penalty.
    ///
    /// A positive histogram narrows the bid (buy more eagerly) and widens
    /// the ask; a long position widens the bid and narrows the ask. The
    /// result may be zero or negative; callers quote with [`floor`]ed
    /// values and may record these raw ones for status reporting.
    ///
    /// [`floor`]: Self::floor
    pub fn skewed_spreads(&self, indicators: &IndicatorSnapshot, inv_norm: Decimal) -> SpreadPair {
        let base_bid = indicators.natr * self.bid_natr_scalar;
        let base_ask = indicators.natr * self.ask_natr_scalar;

        let trend = self.macd_weight * indicators.macd_hist;
        let penalty = self.inventory_phi * inv_norm;

        SpreadPair {
            bid: base_bid - trend + penalty,
            ask: base_ask + trend - penalty,
        }
    }

    /// Stage 4: clamp both sides to the configured minimum.
    pub fn floor(&self, pair: SpreadPair) -> SpreadPair {
        SpreadPair {
            bid: pair.bid.max(self.min_spread),
            ask: pair.ask.max(self.min_spread),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn model() -> SpreadModel {
        SpreadModel::new(&StrategyConfig::default())
    }

    fn snapshot(natr: Decimal, macd_hist: Decimal) -> IndicatorSnapshot {
        IndicatorSnapshot { natr, macd_hist }
    }

    #[test]
    fn test_volatility_base_spreads() {
        // natr = 0.002, scalars 0.012/0.006, no trend, no inventory:
        // bid = 0.000024, ask = 0.000012 (the 0.00001 floor does not bind)
        let pair = model().skewed_spreads(&snapshot(dec!(0.002), dec!(0)), dec!(0));
        assert_eq!(pair.bid, dec!(0.000024));
        assert_eq!(pair.ask, dec!(0.000012));

        let floored = model().floor(pair);
        assert_eq!(floored.bid, dec!(0.000024));
        assert_eq!(floored.ask, dec!(0.000012));
    }

    #[test]
    fn test_trend_skew_is_monotonic() {
        let m = model();
        let natr = dec!(0.005);
        let low = m.skewed_spreads(&snapshot(natr, dec!(0.0001)), dec!(0));
        let high = m.skewed_spreads(&snapshot(natr, dec!(0.0002)), dec!(0));

        // More bullish momentum: tighter bid, wider ask
        assert!(high.bid < low.bid);
        assert!(high.ask > low.ask);

        // A bearish histogram flips the direction
        let bearish = m.skewed_spreads(&snapshot(natr, dec!(-0.0001)), dec!(0));
        assert!(bearish.bid > low.bid);
        assert!(bearish.ask < low.ask);
    }

    #[test]
    fn test_inventory_penalty_direction() {
        let m = model();
        let snap = snapshot(dec!(0.005), dec!(0));
        let neutral = m.skewed_spreads(&snap, dec!(0));
        let long = m.skewed_spreads(&snap, dec!(0.5));
        let short = m.skewed_spreads(&snap, dec!(-0.5));

        // Long inventory discourages buying and encourages selling
        assert!(long.bid > neutral.bid);
        assert!(long.ask < neutral.ask);
        // 0.01 * 0.5 = 0.005 shift per side
        assert_eq!(long.bid - neutral.bid, dec!(0.005));
        assert_eq!(neutral.ask - long.ask, dec!(0.005));

        assert!(short.bid < neutral.bid);
        assert!(short.ask > neutral.ask);
    }

    #[test]
    fn test_inventory_norm_clamped() {
        let m = model(); // max_inventory = 1
        assert_eq!(m.inventory_norm(dec!(0.25)), dec!(0.25));
        assert_eq!(m.inventory_norm(dec!(3)), dec!(1));
        assert_eq!(m.inventory_norm(dec!(-40)), dec!(-1));
        assert_eq!(m.inventory_norm(dec!(0)), dec!(0));
    }

    #[test]
    fn test_inventory_norm_with_larger_cap() {
        let config = StrategyConfig {
            max_inventory: dec!(4),
            ..Default::default()
        };
        let m = SpreadModel::new(&config);
        assert_eq!(m.inventory_norm(dec!(1)), dec!(0.25));
        assert_eq!(m.inventory_norm(dec!(1000)), dec!(1));
    }

    #[test]
    fn test_floor_binds_on_collapsed_spreads() {
        let m = model();
        // Strong bullish skew drives the bid spread negative
        let pair = m.skewed_spreads(&snapshot(dec!(0.0001), dec!(0.01)), dec!(0));
        assert!(pair.bid < Decimal::ZERO);

        let floored = m.floor(pair);
        assert_eq!(floored.bid, dec!(0.00001));
        assert!(floored.ask >= dec!(0.00001));
    }

    #[test]
    fn test_stage_order_matches_composition() {
        // bid = natr*scalar - w*hist + phi*inv, ask = natr*scalar + w*hist - phi*inv
        let m = model();
        let pair = m.skewed_spreads(&snapshot(dec!(0.002), dec!(0.0004)), dec!(0.5));
        // bid: 0.000024 - 0.5*0.0004 + 0.01*0.5 = 0.004824
        assert_eq!(pair.bid, dec!(0.004824));
        // ask: 0.000012 + 0.0002 - 0.005 = -0.004788
        assert_eq!(pair.ask, dec!(-0.004788));
    }
}
