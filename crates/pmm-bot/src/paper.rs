//! In-process paper venue.
//!
//! Backs the replay binary and the test suite: a synthetic top of book
//! derived from the latest candle close, config-seeded balances, an open
//! order table, and a funding check that shrinks each leg to what the
//! account affords. Orders rest forever; fills are not simulated.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use parking_lot::RwLock;
use rust_decimal::Decimal;

use pmm_core::{Candle, CandleWindow, OpenOrder, OrderId, OrderIntent, OrderSide, Price, Size};

use crate::config::AppConfig;
use crate::connector::{CandleFeed, Connector, ConnectorError, ConnectorResult};

#[derive(Debug, Default)]
struct PaperState {
    balances: HashMap<String, Decimal>,
    best_bid: Option<Price>,
    best_ask: Option<Price>,
    open: Vec<OpenOrder>,
    buys: Vec<(Size, Price)>,
    sells: Vec<(Size, Price)>,
}

/// Paper trading venue for a single pair.
pub struct PaperConnector {
    base_asset: String,
    quote_asset: String,
    book_spread_bps: Decimal,
    ready: AtomicBool,
    next_id: AtomicU64,
    state: RwLock<PaperState>,
}

impl PaperConnector {
    pub fn new(config: &AppConfig) -> Self {
        let mut balances = HashMap::new();
        balances.insert(config.base_asset().to_string(), config.paper.base_balance);
        balances.insert(config.quote_asset().to_string(), config.paper.quote_balance);

        Self {
            base_asset: config.base_asset().to_string(),
            quote_asset: config.quote_asset().to_string(),
            book_spread_bps: config.paper.book_spread_bps,
            ready: AtomicBool::new(true),
            next_id: AtomicU64::new(0),
            state: RwLock::new(PaperState {
                balances,
                ..Default::default()
            }),
        }
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    /// Rebuild the synthetic top of book around a candle close.
    pub fn apply_candle(&self, candle: &Candle) {
        let half = candle.close * self.book_spread_bps / Decimal::from(20_000);
        let mut state = self.state.write();
        state.best_bid = Some(Price::new(candle.close - half));
        state.best_ask = Some(Price::new(candle.close + half));
    }

    pub fn open_order_count(&self) -> usize {
        self.state.read().open.len()
    }

    /// Buy submissions recorded so far, as (amount, price).
    pub fn submitted_buys(&self) -> Vec<(Size, Price)> {
        self.state.read().buys.clone()
    }

    /// Sell submissions recorded so far, as (amount, price).
    pub fn submitted_sells(&self) -> Vec<(Size, Price)> {
        self.state.read().sells.clone()
    }

    fn fresh_id(&self) -> OrderId {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        OrderId::new(format!("paper-{n}"))
    }
}

impl Connector for PaperConnector {
    fn is_trading_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    fn balance(&self, asset: &str) -> ConnectorResult<Size> {
        let state = self.state.read();
        Ok(Size::new(
            state.balances.get(asset).copied().unwrap_or_default(),
        ))
    }

    fn mid_price(&self, _pair: &str) -> ConnectorResult<Price> {
        let state = self.state.read();
        match (state.best_bid, state.best_ask) {
            (Some(bid), Some(ask)) => Ok((bid + ask) / Decimal::TWO),
            _ => Err(ConnectorError::Unavailable("no market data".to_string())),
        }
    }

    fn best_bid(&self, _pair: &str) -> ConnectorResult<Price> {
        self.state
            .read()
            .best_bid
            .ok_or_else(|| ConnectorError::Unavailable("no market data".to_string()))
    }

    fn best_ask(&self, _pair: &str) -> ConnectorResult<Price> {
        self.state
            .read()
            .best_ask
            .ok_or_else(|| ConnectorError::Unavailable("no market data".to_string()))
    }

    fn open_orders(&self, _pair: &str) -> ConnectorResult<Vec<OpenOrder>> {
        Ok(self.state.read().open.clone())
    }

    fn cancel_order(&self, _pair: &str, id: &OrderId) -> ConnectorResult<()> {
        let mut state = self.state.write();
        let before = state.open.len();
        state.open.retain(|o| o.id != *id);
        if state.open.len() == before {
            return Err(ConnectorError::Rejected(format!("unknown order {id}")));
        }
        Ok(())
    }

    fn adjust_for_funding(
        &self,
        intents: Vec<OrderIntent>,
        all_or_none: bool,
    ) -> ConnectorResult<Vec<OrderIntent>> {
        let state = self.state.read();
        let mut adjusted = Vec::with_capacity(intents.len());

        for intent in intents {
            let affordable = match intent.side {
                OrderSide::Buy => {
                    let quote = state
                        .balances
                        .get(&self.quote_asset)
                        .copied()
                        .unwrap_or_default();
                    if intent.price.is_positive() {
                        quote / intent.price.inner()
                    } else {
                        Decimal::ZERO
                    }
                }
                OrderSide::Sell => state
                    .balances
                    .get(&self.base_asset)
                    .copied()
                    .unwrap_or_default(),
            };

            let amount = intent.amount.inner().min(affordable);
            if all_or_none && amount < intent.amount.inner() {
                return Ok(Vec::new());
            }
            if amount <= Decimal::ZERO {
                continue;
            }
            adjusted.push(OrderIntent {
                side: intent.side,
                amount: Size::new(amount),
                price: intent.price,
            });
        }

        Ok(adjusted)
    }

    fn submit_buy(&self, _pair: &str, amount: Size, price: Price) -> ConnectorResult<OrderId> {
        let id = self.fresh_id();
        let mut state = self.state.write();
        state.open.push(OpenOrder {
            id: id.clone(),
            side: OrderSide::Buy,
        });
        state.buys.push((amount, price));
        Ok(id)
    }

    fn submit_sell(&self, _pair: &str, amount: Size, price: Price) -> ConnectorResult<OrderId> {
        let id = self.fresh_id();
        let mut state = self.state.write();
        state.open.push(OpenOrder {
            id: id.clone(),
            side: OrderSide::Sell,
        });
        state.sells.push((amount, price));
        Ok(id)
    }
}

/// Candle window fed by the replay driver.
pub struct ReplayFeed {
    window: RwLock<CandleWindow>,
}

impl ReplayFeed {
    pub fn new(max_records: usize) -> Self {
        Self {
            window: RwLock::new(CandleWindow::new(max_records)),
        }
    }

    pub fn push(&self, candle: Candle) {
        self.window.write().push(candle);
    }
}

impl CandleFeed for ReplayFeed {
    fn window(&self) -> CandleWindow {
        self.window.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn candle(close: Decimal) -> Candle {
        Candle {
            timestamp: Utc::now(),
            open: close,
            high: close,
            low: close,
            close,
            volume: dec!(1),
        }
    }

    fn connector() -> PaperConnector {
        PaperConnector::new(&AppConfig::default())
    }

    #[test]
    fn test_book_from_candle() {
        let venue = connector();
        assert!(venue.mid_price("ETH-USDT").is_err());

        // 2 bps book on a 2000 close: half-spread 0.2
        venue.apply_candle(&candle(dec!(2000)));
        assert_eq!(venue.best_bid("ETH-USDT").unwrap(), Price::new(dec!(1999.8)));
        assert_eq!(venue.best_ask("ETH-USDT").unwrap(), Price::new(dec!(2000.2)));
        assert_eq!(venue.mid_price("ETH-USDT").unwrap(), Price::new(dec!(2000)));
    }

    #[test]
    fn test_balances_seeded_from_config() {
        let venue = connector();
        assert_eq!(venue.balance("ETH").unwrap(), Size::new(dec!(0.5)));
        assert_eq!(venue.balance("USDT").unwrap(), Size::new(dec!(10000)));
        assert_eq!(venue.balance("BTC").unwrap(), Size::ZERO);
    }

    #[test]
    fn test_funding_shrinks_each_leg_independently() {
        let mut config = AppConfig::default();
        config.paper.base_balance = dec!(0.002);
        config.paper.quote_balance = dec!(10); // affords 10/2000 = 0.005
        let venue = PaperConnector::new(&config);

        let adjusted = venue
            .adjust_for_funding(
                vec![
                    OrderIntent::buy(Size::new(dec!(0.01)), Price::new(dec!(2000))),
                    OrderIntent::sell(Size::new(dec!(0.01)), Price::new(dec!(2002))),
                ],
                false,
            )
            .unwrap();

        assert_eq!(adjusted.len(), 2);
        assert_eq!(adjusted[0].amount, Size::new(dec!(0.005)));
        assert_eq!(adjusted[1].amount, Size::new(dec!(0.002)));
    }

    #[test]
    fn test_funding_drops_unfundable_leg() {
        let mut config = AppConfig::default();
        config.paper.quote_balance = dec!(0);
        let venue = PaperConnector::new(&config);

        let adjusted = venue
            .adjust_for_funding(
                vec![
                    OrderIntent::buy(Size::new(dec!(0.01)), Price::new(dec!(2000))),
                    OrderIntent::sell(Size::new(dec!(0.01)), Price::new(dec!(2002))),
                ],
                false,
            )
            .unwrap();

        assert_eq!(adjusted.len(), 1);
        assert_eq!(adjusted[0].side, OrderSide::Sell);
    }

    #[test]
    fn test_funding_all_or_none_drops_everything() {
        let mut config = AppConfig::default();
        config.paper.quote_balance = dec!(0);
        let venue = PaperConnector::new(&config);

        let adjusted = venue
            .adjust_for_funding(
                vec![
                    OrderIntent::buy(Size::new(dec!(0.01)), Price::new(dec!(2000))),
                    OrderIntent::sell(Size::new(dec!(0.01)), Price::new(dec!(2002))),
                ],
                true,
            )
            .unwrap();
        assert!(adjusted.is_empty());
    }

    #[test]
    fn test_cancel_unknown_order_rejected() {
        let venue = connector();
        let err = venue
            .cancel_order("ETH-USDT", &OrderId::new("nope"))
            .unwrap_err();
        assert!(matches!(err, ConnectorError::Rejected(_)));
    }

    #[test]
    fn test_submit_and_cancel_roundtrip() {
        let venue = connector();
        let id = venue
            .submit_buy("ETH-USDT", Size::new(dec!(0.01)), Price::new(dec!(1999)))
            .unwrap();
        assert_eq!(venue.open_order_count(), 1);

        venue.cancel_order("ETH-USDT", &id).unwrap();
        assert_eq!(venue.open_order_count(), 0);
        assert_eq!(venue.submitted_buys().len(), 1);
    }

    #[test]
    fn test_replay_feed_snapshot_is_detached() {
        let feed = ReplayFeed::new(10);
        feed.push(candle(dec!(100)));
        let snapshot = feed.window();
        feed.push(candle(dec!(101)));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(feed.window().len(), 2);
    }
}
