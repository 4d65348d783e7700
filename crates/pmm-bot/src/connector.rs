//! Seams to the exchange and the candle feed.
//!
//! The engine reads balances, prices and orders as already-fetched
//! snapshots; an asynchronous connectivity layer adapts behind these
//! traits and performs the actual I/O outside the decision cycle.

use pmm_core::{CandleWindow, OpenOrder, OrderId, OrderIntent, Price, Size};
use thiserror::Error;

/// Failures surfaced by the venue. The engine propagates these without
/// retrying; a failed leg does not roll back the other leg.
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("Venue rejected request: {0}")]
    Rejected(String),

    #[error("Connector unavailable: {0}")]
    Unavailable(String),
}

pub type ConnectorResult<T> = Result<T, ConnectorError>;

/// Trading venue as seen by one quoting cycle.
pub trait Connector {
    /// Whether the venue is ready to accept orders. Checked before any
    /// other call each cycle.
    fn is_trading_ready(&self) -> bool;

    /// Free balance of an asset.
    fn balance(&self, asset: &str) -> ConnectorResult<Size>;

    /// Mid price for the pair, used as the quoting reference.
    fn mid_price(&self, pair: &str) -> ConnectorResult<Price>;

    fn best_bid(&self, pair: &str) -> ConnectorResult<Price>;

    fn best_ask(&self, pair: &str) -> ConnectorResult<Price>;

    /// All live orders for the pair.
    fn open_orders(&self, pair: &str) -> ConnectorResult<Vec<OpenOrder>>;

    fn cancel_order(&self, pair: &str, id: &OrderId) -> ConnectorResult<()>;

    /// Shrink or drop intents the account cannot fund. With
    /// `all_or_none = false` each leg is adjusted independently.
    fn adjust_for_funding(
        &self,
        intents: Vec<OrderIntent>,
        all_or_none: bool,
    ) -> ConnectorResult<Vec<OrderIntent>>;

    fn submit_buy(&self, pair: &str, amount: Size, price: Price) -> ConnectorResult<OrderId>;

    fn submit_sell(&self, pair: &str, amount: Size, price: Price) -> ConnectorResult<OrderId>;
}

/// Source of the bounded candle window.
///
/// The feed owns the window; callers receive a snapshot valid for the
/// duration of one cycle.
pub trait CandleFeed {
    fn window(&self) -> CandleWindow;
}
