//! Order reconciliation.
//!
//! Makes the live order set match the latest quote pair: cancel every
//! open order for the pair, then submit one buy and one sell after the
//! funding check. No diffing against the previous quotes: a full
//! cancel/replace every cycle.

use pmm_core::{OrderIntent, OrderSide, Size};
use pmm_strategy::QuotePair;
use tracing::debug;

use crate::connector::{Connector, ConnectorResult};

/// What one reconciliation pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Orders cancelled before re-quoting.
    pub cancelled: usize,
    /// Whether the buy leg survived the funding check and was submitted.
    pub buy_placed: bool,
    /// Whether the sell leg survived the funding check and was submitted.
    pub sell_placed: bool,
}

/// Cancels stale orders and submits the funded legs of a quote pair.
#[derive(Debug, Clone)]
pub struct OrderReconciler {
    pair: String,
    order_amount: Size,
}

impl OrderReconciler {
    pub fn new(pair: impl Into<String>, order_amount: Size) -> Self {
        Self {
            pair: pair.into(),
            order_amount,
        }
    }

    /// Run one cancel/replace pass.
    ///
    /// The funding check may shrink or drop either leg independently;
    /// a dropped leg is skipped silently. Venue errors propagate to the
    /// caller unretried, and a failed submission does not undo the other
    /// leg.
    pub fn reconcile<C: Connector>(
        &self,
        connector: &C,
        quotes: &QuotePair,
    ) -> ConnectorResult<ReconcileReport> {
        let open = connector.open_orders(&self.pair)?;
        for order in &open {
            debug!(order_id = %order.id, side = %order.side, "Cancelling stale quote");
            connector.cancel_order(&self.pair, &order.id)?;
        }

        let intents = vec![
            OrderIntent::buy(self.order_amount, quotes.buy),
            OrderIntent::sell(self.order_amount, quotes.sell),
        ];
        let adjusted = connector.adjust_for_funding(intents, false)?;

        let mut report = ReconcileReport {
            cancelled: open.len(),
            buy_placed: false,
            sell_placed: false,
        };

        for intent in adjusted {
            if intent.is_empty() {
                continue;
            }
            match intent.side {
                OrderSide::Buy => {
                    let id = connector.submit_buy(&self.pair, intent.amount, intent.price)?;
                    debug!(order_id = %id, amount = %intent.amount, price = %intent.price, "Bid placed");
                    report.buy_placed = true;
                }
                OrderSide::Sell => {
                    let id = connector.submit_sell(&self.pair, intent.amount, intent.price)?;
                    debug!(order_id = %id, amount = %intent.amount, price = %intent.price, "Ask placed");
                    report.sell_placed = true;
                }
            }
        }

        Ok(report)
    }
}
