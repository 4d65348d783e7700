//! The quoting cycle.
//!
//! One `on_tick` call runs the whole pipeline synchronously: readiness
//! gates, indicators, spreads, quote clipping, order reconciliation.
//! The engine is driven by an external clock and never re-enters; a
//! cycle either completes or is skipped wholesale.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, info};

use pmm_core::{FillEvent, Size};
use pmm_strategy::{
    clip_quotes, IndicatorEngine, IndicatorOutcome, NotReadyReason, QuotePair, SpreadModel,
};

use crate::config::AppConfig;
use crate::connector::{CandleFeed, Connector};
use crate::error::AppResult;
use crate::reconciler::{OrderReconciler, ReconcileReport};

/// What a single clock invocation did.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// The refresh interval since the last full cycle has not elapsed.
    Throttled,
    /// The venue is not ready to trade; retried on the next invocation.
    ConnectorNotReady,
    /// The candle window cannot support indicators yet; retried on the
    /// next invocation, no orders touched.
    SkippedData(NotReadyReason),
    /// A full cycle ran and the order set was reconciled.
    Quoted(CycleSummary),
}

/// Result of a completed cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleSummary {
    pub quotes: QuotePair,
    pub report: ReconcileReport,
}

/// Last spread computation, kept only for status reporting.
///
/// Recorded after the inventory stage and before the floor, and never
/// fed back into later cycles.
#[derive(Debug, Clone, Default)]
struct StatusMetrics {
    bid_spread: Decimal,
    ask_spread: Decimal,
    inv_norm: Decimal,
}

/// Periodic market-making engine for a single pair.
pub struct MakerEngine<C, F> {
    pair: String,
    base_asset: String,
    refresh_interval: Duration,
    indicators: IndicatorEngine,
    spreads: SpreadModel,
    reconciler: OrderReconciler,
    connector: C,
    feed: F,
    metrics: StatusMetrics,
    next_tick: Option<DateTime<Utc>>,
}

impl<C: Connector, F: CandleFeed> MakerEngine<C, F> {
    pub fn new(config: &AppConfig, connector: C, feed: F) -> AppResult<Self> {
        config.validate()?;

        let strategy = &config.strategy;
        Ok(Self {
            pair: config.trading_pair.clone(),
            base_asset: config.base_asset().to_string(),
            refresh_interval: Duration::seconds(config.order_refresh_secs as i64),
            indicators: IndicatorEngine::new(
                strategy.natr_length,
                strategy.macd_fast,
                strategy.macd_slow,
                strategy.macd_signal,
            ),
            spreads: SpreadModel::new(strategy),
            reconciler: OrderReconciler::new(
                config.trading_pair.clone(),
                Size::new(config.order_amount),
            ),
            connector,
            feed,
            metrics: StatusMetrics::default(),
            next_tick: None,
        })
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    pub fn feed(&self) -> &F {
        &self.feed
    }

    /// Run one clock invocation.
    ///
    /// Gate order: refresh throttle, venue readiness, indicator
    /// readiness. Only a completed cycle advances the schedule, so both
    /// skip paths (and a propagated venue error) retry on the next
    /// invocation rather than waiting out a full refresh interval.
    pub fn on_tick(&mut self, now: DateTime<Utc>) -> AppResult<TickOutcome> {
        if let Some(next) = self.next_tick {
            if now < next {
                return Ok(TickOutcome::Throttled);
            }
        }
        if !self.connector.is_trading_ready() {
            return Ok(TickOutcome::ConnectorNotReady);
        }

        let window = self.feed.window();
        let snapshot = match self.indicators.evaluate(&window) {
            IndicatorOutcome::NotReady(reason) => return Ok(TickOutcome::SkippedData(reason)),
            IndicatorOutcome::Ready(snapshot) => snapshot,
        };

        let balance = self.connector.balance(&self.base_asset)?;
        let inv_norm = self.spreads.inventory_norm(balance.inner());

        let skewed = self.spreads.skewed_spreads(&snapshot, inv_norm);
        self.metrics = StatusMetrics {
            bid_spread: skewed.bid,
            ask_spread: skewed.ask,
            inv_norm,
        };
        let spreads = self.spreads.floor(skewed);

        let ref_price = self.connector.mid_price(&self.pair)?;
        let best_bid = self.connector.best_bid(&self.pair)?;
        let best_ask = self.connector.best_ask(&self.pair)?;
        let quotes = clip_quotes(ref_price, &spreads, best_bid, best_ask);

        let report = self.reconciler.reconcile(&self.connector, &quotes)?;

        debug!(
            natr = %snapshot.natr,
            macd_hist = %snapshot.macd_hist,
            inv_norm = %inv_norm,
            buy = %quotes.buy,
            sell = %quotes.sell,
            cancelled = report.cancelled,
            "Quotes refreshed"
        );

        self.next_tick = Some(now + self.refresh_interval);
        Ok(TickOutcome::Quoted(CycleSummary { quotes, report }))
    }

    /// Fill notification hook for the connectivity layer. Log only; the
    /// next cycle re-reads balances from the venue.
    pub fn on_order_filled(&self, event: &FillEvent) {
        info!(
            "{} {:.4} {} @ {:.2}",
            event.side,
            event.amount.inner(),
            event.pair,
            event.price.inner()
        );
    }

    /// Human-readable snapshot of the last computed spreads.
    pub fn format_status(&self) -> String {
        if !self.connector.is_trading_ready() {
            return "Market connector is not ready.".to_string();
        }
        let bps = dec!(10000);
        format!(
            "Bid spread: {:.2} bps | Ask spread: {:.2} bps | Inv norm: {:.3}",
            self.metrics.bid_spread * bps,
            self.metrics.ask_spread * bps,
            self.metrics.inv_norm
        )
    }
}
