//! OHLCV candle records and the bounded rolling window.
//!
//! The window is owned by the candle-feed collaborator; the strategy core
//! only ever sees a cloned snapshot and never mutates it.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single OHLCV record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Close time of the candle.
    pub timestamp: DateTime<Utc>,
    /// Open price.
    pub open: Decimal,
    /// High price.
    pub high: Decimal,
    /// Low price.
    pub low: Decimal,
    /// Close price.
    pub close: Decimal,
    /// Traded volume in base units.
    pub volume: Decimal,
}

/// Bounded, time-ordered sequence of candles.
///
/// Append-only with oldest-eviction once `max_records` is reached, so the
/// indicator lookback never grows without bound.
#[derive(Debug, Clone)]
pub struct CandleWindow {
    candles: VecDeque<Candle>,
    max_records: usize,
}

impl CandleWindow {
    /// Create an empty window holding at most `max_records` candles.
    pub fn new(max_records: usize) -> Self {
        Self {
            candles: VecDeque::with_capacity(max_records.min(1024)),
            max_records: max_records.max(1),
        }
    }

    /// Append a candle, evicting the oldest once the bound is reached.
    pub fn push(&mut self, candle: Candle) {
        self.candles.push_back(candle);
        while self.candles.len() > self.max_records {
            self.candles.pop_front();
        }
    }

    /// Number of candles currently held.
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Most recent candle, if any.
    pub fn latest(&self) -> Option<&Candle> {
        self.candles.back()
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Candle> {
        self.candles.iter()
    }
}
