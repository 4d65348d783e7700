//! Volatility and trend indicators over the candle window.
//!
//! Computes NATR (normalized average true range, Wilder smoothing) and the
//! MACD histogram from the latest complete window. Both values are produced
//! in one pass as an [`IndicatorSnapshot`], or the engine reports why the
//! window cannot support one yet. A window that is too short, or a series
//! that cannot produce a current value, is not an error: the caller skips
//! the cycle and tries again on the next tick.

use pmm_core::CandleWindow;
use rust_decimal::Decimal;

/// Indicator values for the most recent candle.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSnapshot {
    /// Average true range as a fraction of the latest close.
    pub natr: Decimal,
    /// MACD line minus its signal line.
    pub macd_hist: Decimal,
}

/// Why the window cannot support a snapshot this tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotReadyReason {
    /// Fewer candles than the longest lookback requires.
    InsufficientHistory { have: usize, need: usize },
    /// A series exists but its current value is undefined
    /// (e.g. non-positive close, not enough true ranges to seed the ATR).
    MissingValue(&'static str),
}

/// Result of evaluating the window: a usable snapshot, or the reason
/// there is none. Callers pattern-match; there is no partial snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorOutcome {
    Ready(IndicatorSnapshot),
    NotReady(NotReadyReason),
}

/// NATR + MACD histogram calculator.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    natr_length: usize,
    macd_fast: usize,
    macd_slow: usize,
    macd_signal: usize,
}

impl IndicatorEngine {
    pub fn new(natr_length: usize, macd_fast: usize, macd_slow: usize, macd_signal: usize) -> Self {
        Self {
            natr_length,
            macd_fast,
            macd_slow,
            macd_signal,
        }
    }

    /// Minimum window length before any snapshot is possible.
    pub fn required_history(&self) -> usize {
        self.natr_length.max(self.macd_slow + self.macd_signal)
    }

    /// Evaluate the window as of its latest candle.
    pub fn evaluate(&self, window: &CandleWindow) -> IndicatorOutcome {
        let need = self.required_history();
        if window.len() < need {
            return IndicatorOutcome::NotReady(NotReadyReason::InsufficientHistory {
                have: window.len(),
                need,
            });
        }

        let natr = match self.natr(window) {
            Some(v) => v,
            None => return IndicatorOutcome::NotReady(NotReadyReason::MissingValue("natr")),
        };
        let macd_hist = match self.macd_hist(window) {
            Some(v) => v,
            None => return IndicatorOutcome::NotReady(NotReadyReason::MissingValue("macd_hist")),
        };

        IndicatorOutcome::Ready(IndicatorSnapshot { natr, macd_hist })
    }

    /// Wilder-smoothed ATR over `natr_length` true ranges, divided by the
    /// latest close. True range needs the previous close, so a window of
    /// `n` candles yields `n - 1` ranges.
    fn natr(&self, window: &CandleWindow) -> Option<Decimal> {
        let candles: Vec<_> = window.iter().collect();
        if candles.len() < self.natr_length + 1 {
            return None;
        }

        let mut true_ranges = Vec::with_capacity(candles.len() - 1);
        for pair in candles.windows(2) {
            let prev_close = pair[0].close;
            let c = pair[1];
            let tr = (c.high - c.low)
                .max((c.high - prev_close).abs())
                .max((c.low - prev_close).abs());
            true_ranges.push(tr);
        }

        let n = Decimal::from(self.natr_length as u64);
        let mut atr: Decimal =
            true_ranges[..self.natr_length].iter().sum::<Decimal>() / n;
        for tr in &true_ranges[self.natr_length..] {
            atr = (atr * (n - Decimal::ONE) + *tr) / n;
        }

        let close = candles.last()?.close;
        if close.is_zero() || close.is_sign_negative() {
            return None;
        }
        Some(atr / close)
    }

    /// `(EMA_fast − EMA_slow) − signal_EMA(EMA_fast − EMA_slow)` at the
    /// latest candle.
    fn macd_hist(&self, window: &CandleWindow) -> Option<Decimal> {
        let closes: Vec<Decimal> = window.iter().map(|c| c.close).collect();

        let fast = ema_series(&closes, self.macd_fast)?;
        let slow = ema_series(&closes, self.macd_slow)?;

        // The MACD line exists where the slow EMA does. Both EMA series
        // are aligned to the tail of `closes`, so index from the back.
        let macd: Vec<Decimal> = (0..slow.len())
            .map(|i| {
                let fast_idx = fast.len() - slow.len() + i;
                fast[fast_idx] - slow[i]
            })
            .collect();

        let signal = ema_series(&macd, self.macd_signal)?;
        Some(*macd.last()? - *signal.last()?)
    }
}

/// EMA with the conventional SMA seed: the first output is the simple mean
/// of the first `period` values, then `ema = alpha*v + (1-alpha)*ema` with
/// `alpha = 2/(period+1)`. Output index 0 corresponds to input index
/// `period - 1`.
fn ema_series(values: &[Decimal], period: usize) -> Option<Vec<Decimal>> {
    if period == 0 || values.len() < period {
        return None;
    }
    let n = Decimal::from(period as u64);
    let alpha = Decimal::TWO / (n + Decimal::ONE);

    let mut ema: Decimal = values[..period].iter().sum::<Decimal>() / n;
    let mut out = Vec::with_capacity(values.len() - period + 1);
    out.push(ema);
    for v in &values[period..] {
        ema = alpha * *v + (Decimal::ONE - alpha) * ema;
        out.push(ema);
    }
    Some(out)
}
