//! Quote derivation for the PMM engine.
//!
//! Turns a candle window plus account state into a clipped bid/ask
//! quote pair:
//!
//! ```text
//! CandleWindow → IndicatorEngine: NATR + MACD histogram
//!                 ├─ SpreadModel: volatility base → trend skew
//!                 │               → inventory penalty → floor
//!                 └─ clip_quotes: spreads + mid → buy/sell prices,
//!                                clipped to the top of book
//! ```
//!
//! Everything here is pure computation over `rust_decimal` values; order
//! placement and data acquisition live behind the seams in `pmm-bot`.

pub mod config;
pub mod indicators;
pub mod quote;
pub mod spread;

pub use config::StrategyConfig;
pub use indicators::{IndicatorEngine, IndicatorOutcome, IndicatorSnapshot, NotReadyReason};
pub use quote::{clip_quotes, QuotePair};
pub use spread::{SpreadModel, SpreadPair};
