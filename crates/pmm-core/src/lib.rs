//! Core domain types for the PMM quoting engine.
//!
//! This crate provides fundamental types used throughout the strategy:
//! - `Price`, `Size`: Precision-safe numeric types
//! - `Candle`, `CandleWindow`: OHLCV records and the bounded rolling window
//! - `OrderSide`, `OrderIntent`, `OpenOrder`, `FillEvent`: order primitives

pub mod candle;
pub mod decimal;
pub mod error;
pub mod order;

pub use candle::{Candle, CandleWindow};
pub use decimal::{Price, Size};
pub use error::{CoreError, Result};
pub use order::{FillEvent, OpenOrder, OrderId, OrderIntent, OrderSide};
