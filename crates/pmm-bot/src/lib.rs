//! NATR/MACD/inventory pure-market-making engine.
//!
//! Orchestrates one quoting cycle per refresh interval:
//! - read the candle window and account state through narrow traits
//! - derive spreads and clipped quotes (`pmm-strategy`)
//! - cancel all live orders and re-submit the funded legs
//!
//! Exchange connectivity stays behind [`connector::Connector`]; the crate
//! ships a paper implementation and a candle-replay binary for dry runs.

pub mod config;
pub mod connector;
pub mod engine;
pub mod error;
pub mod logging;
pub mod paper;
pub mod reconciler;

pub use config::AppConfig;
pub use connector::{CandleFeed, Connector, ConnectorError, ConnectorResult};
pub use engine::{CycleSummary, MakerEngine, TickOutcome};
pub use error::{AppError, AppResult};
pub use reconciler::{OrderReconciler, ReconcileReport};
