//! PMM quoting engine: candle replay driver.
//!
//! Replays a JSON-lines candle file through the full quoting pipeline
//! against the paper venue, one tick per candle. This is the offline
//! dry run: live deployments embed `MakerEngine` behind a real
//! connector instead.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use pmm_bot::engine::TickOutcome;
use pmm_bot::paper::{PaperConnector, ReplayFeed};
use pmm_bot::{AppConfig, MakerEngine};
use pmm_core::Candle;

/// NATR/MACD/inventory pure market maker (paper replay)
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via PMM_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    /// JSON-lines candle file to replay
    #[arg(long)]
    candles: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    pmm_bot::logging::init_logging();

    info!("Starting pmm-bot v{}", env!("CARGO_PKG_VERSION"));

    let config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::load()?,
    };
    info!(
        pair = %config.trading_pair,
        exchange = %config.exchange,
        refresh_secs = config.order_refresh_secs,
        candle_interval = %config.candles.interval,
        "Configuration loaded"
    );

    let connector = PaperConnector::new(&config);
    let feed = ReplayFeed::new(config.candles.max_records);
    let mut engine = MakerEngine::new(&config, connector, feed)?;

    let file = File::open(&args.candles)
        .with_context(|| format!("Failed to open candle file {}", args.candles.display()))?;

    let mut ticks = 0usize;
    let mut quoted = 0usize;
    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let candle: Candle = serde_json::from_str(&line)
            .with_context(|| format!("Bad candle on line {}", line_no + 1))?;

        engine.feed().push(candle.clone());
        engine.connector().apply_candle(&candle);

        ticks += 1;
        match engine.on_tick(candle.timestamp)? {
            TickOutcome::Quoted(summary) => {
                quoted += 1;
                debug!(
                    buy = %summary.quotes.buy,
                    sell = %summary.quotes.sell,
                    cancelled = summary.report.cancelled,
                    "Replay cycle"
                );
            }
            outcome => debug!(?outcome, "Replay cycle skipped"),
        }
    }

    info!(
        ticks,
        quoted,
        status = %engine.format_status(),
        "Replay complete"
    );
    Ok(())
}
