//! Print the statistics table for a host snapshot as JSON
//!
//! Usage: `stats <snapshot.json> [recent_n]`
//!
//! With `recent_n` only the most recent sessions are aggregated; pass `recent`
//! to use the configured window.

use anyhow::Context;
use player_stats::AggregationEngine;
use session_core::{Config, SnapshotFile};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .context("usage: stats <snapshot.json> [recent_n]")?;

    // Load configuration
    let config = Config::from_env().context("loading configuration")?;
    let engine = AggregationEngine::from_config(&config);

    // One read serves both collaborators
    let store = SnapshotFile::new(&path)
        .read()
        .with_context(|| format!("reading {}", path))?;

    let report = match args.next() {
        None => engine
            .aggregate_from(&store, &store)
            .with_context(|| format!("aggregating {}", path))?,
        Some(window) => {
            let n = if window == "recent" {
                engine.recent_window()
            } else {
                window
                    .parse()
                    .with_context(|| format!("invalid window {:?}", window))?
            };
            tracing::info!(window = n, "Aggregating recent sessions");
            engine.aggregate_recent(&store.sessions, &store.roster, n)?
        }
    };

    let leaderboard: Vec<serde_json::Value> = report
        .leaderboard()
        .into_iter()
        .map(|(name, record)| {
            serde_json::json!({
                "name": name,
                "stats": record,
                "win_rate": record.win_rate(),
                "average_profit": record.average_profit(),
            })
        })
        .collect();

    let skipped: Vec<serde_json::Value> = report
        .skipped
        .iter()
        .map(|s| {
            serde_json::json!({
                "session_id": s.session_id,
                "reason": s.reason.to_string(),
            })
        })
        .collect();

    let output = serde_json::json!({
        "sessions_aggregated": report.sessions_aggregated,
        "leaderboard": leaderboard,
        "skipped": skipped,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
