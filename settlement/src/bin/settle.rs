//! Settle one closed session and print the transfers as JSON
//!
//! Usage: `settle <session.json>`
//!
//! The file holds either a full session record (buy-ins, cash-outs and chip
//! ratio) or a bare array of `{ "name", "amount" }` positions.

use anyhow::Context;
use session_core::{Config, PlayerPosition, SessionRecord};
use settlement::NettingEngine;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .context("usage: settle <session.json>")?;

    // Load configuration
    let config = Config::from_env().context("loading configuration")?;
    let engine = NettingEngine::from_config(&config);
    tracing::info!(service = %config.service_name, tolerance = %engine.tolerance(), "Starting settlement");

    let content = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path))?;
    let input: serde_json::Value =
        serde_json::from_str(&content).with_context(|| format!("parsing {}", path))?;

    let plan = if input.is_array() {
        let positions: Vec<PlayerPosition> = serde_json::from_value(input)?;
        engine.plan(&positions)?
    } else {
        let session: SessionRecord = serde_json::from_value(input)?;
        engine.settle_session(&session)?
    };

    for transfer in &plan.transfers {
        tracing::info!("{}", transfer);
    }

    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}
