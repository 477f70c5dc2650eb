//! Statistics aggregation
//!
//! A pure fold over the session history:
//!
//! 1. Seed an all-zero record for every roster name
//! 2. Validate each session; skip and report the defective ones
//! 3. Normalize each entry through its session's chip ratio
//! 4. Accumulate counts and sums, then derive averages
//!
//! Sums and counts commute, so the result does not depend on session order.

use crate::{types::*, Error, Result};
use rust_decimal::Decimal;
use session_core::{
    Config, PlayerName, RosterSource, SessionHistory, SessionRecord, Tolerance,
};
use std::collections::BTreeMap;

/// Aggregation engine
#[derive(Debug, Clone, Copy)]
pub struct AggregationEngine {
    /// Zero tolerance for win/loss classification
    tolerance: Tolerance,

    /// Default size of the recent-sessions window
    recent_window: usize,
}

impl Default for AggregationEngine {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl AggregationEngine {
    /// Create new aggregation engine
    pub fn new(tolerance: Tolerance, recent_window: usize) -> Self {
        Self {
            tolerance,
            recent_window,
        }
    }

    /// Create from shared configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.tolerance(), config.recent_sessions)
    }

    /// Same engine with a different tolerance
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Tolerance in use
    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// Configured recent-sessions window
    pub fn recent_window(&self) -> usize {
        self.recent_window
    }

    /// Recompute every player's statistics from the full history
    pub fn aggregate(
        &self,
        sessions: &[SessionRecord],
        roster: &[PlayerName],
    ) -> Result<AggregationReport> {
        let mut report = AggregationReport::default();

        for name in roster {
            report.stats.entry(name.clone()).or_default();
        }

        for session in sessions {
            match self.session_profits(session) {
                Ok(profits) => {
                    self.fold_session(&mut report.stats, session, &profits)?;
                    report.sessions_aggregated += 1;
                }
                Err(reason) => {
                    tracing::warn!(session_id = %session.id, %reason, "Skipping session");
                    report.skipped.push(SkippedSession {
                        session_id: session.id,
                        reason,
                    });
                }
            }
        }

        for record in report.stats.values_mut() {
            record.finalize();
        }

        tracing::info!(
            "Aggregation complete: {} sessions, {} skipped, {} players",
            report.sessions_aggregated,
            report.skipped.len(),
            report.stats.len()
        );

        Ok(report)
    }

    /// Aggregate only the `n` most recent sessions
    pub fn aggregate_recent(
        &self,
        sessions: &[SessionRecord],
        roster: &[PlayerName],
        n: usize,
    ) -> Result<AggregationReport> {
        let recent: Vec<SessionRecord> = recent_sessions(sessions, n)
            .into_iter()
            .cloned()
            .collect();
        self.aggregate(&recent, roster)
    }

    /// Load history and roster from the host, then aggregate
    pub fn aggregate_from(
        &self,
        history: &dyn SessionHistory,
        roster: &dyn RosterSource,
    ) -> Result<AggregationReport> {
        let sessions = history.load_sessions()?;
        let known = roster.known_players()?;
        self.aggregate(&sessions, &known)
    }

    /// Validate a session and normalize every entry's profit.
    ///
    /// Either every entry yields a profit or the whole session is rejected.
    fn session_profits(&self, session: &SessionRecord) -> session_core::Result<Vec<Decimal>> {
        session.validate()?;
        session
            .players
            .iter()
            .map(|entry| entry.profit(session.chip_ratio))
            .collect()
    }

    /// Add one validated session to the running totals
    fn fold_session(
        &self,
        stats: &mut BTreeMap<PlayerName, PlayerStatRecord>,
        session: &SessionRecord,
        profits: &[Decimal],
    ) -> Result<()> {
        for (entry, &profit) in session.players.iter().zip(profits) {
            tracing::debug!(session_id = %session.id, player = %entry.name, %profit, "Folding entry");

            stats
                .entry(entry.name.clone())
                .or_default()
                .record_session(entry.buy_in, entry.cash_out, profit, self.tolerance)
                .ok_or_else(|| Error::Overflow(entry.name.clone()))?;
        }
        Ok(())
    }
}

/// The `n` most recent sessions, newest first; equal timestamps keep
/// insertion order.
pub fn recent_sessions(sessions: &[SessionRecord], n: usize) -> Vec<&SessionRecord> {
    let mut ordered: Vec<&SessionRecord> = sessions.iter().collect();
    ordered.sort_by(|a, b| b.played_at.cmp(&a.played_at));
    ordered.truncate(n);
    ordered
}
