//! Core types for player statistics

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use session_core::{PlayerName, SessionId, Tolerance};
use std::collections::BTreeMap;

/// Cumulative statistics for one player
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStatRecord {
    /// Sessions played
    pub games_played: u32,

    /// Sessions with profit > ε
    pub wins: u32,

    /// Sessions with profit < -ε
    pub losses: u32,

    /// Sum of per-session profit (currency)
    pub net_profit: Decimal,

    /// Sum of buy-ins (currency)
    pub total_buy_in: Decimal,

    /// Sum of cash-outs (chips, unnormalized)
    pub total_cash_out_chips: Decimal,

    /// `total_buy_in / games_played`
    pub average_buy_in: Decimal,

    /// `total_cash_out_chips / games_played`
    pub average_cash_out_chips: Decimal,
}

impl PlayerStatRecord {
    /// Fold one session result into the running totals.
    ///
    /// Returns `None` on decimal overflow; the record is left untouched then.
    pub fn record_session(
        &mut self,
        buy_in: Decimal,
        cash_out: Decimal,
        profit: Decimal,
        tolerance: Tolerance,
    ) -> Option<()> {
        let net_profit = self.net_profit.checked_add(profit)?;
        let total_buy_in = self.total_buy_in.checked_add(buy_in)?;
        let total_cash_out_chips = self.total_cash_out_chips.checked_add(cash_out)?;
        let games_played = self.games_played.checked_add(1)?;

        self.games_played = games_played;
        self.net_profit = net_profit;
        self.total_buy_in = total_buy_in;
        self.total_cash_out_chips = total_cash_out_chips;

        if tolerance.is_positive(profit) {
            self.wins += 1;
        } else if tolerance.is_negative(profit) {
            self.losses += 1;
        }

        Some(())
    }

    /// Derive averages from the running totals
    pub fn finalize(&mut self) {
        if self.games_played == 0 {
            self.average_buy_in = Decimal::ZERO;
            self.average_cash_out_chips = Decimal::ZERO;
            return;
        }

        let games = Decimal::from(self.games_played);
        self.average_buy_in = self.total_buy_in / games;
        self.average_cash_out_chips = self.total_cash_out_chips / games;
    }

    /// Fraction of sessions won (0 when no games)
    pub fn win_rate(&self) -> Decimal {
        if self.games_played == 0 {
            return Decimal::ZERO;
        }
        Decimal::from(self.wins) / Decimal::from(self.games_played)
    }

    /// Mean profit per session (0 when no games)
    pub fn average_profit(&self) -> Decimal {
        if self.games_played == 0 {
            return Decimal::ZERO;
        }
        self.net_profit / Decimal::from(self.games_played)
    }

    /// Sessions that ended within ε of even
    pub fn zero_sum_sessions(&self) -> u32 {
        self.games_played - self.wins - self.losses
    }
}

/// Session left out of aggregation
#[derive(Debug)]
pub struct SkippedSession {
    /// Session ID
    pub session_id: SessionId,

    /// Why it was rejected
    pub reason: session_core::Error,
}

/// Result of one aggregation run
#[derive(Debug, Default)]
pub struct AggregationReport {
    /// Statistics by player, ordered by name
    pub stats: BTreeMap<PlayerName, PlayerStatRecord>,

    /// Sessions excluded from every total
    pub skipped: Vec<SkippedSession>,

    /// Sessions folded into the totals
    pub sessions_aggregated: usize,
}

impl AggregationReport {
    /// Statistics for one player
    pub fn get(&self, name: &PlayerName) -> Option<&PlayerStatRecord> {
        self.stats.get(name)
    }

    /// Players by net profit, highest first, ties by name
    pub fn leaderboard(&self) -> Vec<(&PlayerName, &PlayerStatRecord)> {
        let mut board: Vec<_> = self.stats.iter().collect();
        board.sort_by(|a, b| b.1.net_profit.cmp(&a.1.net_profit));
        board
    }

    /// True when at least one session was left out
    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }
}
