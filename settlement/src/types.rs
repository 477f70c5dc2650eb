//! Core types for settlement engine

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use session_core::{PlayerName, SessionId};
use std::fmt;

/// Payment instruction: `from` pays `to`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Paying player (net loser)
    pub from: PlayerName,

    /// Receiving player (net winner)
    pub to: PlayerName,

    /// Amount, always positive
    pub amount: Decimal,
}

impl fmt::Display for Transfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}: {}", self.from, self.to, self.amount)
    }
}

/// Settlement result for one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementPlan {
    /// Session the plan was computed for
    pub session_id: Option<SessionId>,

    /// Transfers in emission order
    pub transfers: Vec<Transfer>,

    /// Sum of all transfer amounts
    pub total_transferred: Decimal,

    /// Positions that needed settling (beyond tolerance)
    pub positions_settled: usize,
}

impl SettlementPlan {
    /// Build plan from emitted transfers
    pub fn new(
        session_id: Option<SessionId>,
        transfers: Vec<Transfer>,
        positions_settled: usize,
    ) -> Self {
        let total_transferred = transfers.iter().map(|t| t.amount).sum();
        Self {
            session_id,
            transfers,
            total_transferred,
            positions_settled,
        }
    }

    /// Number of transfers
    pub fn transfer_count(&self) -> usize {
        self.transfers.len()
    }

    /// True when nobody owes anything
    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }
}
