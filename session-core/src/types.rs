//! Core types for home game sessions
//!
//! All types are designed for:
//! - Exact arithmetic (Decimal for money and chips)
//! - Host-friendly serialization (serde, JSON snapshots)
//! - Immutability once a session is closed

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

/// Player name, unique within a session
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerName(String);

impl PlayerName {
    /// Create new player name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlayerName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for PlayerName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Session identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a fresh session ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Net result of one player in one session, in currency units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPosition {
    /// Player
    pub name: PlayerName,

    /// Profit (positive) or loss (negative)
    pub amount: Decimal,
}

impl PlayerPosition {
    /// Create new position
    pub fn new(name: impl Into<PlayerName>, amount: Decimal) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// One player's line in a closed session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEntry {
    /// Player
    pub name: PlayerName,

    /// Cash paid in (currency)
    pub buy_in: Decimal,

    /// Chips handed back at the end (chips)
    pub cash_out: Decimal,
}

impl PlayerEntry {
    /// Create new entry
    pub fn new(name: impl Into<PlayerName>, buy_in: Decimal, cash_out: Decimal) -> Self {
        Self {
            name: name.into(),
            buy_in,
            cash_out,
        }
    }

    /// Profit in currency: `cash_out / chip_ratio - buy_in`
    pub fn profit(&self, chip_ratio: Decimal) -> Result<Decimal> {
        self.cash_out
            .checked_div(chip_ratio)
            .and_then(|cash| cash.checked_sub(self.buy_in))
            .ok_or_else(|| {
                Error::Arithmetic(format!(
                    "profit of {} overflows (cash_out {}, ratio {})",
                    self.name, self.cash_out, chip_ratio
                ))
            })
    }
}

/// Closed session as handed over by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Session ID
    pub id: SessionId,

    /// When the session was played
    pub played_at: DateTime<Utc>,

    /// Chip/currency conversion factor, fixed at creation
    pub chip_ratio: Decimal,

    /// Player lines
    pub players: Vec<PlayerEntry>,
}

impl SessionRecord {
    /// Create new session record with a fresh ID
    pub fn new(played_at: DateTime<Utc>, chip_ratio: Decimal, players: Vec<PlayerEntry>) -> Self {
        Self {
            id: SessionId::new(),
            played_at,
            chip_ratio,
            players,
        }
    }

    /// Check the record can be aggregated or settled
    pub fn validate(&self) -> Result<()> {
        if self.chip_ratio <= Decimal::ZERO {
            return Err(Error::InvalidChipRatio {
                session_id: self.id,
                chip_ratio: self.chip_ratio,
            });
        }

        let mut seen = HashSet::with_capacity(self.players.len());
        for entry in &self.players {
            if !seen.insert(&entry.name) {
                return Err(Error::DuplicatePlayerName(entry.name.clone()));
            }
            if entry.buy_in < Decimal::ZERO {
                return Err(Error::NegativeAmount {
                    name: entry.name.clone(),
                    field: "buy_in",
                });
            }
            if entry.cash_out < Decimal::ZERO {
                return Err(Error::NegativeAmount {
                    name: entry.name.clone(),
                    field: "cash_out",
                });
            }
        }

        Ok(())
    }

    /// Per-player positions normalized through this session's chip ratio
    pub fn positions(&self) -> Result<Vec<PlayerPosition>> {
        self.validate()?;
        self.players
            .iter()
            .map(|entry| {
                Ok(PlayerPosition {
                    name: entry.name.clone(),
                    amount: entry.profit(self.chip_ratio)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn session(chip_ratio: Decimal, players: Vec<PlayerEntry>) -> SessionRecord {
        SessionRecord::new(Utc::now(), chip_ratio, players)
    }

    #[test]
    fn test_profit_uses_chip_ratio() {
        let entry = PlayerEntry::new("alice", dec!(50), dec!(140));
        assert_eq!(entry.profit(dec!(2)).unwrap(), dec!(20));

        let entry = PlayerEntry::new("alice", dec!(50), dec!(80));
        assert_eq!(entry.profit(dec!(2)).unwrap(), dec!(-10));
    }

    #[test]
    fn test_positions_balance() {
        let record = session(
            dec!(10),
            vec![
                PlayerEntry::new("alice", dec!(20), dec!(500)),
                PlayerEntry::new("bob", dec!(20), dec!(100)),
                PlayerEntry::new("carol", dec!(20), dec!(0)),
            ],
        );

        let positions = record.positions().unwrap();
        assert_eq!(positions.len(), 3);
        assert_eq!(positions[0].amount, dec!(30));
        assert_eq!(positions[1].amount, dec!(-10));
        assert_eq!(positions[2].amount, dec!(-20));

        let total: Decimal = positions.iter().map(|p| p.amount).sum();
        assert_eq!(total, Decimal::ZERO);
    }

    #[test]
    fn test_zero_chip_ratio_rejected() {
        let record = session(dec!(0), vec![PlayerEntry::new("alice", dec!(10), dec!(10))]);

        match record.validate() {
            Err(Error::InvalidChipRatio { session_id, chip_ratio }) => {
                assert_eq!(session_id, record.id);
                assert_eq!(chip_ratio, Decimal::ZERO);
            }
            other => panic!("expected InvalidChipRatio, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_chip_ratio_rejected() {
        let record = session(dec!(-1), vec![]);
        assert!(matches!(
            record.positions(),
            Err(Error::InvalidChipRatio { .. })
        ));
    }

    #[test]
    fn test_duplicate_player_rejected() {
        let record = session(
            dec!(1),
            vec![
                PlayerEntry::new("alice", dec!(10), dec!(5)),
                PlayerEntry::new("alice", dec!(10), dec!(15)),
            ],
        );

        match record.validate() {
            Err(Error::DuplicatePlayerName(name)) => assert_eq!(name.as_str(), "alice"),
            other => panic!("expected DuplicatePlayerName, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_amount_rejected() {
        let record = session(dec!(1), vec![PlayerEntry::new("bob", dec!(-5), dec!(0))]);
        assert!(matches!(
            record.validate(),
            Err(Error::NegativeAmount { field: "buy_in", .. })
        ));
    }

    #[test]
    fn test_session_json_roundtrip_shape() {
        let json = r#"{
            "id": "6f1c1c3e-4a6b-4a53-9d0b-0d3c1b8e2f10",
            "played_at": "2024-03-01T20:00:00Z",
            "chip_ratio": "2",
            "players": [
                { "name": "alice", "buy_in": "50", "cash_out": "140" }
            ]
        }"#;

        let record: SessionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.players[0].name, PlayerName::new("alice"));
        assert_eq!(record.chip_ratio, dec!(2));
        assert_eq!(record.positions().unwrap()[0].amount, dec!(20));
    }
}
