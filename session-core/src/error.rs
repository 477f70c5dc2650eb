//! Error types for session records

use crate::types::{PlayerName, SessionId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Result type for session operations
pub type Result<T> = std::result::Result<T, Error>;

/// Session errors
#[derive(Error, Debug)]
pub enum Error {
    /// Chip ratio is zero or negative
    #[error("Invalid chip ratio {chip_ratio} in session {session_id}")]
    InvalidChipRatio {
        /// Offending session
        session_id: SessionId,
        /// Ratio as recorded
        chip_ratio: Decimal,
    },

    /// Same player listed twice in one session
    #[error("Duplicate player name: {0}")]
    DuplicatePlayerName(PlayerName),

    /// Buy-in or cash-out below zero
    #[error("Negative {field} for player {name}")]
    NegativeAmount {
        /// Player the entry belongs to
        name: PlayerName,
        /// Which figure was negative
        field: &'static str,
    },

    /// Checked decimal operation failed
    #[error("Arithmetic error: {0}")]
    Arithmetic(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Snapshot (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
