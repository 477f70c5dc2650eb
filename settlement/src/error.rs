//! Error types for settlement engine

use rust_decimal::Decimal;
use session_core::PlayerName;
use thiserror::Error;

/// Result type for settlement operations
pub type Result<T> = std::result::Result<T, Error>;

/// Settlement errors
#[derive(Error, Debug)]
pub enum Error {
    /// Positions do not sum to zero within tolerance
    #[error("Imbalanced input: positions leave a residual of {residual}")]
    ImbalancedInput {
        /// Signed amount left over
        residual: Decimal,
    },

    /// Same player listed twice
    #[error("Duplicate player name: {0}")]
    DuplicatePlayerName(PlayerName),

    /// Nothing to settle
    #[error("No positions to settle")]
    NoPositions,

    /// Transfers do not settle the positions they were checked against
    #[error("Settlement mismatch: {0}")]
    SettlementMismatch(String),

    /// Session record error
    #[error("Session error: {0}")]
    Core(#[from] session_core::Error),
}
