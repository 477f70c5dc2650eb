//! Error types for statistics aggregation

use session_core::PlayerName;
use thiserror::Error;

/// Result type for aggregation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Aggregation errors
#[derive(Error, Debug)]
pub enum Error {
    /// A running total no longer fits in a decimal
    #[error("Running totals overflow for player {0}")]
    Overflow(PlayerName),

    /// Session record or collaborator error
    #[error("Session error: {0}")]
    Core(#[from] session_core::Error),
}
