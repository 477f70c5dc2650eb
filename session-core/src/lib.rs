//! Home Game Session Core
//!
//! Shared domain model for the settlement and statistics engines.
//!
//! # Architecture
//!
//! - **Sessions**: Immutable records of one game, each with its own chip ratio
//! - **Positions**: Per-player profit/loss in currency, derived from a session
//! - **Tolerance**: The single epsilon every zero comparison goes through
//! - **Collaborators**: Roster and session-history sources injected by the host
//!
//! # Invariants
//!
//! - Money conservation: Σ(positions) == 0 within tolerance for a session
//! - Chip ratio is strictly positive and never mutated after creation
//! - Player names are unique within one session

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod types;
pub mod tolerance;
pub mod history;
pub mod error;
pub mod config;

// Re-exports
pub use error::{Error, Result};
pub use types::{PlayerEntry, PlayerName, PlayerPosition, SessionId, SessionRecord};
pub use tolerance::Tolerance;
pub use history::{MemoryStore, RosterSource, SessionHistory, SnapshotFile};
pub use config::Config;
