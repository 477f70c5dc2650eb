//! Player Statistics
//!
//! Folds the full session history into per-player running statistics.
//!
//! # Design
//!
//! - Recomputed from scratch on every run, never patched incrementally
//! - Every session's chip values go through that session's own chip ratio
//! - Invalid sessions are skipped and reported, never folded into totals
//! - Roster players with no sessions still get an all-zero record

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod types;
pub mod aggregation;
pub mod error;

// Re-exports
pub use error::{Error, Result};
pub use types::*;
pub use aggregation::{recent_sessions, AggregationEngine};
