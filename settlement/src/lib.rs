//! Settlement Engine
//!
//! Turns one session's per-player profit/loss into the list of payments that
//! brings every balance back to zero.
//!
//! # Netting Algorithm
//!
//! Greedy two-pointer matching of debtors against creditors:
//! - Largest debtor pays largest creditor first
//! - At most `n - 1` transfers for `n` non-zero positions
//! - Ties keep input order, so output is reproducible
//!
//! # Example
//!
//! ```
//! use rust_decimal::Decimal;
//! use session_core::PlayerPosition;
//! use settlement::NettingEngine;
//!
//! let engine = NettingEngine::default();
//! let transfers = engine.settle(&[
//!     PlayerPosition::new("alice", Decimal::new(100, 0)),
//!     PlayerPosition::new("bob", Decimal::new(-60, 0)),
//!     PlayerPosition::new("carol", Decimal::new(-40, 0)),
//! ])?;
//!
//! assert_eq!(transfers.len(), 2);
//! assert_eq!(transfers[0].from.as_str(), "bob");
//! # Ok::<(), settlement::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod types;
pub mod netting;
pub mod error;

// Re-exports
pub use error::{Error, Result};
pub use types::*;
pub use netting::{replay, NettingEngine};
