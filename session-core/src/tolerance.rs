//! Numeric tolerance
//!
//! Every "is this zero?" decision in both engines goes through [`Tolerance`],
//! so the epsilon lives in exactly one place and comes from configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum deviation treated as equal to zero (default 0.01 currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Decimal")]
pub struct Tolerance(Decimal);

impl Tolerance {
    /// Create tolerance; negative values are taken by magnitude
    pub fn new(epsilon: Decimal) -> Self {
        Self(epsilon.abs())
    }

    /// Epsilon value
    pub fn epsilon(&self) -> Decimal {
        self.0
    }

    /// `|value| <= ε`
    pub fn is_zero(&self, value: Decimal) -> bool {
        value.abs() <= self.0
    }

    /// `value > ε`
    pub fn is_positive(&self, value: Decimal) -> bool {
        value > self.0
    }

    /// `value < -ε`
    pub fn is_negative(&self, value: Decimal) -> bool {
        value < -self.0
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        // One cent
        Self(Decimal::new(1, 2))
    }
}

impl From<Decimal> for Tolerance {
    fn from(epsilon: Decimal) -> Self {
        Self::new(epsilon)
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "±{}", self.0)
    }
}
