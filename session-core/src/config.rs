//! Configuration shared by the settlement and statistics engines

use crate::Tolerance;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Service name
    pub service_name: String,

    /// Tolerance (ε) for every zero comparison, in currency units
    pub tolerance: Decimal,

    /// Size of the "most recent sessions" view
    pub recent_sessions: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_name: "homegame-ledger".to_string(),
            tolerance: Tolerance::default().epsilon(),
            recent_sessions: 10,
        }
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();

        if let Ok(tolerance) = std::env::var("HOMEGAME_TOLERANCE") {
            config.tolerance = Decimal::from_str(&tolerance).map_err(|e| {
                crate::Error::Config(format!("Invalid HOMEGAME_TOLERANCE {:?}: {}", tolerance, e))
            })?;
        }

        if let Ok(recent) = std::env::var("HOMEGAME_RECENT_SESSIONS") {
            config.recent_sessions = recent.parse().map_err(|e| {
                crate::Error::Config(format!("Invalid HOMEGAME_RECENT_SESSIONS {:?}: {}", recent, e))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the engines cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        if self.tolerance < Decimal::ZERO {
            return Err(crate::Error::Config(format!(
                "tolerance must be non-negative, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }

    /// Tolerance as used by the engines
    pub fn tolerance(&self) -> Tolerance {
        Tolerance::new(self.tolerance)
    }
}
