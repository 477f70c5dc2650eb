//! Host collaborators
//!
//! The engines never read ambient storage. The host hands them a roster of
//! known player names and the session history through these traits.

use crate::{types::*, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Known player names, including players with no recorded sessions
pub trait RosterSource {
    /// Every name the host knows about
    fn known_players(&self) -> Result<Vec<PlayerName>>;
}

/// Full, ordered history of closed sessions
pub trait SessionHistory {
    /// Load every session, in insertion order
    fn load_sessions(&self) -> Result<Vec<SessionRecord>>;
}

/// In-memory roster and history
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStore {
    /// Known players
    #[serde(default)]
    pub roster: Vec<PlayerName>,

    /// Closed sessions, in insertion order
    #[serde(default)]
    pub sessions: Vec<SessionRecord>,
}

impl MemoryStore {
    /// Create empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a known player
    pub fn with_player(mut self, name: impl Into<PlayerName>) -> Self {
        self.roster.push(name.into());
        self
    }

    /// Append a closed session
    pub fn with_session(mut self, session: SessionRecord) -> Self {
        self.sessions.push(session);
        self
    }
}

impl RosterSource for MemoryStore {
    fn known_players(&self) -> Result<Vec<PlayerName>> {
        Ok(self.roster.clone())
    }
}

impl SessionHistory for MemoryStore {
    fn load_sessions(&self) -> Result<Vec<SessionRecord>> {
        Ok(self.sessions.clone())
    }
}

/// JSON snapshot exported by the host: `{ "roster": [...], "sessions": [...] }`
///
/// Each collaborator call re-reads the file. Call [`SnapshotFile::read`] once
/// when both the roster and the history are needed.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    /// Point at a snapshot on disk
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read and parse the whole snapshot
    pub fn read(&self) -> Result<MemoryStore> {
        let content = std::fs::read_to_string(&self.path)?;
        let store: MemoryStore = serde_json::from_str(&content)?;
        tracing::debug!(
            path = %self.path.display(),
            players = store.roster.len(),
            sessions = store.sessions.len(),
            "Loaded snapshot"
        );
        Ok(store)
    }
}

impl RosterSource for SnapshotFile {
    fn known_players(&self) -> Result<Vec<PlayerName>> {
        Ok(self.read()?.roster)
    }
}

impl SessionHistory for SnapshotFile {
    fn load_sessions(&self) -> Result<Vec<SessionRecord>> {
        Ok(self.read()?.sessions)
    }
}
