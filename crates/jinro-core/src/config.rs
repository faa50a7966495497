//! Configuration for a moderator session.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GmError, GmResult};

/// Smallest supported table.
pub const MIN_PLAYERS: usize = 9;
/// Largest supported table.
pub const MAX_PLAYERS: usize = 11;

/// A participant count that has passed the 9..=11 boundary check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PlayerCount(usize);

impl PlayerCount {
    /// Validate a raw participant count.
    pub fn new(count: usize) -> GmResult<Self> {
        if (MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            Ok(Self(count))
        } else {
            Err(GmError::Configuration(format!(
                "participant count must be between {MIN_PLAYERS} and {MAX_PLAYERS}, got {count}"
            )))
        }
    }

    /// The count as a plain number.
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for PlayerCount {
    fn default() -> Self {
        Self(MIN_PLAYERS)
    }
}

impl TryFrom<usize> for PlayerCount {
    type Error = GmError;

    fn try_from(value: usize) -> GmResult<Self> {
        Self::new(value)
    }
}

impl From<PlayerCount> for usize {
    fn from(count: PlayerCount) -> Self {
        count.0
    }
}

impl fmt::Display for PlayerCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Configuration for a session ledger.
///
/// There is intentionally no RNG seed here: every ledger draws from its own
/// OS-seeded generator so outcomes cannot be replayed.
#[derive(Debug, Clone, Default)]
pub struct LedgerConfig {
    /// Participant count a fresh session starts with. Reset always returns to 9.
    pub participant_count: PlayerCount,
    /// Load the matching preset whenever the participant count changes.
    pub reload_preset_on_resize: bool,
}

impl LedgerConfig {
    /// Set the starting participant count.
    pub fn with_participant_count(mut self, count: PlayerCount) -> Self {
        self.participant_count = count;
        self
    }

    /// Reload the role preset on every count change.
    pub fn with_preset_reload(mut self, reload: bool) -> Self {
        self.reload_preset_on_resize = reload;
        self
    }
}
