//! Participant roster.
//!
//! The roster keeps participants in seating order. It only grows or shrinks
//! at the tail, so a participant's seat number never changes and its
//! identity survives every later reordering of the speaking table.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::PlayerCount;
use crate::error::{GmError, GmResult};

/// Stable identity of a participant, minted once when the seat is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticipantId(pub Uuid);

impl ParticipantId {
    /// Generate a fresh identity.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ParticipantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A seat at the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Stable identity.
    pub id: ParticipantId,
    /// 1-based seat number in the roster.
    pub seat: usize,
    /// Name as typed by the moderator; may be blank.
    pub name: String,
}

impl Participant {
    fn new(seat: usize) -> Self {
        Self {
            id: ParticipantId::new(),
            seat,
            name: String::new(),
        }
    }

    /// The name to show, falling back to `Player N` when blank.
    pub fn display_name(&self) -> String {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            format!("Player {}", self.seat)
        } else {
            trimmed.to_string()
        }
    }
}

/// Ordered participants of one session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    /// Create a roster with `count` default participants.
    pub fn with_count(count: PlayerCount) -> Self {
        let mut roster = Self::default();
        roster.resize(count.get());
        roster
    }

    /// Grow by appending fresh participants or shrink by truncating the tail.
    ///
    /// Retained participants keep their identities and names.
    pub fn resize(&mut self, count: usize) {
        if count <= self.participants.len() {
            self.participants.truncate(count);
            return;
        }
        let start = self.participants.len();
        self.participants
            .extend((start..count).map(|i| Participant::new(i + 1)));
    }

    /// Rename a participant by identity.
    pub fn rename(&mut self, id: ParticipantId, name: impl Into<String>) -> GmResult<()> {
        let participant = self
            .participants
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(GmError::UnknownParticipant(id))?;
        participant.name = name.into();
        Ok(())
    }

    /// Assign comma-separated names to the first seats in roster order.
    ///
    /// Blank tokens are dropped, surplus names are ignored, and seats past
    /// the last supplied name keep whatever name they had. Returns the
    /// number of seats that were renamed.
    pub fn apply_bulk_names(&mut self, text: &str) -> usize {
        let names = text.split(',').map(str::trim).filter(|n| !n.is_empty());
        let mut applied = 0;
        for (participant, name) in self.participants.iter_mut().zip(names) {
            participant.name = name.to_string();
            applied += 1;
        }
        applied
    }

    /// Look up a participant by identity.
    pub fn get(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// Look up a participant by 1-based seat number.
    pub fn by_seat(&self, seat: usize) -> Option<&Participant> {
        seat.checked_sub(1).and_then(|i| self.participants.get(i))
    }

    /// Participants in seating order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Identities in seating order.
    pub fn ids(&self) -> Vec<ParticipantId> {
        self.participants.iter().map(|p| p.id).collect()
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Returns true if the roster has no participants.
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}
