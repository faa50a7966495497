//! Error types for the moderator session.

use thiserror::Error;

use crate::roster::ParticipantId;

/// Result type for session operations.
pub type GmResult<T> = Result<T, GmError>;

/// Errors that can occur while running a moderator session.
///
/// Every variant is recoverable: the operation that produced it left the
/// session untouched, so the moderator can fix the input and retry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GmError {
    /// Role distribution was refused because the role table is not usable.
    #[error("cannot distribute roles: {reason} (slots: {})", format_slots(.slots))]
    Validation {
        /// Offending 1-based slot numbers; empty when the problem is the table size.
        slots: Vec<usize>,
        /// What was wrong with the table.
        reason: String,
    },

    /// Every role is excluded from the prophecy draw.
    #[error("no role is eligible for the prophecy draw")]
    EmptyCandidates,

    /// A participant count or preset outside the supported range.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// No participant with this identity is in the roster.
    #[error("unknown participant: {0}")]
    UnknownParticipant(ParticipantId),

    /// A role slot index past the end of the role table.
    #[error("role slot {0} does not exist")]
    SlotOutOfRange(usize),

    /// Roles were requested before a speaking order was assigned.
    #[error("no speaking order assigned yet")]
    NoSpeakingOrder,

    /// Malformed console input.
    #[error("invalid command: {0}")]
    InvalidCommand(String),
}

fn format_slots(slots: &[usize]) -> String {
    if slots.is_empty() {
        return "-".to_string();
    }
    slots
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
