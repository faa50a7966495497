//! Session history.
//!
//! The journal records what the moderator did, never who got which role.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single entry in the session journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JournalEntry {
    /// The participant count changed.
    CountChanged {
        /// Previous count.
        from: usize,
        /// New count.
        to: usize,
        /// Whether an assigned speaking order was thrown away.
        invalidated: bool,
        /// When it happened.
        timestamp: DateTime<Utc>,
    },
    /// A role preset was loaded, replacing any edits.
    PresetLoaded {
        /// Table size.
        count: usize,
        /// When it happened.
        timestamp: DateTime<Utc>,
    },
    /// A role slot was edited.
    RoleEdited {
        /// 1-based slot number.
        number: usize,
        /// New role name.
        name: String,
        /// New exclusion flag.
        prophecy_excluded: bool,
        /// When it happened.
        timestamp: DateTime<Utc>,
    },
    /// Participant names were changed.
    NamesChanged {
        /// How many seats were renamed.
        renamed: usize,
        /// When it happened.
        timestamp: DateTime<Utc>,
    },
    /// A fresh speaking order was drawn.
    OrderDrawn {
        /// Participants in the draw.
        participants: usize,
        /// When it happened.
        timestamp: DateTime<Utc>,
    },
    /// Roles were dealt.
    RolesDealt {
        /// Participants who received a role.
        participants: usize,
        /// When it happened.
        timestamp: DateTime<Utc>,
    },
    /// A prophecy target was drawn.
    ProphecyDrawn {
        /// The drawn role name.
        role: String,
        /// When it happened.
        timestamp: DateTime<Utc>,
    },
}

impl JournalEntry {
    /// When the entry was recorded.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::CountChanged { timestamp, .. }
            | Self::PresetLoaded { timestamp, .. }
            | Self::RoleEdited { timestamp, .. }
            | Self::NamesChanged { timestamp, .. }
            | Self::OrderDrawn { timestamp, .. }
            | Self::RolesDealt { timestamp, .. }
            | Self::ProphecyDrawn { timestamp, .. } => *timestamp,
        }
    }
}

impl fmt::Display for JournalEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CountChanged {
                from,
                to,
                invalidated,
                ..
            } => {
                write!(f, "Participants: {from} -> {to}")?;
                if *invalidated {
                    write!(f, " (speaking order discarded)")?;
                }
                Ok(())
            }
            Self::PresetLoaded { count, .. } => write!(f, "Loaded {count}-player role table"),
            Self::RoleEdited {
                number,
                name,
                prophecy_excluded,
                ..
            } => {
                let draw = if *prophecy_excluded {
                    "excluded"
                } else {
                    "eligible"
                };
                write!(f, "Role {number} set to {name} ({draw})")
            }
            Self::NamesChanged { renamed, .. } => write!(f, "Renamed {renamed} participant(s)"),
            Self::OrderDrawn { participants, .. } => {
                write!(f, "Speaking order drawn for {participants}")
            }
            Self::RolesDealt { participants, .. } => write!(f, "Roles dealt to {participants}"),
            Self::ProphecyDrawn { role, .. } => write!(f, "Prophecy: {role}"),
        }
    }
}

/// A chronological log of session events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the journal.
    pub fn append(&mut self, entry: JournalEntry) {
        self.entries.push(entry);
    }

    /// Get all entries.
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the journal is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Export as plain text, one `[HH:MM:SS] ...` line per entry.
    pub fn export_text(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("[{}] {e}", e.timestamp().format("%H:%M:%S")))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
