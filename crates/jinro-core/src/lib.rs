//! Moderator assistant for werewolf-style social deduction games.
//!
//! Draws a speaking order for 9 to 11 participants, deals a fixed role
//! table through a second independent draw without disturbing that order,
//! and picks a prophecy target among the roles not excluded from it.
//! A [`SessionLedger`] holds one moderator session; the free functions in
//! [`engine`] do the draws.

pub mod catalog;
pub mod config;
mod console;
pub mod engine;
pub mod error;
pub mod journal;
pub mod ledger;
pub mod record;
pub mod roster;

pub use catalog::{RoleCatalog, RoleKind, RoleSlot, load_preset};
pub use config::{LedgerConfig, MAX_PLAYERS, MIN_PLAYERS, PlayerCount};
pub use engine::{assign_roles, assign_speaking_order, draw_prophecy};
pub use error::{GmError, GmResult};
pub use journal::{Journal, JournalEntry};
pub use ledger::{LedgerState, SessionLedger};
pub use record::{AssignmentRecord, OrderLabel, OrderPin, TableRow};
pub use roster::{Participant, ParticipantId, Roster};
