//! The moderator's session state.
//!
//! `SessionLedger` owns the roster, the role table, one assignment record
//! per participant, and the pinned speaking order. Each ledger carries its
//! own OS-seeded generator; nothing is shared between sessions.

use std::collections::HashMap;
use std::fmt;

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::catalog::RoleCatalog;
use crate::config::{LedgerConfig, PlayerCount};
use crate::engine;
use crate::error::{GmError, GmResult};
use crate::journal::{Journal, JournalEntry};
use crate::record::{AssignmentRecord, OrderPin, TableRow};
use crate::roster::{ParticipantId, Roster};

/// Where the session is in the deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerState {
    /// Participants are seated but no speaking order exists.
    RosterReady,
    /// A speaking order is pinned; no roles yet.
    OrderAssigned,
    /// Speaking order pinned and roles dealt.
    RolesAssigned,
}

impl fmt::Display for LedgerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RosterReady => write!(f, "roster ready"),
            Self::OrderAssigned => write!(f, "order assigned"),
            Self::RolesAssigned => write!(f, "roles assigned"),
        }
    }
}

/// One moderator session.
pub struct SessionLedger {
    config: LedgerConfig,
    count: PlayerCount,
    roster: Roster,
    catalog: RoleCatalog,
    records: HashMap<ParticipantId, AssignmentRecord>,
    pin: Option<OrderPin>,
    omen: Option<String>,
    bulk_names: String,
    journal: Journal,
    rng: StdRng,
}

impl Default for SessionLedger {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

impl SessionLedger {
    /// Start a session with default participants and no roles.
    pub fn new(config: LedgerConfig) -> Self {
        let count = config.participant_count;
        let roster = Roster::with_count(count);
        let mut ledger = Self {
            config,
            count,
            roster,
            catalog: RoleCatalog::new(),
            records: HashMap::new(),
            pin: None,
            omen: None,
            bulk_names: String::new(),
            journal: Journal::new(),
            rng: StdRng::from_os_rng(),
        };
        ledger.clear_assignments();
        ledger
    }

    /// Current participant count.
    pub fn participant_count(&self) -> PlayerCount {
        self.count
    }

    /// The roster in seating order.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The role table.
    pub fn catalog(&self) -> &RoleCatalog {
        &self.catalog
    }

    /// The pinned speaking order, if one was drawn.
    pub fn pin(&self) -> Option<&OrderPin> {
        self.pin.as_ref()
    }

    /// The assignment record of one participant.
    pub fn record(&self, id: ParticipantId) -> Option<&AssignmentRecord> {
        self.records.get(&id)
    }

    /// The last prophecy target.
    pub fn omen(&self) -> Option<&str> {
        self.omen.as_deref()
    }

    /// The pending bulk-name text.
    pub fn bulk_names(&self) -> &str {
        &self.bulk_names
    }

    /// Session history.
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Where the session is in the deal.
    pub fn state(&self) -> LedgerState {
        if self.pin.is_none() {
            LedgerState::RosterReady
        } else if self.records.values().any(|r| r.role.is_some()) {
            LedgerState::RolesAssigned
        } else {
            LedgerState::OrderAssigned
        }
    }

    /// Change the number of participants.
    ///
    /// A different count discards the speaking order and any dealt roles.
    /// Setting the current count again changes nothing.
    pub fn set_participant_count(&mut self, count: usize) -> GmResult<()> {
        let count = PlayerCount::new(count)?;
        if count == self.count {
            return Ok(());
        }

        let from = self.count;
        let invalidated = self.pin.is_some();
        self.count = count;
        self.roster.resize(count.get());
        self.clear_assignments();
        if invalidated {
            tracing::info!(%from, to = %count, "participant count changed, speaking order discarded");
        }
        self.journal.append(JournalEntry::CountChanged {
            from: from.get(),
            to: count.get(),
            invalidated,
            timestamp: Utc::now(),
        });

        if self.config.reload_preset_on_resize {
            self.load_preset_for(count);
        }
        Ok(())
    }

    /// Replace the role table with the preset for `count`.
    pub fn load_role_preset(&mut self, count: usize) -> GmResult<()> {
        let count = PlayerCount::new(count)?;
        self.load_preset_for(count);
        Ok(())
    }

    fn load_preset_for(&mut self, count: PlayerCount) {
        self.catalog.load(count);
        tracing::debug!(%count, "role preset loaded");
        self.journal.append(JournalEntry::PresetLoaded {
            count: count.get(),
            timestamp: Utc::now(),
        });
    }

    /// Edit one role slot. `number` is the 1-based slot number.
    pub fn edit_role_slot(
        &mut self,
        number: usize,
        name: &str,
        prophecy_excluded: bool,
    ) -> GmResult<()> {
        self.catalog.update_slot(number, name, prophecy_excluded)?;
        self.journal.append(JournalEntry::RoleEdited {
            number,
            name: name.to_string(),
            prophecy_excluded,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Store comma-separated names to apply later.
    pub fn set_bulk_names(&mut self, text: &str) {
        self.bulk_names = text.to_string();
    }

    /// Apply the stored bulk names in seating order. Returns how many seats were renamed.
    pub fn apply_bulk_names(&mut self) -> usize {
        let renamed = self.roster.apply_bulk_names(&self.bulk_names);
        self.journal.append(JournalEntry::NamesChanged {
            renamed,
            timestamp: Utc::now(),
        });
        renamed
    }

    /// Rename one participant by identity.
    pub fn set_participant_name(&mut self, id: ParticipantId, name: &str) -> GmResult<()> {
        self.roster.rename(id, name)?;
        self.journal.append(JournalEntry::NamesChanged {
            renamed: 1,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Draw a fresh speaking order and pin it. Any dealt roles are discarded.
    pub fn assign_speaking_order(&mut self) {
        let drawn = engine::assign_speaking_order(&self.roster, &mut self.rng);
        self.records = drawn
            .records
            .into_iter()
            .map(|r| (r.participant, r))
            .collect();
        self.pin = Some(drawn.pin);

        tracing::info!(participants = self.roster.len(), "speaking order assigned");
        self.journal.append(JournalEntry::OrderDrawn {
            participants: self.roster.len(),
            timestamp: Utc::now(),
        });
    }

    /// Deal the role table to the pinned participants.
    ///
    /// Speaking order is left exactly as it was. On failure nothing changes.
    pub fn assign_roles(&mut self) -> GmResult<()> {
        let Some(pin) = &self.pin else {
            tracing::warn!("roles requested before a speaking order was drawn");
            return Err(GmError::NoSpeakingOrder);
        };

        let pinned: Vec<AssignmentRecord> = pin
            .ids()
            .iter()
            .filter_map(|id| self.records.get(id).cloned())
            .collect();

        let dealt = engine::assign_roles(&pinned, self.catalog.slots(), &mut self.rng)
            .inspect_err(|e| tracing::warn!(error = %e, "role distribution refused"))?;

        for record in dealt {
            self.records.insert(record.participant, record);
        }

        tracing::info!(participants = self.roster.len(), "roles assigned");
        self.journal.append(JournalEntry::RolesDealt {
            participants: self.roster.len(),
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Draw a prophecy target. A failed draw keeps the previous one.
    pub fn draw_prophecy(&mut self) -> GmResult<&str> {
        let role = engine::draw_prophecy(self.catalog.slots(), &mut self.rng)
            .inspect_err(|e| tracing::warn!(error = %e, "prophecy draw refused"))?;

        tracing::info!("prophecy drawn");
        self.journal.append(JournalEntry::ProphecyDrawn {
            role: role.clone(),
            timestamp: Utc::now(),
        });
        let omen: &str = self.omen.insert(role);
        Ok(omen)
    }

    /// Rows in pinned speaking order, or seating order when nothing is pinned.
    pub fn current_table(&self) -> Vec<TableRow> {
        let order: Vec<ParticipantId> = match &self.pin {
            Some(pin) => pin.ids().to_vec(),
            None => self.roster.ids(),
        };

        order
            .into_iter()
            .filter_map(|id| {
                let participant = self.roster.get(id)?;
                let record = self.records.get(&id)?;
                Some(TableRow {
                    participant: id,
                    order: record.speaking_order,
                    name: participant.display_name(),
                    role: record.role.clone(),
                    draw_a: record.order_draw,
                    draw_b: record.role_draw,
                })
            })
            .collect()
    }

    /// `01.Name` lines in speaking order; empty when no order is pinned.
    pub fn export_speaking_order_text(&self) -> String {
        self.export_lines(TableRow::order_line)
    }

    /// `01.Name-Role` lines in speaking order; empty when no order is pinned.
    pub fn export_role_text(&self) -> String {
        self.export_lines(TableRow::role_line)
    }

    fn export_lines(&self, line: fn(&TableRow) -> String) -> String {
        if self.pin.is_none() {
            return String::new();
        }
        self.current_table()
            .iter()
            .map(line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Session history as text.
    pub fn export_journal_text(&self) -> String {
        self.journal.export_text()
    }

    /// Return every piece of state to its defaults: 9 unnamed participants,
    /// no role table, no speaking order, no prophecy.
    pub fn reset_all(&mut self) {
        self.count = PlayerCount::default();
        self.roster = Roster::with_count(self.count);
        self.catalog.clear();
        self.omen = None;
        self.bulk_names.clear();
        self.journal.clear();
        self.clear_assignments();
        tracing::info!(count = %self.count, "session reset");
    }

    fn clear_assignments(&mut self) {
        self.pin = None;
        self.records = self
            .roster
            .participants()
            .iter()
            .map(|p| (p.id, AssignmentRecord::blank(p.id)))
            .collect();
    }
}
