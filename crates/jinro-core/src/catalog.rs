//! Role tables for 9, 10, and 11 participants.
//!
//! A [`RoleCatalog`] is loaded from a fixed preset and can then be edited
//! slot by slot. Loading again discards every edit.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::PlayerCount;
use crate::error::{GmError, GmResult};

/// What a role does at the table. Fixed when the preset is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleKind {
    /// A wolf. The deceptive side.
    Werewolf,
    /// A villager who wins with the wolves.
    Madman,
    /// Divines one player each night.
    Seer,
    /// Learns the alignment of the executed.
    Medium,
    /// Guards one player each night.
    Knight,
    /// Holds two shots; only in the 11-player table.
    DualGun,
    /// No night action.
    Villager,
}

impl RoleKind {
    /// Whether the role belongs to the deceptive side.
    pub fn is_deceptive(self) -> bool {
        matches!(self, Self::Werewolf)
    }

    /// Whether the prophecy draw skips this role unless the moderator says otherwise.
    pub fn excluded_from_prophecy_by_default(self) -> bool {
        matches!(self, Self::Werewolf | Self::Seer)
    }
}

impl fmt::Display for RoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Werewolf => write!(f, "werewolf"),
            Self::Madman => write!(f, "madman"),
            Self::Seer => write!(f, "seer"),
            Self::Medium => write!(f, "medium"),
            Self::Knight => write!(f, "knight"),
            Self::DualGun => write!(f, "dual-gun"),
            Self::Villager => write!(f, "villager"),
        }
    }
}

/// One row of the role table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSlot {
    /// 1-based position in the table. Never changes after loading.
    pub number: usize,
    /// Role name shown to players. Editable.
    pub name: String,
    /// The preset role this slot was loaded as.
    pub kind: RoleKind,
    /// Whether the prophecy draw skips this slot.
    pub prophecy_excluded: bool,
}

impl RoleSlot {
    fn preset(number: usize, name: &str, kind: RoleKind) -> Self {
        Self {
            number,
            name: name.to_string(),
            kind,
            prophecy_excluded: kind.excluded_from_prophecy_by_default(),
        }
    }
}

impl fmt::Display for RoleSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let draw = if self.prophecy_excluded {
            "excluded"
        } else {
            "eligible"
        };
        write!(f, "{}. {} [{}] {draw}", self.number, self.name, self.kind)
    }
}

/// Return the preset role table for a participant count.
pub fn load_preset(count: PlayerCount) -> Vec<RoleSlot> {
    use RoleKind::*;

    let rows: &[(&str, RoleKind)] = match count.get() {
        9 => &[
            ("人狼A", Werewolf),
            ("人狼B", Werewolf),
            ("狂人", Madman),
            ("占い", Seer),
            ("霊媒", Medium),
            ("騎士", Knight),
            ("村人A", Villager),
            ("村人B", Villager),
            ("村人C", Villager),
        ],
        10 => &[
            ("人狼A", Werewolf),
            ("人狼B", Werewolf),
            ("狂人", Madman),
            ("占い", Seer),
            ("霊媒", Medium),
            ("騎士", Knight),
            ("村人A", Villager),
            ("村人B", Villager),
            ("村人C", Villager),
            ("村人D", Villager),
        ],
        _ => &[
            ("人狼A", Werewolf),
            ("人狼B", Werewolf),
            ("人狼C", Werewolf),
            ("狂人", Madman),
            ("占い", Seer),
            ("霊媒", Medium),
            ("騎士", Knight),
            ("二丁拳銃", DualGun),
            ("村人A", Villager),
            ("村人B", Villager),
            ("村人C", Villager),
        ],
    };

    rows.iter()
        .enumerate()
        .map(|(i, (name, kind))| RoleSlot::preset(i + 1, name, *kind))
        .collect()
}

/// The editable role table of a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleCatalog {
    slots: Vec<RoleSlot>,
}

impl RoleCatalog {
    /// Create an empty catalog (no roles loaded).
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the table with the preset for `count`, dropping all edits.
    pub fn load(&mut self, count: PlayerCount) {
        self.slots = load_preset(count);
    }

    /// Edit one slot in place. `number` is the 1-based slot number.
    pub fn update_slot(
        &mut self,
        number: usize,
        name: impl Into<String>,
        prophecy_excluded: bool,
    ) -> GmResult<()> {
        let slot = number
            .checked_sub(1)
            .and_then(|i| self.slots.get_mut(i))
            .ok_or(GmError::SlotOutOfRange(number))?;
        slot.name = name.into();
        slot.prophecy_excluded = prophecy_excluded;
        Ok(())
    }

    /// All slots in table order.
    pub fn slots(&self) -> &[RoleSlot] {
        &self.slots
    }

    /// Look up a slot by its 1-based number.
    pub fn slot(&self, number: usize) -> Option<&RoleSlot> {
        number.checked_sub(1).and_then(|i| self.slots.get(i))
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no preset has been loaded.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drop every slot.
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(n: usize) -> PlayerCount {
        PlayerCount::new(n).unwrap()
    }

    fn kinds(slots: &[RoleSlot], kind: RoleKind) -> usize {
        slots.iter().filter(|s| s.kind == kind).count()
    }

    #[test]
    fn preset_sizes_match_count() {
        for n in 9..=11 {
            assert_eq!(load_preset(count(n)).len(), n);
        }
    }

    #[test]
    fn preset_role_counts() {
        for n in 9..=11 {
            let slots = load_preset(count(n));
            let wolves = slots.iter().filter(|s| s.kind.is_deceptive()).count();
            assert_eq!(wolves, if n == 11 { 3 } else { 2 }, "wolves at {n}");
            assert_eq!(kinds(&slots, RoleKind::Seer), 1);
            assert_eq!(kinds(&slots, RoleKind::Medium), 1);
            assert_eq!(kinds(&slots, RoleKind::Knight), 1);
            assert_eq!(kinds(&slots, RoleKind::DualGun), usize::from(n == 11));
        }
    }

    #[test]
    fn default_exclusions() {
        let slots = load_preset(count(11));
        for slot in &slots {
            let expected = matches!(slot.kind, RoleKind::Werewolf | RoleKind::Seer);
            assert_eq!(slot.prophecy_excluded, expected, "{slot}");
        }
    }

    #[test]
    fn numbers_are_sequential() {
        let slots = load_preset(count(10));
        let numbers: Vec<_> = slots.iter().map(|s| s.number).collect();
        assert_eq!(numbers, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn nine_player_listing() {
        let listing = load_preset(count(9))
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        insta::assert_snapshot!(listing, @r"
        1. 人狼A [werewolf] excluded
        2. 人狼B [werewolf] excluded
        3. 狂人 [madman] eligible
        4. 占い [seer] excluded
        5. 霊媒 [medium] eligible
        6. 騎士 [knight] eligible
        7. 村人A [villager] eligible
        8. 村人B [villager] eligible
        9. 村人C [villager] eligible
        ");
    }

    #[test]
    fn update_slot_in_place() {
        let mut catalog = RoleCatalog::new();
        catalog.load(count(9));
        catalog.update_slot(3, "狐", true).unwrap();
        let slot = catalog.slot(3).unwrap();
        assert_eq!(slot.name, "狐");
        assert!(slot.prophecy_excluded);
        assert_eq!(slot.kind, RoleKind::Madman);
        assert_eq!(catalog.len(), 9);
    }

    #[test]
    fn update_slot_out_of_range() {
        let mut catalog = RoleCatalog::new();
        catalog.load(count(9));
        assert_eq!(
            catalog.update_slot(0, "x", false),
            Err(GmError::SlotOutOfRange(0))
        );
        assert_eq!(
            catalog.update_slot(10, "x", false),
            Err(GmError::SlotOutOfRange(10))
        );
    }

    #[test]
    fn reload_discards_edits() {
        let mut catalog = RoleCatalog::new();
        catalog.load(count(9));
        catalog.update_slot(1, "renamed", false).unwrap();
        catalog.load(count(9));
        assert_eq!(catalog.slot(1).unwrap().name, "人狼A");
        assert!(catalog.slot(1).unwrap().prophecy_excluded);
    }

    #[test]
    fn empty_until_loaded() {
        let mut catalog = RoleCatalog::new();
        assert!(catalog.is_empty());
        catalog.load(count(10));
        assert!(!catalog.is_empty());
        catalog.clear();
        assert!(catalog.is_empty());
    }
}
