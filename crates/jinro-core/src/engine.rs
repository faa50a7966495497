//! Random draws for speaking order, role distribution, and the prophecy.
//!
//! Every function takes the generator as a parameter and keeps no state
//! between calls, so each call is independent of all earlier ones.

use rand::Rng;

use crate::catalog::RoleSlot;
use crate::error::{GmError, GmResult};
use crate::record::{AssignmentRecord, OrderLabel, OrderPin};
use crate::roster::Roster;

/// Upper bound of the speaking-order draw.
pub const ORDER_DRAW_MAX: u32 = 1000;
/// Upper bound of the role-distribution draw.
pub const ROLE_DRAW_MAX: u32 = 2000;

/// Result of a speaking-order draw.
#[derive(Debug, Clone)]
pub struct SpeakingOrder {
    /// Identities in the new speaking order.
    pub pin: OrderPin,
    /// One record per participant, in pinned order, with no roles.
    pub records: Vec<AssignmentRecord>,
}

/// Draw a fresh speaking order for every participant in the roster.
///
/// Each participant draws from 1..=1000 and the roster is sorted by draw
/// ascending. The sort is stable, so equal draws keep seating order.
pub fn assign_speaking_order<R: Rng + ?Sized>(roster: &Roster, rng: &mut R) -> SpeakingOrder {
    let mut drawn: Vec<_> = roster
        .participants()
        .iter()
        .map(|p| (p.id, rng.random_range(1..=ORDER_DRAW_MAX)))
        .collect();
    drawn.sort_by_key(|(_, draw)| *draw);

    tracing::debug!(participants = drawn.len(), "speaking-order draws made");

    let records = drawn
        .iter()
        .enumerate()
        .map(|(i, (id, draw))| AssignmentRecord {
            participant: *id,
            speaking_order: Some(OrderLabel(i + 1)),
            role: None,
            order_draw: Some(*draw),
            role_draw: None,
        })
        .collect();
    let pin = OrderPin::new(drawn.into_iter().map(|(id, _)| id).collect());

    SpeakingOrder { pin, records }
}

/// Check that a role table can be dealt to `participants` people.
pub fn validate_role_table(slots: &[RoleSlot], participants: usize) -> GmResult<()> {
    if slots.len() != participants {
        return Err(GmError::Validation {
            slots: Vec::new(),
            reason: format!(
                "{} roles for {participants} participants",
                slots.len()
            ),
        });
    }

    let blank: Vec<usize> = slots
        .iter()
        .filter(|s| s.name.trim().is_empty())
        .map(|s| s.number)
        .collect();
    if !blank.is_empty() {
        return Err(GmError::Validation {
            slots: blank,
            reason: "role names are empty".to_string(),
        });
    }

    Ok(())
}

/// Deal the role table to the given records.
///
/// Every record draws from 1..=2000; the record with the lowest draw gets
/// slot 1, the next slot 2, and so on. Equal draws keep the input order.
/// The returned records are in the same order as `records`, with speaking
/// order untouched. Nothing is returned on a validation failure.
pub fn assign_roles<R: Rng + ?Sized>(
    records: &[AssignmentRecord],
    slots: &[RoleSlot],
    rng: &mut R,
) -> GmResult<Vec<AssignmentRecord>> {
    validate_role_table(slots, records.len())?;

    let draws: Vec<u32> = records
        .iter()
        .map(|_| rng.random_range(1..=ROLE_DRAW_MAX))
        .collect();

    let mut distribution: Vec<usize> = (0..records.len()).collect();
    distribution.sort_by_key(|&i| draws[i]);

    tracing::debug!(participants = records.len(), "role draws made");

    let mut dealt = records.to_vec();
    for (slot, &index) in slots.iter().zip(&distribution) {
        let record = &mut dealt[index];
        record.role = Some(slot.name.clone());
        record.role_draw = Some(draws[index]);
    }
    Ok(dealt)
}

/// Pick one eligible role name uniformly at random.
pub fn draw_prophecy<R: Rng + ?Sized>(slots: &[RoleSlot], rng: &mut R) -> GmResult<String> {
    let candidates: Vec<&RoleSlot> = slots.iter().filter(|s| !s.prophecy_excluded).collect();
    if candidates.is_empty() {
        return Err(GmError::EmptyCandidates);
    }
    let pick = candidates[rng.random_range(0..candidates.len())];
    Ok(pick.name.clone())
}
