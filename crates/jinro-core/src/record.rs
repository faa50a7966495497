//! Assignment records, the pinned speaking order, and table rows.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::roster::ParticipantId;

/// A 1-based speaking position, shown as two digits ("01".."11").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct OrderLabel(pub usize);

impl From<OrderLabel> for String {
    fn from(label: OrderLabel) -> Self {
        label.to_string()
    }
}

impl TryFrom<String> for OrderLabel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, String> {
        match value.parse::<usize>() {
            Ok(n) if n > 0 && value.len() >= 2 => Ok(Self(n)),
            _ => Err(format!("invalid speaking-order label: {value:?}")),
        }
    }
}

impl fmt::Display for OrderLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// Per-participant outcome of the draws.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    /// Who this record belongs to.
    pub participant: ParticipantId,
    /// Speaking position, once assigned.
    pub speaking_order: Option<OrderLabel>,
    /// Role name, once distributed.
    pub role: Option<String>,
    /// Last draw used for the speaking order (1..=1000).
    pub order_draw: Option<u32>,
    /// Last draw used for role distribution (1..=2000).
    pub role_draw: Option<u32>,
}

impl AssignmentRecord {
    /// A record with nothing assigned yet.
    pub fn blank(participant: ParticipantId) -> Self {
        Self {
            participant,
            speaking_order: None,
            role: None,
            order_draw: None,
            role_draw: None,
        }
    }
}

/// Snapshot of participant identities in speaking order.
///
/// Captured once when the speaking order is drawn. Every later view of the
/// table is projected through it rather than re-sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPin(Vec<ParticipantId>);

impl OrderPin {
    /// Pin the given identities in this order.
    pub fn new(ids: Vec<ParticipantId>) -> Self {
        Self(ids)
    }

    /// Identities in speaking order.
    pub fn ids(&self) -> &[ParticipantId] {
        &self.0
    }

    /// Speaking position of a participant, if pinned.
    pub fn label_of(&self, id: ParticipantId) -> Option<OrderLabel> {
        self.0
            .iter()
            .position(|pinned| *pinned == id)
            .map(|i| OrderLabel(i + 1))
    }

    /// Number of pinned participants.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing is pinned.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One rendered row of the session table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Participant identity.
    pub participant: ParticipantId,
    /// Speaking position.
    pub order: Option<OrderLabel>,
    /// Display name at the time the row was built.
    pub name: String,
    /// Distributed role.
    pub role: Option<String>,
    /// Speaking-order draw.
    pub draw_a: Option<u32>,
    /// Role-distribution draw.
    pub draw_b: Option<u32>,
}

impl TableRow {
    /// `01.Name`
    pub fn order_line(&self) -> String {
        format!("{}.{}", label_text(self.order), self.name)
    }

    /// `01.Name-Role`, with nothing after the dash when no role is set.
    pub fn role_line(&self) -> String {
        format!(
            "{}.{}-{}",
            label_text(self.order),
            self.name,
            self.role.as_deref().unwrap_or("")
        )
    }
}

fn label_text(label: Option<OrderLabel>) -> String {
    label.map(|l| l.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(order: Option<usize>, role: Option<&str>) -> TableRow {
        TableRow {
            participant: ParticipantId::new(),
            order: order.map(OrderLabel),
            name: "Alice".to_string(),
            role: role.map(str::to_string),
            draw_a: None,
            draw_b: None,
        }
    }

    #[test]
    fn label_is_two_digits() {
        assert_eq!(OrderLabel(1).to_string(), "01");
        assert_eq!(OrderLabel(11).to_string(), "11");
    }

    #[test]
    fn export_lines() {
        assert_eq!(row(Some(3), None).order_line(), "03.Alice");
        assert_eq!(row(Some(3), Some("占い")).role_line(), "03.Alice-占い");
        assert_eq!(row(Some(3), None).role_line(), "03.Alice-");
    }

    #[test]
    fn pin_labels() {
        let ids: Vec<_> = (0..3).map(|_| ParticipantId::new()).collect();
        let pin = OrderPin::new(ids.clone());
        assert_eq!(pin.label_of(ids[2]), Some(OrderLabel(3)));
        assert_eq!(pin.label_of(ParticipantId::new()), None);
        assert_eq!(pin.len(), 3);
    }

    #[test]
    fn label_serializes_as_two_digits() {
        assert_eq!(serde_json::to_string(&OrderLabel(3)).unwrap(), "\"03\"");
        let back: OrderLabel = serde_json::from_str("\"11\"").unwrap();
        assert_eq!(back, OrderLabel(11));
        assert!(serde_json::from_str::<OrderLabel>("\"00\"").is_err());
        assert!(serde_json::from_str::<OrderLabel>("\"7\"").is_err());
    }
}
