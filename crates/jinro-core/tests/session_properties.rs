//! End-to-end properties of a moderator session.

use std::collections::HashMap;

use jinro_core::{GmError, LedgerState, PlayerCount, RoleKind, SessionLedger, load_preset};

fn ledger_with_names(names: &str) -> SessionLedger {
    let mut ledger = SessionLedger::default();
    ledger.set_bulk_names(names);
    ledger.apply_bulk_names();
    ledger
}

fn is_order_line(line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.len() == 4
        && bytes[0].is_ascii_digit()
        && bytes[1].is_ascii_digit()
        && bytes[2] == b'.'
        && bytes[3].is_ascii_uppercase()
}

// ---------------------------------------------------------------------------
// presets
// ---------------------------------------------------------------------------

#[test]
fn presets_have_expected_shape() {
    for n in 9..=11 {
        let slots = load_preset(PlayerCount::new(n).unwrap());
        assert_eq!(slots.len(), n);
        let count = |kind: RoleKind| slots.iter().filter(|s| s.kind == kind).count();
        assert_eq!(count(RoleKind::Werewolf), if n == 11 { 3 } else { 2 });
        assert_eq!(count(RoleKind::Seer), 1);
        assert_eq!(count(RoleKind::Medium), 1);
    }
}

// ---------------------------------------------------------------------------
// nine named players, end to end
// ---------------------------------------------------------------------------

#[test]
fn nine_player_session() {
    let mut ledger = ledger_with_names("A,B,C,D,E,F,G,H,I");
    ledger.load_role_preset(9).unwrap();

    ledger.assign_speaking_order();
    let order = ledger.export_speaking_order_text();
    let lines: Vec<_> = order.lines().collect();
    assert_eq!(lines.len(), 9);
    assert!(lines.iter().all(|l| is_order_line(l)), "{order}");

    ledger.assign_roles().unwrap();
    assert_eq!(ledger.state(), LedgerState::RolesAssigned);
    assert_eq!(ledger.export_speaking_order_text(), order);

    let mut dealt: Vec<String> = ledger
        .export_role_text()
        .lines()
        .map(|l| l.split_once('-').unwrap().1.to_string())
        .collect();
    dealt.sort();
    let mut expected = vec![
        "人狼A", "人狼B", "狂人", "占い", "霊媒", "騎士", "村人A", "村人B", "村人C",
    ];
    expected.sort();
    assert_eq!(dealt, expected);
}

#[test]
fn repeated_deals_keep_name_to_label_mapping() {
    let mut ledger = ledger_with_names("A,B,C,D,E,F,G,H,I,J,K");
    ledger.set_participant_count(11).unwrap();
    ledger.load_role_preset(11).unwrap();
    ledger.assign_speaking_order();

    let labels = |l: &SessionLedger| -> HashMap<String, String> {
        l.current_table()
            .into_iter()
            .map(|r| (r.name, r.order.unwrap().to_string()))
            .collect()
    };
    let before = labels(&ledger);
    for _ in 0..20 {
        ledger.assign_roles().unwrap();
        assert_eq!(labels(&ledger), before);
    }
}

#[test]
fn roles_vary_between_deals() {
    let mut ledger = ledger_with_names("A,B,C,D,E,F,G,H,I");
    ledger.load_role_preset(9).unwrap();
    ledger.assign_speaking_order();
    let first = ledger.pin().unwrap().ids()[0];

    let mut seen = std::collections::HashSet::new();
    for _ in 0..100 {
        ledger.assign_roles().unwrap();
        seen.insert(ledger.record(first).unwrap().role.clone().unwrap());
    }
    assert!(seen.len() > 1);
}

// ---------------------------------------------------------------------------
// prophecy
// ---------------------------------------------------------------------------

#[test]
fn prophecy_respects_exclusions() {
    let mut ledger = SessionLedger::default();
    ledger.load_role_preset(10).unwrap();
    ledger.edit_role_slot(3, "狂人", true).unwrap();

    for _ in 0..200 {
        let pick = ledger.draw_prophecy().unwrap().to_string();
        let slot = ledger
            .catalog()
            .slots()
            .iter()
            .find(|s| s.name == pick)
            .unwrap();
        assert!(!slot.prophecy_excluded, "{pick}");
    }
}

#[test]
fn prophecy_fails_only_when_everything_excluded() {
    let mut ledger = SessionLedger::default();
    ledger.load_role_preset(9).unwrap();
    let names: Vec<String> = ledger.catalog().slots().iter().map(|s| s.name.clone()).collect();

    for (i, name) in names.iter().enumerate().take(8) {
        ledger.edit_role_slot(i + 1, name, true).unwrap();
        assert!(ledger.draw_prophecy().is_ok());
    }
    ledger.edit_role_slot(9, &names[8], true).unwrap();
    assert_eq!(ledger.draw_prophecy(), Err(GmError::EmptyCandidates));
}

// ---------------------------------------------------------------------------
// exports and resizing
// ---------------------------------------------------------------------------

#[test]
fn exports_are_idempotent() {
    let mut ledger = ledger_with_names("A,B,C,D,E,F,G,H,I");
    ledger.load_role_preset(9).unwrap();
    ledger.assign_speaking_order();
    ledger.assign_roles().unwrap();

    let table = ledger.current_table();
    let texts = (ledger.export_speaking_order_text(), ledger.export_role_text());
    for _ in 0..3 {
        assert_eq!(
            (ledger.export_speaking_order_text(), ledger.export_role_text()),
            texts
        );
    }
    assert_eq!(ledger.current_table(), table);
}

#[test]
fn resize_round_trip_preserves_prefix() {
    let mut ledger = ledger_with_names("A,B,C,D,E,F,G,H,I");
    let before: Vec<_> = ledger
        .roster()
        .participants()
        .iter()
        .map(|p| (p.id, p.display_name()))
        .collect();

    ledger.set_participant_count(11).unwrap();
    ledger.set_participant_count(9).unwrap();

    let after: Vec<_> = ledger
        .roster()
        .participants()
        .iter()
        .map(|p| (p.id, p.display_name()))
        .collect();
    assert_eq!(after, before);
}
