pub mod deal;
pub mod presets;
pub mod session;

use jinro_core::{LedgerConfig, PlayerCount, SessionLedger};

/// Start a ledger with `players` seats, rejecting unsupported counts.
fn open_ledger(players: usize, auto_preset: bool) -> Result<SessionLedger, String> {
    let count = PlayerCount::new(players).map_err(|e| e.to_string())?;
    let config = LedgerConfig::default()
        .with_participant_count(count)
        .with_preset_reload(auto_preset);
    Ok(SessionLedger::new(config))
}
