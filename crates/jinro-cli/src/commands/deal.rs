use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use jinro_core::SessionLedger;

/// What to draw in a one-shot deal.
pub struct DealOptions {
    pub players: usize,
    pub names: Option<String>,
    pub roles: bool,
    pub omen: bool,
}

pub fn run(options: DealOptions, format: &str, output: Option<&Path>) -> Result<(), String> {
    let mut ledger = super::open_ledger(options.players, false)?;

    if let Some(names) = &options.names {
        ledger.set_bulk_names(names);
        ledger.apply_bulk_names();
    }
    if options.roles || options.omen {
        ledger
            .load_role_preset(options.players)
            .map_err(|e| e.to_string())?;
    }

    ledger.assign_speaking_order();
    if options.roles {
        ledger.assign_roles().map_err(|e| e.to_string())?;
    }
    if options.omen {
        ledger.draw_prophecy().map_err(|e| e.to_string())?;
    }

    tracing::debug!(format, state = %ledger.state(), "rendering deal");

    let content = match format {
        "table" => render_table(&ledger, options.roles),
        "text" => render_text(&ledger, options.roles),
        "json" => render_json(&ledger)?,
        _ => {
            return Err(format!(
                "unsupported format: \"{format}\". Use: table, text, json"
            ));
        }
    };

    if let Some(path) = output {
        std::fs::write(path, &content)
            .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
        println!("  Exported to {}", path.display());
    } else {
        print!("{content}");
    }

    Ok(())
}

fn render_table(ledger: &SessionLedger, with_roles: bool) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if with_roles {
        table.set_header(vec!["Order", "Name", "Role", "Draw A", "Draw B"]);
    } else {
        table.set_header(vec!["Order", "Name", "Draw A"]);
    }

    for row in ledger.current_table() {
        let order = row.order.map(|o| o.to_string()).unwrap_or_default();
        let draw_a = row.draw_a.map(|d| d.to_string()).unwrap_or_default();
        if with_roles {
            let draw_b = row.draw_b.map(|d| d.to_string()).unwrap_or_default();
            table.add_row(vec![
                order,
                row.name,
                row.role.unwrap_or_default(),
                draw_a,
                draw_b,
            ]);
        } else {
            table.add_row(vec![order, row.name, draw_a]);
        }
    }

    let mut out = format!("{table}\n");
    if let Some(omen) = ledger.omen() {
        out.push_str(&format!("\n  Prophecy: {omen}\n"));
    }
    out
}

fn render_text(ledger: &SessionLedger, with_roles: bool) -> String {
    let mut out = if with_roles {
        ledger.export_role_text()
    } else {
        ledger.export_speaking_order_text()
    };
    out.push('\n');
    if let Some(omen) = ledger.omen() {
        out.push_str(&format!("Prophecy: {omen}\n"));
    }
    out
}

fn render_json(ledger: &SessionLedger) -> Result<String, String> {
    let export = serde_json::json!({
        "participants": ledger.participant_count(),
        "table": ledger.current_table(),
        "prophecy": ledger.omen(),
    });

    serde_json::to_string_pretty(&export)
        .map(|s| s + "\n")
        .map_err(|e| format!("JSON serialization error: {e}"))
}
