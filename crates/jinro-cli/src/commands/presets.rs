use comfy_table::{ContentArrangement, Table};
use jinro_core::{PlayerCount, load_preset};

pub fn run(players: usize) -> Result<(), String> {
    let count = PlayerCount::new(players).map_err(|e| e.to_string())?;
    let slots = load_preset(count);

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["No.", "Role", "Kind", "Prophecy"]);

    for slot in &slots {
        let draw = if slot.prophecy_excluded {
            "excluded"
        } else {
            "eligible"
        };
        table.add_row(vec![
            slot.number.to_string(),
            slot.name.clone(),
            slot.kind.to_string(),
            draw.to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} roles for {count} participants", slots.len());

    Ok(())
}
