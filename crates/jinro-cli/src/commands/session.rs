use std::io::{self, BufRead, Write};

use colored::Colorize;

pub fn run(players: usize, auto_preset: bool) -> Result<(), String> {
    let mut ledger = super::open_ledger(players, auto_preset)?;
    if auto_preset {
        ledger
            .load_role_preset(players)
            .map_err(|e| e.to_string())?;
    }

    println!("  {} Moderator Session", "Starting".bold());
    println!("  Participants: {}", ledger.participant_count());
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match ledger.process(input) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}\n");
                }
                if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
                    break;
                }
            }
            Err(e) => {
                println!("{}\n", e.to_string().yellow());
            }
        }
    }

    Ok(())
}
