//! CLI frontend for the werewolf moderator assistant.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "jinro",
    about = "jinro — speaking order, roles, and prophecy draws for werewolf games",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log draws and state changes to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the role table for a participant count
    Presets {
        /// Participant count (9-11)
        #[arg(short, long, default_value = "9")]
        players: usize,
    },

    /// Draw a speaking order, and optionally deal roles and a prophecy, in one go
    Deal {
        /// Participant count (9-11)
        #[arg(short, long, default_value = "9")]
        players: usize,

        /// Comma-separated participant names in seating order
        #[arg(short, long)]
        names: Option<String>,

        /// Also deal the preset roles
        #[arg(short, long)]
        roles: bool,

        /// Also draw a prophecy target
        #[arg(long)]
        omen: bool,

        /// Output format: table, text, json
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run an interactive moderator session
    Session {
        /// Starting participant count (9-11)
        #[arg(short, long, default_value = "9")]
        players: usize,

        /// Load the matching role table whenever the count changes
        #[arg(long)]
        auto_preset: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // RUST_LOG overrides; --verbose => debug; else warnings only
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "jinro_core=debug,jinro=debug"
        } else {
            "jinro_core=warn,jinro=warn"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let result = match cli.command {
        Commands::Presets { players } => commands::presets::run(players),
        Commands::Deal {
            players,
            names,
            roles,
            omen,
            format,
            output,
        } => commands::deal::run(
            commands::deal::DealOptions {
                players,
                names,
                roles,
                omen,
            },
            &format,
            output.as_deref(),
        ),
        Commands::Session {
            players,
            auto_preset,
        } => commands::session::run(players, auto_preset),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
