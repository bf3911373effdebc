mod logging;
mod shell;
mod tui;

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tasklist_core::TaskListStore;
use tracing::{info, warn};

use crate::logging::LogConfig;
use crate::shell::Shell;

#[derive(Parser)]
#[command(name = "tasklist")]
#[command(about = "Pending and completed to-do lists, kept in memory", long_about = None)]
struct Cli {
    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Append logs to this file (the TUI only logs when this is set)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Task added to the pending list at start-up; may be repeated
    #[arg(long = "seed", global = true)]
    seeds: Vec<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Clone, Copy, PartialEq)]
enum Commands {
    /// Open the Terminal User Interface
    Tui,
    /// Read commands line by line from stdin
    Shell,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    logging::init(&LogConfig {
        level: cli.log_level.clone(),
        file: cli.log_file.clone(),
        to_stderr: command == Commands::Shell,
    })?;

    let mut store = TaskListStore::new();
    for seed in cli.seeds {
        if let Err(err) = store.add_pending(seed.as_str()) {
            warn!(%err, seed = %seed, "skipping seed task");
            eprintln!("Warning: skipping seed '{}': {}", seed, err);
        }
    }
    info!(pending = store.pending().len(), "store ready");

    match command {
        Commands::Tui => tui::run(store)?,
        Commands::Shell => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            let mut shell = Shell::new(stdin.lock(), io::stdout().lock(), interactive);
            shell.run(&mut store)?;
        }
    }
    Ok(())
}
