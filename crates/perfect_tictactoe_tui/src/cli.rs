//! Command-line interface.

use clap::Parser;
use perfect_tictactoe::GameMode;
use std::path::PathBuf;

/// Perfect Tic-Tac-Toe - play a friend or an AI that never loses
#[derive(Parser, Debug)]
#[command(name = "perfect_tictactoe")]
#[command(about = "Tic-tac-toe in the terminal with a minimax AI", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Game mode (human-vs-human or human-vs-ai). Shows the menu when omitted.
    #[arg(short, long)]
    pub mode: Option<GameMode>,

    /// Path to the TOML config file (missing file means defaults)
    #[arg(short, long, default_value = "perfect_tictactoe.toml")]
    pub config: PathBuf,

    /// Pause before the AI plays, in milliseconds
    #[arg(long)]
    pub ai_delay_ms: Option<u64>,

    /// Where to write logs (the terminal is owned by the UI)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Disable the 'h' hint key
    #[arg(long)]
    pub no_hints: bool,
}
