//! Perfect Tic-Tac-Toe - terminal shell
//!
//! Mode menu, board rendering and the AI turn pause. Game rules and the
//! minimax search live in the `perfect_tictactoe` library.

#![warn(missing_docs)]

mod app;
mod cli;
mod config;
mod input;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use cli::Cli;
use config::TuiConfig;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument};
use tracing_subscriber::EnvFilter;

type Tui = Terminal<CrosstermBackend<Stdout>>;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = TuiConfig::load(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?
        .with_overrides(&cli);

    init_logging(config.log_file())?;
    info!(?config, "Starting Perfect Tic-Tac-Toe");

    let mut app = match config.mode() {
        Some(mode) => App::playing(*mode, *config.show_hints()),
        None => App::new(*config.show_hints()),
    };

    let mut terminal = setup_terminal().context("Failed to set up terminal")?;
    let res = run(
        &mut terminal,
        &mut app,
        Duration::from_millis(*config.ai_delay_ms()),
    );
    restore_terminal(&mut terminal).context("Failed to restore terminal")?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

/// Logs go to a file so they don't interfere with the TUI.
fn init_logging(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Render, then either play the AI's turn once its pause is over or poll for a key.
#[instrument(skip(terminal, app))]
fn run(terminal: &mut Tui, app: &mut App, ai_delay: Duration) -> Result<()> {
    let mut ai_due: Option<Instant> = None;

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if app.should_quit() {
            return Ok(());
        }

        if app.wants_ai_move() {
            let due = *ai_due.get_or_insert_with(|| Instant::now() + ai_delay);
            if Instant::now() >= due {
                debug!("AI pause elapsed");
                app.play_ai_move();
                ai_due = None;
                continue;
            }
        } else {
            ai_due = None;
        }

        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key.code);
        }
    }
}
