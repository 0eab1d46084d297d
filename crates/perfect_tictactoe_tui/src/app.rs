//! Application state and logic.
//!
//! Everything here is terminal-free: key codes come in, the session is
//! driven, and the status line is updated for the renderer.

use crate::input::{digit_position, menu_choice, move_cursor};
use crossterm::event::KeyCode;
use perfect_tictactoe::{GameMode, Outcome, Position, Session};
use tracing::{debug, info, warn};

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Mode selection.
    Menu,
    /// A game is running (or just finished).
    Playing,
}

/// Main application state.
pub struct App {
    screen: Screen,
    menu_selection: GameMode,
    session: Option<Session>,
    cursor: Position,
    hint: Option<Position>,
    show_hints: bool,
    status_message: String,
    should_quit: bool,
}

impl App {
    /// Creates the app on the mode menu.
    pub fn new(show_hints: bool) -> Self {
        Self {
            screen: Screen::Menu,
            menu_selection: GameMode::HumanVsHuman,
            session: None,
            cursor: Position::Center,
            hint: None,
            show_hints,
            status_message: "Choose a game mode".to_string(),
            should_quit: false,
        }
    }

    /// Creates the app with a game already started.
    pub fn playing(mode: GameMode, show_hints: bool) -> Self {
        let mut app = Self::new(show_hints);
        app.start(mode);
        app
    }

    /// Starts a new game in `mode`.
    pub fn start(&mut self, mode: GameMode) {
        info!(%mode, "Starting game from shell");
        self.attach(Session::new(mode));
    }

    fn attach(&mut self, session: Session) {
        self.session = Some(session);
        self.screen = Screen::Playing;
        self.cursor = Position::Center;
        self.hint = None;
        self.refresh_status();
    }

    /// Returns the current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Highlighted menu entry.
    pub fn menu_selection(&self) -> GameMode {
        self.menu_selection
    }

    /// Returns the running session, if any.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Returns the board cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Suggested cell from the last hint request.
    pub fn hint(&self) -> Option<Position> {
        self.hint
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Returns true once the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns true when the main loop should schedule the AI's move.
    pub fn wants_ai_move(&self) -> bool {
        self.screen == Screen::Playing && self.session.as_ref().is_some_and(Session::is_ai_turn)
    }

    /// Handles one key press.
    pub fn handle_key(&mut self, key: KeyCode) {
        debug!(?key, screen = ?self.screen, "Key pressed");
        match key {
            KeyCode::Char('q') | KeyCode::Esc => {
                info!("User quit");
                self.should_quit = true;
            }
            _ => match self.screen {
                Screen::Menu => self.handle_menu_key(key),
                Screen::Playing => self.handle_game_key(key),
            },
        }
    }

    fn handle_menu_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char(c) => {
                if let Some(mode) = menu_choice(c) {
                    self.start(mode);
                }
            }
            KeyCode::Up | KeyCode::Down => {
                self.menu_selection = match self.menu_selection {
                    GameMode::HumanVsHuman => GameMode::HumanVsAi,
                    GameMode::HumanVsAi => GameMode::HumanVsHuman,
                };
            }
            KeyCode::Enter => self.start(self.menu_selection),
            _ => {}
        }
    }

    fn handle_game_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('r') => self.restart(),
            KeyCode::Char('h') if self.show_hints => self.request_hint(),
            KeyCode::Enter | KeyCode::Char(' ') => self.place(self.cursor),
            KeyCode::Char(c) => {
                if let Some(pos) = digit_position(c) {
                    self.cursor = pos;
                    self.place(pos);
                }
            }
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key);
            }
            _ => {}
        }
    }

    /// Plays a human move at `pos`.
    pub fn place(&mut self, pos: Position) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.apply_human_move(pos.row(), pos.col()) {
            Ok(_) => {
                self.hint = None;
                self.refresh_status();
            }
            Err(e) => {
                warn!(error = %e, position = %pos, "Move rejected");
                self.status_message = e.kind().to_string();
            }
        }
    }

    /// Lets the AI take its turn.
    pub fn play_ai_move(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.apply_ai_move() {
            Ok(mv) => {
                info!(%mv, "AI moved");
                self.refresh_status();
                if !self.is_finished() {
                    self.status_message = format!(
                        "AI placed marker at row {}, col {}. {}",
                        mv.position.row(),
                        mv.position.col(),
                        self.status_message
                    );
                }
            }
            Err(e) => {
                warn!(error = %e, "AI move failed");
                self.status_message = e.kind().to_string();
            }
        }
    }

    fn request_hint(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if !session.is_human_turn() {
            return;
        }
        match session.suggest_move() {
            Ok(choice) => {
                debug!(position = %choice.position, score = choice.score, "Hint computed");
                self.hint = Some(choice.position);
                self.cursor = choice.position;
                self.status_message = format!("Hint: {}", choice.position);
            }
            Err(e) => self.status_message = e.kind().to_string(),
        }
    }

    /// Goes back to the menu.
    pub fn restart(&mut self) {
        debug!("Restarting game");
        self.session = None;
        self.hint = None;
        self.screen = Screen::Menu;
        self.status_message = "Choose a game mode".to_string();
    }

    fn is_finished(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_finished)
    }

    fn refresh_status(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let snapshot = session.query_state();
        self.status_message = match (snapshot.outcome(), snapshot.to_move()) {
            (Outcome::Win(player), _) => {
                format!("{player} wins! Press 'r' to play again or 'q' to quit.")
            }
            (Outcome::Draw, _) => "It's a draw! Press 'r' to play again or 'q' to quit.".to_string(),
            (Outcome::Ongoing, Some(player)) if session.mode().ai_player() == Some(*player) => {
                "AI is thinking...".to_string()
            }
            (Outcome::Ongoing, Some(player)) => format!("Player {player}'s turn"),
            (Outcome::Ongoing, None) => String::new(),
        };
    }
}

#[cfg(test)]
impl App {
    fn with_session(session: Session, show_hints: bool) -> Self {
        let mut app = Self::new(show_hints);
        app.attach(session);
        app
    }
}
